//! Web server module
//!
//! Provides the HTTP API and web interface for Sitesift.

mod handlers;
mod routes;
mod state;
mod templates;
mod view;

pub use routes::create_router;
pub use state::AppState;
pub use templates::Templates;
