//! Sitesift: website content search in Rust
//!
//! Forwards a website URL and a free-text query to an external
//! content-search engine and renders the ranked matches with expandable
//! source context.

pub mod config;
pub mod metrics;
pub mod network;
pub mod proxy;
pub mod results;
pub mod session;
pub mod web;

pub use config::Settings;
pub use proxy::{ProxyError, SearchProxy};
pub use results::{SearchResponse, SearchResult};
pub use session::{SearchSession, SessionStatus};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for engine requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 30;
