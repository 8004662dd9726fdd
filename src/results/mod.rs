//! Result types for search matches
//!
//! This module defines the result structures shared by the proxy and the
//! web boundary.

mod types;

pub use types::*;
