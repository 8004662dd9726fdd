//! HTTP networking module
//!
//! Provides the outbound HTTP client used to reach the search engine.

mod client;

pub use client::{HttpClient, HttpResponse};
