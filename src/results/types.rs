//! Result type definitions

use serde::{Deserialize, Serialize};

/// A single content match returned by the search engine.
///
/// Produced only by the proxy, and only from a complete engine payload;
/// there is no partially constructed result. Every field is passed through
/// to the presentation layer untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Textual excerpt matched by the query.
    pub content: String,
    /// Location of the match within the target site (URL path or document
    /// locator).
    pub path: String,
    /// Relevance score. The engine reports values in the 0-100 range but
    /// the score is not clamped or validated here; the engine owns the
    /// scale.
    pub score: f64,
    /// Raw HTML context surrounding the match. Never parsed or sanitized;
    /// the presentation layer renders it as escaped source text.
    pub html: String,
}

impl SearchResult {
    /// Create a new result.
    pub fn new(
        content: impl Into<String>,
        path: impl Into<String>,
        score: f64,
        html: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            path: path.into(),
            score,
            html: html.into(),
        }
    }
}

/// Success envelope, `{"results": [...]}`.
///
/// The same shape is used on both sides of the proxy: deserialized from the
/// engine's success response and serialized back out by the search API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    pub fn new(results: Vec<SearchResult>) -> Self {
        Self { results }
    }
}
