//! Search proxy boundary
//!
//! The sole path between the UI and the external search engine. A proxy
//! validates the `(url, query)` pair, forwards it, and normalizes every
//! engine outcome into either a complete result set or one tagged
//! [`ProxyError`], so callers never see raw engine responses.

mod error;

pub use error::ProxyError;

use crate::config::EngineSettings;
use crate::network::HttpClient;
use crate::results::{SearchResponse, SearchResult};
use error::FALLBACK_UPSTREAM_MESSAGE;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Path of the engine's search endpoint, relative to its base URL.
const SEARCH_ENDPOINT: &str = "/api/search";

/// Forwards search requests to the external engine.
///
/// Stateless across invocations: one [`forward`](Self::forward) call makes
/// at most one outbound request and never retries, so a single proxy is
/// shared behind an `Arc` by every session and handler.
#[derive(Debug, Clone)]
pub struct SearchProxy {
    client: HttpClient,
    endpoint: String,
}

/// Body of the outbound engine request.
#[derive(Debug, Serialize)]
struct EngineSearchRequest<'a> {
    url: &'a str,
    query: &'a str,
}

/// Shape of the engine's error payload, as far as we care about it.
#[derive(Debug, Deserialize)]
struct EngineErrorBody {
    message: Option<String>,
}

impl SearchProxy {
    /// Create a proxy talking to the engine described by `settings`.
    pub fn new(client: HttpClient, settings: &EngineSettings) -> Self {
        let endpoint = format!(
            "{}{}",
            settings.base_url.trim_end_matches('/'),
            SEARCH_ENDPOINT
        );
        Self { client, endpoint }
    }

    /// Forward one search to the engine.
    ///
    /// An empty (after trimming) `url` or `query` fails immediately with
    /// [`ProxyError::InvalidRequest`] and produces no network traffic.
    /// Otherwise exactly one POST is made and the outcome is normalized:
    /// the engine's full result sequence on success, its own status and
    /// message on an error reply ([`ProxyError::Upstream`]), or
    /// [`ProxyError::Transport`] when it could not be reached at all. The
    /// two failure shapes stay distinguishable so callers can tell an
    /// engine that said no from an engine that never answered. A success
    /// reply whose body does not parse counts as an engine failure too,
    /// reported with the fallback message.
    pub async fn forward(&self, url: &str, query: &str) -> Result<Vec<SearchResult>, ProxyError> {
        if url.trim().is_empty() || query.trim().is_empty() {
            return Err(ProxyError::InvalidRequest);
        }

        debug!(endpoint = %self.endpoint, %query, "forwarding search to engine");

        let payload = EngineSearchRequest { url, query };
        let response = self
            .client
            .post_json(&self.endpoint, &payload)
            .await
            .map_err(|e| {
                warn!(error = %e, "search engine unreachable");
                ProxyError::Transport(e)
            })?;

        if !response.is_success() {
            let message = extract_error_message(&response.text);
            warn!(status = response.status, %message, "search engine returned an error");
            return Err(ProxyError::Upstream {
                status: response.status,
                message,
            });
        }

        // a garbled success is still classed as an engine fault, and like
        // every upstream fault it keeps the engine's own status
        let status = response.status;
        let parsed: SearchResponse = serde_json::from_str(&response.text).map_err(|e| {
            warn!(error = %e, "search engine returned a malformed success payload");
            ProxyError::Upstream {
                status,
                message: FALLBACK_UPSTREAM_MESSAGE.to_string(),
            }
        })?;

        debug!(result_count = parsed.results.len(), "engine responded");
        Ok(parsed.results)
    }
}

/// Best-effort extraction of the engine's own error message. Absent or
/// unparsable bodies, and blank messages, fall back to a generic string.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<EngineErrorBody>(body)
        .ok()
        .and_then(|e| e.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_UPSTREAM_MESSAGE.to_string())
}
