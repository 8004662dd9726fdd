//! Error taxonomy for the search proxy

use thiserror::Error;

/// Generic message used whenever the engine gives us nothing better.
pub(crate) const FALLBACK_UPSTREAM_MESSAGE: &str = "Failed to fetch search results";

/// Every way a forwarded search can fail.
///
/// The proxy, the session, and the web boundary all speak this one
/// taxonomy; the display string of each variant is exactly what the user
/// sees, so no caller invents its own wording or status literals.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The caller supplied an empty URL or query. Raised before any
    /// outbound call is made.
    #[error("URL and query are required")]
    InvalidRequest,

    /// The engine answered with a non-success status. The message is the
    /// engine's own when it sent one, otherwise a generic fallback.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// The engine could not be reached at all (connect failure, timeout,
    /// interrupted body).
    #[error("Could not reach the search service")]
    Transport(#[source] reqwest::Error),

    /// Anything unexpected on the proxy path, downgraded at the web
    /// boundary. Detail stays in the logs, never in the response.
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl ProxyError {
    /// HTTP status the web boundary answers with for this error.
    pub fn status(&self) -> u16 {
        match self {
            Self::InvalidRequest => 400,
            Self::Upstream { status, .. } => *status,
            Self::Transport(_) => 502,
            Self::Internal(_) => 500,
        }
    }

    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Upstream { .. } => "upstream_error",
            Self::Transport(_) => "transport_error",
            Self::Internal(_) => "internal_error",
        }
    }
}
