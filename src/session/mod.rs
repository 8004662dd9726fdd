//! Search session lifecycle
//!
//! A session owns exactly one search at a time. It drives a submission
//! through the proxy and exposes the outcome as a snapshot the
//! presentation layer reads without knowing anything about transports.

use crate::proxy::{ProxyError, SearchProxy};
use crate::results::SearchResult;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Lifecycle phase of a session. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No search submitted yet.
    Idle,
    /// A search is in flight; further submissions are rejected.
    Loading,
    /// The last search resolved with a (possibly empty) result set.
    Success,
    /// The last search resolved with an error.
    Failed,
}

/// Single-flight state machine for one search's lifecycle.
///
/// Every transition takes `&mut self`, so single ownership by one
/// presentation context is a compile-time property rather than a runtime
/// check. While a search is in flight a new submission is rejected rather
/// than queued or cancelled, which keeps at most one outbound call per
/// session and rules out a stale response clobbering a newer one.
#[derive(Debug)]
pub struct SearchSession {
    proxy: Arc<SearchProxy>,
    status: SessionStatus,
    results: Vec<SearchResult>,
    error: Option<String>,
}

impl SearchSession {
    /// Create an idle session issuing its searches through `proxy`.
    pub fn new(proxy: Arc<SearchProxy>) -> Self {
        Self {
            proxy,
            status: SessionStatus::Idle,
            results: Vec::new(),
            error: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Results of the last search. Meaningful only in
    /// [`SessionStatus::Success`]; an empty slice there is a real outcome
    /// ("no matches"), not a failure.
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Display message of the last failure. Meaningful only in
    /// [`SessionStatus::Failed`].
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.status == SessionStatus::Loading
    }

    /// Move into `Loading`, clearing any previous outcome.
    ///
    /// Returns `false`, leaving the session untouched, while a search is
    /// already in flight. Drivers that own the suspension point call this
    /// directly and pair it with [`resolve`](Self::resolve); everyone else
    /// goes through [`submit`](Self::submit).
    pub fn begin(&mut self) -> bool {
        if self.status == SessionStatus::Loading {
            warn!("submission rejected: a search is already in flight");
            return false;
        }
        self.status = SessionStatus::Loading;
        self.results.clear();
        self.error = None;
        true
    }

    /// Apply the outcome of the in-flight search.
    ///
    /// `Loading` moves to `Success` (storing the results) or `Failed`
    /// (storing the error's display message). Outside `Loading` there is
    /// nothing to apply and the call is a logged no-op, which keeps the
    /// machine total over every (state, event) pair.
    pub fn resolve(&mut self, outcome: Result<Vec<SearchResult>, ProxyError>) {
        if self.status != SessionStatus::Loading {
            warn!(status = ?self.status, "resolve outside of a pending search ignored");
            return;
        }
        match outcome {
            Ok(results) => {
                debug!(result_count = results.len(), "search succeeded");
                self.status = SessionStatus::Success;
                self.results = results;
            }
            Err(err) => {
                debug!(kind = err.kind(), "search failed");
                self.status = SessionStatus::Failed;
                self.error = Some(err.to_string());
            }
        }
    }

    /// Fire one search through the proxy and wait for its resolution.
    ///
    /// Fire-and-forget from the caller's point of view: the outcome lands
    /// in the session snapshot, never in a return value. Submitting again
    /// after `Success` or `Failed` is the normal search-again path;
    /// submitting while `Loading` is rejected (see [`begin`](Self::begin)).
    pub async fn submit(&mut self, url: &str, query: &str) {
        if !self.begin() {
            return;
        }
        let outcome = self.proxy.forward(url, query).await;
        self.resolve(outcome);
    }
}
