//! HTTP request handlers

use super::state::AppState;
use super::view::{self, ExpansionState};
use crate::proxy::ProxyError;
use crate::results::SearchResponse;
use crate::session::SearchSession;
use axum::{
    extract::rejection::JsonRejection,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use std::time::Instant;
use tera::Context;
use url::form_urlencoded;

/// Query parameters for the search results page
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Target website URL
    pub url: Option<String>,
    /// Search query
    pub query: Option<String>,
    /// Comma-separated indices of expanded results
    pub expand: Option<String>,
}

/// Body of an API search request
#[derive(Debug, Deserialize)]
pub struct ApiSearchRequest {
    pub url: Option<String>,
    pub query: Option<String>,
}

/// JSON error response carrying a [`ProxyError`]
struct ApiError(ProxyError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status()).unwrap_or(StatusCode::BAD_GATEWAY);
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

/// Home page handler
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());
    ctx.insert("version", crate::VERSION);

    render(&state, "index.html", &ctx)
}

/// Search results page handler
pub async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    // A bare visit goes back to the form
    if params.url.is_none() && params.query.is_none() {
        return Redirect::to("/").into_response();
    }

    let url = params.url.unwrap_or_default();
    let query = params.query.unwrap_or_default();

    // Each page load is one complete search lifecycle
    let mut session = SearchSession::new(state.proxy.clone());
    run_search(&state, &mut session, &url, &query).await;

    let expansion = ExpansionState::from_query(params.expand.as_deref(), session.results().len());
    let entries = view::build_entries(session.results(), &expansion);

    // Query string the toggle links re-submit with
    let base_qs = form_urlencoded::Serializer::new(String::new())
        .append_pair("url", &url)
        .append_pair("query", &query)
        .finish();

    let mut ctx = Context::new();
    ctx.insert("instance_name", state.instance_name());
    ctx.insert("version", crate::VERSION);
    ctx.insert("url", &url);
    ctx.insert("query", &query);
    ctx.insert("status", &session.status());
    ctx.insert("error", &session.error());
    ctx.insert("entries", &entries);
    ctx.insert("base_qs", &base_qs);

    render(&state, "search.html", &ctx)
}

/// Drive one search through `session`, recording metrics around the call.
async fn run_search(state: &AppState, session: &mut SearchSession, url: &str, query: &str) {
    if !session.begin() {
        return;
    }
    state.metrics.inc_search();
    let started = Instant::now();
    let outcome = state.proxy.forward(url, query).await;
    match &outcome {
        Ok(_) => {
            state.metrics.record_success();
            state
                .metrics
                .record_latency(started.elapsed().as_millis() as u64);
        }
        Err(err) => state.metrics.record_failure(err.kind()),
    }
    session.resolve(outcome);
}

/// JSON search API handler
pub async fn api_search(
    State(state): State<AppState>,
    payload: Result<Json<ApiSearchRequest>, JsonRejection>,
) -> Response {
    state.metrics.inc_search();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "search request body was not valid JSON");
            let err = ProxyError::Internal(anyhow::Error::new(rejection));
            state.metrics.record_failure(err.kind());
            return ApiError(err).into_response();
        }
    };

    let url = request.url.unwrap_or_default();
    let query = request.query.unwrap_or_default();

    // Boundary check, independent of the proxy's own guard
    if url.trim().is_empty() || query.trim().is_empty() {
        let err = ProxyError::InvalidRequest;
        state.metrics.record_failure(err.kind());
        return ApiError(err).into_response();
    }

    let started = Instant::now();
    match state.proxy.forward(&url, &query).await {
        Ok(results) => {
            state.metrics.record_success();
            state
                .metrics
                .record_latency(started.elapsed().as_millis() as u64);
            Json(SearchResponse::new(results)).into_response()
        }
        Err(err) => {
            state.metrics.record_failure(err.kind());
            ApiError(err).into_response()
        }
    }
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}

/// Metrics summary handler
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "total_searches": state.metrics.get_total_searches(),
        "successes": state.metrics.get_successes(),
        "failures": state.metrics.get_failure_breakdown(),
        "avg_latency_ms": state.metrics.get_avg_latency(),
        "reliability": state.metrics.get_reliability(),
    }))
}

/// Robots.txt handler
pub async fn robots_txt() -> impl IntoResponse {
    (
        [(axum::http::header::CONTENT_TYPE, "text/plain")],
        "User-agent: *\nDisallow: /search\n",
    )
}

/// Favicon handler
pub async fn favicon() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

/// Render a template, downgrading failures to a plain 500
fn render(state: &AppState, template: &str, ctx: &Context) -> Response {
    match state.templates.render_with_context(template, ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}
