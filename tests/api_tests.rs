use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sitesift::config::Settings;
use sitesift::network::HttpClient;
use sitesift::web::{create_router, AppState};

mod test_helpers {
    use super::*;

    pub fn test_app(engine_url: &str) -> axum::Router {
        let mut settings = Settings::default();
        settings.engine.base_url = engine_url.to_string();
        let client = HttpClient::with_settings(&settings.outgoing).unwrap();
        let state = AppState::new(settings, client).unwrap();
        create_router(state)
    }

    /// URL of a port that was bound once and released, so connections to
    /// it are refused.
    pub fn unreachable_engine_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    pub fn engine_payload() -> serde_json::Value {
        serde_json::json!({
            "results": [
                {
                    "content": "Our pricing starts at $10 per month for the basic plan.",
                    "path": "/pricing",
                    "score": 95,
                    "html": "<section><h1>Pricing</h1></section>"
                },
                {
                    "content": "Contact sales for enterprise pricing options.",
                    "path": "/enterprise",
                    "score": 72.5,
                    "html": "<p>Contact sales.</p>"
                }
            ]
        })
    }

    pub fn api_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .uri("/api/search")
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    pub async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }
}

use test_helpers::{
    api_request, body_json, body_text, engine_payload, test_app, unreachable_engine_url,
};

#[tokio::test]
async fn test_api_search_returns_engine_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(engine_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let app = test_app(&server.uri());
    let response = app
        .oneshot(api_request(serde_json::json!({
            "url": "https://example.com",
            "query": "pricing"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
    assert_eq!(body["results"][0]["path"], "/pricing");
    assert_eq!(body["results"][0]["score"], 95.0);
}

#[tokio::test]
async fn test_api_search_requires_url_and_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(engine_payload()))
        .expect(0)
        .mount(&server)
        .await;

    let app = test_app(&server.uri());

    let response = app
        .clone()
        .oneshot(api_request(
            serde_json::json!({ "url": "https://example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "URL and query are required");

    let response = app
        .oneshot(api_request(serde_json::json!({ "query": "pricing" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_api_search_passes_engine_errors_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(serde_json::json!({ "message": "index unavailable" })),
        )
        .mount(&server)
        .await;

    let app = test_app(&server.uri());
    let response = app
        .oneshot(api_request(serde_json::json!({
            "url": "https://example.com",
            "query": "pricing"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["error"], "index unavailable");
}

#[tokio::test]
async fn test_api_search_uses_fallback_for_opaque_engine_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let app = test_app(&server.uri());
    let response = app
        .oneshot(api_request(serde_json::json!({
            "url": "https://example.com",
            "query": "pricing"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to fetch search results");
}

#[tokio::test]
async fn test_api_search_echoes_status_for_garbled_engine_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("surprise, not json"))
        .mount(&server)
        .await;

    let app = test_app(&server.uri());
    let response = app
        .oneshot(api_request(serde_json::json!({
            "url": "https://example.com",
            "query": "pricing"
        })))
        .await
        .unwrap();

    // the boundary always echoes the engine's own status, so a garbled 2xx
    // answers 200 with an error envelope instead of a result list
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to fetch search results");
    assert!(body.get("results").is_none());
}

#[tokio::test]
async fn test_api_search_maps_unreachable_engine_to_bad_gateway() {
    let app = test_app(&unreachable_engine_url());
    let response = app
        .oneshot(api_request(serde_json::json!({
            "url": "https://example.com",
            "query": "pricing"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Could not reach the search service");
}

#[tokio::test]
async fn test_api_search_rejects_unparsable_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(engine_payload()))
        .expect(0)
        .mount(&server)
        .await;

    let app = test_app(&server.uri());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/search")
                .method("POST")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn test_index_page_serves_the_search_form() {
    let server = MockServer::start().await;
    let app = test_app(&server.uri());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Enter website URL"));
    assert!(html.contains("Enter your search query"));
    assert!(html.contains("Search through website content with precision"));
}

#[tokio::test]
async fn test_search_page_renders_results() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(engine_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let app = test_app(&server.uri());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/search?url=https%3A%2F%2Fexample.com&query=pricing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Search Results"));
    // tera escapes the slash in the rendered path
    assert!(html.contains("Path: &#x2F;pricing"));
    assert!(html.contains("95% match"));
    assert!(html.contains("72.5% match"));
    assert!(html.contains("View HTML"));
}

#[tokio::test]
async fn test_search_page_expands_requested_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(engine_payload()))
        .mount(&server)
        .await;

    let app = test_app(&server.uri());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/search?url=https%3A%2F%2Fexample.com&query=pricing&expand=0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Hide HTML"));
    // raw source is shown escaped
    assert!(html.contains("&lt;section&gt;"));
}

#[tokio::test]
async fn test_search_page_renders_empty_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })),
        )
        .mount(&server)
        .await;

    let app = test_app(&server.uri());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/search?url=https%3A%2F%2Fexample.com&query=pricing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("No results found"));
    assert!(!html.contains("Search Results"));
}

#[tokio::test]
async fn test_search_page_renders_engine_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(serde_json::json!({ "message": "index unavailable" })),
        )
        .mount(&server)
        .await;

    let app = test_app(&server.uri());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/search?url=https%3A%2F%2Fexample.com&query=pricing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("index unavailable"));
    assert!(!html.contains("Search Results"));
}

#[tokio::test]
async fn test_search_page_without_params_redirects_home() {
    let server = MockServer::start().await;
    let app = test_app(&server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/search")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = MockServer::start().await;
    let app = test_app(&server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_stats_reflect_recorded_searches() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(engine_payload()))
        .mount(&server)
        .await;

    let app = test_app(&server.uri());

    let response = app
        .clone()
        .oneshot(api_request(serde_json::json!({
            "url": "https://example.com",
            "query": "pricing"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total_searches"], 1);
    assert_eq!(body["successes"], 1);
    assert_eq!(body["reliability"], 100.0);
}
