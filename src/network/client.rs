//! HTTP client for making requests to the search engine

use crate::config::OutgoingSettings;
use anyhow::Result;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// HTTP client wrapper with sitesift-specific configuration
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

/// An outbound response collapsed to what the proxy needs.
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
}

impl HttpResponse {
    /// Check if the response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs_f64(settings.request_timeout))
            .pool_max_idle_per_host(settings.pool_maxsize)
            .user_agent(concat!("sitesift/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true);

        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build()?;

        Ok(Self { client })
    }

    /// POST a JSON body and read the full response.
    ///
    /// An `Err` here means the exchange itself failed (connect, timeout,
    /// body read); an error *status* still comes back as `Ok` for the
    /// caller to classify.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<HttpResponse, reqwest::Error> {
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok(HttpResponse { status, text })
    }
}
