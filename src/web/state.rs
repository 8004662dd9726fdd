//! Application state shared across handlers

use crate::config::Settings;
use crate::metrics::Metrics;
use crate::network::HttpClient;
use crate::proxy::SearchProxy;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search proxy
    pub proxy: Arc<SearchProxy>,
    /// Metrics collector
    pub metrics: Arc<Metrics>,
    /// Template renderer
    pub templates: Arc<super::Templates>,
}

impl AppState {
    /// Create new application state
    pub fn new(settings: Settings, client: HttpClient) -> anyhow::Result<Self> {
        let proxy = Arc::new(SearchProxy::new(client, &settings.engine));
        let templates = Arc::new(super::Templates::new()?);

        Ok(Self {
            settings: Arc::new(settings),
            proxy,
            metrics: Arc::new(Metrics::new()),
            templates,
        })
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
