use std::sync::Arc;

use tokio::sync::RwLock;

use super::models::Message;
use crate::config::Config;
use crate::negotiation::{Registry, Representation};
use crate::observability::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Fully built before the server starts; never mutated afterwards
    pub registry: Arc<Registry>,
    /// Last representation stored through `PUT /message`
    pub current: Arc<RwLock<Option<Box<dyn Representation>>>>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(config: Config, registry: Registry) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            current: Arc::new(RwLock::new(None)),
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// State with the [`Message`] prototype registered under every configured
    /// media range
    pub fn from_config(config: Config) -> Self {
        let registry = message_registry(&config);
        Self::new(config, registry)
    }
}

/// Build the registry for the message resource
pub fn message_registry(config: &Config) -> Registry {
    let mut registry = Registry::new();
    for media_range in &config.negotiation.media_ranges {
        registry.register(media_range.as_str(), Message::default());
    }
    registry
}
