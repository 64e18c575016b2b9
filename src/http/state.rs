//! Shared handler state.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::{RequestLogConfig, ServiceConfig};

/// Settings read on every request; swapped wholesale on config reload.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeSettings {
    pub greeting: String,
    pub request_log: RequestLogConfig,
}

impl RuntimeSettings {
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            greeting: config.greeting.message.clone(),
            request_log: config.request_log.clone(),
        }
    }
}

/// Application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    settings: Arc<ArcSwap<RuntimeSettings>>,
}

impl AppState {
    pub fn new(settings: RuntimeSettings) -> Self {
        Self {
            settings: Arc::new(ArcSwap::from_pointee(settings)),
        }
    }

    /// Consistent snapshot of the current settings.
    pub fn settings(&self) -> Arc<RuntimeSettings> {
        self.settings.load_full()
    }

    /// Swap in the reloadable parts of a new configuration.
    pub fn apply(&self, config: &ServiceConfig) {
        self.settings.store(Arc::new(RuntimeSettings::from_config(config)));
    }
}
