//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, request log)
//! - Serve on a bound listener until shutdown
//! - Apply configuration updates to the running router state

use std::net::SocketAddr;
use std::time::Duration;

use axum::{middleware, routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::handlers::greet;
use crate::http::request::MakeRequestUuidV4;
use crate::http::request_log::log_request;
use crate::http::state::{AppState, RuntimeSettings};

/// HTTP server answering every request with the configured greeting.
pub struct GreetingServer {
    router: Router,
    state: AppState,
    config: ServiceConfig,
}

impl GreetingServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServiceConfig) -> Self {
        let state = AppState::new(RuntimeSettings::from_config(&config));
        let router = build_router(&config, state.clone());
        Self {
            router,
            state,
            config,
        }
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Configs received on `config_updates` replace the greeting and request
    /// log settings. Returns once `shutdown` fires and in-flight requests
    /// have drained.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ServiceConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let state = self.state.clone();
        let mut current = self.config.clone();
        let updates = tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                for section in restart_only_changes(&current, &new_config) {
                    tracing::warn!(section, "Change requires a restart; ignored");
                }
                state.apply(&new_config);
                current = new_config;
                tracing::info!("Configuration reloaded");
            }
        });

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        let served = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await;

        updates.abort();
        served?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(config: &ServiceConfig, state: AppState) -> Router {
    Router::new()
        .route("/", any(greet))
        .route("/{*path}", any(greet))
        .layer(middleware::from_fn_with_state(state.clone(), log_request))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.timeouts.request_secs,
                ))),
        )
}

/// Config sections that differ between `current` and `new` but only take
/// effect on restart.
fn restart_only_changes(current: &ServiceConfig, new: &ServiceConfig) -> Vec<&'static str> {
    let mut changed = Vec::new();
    if current.listener != new.listener {
        changed.push("listener");
    }
    if current.timeouts != new.timeouts {
        changed.push("timeouts");
    }
    if current.observability != new.observability {
        changed.push("observability");
    }
    changed
}
