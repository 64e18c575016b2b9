//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use greeting_service::config::ServiceConfig;
use greeting_service::http::GreetingServer;
use greeting_service::lifecycle::Shutdown;

/// A running server plus the handles needed to steer it.
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub config_updates: mpsc::UnboundedSender<ServiceConfig>,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    #[allow(dead_code)]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start the service on a fixed localhost port.
#[allow(dead_code)]
pub async fn start_server(addr: SocketAddr, mut config: ServiceConfig) -> TestServer {
    config.listener.bind_address = addr.to_string();

    let listener = TcpListener::bind(addr).await.unwrap();
    let shutdown = Shutdown::new();
    let (config_updates, update_rx) = mpsc::unbounded_channel();
    let server = GreetingServer::new(config);
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move { server.run(listener, update_rx, server_shutdown).await });

    tokio::time::sleep(Duration::from_millis(100)).await;

    TestServer {
        addr,
        shutdown,
        config_updates,
        handle,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
