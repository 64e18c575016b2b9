//! End-to-end tests against a running greeting server.

use std::net::SocketAddr;
use std::time::Duration;

use greeting_service::config::ServiceConfig;

mod common;

#[tokio::test]
async fn test_greets_every_path() {
    let addr: SocketAddr = "127.0.0.1:28281".parse().unwrap();
    let server = common::start_server(addr, ServiceConfig::default()).await;
    let client = common::client();

    for path in ["/", "/health", "/deeply/nested/path?q=1"] {
        let res = client.get(server.url(path)).send().await.expect("server unreachable");
        assert_eq!(res.status(), 200);
        assert_eq!(res.text().await.unwrap(), "Hello from Rust Service! 🚀");
    }

    let res = client
        .post(server.url("/submit"))
        .header("x-forwarded-for", "203.0.113.5, 70.41.3.18")
        .body("ignored")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_config_update_changes_greeting() {
    let addr: SocketAddr = "127.0.0.1:28282".parse().unwrap();
    let server = common::start_server(addr, ServiceConfig::default()).await;
    let client = common::client();

    let mut updated = ServiceConfig::default();
    updated.listener.bind_address = addr.to_string();
    updated.greeting.message = "Hello from Node Service! 🚀".into();
    server.config_updates.send(updated).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let res = client.get(server.url("/")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "Hello from Node Service! 🚀");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown() {
    let addr: SocketAddr = "127.0.0.1:28283".parse().unwrap();
    let server = common::start_server(addr, ServiceConfig::default()).await;

    server.shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());

    let err = common::client().get(format!("http://{}/", addr)).send().await;
    assert!(err.is_err(), "listener should be closed after shutdown");
}
