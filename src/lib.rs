//! Greeting service library.
//!
//! Answers every HTTP request with a fixed greeting and logs who asked,
//! resolving the client from `X-Forwarded-For` when a proxy sits in front.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::schema::ServiceConfig;
pub use http::GreetingServer;
pub use lifecycle::Shutdown;
