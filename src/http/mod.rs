//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (with peer address)
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign request ID)
//!     → request_log.rs (client_ip.rs resolves the client, log line, metrics)
//!     → handlers.rs (greeting from state.rs snapshot)
//!     → Send to client
//! ```

pub mod client_ip;
pub mod handlers;
pub mod request;
pub mod request_log;
pub mod server;
pub mod state;

pub use client_ip::{ClientAddress, RequestAddressContext};
pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use server::{build_router, GreetingServer};
pub use state::{AppState, RuntimeSettings};
