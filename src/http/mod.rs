//! HTTP protocol implementation.
//!
//! This module implements a minimal HTTP/1.1 server with support for keep-alive connections.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The main connection handler implementing the request-response state machine
//! - **`parser`**: Reads and parses incoming HTTP requests off the byte stream
//! - **`request`**: HTTP request representation and header accessors
//! - **`response`**: HTTP response representation with status vocabulary
//! - **`compression`**: Optional gzip compression of response bodies
//! - **`writer`**: Serializes and writes HTTP responses to the client
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │    Idle     │ ← Wait for the next request (idle deadline armed)
//!        └──────┬──────┘
//!               │ Request parsed
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatching    │ ← Resolve route, invoke handler
//!        └──────┬───────────┘
//!               │ Response ready (compressed if negotiated)
//!               ▼
//!        ┌──────────────────┐
//!        │    Responding    │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Idle (same connection)
//!               └─ Close → Closed
//! ```
//!
//! A parse timeout or client EOF in `Idle` moves straight to `Closed` with no
//! response; any other parse failure produces a 400 and then closes.
//!
//! # Example
//!
//! ```ignore
//! use microserve::http::connection::Connection;
//! use microserve::server::Router;
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let router = Arc::new(Router::new());
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let router = router.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, router, Duration::from_secs(5));
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod compression;
pub mod writer;
