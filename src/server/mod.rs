//! Server construction and the accept loop.

pub mod listener;
pub mod router;

pub use listener::Server;
pub use router::{Handler, Router};
