//! Microserve - Minimal HTTP/1.1 Server
//!
//! Core library for the HTTP protocol layer, routing, and built-in handlers.

pub mod config;
pub mod handlers;
pub mod http;
pub mod server;
