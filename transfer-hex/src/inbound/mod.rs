//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the transfer engine.

mod handlers;
mod server;

pub use server::HttpServer;
