//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Chat models (Ollama over HTTP, deterministic mock)
//! - HTTP API (axum router, controller, CORS and error mapping)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
