//! # Domain Layer
//!
//! Conversation turns, the assembled conversation and request validation.
//! This layer is independent of the HTTP framework and the model runtime.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
