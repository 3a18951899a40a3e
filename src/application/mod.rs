//! # Application Layer
//!
//! Use cases coordinating the domain model with the chat model interface.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
