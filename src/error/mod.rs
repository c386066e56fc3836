//! Error handling for the Guardsmith application
//!
//! This module provides the error type, result alias, and severity handling
//! shared by the generation core and the surrounding tooling.

pub mod context;
#[cfg(test)]
mod tests;
pub mod types;

pub use context::handle_error;
pub use types::{ErrorSeverity, GuardError, Result};
