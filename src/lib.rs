//! Guardsmith - plans runtime type guards for TypeScript declarations
//!
//! This library discovers TypeScript sources, finds the interfaces, type
//! aliases and enums that need a runtime type guard, and computes for each
//! guard file its name, location and the imports its guards depend on.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{GenerationPass, GuardSession};
pub use error::{handle_error, ErrorSeverity, GuardError, Result};
pub use models::{
    config::{ProcessOptions, Settings},
    plan::{GuardEntry, GuardFilePlan, GuardName, GuardPlan},
    project::Project,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
