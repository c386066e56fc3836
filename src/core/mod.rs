//! Core functionality for planning type guard generation
//!
//! The planning modules (`classifier` through `pass`) work purely on an
//! in-memory [`Project`](crate::models::Project). `discovery`, `parallel` and
//! `session` wrap them with file system access.

pub mod classifier;
pub mod dependencies;
pub mod diagnostics;
pub mod discovery;
pub mod guard_name;
pub mod imports;
pub mod lifecycle;
pub mod parallel;
pub mod pass;
pub mod resolver;
pub mod session;

pub use dependencies::DependencyTracker;
pub use diagnostics::Diagnostics;
pub use discovery::SourceDiscovery;
pub use lifecycle::{clean_generated, delete_if_generated, generated_header, GuardPathRule, GENERATED_WARNING};
pub use pass::GenerationPass;
pub use session::GuardSession;
