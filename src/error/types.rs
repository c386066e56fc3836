//! Error types and definitions for Guardsmith
//!
//! This module defines the error enum shared by the generation core and the
//! outer layers (parsing, discovery, configuration, output).

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for Guardsmith operations
#[derive(Debug, Error)]
pub enum GuardError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// Reading a source file failed
    #[error("Error reading source file {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The parser does not know how to handle this file extension
    #[error("Unsupported source file type: {path}")]
    UnsupportedSourceType { path: PathBuf },

    /// The parser reported syntax errors
    #[error("Failed to parse {path}: {}", messages.join("; "))]
    Parse { path: PathBuf, messages: Vec<String> },

    /// A core invariant did not hold; aborts the affected module only
    #[error("Internal Error: {message}")]
    InternalInvariant { message: String },

    /// Removing a generated artifact failed
    #[error("Error deleting generated file {path}: {source}")]
    ArtifactDelete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid path errors
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied { path: PathBuf },

    /// TOML parsing errors
    #[error("TOML parsing error: {source}")]
    TomlParse {
        #[source]
        source: toml::de::Error,
    },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Directory traversal errors
    #[error("Directory traversal error for {path}: {message}")]
    DirectoryTraversal { path: PathBuf, message: String },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// CSV output was not valid UTF-8
    #[error("CSV serialization error: {source}")]
    CsvSerialize {
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Output directory not found
    #[error("Output directory not found: {path}")]
    OutputDirectoryNotFound { path: PathBuf },
}

impl GuardError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Warning level errors - the affected file is skipped
            GuardError::PermissionDenied { .. } => ErrorSeverity::Warning,
            GuardError::SourceRead { .. } => ErrorSeverity::Warning,
            GuardError::UnsupportedSourceType { .. } => ErrorSeverity::Warning,
            GuardError::Parse { .. } => ErrorSeverity::Warning,

            // Critical errors - process should terminate
            GuardError::Config { .. } => ErrorSeverity::Critical,
            GuardError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            GuardError::ConfigRead { .. } => ErrorSeverity::Critical,
            GuardError::ConfigParse { .. } => ErrorSeverity::Critical,
            GuardError::GlobPattern { .. } => ErrorSeverity::Critical,
            GuardError::StdoutWrite { .. } => ErrorSeverity::Critical,
            GuardError::OutputDirectoryNotFound { .. } => ErrorSeverity::Critical,

            // Regular errors - current operation fails but overall process can continue
            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            GuardError::PermissionDenied { path } => {
                format!("Cannot access '{}' due to permission denied. Check file permissions.", path.display())
            }
            GuardError::Io { source } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            GuardError::InvalidPath { path } => {
                format!("Invalid path: '{}'. Please provide a valid project directory.", path.display())
            }
            GuardError::ConfigNotFound { path } => {
                format!("Configuration file not found at '{}'. Create a config file or use command line options.", path.display())
            }
            GuardError::Parse { path, messages } => {
                format!("Could not parse '{}' ({} syntax errors). Skipping file.", path.display(), messages.len())
            }
            GuardError::UnsupportedSourceType { path } => {
                format!("'{}' is not a TypeScript source file. Skipping file.", path.display())
            }
            GuardError::OutputDirectoryNotFound { path } => {
                format!("Output directory '{}' does not exist. Please create the directory or specify a different output path.", path.display())
            }
            // For other errors, use the standard Display implementation
            _ => self.to_string(),
        }
    }

    /// Create an IO error with context
    pub fn io_error(source: std::io::Error) -> Self {
        GuardError::Io { source }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        GuardError::Config {
            message: message.into(),
        }
    }

    /// Create an internal invariant violation
    pub fn internal(message: impl Into<String>) -> Self {
        GuardError::InternalInvariant {
            message: message.into(),
        }
    }

    /// Create a parse error from parser messages
    pub fn parse_error(path: impl Into<PathBuf>, messages: Vec<String>) -> Self {
        GuardError::Parse {
            path: path.into(),
            messages,
        }
    }

    /// Create a directory traversal error
    pub fn directory_traversal_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        GuardError::DirectoryTraversal {
            path: path.into(),
            message: message.into(),
        }
    }
}

// Implement From for common error types
impl From<std::io::Error> for GuardError {
    fn from(err: std::io::Error) -> Self {
        GuardError::io_error(err)
    }
}

impl From<toml::de::Error> for GuardError {
    fn from(err: toml::de::Error) -> Self {
        GuardError::TomlParse { source: err }
    }
}

impl From<csv::Error> for GuardError {
    fn from(err: csv::Error) -> Self {
        GuardError::Csv { source: err }
    }
}

impl From<glob::PatternError> for GuardError {
    fn from(err: glob::PatternError) -> Self {
        GuardError::GlobPattern { source: err }
    }
}

impl From<serde_json::Error> for GuardError {
    fn from(err: serde_json::Error) -> Self {
        GuardError::JsonSerialize { source: err }
    }
}

/// Result type alias for Guardsmith operations
pub type Result<T> = std::result::Result<T, GuardError>;
