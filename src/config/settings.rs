//! Settings validation

use std::path::Path;

use crate::error::{GuardError, Result};
use crate::models::config::Settings;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        if !settings.project_path.is_dir() {
            return Err(GuardError::InvalidPath {
                path: settings.project_path.clone(),
            });
        }

        for pattern in settings.exclude_patterns.iter().chain(&settings.paths) {
            glob::Pattern::new(pattern)
                .map_err(|e| GuardError::config_error(format!("Invalid pattern '{}': {}", pattern, e)))?;
        }

        Self::validate_guard_tag(&settings.process.guard_file_name)?;
        Self::validate_extensions(&settings.source_extensions)?;

        if let Some(path) = &settings.output_file {
            Self::validate_output_path(path)?;
        }

        Ok(())
    }

    /// The tag becomes one dot-separated segment of a file name
    pub fn validate_guard_tag(tag: &str) -> Result<()> {
        if tag.is_empty() {
            return Err(GuardError::config_error("guard_file_name must not be empty"));
        }
        if tag.contains(['/', '\\', '.']) {
            return Err(GuardError::config_error(format!(
                "guard_file_name '{}' must not contain path separators or dots",
                tag
            )));
        }
        Ok(())
    }

    fn validate_extensions(extensions: &[String]) -> Result<()> {
        if extensions.is_empty() {
            return Err(GuardError::config_error("source_extensions must not be empty"));
        }
        for extension in extensions {
            if extension.is_empty() || extension.starts_with('.') || extension.ends_with('.') {
                return Err(GuardError::config_error(format!(
                    "Invalid source extension '{}': give it without a leading dot, e.g. \"ts\"",
                    extension
                )));
            }
        }
        Ok(())
    }

    /// Validate that an output path is writable
    fn validate_output_path(path: &Path) -> Result<()> {
        let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };

        if !parent.exists() {
            return Err(GuardError::OutputDirectoryNotFound {
                path: parent.to_path_buf(),
            });
        }

        let metadata = std::fs::metadata(parent).map_err(GuardError::io_error)?;
        if metadata.permissions().readonly() {
            return Err(GuardError::PermissionDenied {
                path: parent.to_path_buf(),
            });
        }

        Ok(())
    }
}
