//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use super::file::DEFAULT_CONFIG_FILE;
use crate::error::{GuardError, Result};
use crate::models::config::PartialSettings;
use tracing::debug;

/// Template written by `--init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("default_config.toml");

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(GuardError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| GuardError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    let settings: PartialSettings = toml::from_str(content).map_err(|source| GuardError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_partial_settings(&settings, path)?;

    if !settings.extra.is_empty() {
        let keys: Vec<&str> = settings.extra.keys().map(String::as_str).collect();
        debug!(path = %path.display(), ?keys, "passing through unrecognized options");
    }
    Ok(settings)
}

/// Validate partial settings for obvious errors
pub fn validate_partial_settings<P: AsRef<Path>>(settings: &PartialSettings, path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(project_path) = &settings.project_path {
        if project_path.as_os_str().is_empty() {
            return Err(GuardError::config_error(format!(
                "Invalid empty project_path in config file: {}",
                path.display()
            )));
        }
    }

    let patterns = settings.exclude_patterns.iter().chain(settings.paths.iter()).flatten();
    for pattern in patterns {
        if pattern.is_empty() {
            return Err(GuardError::config_error(format!(
                "Empty pattern in config file: {}",
                path.display()
            )));
        }

        glob::Pattern::new(pattern).map_err(|e| {
            GuardError::config_error(format!(
                "Invalid pattern '{}' in config file: {}: {}",
                pattern,
                path.display(),
                e
            ))
        })?;
    }

    if let Some(tag) = &settings.guard_file_name {
        if tag.is_empty() {
            return Err(GuardError::config_error(format!(
                "Invalid empty guard_file_name in config file: {}",
                path.display()
            )));
        }
    }

    if let Some(output_file) = &settings.output_file {
        if output_file.as_os_str().is_empty() {
            return Err(GuardError::config_error(format!(
                "Invalid empty output_file in config file: {}",
                path.display()
            )));
        }
    }

    Ok(())
}

/// Locations searched for a configuration file, in order
pub fn default_config_locations() -> Vec<PathBuf> {
    let mut locations = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];
    if let Some(home_dir) = dirs::home_dir() {
        locations.push(home_dir.join(DEFAULT_CONFIG_FILE));
    }
    if let Some(config_dir) = dirs::config_dir() {
        locations.push(config_dir.join("guardsmith").join("config.toml"));
    }
    locations
}

/// Find and load configuration from default locations
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    for location in default_config_locations() {
        if location.is_file() {
            debug!(path = %location.display(), "loading configuration file");
            return parse_config_file(&location).map(Some);
        }
    }
    Ok(None)
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(GuardError::io_error)?;
        }
    }

    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(GuardError::io_error)?;
    Ok(())
}
