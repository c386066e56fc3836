//! Configuration file and environment sources

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{parser, ConfigSource};
use crate::error::{GuardError, Result};
use crate::models::config::PartialSettings;
use tracing::warn;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".guardsmith.toml";

/// Prefix of the environment variables read by [`EnvConfig`]
pub const DEFAULT_ENV_PREFIX: &str = "GUARDSMITH";

/// Configuration file source
pub struct FileConfig {
    path: PathBuf,
    name: String,
    priority: u8,
}

impl FileConfig {
    /// A source for the default file in the current directory
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            name: "default config file".to_string(),
            priority: 20,
        }
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
            priority: 20,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a default configuration file at this location
    pub fn create_default(&self) -> Result<()> {
        parser::create_default_config(&self.path)
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(GuardError::ConfigNotFound {
                path: self.path.clone(),
            });
        }
        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment variable configuration source
///
/// Reads `<PREFIX>_PROJECT_PATH`, `<PREFIX>_PATHS`, `<PREFIX>_EXCLUDE`,
/// `<PREFIX>_EXPORT_ALL`, `<PREFIX>_GUARD_FILE_NAME`, `<PREFIX>_IMPORT_GUARDS`,
/// `<PREFIX>_PREVENT_EXPORT_IMPORTED`, `<PREFIX>_SHORT_CIRCUIT_CONDITION`,
/// `<PREFIX>_DEBUG`, `<PREFIX>_OUTPUT_FORMAT`, `<PREFIX>_OUTPUT_FILE` and
/// `<PREFIX>_PARALLEL`. List values are comma separated.
pub struct EnvConfig {
    prefix: String,
    name: String,
    priority: u8,
    vars: Option<BTreeMap<String, String>>,
}

impl EnvConfig {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            priority: 10,
            vars: None,
        }
    }

    /// A source reading from a fixed set of variables instead of the process environment
    pub fn with_vars<K, V>(prefix: impl Into<String>, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut config = Self::new(prefix);
        config.vars = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        config
    }

    fn var(&self, suffix: &str) -> Option<String> {
        let key = format!("{}_{}", self.prefix, suffix);
        match &self.vars {
            Some(vars) => vars.get(&key).cloned(),
            None => std::env::var(&key).ok(),
        }
    }

    fn flag(&self, suffix: &str) -> Option<bool> {
        let raw = self.var(suffix)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => {
                warn!(variable = %format!("{}_{}", self.prefix, suffix), value = %raw, "ignoring non-boolean value");
                None
            }
        }
    }

    fn list(&self, suffix: &str) -> Option<Vec<String>> {
        self.var(suffix).map(|raw| {
            raw.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
    }
}

const ENV_KEYS: [&str; 12] = [
    "PROJECT_PATH",
    "PATHS",
    "EXCLUDE",
    "EXPORT_ALL",
    "GUARD_FILE_NAME",
    "IMPORT_GUARDS",
    "PREVENT_EXPORT_IMPORTED",
    "SHORT_CIRCUIT_CONDITION",
    "DEBUG",
    "OUTPUT_FORMAT",
    "OUTPUT_FILE",
    "PARALLEL",
];

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings {
            project_path: self.var("PROJECT_PATH").map(PathBuf::from),
            paths: self.list("PATHS"),
            exclude_patterns: self.list("EXCLUDE"),
            export_all: self.flag("EXPORT_ALL"),
            guard_file_name: self.var("GUARD_FILE_NAME"),
            import_guards: self.var("IMPORT_GUARDS"),
            prevent_export_imported: self.flag("PREVENT_EXPORT_IMPORTED"),
            short_circuit_condition: self.var("SHORT_CIRCUIT_CONDITION"),
            debug: self.flag("DEBUG"),
            output_file: self.var("OUTPUT_FILE").map(PathBuf::from),
            parallel: self.flag("PARALLEL"),
            ..Default::default()
        };

        if let Some(format) = self.var("OUTPUT_FORMAT") {
            settings.output_format = Some(format.parse().map_err(GuardError::config_error)?);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        ENV_KEYS.iter().any(|key| self.var(key).is_some())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
