//! Source file discovery
//!
//! Walks the project root, skipping excluded directories, and returns the
//! TypeScript sources to parse in a stable order.

use crate::core::lifecycle::GuardPathRule;
use crate::error::{GuardError, Result};
use crate::models::config::Settings;
use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Finds source files under a project root
pub struct SourceDiscovery {
    root: PathBuf,
    exclude_patterns: Vec<Pattern>,
    include_patterns: Vec<(String, Pattern)>,
    rule: GuardPathRule,
    follow_links: bool,
    errors: Vec<(PathBuf, GuardError)>,
}

impl SourceDiscovery {
    /// Create a discovery for the given settings; invalid patterns are critical
    pub fn new(settings: &Settings) -> Result<Self> {
        let exclude_patterns = compile_patterns(&settings.exclude_patterns)?;
        let include_patterns = settings
            .paths
            .iter()
            .map(|raw| {
                let trimmed = raw.trim_start_matches("./").trim_end_matches('/').to_string();
                Pattern::new(&trimmed).map(|pattern| (trimmed, pattern))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            root: settings.project_path.clone(),
            exclude_patterns,
            include_patterns,
            rule: GuardPathRule::new(&settings.process.guard_file_name, &settings.source_extensions),
            follow_links: settings.follow_links,
            errors: Vec::new(),
        })
    }

    /// All source files under the root, sorted
    pub fn discover(&mut self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(GuardError::InvalidPath { path: self.root.clone() });
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(self.follow_links)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_excluded(entry));

        let mut errors = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && self.is_wanted(entry.path()) {
                        files.push(entry.into_path());
                    }
                }
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| self.root.clone());
                    let error = match err.io_error().map(|io| io.kind()) {
                        Some(std::io::ErrorKind::PermissionDenied) => GuardError::PermissionDenied { path: path.clone() },
                        _ => GuardError::directory_traversal_error(&path, err.to_string()),
                    };
                    warn!(path = %path.display(), "{}", error);
                    errors.push((path, error));
                }
            }
        }
        self.errors.extend(errors);

        files.sort();
        debug!(count = files.len(), root = %self.root.display(), "discovered source files");
        Ok(files)
    }

    /// Non-critical errors met while walking
    pub fn errors(&self) -> &[(PathBuf, GuardError)] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<(PathBuf, GuardError)> {
        std::mem::take(&mut self.errors)
    }

    fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    /// Check if an entry matches any exclude pattern, by name or by relative path
    fn is_excluded(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        let relative = self.relative(entry.path());
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.matches(&name) || pattern.matches_path(relative))
    }

    fn is_wanted(&self, path: &Path) -> bool {
        if !self.rule.is_source(path) {
            return false;
        }
        if self.include_patterns.is_empty() {
            return true;
        }
        let relative = self.relative(path);
        self.include_patterns
            .iter()
            .any(|(raw, pattern)| pattern.matches_path(relative) || relative.starts_with(raw))
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|pattern| Pattern::new(pattern).map_err(GuardError::from))
        .collect()
}
