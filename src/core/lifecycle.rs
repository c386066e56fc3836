//! Generated file paths and safe removal of generated artifacts

use super::diagnostics::Diagnostics;
use crate::error::{GuardError, Result};
use crate::models::config::{DEFAULT_GUARD_FILE_NAME, DEFAULT_SOURCE_EXTENSIONS};
use crate::models::{Diagnostic, DiagnosticKind, Project};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Marker carried by every generated file; only files containing it are ever deleted
pub const GENERATED_WARNING: &str = "WARNING: Do not manually change this file.";

/// Header placed at the top of a generated file
pub fn generated_header(source_file_name: &str) -> String {
    format!(
        "/*\n * Generated type guards for \"{}\".\n * {}\n */",
        source_file_name, GENERATED_WARNING
    )
}

/// How generated paths are derived from source paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardPathRule {
    pub tag: String,
    /// Recognized extensions without the leading dot, longest first
    extensions: Vec<String>,
}

impl Default for GuardPathRule {
    fn default() -> Self {
        Self::new(DEFAULT_GUARD_FILE_NAME, DEFAULT_SOURCE_EXTENSIONS)
    }
}

impl GuardPathRule {
    pub fn new<I, S>(tag: impl Into<String>, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut extensions: Vec<String> = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();
        extensions.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        extensions.dedup();
        Self {
            tag: tag.into(),
            extensions,
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Split a file name into stem and recognized extension
    fn split<'a>(&'a self, file_name: &'a str) -> Option<(&'a str, &'a str)> {
        self.extensions.iter().find_map(|ext| {
            let stem = file_name.strip_suffix(ext.as_str())?.strip_suffix('.')?;
            if stem.is_empty() {
                None
            } else {
                Some((stem, ext.as_str()))
            }
        })
    }

    /// Whether the path has one of the recognized extensions
    pub fn is_source(&self, path: &Path) -> bool {
        file_name(path).map_or(false, |name| self.split(&name).is_some())
    }

    /// Derive the generated file path for `source`
    ///
    /// `user.ts` becomes `user.guard.ts` and `types.d.ts` becomes
    /// `types.guard.ts`.
    pub fn derive_path(&self, source: &Path) -> Result<PathBuf> {
        let name = file_name(source).ok_or_else(|| {
            GuardError::internal(format!("{} has no file name", source.display()))
        })?;
        let (stem, ext) = self.split(&name).ok_or_else(|| {
            GuardError::internal(format!(
                "{} does not have a recognized source extension",
                source.display()
            ))
        })?;
        let last = ext.rsplit('.').next().unwrap_or(ext);
        let output = source.with_file_name(format!("{}.{}.{}", stem, self.tag, last));

        if output == source {
            return Err(GuardError::internal(format!(
                "sourcePath and outFilePath are identical: {}",
                source.display()
            )));
        }
        debug!(source = %source.display(), output = %output.display(), "derived guard path");
        Ok(output)
    }

    /// Whether the path is named like a generated file
    pub fn is_guard_file(&self, path: &Path) -> bool {
        let Some(name) = file_name(path) else {
            return false;
        };
        let suffix = format!(".{}", self.tag);
        self.split(&name)
            .map_or(false, |(stem, _)| stem.ends_with(&suffix))
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}

/// Storage holding generated artifacts
pub trait ArtifactStore {
    /// Current contents, or `None` when there is no such artifact
    fn contents(&self, path: &Path) -> Option<&str>;

    fn delete(&mut self, path: &Path) -> Result<()>;
}

impl ArtifactStore for Project {
    fn contents(&self, path: &Path) -> Option<&str> {
        self.module_by_path(path)
            .filter(|module| !module.deleted)
            .map(|module| module.text.as_str())
    }

    fn delete(&mut self, path: &Path) -> Result<()> {
        let id = self
            .module_id(path)
            .ok_or_else(|| GuardError::InvalidPath { path: path.to_path_buf() })?;
        self.mark_deleted(id);
        Ok(())
    }
}

/// Delete `path` if it carries the generated marker
///
/// Files without the marker are hand-written as far as the generator is
/// concerned; they are left alone and a warning is reported.
pub fn delete_if_generated<S: ArtifactStore + ?Sized>(
    store: &mut S,
    path: &Path,
    diagnostics: &mut Diagnostics,
) -> Result<bool> {
    let generated = match store.contents(path) {
        Some(text) => text.contains(GENERATED_WARNING),
        None => return Ok(false),
    };

    if generated {
        store.delete(path)?;
        info!(path = %path.display(), "deleted generated file");
        Ok(true)
    } else {
        let message = format!(
            "{} is named like a generated artifact but missing the marker; not deleting it",
            path.display()
        );
        diagnostics.report(Diagnostic::new(DiagnosticKind::StaleArtifact, message).in_module(path));
        Ok(false)
    }
}

/// Delete every generated file in the project, returning the removed paths
pub fn clean_generated(
    project: &mut Project,
    rule: &GuardPathRule,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<PathBuf>> {
    let candidates: Vec<PathBuf> = project
        .modules()
        .filter(|(_, module)| rule.is_guard_file(&module.path))
        .map(|(_, module)| module.path.clone())
        .collect();

    let mut deleted = Vec::new();
    for path in candidates {
        if delete_if_generated(project, &path, diagnostics)? {
            deleted.push(path);
        }
    }
    Ok(deleted)
}
