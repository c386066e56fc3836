//! Module specifier resolution against the modules of a project

use crate::models::project::normalize_path;
use crate::models::{ModuleId, Project};
use std::path::{Path, PathBuf};

/// Extensions tried, in order, for a specifier written without one
const SOURCE_EXTENSIONS: [&str; 3] = ["ts", "tsx", "d.ts"];

/// JavaScript extensions a TypeScript import may spell out
const SCRIPT_EXTENSIONS: [&str; 4] = [".js", ".jsx", ".mjs", ".cjs"];

/// Resolves import specifiers to modules of a [`Project`]
///
/// Only relative specifiers are resolved; package imports point outside the
/// project and resolve to nothing.
pub struct ModuleResolver<'p> {
    project: &'p Project,
}

impl<'p> ModuleResolver<'p> {
    pub fn new(project: &'p Project) -> Self {
        Self { project }
    }

    /// Resolve `specifier` as written in the module at `from`
    pub fn resolve(&self, specifier: &str, from: &Path) -> Option<ModuleId> {
        match specifier.chars().next() {
            Some('.') => self.resolve_relative(specifier, from),
            Some('/') => self.resolve_candidates(Path::new(specifier)),
            _ => None,
        }
    }

    fn resolve_relative(&self, specifier: &str, from: &Path) -> Option<ModuleId> {
        let base = from.parent().unwrap_or(from);
        self.resolve_candidates(&base.join(specifier))
    }

    fn resolve_candidates(&self, candidate: &Path) -> Option<ModuleId> {
        candidate_paths(candidate)
            .into_iter()
            .find_map(|path| self.project.module_id(&path))
    }
}

/// Paths a specifier may refer to, most specific first
fn candidate_paths(candidate: &Path) -> Vec<PathBuf> {
    let candidate = normalize_path(candidate);
    let raw = candidate.to_string_lossy().into_owned();
    let mut paths = vec![candidate.clone()];

    // `./user.js` in a TypeScript project names `./user.ts`
    for script_ext in SCRIPT_EXTENSIONS {
        if let Some(stem) = raw.strip_suffix(script_ext) {
            for ext in SOURCE_EXTENSIONS {
                paths.push(PathBuf::from(format!("{}.{}", stem, ext)));
            }
        }
    }

    for ext in SOURCE_EXTENSIONS {
        paths.push(PathBuf::from(format!("{}.{}", raw, ext)));
    }
    for ext in SOURCE_EXTENSIONS {
        paths.push(candidate.join(format!("index.{}", ext)));
    }
    paths
}
