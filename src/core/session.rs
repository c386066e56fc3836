//! A complete run: discover, parse, link, clean and plan

use super::diagnostics::Diagnostics;
use super::discovery::SourceDiscovery;
use super::lifecycle::{clean_generated, GuardPathRule};
use super::parallel::{process_with_progress, ProgressUpdate};
use super::pass::GenerationPass;
use crate::error::{handle_error, GuardError, Result};
use crate::models::plan::SkippedSource;
use crate::models::{GuardPlan, Project, Settings, SourceModule};
use crate::parsers::{link_project, ASTParser};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Drives one generation run for a set of settings
pub struct GuardSession {
    settings: Settings,
    parser: ASTParser,
}

impl GuardSession {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            parser: ASTParser::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn rule(&self) -> GuardPathRule {
        GuardPathRule::new(
            &self.settings.process.guard_file_name,
            &self.settings.source_extensions,
        )
    }

    pub fn run(&self) -> Result<GuardPlan> {
        self.run_with_progress(|_| {})
    }

    /// Run with a callback invoked once per parsed file
    pub fn run_with_progress<P>(&self, progress: P) -> Result<GuardPlan>
    where
        P: Fn(ProgressUpdate) + Send + Sync,
    {
        let mut discovery = SourceDiscovery::new(&self.settings)?;
        let files = discovery.discover()?;
        let mut skipped: Vec<SkippedSource> = discovery
            .take_errors()
            .into_iter()
            .map(|(path, err)| SkippedSource {
                path,
                reason: err.user_message(),
            })
            .collect();
        info!(files = files.len(), root = %self.settings.project_path.display(), "discovered sources");

        let (project, parse_skipped) = self.parse_all(files, progress)?;
        skipped.extend(parse_skipped);

        let (mut plan, project) = self.plan(project)?;
        plan.skipped = skipped;

        if self.settings.clean && !self.settings.dry_run {
            remove_artifacts(project.deleted_paths())?;
        }
        Ok(plan)
    }

    /// Parse every file into a project; unparsable files are skipped, critical errors abort
    fn parse_all<P>(&self, files: Vec<PathBuf>, progress: P) -> Result<(Project, Vec<SkippedSource>)>
    where
        P: Fn(ProgressUpdate) + Send + Sync,
    {
        let parsed = process_with_progress(
            files,
            self.settings.parallel,
            |path| {
                let result = self.parser.parse_file(&path);
                (path, result)
            },
            progress,
        );

        let mut modules: Vec<SourceModule> = Vec::with_capacity(parsed.len());
        let mut skipped = Vec::new();
        for (path, result) in parsed {
            match result {
                Ok(module) => modules.push(module),
                Err(err) => {
                    let reason = err.user_message();
                    if let Some(critical) = handle_error(err) {
                        return Err(critical);
                    }
                    skipped.push(SkippedSource { path, reason });
                }
            }
        }

        modules.sort_by(|a, b| a.path.cmp(&b.path));
        let mut project = Project::new();
        for module in modules {
            project.add_module(module);
        }
        debug!(modules = project.len(), skipped = skipped.len(), "built project");
        Ok((project, skipped))
    }

    /// Link, optionally clean, and run the generation pass over a parsed project
    pub fn plan(&self, mut project: Project) -> Result<(GuardPlan, Project)> {
        link_project(&mut project);

        let rule = self.rule();
        let mut diagnostics = Diagnostics::new();
        let deleted = if self.settings.clean {
            clean_generated(&mut project, &rule, &mut diagnostics)?
        } else {
            Vec::new()
        };

        let mut plan = GenerationPass::new(&project, &self.settings.process, rule).run(&mut diagnostics);
        plan.deleted = deleted;
        plan.diagnostics = diagnostics.into_vec();
        Ok((plan, project))
    }
}

/// Remove deleted artifacts from disk
pub fn remove_artifacts(paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        remove_artifact(path)?;
    }
    Ok(())
}

fn remove_artifact(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|source| GuardError::ArtifactDelete {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "removed generated file");
    Ok(())
}
