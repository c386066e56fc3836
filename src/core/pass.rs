//! One generation pass over a project

use super::classifier::classify;
use super::dependencies::DependencyTracker;
use super::diagnostics::Diagnostics;
use super::guard_name::guard_name;
use super::imports::named_import_index;
use super::lifecycle::GuardPathRule;
use super::resolver::{is_readonly_array_type, type_to_dependency};
use crate::error::{GuardError, Result};
use indexmap::IndexMap;
use std::path::PathBuf;
use crate::models::plan::FailedModule;
use crate::models::{
    Diagnostic, DiagnosticKind, GuardEntry, GuardFilePlan, GuardPlan, ModuleId, ProcessOptions, Project,
    SourceModule, SyntaxNode, TypeRef, TypeShape,
};
use tracing::{debug, info};

/// Plans guard files for every source module of a project
///
/// Modules are visited in project order and declarations in source order,
/// so the same project always yields the same plan.
pub struct GenerationPass<'p> {
    project: &'p Project,
    options: &'p ProcessOptions,
    rule: GuardPathRule,
}

impl<'p> GenerationPass<'p> {
    pub fn new(project: &'p Project, options: &'p ProcessOptions, rule: GuardPathRule) -> Self {
        Self { project, options, rule }
    }

    pub fn run(&self, diagnostics: &mut Diagnostics) -> GuardPlan {
        let mut plan = GuardPlan::new(self.options.clone());
        // Output path -> the source that claimed it first
        let mut claimed: IndexMap<PathBuf, PathBuf> = IndexMap::new();

        for (id, module) in self.project.modules() {
            if self.rule.is_guard_file(&module.path) {
                continue;
            }
            plan.modules_scanned += 1;

            let planned = self
                .plan_module(id, module, diagnostics)
                .and_then(|file| match file {
                    Some(file) => claim_output(&mut claimed, file).map(Some),
                    None => Ok(None),
                });
            match planned {
                Ok(Some(file)) => plan.files.push(file),
                Ok(None) => {}
                Err(err) => {
                    diagnostics.report(
                        Diagnostic::new(DiagnosticKind::InternalInvariant, err.to_string()).in_module(&module.path),
                    );
                    plan.failed.push(FailedModule {
                        path: module.path.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            modules = plan.modules_scanned,
            files = plan.files.len(),
            failed = plan.failed.len(),
            "generation pass finished"
        );
        plan
    }

    fn plan_module(
        &self,
        id: ModuleId,
        module: &SourceModule,
        diagnostics: &mut Diagnostics,
    ) -> Result<Option<GuardFilePlan>> {
        let output = self.rule.derive_path(&module.path)?;

        let mut guards = Vec::new();
        let mut declarations = Vec::new();
        for (_, node) in module.top_level() {
            let Some(kind) = classify(node.kind) else {
                continue;
            };
            let Some(declaration) = node.name() else {
                continue;
            };
            if !node.exported {
                debug!(declaration, module = %module.path.display(), "not exported, skipping");
                continue;
            }
            let Some(name) = guard_name(node, self.options, diagnostics) else {
                continue;
            };

            guards.push(GuardEntry {
                declaration: declaration.to_string(),
                kind,
                function_name: name.function_name(declaration),
                name,
                default_export: node.default_export,
            });
            declarations.push(node);
        }

        if guards.is_empty() {
            return Ok(None);
        }

        let mut tracker = DependencyTracker::new();
        for node in declarations {
            self.collect_dependencies(node, &mut tracker, diagnostics);
        }

        debug!(module = ?id, guards = guards.len(), output = %output.display(), "planned guard file");
        Ok(Some(GuardFilePlan {
            source: module.path.clone(),
            output,
            guards,
            dependencies: tracker.into_map(),
            named_imports: named_import_index(module),
        }))
    }

    /// Record every import the guard of `node` needs
    fn collect_dependencies(&self, node: &SyntaxNode, tracker: &mut DependencyTracker, diagnostics: &mut Diagnostics) {
        for heritage in &node.heritage {
            self.walk(heritage, tracker, diagnostics);
        }
        if let Some(ty) = &node.ty {
            self.walk(ty, tracker, diagnostics);
        }
    }

    fn walk(&self, ty: &TypeRef, tracker: &mut DependencyTracker, diagnostics: &mut Diagnostics) {
        if is_readonly_array_type(ty) {
            for element in &ty.type_arguments {
                self.walk(element, tracker, diagnostics);
            }
            return;
        }

        match &ty.shape {
            TypeShape::Reference(_) => type_to_dependency(self.project, ty, tracker, diagnostics),
            TypeShape::Object(properties) => {
                for property in properties {
                    self.walk(&property.ty, tracker, diagnostics);
                }
            }
            TypeShape::Array(element) => self.walk(element, tracker, diagnostics),
            TypeShape::Tuple(members) | TypeShape::Union(members) | TypeShape::Intersection(members) => {
                for member in members {
                    self.walk(member, tracker, diagnostics);
                }
            }
            TypeShape::Primitive(_) | TypeShape::Literal(_) | TypeShape::TypeParameter(_) | TypeShape::Unknown => {}
        }

        for argument in &ty.type_arguments {
            self.walk(argument, tracker, diagnostics);
        }
    }
}

/// Reserve the file's output path, failing when another source already owns it
fn claim_output(claimed: &mut IndexMap<PathBuf, PathBuf>, file: GuardFilePlan) -> Result<GuardFilePlan> {
    if let Some(owner) = claimed.get(&file.output) {
        return Err(GuardError::internal(format!(
            "{} and {} both generate {}",
            owner.display(),
            file.source.display(),
            file.output.display()
        )));
    }
    claimed.insert(file.output.clone(), file.source.clone());
    Ok(file)
}
