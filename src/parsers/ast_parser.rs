//! AST parser wrapper using OXC

use super::declaration_collector::DeclarationCollector;
use crate::error::{GuardError, Result};
use crate::models::SourceModule;
use oxc_allocator::Allocator;
use oxc_diagnostics::OxcDiagnostic;
use oxc_parser::{ParseOptions, Parser};
use oxc_span::SourceType;
use parking_lot::Mutex;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Thread-safe allocator pool for reuse across parses
///
/// Allocators are `Send` but not `Sync`, so the pool hands them out by value.
pub struct AllocatorPool {
    allocators: Arc<Mutex<Vec<Allocator>>>,
}

impl AllocatorPool {
    /// Create a new allocator pool
    pub fn new(size: usize) -> Self {
        let allocators = (0..size).map(|_| Allocator::default()).collect();
        Self {
            allocators: Arc::new(Mutex::new(allocators)),
        }
    }

    /// Take an allocator from the pool
    pub fn take(&self) -> Option<Allocator> {
        self.allocators.lock().pop()
    }

    /// Return an allocator to the pool, emptied for the next parse
    pub fn return_allocator(&self, mut allocator: Allocator) {
        allocator.reset();
        self.allocators.lock().push(allocator);
    }

    pub fn available(&self) -> usize {
        self.allocators.lock().len()
    }
}

/// AST parser using OXC
pub struct ASTParser {
    parse_options: ParseOptions,
    allocator_pool: AllocatorPool,
}

impl ASTParser {
    /// Create a new AST parser
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            allocator_pool: AllocatorPool::new(num_cpus::get()),
        }
    }

    /// Read and parse a TypeScript file
    pub fn parse_file(&self, path: &Path) -> Result<SourceModule> {
        let source_text = fs::read_to_string(path).map_err(|source| GuardError::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_source(path, &source_text)
    }

    /// Parse source text and convert it into a module immediately
    /// The AST only lives as long as the allocator, so nothing borrowed from it escapes
    pub fn parse_source(&self, path: &Path, source_text: &str) -> Result<SourceModule> {
        let source_type = SourceType::from_path(path).map_err(|_| GuardError::UnsupportedSourceType {
            path: path.to_path_buf(),
        })?;

        let allocator = self.allocator_pool.take().unwrap_or_default();

        let result = {
            let ret = Parser::new(&allocator, source_text, source_type)
                .with_options(self.parse_options.clone())
                .parse();

            if ret.panicked || !ret.errors.is_empty() {
                Err(GuardError::parse_error(path, diagnostic_messages(&ret.errors)))
            } else {
                Ok(DeclarationCollector::collect(path, source_text, &ret.program))
            }
        };

        self.allocator_pool.return_allocator(allocator);

        if let Ok(module) = &result {
            debug!(
                path = %path.display(),
                nodes = module.nodes.len(),
                imports = module.imports.len(),
                "parsed module"
            );
        }
        result
    }
}

impl Default for ASTParser {
    fn default() -> Self {
        Self::new()
    }
}

fn diagnostic_messages(errors: &[OxcDiagnostic]) -> Vec<String> {
    errors.iter().map(|e| format!("{}", e)).collect()
}
