//! Archmap - static architecture maps for multi-language repositories.
//!
//! Archmap walks a source tree, parses every supported file with
//! tree-sitter, and records each function's signature, line span,
//! cyclomatic complexity and outgoing calls. Calls are then resolved by bare
//! name across files into a repository-wide call graph.
//!
//! # Architecture
//!
//! - `walker`: repository traversal with directory pruning
//! - `analysis`: language analyzers, extractors and the graph builder
//! - `config`: YAML analyzer configuration
//! - `report`: output formatting (JSON, pretty)
//!
//! # Adding a New Language
//!
//! See `src/analysis/languages/` for examples. Implement `LanguageAnalyzer`
//! trait and register in `languages/mod.rs`.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod walker;

use std::path::Path;

pub use analysis::{
    analyze_file, get_analyzer, get_function_code, AnalysisContext, ArchitectureMap, CallEdge,
    FileRecord, FunctionRecord, Language, LanguageAnalyzer,
};
pub use config::AnalyzerConfig;
pub use error::{AnalysisError, Result};
pub use walker::RepoWalker;

/// Analyze every supported file under `root` with default configuration.
///
/// Returns an empty map, not an error, when no file yields a record.
pub fn analyze_repository<P: AsRef<Path>>(root: P) -> Result<ArchitectureMap> {
    AnalysisContext::new(root).analyze_repository()
}
