//! AST-backed code analysis module.
//!
//! This module turns source files into architecture records using
//! tree-sitter. For every file it extracts:
//! - Function and method definitions with signatures and line spans
//! - Cyclomatic complexity per definition
//! - Bare callee names per definition
//! - Imports/dependencies
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ RepoWalker      │────▶│ Analyzers    │────▶│ FileRecord    │
//! └─────────────────┘     │ (one per     │     │ (functions,   │
//!                         │  grammar)    │     │  imports)     │
//!                         └──────────────┘     └───────────────┘
//!                                                      │
//!                                                      ▼
//!                                              ┌───────────────┐
//!                                              │ Graph builder │
//!                                              │ (CallEdges)   │
//!                                              └───────────────┘
//! ```
//!
//! # Adding a New Language
//!
//! 1. Create a new module in `src/analysis/languages/` (e.g., `kotlin.rs`)
//! 2. Implement `LanguageAnalyzer` trait
//! 3. Define the import query and the function/decision node kinds
//! 4. Register the extensions in `languages/mod.rs`
//!
//! See `languages/python.rs` for a reference implementation.

mod complexity;
mod context;
mod extract;
mod facts;
mod graph;
mod languages;
mod traits;
mod walk;

pub use complexity::cyclomatic_complexity;
pub use context::{analyze_file, decode_source, get_function_code, AnalysisContext};
pub use extract::{
    extract_calls, extract_functions, extract_imports, find_function_source, UNKNOWN_RETURN_TYPE,
};
pub use facts::{ArchitectureMap, CallEdge, FileRecord, FunctionRecord, Language};
pub use graph::{build_architecture_map, resolve_edges};
pub use languages::{
    get_analyzer, is_supported_extension, language_for_extension, registered_languages,
    CppAnalyzer, JavaAnalyzer, JavaScriptAnalyzer, PythonAnalyzer, RustAnalyzer,
    TypeScriptAnalyzer, SUPPORTED_EXTENSIONS,
};
pub use traits::{has_logical_operator, LanguageAnalyzer, ParsedFile};
pub use walk::{descendants, Descendants};
