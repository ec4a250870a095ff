//! Records produced by the analysis engine.
//!
//! Field names on the wire are stable (`filePath`, `listOfFunctions`,
//! `functionName`, ...) because downstream consumers cache on them.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Languages the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Java,
    Cpp,
    Rust,
}

impl Language {
    /// Convert to a string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::Cpp => "cpp",
            Language::Rust => "rust",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A function or method definition found in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRecord {
    /// `<path>-<name>`. Two same-named functions in one file collide.
    #[serde(rename = "functionName")]
    pub unique_name: String,
    /// The bare declared name.
    pub name: String,
    /// Rendered parameters in declaration order.
    pub parameters: Vec<String>,
    /// Return type annotation, or `"unknown"`.
    pub return_type: String,
    /// Cyclomatic complexity, always >= 1.
    pub complexity: u32,
    /// First line of the definition (1-indexed).
    pub start_line: usize,
    /// Last line of the definition (1-indexed, inclusive).
    pub end_line: usize,
    /// `end_line - start_line + 1`.
    pub lines: usize,
    /// Verbatim source of the whole definition.
    #[serde(rename = "code")]
    pub source_text: String,
    /// Bare callee names, deduplicated and sorted.
    pub calls: BTreeSet<String>,
}

/// Everything extracted from one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// Path relative to the analyzed root, `/`-separated.
    #[serde(rename = "filePath")]
    pub path: String,
    pub language: Language,
    pub imports: Vec<String>,
    #[serde(rename = "listOfFunctions")]
    pub functions: Vec<FunctionRecord>,
    pub total_lines: usize,
    pub total_functions: usize,
}

impl FileRecord {
    /// Find the first function with the given bare name.
    pub fn find_function(&self, name: &str) -> Option<&FunctionRecord> {
        self.functions.iter().find(|f| f.name == name)
    }
}

/// A call from a function in one file to a function in another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallEdge {
    /// Caller `functionName`.
    pub source: String,
    /// Callee `functionName`.
    pub target: String,
    pub source_file: String,
    pub target_file: String,
}

/// Snapshot of a whole repository analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureMap {
    #[serde(rename = "listOfFiles")]
    pub files: Vec<FileRecord>,
    pub edges: Vec<CallEdge>,
    pub total_files: usize,
    pub total_functions: usize,
}

impl ArchitectureMap {
    /// True when no file produced a record.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over every function together with the file that owns it.
    pub fn functions(&self) -> impl Iterator<Item = (&FileRecord, &FunctionRecord)> {
        self.files
            .iter()
            .flat_map(|file| file.functions.iter().map(move |func| (file, func)))
    }
}
