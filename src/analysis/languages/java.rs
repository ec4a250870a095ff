//! Java language analyzer using tree-sitter.

use phf::phf_set;
use tree_sitter::{Language as Grammar, Node};

use crate::analysis::traits::render_parameters;
use crate::analysis::{Language, LanguageAnalyzer, ParsedFile};

const FUNCTION_KINDS: &[&str] = &["method_declaration", "constructor_declaration"];

const DECISION_KINDS: &[&str] = &[
    "if_statement",
    "for_statement",
    "enhanced_for_statement",
    "while_statement",
    "do_statement",
    "try_statement",
    "catch_clause",
    "switch_expression",
    "ternary_expression",
    "binary_expression",
];

static BUILTINS: phf::Set<&'static str> = phf_set! {
    "System", "println", "print", "new", "toString", "equals", "hashCode",
};

/// Tree-sitter query for extracting imports.
const IMPORT_QUERY: &str = r#"
(import_declaration
  [(scoped_identifier) (identifier)] @import)
"#;

/// Java language analyzer.
pub struct JavaAnalyzer {
    language: Grammar,
}

impl JavaAnalyzer {
    /// Create a new Java analyzer.
    pub fn new() -> Self {
        Self {
            language: tree_sitter_java::LANGUAGE.into(),
        }
    }
}

impl Default for JavaAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for JavaAnalyzer {
    fn language(&self) -> Language {
        Language::Java
    }

    fn grammar(&self) -> &Grammar {
        &self.language
    }

    fn function_kinds(&self) -> &'static [&'static str] {
        FUNCTION_KINDS
    }

    fn decision_kinds(&self) -> &'static [&'static str] {
        DECISION_KINDS
    }

    fn builtins(&self) -> &'static phf::Set<&'static str> {
        &BUILTINS
    }

    fn import_query(&self) -> &'static str {
        IMPORT_QUERY
    }

    fn extract_name(&self, node: Node, parsed: &ParsedFile) -> Option<String> {
        parsed.field_text(node, "name").map(str::to_string)
    }

    fn extract_parameters(&self, node: Node, parsed: &ParsedFile) -> Vec<String> {
        match node.child_by_field_name("parameters") {
            Some(list) => render_parameters(list, |param| parsed.node_text(param).to_string()),
            None => Vec::new(),
        }
    }

    fn extract_return_type(&self, node: Node, parsed: &ParsedFile) -> Option<String> {
        // Constructors have no type field.
        parsed.field_text(node, "type").map(str::to_string)
    }

    fn call_target(&self, node: Node, parsed: &ParsedFile) -> Option<String> {
        if node.kind() != "method_invocation" {
            return None;
        }
        parsed.field_text(node, "name").map(str::to_string)
    }
}
