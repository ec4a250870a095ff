//! Core traits for language analysis.

use std::path::Path;

use tree_sitter::{Node, Parser};

use super::languages::CONTROL_KEYWORDS;
use super::Language;
use crate::error::{AnalysisError, Result};

/// Anonymous operator tokens that make a binary node a decision point.
const LOGICAL_OPERATORS: &[&str] = &["&&", "||", "and", "or"];

/// Holds a parsed tree-sitter tree and the text it was parsed from.
pub struct ParsedFile {
    /// The tree-sitter parse tree.
    pub tree: tree_sitter::Tree,
    /// The decoded source text.
    pub source: String,
    /// The file path (for error reporting).
    pub path: String,
}

impl ParsedFile {
    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// Get text for a named field of a node.
    pub fn field_text(&self, node: Node, field: &str) -> Option<&str> {
        node.child_by_field_name(field).map(|n| self.node_text(n))
    }
}

/// Language-specific analyzer trait.
///
/// One implementation exists per grammar. The analyzer is chosen once per
/// file from the extension table; every node classification after that goes
/// through this interface.
///
/// # Thread Safety
///
/// `tree_sitter::Parser` is not `Sync`, so `parse` builds a fresh parser
/// bound to the analyzer's grammar on every call. Analyzers themselves only
/// hold the immutable grammar handle and can be shared across workers.
pub trait LanguageAnalyzer: Send + Sync {
    /// The language reported in file records.
    fn language(&self) -> Language;

    /// The tree-sitter grammar used for parsing.
    fn grammar(&self) -> &tree_sitter::Language;

    /// Node kinds that denote function or method definitions.
    fn function_kinds(&self) -> &'static [&'static str];

    /// Node kinds that add one to cyclomatic complexity.
    ///
    /// `binary_expression` only counts when it carries a logical operator.
    fn decision_kinds(&self) -> &'static [&'static str];

    /// Identifiers never recorded as call targets.
    fn builtins(&self) -> &'static phf::Set<&'static str>;

    /// Query whose `@import` captures are import paths.
    fn import_query(&self) -> &'static str;

    /// Bound name of a function definition node, if it has one.
    fn extract_name(&self, node: Node, parsed: &ParsedFile) -> Option<String>;

    /// Rendered parameters of a function definition node.
    fn extract_parameters(&self, node: Node, parsed: &ParsedFile) -> Vec<String>;

    /// Explicit return type annotation of a function definition node.
    fn extract_return_type(&self, node: Node, parsed: &ParsedFile) -> Option<String>;

    /// Bare callee name if `node` is a call.
    ///
    /// Member calls yield the rightmost member (`a.b.c()` gives `c`).
    fn call_target(&self, node: Node, parsed: &ParsedFile) -> Option<String>;

    /// Normalize an `@import` capture into the recorded import string.
    fn import_path(&self, node: Node, parsed: &ParsedFile) -> Option<String> {
        let text = parsed.node_text(node).trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    /// Check whether a node is a function definition.
    fn is_function_node(&self, node: Node) -> bool {
        self.function_kinds().contains(&node.kind())
    }

    /// Check whether a node is a decision point.
    fn is_decision_node(&self, node: Node) -> bool {
        let kind = node.kind();
        if !self.decision_kinds().contains(&kind) {
            return false;
        }
        if kind == "binary_expression" {
            return has_logical_operator(node);
        }
        true
    }

    /// Check whether an identifier is excluded from call extraction.
    fn is_excluded_call(&self, name: &str) -> bool {
        self.builtins().contains(name) || CONTROL_KEYWORDS.contains(name)
    }

    /// Create a new parser bound to this analyzer's grammar.
    fn create_parser(&self) -> Result<Parser> {
        let mut parser = Parser::new();
        parser.set_language(self.grammar())?;
        Ok(parser)
    }

    /// Parse source text into a tree.
    ///
    /// Malformed input still yields a tree containing ERROR nodes.
    fn parse(&self, path: &Path, source: String) -> Result<ParsedFile> {
        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(source.as_bytes(), None)
            .ok_or_else(|| AnalysisError::Parse(path.display().to_string()))?;

        Ok(ParsedFile {
            tree,
            source,
            path: path.to_string_lossy().to_string(),
        })
    }
}

/// Check the direct children of a binary node for `&&`/`||` style tokens.
///
/// Counts once per node no matter how many operators appear.
pub fn has_logical_operator(node: Node) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && LOGICAL_OPERATORS.contains(&child.kind()));
    found
}

/// Render the named children of a parameter list, skipping comments.
pub fn render_parameters<F>(list: Node, mut render: F) -> Vec<String>
where
    F: FnMut(Node) -> String,
{
    let mut cursor = list.walk();
    let params = list
        .named_children(&mut cursor)
        .filter(|param| !param.kind().contains("comment"))
        .map(|param| render(param))
        .filter(|text| !text.is_empty())
        .collect();
    params
}
