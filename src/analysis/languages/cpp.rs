//! C++ language analyzer using tree-sitter.
//!
//! Header files (`.h`, `.hpp`) are parsed with the C++ grammar as well.

use phf::phf_set;
use tree_sitter::{Language as Grammar, Node};

use crate::analysis::traits::render_parameters;
use crate::analysis::{Language, LanguageAnalyzer, ParsedFile};

const FUNCTION_KINDS: &[&str] = &["function_definition"];

const DECISION_KINDS: &[&str] = &[
    "if_statement",
    "for_statement",
    "for_range_loop",
    "while_statement",
    "do_statement",
    "try_statement",
    "catch_clause",
    "case_statement",
    "conditional_expression",
    "binary_expression",
];

static BUILTINS: phf::Set<&'static str> = phf_set! {
    "std", "cout", "cin", "printf", "scanf", "sizeof", "malloc", "free",
};

/// Tree-sitter query for `#include` directives.
const IMPORT_QUERY: &str = r#"
(preproc_include
  path: [(string_literal) (system_lib_string)] @import)
"#;

/// Declarator wrappers that sit between a definition and its function declarator.
const DECLARATOR_WRAPPERS: &[&str] = &[
    "pointer_declarator",
    "reference_declarator",
    "parenthesized_declarator",
    "attributed_declarator",
];

/// C++ language analyzer.
pub struct CppAnalyzer {
    language: Grammar,
}

impl CppAnalyzer {
    /// Create a new C++ analyzer.
    pub fn new() -> Self {
        Self {
            language: tree_sitter_cpp::LANGUAGE.into(),
        }
    }

    /// Find the function_declarator of a definition, unwrapping `*`/`&` declarators.
    fn function_declarator<'tree>(&self, node: Node<'tree>) -> Option<Node<'tree>> {
        let mut declarator = node.child_by_field_name("declarator")?;
        while DECLARATOR_WRAPPERS.contains(&declarator.kind()) {
            declarator = declarator
                .child_by_field_name("declarator")
                .or_else(|| last_named_child(declarator))?;
        }
        (declarator.kind() == "function_declarator").then_some(declarator)
    }
}

impl Default for CppAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// The last named child of a node (reference declarators have no field).
fn last_named_child(node: Node) -> Option<Node> {
    node.named_child(node.named_child_count().checked_sub(1)?)
}

/// Reduce a (possibly qualified) name node to its rightmost identifier.
fn rightmost_name(mut node: Node, parsed: &ParsedFile) -> Option<String> {
    loop {
        match node.kind() {
            "identifier" | "field_identifier" | "destructor_name" | "operator_name" => {
                return Some(parsed.node_text(node).to_string());
            }
            "qualified_identifier" | "template_function" | "template_method" => {
                node = node.child_by_field_name("name")?;
            }
            _ => return None,
        }
    }
}

impl LanguageAnalyzer for CppAnalyzer {
    fn language(&self) -> Language {
        Language::Cpp
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
        let declarator = self.function_declarator(node)?;
        rightmost_name(declarator.child_by_field_name("declarator")?, parsed)
    }

    fn extract_parameters(&self, node: Node, parsed: &ParsedFile) -> Vec<String> {
        self.function_declarator(node)
            .and_then(|declarator| declarator.child_by_field_name("parameters"))
            .map(|list| render_parameters(list, |param| parsed.node_text(param).to_string()))
            .unwrap_or_default()
    }

    fn extract_return_type(&self, node: Node, parsed: &ParsedFile) -> Option<String> {
        // Constructors and destructors have no type field.
        parsed.field_text(node, "type").map(str::to_string)
    }

    fn call_target(&self, node: Node, parsed: &ParsedFile) -> Option<String> {
        if node.kind() != "call_expression" {
            return None;
        }
        let function = node.child_by_field_name("function")?;
        match function.kind() {
            "field_expression" => parsed.field_text(function, "field").map(str::to_string),
            _ => rightmost_name(function, parsed),
        }
    }

    fn import_path(&self, node: Node, parsed: &ParsedFile) -> Option<String> {
        let header = parsed
            .node_text(node)
            .trim_matches(|c| matches!(c, '"' | '<' | '>'));
        (!header.is_empty()).then(|| header.to_string())
    }
}
