//! Python language analyzer using tree-sitter.

use phf::phf_set;
use tree_sitter::{Language as Grammar, Node};

use crate::analysis::traits::render_parameters;
use crate::analysis::{Language, LanguageAnalyzer, ParsedFile};

const FUNCTION_KINDS: &[&str] = &["function_definition"];

const DECISION_KINDS: &[&str] = &[
    "if_statement",
    "elif_clause",
    "for_statement",
    "while_statement",
    "try_statement",
    "except_clause",
    "with_statement",
    "conditional_expression",
    "boolean_operator",
    "list_comprehension",
    "dictionary_comprehension",
    "set_comprehension",
    "generator_expression",
    "case_clause",
];

static BUILTINS: phf::Set<&'static str> = phf_set! {
    "print", "len", "str", "int", "float", "list", "dict", "set", "tuple",
    "range", "open", "type", "isinstance", "hasattr", "getattr", "setattr",
    "super", "map", "filter", "zip", "enumerate", "sorted", "reversed",
    "min", "max", "sum", "abs", "round", "format", "input", "bool", "bytes",
};

/// Tree-sitter query for extracting imports.
const IMPORT_QUERY: &str = r#"
; import module
(import_statement
  name: (dotted_name) @import)

; import module as alias
(import_statement
  name: (aliased_import
    name: (dotted_name) @import))

; from module import name (module may be relative)
(import_from_statement
  module_name: (_) @import)
"#;

pub struct PythonAnalyzer {
    language: Grammar,
}

impl PythonAnalyzer {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    fn render_parameter(&self, param: Node, parsed: &ParsedFile) -> String {
        match param.kind() {
            "typed_parameter" => {
                // The name is the first named child (identifier or splat pattern).
                let name = param
                    .named_child(0)
                    .map(|n| parsed.node_text(n))
                    .unwrap_or("");
                match parsed.field_text(param, "type") {
                    Some(ty) => format!("{}: {}", name, ty),
                    None => parsed.node_text(param).to_string(),
                }
            }
            "typed_default_parameter" => {
                match (parsed.field_text(param, "name"), parsed.field_text(param, "type")) {
                    (Some(name), Some(ty)) => format!("{}: {}", name, ty),
                    _ => parsed.node_text(param).to_string(),
                }
            }
            "default_parameter" => match parsed.field_text(param, "name") {
                Some(name) => format!("{}=...", name),
                None => parsed.node_text(param).to_string(),
            },
            _ => parsed.node_text(param).to_string(),
        }
    }
}

impl Default for PythonAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for PythonAnalyzer {
    fn language(&self) -> Language {
        Language::Python
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
            Some(list) => render_parameters(list, |param| self.render_parameter(param, parsed)),
            None => Vec::new(),
        }
    }

    fn extract_return_type(&self, node: Node, parsed: &ParsedFile) -> Option<String> {
        parsed.field_text(node, "return_type").map(str::to_string)
    }

    fn call_target(&self, node: Node, parsed: &ParsedFile) -> Option<String> {
        if node.kind() != "call" {
            return None;
        }
        let function = node.child_by_field_name("function")?;
        match function.kind() {
            "identifier" => Some(parsed.node_text(function).to_string()),
            "attribute" => parsed.field_text(function, "attribute").map(str::to_string),
            _ => None,
        }
    }
}
