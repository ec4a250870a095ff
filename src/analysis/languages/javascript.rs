//! JavaScript language analyzer using tree-sitter.
//!
//! The TypeScript analyzer reuses the name, call and import helpers here,
//! since the TypeScript grammar shares these node shapes.

use phf::phf_set;
use tree_sitter::{Language as Grammar, Node};

use crate::analysis::traits::render_parameters;
use crate::analysis::{Language, LanguageAnalyzer, ParsedFile};

pub(super) const FUNCTION_KINDS: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "function_expression",
    "arrow_function",
    "method_definition",
];

pub(super) const DECISION_KINDS: &[&str] = &[
    "if_statement",
    "for_statement",
    "for_in_statement",
    "while_statement",
    "do_statement",
    "with_statement",
    "switch_case",
    "try_statement",
    "catch_clause",
    "ternary_expression",
    "binary_expression",
];

pub(super) static BUILTINS: phf::Set<&'static str> = phf_set! {
    "console", "require", "import", "export", "setTimeout", "setInterval",
    "clearTimeout", "clearInterval", "fetch", "Promise", "Array", "Object",
    "String", "Number", "Boolean", "JSON", "Math", "Date", "RegExp", "Error",
};

/// ES module imports and CommonJS `require('<module>')` calls.
pub(super) const IMPORT_QUERY: &str = r#"
(import_statement
  source: (string) @import)

(call_expression
  function: (identifier) @require
  arguments: (arguments . (string) @import)
  (#eq? @require "require"))
"#;

/// Name of a function-like node.
///
/// Declarations and methods carry their own name; a function literal takes
/// the identifier of the variable it initializes. Anything else is anonymous.
pub(super) fn function_name(node: Node, parsed: &ParsedFile) -> Option<String> {
    if let Some(name) = node.child_by_field_name("name") {
        return match name.kind() {
            "identifier" | "property_identifier" | "private_property_identifier" => {
                Some(parsed.node_text(name).to_string())
            }
            _ => None,
        };
    }

    let parent = node.parent()?;
    if parent.kind() != "variable_declarator" {
        return None;
    }
    if parent.child_by_field_name("value") != Some(node) {
        return None;
    }
    let binding = parent.child_by_field_name("name")?;
    (binding.kind() == "identifier").then(|| parsed.node_text(binding).to_string())
}

/// Callee of a `call_expression`; member calls yield the property name.
pub(super) fn call_target(node: Node, parsed: &ParsedFile) -> Option<String> {
    if node.kind() != "call_expression" {
        return None;
    }
    let function = node.child_by_field_name("function")?;
    match function.kind() {
        "identifier" => Some(parsed.node_text(function).to_string()),
        "member_expression" => parsed.field_text(function, "property").map(str::to_string),
        _ => None,
    }
}

/// Module specifier with its surrounding quotes removed.
pub(super) fn module_specifier(node: Node, parsed: &ParsedFile) -> Option<String> {
    let text = parsed.node_text(node);
    let inner = text.get(1..text.len().saturating_sub(1))?;
    (!inner.is_empty()).then(|| inner.to_string())
}

/// Parameter list of a function-like node, including the bare parameter of
/// `x => ...` arrows.
pub(super) fn parameter_list(node: Node) -> Option<Node> {
    node.child_by_field_name("parameters")
        .or_else(|| node.child_by_field_name("parameter"))
}

pub struct JavaScriptAnalyzer {
    language: Grammar,
}

impl JavaScriptAnalyzer {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_javascript::LANGUAGE.into(),
        }
    }

    fn render_parameter(&self, param: Node, parsed: &ParsedFile) -> String {
        if param.kind() == "assignment_pattern" {
            if let Some(left) = parsed.field_text(param, "left") {
                return format!("{}=...", left);
            }
        }
        parsed.node_text(param).to_string()
    }
}

impl Default for JavaScriptAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for JavaScriptAnalyzer {
    fn language(&self) -> Language {
        Language::JavaScript
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
        function_name(node, parsed)
    }

    fn extract_parameters(&self, node: Node, parsed: &ParsedFile) -> Vec<String> {
        match parameter_list(node) {
            Some(list) if list.kind() == "formal_parameters" => {
                render_parameters(list, |param| self.render_parameter(param, parsed))
            }
            Some(single) => vec![parsed.node_text(single).to_string()],
            None => Vec::new(),
        }
    }

    fn extract_return_type(&self, _node: Node, _parsed: &ParsedFile) -> Option<String> {
        None
    }

    fn call_target(&self, node: Node, parsed: &ParsedFile) -> Option<String> {
        call_target(node, parsed)
    }

    fn import_path(&self, node: Node, parsed: &ParsedFile) -> Option<String> {
        module_specifier(node, parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::extract::{extract_functions, extract_imports};
    use std::path::Path;

    fn parse_js(source: &str) -> (JavaScriptAnalyzer, ParsedFile) {
        let analyzer = JavaScriptAnalyzer::new();
        let parsed = analyzer
            .parse(Path::new("test.js"), source.to_string())
            .unwrap();
        (analyzer, parsed)
    }

    #[test]
    fn test_extract_imports() {
        let source = r#"
import React from 'react';
import { join } from "path";
const fs = require('fs');
const local = require("./local");
loader('not-a-require');
"#;
        let (analyzer, parsed) = parse_js(source);
        let imports = extract_imports(&analyzer, &parsed).unwrap();

        assert_eq!(imports, vec!["react", "path", "fs", "./local"]);
    }

    #[test]
    fn test_function_shapes() {
        let source = r#"
function validateInput(data, strict = false, ...rest) {
    return !!data;
}

const processData = (input) => {
    return formatOutput(input);
};

const double = x => x * 2;

class Widget {
    render() {
        this.draw();
    }
}

[1, 2].map(function (n) { return n; });
"#;
        let (analyzer, parsed) = parse_js(source);
        let functions = extract_functions(&analyzer, &parsed, "utils.js");
        let names: Vec<_> = functions.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(names, vec!["validateInput", "processData", "double", "render"]);
        assert_eq!(functions[0].parameters, vec!["data", "strict=...", "...rest"]);
        assert_eq!(functions[0].return_type, "unknown");
        assert_eq!(functions[2].parameters, vec!["x"]);
        assert!(functions[1].calls.contains("formatOutput"));
        assert!(functions[3].calls.contains("draw"));
    }

    #[test]
    fn test_builtins_are_not_calls() {
        let source = r#"
function handler(req) {
    console.log(req);
    const body = JSON.stringify(req);
    setTimeout(() => respond(body), 10);
}
"#;
        let (analyzer, parsed) = parse_js(source);
        let functions = extract_functions(&analyzer, &parsed, "h.js");

        // console.log and JSON.stringify record their property names.
        let calls: Vec<_> = functions[0].calls.iter().map(String::as_str).collect();
        assert_eq!(calls, vec!["log", "respond", "stringify"]);
    }

    #[test]
    fn test_complexity() {
        let source = r#"
function classify(n) {
    for (const x of n) {
        if (x > 0 || x < -10) {
            continue;
        }
    }
    switch (n.length) {
        case 0: return "empty";
        case 1: return "one";
        default: return "many";
    }
}
"#;
        let (analyzer, parsed) = parse_js(source);
        let functions = extract_functions(&analyzer, &parsed, "c.js");

        // for-of + if + || + 2 cases
        assert_eq!(functions[0].complexity, 6);
    }
}
