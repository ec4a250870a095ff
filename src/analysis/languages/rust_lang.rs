//! Rust language analyzer using tree-sitter.
//!
//! Extracts:
//! - Free functions and impl/trait methods with bodies (`function_item`)
//! - Use declarations (imports)
//! - Call targets for the call graph
//! - Control flow for complexity

use phf::phf_set;
use tree_sitter::{Language as Grammar, Node};

use crate::analysis::traits::render_parameters;
use crate::analysis::{Language, LanguageAnalyzer, ParsedFile};

const FUNCTION_KINDS: &[&str] = &["function_item"];

const DECISION_KINDS: &[&str] = &[
    "if_expression",
    "for_expression",
    "while_expression",
    "loop_expression",
    "match_arm",
    "binary_expression",
];

static BUILTINS: phf::Set<&'static str> = phf_set! {
    "println", "print", "vec", "Some", "None", "Ok", "Err", "Box", "Rc", "Arc",
};

/// Tree-sitter query for extracting imports (use statements).
///
/// Brace groups are captured whole (`std::{fs, io}`); aliases record only
/// the aliased path.
const IMPORT_QUERY: &str = r#"
(use_declaration
  argument: [
    (scoped_identifier)
    (identifier)
    (use_list)
    (scoped_use_list)
    (use_wildcard)
  ] @import)

(use_declaration
  argument: (use_as_clause
    path: (_) @import))
"#;

/// Rust language analyzer.
pub struct RustAnalyzer {
    language: Grammar,
}

impl RustAnalyzer {
    /// Create a new Rust analyzer.
    pub fn new() -> Self {
        Self {
            language: tree_sitter_rust::LANGUAGE.into(),
        }
    }

    fn render_parameter(&self, param: Node, parsed: &ParsedFile) -> String {
        if param.kind() != "parameter" {
            // self_parameter, variadic_parameter and friends
            return parsed.node_text(param).to_string();
        }
        match (
            parsed.field_text(param, "pattern"),
            parsed.field_text(param, "type"),
        ) {
            (Some(pattern), Some(ty)) => format!("{}: {}", pattern, ty),
            _ => parsed.node_text(param).to_string(),
        }
    }

    fn callee_name(&self, function: Node, parsed: &ParsedFile) -> Option<String> {
        match function.kind() {
            "identifier" => Some(parsed.node_text(function).to_string()),
            "field_expression" => parsed.field_text(function, "field").map(str::to_string),
            "scoped_identifier" => parsed.field_text(function, "name").map(str::to_string),
            // parse::<u32>() and friends
            "generic_function" => self.callee_name(function.child_by_field_name("function")?, parsed),
            _ => None,
        }
    }
}

impl Default for RustAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for RustAnalyzer {
    fn language(&self) -> Language {
        Language::Rust
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
        if node.kind() != "call_expression" {
            return None;
        }
        self.callee_name(node.child_by_field_name("function")?, parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::extract::{extract_functions, extract_imports};
    use std::path::Path;

    fn parse_rust(source: &str) -> (RustAnalyzer, ParsedFile) {
        let analyzer = RustAnalyzer::new();
        let parsed = analyzer
            .parse(Path::new("test.rs"), source.to_string())
            .unwrap();
        (analyzer, parsed)
    }

    #[test]
    fn test_extract_use_declarations() {
        let source = r#"
use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use anyhow::Result as AnyResult;
use crate::prelude::*;
use regex;
"#;
        let (analyzer, parsed) = parse_rust(source);
        let imports = extract_imports(&analyzer, &parsed).unwrap();

        assert_eq!(
            imports,
            vec![
                "std::collections::HashMap",
                "serde::{Deserialize, Serialize}",
                "anyhow::Result",
                "crate::prelude::*",
                "regex",
            ]
        );
    }

    #[test]
    fn test_functions_and_methods() {
        let source = r#"
pub fn parse_port(raw: &str, fallback: u16) -> Result<u16, Error> {
    let value = raw.trim().parse::<u16>().map_err(Error::from)?;
    Ok(validate(value).unwrap_or(fallback))
}

impl Server {
    pub fn start(&mut self) {
        let cfg = config::load();
        self.bind(cfg.port);
        println!("started");
    }
}
"#;
        let (analyzer, parsed) = parse_rust(source);
        let functions = extract_functions(&analyzer, &parsed, "server.rs");
        let names: Vec<_> = functions.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(names, vec!["parse_port", "start"]);
        assert_eq!(functions[0].parameters, vec!["raw: &str", "fallback: u16"]);
        assert_eq!(functions[0].return_type, "Result<u16, Error>");

        let calls: Vec<_> = functions[0].calls.iter().map(String::as_str).collect();
        assert_eq!(calls, vec!["map_err", "parse", "trim", "unwrap_or", "validate"]);

        assert_eq!(functions[1].parameters, vec!["&mut self"]);
        assert_eq!(functions[1].return_type, "unknown");
        let calls: Vec<_> = functions[1].calls.iter().map(String::as_str).collect();
        assert_eq!(calls, vec!["bind", "load"]);
    }

    #[test]
    fn test_complexity() {
        let source = r#"
fn classify(items: &[i32]) -> usize {
    let mut n = 0;
    for x in items {
        match x {
            0 => continue,
            1 | 2 => n += 1,
            _ => n += 2,
        }
    }
    while n > 10 && n % 2 == 0 {
        n /= 2;
    }
    loop {
        if n < 3 { break; }
        n -= 1;
    }
    n
}
"#;
        let (analyzer, parsed) = parse_rust(source);
        let functions = extract_functions(&analyzer, &parsed, "c.rs");

        // for + 3 arms + while + && + loop + if
        assert_eq!(functions[0].complexity, 9);
    }
}
