//! TypeScript language analyzer using tree-sitter.
//!
//! `.ts` and `.tsx` use different grammars from the same crate; both report
//! `Language::TypeScript`.

use tree_sitter::{Language as Grammar, Node};

use super::javascript::{
    call_target, function_name, module_specifier, parameter_list, BUILTINS, DECISION_KINDS,
    FUNCTION_KINDS, IMPORT_QUERY,
};
use crate::analysis::traits::render_parameters;
use crate::analysis::{Language, LanguageAnalyzer, ParsedFile};

/// TypeScript analyzer.
pub struct TypeScriptAnalyzer {
    language: Grammar,
}

impl TypeScriptAnalyzer {
    /// Create an analyzer for plain `.ts` sources.
    pub fn new() -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        }
    }

    /// Create an analyzer for `.tsx` sources.
    pub fn tsx() -> Self {
        Self {
            language: tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    fn render_parameter(&self, param: Node, parsed: &ParsedFile) -> String {
        let optional = match param.kind() {
            "required_parameter" => false,
            "optional_parameter" => true,
            _ => return parsed.node_text(param).to_string(),
        };
        let Some(pattern) = parsed.field_text(param, "pattern") else {
            return parsed.node_text(param).to_string();
        };
        let name = if optional {
            format!("{}?", pattern)
        } else {
            pattern.to_string()
        };

        if let Some(ty) = param
            .child_by_field_name("type")
            .and_then(|annotation| annotation.named_child(0))
        {
            return format!("{}: {}", name, parsed.node_text(ty));
        }
        if param.child_by_field_name("value").is_some() {
            return format!("{}=...", name);
        }
        name
    }
}

impl Default for TypeScriptAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for TypeScriptAnalyzer {
    fn language(&self) -> Language {
        Language::TypeScript
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

    fn extract_return_type(&self, node: Node, parsed: &ParsedFile) -> Option<String> {
        // return_type is a type_annotation (`: T`); report only `T`.
        node.child_by_field_name("return_type")
            .and_then(|annotation| annotation.named_child(0))
            .map(|ty| parsed.node_text(ty).to_string())
    }

    fn call_target(&self, node: Node, parsed: &ParsedFile) -> Option<String> {
        call_target(node, parsed)
    }

    fn import_path(&self, node: Node, parsed: &ParsedFile) -> Option<String> {
        module_specifier(node, parsed)
    }
}
