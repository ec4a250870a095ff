//! Function, call and import extraction on top of [`LanguageAnalyzer`].

use std::collections::BTreeSet;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Query, QueryCursor};

use super::complexity::cyclomatic_complexity;
use super::walk::descendants;
use super::{FunctionRecord, LanguageAnalyzer, ParsedFile};
use crate::error::Result;

/// Return type reported when a definition carries no annotation.
pub const UNKNOWN_RETURN_TYPE: &str = "unknown";

/// Extract every named function definition in pre-order.
///
/// Nested definitions are emitted as well, after their parent.
pub fn extract_functions(
    analyzer: &dyn LanguageAnalyzer,
    parsed: &ParsedFile,
    display_path: &str,
) -> Vec<FunctionRecord> {
    descendants(parsed.tree.root_node())
        .filter(|node| analyzer.is_function_node(*node))
        .filter_map(|node| function_record(analyzer, parsed, node, display_path))
        .collect()
}

/// Build the record for one definition node.
///
/// Returns None when the definition has no recoverable name.
pub fn function_record(
    analyzer: &dyn LanguageAnalyzer,
    parsed: &ParsedFile,
    node: Node,
    display_path: &str,
) -> Option<FunctionRecord> {
    let name = analyzer
        .extract_name(node, parsed)
        .filter(|name| !name.is_empty())?;

    let start_line = node.start_position().row + 1;
    let end_line = node.end_position().row + 1;
    let calls = extract_calls(analyzer, parsed, node, &name);

    Some(FunctionRecord {
        unique_name: format!("{}-{}", display_path, name),
        parameters: analyzer.extract_parameters(node, parsed),
        return_type: analyzer
            .extract_return_type(node, parsed)
            .unwrap_or_else(|| UNKNOWN_RETURN_TYPE.to_string()),
        complexity: cyclomatic_complexity(analyzer, node),
        start_line,
        end_line,
        lines: end_line - start_line + 1,
        source_text: parsed.node_text(node).to_string(),
        calls,
        name,
    })
}

/// Collect bare callee names inside a definition subtree.
///
/// Builtins, control keywords and the definition's own name are dropped.
pub fn extract_calls(
    analyzer: &dyn LanguageAnalyzer,
    parsed: &ParsedFile,
    node: Node,
    own_name: &str,
) -> BTreeSet<String> {
    descendants(node)
        .filter_map(|n| analyzer.call_target(n, parsed))
        .filter(|callee| callee != own_name && !analyzer.is_excluded_call(callee))
        .collect()
}

/// Extract import strings from the whole file in source order.
pub fn extract_imports(analyzer: &dyn LanguageAnalyzer, parsed: &ParsedFile) -> Result<Vec<String>> {
    let query = Query::new(analyzer.grammar(), analyzer.import_query())?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, parsed.tree.root_node(), parsed.source.as_bytes());

    let mut imports = Vec::new();

    while let Some(m) = matches.next() {
        for capture in m.captures {
            let capture_name = query.capture_names()[capture.index as usize];
            if capture_name != "import" {
                continue;
            }
            if let Some(path) = analyzer.import_path(capture.node, parsed) {
                imports.push(path);
            }
        }
    }

    Ok(imports)
}

/// Find the source of the first definition (pre-order) with the given name.
pub fn find_function_source(
    analyzer: &dyn LanguageAnalyzer,
    parsed: &ParsedFile,
    name: &str,
) -> Option<String> {
    descendants(parsed.tree.root_node())
        .filter(|node| analyzer.is_function_node(*node))
        .find(|node| analyzer.extract_name(*node, parsed).as_deref() == Some(name))
        .map(|node| parsed.node_text(node).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::languages::PythonAnalyzer;
    use std::path::Path;

    fn parse_python(source: &str) -> (PythonAnalyzer, ParsedFile) {
        let analyzer = PythonAnalyzer::new();
        let parsed = analyzer
            .parse(Path::new("calc.py"), source.to_string())
            .unwrap();
        (analyzer, parsed)
    }

    #[test]
    fn test_calc_example() {
        let source = "def add(a,b): return a+b\n\ndef compute(a,b):\n    if a>b: return add(a,b)\n    return a-b\n";
        let (analyzer, parsed) = parse_python(source);
        let functions = extract_functions(&analyzer, &parsed, "calc.py");

        assert_eq!(functions.len(), 2);
        let add = &functions[0];
        let compute = &functions[1];
        assert_eq!(add.name, "add");
        assert_eq!(add.unique_name, "calc.py-add");
        assert_eq!(add.complexity, 1);
        assert!(add.calls.is_empty());
        assert_eq!(compute.complexity, 2);
        assert_eq!(compute.calls.iter().collect::<Vec<_>>(), vec!["add"]);
        assert_eq!(compute.return_type, UNKNOWN_RETURN_TYPE);
    }

    #[test]
    fn test_self_recursion_is_not_a_call() {
        let (analyzer, parsed) = parse_python("def f():\n    f()\n");
        let functions = extract_functions(&analyzer, &parsed, "r.py");
        assert_eq!(functions.len(), 1);
        assert!(functions[0].calls.is_empty());
    }

    #[test]
    fn test_indirect_recursion_is_kept() {
        let source = "def ping(n):\n    pong(n)\n\ndef pong(n):\n    ping(n)\n";
        let (analyzer, parsed) = parse_python(source);
        let functions = extract_functions(&analyzer, &parsed, "r.py");
        assert!(functions[0].calls.contains("pong"));
        assert!(functions[1].calls.contains("ping"));
    }

    #[test]
    fn test_calls_are_deduplicated_and_builtins_dropped() {
        let source = "def run(items):\n    print(len(items))\n    save(items)\n    save(items)\n    db.save(items)\n";
        let (analyzer, parsed) = parse_python(source);
        let functions = extract_functions(&analyzer, &parsed, "r.py");
        assert_eq!(functions[0].calls.iter().collect::<Vec<_>>(), vec!["save"]);
    }

    #[test]
    fn test_source_round_trips_through_line_span() {
        let source = "import os\n\ndef first(x):\n    return x\n\n\ndef second():\n    for i in range(3):\n        first(i)\n";
        let (analyzer, parsed) = parse_python(source);
        let lines: Vec<&str> = source.split('\n').collect();

        for func in extract_functions(&analyzer, &parsed, "r.py") {
            let slice = lines[func.start_line - 1..func.end_line].join("\n");
            assert_eq!(slice, func.source_text, "span mismatch for {}", func.name);
            assert_eq!(func.lines, func.end_line - func.start_line + 1);
        }
    }

    #[test]
    fn test_find_function_source_returns_first_match() {
        let source = "def dup():\n    return 1\n\ndef dup():\n    return 2\n";
        let (analyzer, parsed) = parse_python(source);
        let code = find_function_source(&analyzer, &parsed, "dup").unwrap();
        assert_eq!(code, "def dup():\n    return 1");
        assert!(find_function_source(&analyzer, &parsed, "missing").is_none());
    }
}
