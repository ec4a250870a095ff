//! Cyclomatic complexity over a definition subtree.

use tree_sitter::Node;

use super::walk::descendants;
use super::LanguageAnalyzer;

/// Calculate cyclomatic complexity.
///
/// CC = 1 + decision nodes anywhere in the subtree rooted at `node`.
/// Nested function definitions are part of that subtree, so their decision
/// points are also counted toward the enclosing function.
pub fn cyclomatic_complexity(analyzer: &dyn LanguageAnalyzer, node: Node) -> u32 {
    let decision_points = descendants(node)
        .filter(|n| analyzer.is_decision_node(*n))
        .count();

    1 + decision_points as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::languages::{get_analyzer, PythonAnalyzer, RustAnalyzer};
    use crate::analysis::walk::descendants;
    use std::path::Path;

    fn first_function_complexity(analyzer: &dyn LanguageAnalyzer, source: &str) -> u32 {
        let parsed = analyzer
            .parse(Path::new("test"), source.to_string())
            .unwrap();
        let func = descendants(parsed.tree.root_node())
            .find(|n| analyzer.is_function_node(*n))
            .expect("function node");
        cyclomatic_complexity(analyzer, func)
    }

    #[test]
    fn test_base_complexity() {
        let cc = first_function_complexity(&PythonAnalyzer::new(), "def f():\n    return 1\n");
        assert_eq!(cc, 1);
    }

    #[test]
    fn test_two_ifs_and_a_while() {
        let source = r#"
def f(x):
    if x > 0:
        x -= 1
    if x < 0:
        x += 1
    while x:
        x -= 1
    return x
"#;
        assert_eq!(first_function_complexity(&PythonAnalyzer::new(), source), 4);
    }

    #[test]
    fn test_boolean_chain_counts_each_operator_node() {
        // `a and b or c` is two boolean_operator nodes.
        let source = "def f(a, b, c):\n    return a and b or c\n";
        assert_eq!(first_function_complexity(&PythonAnalyzer::new(), source), 3);
    }

    #[test]
    fn test_binary_expression_counts_only_logical() {
        let source = "fn f(a: i32, b: bool) -> bool { a + 1 > 2 && b }";
        // `&&` counts, `+` and `>` do not.
        assert_eq!(first_function_complexity(&RustAnalyzer::new(), source), 2);
    }

    #[test]
    fn test_nested_function_is_double_counted() {
        let source = r#"
def outer(x):
    def inner(y):
        if y:
            return 1
        return 0
    return inner(x)
"#;
        assert_eq!(first_function_complexity(&PythonAnalyzer::new(), source), 2);
    }

    #[test]
    fn test_javascript_ternary_and_logical() {
        let analyzer = get_analyzer("js").unwrap();
        let source = "function pick(a, b) { return a && b ? a : b; }";
        // ternary + && = 2 decision points
        assert_eq!(first_function_complexity(analyzer, source), 3);
    }
}
