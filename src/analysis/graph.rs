//! Cross-file call graph construction.
//!
//! Calls are resolved by bare name through a flat index. When two functions
//! anywhere in the repository share a name, the one seen last (walk order,
//! then source order) owns the name and every call resolves to it.

use std::collections::HashMap;

use super::{ArchitectureMap, CallEdge, FileRecord};

/// Assemble the architecture map from per-file records in walk order.
pub fn build_architecture_map(files: Vec<FileRecord>) -> ArchitectureMap {
    let edges = resolve_edges(&files);
    let total_functions = files.iter().map(|f| f.total_functions).sum();

    tracing::debug!(
        "Built architecture map: {} files, {} functions, {} edges",
        files.len(),
        total_functions,
        edges.len()
    );

    ArchitectureMap {
        total_files: files.len(),
        total_functions,
        files,
        edges,
    }
}

/// Bare name -> (owning file, functionName). Later definitions overwrite.
fn name_index(files: &[FileRecord]) -> HashMap<&str, (&str, &str)> {
    let mut index = HashMap::new();
    for file in files {
        for func in &file.functions {
            index.insert(
                func.name.as_str(),
                (file.path.as_str(), func.unique_name.as_str()),
            );
        }
    }
    index
}

/// Emit one edge per (caller, callee name) that resolves into another file.
pub fn resolve_edges(files: &[FileRecord]) -> Vec<CallEdge> {
    let index = name_index(files);
    let mut edges = Vec::new();

    for file in files {
        for func in &file.functions {
            for callee in &func.calls {
                let Some(&(target_file, target)) = index.get(callee.as_str()) else {
                    continue;
                };
                if target_file == file.path {
                    continue;
                }
                edges.push(CallEdge {
                    source: func.unique_name.clone(),
                    target: target.to_string(),
                    source_file: file.path.clone(),
                    target_file: target_file.to_string(),
                });
            }
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{FunctionRecord, Language};

    fn func(path: &str, name: &str, calls: &[&str]) -> FunctionRecord {
        FunctionRecord {
            unique_name: format!("{}-{}", path, name),
            name: name.to_string(),
            parameters: Vec::new(),
            return_type: "unknown".to_string(),
            complexity: 1,
            start_line: 1,
            end_line: 1,
            lines: 1,
            source_text: format!("def {}(): pass", name),
            calls: calls.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn file(path: &str, functions: Vec<FunctionRecord>) -> FileRecord {
        FileRecord {
            path: path.to_string(),
            language: Language::Python,
            imports: Vec::new(),
            total_lines: functions.len(),
            total_functions: functions.len(),
            functions,
        }
    }

    #[test]
    fn test_cross_file_edge() {
        let files = vec![
            file("app.py", vec![func("app.py", "main", &["load", "print_report"])]),
            file("io.py", vec![func("io.py", "load", &[])]),
        ];
        let map = build_architecture_map(files);

        assert_eq!(map.total_files, 2);
        assert_eq!(map.total_functions, 2);
        assert_eq!(
            map.edges,
            vec![CallEdge {
                source: "app.py-main".to_string(),
                target: "io.py-load".to_string(),
                source_file: "app.py".to_string(),
                target_file: "io.py".to_string(),
            }]
        );
    }

    #[test]
    fn test_same_file_calls_produce_no_edges() {
        let files = vec![file(
            "calc.py",
            vec![func("calc.py", "add", &[]), func("calc.py", "compute", &["add"])],
        )];
        let map = build_architecture_map(files);

        assert!(map.edges.is_empty());
    }

    #[test]
    fn test_last_definition_wins() {
        // a.py has its own helper, but b.py's helper is indexed last.
        let files = vec![
            file(
                "a.py",
                vec![func("a.py", "main", &["helper"]), func("a.py", "helper", &[])],
            ),
            file("b.py", vec![func("b.py", "helper", &[])]),
        ];
        let map = build_architecture_map(files);

        assert_eq!(map.edges.len(), 1);
        assert_eq!(map.edges[0].source, "a.py-main");
        assert_eq!(map.edges[0].target, "b.py-helper");
        assert_eq!(map.edges[0].target_file, "b.py");
    }

    #[test]
    fn test_collision_resolving_to_own_file_is_dropped() {
        // Reverse order: a.py's helper is last, so main's call stays local.
        let files = vec![
            file("b.py", vec![func("b.py", "helper", &[])]),
            file(
                "a.py",
                vec![func("a.py", "main", &["helper"]), func("a.py", "helper", &[])],
            ),
        ];
        let map = build_architecture_map(files);

        assert!(map.edges.is_empty());
    }

    #[test]
    fn test_unresolved_calls_are_ignored() {
        let files = vec![file("x.py", vec![func("x.py", "run", &["external_api"])])];
        assert!(resolve_edges(&files).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let map = build_architecture_map(Vec::new());
        assert!(map.is_empty());
        assert_eq!(map, ArchitectureMap::default());
    }
}
