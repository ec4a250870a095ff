//! Output formatting for architecture maps.
//!
//! Supports two output formats:
//! - JSON: the stable wire shape consumed by downstream caches
//! - Pretty: colored terminal summary for human readability

use colored::*;
use std::fs;
use std::path::Path;

use crate::analysis::{ArchitectureMap, FileRecord};

// =============================================================================
// JSON Format
// =============================================================================

/// Serialize a map as pretty-printed JSON.
pub fn to_json(map: &ArchitectureMap) -> serde_json::Result<String> {
    serde_json::to_string_pretty(map)
}

/// Write a map as JSON to `output`, or to stdout when no path is given.
pub fn write_json(map: &ArchitectureMap, output: Option<&Path>) -> anyhow::Result<()> {
    let json = to_json(map)?;
    match output {
        Some(path) => {
            fs::write(path, json + "\n")?;
            tracing::info!("Wrote architecture map to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write a map in pretty (human-readable) format.
pub fn write_pretty(path: &str, map: &ArchitectureMap) {
    // Header
    println!();
    print!("  ");
    print!("{}", "archmap".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Analyzing: ".dimmed());
    println!("{}", path);
    println!();

    write_summary(map);
    println!();

    for file in &map.files {
        write_file(file);
        println!();
    }

    if !map.edges.is_empty() {
        write_edges(map);
        println!();
    }
}

fn write_summary(map: &ArchitectureMap) {
    println!(
        "  {} files  {} functions  {} cross-file calls",
        map.total_files.to_string().bold(),
        map.total_functions.to_string().bold(),
        map.edges.len().to_string().bold()
    );
}

fn write_file(file: &FileRecord) {
    print!("  {}", file.path.blue());
    println!(
        "  {}",
        format!("{} · {} lines", file.language, file.total_lines).dimmed()
    );

    if !file.imports.is_empty() {
        println!("    {} {}", "imports:".dimmed(), file.imports.join(", "));
    }

    for func in &file.functions {
        print!("    {:<32}", func.name);
        write_colored_complexity(func.complexity);
        println!(
            "  {}",
            format!("L{}-{}", func.start_line, func.end_line).dimmed()
        );
    }
}

fn write_colored_complexity(c: u32) {
    let label = format!("cc {:>3}", c);
    match c {
        c if c <= 5 => print!("{}", label.green()),
        c if c <= 10 => print!("{}", label.yellow()),
        c if c <= 20 => print!("{}", label.yellow().bold()),
        _ => print!("{}", label.red()),
    }
}

fn write_edges(map: &ArchitectureMap) {
    println!("  {} ({}):", "Cross-file calls".bold(), map.edges.len());
    for edge in &map.edges {
        println!("    {} {} {}", edge.source, "→".dimmed(), edge.target);
    }
}
