//! Command-line interface for archmap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use crate::analysis::{get_function_code, is_supported_extension, AnalysisContext};
use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Static architecture mapper for multi-language repositories.
///
/// Archmap walks a source tree, extracts every function with its signature,
/// complexity and outgoing calls, and links calls across files into a
/// repository-wide call graph.
#[derive(Parser)]
#[command(name = "archmap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the architecture map of a directory
    #[command(visible_alias = "map")]
    Analyze(AnalyzeArgs),
    /// Print the source of one function
    Function(FunctionArgs),
}

/// Output formats for the analyze command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Repository root to analyze
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Write the JSON map to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Worker threads (default: available CPUs)
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    /// Analyze at most this many files
    #[arg(long)]
    pub max_files: Option<usize>,

    /// Skip files larger than this many bytes
    #[arg(long)]
    pub max_file_size: Option<u64>,
}

/// Arguments for the function command.
#[derive(Parser)]
pub struct FunctionArgs {
    /// Source file containing the function
    pub file: PathBuf,

    /// Bare function name
    pub name: String,
}

/// Load the config file, explicit or discovered, and apply flag overrides.
fn load_config(args: &AnalyzeArgs) -> anyhow::Result<AnalyzerConfig> {
    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::parse_file(path)?,
        None => AnalyzerConfig::discover(Path::new("."))?.unwrap_or_default(),
    };

    if args.threads.is_some() {
        config.threads = args.threads;
    }
    if args.max_files.is_some() {
        config.max_files = args.max_files;
    }
    if args.max_file_size.is_some() {
        config.max_file_size = args.max_file_size;
    }

    Ok(config)
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    if !args.path.is_dir() {
        anyhow::bail!("not a directory: {}", args.path.display());
    }

    let config = load_config(args)?;
    let ctx = AnalysisContext::with_config(&args.path, config);
    let map = ctx.analyze_repository()?;

    if map.is_empty() {
        eprintln!("Error: no source files found in {}", args.path.display());
        return Ok(EXIT_FAILED);
    }

    match args.format {
        OutputFormat::Json => report::write_json(&map, args.output.as_deref())?,
        OutputFormat::Pretty => {
            if let Some(output) = &args.output {
                report::write_json(&map, Some(output))?;
            }
            report::write_pretty(&args.path.to_string_lossy(), &map);
        }
    }

    Ok(EXIT_SUCCESS)
}

/// Run the function command.
pub fn run_function(args: &FunctionArgs) -> anyhow::Result<i32> {
    let ext = args
        .file
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");
    if !is_supported_extension(ext) {
        return Err(AnalysisError::UnsupportedLanguage(args.file.display().to_string()).into());
    }
    if !args.file.is_file() {
        anyhow::bail!("no such file: {}", args.file.display());
    }

    match get_function_code(&args.file, &args.name) {
        Some(code) => {
            println!("{}", code);
            Ok(EXIT_SUCCESS)
        }
        None => {
            eprintln!(
                "Error: function {:?} not found in {}",
                args.name,
                args.file.display()
            );
            Ok(EXIT_FAILED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_args() {
        let cli = Cli::parse_from([
            "archmap", "analyze", "repo", "--format", "pretty", "-j", "4", "--max-files", "10",
        ]);
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.path, PathBuf::from("repo"));
        assert_eq!(args.format, OutputFormat::Pretty);
        assert_eq!(args.threads, Some(4));
        assert_eq!(args.max_files, Some(10));
        assert!(args.output.is_none());
    }

    #[test]
    fn test_default_format_is_json() {
        let cli = Cli::parse_from(["archmap", "map", "."]);
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_function_args() {
        let cli = Cli::parse_from(["archmap", "function", "src/app.py", "main"]);
        let Commands::Function(args) = cli.command else {
            panic!("expected function");
        };
        assert_eq!(args.file, PathBuf::from("src/app.py"));
        assert_eq!(args.name, "main");
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let config_path = temp.path().join("archmap.yaml");
        std::fs::write(&config_path, "threads: 8\nmax_files: 100\n").unwrap();

        let cli = Cli::parse_from([
            "archmap",
            "analyze",
            ".",
            "--config",
            config_path.to_str().unwrap(),
            "--threads",
            "2",
        ]);
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        let config = load_config(&args).unwrap();
        assert_eq!(config.threads, Some(2));
        assert_eq!(config.max_files, Some(100));
    }
}
