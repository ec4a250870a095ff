//! Error types for the analysis engine.

use thiserror::Error;

/// Errors raised while configuring or running an analysis.
///
/// Per-file variants never escape the file analyzer: they are logged and
/// the file is skipped.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported file extension: {0}")]
    UnsupportedLanguage(String),

    #[error("grammar unavailable: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    #[error("invalid query: {0}")]
    Query(#[from] tree_sitter::QueryError),

    #[error("failed to parse {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("invalid glob pattern: {0}")]
    Glob(#[from] globset::Error),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
