//! Per-file analysis and repository-wide fan-out.
//!
//! The AnalysisContext provides:
//! - Silent, per-file analysis (`analyze_file`): any failure omits the file
//! - Parallel analysis of many files with walk order preserved
//! - Caller-imposed caps on file count and size
//! - Single-function source lookup

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::extract::{extract_functions, extract_imports, find_function_source};
use super::graph::build_architecture_map;
use super::{get_analyzer, ArchitectureMap, FileRecord, LanguageAnalyzer, ParsedFile};
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::walker::RepoWalker;

/// Analysis context for one repository root.
pub struct AnalysisContext {
    /// Base directory for relative path resolution.
    base_dir: PathBuf,
    /// Ignore rules, caps and worker count.
    config: AnalyzerConfig,
}

impl AnalysisContext {
    /// Create a new analysis context with default configuration.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self::with_config(base_dir, AnalyzerConfig::default())
    }

    /// Create a new analysis context with the given configuration.
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: AnalyzerConfig) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            config,
        }
    }

    /// Get the base directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the active configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Root-relative, `/`-separated path used in records.
    pub fn display_path(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.base_dir).unwrap_or(path);
        let display = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        if display.is_empty() {
            // The root itself is the file.
            path.file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default()
        } else {
            display
        }
    }

    /// Analyze a single file.
    ///
    /// Returns None when the file is unsupported, unreadable, empty or fails
    /// to parse. Nothing is raised to the caller.
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Option<FileRecord> {
        let path = path.as_ref();
        let abs_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        };

        match self.try_analyze_file(&abs_path) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", abs_path.display(), e);
                None
            }
        }
    }

    fn try_analyze_file(&self, path: &Path) -> Result<Option<FileRecord>> {
        let Some((analyzer, parsed)) = parse_source_file(path)? else {
            return Ok(None);
        };

        let display_path = self.display_path(path);
        let functions = extract_functions(analyzer, &parsed, &display_path);
        let imports = extract_imports(analyzer, &parsed).unwrap_or_else(|e| {
            tracing::warn!("Invalid imports query for {}: {}", analyzer.language(), e);
            Vec::new()
        });

        Ok(Some(FileRecord {
            path: display_path,
            language: analyzer.language(),
            imports,
            total_lines: parsed.source.split('\n').count(),
            total_functions: functions.len(),
            functions,
        }))
    }

    /// Analyze multiple files in parallel.
    ///
    /// Results keep the order of `paths`; skipped files are omitted. Fails
    /// only if a worker pool of the configured size cannot be built.
    pub fn analyze_files(&self, paths: &[PathBuf]) -> Result<Vec<FileRecord>> {
        let run = || -> Vec<Option<FileRecord>> {
            paths.par_iter().map(|p| self.analyze_file(p)).collect()
        };

        let results = match self.config.threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(run),
            None => run(),
        };

        Ok(results.into_iter().flatten().collect())
    }

    /// Walk the root and apply the configured caps.
    pub fn discover_files(&self) -> Result<Vec<PathBuf>> {
        let walker = RepoWalker::with_config(&self.base_dir, &self.config)?;
        let mut files = walker.walk();

        if let Some(max_size) = self.config.max_file_size {
            files.retain(|path| match fs::metadata(path) {
                Ok(metadata) if metadata.len() > max_size => {
                    tracing::debug!(
                        "Skipping {} ({} bytes exceeds limit of {})",
                        path.display(),
                        metadata.len(),
                        max_size
                    );
                    false
                }
                _ => true,
            });
        }

        if let Some(max_files) = self.config.max_files {
            if files.len() > max_files {
                tracing::info!("Limiting analysis to {} of {} files", max_files, files.len());
                files.truncate(max_files);
            }
        }

        Ok(files)
    }

    /// Analyze the whole repository and build its architecture map.
    ///
    /// An empty map is not an error here; callers decide how to report it.
    pub fn analyze_repository(&self) -> Result<ArchitectureMap> {
        let paths = self.discover_files()?;
        let files = self.analyze_files(&paths)?;

        tracing::info!(
            "Analyzed {} of {} files under {}",
            files.len(),
            paths.len(),
            self.base_dir.display()
        );

        Ok(build_architecture_map(files))
    }
}

/// Decode bytes as UTF-8, dropping invalid sequences rather than replacing them.
pub fn decode_source(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => e
            .as_bytes()
            .utf8_chunks()
            .map(|chunk| chunk.valid())
            .collect(),
    }
}

/// Read, decode and parse one file.
///
/// `Ok(None)` covers unsupported extensions and blank files.
fn parse_source_file(path: &Path) -> Result<Option<(&'static dyn LanguageAnalyzer, ParsedFile)>> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let Some(analyzer) = get_analyzer(ext) else {
        return Ok(None);
    };

    let source = decode_source(fs::read(path)?);
    if source.trim().is_empty() {
        return Ok(None);
    }

    let parsed = analyzer.parse(path, source)?;
    Ok(Some((analyzer, parsed)))
}

/// Return the source text of the first function named `name` in `path`.
///
/// The file is re-parsed on every call. Matching is on the bare name in
/// pre-order, so only the first of several same-named definitions is found.
pub fn get_function_code<P: AsRef<Path>>(path: P, name: &str) -> Option<String> {
    let path = path.as_ref();
    match parse_source_file(path) {
        Ok(Some((analyzer, parsed))) => find_function_source(analyzer, &parsed, name),
        Ok(None) => None,
        Err(e) => {
            tracing::debug!("Cannot read {}: {}", path.display(), e);
            None
        }
    }
}

/// Analyze one file relative to `root`, the free-standing form of
/// [`AnalysisContext::analyze_file`].
pub fn analyze_file<P: AsRef<Path>, R: AsRef<Path>>(path: P, root: R) -> Option<FileRecord> {
    AnalysisContext::new(root).analyze_file(path)
}
