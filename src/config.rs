//! Analyzer configuration.
//!
//! Configuration is optional. When present it is read from YAML, either from
//! an explicit path or from `archmap.yaml` / `.archmap.yaml` in the working
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// File names probed by [`AnalyzerConfig::discover`], in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["archmap.yaml", ".archmap.yaml"];

/// Top-level analyzer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnalyzerConfig {
    /// Directory names pruned in addition to the built-in ignore-set.
    #[serde(default)]
    pub extra_ignored_directories: Vec<String>,
    /// Glob patterns matched against root-relative paths (e.g. "**/fixtures/**").
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    /// Analyze at most this many files, in walk order.
    #[serde(default)]
    pub max_files: Option<usize>,
    /// Skip files larger than this many bytes.
    #[serde(default)]
    pub max_file_size: Option<u64>,
    /// Worker pool size. Defaults to available parallelism.
    #[serde(default)]
    pub threads: Option<usize>,
}

impl AnalyzerConfig {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Parse a configuration from YAML text. An empty document is the default.
    pub fn parse_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Look for a config file in `dir`.
    pub fn find_in(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Load the config file from `dir` if one exists.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        Self::find_in(dir).map(Self::parse_file).transpose()
    }

    /// Compile `excluded_paths` into a single matcher.
    ///
    /// Fails on the first invalid pattern.
    pub fn exclusion_set(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.excluded_paths {
            builder.add(Glob::new(pattern)?);
        }
        Ok(builder.build()?)
    }

    /// Check if a root-relative path matches an exclusion pattern.
    pub fn is_path_excluded(&self, path: &Path) -> Result<bool> {
        if self.excluded_paths.is_empty() {
            return Ok(false);
        }
        Ok(self.exclusion_set()?.is_match(path))
    }
}
