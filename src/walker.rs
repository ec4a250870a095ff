//! Repository walker.
//!
//! Lists analyzable source files under a root directory. Ignored directories
//! are pruned rather than filtered, so nothing beneath `node_modules` is ever
//! read no matter how deep it goes.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use globset::GlobSet;
use walkdir::{DirEntry, WalkDir};

use crate::analysis::is_supported_extension;
use crate::config::AnalyzerConfig;
use crate::error::Result;

/// Directory names that are never descended into.
pub const IGNORED_DIRECTORIES: &[&str] = &[
    // version control
    ".git", ".svn", ".hg",
    // dependency caches and environments
    "node_modules", "bower_components", ".npm", ".yarn",
    "venv", ".venv", "env", ".env", "virtualenv",
    "__pycache__", ".pytest_cache", ".mypy_cache", ".ruff_cache",
    "site-packages", ".eggs",
    // build output
    "dist", "build", "out", "output", "target", "bin", "obj",
    ".next", ".nuxt", ".output", ".cache", ".parcel-cache",
    // editor metadata
    ".vscode", ".idea", ".vs", ".eclipse",
    // vendored code
    "vendor", "packages", "libs", "lib", "third_party", "external",
    // coverage and scratch
    "coverage", ".coverage", "htmlcov", ".tox", "tmp", "temp", "logs",
    // generated and static assets
    "assets", "static", "public", "media", "uploads",
];

/// Identity of a directory on disk, used to break symlink cycles.
#[cfg(unix)]
type DirKey = (u64, u64);
#[cfg(not(unix))]
type DirKey = PathBuf;

/// Walks a repository and yields supported source files in sorted order.
pub struct RepoWalker {
    root: PathBuf,
    extra_ignored: HashSet<String>,
    excluded: Option<GlobSet>,
}

impl RepoWalker {
    /// Create a walker using only the built-in ignore rules.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extra_ignored: HashSet::new(),
            excluded: None,
        }
    }

    /// Create a walker that also honours the config's ignore lists.
    pub fn with_config<P: AsRef<Path>>(root: P, config: &AnalyzerConfig) -> Result<Self> {
        let excluded = if config.excluded_paths.is_empty() {
            None
        } else {
            Some(config.exclusion_set()?)
        };

        Ok(Self {
            root: root.as_ref().to_path_buf(),
            extra_ignored: config.extra_ignored_directories.iter().cloned().collect(),
            excluded,
        })
    }

    /// The directory being walked.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check whether a directory name is pruned.
    pub fn is_ignored_directory(&self, name: &str) -> bool {
        IGNORED_DIRECTORIES.contains(&name) || self.extra_ignored.contains(name)
    }

    /// Collect every supported file beneath the root.
    ///
    /// Entries that cannot be read are logged and skipped.
    pub fn walk(&self) -> Vec<PathBuf> {
        let mut visited: HashSet<DirKey> = HashSet::new();
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| self.keep_entry(e, &mut visited));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let supported = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(is_supported_extension);
            if supported {
                files.push(entry.into_path());
            }
        }

        tracing::debug!("Discovered {} files under {}", files.len(), self.root.display());
        files
    }

    /// Decide whether to yield an entry (and, for directories, descend).
    fn keep_entry(&self, entry: &DirEntry, visited: &mut HashSet<DirKey>) -> bool {
        if entry.depth() > 0 {
            let name = entry.file_name().to_string_lossy();
            if name.starts_with('.') {
                return false;
            }
            if entry.file_type().is_dir() && self.is_ignored_directory(&name) {
                return false;
            }
            if self.is_excluded(entry.path()) {
                return false;
            }
        }

        if entry.file_type().is_dir() {
            return match dir_key(entry) {
                Some(key) => {
                    let first_visit = visited.insert(key);
                    if !first_visit {
                        tracing::debug!("Skipping already visited directory {}", entry.path().display());
                    }
                    first_visit
                }
                None => false,
            };
        }
        true
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let Some(excluded) = &self.excluded else {
            return false;
        };
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        excluded.is_match(relative)
    }
}

#[cfg(unix)]
fn dir_key(entry: &DirEntry) -> Option<DirKey> {
    use std::os::unix::fs::MetadataExt;

    let metadata = entry.metadata().ok()?;
    Some((metadata.dev(), metadata.ino()))
}

#[cfg(not(unix))]
fn dir_key(entry: &DirEntry) -> Option<DirKey> {
    entry.path().canonicalize().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x = 1\n").unwrap();
    }

    fn relative(walker: &RepoWalker, files: Vec<PathBuf>) -> Vec<String> {
        files
            .iter()
            .map(|p| {
                p.strip_prefix(walker.root())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_prunes_ignored_directories_at_any_depth() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "main.js");
        touch(temp.path(), "node_modules/deep/nested/file.js");
        touch(temp.path(), "src/node_modules/inner.js");
        touch(temp.path(), "src/__pycache__/cached.py");

        let walker = RepoWalker::new(temp.path());
        assert_eq!(relative(&walker, walker.walk()), vec!["main.js"]);
    }

    #[test]
    fn test_skips_dot_entries_and_unsupported_files() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), ".hidden/a.py");
        touch(temp.path(), ".eslintrc.js");
        touch(temp.path(), "README.md");
        touch(temp.path(), "app.py");
        touch(temp.path(), "web/App.TSX");

        let walker = RepoWalker::new(temp.path());
        assert_eq!(relative(&walker, walker.walk()), vec!["app.py", "web/App.TSX"]);
    }

    #[test]
    fn test_sorted_output() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "zeta.py");
        touch(temp.path(), "alpha/b.rs");
        touch(temp.path(), "alpha/a.rs");
        touch(temp.path(), "mid.java");

        let walker = RepoWalker::new(temp.path());
        assert_eq!(
            relative(&walker, walker.walk()),
            vec!["alpha/a.rs", "alpha/b.rs", "mid.java", "zeta.py"]
        );
    }

    #[test]
    fn test_config_extends_ignore_rules() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/app.py");
        touch(temp.path(), "generated/models.py");
        touch(temp.path(), "tests/fixtures/sample.py");

        let config = AnalyzerConfig {
            extra_ignored_directories: vec!["generated".to_string()],
            excluded_paths: vec!["**/fixtures/**".to_string()],
            ..Default::default()
        };
        let walker = RepoWalker::with_config(temp.path(), &config).unwrap();

        assert!(walker.is_ignored_directory("generated"));
        assert!(walker.is_ignored_directory("vendor"));
        assert_eq!(relative(&walker, walker.walk()), vec!["src/app.py"]);
    }

    #[test]
    fn test_root_name_is_not_filtered() {
        // The root itself may be a dot-directory or share a name with the ignore-set.
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "build/lib.py");

        let walker = RepoWalker::new(temp.path().join("build"));
        assert_eq!(relative(&walker, walker.walk()), vec!["lib.py"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_terminates() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        touch(temp.path(), "pkg/mod.py");
        symlink(temp.path().join("pkg"), temp.path().join("pkg/loop")).unwrap();
        symlink(temp.path().join("pkg"), temp.path().join("alias")).unwrap();

        let walker = RepoWalker::new(temp.path());
        let files = relative(&walker, walker.walk());

        // "alias" sorts first and claims the directory; "pkg" is then a revisit.
        assert_eq!(files, vec!["alias/mod.py"]);
    }
}
