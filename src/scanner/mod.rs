//! Firebase config file discovery.
//!
//! Walks the project tree looking for the two well-known config file names,
//! skipping dependency caches, build output, and hidden directories.

mod environment;
mod parser;

pub use environment::classify_environment;
pub use parser::{parse_google_services, parse_service_plist, ParsedFields};

use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

/// Android config file name.
pub const ANDROID_CONFIG: &str = "google-services.json";

/// iOS config file name.
pub const IOS_CONFIG: &str = "GoogleService-Info.plist";

/// Default recursion bound for pathological trees (symlink cycles, deep
/// monorepos). Depth exhaustion truncates results silently.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Discovered config files, one list per kind, in scan order.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Paths to `google-services.json` files.
    pub android: Vec<PathBuf>,

    /// Paths to `GoogleService-Info.plist` files.
    pub ios: Vec<PathBuf>,
}

impl ScanOutcome {
    /// Total number of discovered config files.
    pub fn total(&self) -> usize {
        self.android.len() + self.ios.len()
    }

    /// Whether nothing was found.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Depth-bounded recursive scanner for Firebase config files.
pub struct ConfigScanner {
    root: PathBuf,
    max_depth: usize,
}

impl ConfigScanner {
    /// Create a scanner rooted at the given directory.
    pub fn new(root: &Path) -> Self {
        Self { root: root.to_path_buf(), max_depth: DEFAULT_MAX_DEPTH }
    }

    /// Override the recursion bound.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Walk the tree and collect config file paths.
    ///
    /// Unreadable directories are skipped with a warning. Result order is
    /// scan order, not sorted.
    pub fn scan(&self) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();

        let walker = WalkDir::new(&self.root)
            .max_depth(self.max_depth)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !should_skip(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable directory");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            match entry.file_name().to_str() {
                Some(ANDROID_CONFIG) => outcome.android.push(entry.into_path()),
                Some(IOS_CONFIG) => outcome.ios.push(entry.into_path()),
                _ => {}
            }
        }

        tracing::debug!(
            android = outcome.android.len(),
            ios = outcome.ios.len(),
            root = %self.root.display(),
            "Config scan finished"
        );

        outcome
    }
}

/// Check if a directory entry should be skipped during scanning.
fn should_skip(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }

    let name = entry.file_name().to_str().unwrap_or("");
    if name.starts_with('.') {
        return true;
    }

    matches!(
        name,
        "node_modules"
            | "build"
            | "dist"
            | "out"
            | "pods"
            | "Pods"
            | "DerivedData"
            | "__pycache__"
            | "coverage"
    )
}
