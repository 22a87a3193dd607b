//! Source provider abstraction for filesystem-independent checking.
//!
//! The [`SourceProvider`] trait abstracts file reading so the front-end
//! itself never touches `std::fs`; tests use [`InMemoryProvider`].

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::check::{check_source_with, CheckOptions, Verdict};
use crate::error::CheckError;

/// Trait that abstracts reading program text.
pub trait SourceProvider {
    /// Read the source text for a given path.
    fn read_source(&self, path: &Path) -> Result<String, std::io::Error>;
}

/// Default filesystem-backed source provider.
pub struct FileSystemProvider;

impl SourceProvider for FileSystemProvider {
    fn read_source(&self, path: &Path) -> Result<String, std::io::Error> {
        std::fs::read_to_string(path)
    }
}

/// In-memory source provider for testing.
///
/// Maps paths to source text strings. Lookups normalize `.` and `..`
/// without requiring filesystem access.
pub struct InMemoryProvider {
    files: HashMap<PathBuf, String>,
}

impl InMemoryProvider {
    pub fn new(files: HashMap<PathBuf, String>) -> Self {
        let files = files
            .into_iter()
            .map(|(path, src)| (Self::normalize_path(&path), src))
            .collect();
        Self { files }
    }

    fn normalize_path(path: &Path) -> PathBuf {
        let mut components = Vec::new();
        for component in path.components() {
            match component {
                Component::CurDir => {} // skip "."
                Component::ParentDir => {
                    // pop unless we are at root
                    if matches!(components.last(), Some(Component::Normal(_))) {
                        components.pop();
                    }
                }
                other => components.push(other),
            }
        }
        components.iter().collect()
    }
}

impl SourceProvider for InMemoryProvider {
    fn read_source(&self, path: &Path) -> Result<String, std::io::Error> {
        let normalized = Self::normalize_path(path);
        self.files.get(&normalized).cloned().ok_or_else(|| {
            std::io::Error::new(
                ErrorKind::NotFound,
                format!("file not found in memory: {}", normalized.display()),
            )
        })
    }
}

/// Read `path` through `provider` and validate its contents.
///
/// A missing file yields a `NotFound` rejection rather than a program verdict.
pub fn check_path(
    provider: &dyn SourceProvider,
    path: &Path,
    options: &CheckOptions,
) -> Verdict {
    match provider.read_source(path) {
        Ok(src) => {
            tracing::debug!(path = %path.display(), bytes = src.len(), "read program");
            check_source_with(&src, options)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Verdict::Rejected(CheckError::NotFound {
            path: path.display().to_string(),
        }),
        Err(e) => Verdict::Rejected(CheckError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        }),
    }
}
