//! Recursive discovery of source files.
//!
//! The walk is lazy: [`SourceWalker::walk`] validates the root and hands back
//! a [`SourceFiles`] iterator that reads directories as it is advanced.
//! Symbolic links are never followed, and since a link is neither a regular
//! file nor a directory it is skipped entirely.

use crate::error::{ModlistError, Result};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Configures a walk over a root directory for files ending in `suffix`.
#[derive(Debug, Clone)]
pub struct SourceWalker {
    root: PathBuf,
    suffix: String,
    sorted: bool,
}

impl SourceWalker {
    pub fn new(root: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            suffix: suffix.into(),
            sorted: false,
        }
    }

    /// Visit the entries of each directory in file-name order.
    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    /// Check the root and start the walk.
    ///
    /// Fails with [`ModlistError::RootNotFound`] or
    /// [`ModlistError::NotADirectory`] before any entry is read.
    pub fn walk(self) -> Result<SourceFiles> {
        let metadata = fs::metadata(&self.root).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => ModlistError::RootNotFound(self.root.clone()),
            _ => ModlistError::Io(err),
        })?;
        if !metadata.is_dir() {
            return Err(ModlistError::NotADirectory(self.root));
        }

        debug!(
            root = %self.root.display(),
            suffix = %self.suffix,
            sorted = self.sorted,
            "starting walk"
        );

        let mut walk = WalkDir::new(&self.root).min_depth(1).follow_links(false);
        if self.sorted {
            walk = walk.sort_by_file_name();
        }

        Ok(SourceFiles {
            inner: walk.into_iter(),
            suffix: self.suffix,
            failed: false,
        })
    }
}

/// Matching file paths in discovery order.
///
/// The first error ends the sequence: it is yielded once and every later call
/// to `next` returns `None`.
pub struct SourceFiles {
    inner: walkdir::IntoIter,
    suffix: String,
    failed: bool,
}

impl Iterator for SourceFiles {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err.into()));
                }
            };

            // Directories are descended by walkdir itself; links are skipped.
            if !entry.file_type().is_file() {
                trace!(path = %entry.path().display(), "skipping non-file entry");
                continue;
            }

            if entry.file_name().to_string_lossy().ends_with(&self.suffix) {
                trace!(path = %entry.path().display(), "matched");
                return Some(Ok(entry.into_path()));
            }
        }
    }
}
