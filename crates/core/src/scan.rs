//! Walk-then-format composition used by the `modlist` binary.

use crate::error::Result;
use crate::formatter::module_identifier;
use crate::walker::SourceWalker;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_ROOT: &str = "./src/phaserHaxe/";
pub const DEFAULT_SUFFIX: &str = ".hx";

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub root: PathBuf,
    /// Stripped from every discovered path; the root's parent unless overridden.
    pub prefix: PathBuf,
    pub suffix: String,
    pub sorted: bool,
}

impl ScanOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let prefix = default_prefix(&root);
        Self {
            root,
            prefix,
            suffix: DEFAULT_SUFFIX.to_string(),
            sorted: false,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Accepts `hx` as well as `.hx`.
    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = normalize_suffix(suffix);
        self
    }

    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

fn default_prefix(root: &Path) -> PathBuf {
    root.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf())
}

fn normalize_suffix(suffix: &str) -> String {
    if suffix.is_empty() || suffix.starts_with('.') {
        suffix.to_string()
    } else {
        format!(".{suffix}")
    }
}

/// Collect the module identifier of every matching file under `options.root`.
///
/// All or nothing: the first walk or format error is returned and the
/// identifiers gathered so far are dropped.
pub fn scan(options: &ScanOptions) -> Result<Vec<String>> {
    let files = SourceWalker::new(&options.root, &options.suffix)
        .sorted(options.sorted)
        .walk()?;

    let identifiers = files
        .map(|path| module_identifier(&path?, &options.prefix, &options.suffix))
        .collect::<Result<Vec<_>>>()?;

    info!(
        root = %options.root.display(),
        count = identifiers.len(),
        "scan complete"
    );
    Ok(identifiers)
}

/// Write one identifier per line.
pub fn write_identifiers<W: Write>(identifiers: &[String], mut out: W) -> io::Result<()> {
    for id in identifiers {
        writeln!(out, "{id}")?;
    }
    out.flush()?;
    debug!(lines = identifiers.len(), "identifiers written");
    Ok(())
}
