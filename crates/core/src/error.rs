use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModlistError {
    #[error("path not found: {0}")]
    RootNotFound(PathBuf),
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot format {path}: {reason}")]
    Format { path: PathBuf, reason: String },
}

impl ModlistError {
    pub(crate) fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ModlistError::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ModlistError>;
