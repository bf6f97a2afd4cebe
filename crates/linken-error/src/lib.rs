use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkenError {
    #[error("You must specify at least one valid destination path.")]
    NoValidDestinations,

    #[error("You must specify at least one valid --src path.")]
    NoValidSources,

    #[error("Invalid package.json at {}: {reason}", path.display())]
    ManifestError { path: PathBuf, reason: String },

    #[error("Failed to {action} package '{name}' in {}: {source}", dest.display())]
    LinkingFailed {
        action: &'static str,
        name: String,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error at {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LinkenError {
    pub fn manifest(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ManifestError {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LinkenError>;
