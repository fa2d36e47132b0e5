//! Error types for deploy-fs

use std::path::PathBuf;

/// Result type for deploy-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving, clearing, or mirroring trees
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("source directory does not exist: {path}")]
    SourceMissing { path: PathBuf },

    #[error("failed to remove {path}: {source}")]
    Clear {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("could not locate the running executable: {source}")]
    ExeUnavailable {
        #[source]
        source: std::io::Error,
    },

    #[error("could not determine the user home directory")]
    HomeUnavailable,
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
