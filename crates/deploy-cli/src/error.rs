//! Error types for deploy-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from deploy-fs
    #[error(transparent)]
    Fs(#[from] deploy_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON report serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
