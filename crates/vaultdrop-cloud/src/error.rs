//! Backend error types

use thiserror::Error;

/// Backend operation errors
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Invalid backend configuration: {0}")]
    Configuration(String),

    #[error("Cannot fetch manifest {location}: {reason}")]
    ManifestFetch { location: String, reason: String },

    #[error("Cannot parse manifest: {0}")]
    ManifestParse(String),

    #[error("Cannot read {path}: {reason}")]
    FileRead { path: String, reason: String },

    #[error("Distribution failed: {0}")]
    Distribution(String),

    #[error("Provisioning failed: {0}")]
    Provisioning(String),

    #[error("Deadline exceeded")]
    DeadlineExceeded,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CloudError {
    /// Whether a retry of the whole invocation could plausibly succeed.
    ///
    /// Configuration, parse, and file-read failures are permanent; remote
    /// call failures and deadline expiry are transient.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            CloudError::ManifestFetch { .. }
                | CloudError::Distribution(_)
                | CloudError::Provisioning(_)
                | CloudError::DeadlineExceeded
        )
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
