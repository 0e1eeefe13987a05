//! Typed failures callers branch on. Everything else travels as `anyhow::Error`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to {action}: {status_text}")]
    Status {
        action: &'static str,
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Candidate not found")]
    CandidateNotFound,
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        match self {
            ApiError::Status { status, .. } => *status == 404,
            ApiError::CandidateNotFound => true,
        }
    }

    /// Finds an `ApiError` anywhere in an error chain.
    pub fn find(err: &anyhow::Error) -> Option<&ApiError> {
        err.chain().find_map(|cause| cause.downcast_ref::<ApiError>())
    }
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Invalid file type: {file_name} is not a {expected} file")]
    InvalidFileType {
        file_name: String,
        expected: &'static str,
    },

    #[error("Could not read {}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is empty")]
    Empty(String),
}
