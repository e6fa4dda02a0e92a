//! Failure kinds of the file transfer operations.

use thiserror::Error;

use crate::FileId;

const GENERIC_UPLOAD_FAILURE: &str = "Upload failed.";
const NETWORK_UPLOAD_FAILURE: &str = "Upload failed. Please try again.";

/// Listing the files failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Failed to fetch files. Status: {status}")]
    Status { status: u16 },

    #[error("Failed to fetch files: {0}")]
    Network(String),

    #[error("Invalid file listing: {0}")]
    Decode(String),
}

/// Uploading a file failed. A user cancel is not an error, see [`UploadOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// The service answered with a non-2xx status.
    #[error("Upload rejected with status {status}")]
    Rejected {
        status: u16,
        /// `message` field of the JSON error body, when it could be parsed.
        message: Option<String>,
    },

    #[error("Upload failed: {0}")]
    Network(String),

    /// The request could not be built.
    #[error("Upload could not start: {0}")]
    Setup(String),
}

impl UploadError {
    /// Builds a rejection from the raw response body.
    pub fn rejected(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .filter(|m| !m.is_empty());
        UploadError::Rejected { status, message }
    }

    /// Text shown in the failure toast.
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            UploadError::Rejected { message: None, .. } | UploadError::Setup(_) => {
                GENERIC_UPLOAD_FAILURE.to_string()
            }
            UploadError::Network(_) => NETWORK_UPLOAD_FAILURE.to_string(),
        }
    }
}

/// Deleting a file failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeleteError {
    #[error("Failed to delete file {id}. Status: {status}")]
    Status { id: FileId, status: u16 },

    #[error("Failed to delete file {id}: {reason}")]
    Network { id: FileId, reason: String },
}

/// How an upload transfer ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Completed,
    /// Aborted through its [`TransferHandle`](crate::transfer::TransferHandle).
    Cancelled,
    Failed(UploadError),
}
