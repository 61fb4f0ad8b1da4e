use std::path::PathBuf;

use thiserror::Error;

/// Every failure a user can hit while picking an image or running detection.
///
/// The `Display` text is what gets shown inline, so each variant renders as a
/// complete, human-readable sentence.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectionError {
    #[error("Please upload an image first.")]
    NoImageSelected,
    #[error("Please select a valid image file.")]
    InvalidFileType { content_type: String },
    #[error("Could not read {}: {message}", path.display())]
    Read { path: PathBuf, message: String },
    #[error("Could not decode image: {message}")]
    Decode { message: String },
    #[error("API request failed with status {status_code}")]
    RequestFailed { status_code: u16 },
    #[error("{message}")]
    MalformedResponse { message: String },
    #[error("{message}")]
    Transport { message: String },
}

impl From<reqwest::Error> for DetectionError {
    fn from(e: reqwest::Error) -> Self {
        DetectionError::Transport {
            message: e.to_string(),
        }
    }
}
