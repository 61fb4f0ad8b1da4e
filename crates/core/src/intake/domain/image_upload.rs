use std::fs;
use std::path::{Path, PathBuf};

use crate::intake::domain::content_type::{content_type_for, is_image_content_type};
use crate::shared::detection_error::DetectionError;

/// A file the user picked that passed the content type check.
///
/// Holds a handle to the file rather than its bytes; the bytes are read when
/// a preview is decoded or the image is uploaded.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageUpload {
    path: PathBuf,
    file_name: String,
    content_type: String,
}

impl ImageUpload {
    /// Accepts `path` only if its declared content type starts with `image/`.
    pub fn accept(path: &Path) -> Result<Self, DetectionError> {
        let content_type = content_type_for(path);
        if !is_image_content_type(&content_type) {
            return Err(DetectionError::InvalidFileType { content_type });
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            content_type,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn read_bytes(&self) -> Result<Vec<u8>, DetectionError> {
        fs::read(&self.path).map_err(|e| DetectionError::Read {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}
