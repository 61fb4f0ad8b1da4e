use crate::detection::domain::detection::Detection;
use crate::intake::domain::image_upload::ImageUpload;
use crate::shared::detection_error::DetectionError;

/// Domain interface for submitting one image and getting its detections back.
///
/// Implementations are expected to block; callers run them off the UI thread.
pub trait DetectionClient: Send {
    fn detect(&self, image: &ImageUpload) -> Result<Vec<Detection>, DetectionError>;
}
