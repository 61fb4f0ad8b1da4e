use crate::intake::domain::image_upload::ImageUpload;
use crate::intake::domain::preview::Preview;
use crate::shared::detection_error::DetectionError;

/// Turns an accepted upload into something displayable.
pub trait PreviewDecoder: Send {
    fn decode(&self, image: &ImageUpload) -> Result<Preview, DetectionError>;
}
