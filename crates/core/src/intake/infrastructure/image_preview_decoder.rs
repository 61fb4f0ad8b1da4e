use crate::intake::domain::image_upload::ImageUpload;
use crate::intake::domain::preview::Preview;
use crate::intake::domain::preview_decoder::PreviewDecoder;
use crate::shared::detection_error::DetectionError;

/// Decodes previews with the `image` crate, sniffing the format from the bytes.
pub struct ImagePreviewDecoder;

impl ImagePreviewDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImagePreviewDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewDecoder for ImagePreviewDecoder {
    fn decode(&self, image: &ImageUpload) -> Result<Preview, DetectionError> {
        let bytes = image.read_bytes()?;
        let decoded = image::load_from_memory(&bytes).map_err(|e| DetectionError::Decode {
            message: e.to_string(),
        })?;

        let rgba = decoded.into_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(DetectionError::Decode {
                message: "image has no pixels".into(),
            });
        }
        log::debug!("Decoded {} ({width}x{height})", image.file_name());
        Ok(Preview::new(width, height, rgba.into_raw()))
    }
}
