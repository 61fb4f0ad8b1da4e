pub mod content_type;
pub mod image_upload;
pub mod preview;
pub mod preview_decoder;
