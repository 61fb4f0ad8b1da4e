pub mod image_preview_decoder;
