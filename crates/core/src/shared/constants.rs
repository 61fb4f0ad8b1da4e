use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://ehsanulhaque92-drone-detection-api.hf.space/predict";

/// Multipart field the detection service reads the image from.
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Side length of the square frame the upstream detector reports boxes in.
///
/// The service letterboxes every input to 600x600 before inference, so box
/// coordinates are always expressed in that space regardless of the uploaded
/// image's resolution. This cannot be verified from the client side.
pub const MODEL_INPUT_SIZE: f64 = 600.0;

/// Viewport aspect ratio used before any image has been decoded.
pub const DEFAULT_ASPECT_RATIO: f64 = 16.0 / 9.0;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

pub const SUCCESS_STATUS: &str = "success";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp"];
