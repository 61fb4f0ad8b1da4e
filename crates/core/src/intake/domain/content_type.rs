use std::path::Path;

use image::ImageFormat;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Declared content type of a file, derived from its extension.
///
/// Mirrors what a file picker reports: nothing is sniffed from the bytes, so a
/// renamed file is taken at its word.
pub fn content_type_for(path: &Path) -> String {
    if let Ok(format) = ImageFormat::from_path(path) {
        return format.to_mime_type().to_string();
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "txt" | "log" | "md" => "text/plain",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "zip" => "application/zip",
        _ => FALLBACK_CONTENT_TYPE,
    }
    .to_string()
}

pub fn is_image_content_type(content_type: &str) -> bool {
    content_type.starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::png("drone.png", "image/png")]
    #[case::jpeg("drone.jpg", "image/jpeg")]
    #[case::upper_case("DRONE.JPEG", "image/jpeg")]
    #[case::gif("drone.gif", "image/gif")]
    #[case::webp("drone.webp", "image/webp")]
    #[case::text("notes.txt", "text/plain")]
    #[case::pdf("report.pdf", "application/pdf")]
    #[case::video("clip.mp4", "video/mp4")]
    #[case::unknown("archive.xyz", "application/octet-stream")]
    #[case::no_extension("README", "application/octet-stream")]
    fn test_content_type_for(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(content_type_for(Path::new(name)), expected);
    }

    #[rstest]
    #[case("image/png", true)]
    #[case("image/svg+xml", true)]
    #[case("text/plain", false)]
    #[case("application/octet-stream", false)]
    #[case("", false)]
    fn test_is_image_content_type(#[case] content_type: &str, #[case] expected: bool) {
        assert_eq!(is_image_content_type(content_type), expected);
    }
}
