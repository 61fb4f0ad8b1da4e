use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;

use crate::detection::domain::detection::Detection;
use crate::detection::domain::detection_client::DetectionClient;
use crate::detection::infrastructure::prediction_envelope::parse_response;
use crate::intake::domain::image_upload::ImageUpload;
use crate::shared::constants::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, UPLOAD_FIELD_NAME};
use crate::shared::detection_error::DetectionError;

/// Posts the image as `multipart/form-data` to the detection endpoint.
///
/// Uses reqwest's blocking client, which owns its own runtime. Construct and
/// drop it outside of any async executor.
pub struct HttpDetectionClient {
    client: Client,
    endpoint: String,
}

impl HttpDetectionClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, DetectionError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn with_defaults() -> Result<Self, DetectionError> {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_TIMEOUT)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl DetectionClient for HttpDetectionClient {
    fn detect(&self, image: &ImageUpload) -> Result<Vec<Detection>, DetectionError> {
        let bytes = image.read_bytes()?;
        let size = bytes.len();

        let part = Part::bytes(bytes)
            .file_name(image.file_name().to_string())
            .mime_str(image.content_type())?;
        let form = Form::new().part(UPLOAD_FIELD_NAME, part);

        log::info!(
            "Submitting {} ({size} bytes) to {}",
            image.file_name(),
            self.endpoint
        );
        let response = self.client.post(&self.endpoint).multipart(form).send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?;
        log::debug!("Received status {status} with {} byte body", body.len());

        let detections = parse_response(status, &body)?;
        log::info!("Received {} detections", detections.len());
        Ok(detections)
    }
}
