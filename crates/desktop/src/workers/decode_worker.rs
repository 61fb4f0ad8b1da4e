use std::thread;

use crossbeam_channel::Receiver;

use drone_detect_core::intake::domain::preview::Preview;
use drone_detect_core::intake::domain::preview_decoder::PreviewDecoder;
use drone_detect_core::intake::infrastructure::image_preview_decoder::ImagePreviewDecoder;
use drone_detect_core::session::session_state::{DecodeJob, DecodeToken};
use drone_detect_core::shared::detection_error::DetectionError;

/// Sent once from the worker thread when decoding finishes.
pub struct DecodeMessage {
    pub token: DecodeToken,
    pub result: Result<Preview, DetectionError>,
}

/// Decode the selected image in the background.
pub fn spawn(job: DecodeJob) -> Receiver<DecodeMessage> {
    spawn_with(job, Box::new(ImagePreviewDecoder::new()))
}

pub fn spawn_with(job: DecodeJob, decoder: Box<dyn PreviewDecoder>) -> Receiver<DecodeMessage> {
    let (tx, rx) = crossbeam_channel::bounded::<DecodeMessage>(1);

    thread::spawn(move || {
        let result = decoder.decode(&job.image);
        let _ = tx.send(DecodeMessage {
            token: job.token,
            result,
        });
    });

    rx
}
