use std::thread;
use std::time::Duration;

use crossbeam_channel::Receiver;

use drone_detect_core::detection::domain::detection::Detection;
use drone_detect_core::detection::domain::detection_client::DetectionClient;
use drone_detect_core::detection::infrastructure::http_detection_client::HttpDetectionClient;
use drone_detect_core::session::session_state::{DetectionJob, RequestToken};
use drone_detect_core::shared::detection_error::DetectionError;

/// Sent once from the worker thread when the request settles.
pub struct DetectMessage {
    pub token: RequestToken,
    pub result: Result<Vec<Detection>, DetectionError>,
}

/// Parameters for a detection request.
pub struct DetectParams {
    pub job: DetectionJob,
    pub endpoint: String,
    pub timeout: Duration,
}

/// Spawn a background request against the HTTP endpoint.
///
/// The blocking client is built and dropped on the worker thread, away from
/// the UI's async executor.
pub fn spawn(params: DetectParams) -> Receiver<DetectMessage> {
    let DetectParams {
        job,
        endpoint,
        timeout,
    } = params;
    run(job, move || {
        HttpDetectionClient::new(endpoint, timeout)
            .map(|client| Box::new(client) as Box<dyn DetectionClient>)
    })
}

/// Same as [`spawn`] but with a caller-supplied client.
#[cfg(test)]
fn spawn_with(job: DetectionJob, client: Box<dyn DetectionClient>) -> Receiver<DetectMessage> {
    run(job, move || Ok(client))
}

fn run<F>(job: DetectionJob, make_client: F) -> Receiver<DetectMessage>
where
    F: FnOnce() -> Result<Box<dyn DetectionClient>, DetectionError> + Send + 'static,
{
    let (tx, rx) = crossbeam_channel::bounded::<DetectMessage>(1);

    thread::spawn(move || {
        let result = make_client().and_then(|client| client.detect(&job.image));
        if let Err(ref e) = result {
            log::warn!("Detection failed: {e}");
        }
        let _ = tx.send(DetectMessage {
            token: job.token,
            result,
        });
    });

    rx
}
