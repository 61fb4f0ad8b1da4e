pub mod http_detection_client;
pub mod prediction_envelope;
