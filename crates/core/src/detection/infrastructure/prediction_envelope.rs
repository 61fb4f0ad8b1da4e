use serde::Deserialize;
use serde_json::Value;

use crate::detection::domain::detection::Detection;
use crate::shared::bounding_box::BoundingBox;
use crate::shared::constants::SUCCESS_STATUS;
use crate::shared::detection_error::DetectionError;

const INVALID_STRUCTURE: &str = "Invalid data structure received from API.";

/// One entry of the `predictions` array returned by the detection service.
#[derive(Debug, Deserialize)]
struct RawPrediction {
    #[serde(rename = "box")]
    bbox: Vec<f64>,
    label: String,
    score: f64,
}

/// Maps an HTTP status and raw body into detections or a user-facing error.
///
/// Only `status`, `message` and the presence of `predictions` decide between
/// success and failure; the predictions are typed only on the success path.
pub fn parse_response(status: u16, body: &[u8]) -> Result<Vec<Detection>, DetectionError> {
    if !(200..300).contains(&status) {
        return Err(DetectionError::RequestFailed {
            status_code: status,
        });
    }

    let value: Value = serde_json::from_slice(body).map_err(|e| DetectionError::Transport {
        message: format!("Failed to parse API response: {e}"),
    })?;

    let message = value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);
    let succeeded = value.get("status").and_then(Value::as_str) == Some(SUCCESS_STATUS);
    let predictions = match value.get("predictions") {
        Some(p) if succeeded && !p.is_null() => p.clone(),
        _ => return Err(malformed(message)),
    };

    let predictions: Vec<RawPrediction> = serde_json::from_value(predictions).map_err(|e| {
        log::warn!("Unexpected prediction shape: {e}");
        malformed(None)
    })?;

    predictions
        .into_iter()
        .map(|raw| {
            let bbox = BoundingBox::from_slice(&raw.bbox).ok_or_else(|| malformed(None))?;
            Ok(Detection::new(bbox, raw.label, raw.score))
        })
        .collect()
}

fn malformed(message: Option<String>) -> DetectionError {
    DetectionError::MalformedResponse {
        message: message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| INVALID_STRUCTURE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_success_single_prediction() {
        let body = br#"{"status":"success","predictions":[{"box":[0,0,600,600],"label":"drone","score":0.987}]}"#;
        let detections = parse_response(200, body).unwrap();
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].label, "drone");
        assert_eq!(detections[0].caption(), "drone: 98.7%");
        assert_eq!(detections[0].bbox, BoundingBox::new(0.0, 0.0, 600.0, 600.0));
    }

    #[test]
    fn test_success_preserves_order_and_values() {
        let body = br#"{"status":"success","predictions":[
            {"box":[10.5,20,30,40],"label":"drone","score":0.9},
            {"box":[500,400,100,50],"label":"bird","score":1.7}
        ]}"#;
        let detections = parse_response(200, body).unwrap();
        assert_eq!(detections.len(), 2);
        assert_relative_eq!(detections[0].bbox.x1, 10.5);
        assert_eq!(detections[1].label, "bird");
        // Neither inverted corners nor out-of-range scores are corrected.
        assert_relative_eq!(detections[1].bbox.x2, 100.0);
        assert_relative_eq!(detections[1].score, 1.7);
    }

    #[test]
    fn test_success_empty_predictions() {
        let body = br#"{"status":"success","predictions":[]}"#;
        assert!(parse_response(200, body).unwrap().is_empty());
    }

    #[rstest]
    #[case(500)]
    #[case(404)]
    #[case(302)]
    fn test_non_2xx_status(#[case] status: u16) {
        let err = parse_response(status, b"{}").unwrap_err();
        assert_eq!(err, DetectionError::RequestFailed { status_code: status });
    }

    #[test]
    fn test_status_500_message() {
        let err = parse_response(500, b"Internal Server Error").unwrap_err();
        assert_eq!(err.to_string(), "API request failed with status 500");
    }

    #[test]
    fn test_error_status_uses_server_message() {
        let body = br#"{"status":"error","message":"bad image"}"#;
        let err = parse_response(200, body).unwrap_err();
        assert_eq!(err.to_string(), "bad image");
    }

    #[rstest]
    #[case::error_without_message(br#"{"status":"error"}"#.as_slice())]
    #[case::success_without_predictions(br#"{"status":"success"}"#.as_slice())]
    #[case::missing_status(br#"{"predictions":[]}"#.as_slice())]
    #[case::empty_message(br#"{"status":"error","message":""}"#.as_slice())]
    #[case::short_box(br#"{"status":"success","predictions":[{"box":[1,2,3],"label":"drone","score":0.5}]}"#.as_slice())]
    #[case::missing_label(br#"{"status":"success","predictions":[{"box":[1,2,3,4],"score":0.5}]}"#.as_slice())]
    #[case::not_an_object(br#"[1,2,3]"#.as_slice())]
    fn test_malformed_falls_back_to_generic_message(#[case] body: &[u8]) {
        let err = parse_response(200, body).unwrap_err();
        assert_eq!(
            err,
            DetectionError::MalformedResponse {
                message: "Invalid data structure received from API.".into()
            }
        );
    }

    #[rstest]
    #[case::predictions_not_a_list(br#"{"status":"error","message":"bad image","predictions":"none"}"#.as_slice())]
    #[case::prediction_with_null_score(br#"{"status":"error","message":"bad image","predictions":[{"box":[0,0,1,1],"label":"drone","score":null}]}"#.as_slice())]
    #[case::status_not_a_string(br#"{"status":404,"message":"bad image"}"#.as_slice())]
    #[case::null_predictions_on_success(br#"{"status":"success","message":"bad image","predictions":null}"#.as_slice())]
    fn test_failure_keeps_server_message_despite_odd_fields(#[case] body: &[u8]) {
        let err = parse_response(200, body).unwrap_err();
        assert_eq!(err.to_string(), "bad image");
    }

    #[test]
    fn test_non_string_message_falls_back_to_generic() {
        let err = parse_response(200, br#"{"status":"error","message":42}"#).unwrap_err();
        assert_eq!(err.to_string(), INVALID_STRUCTURE);
    }

    #[test]
    fn test_success_status_with_message_still_succeeds() {
        let body = br#"{"status":"success","predictions":[],"message":"ok"}"#;
        assert!(parse_response(200, body).is_ok());
    }

    #[test]
    fn test_invalid_json_is_transport_error() {
        let err = parse_response(200, b"<html>gateway</html>").unwrap_err();
        assert!(matches!(err, DetectionError::Transport { .. }));
        assert!(err.to_string().starts_with("Failed to parse API response"));
    }
}
