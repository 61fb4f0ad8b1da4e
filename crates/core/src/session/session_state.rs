use std::sync::Arc;

use crate::detection::domain::detection::Detection;
use crate::intake::domain::image_upload::ImageUpload;
use crate::intake::domain::preview::Preview;
use crate::overlay::overlay_layout::{compose, OverlayBox};
use crate::shared::constants::{DEFAULT_ASPECT_RATIO, MODEL_INPUT_SIZE};
use crate::shared::detection_error::DetectionError;

/// Where the user is in the pick → detect → review loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Previewing,
    Detecting,
    Annotated,
    Failed,
}

/// Identifies one detection request. Only the most recently issued token is live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Identifies one preview decode. Only the most recently issued token is live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeToken(u64);

/// Work the caller must start after a file is accepted.
#[derive(Debug)]
pub struct DecodeJob {
    pub token: DecodeToken,
    pub image: Arc<ImageUpload>,
}

/// Work the caller must start after detection is requested.
#[derive(Debug)]
pub struct DetectionJob {
    pub token: RequestToken,
    pub image: Arc<ImageUpload>,
}

/// All UI state for one window, mutated only through the transition methods.
///
/// Async work is tagged with tokens. Completions carrying anything but the
/// latest token are dropped, so a slow response can never overwrite the
/// result of a newer request or annotate a different image.
#[derive(Debug)]
pub struct SessionState {
    phase: Phase,
    selected_image: Option<Arc<ImageUpload>>,
    preview: Option<Preview>,
    aspect_ratio: f64,
    detections: Vec<Detection>,
    loading: bool,
    error: Option<String>,
    drag_active: bool,
    next_token: u64,
    live_request: Option<RequestToken>,
    live_decode: Option<DecodeToken>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            selected_image: None,
            preview: None,
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            detections: Vec::new(),
            loading: false,
            error: None,
            drag_active: false,
            next_token: 0,
            live_request: None,
            live_decode: None,
        }
    }

    // -- transitions --------------------------------------------------------

    /// Handles a file from either the picker or a drop.
    ///
    /// On acceptance the old preview stays visible until the returned decode
    /// job completes. On rejection the selection and preview are cleared.
    /// Either way, any in-flight detection is abandoned.
    pub fn select_file(
        &mut self,
        candidate: Result<ImageUpload, DetectionError>,
    ) -> Option<DecodeJob> {
        self.live_request = None;
        self.loading = false;
        self.detections.clear();

        match candidate {
            Ok(image) => {
                let image = Arc::new(image);
                let token = DecodeToken(self.issue());
                log::info!("Selected {}", image.file_name());
                self.selected_image = Some(image.clone());
                self.live_decode = Some(token);
                self.error = None;
                self.phase = Phase::Previewing;
                Some(DecodeJob { token, image })
            }
            Err(e) => {
                log::warn!("Rejected file: {e:?}");
                self.selected_image = None;
                self.preview = None;
                self.live_decode = None;
                self.error = Some(e.to_string());
                self.phase = Phase::Idle;
                None
            }
        }
    }

    /// Publishes a decoded preview. Returns `false` if the result was stale.
    pub fn preview_decoded(
        &mut self,
        token: DecodeToken,
        result: Result<Preview, DetectionError>,
    ) -> bool {
        if self.live_decode != Some(token) {
            log::warn!("Discarding stale preview {token:?}");
            return false;
        }
        self.live_decode = None;

        match result {
            Ok(preview) => {
                self.aspect_ratio = preview.aspect_ratio();
                self.preview = Some(preview);
            }
            Err(e) => {
                log::warn!("Preview failed: {e}");
                self.preview = None;
                self.error = Some(e.to_string());
                // An in-flight request still owns the phase.
                if !self.loading {
                    self.phase = Phase::Failed;
                }
            }
        }
        true
    }

    /// Starts a detection run against the selected image.
    ///
    /// Fails without issuing a token when nothing is selected.
    pub fn begin_detection(&mut self) -> Result<DetectionJob, DetectionError> {
        let Some(image) = self.selected_image.clone() else {
            let e = DetectionError::NoImageSelected;
            self.error = Some(e.to_string());
            return Err(e);
        };

        let token = RequestToken(self.issue());
        self.live_request = Some(token);
        self.loading = true;
        self.detections.clear();
        self.error = None;
        self.phase = Phase::Detecting;
        Ok(DetectionJob { token, image })
    }

    /// Applies a detection result. Returns `false` if the result was stale.
    pub fn detection_finished(
        &mut self,
        token: RequestToken,
        result: Result<Vec<Detection>, DetectionError>,
    ) -> bool {
        if self.live_request != Some(token) {
            log::warn!("Discarding stale detection result {token:?}");
            return false;
        }
        self.live_request = None;
        self.loading = false;

        match result {
            Ok(detections) => {
                self.detections = detections;
                self.phase = Phase::Annotated;
            }
            Err(e) => {
                self.detections.clear();
                self.error = Some(e.to_string());
                self.phase = Phase::Failed;
            }
        }
        true
    }

    pub fn drag_entered(&mut self) {
        self.drag_active = true;
    }

    pub fn drag_left(&mut self) {
        self.drag_active = false;
    }

    fn issue(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    // -- queries ------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected_image(&self) -> Option<&ImageUpload> {
        self.selected_image.as_deref()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    /// Whether the detect action should be offered.
    pub fn can_detect(&self) -> bool {
        self.selected_image.is_some() && !self.loading
    }

    /// Boxes to draw over the preview. Hidden while a request is in flight.
    pub fn overlay(&self) -> Vec<OverlayBox> {
        if self.loading {
            return Vec::new();
        }
        compose(&self.detections, MODEL_INPUT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::bounding_box::BoundingBox;
    use approx::assert_relative_eq;
    use std::path::Path;

    fn image(name: &str) -> Result<ImageUpload, DetectionError> {
        ImageUpload::accept(Path::new(name))
    }

    fn preview(w: u32, h: u32) -> Preview {
        Preview::new(w, h, vec![0; (w * h * 4) as usize])
    }

    fn drone() -> Detection {
        Detection::new(BoundingBox::new(0.0, 0.0, 600.0, 600.0), "drone", 0.987)
    }

    /// A session with a decoded image, ready to detect.
    fn previewing() -> SessionState {
        let mut s = SessionState::new();
        let job = s.select_file(image("sky.png")).unwrap();
        assert!(s.preview_decoded(job.token, Ok(preview(400, 300))));
        s
    }

    // ── Initial state ────────────────────────────────────────────────

    #[test]
    fn test_initial_state() {
        let s = SessionState::new();
        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.selected_image().is_none());
        assert!(s.preview().is_none());
        assert!(s.detections().is_empty());
        assert!(!s.is_loading());
        assert!(s.error().is_none());
        assert!(!s.is_drag_active());
        assert!(!s.can_detect());
        assert_relative_eq!(s.aspect_ratio(), 16.0 / 9.0);
    }

    // ── Intake ───────────────────────────────────────────────────────

    #[test]
    fn test_select_valid_image_publishes_preview_after_decode() {
        let mut s = SessionState::new();
        let job = s.select_file(image("sky.png")).unwrap();
        assert_eq!(job.image.file_name(), "sky.png");
        assert_eq!(s.phase(), Phase::Previewing);
        assert!(s.preview().is_none());
        assert!(s.can_detect());

        assert!(s.preview_decoded(job.token, Ok(preview(400, 200))));
        assert!(s.preview().is_some());
        assert_relative_eq!(s.aspect_ratio(), 2.0);
    }

    #[test]
    fn test_select_valid_image_clears_error_and_detections() {
        let mut s = previewing();
        let job = s.begin_detection().unwrap();
        s.detection_finished(job.token, Ok(vec![drone()]));
        let _ = s.select_file(image("notes.txt"));
        assert!(s.error().is_some());

        let _ = s.select_file(image("sky.png"));
        assert!(s.error().is_none());
        assert!(s.detections().is_empty());
    }

    #[test]
    fn test_select_new_image_keeps_old_preview_until_decoded() {
        let mut s = previewing();
        let job = s.select_file(image("other.jpg")).unwrap();
        assert_eq!(s.preview().unwrap().width(), 400);
        s.preview_decoded(job.token, Ok(preview(10, 20)));
        assert_eq!(s.preview().unwrap().width(), 10);
        assert_relative_eq!(s.aspect_ratio(), 0.5);
    }

    #[test]
    fn test_select_non_image_clears_preview_and_sets_error() {
        let mut s = previewing();
        assert!(s.select_file(image("notes.txt")).is_none());
        assert!(s.preview().is_none());
        assert!(s.selected_image().is_none());
        assert_eq!(s.error(), Some("Please select a valid image file."));
        assert_eq!(s.phase(), Phase::Idle);
        assert!(!s.can_detect());
    }

    #[test]
    fn test_unreadable_candidate_is_rejected() {
        let mut s = SessionState::new();
        let err = DetectionError::Read {
            path: "/gone.png".into(),
            message: "No such file or directory".into(),
        };
        assert!(s.select_file(Err(err)).is_none());
        assert!(s.error().unwrap().starts_with("Could not read"));
    }

    #[test]
    fn test_decode_failure_surfaces_error() {
        let mut s = SessionState::new();
        let job = s.select_file(image("sky.png")).unwrap();
        let err = DetectionError::Decode {
            message: "bad header".into(),
        };
        assert!(s.preview_decoded(job.token, Err(err)));
        assert_eq!(s.error(), Some("Could not decode image: bad header"));
        assert_eq!(s.phase(), Phase::Failed);
        assert!(s.preview().is_none());
    }

    #[test]
    fn test_decode_failure_during_request_keeps_detecting() {
        let mut s = SessionState::new();
        let decode = s.select_file(image("sky.png")).unwrap();
        let request = s.begin_detection().unwrap();
        let err = DetectionError::Decode {
            message: "bad header".into(),
        };

        assert!(s.preview_decoded(decode.token, Err(err)));
        assert_eq!(s.phase(), Phase::Detecting);
        assert!(s.is_loading());

        assert!(s.detection_finished(request.token, Ok(vec![drone()])));
        assert_eq!(s.phase(), Phase::Annotated);
        assert!(!s.is_loading());
    }

    #[test]
    fn test_stale_decode_is_discarded() {
        let mut s = SessionState::new();
        let first = s.select_file(image("first.png")).unwrap();
        let second = s.select_file(image("second.png")).unwrap();

        assert!(!s.preview_decoded(first.token, Ok(preview(10, 10))));
        assert!(s.preview().is_none());
        assert!(s.preview_decoded(second.token, Ok(preview(30, 10))));
        assert_relative_eq!(s.aspect_ratio(), 3.0);
    }

    #[test]
    fn test_decode_after_rejection_is_discarded() {
        let mut s = SessionState::new();
        let job = s.select_file(image("first.png")).unwrap();
        let _ = s.select_file(image("notes.txt"));
        assert!(!s.preview_decoded(job.token, Ok(preview(10, 10))));
        assert!(s.preview().is_none());
    }

    // ── Detection ────────────────────────────────────────────────────

    #[test]
    fn test_detect_without_image() {
        let mut s = SessionState::new();
        let err = s.begin_detection().unwrap_err();
        assert_eq!(err, DetectionError::NoImageSelected);
        assert_eq!(s.error(), Some("Please upload an image first."));
        assert!(!s.is_loading());
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn test_begin_detection_clears_previous_results() {
        let mut s = previewing();
        let job = s.begin_detection().unwrap();
        s.detection_finished(job.token, Ok(vec![drone()]));

        let job = s.begin_detection().unwrap();
        assert_eq!(job.image.file_name(), "sky.png");
        assert!(s.is_loading());
        assert!(!s.can_detect());
        assert!(s.detections().is_empty());
        assert!(s.error().is_none());
        assert_eq!(s.phase(), Phase::Detecting);
    }

    #[test]
    fn test_successful_detection() {
        let mut s = previewing();
        let job = s.begin_detection().unwrap();
        assert!(s.detection_finished(job.token, Ok(vec![drone()])));

        assert_eq!(s.phase(), Phase::Annotated);
        assert!(!s.is_loading());
        assert_eq!(s.detections().len(), 1);
        let overlay = s.overlay();
        assert_eq!(overlay.len(), 1);
        assert_eq!(overlay[0].caption, "drone: 98.7%");
        assert_relative_eq!(overlay[0].placement.width_pct, 100.0);
    }

    #[test]
    fn test_failed_detection() {
        let mut s = previewing();
        let job = s.begin_detection().unwrap();
        let err = DetectionError::RequestFailed { status_code: 500 };
        assert!(s.detection_finished(job.token, Err(err)));

        assert_eq!(s.phase(), Phase::Failed);
        assert_eq!(s.error(), Some("API request failed with status 500"));
        assert!(s.detections().is_empty());
        assert!(!s.is_loading());
        assert!(s.can_detect());
    }

    #[test]
    fn test_server_message_becomes_error() {
        let mut s = previewing();
        let job = s.begin_detection().unwrap();
        let err = DetectionError::MalformedResponse {
            message: "bad image".into(),
        };
        s.detection_finished(job.token, Err(err));
        assert_eq!(s.error(), Some("bad image"));
    }

    #[test]
    fn test_stale_detection_is_discarded() {
        let mut s = previewing();
        let first = s.begin_detection().unwrap();
        let second = s.begin_detection().unwrap();

        assert!(!s.detection_finished(first.token, Ok(vec![drone()])));
        assert!(s.is_loading());
        assert!(s.detections().is_empty());

        assert!(s.detection_finished(second.token, Ok(vec![])));
        assert!(!s.is_loading());
    }

    #[test]
    fn test_reselecting_mid_request_abandons_response() {
        let mut s = previewing();
        let job = s.begin_detection().unwrap();
        let _ = s.select_file(image("other.png"));

        assert!(!s.is_loading());
        assert!(!s.detection_finished(job.token, Ok(vec![drone()])));
        assert!(s.detections().is_empty());
        assert_eq!(s.phase(), Phase::Previewing);
    }

    #[test]
    fn test_overlay_hidden_while_loading() {
        let mut s = previewing();
        let job = s.begin_detection().unwrap();
        s.detection_finished(job.token, Ok(vec![drone()]));
        assert_eq!(s.overlay().len(), 1);

        let _ = s.begin_detection().unwrap();
        assert!(s.overlay().is_empty());
    }

    #[test]
    fn test_tokens_are_unique() {
        let mut s = previewing();
        let a = s.begin_detection().unwrap().token;
        let b = s.begin_detection().unwrap().token;
        assert_ne!(a, b);
    }

    // ── Drag state ───────────────────────────────────────────────────

    #[test]
    fn test_drag_toggle() {
        let mut s = SessionState::new();
        s.drag_entered();
        s.drag_entered();
        assert!(s.is_drag_active());
        s.drag_left();
        assert!(!s.is_drag_active());
    }

    #[test]
    fn test_drag_does_not_affect_selection() {
        let mut s = previewing();
        s.drag_entered();
        s.drag_left();
        assert!(s.can_detect());
        assert!(s.error().is_none());
    }
}
