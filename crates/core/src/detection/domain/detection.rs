use serde::Serialize;

use crate::shared::bounding_box::BoundingBox;

/// One object the service found: where, what, and how sure it is.
///
/// `score` is expected in `[0, 1]` but is not checked.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Detection {
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
    pub label: String,
    pub score: f64,
}

impl Detection {
    pub fn new(bbox: BoundingBox, label: impl Into<String>, score: f64) -> Self {
        Self {
            bbox,
            label: label.into(),
            score,
        }
    }

    /// Badge text shown above the box, e.g. `drone: 98.7%`.
    pub fn caption(&self) -> String {
        format!("{}: {:.1}%", self.label, self.score * 100.0)
    }
}
