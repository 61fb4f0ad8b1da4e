use crate::shared::bounding_box::BoundingBox;

/// Box position as percentages of the image container.
///
/// Values outside `[0, 100]` are legal: they describe boxes that extend past
/// the image edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxPlacement {
    pub left_pct: f64,
    pub top_pct: f64,
    pub width_pct: f64,
    pub height_pct: f64,
}

/// Pixel rectangle inside a concrete container, origin at its top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Linearly scales a model-space box into container percentages.
///
/// `model_input_size` is the side of the square frame the model reports in.
/// No clamping is applied.
pub fn map_box(bbox: &BoundingBox, model_input_size: f64) -> BoxPlacement {
    let pct = |v: f64| v / model_input_size * 100.0;
    BoxPlacement {
        left_pct: pct(bbox.x1),
        top_pct: pct(bbox.y1),
        width_pct: pct(bbox.width()),
        height_pct: pct(bbox.height()),
    }
}

impl BoxPlacement {
    /// Resolves the percentages against a container of the given size.
    pub fn to_rect(&self, container_width: f64, container_height: f64) -> PixelRect {
        PixelRect {
            x: self.left_pct / 100.0 * container_width,
            y: self.top_pct / 100.0 * container_height,
            width: self.width_pct / 100.0 * container_width,
            height: self.height_pct / 100.0 * container_height,
        }
    }
}
