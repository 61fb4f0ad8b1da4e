use crate::detection::domain::detection::Detection;
use crate::overlay::coordinate_mapper::{map_box, BoxPlacement};

/// Everything needed to draw one annotation: where it goes and what it says.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayBox {
    pub placement: BoxPlacement,
    pub caption: String,
}

/// Lays out every detection from scratch. Order follows the input.
pub fn compose(detections: &[Detection], model_input_size: f64) -> Vec<OverlayBox> {
    detections
        .iter()
        .map(|d| OverlayBox {
            placement: map_box(&d.bbox, model_input_size),
            caption: d.caption(),
        })
        .collect()
}

/// Largest `(width, height)` with the given aspect ratio that fits inside the
/// available space.
///
/// Sizing the image container this way is what lets percentage placements line
/// up with the drawn image without measuring it.
pub fn fit_to_aspect(available_width: f64, available_height: f64, aspect_ratio: f64) -> (f64, f64) {
    let usable = available_width > 0.0 && available_height > 0.0;
    if !usable || !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
        return (0.0, 0.0);
    }
    let width_limited = available_width / aspect_ratio;
    if width_limited <= available_height {
        (available_width, width_limited)
    } else {
        (available_height * aspect_ratio, available_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::bounding_box::BoundingBox;
    use crate::shared::constants::{DEFAULT_ASPECT_RATIO, MODEL_INPUT_SIZE};
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_compose_empty() {
        assert!(compose(&[], MODEL_INPUT_SIZE).is_empty());
    }

    #[test]
    fn test_compose_maps_and_captions_in_order() {
        let detections = vec![
            Detection::new(BoundingBox::new(0.0, 0.0, 600.0, 600.0), "drone", 0.987),
            Detection::new(BoundingBox::new(150.0, 300.0, 450.0, 450.0), "bird", 0.25),
        ];
        let boxes = compose(&detections, MODEL_INPUT_SIZE);
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].caption, "drone: 98.7%");
        assert_relative_eq!(boxes[0].placement.width_pct, 100.0);
        assert_eq!(boxes[1].caption, "bird: 25.0%");
        assert_relative_eq!(boxes[1].placement.left_pct, 25.0);
    }

    #[test]
    fn test_compose_is_idempotent() {
        let detections = vec![Detection::new(BoundingBox::new(1.0, 2.0, 3.0, 4.0), "drone", 0.5)];
        assert_eq!(
            compose(&detections, MODEL_INPUT_SIZE),
            compose(&detections, MODEL_INPUT_SIZE)
        );
    }

    #[rstest]
    #[case::wide_space(1000.0, 300.0, 2.0, (600.0, 300.0))]
    #[case::tall_space(400.0, 1000.0, 2.0, (400.0, 200.0))]
    #[case::exact(320.0, 180.0, DEFAULT_ASPECT_RATIO, (320.0, 180.0))]
    #[case::portrait(500.0, 500.0, 0.5, (250.0, 500.0))]
    fn test_fit_to_aspect(
        #[case] w: f64,
        #[case] h: f64,
        #[case] aspect: f64,
        #[case] expected: (f64, f64),
    ) {
        let (fw, fh) = fit_to_aspect(w, h, aspect);
        assert_relative_eq!(fw, expected.0, epsilon = 1e-9);
        assert_relative_eq!(fh, expected.1, epsilon = 1e-9);
    }

    #[rstest]
    #[case::zero_width(0.0, 100.0, 1.0)]
    #[case::zero_aspect(100.0, 100.0, 0.0)]
    #[case::nan_aspect(100.0, 100.0, f64::NAN)]
    fn test_fit_to_aspect_degenerate(#[case] w: f64, #[case] h: f64, #[case] aspect: f64) {
        assert_eq!(fit_to_aspect(w, h, aspect), (0.0, 0.0));
    }

    #[test]
    fn test_fitted_container_keeps_aspect() {
        let (w, h) = fit_to_aspect(913.0, 421.0, 4.0 / 3.0);
        assert_relative_eq!(w / h, 4.0 / 3.0, epsilon = 1e-9);
    }
}
