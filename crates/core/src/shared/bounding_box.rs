use serde::Serialize;

/// Axis-aligned box in model-input-space pixels.
///
/// No ordering is enforced between the corners: whatever the service reports
/// is carried through unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Builds a box from a positional `[x1, y1, x2, y2]` slice.
    ///
    /// Returns `None` when fewer than four values are present. Extra values
    /// are ignored.
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        match values {
            [x1, y1, x2, y2, ..] => Some(Self::new(*x1, *y1, *x2, *y2)),
            _ => None,
        }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_from_slice_is_positional() {
        let b = BoundingBox::from_slice(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(b, BoundingBox::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_from_slice_ignores_extra_values() {
        let b = BoundingBox::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_relative_eq!(b.y2, 4.0);
    }

    #[rstest]
    #[case::empty(&[])]
    #[case::three_values(&[1.0, 2.0, 3.0])]
    fn test_from_slice_too_short(#[case] values: &[f64]) {
        assert!(BoundingBox::from_slice(values).is_none());
    }

    #[test]
    fn test_inverted_box_has_negative_extent() {
        let b = BoundingBox::new(300.0, 300.0, 100.0, 200.0);
        assert_relative_eq!(b.width(), -200.0);
        assert_relative_eq!(b.height(), -100.0);
    }
}
