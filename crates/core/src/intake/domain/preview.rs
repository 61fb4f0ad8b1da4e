/// A decoded image ready for display: RGBA8 pixels in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Preview {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Preview {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 4,
            "pixel length must equal width * height * 4"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Natural width over natural height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}
