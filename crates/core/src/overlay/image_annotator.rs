use image::{Rgba, RgbaImage};

use crate::overlay::overlay_layout::OverlayBox;

pub const DEFAULT_BOX_COLOR: Rgba<u8> = Rgba([34, 211, 238, 255]);
pub const DEFAULT_THICKNESS: u32 = 2;

/// Draws box outlines onto a copy of `source`.
///
/// The image itself is the container, so placements resolve against its
/// natural size. Outline pixels outside the image are skipped.
pub fn annotate(
    source: &RgbaImage,
    boxes: &[OverlayBox],
    color: Rgba<u8>,
    thickness: u32,
) -> RgbaImage {
    let mut out = source.clone();
    let (w, h) = out.dimensions();
    let margin = f64::from(thickness) + 1.0;
    for b in boxes {
        let rect = b.placement.to_rect(f64::from(w), f64::from(h));
        let Some((x0, x1)) = pixel_span(rect.x, rect.x + rect.width, w, margin) else {
            continue;
        };
        let Some((y0, y1)) = pixel_span(rect.y, rect.y + rect.height, h, margin) else {
            continue;
        };
        draw_outline(&mut out, x0, y0, x1, y1, color, thickness);
    }
    out
}

/// Orders two edges and clamps them to the image plus `margin` on each side.
///
/// An edge clamped into the margin still lands outside the image, so clipped
/// sides stay undrawn. `None` when the span misses the image entirely.
fn pixel_span(a: f64, b: f64, limit: u32, margin: f64) -> Option<(i64, i64)> {
    if a.is_nan() || b.is_nan() {
        return None;
    }
    let (lo, hi) = (a.min(b), a.max(b));
    let limit = f64::from(limit);
    if hi < 0.0 || lo > limit {
        return None;
    }
    let clamp = |v: f64| v.clamp(-margin, limit + margin).round() as i64;
    Some((clamp(lo), clamp(hi)))
}

fn draw_outline(
    img: &mut RgbaImage,
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    color: Rgba<u8>,
    thickness: u32,
) {
    for t in 0..thickness as i64 {
        let (ix0, iy0, ix1, iy1) = (x0 + t, y0 + t, x1 - 1 - t, y1 - 1 - t);
        if ix0 > ix1 || iy0 > iy1 {
            break;
        }
        for x in ix0..=ix1 {
            put(img, x, iy0, color);
            put(img, x, iy1, color);
        }
        for y in iy0..=iy1 {
            put(img, ix0, y, color);
            put(img, ix1, y, color);
        }
    }
}

fn put(img: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    let (w, h) = img.dimensions();
    if x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h {
        img.put_pixel(x as u32, y as u32, color);
    }
}
