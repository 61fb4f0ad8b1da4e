use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Point, Rectangle, Renderer, Size, Theme};

use drone_detect_core::overlay::coordinate_mapper::PixelRect;
use drone_detect_core::overlay::overlay_layout::{fit_to_aspect, OverlayBox};

const BOX_STROKE_WIDTH: f32 = 2.0;
const BADGE_FONT_SIZE: f32 = 12.0;
const BADGE_PADDING_H: f32 = 6.0;
const BADGE_PADDING_V: f32 = 3.0;
// Rough advance of one glyph relative to the font size.
const GLYPH_WIDTH_RATIO: f32 = 0.6;

/// Canvas program that draws detection boxes over the preview image.
///
/// The image itself is a sibling widget with `ContentFit::Contain`; this
/// program recomputes the same centered, aspect-pinned rectangle so the
/// percentage placements land on the drawn pixels.
pub struct DetectionOverlay {
    boxes: Vec<OverlayBox>,
    aspect_ratio: f64,
    loading: bool,
    pulse: f32,
}

impl DetectionOverlay {
    pub fn new(boxes: Vec<OverlayBox>, aspect_ratio: f64, loading: bool, pulse: f32) -> Self {
        Self {
            boxes,
            aspect_ratio,
            loading,
            pulse,
        }
    }
}

impl<Message> canvas::Program<Message> for DetectionOverlay {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let area = container_rect(bounds.size(), self.aspect_ratio);
        let accent = theme.extended_palette().primary.base.color;

        if self.loading {
            let alpha = 0.15 + 0.25 * self.pulse.clamp(0.0, 1.0);
            frame.fill_rectangle(
                area.position(),
                area.size(),
                Color {
                    a: alpha,
                    ..Color::BLACK
                },
            );
            frame.fill_text(canvas::Text {
                content: "Detecting...".to_string(),
                position: Point::new(
                    area.center_x() - text_width("Detecting...", 16.0) / 2.0,
                    area.center_y() - 8.0,
                ),
                color: Color::WHITE,
                size: 16.0.into(),
                ..canvas::Text::default()
            });
            return vec![frame.into_geometry()];
        }

        for overlay_box in &self.boxes {
            let rect = overlay_box
                .placement
                .to_rect(f64::from(area.width), f64::from(area.height));
            let rect = offset(rect, area.x, area.y);

            frame.stroke(
                &Path::rectangle(rect.position(), rect.size()),
                Stroke::default()
                    .with_color(accent)
                    .with_width(BOX_STROKE_WIDTH),
            );

            let badge = badge_rect(rect, &overlay_box.caption, BADGE_FONT_SIZE, area.y);
            frame.fill_rectangle(badge.position(), badge.size(), accent);
            frame.fill_text(canvas::Text {
                content: overlay_box.caption.clone(),
                position: Point::new(badge.x + BADGE_PADDING_H, badge.y + BADGE_PADDING_V),
                color: Color::BLACK,
                size: BADGE_FONT_SIZE.into(),
                ..canvas::Text::default()
            });
        }

        vec![frame.into_geometry()]
    }
}

/// Centered rectangle with the image's aspect ratio inside `bounds`.
pub fn container_rect(bounds: Size, aspect_ratio: f64) -> Rectangle {
    let (w, h) = fit_to_aspect(
        f64::from(bounds.width),
        f64::from(bounds.height),
        aspect_ratio,
    );
    let (w, h) = (w as f32, h as f32);
    Rectangle {
        x: (bounds.width - w) / 2.0,
        y: (bounds.height - h) / 2.0,
        width: w,
        height: h,
    }
}

/// Caption background sitting on top of the box's upper edge.
///
/// When that would poke above the container it drops inside the box instead.
pub fn badge_rect(bbox: Rectangle, caption: &str, font_size: f32, top_limit: f32) -> Rectangle {
    let width = text_width(caption, font_size) + BADGE_PADDING_H * 2.0;
    let height = font_size + BADGE_PADDING_V * 2.0;
    let above = bbox.y - height;
    let y = if above < top_limit { bbox.y } else { above };
    Rectangle {
        x: bbox.x,
        y,
        width,
        height,
    }
}

fn text_width(content: &str, font_size: f32) -> f32 {
    content.chars().count() as f32 * font_size * GLYPH_WIDTH_RATIO
}

fn offset(rect: PixelRect, dx: f32, dy: f32) -> Rectangle {
    Rectangle {
        x: rect.x as f32 + dx,
        y: rect.y as f32 + dy,
        width: rect.width as f32,
        height: rect.height as f32,
    }
}
