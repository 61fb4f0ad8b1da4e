use iced::widget::{canvas, container, image, stack, text};
use iced::{ContentFit, Element, Length, Theme};

use drone_detect_core::overlay::overlay_layout::OverlayBox;

use crate::app::{scaled, Message};
use crate::theme::{surface_color, tertiary_color};
use crate::widgets::detection_overlay::DetectionOverlay;

/// What the display panel needs to draw one frame.
pub struct Viewport<'a> {
    pub handle: Option<&'a image::Handle>,
    pub boxes: Vec<OverlayBox>,
    pub aspect_ratio: f64,
    pub loading: bool,
    pub pulse: f32,
}

/// Which layer set the display panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Body {
    Placeholder,
    /// Veil only. A request is running but no decoded preview exists yet.
    Pending,
    Image,
}

/// Loading always wins over the placeholder, with or without a preview.
pub fn body_for(has_image: bool, loading: bool) -> Body {
    match (has_image, loading) {
        (true, _) => Body::Image,
        (false, true) => Body::Pending,
        (false, false) => Body::Placeholder,
    }
}

pub fn view<'a>(fs: f32, theme: &Theme, viewport: Viewport<'a>) -> Element<'a, Message> {
    let surface = surface_color(theme);
    let tertiary = tertiary_color(theme);

    let overlay = || {
        canvas(DetectionOverlay::new(
            viewport.boxes.clone(),
            viewport.aspect_ratio,
            viewport.loading,
            viewport.pulse,
        ))
        .width(Length::Fill)
        .height(Length::Fill)
    };

    let kind = body_for(viewport.handle.is_some(), viewport.loading);
    let body: Element<'a, Message> = match (kind, viewport.handle) {
        (Body::Image, Some(handle)) => stack![
            image(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill),
            overlay(),
        ]
        .width(Length::Fill)
        .height(Length::Fill)
        .into(),
        (Body::Pending, _) => overlay().into(),
        _ => container(
            text("Image preview will appear here")
                .size(scaled(14.0, fs))
                .color(tertiary),
        )
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into(),
    };

    container(body)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(12)
        .style(move |_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(surface)),
            border: iced::border::Border {
                radius: 12.0.into(),
                ..iced::border::Border::default()
            },
            ..container::Style::default()
        })
        .into()
}
