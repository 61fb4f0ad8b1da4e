use iced::widget::{checkbox, column, pick_list, row, slider, text, Space};
use iced::{Element, Theme};

use crate::app::{scaled, Message};
use crate::settings::{Appearance, Settings};
use crate::theme::tertiary_color;

const MIN_FONT_SCALE: f32 = 0.8;
const MAX_FONT_SCALE: f32 = 1.5;

pub fn view<'a>(settings: &Settings, theme: &Theme) -> Element<'a, Message> {
    let fs = settings.font_scale;
    let tertiary = tertiary_color(theme);

    let mode_hint = match settings.appearance {
        Appearance::System => "Follows your operating system and rechecks every few seconds.",
        Appearance::Dark => "Slate panels, easier on the eyes for long review sessions.",
        Appearance::Light => "Bright panels for well-lit rooms.",
    };

    column![
        text("Theme").size(scaled(16.0, fs)),
        Space::new().height(8),
        row![
            text("Mode").size(scaled(13.0, fs)),
            pick_list(Appearance::ALL, Some(settings.appearance), Message::AppearanceChanged)
                .text_size(scaled(13.0, fs)),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
        Space::new().height(4),
        text(mode_hint).size(scaled(12.0, fs)).color(tertiary),
        Space::new().height(12),
        checkbox(settings.high_contrast)
            .label("High contrast boxes and text")
            .on_toggle(Message::HighContrastChanged)
            .text_size(scaled(13.0, fs)),
        Space::new().height(20),
        text("Font size").size(scaled(16.0, fs)),
        Space::new().height(8),
        row![
            slider(
                MIN_FONT_SCALE..=MAX_FONT_SCALE,
                settings.font_scale,
                Message::FontScaleChanged
            )
            .step(0.05),
            text(format!("{:.0}%", settings.font_scale * 100.0)).size(scaled(13.0, fs)),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
    ]
    .spacing(0)
    .into()
}
