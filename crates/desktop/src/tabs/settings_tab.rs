use iced::widget::{button, column, row, slider, text, text_input, Space};
use iced::Element;

use crate::app::{scaled, Message};
use crate::settings::{Settings, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS};
use crate::theme::tertiary_color;

pub fn view<'a>(settings: &Settings, theme: &iced::Theme) -> Element<'a, Message> {
    let fs = settings.font_scale;
    let tertiary = tertiary_color(theme);

    column![
        text("Detection service").size(scaled(16.0, fs)),
        Space::new().height(8),
        text("Endpoint URL").size(scaled(13.0, fs)),
        Space::new().height(4),
        text_input("https://", &settings.endpoint)
            .on_input(Message::EndpointChanged)
            .size(scaled(13.0, fs))
            .padding(8),
        Space::new().height(4),
        text("Images are posted to this URL as multipart form data.")
            .size(scaled(12.0, fs))
            .color(tertiary),
        Space::new().height(20),
        text("Request timeout").size(scaled(16.0, fs)),
        Space::new().height(8),
        row![
            slider(
                MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS,
                settings.timeout_secs,
                Message::TimeoutChanged
            )
            .step(5u32),
            text(format!("{} s", settings.timeout_secs)).size(scaled(13.0, fs)),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center),
        Space::new().height(24),
        button(text("Restore defaults").size(scaled(13.0, fs)))
            .on_press(Message::RestoreDefaults)
            .padding([8, 16])
            .style(button::secondary),
    ]
    .spacing(0)
    .into()
}
