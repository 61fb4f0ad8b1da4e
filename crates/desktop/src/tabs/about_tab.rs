use iced::widget::{column, text, Space};
use iced::Element;

use crate::app::{scaled, Message};

pub fn view(fs: f32, endpoint: &str) -> Element<'static, Message> {
    let version = env!("CARGO_PKG_VERSION");

    column![
        text("Drone Detection System").size(scaled(22.0, fs)),
        Space::new().height(4),
        text(format!("Version {version}")).size(scaled(13.0, fs)),
        Space::new().height(12),
        text(
            "Pick an image and the app sends it to a hosted object detection \
             model, then outlines every drone it finds with the model's label \
             and confidence."
        )
        .size(scaled(13.0, fs)),
        Space::new().height(12),
        text(format!("Current service: {endpoint}")).size(scaled(12.0, fs)),
    ]
    .spacing(0)
    .into()
}
