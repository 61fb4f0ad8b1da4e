use iced::widget::{column, container, row, text, Space};
use iced::{Element, Length, Theme};

use crate::app::{scaled, Message};
use crate::theme::{error_color, tertiary_color};
use crate::widgets::image_viewport::{self, Viewport};
use crate::widgets::{drop_zone, primary_button};

/// Inputs for the main tab, borrowed from the app for one render.
pub struct MainView<'a> {
    pub selected_name: Option<&'a str>,
    pub drop_highlighted: bool,
    pub can_detect: bool,
    pub loading: bool,
    pub error: Option<&'a str>,
    pub detect_hovered: bool,
    pub viewport: Viewport<'a>,
}

pub fn view<'a>(fs: f32, theme: &Theme, state: MainView<'a>) -> Element<'a, Message> {
    let tertiary = tertiary_color(theme);

    let header = column![
        text("Drone Detection System")
            .size(scaled(22.0, fs))
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..iced::Font::DEFAULT
            }),
        text("Upload an image to find drones in it")
            .size(scaled(13.0, fs))
            .color(tertiary),
    ]
    .spacing(4);

    let controls = control_panel(fs, theme, &state);
    let display = image_viewport::view(fs, theme, state.viewport);

    column![
        header,
        Space::new().height(16),
        row![
            container(controls).width(Length::FillPortion(2)),
            container(display)
                .width(Length::FillPortion(3))
                .height(Length::Fixed(scaled(420.0, fs))),
        ]
        .spacing(16),
    ]
    .into()
}

fn control_panel<'a>(fs: f32, theme: &Theme, state: &MainView<'a>) -> Element<'a, Message> {
    let label = if state.loading {
        "Detecting..."
    } else {
        "Detect Drones"
    };
    let on_press = state.can_detect.then_some(Message::RunDetection);

    let detect_btn = primary_button::primary_button_fill(
        move || {
            container(text(label).size(scaled(15.0, fs)))
                .center_x(Length::Fill)
                .into()
        },
        on_press,
        state.detect_hovered,
        Message::DetectHover,
        [12, 24],
    );

    let mut col = column![
        drop_zone::view(fs, theme, state.drop_highlighted, state.selected_name),
        Space::new().height(16),
        detect_btn,
    ]
    .width(Length::Fill);

    if let Some(error) = state.error {
        col = col.push(Space::new().height(12)).push(
            text(error.to_owned())
                .size(scaled(13.0, fs))
                .color(error_color(theme)),
        );
    }

    col.into()
}
