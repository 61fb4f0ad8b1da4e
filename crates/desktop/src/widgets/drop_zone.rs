use iced::widget::{button, column, container, mouse_area, svg, text, Space};
use iced::{Color, Element, Length, Theme};

use crate::app::{scaled, Message};
use crate::theme::{surface_color, tertiary_color};
use crate::widgets::dashed_container::{dashed_container, DashedBorderStyle};

/// Click-or-drop target for choosing an image.
///
/// `highlighted` is true while files are dragged over the window or the
/// pointer rests on the zone.
pub fn view(
    fs: f32,
    theme: &Theme,
    highlighted: bool,
    selected_name: Option<&str>,
) -> Element<'static, Message> {
    let palette = theme.extended_palette();
    let accent = palette.primary.base.color;
    let tertiary = tertiary_color(theme);

    let base_style = DashedBorderStyle {
        border_color: Color {
            a: 0.20,
            ..palette.background.base.text
        },
        border_width: 2.0,
        dash_length: 3.0,
        gap_length: 3.0,
        corner_radius: 16.0,
        background: surface_color(theme),
    };

    let highlight_style = DashedBorderStyle {
        border_color: Color { a: 0.60, ..accent },
        background: Color { a: 0.08, ..accent },
        ..base_style
    };

    let zone = dashed_container(
        base_style,
        [scaled(32.0, fs) as u16, 24],
        build_inner(fs, tertiary, accent),
    )
    .highlight(highlight_style, highlighted);

    let mut col = column![zone].spacing(10).width(Length::Fill);
    if let Some(name) = selected_name {
        col = col.push(
            text(format!("Selected: {name}"))
                .size(scaled(13.0, fs))
                .color(tertiary),
        );
    }

    mouse_area(col)
        .on_press(Message::SelectInput)
        .on_enter(Message::DropZoneHover(true))
        .on_exit(Message::DropZoneHover(false))
        .interaction(iced::mouse::Interaction::Pointer)
        .into()
}

fn build_inner(fs: f32, tertiary: Color, accent: Color) -> Element<'static, Message> {
    let upload_icon = svg(svg::Handle::from_memory(
        include_bytes!("../../assets/upload.svg").as_slice(),
    ))
    .width(28)
    .height(28)
    .style(move |_theme: &Theme, _status| svg::Style {
        color: Some(accent),
    });

    let icon_circle = container(upload_icon)
        .width(scaled(56.0, fs))
        .height(scaled(56.0, fs))
        .center_x(scaled(56.0, fs))
        .center_y(scaled(56.0, fs))
        .style(move |_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(Color { a: 0.12, ..accent })),
            border: iced::border::Border {
                radius: 100.0.into(),
                ..iced::border::Border::default()
            },
            ..container::Style::default()
        });

    column![
        icon_circle,
        Space::new().height(14),
        text("Click to upload or drag and drop")
            .size(scaled(15.0, fs))
            .font(iced::Font {
                weight: iced::font::Weight::Bold,
                ..iced::Font::DEFAULT
            }),
        Space::new().height(6),
        text("PNG, JPG or GIF")
            .size(scaled(12.0, fs))
            .color(tertiary),
        Space::new().height(14),
        button(text("Browse Files").size(scaled(13.0, fs)))
            .on_press(Message::SelectInput)
            .padding([6, 16])
            .style(button::secondary),
    ]
    .align_x(iced::Alignment::Center)
    .into()
}
