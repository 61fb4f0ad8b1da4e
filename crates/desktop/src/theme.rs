use iced::color;
use iced::theme::Palette;
use iced::{Color, Theme};

use crate::settings::Appearance;

/// Resolve the iced Theme from appearance + high_contrast settings.
pub fn resolve_theme(appearance: Appearance, high_contrast: bool) -> Theme {
    let is_dark = match appearance {
        Appearance::Dark => true,
        Appearance::Light => false,
        Appearance::System => detect_system_dark_mode(),
    };

    let palette = match (is_dark, high_contrast) {
        (true, false) => slate_palette(),
        (false, false) => daylight_palette(),
        (true, true) => high_contrast_dark_palette(),
        (false, true) => high_contrast_light_palette(),
    };

    Theme::custom("Drone Detect", palette)
}

fn slate_palette() -> Palette {
    Palette {
        background: color!(0x0f, 0x17, 0x2a),
        text: color!(0xf1, 0xf5, 0xf9),
        primary: color!(0x22, 0xd3, 0xee),
        success: color!(0x2d, 0xd4, 0xbf),
        warning: color!(0xfb, 0xbf, 0x24),
        danger: color!(0xf8, 0x71, 0x71),
    }
}

fn daylight_palette() -> Palette {
    Palette {
        background: color!(0xf8, 0xfa, 0xfc),
        text: color!(0x0f, 0x17, 0x2a),
        primary: color!(0x08, 0x91, 0xb2),
        success: color!(0x0d, 0x94, 0x88),
        warning: color!(0xd9, 0x77, 0x06),
        danger: color!(0xdc, 0x26, 0x26),
    }
}

fn high_contrast_dark_palette() -> Palette {
    Palette {
        background: color!(0x00, 0x00, 0x00),
        text: color!(0xff, 0xff, 0xff),
        primary: color!(0x67, 0xe8, 0xf9),
        success: color!(0x5e, 0xea, 0xd4),
        warning: color!(0xfd, 0xe0, 0x47),
        danger: color!(0xff, 0x6b, 0x6b),
    }
}

fn high_contrast_light_palette() -> Palette {
    Palette {
        background: color!(0xff, 0xff, 0xff),
        text: color!(0x00, 0x00, 0x00),
        primary: color!(0x0e, 0x74, 0x90),
        success: color!(0x0f, 0x76, 0x6e),
        warning: color!(0xb4, 0x53, 0x09),
        danger: color!(0xb9, 0x1c, 0x1c),
    }
}

/// Panel background: the page background nudged toward the text color.
pub fn surface_color(theme: &Theme) -> Color {
    let p = theme.palette();
    mix(p.background, p.text, 0.06)
}

/// De-emphasized text for hints and captions.
pub fn tertiary_color(theme: &Theme) -> Color {
    let p = theme.palette();
    Color { a: 0.55, ..p.text }
}

pub fn error_color(theme: &Theme) -> Color {
    theme.palette().danger
}

fn mix(from: Color, to: Color, t: f32) -> Color {
    Color {
        r: from.r + (to.r - from.r) * t,
        g: from.g + (to.g - from.g) * t,
        b: from.b + (to.b - from.b) * t,
        a: 1.0,
    }
}

fn detect_system_dark_mode() -> bool {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
            .map(|o| {
                String::from_utf8_lossy(&o.stdout)
                    .trim()
                    .eq_ignore_ascii_case("dark")
            })
            .unwrap_or(true)
    }
    #[cfg(not(target_os = "macos"))]
    {
        true
    }
}
