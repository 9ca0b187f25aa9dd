//! Style functions parameterized by ColorScheme.
//!
//! Each function returns a closure suitable for iced's `.style()` method,
//! capturing the needed color tokens from a `ColorScheme`.

use iced::widget::{button, container};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

use crate::style;

use super::ColorScheme;

/// Page background behind both carousels.
pub fn page(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface;
    let text = cs.on_surface;
    move |_theme| container::Style {
        text_color: Some(text),
        background: Some(Background::Color(bg)),
        ..Default::default()
    }
}

/// Slide frame. Hovered slides lift with a stronger shadow.
pub fn slide_card(cs: &ColorScheme, hovered: bool) -> impl Fn(&Theme) -> container::Style {
    let bg = if hovered {
        cs.surface_bright
    } else {
        cs.surface_container
    };
    let border_color = if hovered {
        cs.primary
    } else {
        cs.outline_variant
    };
    move |_theme| container::Style {
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: style::RADIUS_LG.into(),
        },
        shadow: Shadow {
            color: Color {
                a: if hovered { 0.35 } else { 0.12 },
                ..Color::BLACK
            },
            offset: Vector::new(0.0, if hovered { 8.0 } else { 2.0 }),
            blur_radius: if hovered { 24.0 } else { 6.0 },
        },
        ..Default::default()
    }
}

/// Cover art placeholder container.
pub fn cover_placeholder(cs: &ColorScheme, radius: f32) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_high;
    let border_color = cs.outline_variant;
    move |_theme| container::Style {
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: radius.into(),
        },
        ..Default::default()
    }
}

/// Translucent band over the media area holding the hover summary.
pub fn media_scrim(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.scrim;
    let text = cs.on_scrim;
    move |_theme| container::Style {
        text_color: Some(text),
        background: Some(Background::Color(bg)),
        border: Border {
            radius: style::RADIUS_MD.into(),
            ..Border::default()
        },
        ..Default::default()
    }
}

/// "Trailer" pill in the corner of a playing slide.
pub fn trailer_badge(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.danger;
    let text = cs.on_scrim;
    move |_theme| container::Style {
        text_color: Some(text),
        background: Some(Background::Color(bg)),
        border: Border {
            radius: style::RADIUS_FULL.into(),
            ..Border::default()
        },
        ..Default::default()
    }
}

/// Prev/next arrows beside a carousel. Disabled arrows fade out.
pub fn nav_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let container_bg = cs.primary_container;
    let on_container = cs.on_primary_container;
    let primary_hover = cs.primary_hover;
    let on_primary = cs.on_primary;
    let outline_variant = cs.outline_variant;
    move |_theme, status| {
        let (bg, text_color) = match status {
            button::Status::Hovered | button::Status::Pressed => (primary_hover, on_primary),
            button::Status::Disabled => (
                Color {
                    a: 0.3,
                    ..container_bg
                },
                Color {
                    a: 0.4,
                    ..on_container
                },
            ),
            button::Status::Active => (container_bg, on_container),
        };
        button::Style {
            background: Some(Background::Color(bg)),
            text_color,
            border: Border {
                color: outline_variant,
                width: 1.0,
                radius: style::RADIUS_FULL.into(),
            },
            ..Default::default()
        }
    }
}

/// Thin primary-colored rule under a section heading.
pub fn heading_accent(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.primary;
    move |_theme| container::Style {
        background: Some(Background::Color(bg)),
        border: Border {
            radius: style::RADIUS_FULL.into(),
            ..Border::default()
        },
        ..Default::default()
    }
}

/// Card behind the loading indicator.
pub fn loading_panel(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_low;
    let border_color = cs.outline_variant;
    move |_theme| container::Style {
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: style::RADIUS_LG.into(),
        },
        ..Default::default()
    }
}
