use iced::widget::{button, center, column, container, row, text, Row, Space};
use iced::{Alignment, Element, Length};

use kaiten_core::layout::SPACE_BETWEEN;

use crate::style;
use crate::theme::{self, ColorScheme};

/// A titled carousel: heading with prev/next arrows above one row of
/// slides. An arrow whose message is `None` renders disabled.
pub fn carousel_section<'a, Message: Clone + 'a>(
    cs: &ColorScheme,
    heading: &'a str,
    slides: Vec<Element<'a, Message>>,
    on_prev: Option<Message>,
    on_next: Option<Message>,
) -> Element<'a, Message> {
    let accent = container(Space::new().width(4).height(style::TEXT_2XL))
        .style(theme::heading_accent(cs));

    let header = row![
        accent,
        text(heading)
            .size(style::TEXT_2XL)
            .font(style::FONT_HEADING)
            .color(cs.on_surface)
            .line_height(style::LINE_HEIGHT_TIGHT),
        Space::new().width(Length::Fill),
        nav_button(cs, lucide_icons::iced::icon_chevron_left(), on_prev),
        nav_button(cs, lucide_icons::iced::icon_chevron_right(), on_next),
    ]
    .spacing(style::SPACE_SM)
    .align_y(Alignment::Center);

    let track: Element<'a, Message> = if slides.is_empty() {
        container(
            text("Nothing to show")
                .size(style::TEXT_BASE)
                .color(cs.on_surface_variant),
        )
        .height(Length::Fixed(style::SLIDE_HEIGHT))
        .center_y(Length::Fixed(style::SLIDE_HEIGHT))
        .into()
    } else {
        Row::with_children(slides)
            .spacing(SPACE_BETWEEN)
            .height(Length::Fixed(style::SLIDE_HEIGHT))
            .into()
    };

    column![header, track]
        .spacing(style::SPACE_LG)
        .width(Length::Fill)
        .into()
}

fn nav_button<'a, Message: Clone + 'a>(
    cs: &ColorScheme,
    icon: iced::widget::Text<'a>,
    on_press: Option<Message>,
) -> Element<'a, Message> {
    button(
        icon.size(style::TEXT_LG)
            .width(Length::Fill)
            .height(Length::Fill)
            .center(),
    )
    .padding(0)
    .width(Length::Fixed(style::NAV_BUTTON_SIZE))
    .height(Length::Fixed(style::NAV_BUTTON_SIZE))
    .on_press_maybe(on_press)
    .style(theme::nav_button(cs))
    .into()
}

/// Full-page placeholder shown until both lists have loaded.
pub fn loading<'a, Message: 'a>(cs: &ColorScheme) -> Element<'a, Message> {
    let content = column![
        lucide_icons::iced::icon_loader()
            .size(style::TEXT_3XL)
            .color(cs.primary),
        text("Loading")
            .size(style::TEXT_LG)
            .color(cs.on_surface_variant),
    ]
    .spacing(style::SPACE_MD)
    .align_x(Alignment::Center);

    center(
        container(content)
            .padding(style::SPACE_2XL)
            .style(theme::loading_panel(cs)),
    )
    .into()
}
