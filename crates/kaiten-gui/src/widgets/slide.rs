use iced::widget::{column, container, mouse_area, row, stack, text};
use iced::{mouse, Alignment, Color, Element, Length};

use kaiten_core::carousel::Slide;
use kaiten_core::hover::Media;

use crate::cover_cache::{self, CoverCache, CoverState};
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::widgets;

/// Messages a slide emits.
pub struct SlideMessages<Message> {
    pub enter: Message,
    pub exit: Message,
    pub press: Message,
}

/// One carousel slide: media area, title and caption.
///
/// The media area shows the cover until a trailer is playing, then the
/// trailer's still frame under a badge. The info overlay sits on top while
/// the pointer is over the slide.
pub fn slide_card<'a, Message: Clone + 'a>(
    cs: &ColorScheme,
    covers: &'a CoverCache,
    slide: &'a Slide,
    width: f32,
    messages: SlideMessages<Message>,
) -> Element<'a, Message> {
    let inner_width = (width - 2.0 * style::SPACE_SM).max(0.0);
    let hovered = slide.hover.is_hovered();

    let playing = matches!(slide.media(), Media::Trailer(_));
    let frame_key = cover_cache::trailer_key(&slide.item.id);
    let image_key = match covers.get(&frame_key) {
        Some(CoverState::Loaded(_)) if playing => frame_key.as_str(),
        _ => slide.item.id.as_str(),
    };

    let mut media = stack![widgets::rounded_cover(
        cs,
        covers,
        image_key,
        inner_width,
        style::SLIDE_MEDIA_HEIGHT,
        style::RADIUS_MD,
    )]
    .width(Length::Fixed(inner_width))
    .height(Length::Fixed(style::SLIDE_MEDIA_HEIGHT));

    if playing {
        media = media.push(trailer_badge(cs));
    }
    if hovered {
        media = media.push(info_overlay(cs, slide.summary()));
    }

    let title = container(
        text(slide.item.title.display().to_string())
            .size(style::TEXT_LG)
            .font(style::FONT_HEADING)
            .color(cs.on_surface)
            .line_height(style::LINE_HEIGHT_TIGHT)
            .wrapping(iced::widget::text::Wrapping::WordOrGlyph),
    )
    .height(Length::Fixed(style::TEXT_LG * style::LINE_HEIGHT_TIGHT + 2.0))
    .clip(true);

    let [r, g, b] = slide.accent_rgb();
    let caption = text(slide.caption())
        .size(style::TEXT_SM)
        .color(Color::from_rgb8(r, g, b))
        .line_height(style::LINE_HEIGHT_LOOSE);

    let body = column![media, title, caption]
        .spacing(style::SPACE_SM)
        .padding(style::SPACE_SM)
        .width(Length::Fixed(width));

    let card = container(body)
        .width(Length::Fixed(width))
        .height(Length::Fixed(style::SLIDE_HEIGHT))
        .style(theme::slide_card(cs, hovered))
        .clip(true);

    mouse_area(card)
        .on_enter(messages.enter)
        .on_exit(messages.exit)
        .on_press(messages.press)
        .interaction(mouse::Interaction::Pointer)
        .into()
}

/// `"{eps} episodes • {type} • {status} • {duration}"` band along the
/// bottom of the media area.
fn info_overlay<'a, Message: 'a>(cs: &ColorScheme, summary: String) -> Element<'a, Message> {
    let band = container(
        text(summary)
            .size(style::TEXT_SM)
            .color(cs.on_scrim)
            .line_height(style::LINE_HEIGHT_NORMAL),
    )
    .padding([style::SPACE_XS, style::SPACE_SM])
    .width(Length::Fill)
    .style(theme::media_scrim(cs));

    container(band)
        .padding(style::SPACE_SM)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_y(Alignment::End)
        .into()
}

/// "TRAILER" marker in the top corner of a playing slide.
fn trailer_badge<'a, Message: 'a>(cs: &ColorScheme) -> Element<'a, Message> {
    let badge = container(
        row![
            lucide_icons::iced::icon_clapperboard().size(style::TEXT_XS),
            text("TRAILER")
                .size(style::TEXT_XS)
                .font(style::FONT_HEADING),
        ]
        .spacing(style::SPACE_XS)
        .align_y(Alignment::Center),
    )
    .padding([style::SPACE_XXS, style::SPACE_SM])
    .style(theme::trailer_badge(cs));

    container(badge)
        .padding(style::SPACE_SM)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
