use iced::widget::container;
use iced::{ContentFit, Element, Length};

use crate::cover_cache::{CoverCache, CoverState};
use crate::style;
use crate::theme::{self, ColorScheme};

/// Render a cover image with rounded corners, or a styled placeholder.
///
/// The image fills the frame with `ContentFit::Cover`, cropping overflow.
/// While the download is in flight a loader glyph is shown; a missing or
/// failed cover shows a film glyph.
pub fn rounded_cover<'a, Message: 'a>(
    cs: &ColorScheme,
    covers: &'a CoverCache,
    anime_id: &str,
    width: f32,
    height: f32,
    radius: f32,
) -> Element<'a, Message> {
    let placeholder_icon = match covers.get(anime_id) {
        Some(CoverState::Loaded(path)) => {
            return container(
                iced::widget::image(path.as_path())
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .content_fit(ContentFit::Cover)
                    .border_radius(radius),
            )
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .style(theme::cover_placeholder(cs, radius))
            .into();
        }
        Some(CoverState::Loading) => lucide_icons::iced::icon_loader(),
        Some(CoverState::Failed) | None => lucide_icons::iced::icon_film(),
    };

    container(
        placeholder_icon
            .size(style::TEXT_3XL)
            .color(cs.outline)
            .center(),
    )
    .width(Length::Fixed(width))
    .height(Length::Fixed(height))
    .center_x(Length::Fixed(width))
    .center_y(Length::Fixed(height))
    .style(theme::cover_placeholder(cs, radius))
    .into()
}
