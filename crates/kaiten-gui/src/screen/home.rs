//! Discovery page: the "Trending Now" and "All Time Popular" carousels.

use iced::widget::{column, container, scrollable};
use iced::{Element, Length, Task};

use kaiten_api::types::{AnimeData, AnimeResult};
use kaiten_api::ListKind;
use kaiten_core::cache::DetailCache;
use kaiten_core::carousel::{Carousel, Effect};
use kaiten_core::discover;
use kaiten_core::home::{Home as Page, PlayingTrailer};
use kaiten_core::hover::HoverToken;
use kaiten_core::layout;

use crate::app;
use crate::cover_cache::{self, CoverCache};
use crate::screen::Action;
use crate::services::Services;
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::widgets::{self, SlideMessages};

/// Home screen state.
pub struct Home {
    page: Page,
    details: DetailCache,
    viewport_width: f32,
}

#[derive(Debug, Clone)]
pub enum Message {
    ListLoaded(ListKind, Result<Vec<AnimeResult>, String>),
    HoverStarted(ListKind, usize),
    HoverEnded(ListKind, usize),
    DelayElapsed {
        kind: ListKind,
        index: usize,
        token: HoverToken,
    },
    DetailLoaded {
        kind: ListKind,
        index: usize,
        token: HoverToken,
        result: Box<Result<AnimeData, String>>,
    },
    TrailerResolved {
        kind: ListKind,
        index: usize,
        token: HoverToken,
        url: Option<String>,
    },
    SlidePressed(ListKind, usize),
    Prev(ListKind),
    Next(ListKind),
}

impl Home {
    pub fn new(detail_capacity: usize, viewport_width: f32) -> Self {
        let mut page = Page::new();
        page.set_viewport_width(viewport_width);
        Self {
            page,
            details: DetailCache::new(detail_capacity),
            viewport_width,
        }
    }

    /// Fetch both lists concurrently.
    pub fn load(&self, services: &Services) -> Action {
        let tasks = ListKind::ALL.iter().map(|&kind| {
            let client = services.discovery.clone();
            let per_page = services.per_page;
            Task::perform(
                async move { discover::load_list(&client, kind, per_page).await },
                move |result| app::Message::Home(Message::ListLoaded(kind, result)),
            )
        });
        Action::RunTask(Task::batch(tasks))
    }

    /// Slide whose trailer should be playing, if any.
    pub fn playing_trailer(&self) -> Option<PlayingTrailer<'_>> {
        self.page.playing_trailer()
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
        self.page.set_viewport_width(width);
    }

    /// Handle a home message, returning an Action for the app router.
    pub fn update(&mut self, msg: Message, services: Option<&Services>) -> Action {
        match msg {
            Message::ListLoaded(kind, result) => {
                let covers = match &result {
                    Ok(items) => items
                        .iter()
                        .map(|item| (item.id.clone(), item.cover_url().map(str::to_string)))
                        .collect(),
                    Err(_) => Vec::new(),
                };
                self.page.list_loaded(kind, result);
                Action::RequestCovers(covers)
            }
            Message::HoverStarted(kind, index) => {
                let Some(carousel) = self.page.carousel_mut(kind) else {
                    return Action::None;
                };
                let effect = carousel.hover_start(index);
                run_effect(kind, effect, services)
            }
            Message::HoverEnded(kind, index) => {
                if let Some(carousel) = self.page.carousel_mut(kind) {
                    carousel.hover_end(index);
                }
                Action::None
            }
            Message::DelayElapsed { kind, index, token } => {
                let Some(carousel) = self.page.carousel_mut(kind) else {
                    return Action::None;
                };
                let effect = carousel.delay_elapsed(index, token, &mut self.details);
                run_effect(kind, effect, services)
            }
            Message::DetailLoaded {
                kind,
                index,
                token,
                result,
            } => {
                let Some(carousel) = self.page.carousel_mut(kind) else {
                    return Action::None;
                };
                let effect = carousel.detail_loaded(index, token, *result, &mut self.details);
                run_effect(kind, effect, services)
            }
            Message::TrailerResolved {
                kind,
                index,
                token,
                url,
            } => {
                let Some(carousel) = self.page.carousel_mut(kind) else {
                    return Action::None;
                };
                let playable = url.is_some();
                if !carousel.trailer_resolved(index, token, url) || !playable {
                    return Action::None;
                }
                // Still frame shown in place of the cover while it plays.
                match carousel.slide(index) {
                    Some(slide) => Action::RequestCovers(vec![(
                        cover_cache::trailer_key(&slide.item.id),
                        slide.trailer_thumbnail().map(str::to_string),
                    )]),
                    None => Action::None,
                }
            }
            Message::SlidePressed(kind, index) => match self.page.carousel(kind) {
                Some(carousel) => run_effect(kind, carousel.click(index), services),
                None => Action::None,
            },
            Message::Prev(kind) => {
                if let Some(carousel) = self.page.carousel_mut(kind) {
                    carousel.prev();
                }
                Action::None
            }
            Message::Next(kind) => {
                if let Some(carousel) = self.page.carousel_mut(kind) {
                    carousel.next();
                }
                Action::None
            }
        }
    }

    pub fn view<'a>(&'a self, cs: &ColorScheme, covers: &'a CoverCache) -> Element<'a, Message> {
        if !self.page.is_ready() {
            return container(widgets::loading(cs))
                .width(Length::Fill)
                .height(Length::Fill)
                .style(theme::page(cs))
                .into();
        }

        let available = (self.viewport_width - 2.0 * style::SPACE_XL).max(0.0);
        let sections = self
            .page
            .carousels()
            .into_iter()
            .map(|carousel| section(cs, covers, carousel, available));

        let content = column(sections)
            .spacing(style::SPACE_2XL)
            .padding(style::SPACE_XL)
            .width(Length::Fill);

        container(
            scrollable(content)
                .direction(scrollable::Direction::Vertical(
                    scrollable::Scrollbar::new().width(6).scroller_width(4),
                ))
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(theme::page(cs))
        .into()
    }
}

fn section<'a>(
    cs: &ColorScheme,
    covers: &'a CoverCache,
    carousel: &'a Carousel,
    available: f32,
) -> Element<'a, Message> {
    let kind = carousel.kind();
    let pager = carousel.pager();
    let width = layout::slide_width(available, pager.per_view());

    let slides = carousel
        .visible()
        .map(|(index, slide)| {
            widgets::slide_card(
                cs,
                covers,
                slide,
                width,
                SlideMessages {
                    enter: Message::HoverStarted(kind, index),
                    exit: Message::HoverEnded(kind, index),
                    press: Message::SlidePressed(kind, index),
                },
            )
        })
        .collect();

    widgets::carousel_section(
        cs,
        kind.heading(),
        slides,
        pager.can_prev().then_some(Message::Prev(kind)),
        pager.can_next().then_some(Message::Next(kind)),
    )
}

/// Turn a carousel effect into the timer or request that carries it out.
fn run_effect(kind: ListKind, effect: Effect, services: Option<&Services>) -> Action {
    let Some(services) = services else {
        return Action::None;
    };
    match effect {
        Effect::None => Action::None,
        Effect::StartDelay { index, token } => Action::RunTask(Task::perform(
            discover::hover_delay(services.hover_delay),
            move |()| app::Message::Home(Message::DelayElapsed { kind, index, token }),
        )),
        Effect::FetchDetail { index, token, id } => {
            let client = services.discovery.clone();
            Action::RunTask(Task::perform(
                async move { discover::load_detail(&client, &id).await },
                move |result| {
                    app::Message::Home(Message::DetailLoaded {
                        kind,
                        index,
                        token,
                        result: Box::new(result),
                    })
                },
            ))
        }
        Effect::FetchTrailer {
            index,
            token,
            trailer_id,
        } => {
            let streams = services.streams.clone();
            let prefs = services.trailer.clone();
            Action::RunTask(Task::perform(
                async move { discover::resolve_trailer(&streams, &trailer_id, &prefs).await },
                move |url| app::Message::Home(Message::TrailerResolved { kind, index, token, url }),
            ))
        }
        Effect::Navigate(route) => match services.site_url(&route) {
            Ok(url) => Action::OpenUrl(url.to_string()),
            Err(e) => {
                tracing::warn!(route = %route, error = %e, "Cannot build detail page URL");
                Action::None
            }
        },
    }
}
