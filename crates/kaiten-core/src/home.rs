//! Discovery page controller: two independent lists, one carousel each.

use kaiten_api::types::AnimeResult;
use kaiten_api::ListKind;

use crate::carousel::Carousel;
use crate::hover::{HoverToken, Media};

/// The trailer a slide is showing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayingTrailer<'a> {
    pub kind: ListKind,
    pub index: usize,
    pub token: HoverToken,
    pub url: &'a str,
}

/// Page state. Each list stays `None` until its fetch succeeds; a failed
/// fetch leaves it `None` for the lifetime of the page.
#[derive(Debug, Default)]
pub struct Home {
    trending: Option<Carousel>,
    popular: Option<Carousel>,
    viewport_width: Option<f32>,
}

impl Home {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the outcome of a list fetch. Errors are logged and dropped.
    pub fn list_loaded(&mut self, kind: ListKind, result: Result<Vec<AnimeResult>, String>) {
        match result {
            Ok(items) => {
                tracing::info!(list = %kind, count = items.len(), "List loaded");
                let mut carousel = Carousel::new(kind, items);
                if let Some(width) = self.viewport_width {
                    carousel.set_viewport_width(width);
                }
                *self.slot_mut(kind) = Some(carousel);
            }
            Err(e) => {
                tracing::error!(list = %kind, error = %e, "List fetch failed");
            }
        }
    }

    /// Both lists are in; until then the page shows its loading indicator.
    pub fn is_ready(&self) -> bool {
        self.trending.is_some() && self.popular.is_some()
    }

    pub fn carousel(&self, kind: ListKind) -> Option<&Carousel> {
        match kind {
            ListKind::Trending => self.trending.as_ref(),
            ListKind::Popular => self.popular.as_ref(),
        }
    }

    pub fn carousel_mut(&mut self, kind: ListKind) -> Option<&mut Carousel> {
        self.slot_mut(kind).as_mut()
    }

    /// Carousels in page order, only once the page is ready.
    pub fn carousels(&self) -> Vec<&Carousel> {
        if !self.is_ready() {
            return Vec::new();
        }
        ListKind::ALL
            .iter()
            .filter_map(|kind| self.carousel(*kind))
            .collect()
    }

    /// First on-screen slide whose hover reached a playable trailer.
    pub fn playing_trailer(&self) -> Option<PlayingTrailer<'_>> {
        self.carousels().into_iter().find_map(|carousel| {
            carousel.visible().find_map(|(index, slide)| match slide.media() {
                Media::Trailer(url) => Some(PlayingTrailer {
                    kind: carousel.kind(),
                    index,
                    token: slide.hover.token()?,
                    url,
                }),
                Media::Cover => None,
            })
        })
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = Some(width);
        for kind in ListKind::ALL {
            if let Some(carousel) = self.carousel_mut(*kind) {
                carousel.set_viewport_width(width);
            }
        }
    }

    fn slot_mut(&mut self, kind: ListKind) -> &mut Option<Carousel> {
        match kind {
            ListKind::Trending => &mut self.trending,
            ListKind::Popular => &mut self.popular,
        }
    }
}
