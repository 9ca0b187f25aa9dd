//! A horizontally paged list of anime slides with per-slide hover state.
//!
//! The carousel never performs I/O. Each interaction returns an [`Effect`]
//! that the front end turns into a timer or a network request, and each
//! completed request is fed back in together with the [`HoverToken`] it was
//! started for.

use kaiten_api::endpoint;
use kaiten_api::types::{AnimeData, AnimeResult};
use kaiten_api::{Endpoint, ListKind};

use crate::cache::DetailCache;
use crate::hover::{HoverToken, Media, SlideHover};
use crate::layout::{self, Pager};

/// Fallback caption tint when an entry has no accent color.
pub const DEFAULT_ACCENT: [u8; 3] = [0x00, 0x80, 0x00];

/// Work the front end must perform on behalf of a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Wait for the hover delay, then report back with `token`.
    StartDelay { index: usize, token: HoverToken },
    FetchDetail {
        index: usize,
        token: HoverToken,
        id: String,
    },
    FetchTrailer {
        index: usize,
        token: HoverToken,
        trailer_id: String,
    },
    /// Open a site route.
    Navigate(String),
}

/// One anime entry plus its hover lifecycle.
#[derive(Debug)]
pub struct Slide {
    pub item: AnimeResult,
    pub hover: SlideHover,
}

impl Slide {
    fn new(item: AnimeResult) -> Self {
        Self {
            item,
            hover: SlideHover::new(),
        }
    }

    /// Route of the detail page this slide links to.
    pub fn route(&self) -> String {
        endpoint::info_route(&self.item.id)
    }

    pub fn media(&self) -> Media<'_> {
        self.hover.media()
    }

    /// `"{release} • {romaji}"` line under the heading.
    pub fn caption(&self) -> String {
        let year = self
            .item
            .release_date
            .map(|y| y.to_string())
            .unwrap_or_default();
        let romaji = self.item.title.romaji.as_deref().unwrap_or_default();
        format!("{year} \u{2022} {romaji}")
    }

    /// Hover overlay: `"{eps} episodes • {type} • {status} • {duration}"`.
    ///
    /// Loaded detail wins over the list entry's summary fields.
    pub fn summary(&self) -> String {
        let detail = self.hover.detail();
        let item = &self.item;

        let episodes = detail
            .and_then(|d| d.total_episodes)
            .or(item.total_episodes);
        let media_type = detail
            .and_then(|d| d.media_type.as_deref())
            .or(item.media_type.as_deref());
        let status = detail
            .and_then(|d| d.status.as_deref())
            .or(item.status.as_deref());
        let duration = detail.and_then(|d| d.duration).or(item.duration);

        format!(
            "{} episodes \u{2022} {} \u{2022} {} \u{2022} {}",
            or_unknown(episodes),
            media_type.unwrap_or("?"),
            status.unwrap_or("?"),
            or_unknown(duration),
        )
    }

    /// Still frame for the trailer: the list entry's thumbnail, else the
    /// one in the loaded detail record.
    pub fn trailer_thumbnail(&self) -> Option<&str> {
        let from_item = self.item.trailer.as_ref().and_then(|t| t.thumbnail.as_deref());
        let from_detail = || {
            self.hover
                .detail()
                .and_then(|d| d.trailer.as_ref())
                .and_then(|t| t.thumbnail.as_deref())
        };
        from_item
            .filter(|url| !url.is_empty())
            .or_else(|| from_detail().filter(|url| !url.is_empty()))
    }

    /// Caption tint parsed from the entry's `#rrggbb` / `#rgb` color.
    pub fn accent_rgb(&self) -> [u8; 3] {
        self.item
            .color
            .as_deref()
            .and_then(parse_hex_rgb)
            .unwrap_or(DEFAULT_ACCENT)
    }
}

fn or_unknown(value: Option<u32>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}

/// Parse `#rrggbb` or `#rgb` into RGB bytes.
pub fn parse_hex_rgb(s: &str) -> Option<[u8; 3]> {
    let trimmed = s.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !hex.is_ascii() {
        return None;
    }
    let channel = |h: &str| u8::from_str_radix(h, 16).ok();
    match hex.len() {
        6 => Some([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        ]),
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                out[i] = v * 17;
            }
            Some(out)
        }
        _ => None,
    }
}

#[derive(Debug)]
pub struct Carousel {
    kind: ListKind,
    slides: Vec<Slide>,
    pager: Pager,
}

impl Carousel {
    pub fn new(kind: ListKind, items: Vec<AnimeResult>) -> Self {
        let pager = Pager::new(items.len(), layout::DEFAULT_PER_VIEW);
        Self {
            kind,
            slides: items.into_iter().map(Slide::new).collect(),
            pager,
        }
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Slides currently on screen, with their indices.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &Slide)> {
        let range = self.pager.visible();
        self.slides[range.clone()]
            .iter()
            .enumerate()
            .map(move |(i, s)| (range.start + i, s))
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        let first = self.pager.first();
        self.pager.set_per_view(layout::slides_per_view(width));
        self.end_displaced_hovers(first);
    }

    pub fn prev(&mut self) {
        let first = self.pager.first();
        self.pager.prev();
        self.end_displaced_hovers(first);
    }

    pub fn next(&mut self) {
        let first = self.pager.first();
        self.pager.next();
        self.end_displaced_hovers(first);
    }

    /// A slide that moves on screen, or off it, never sees a pointer-exit.
    /// Once the first visible index changes every slide has moved, so every
    /// hover ends; otherwise only slides that left the view lose theirs.
    fn end_displaced_hovers(&mut self, previous_first: usize) {
        let shifted = self.pager.first() != previous_first;
        let visible = self.pager.visible();
        for (index, slide) in self.slides.iter_mut().enumerate() {
            if slide.hover.is_hovered() && (shifted || !visible.contains(&index)) {
                tracing::debug!(list = %self.kind, anime_id = %slide.item.id, "Hover ended by paging");
                slide.hover.end();
            }
        }
    }

    pub fn click(&self, index: usize) -> Effect {
        match self.slides.get(index) {
            Some(slide) => Effect::Navigate(slide.route()),
            None => Effect::None,
        }
    }

    pub fn hover_start(&mut self, index: usize) -> Effect {
        let Some(slide) = self.slides.get_mut(index) else {
            return Effect::None;
        };
        let token = slide.hover.start();
        tracing::debug!(list = %self.kind, anime_id = %slide.item.id, "Hover started");
        Effect::StartDelay { index, token }
    }

    pub fn hover_end(&mut self, index: usize) {
        if let Some(slide) = self.slides.get_mut(index) {
            slide.hover.end();
        }
    }

    /// Hover delay fired: serve detail from the cache or request it.
    pub fn delay_elapsed(
        &mut self,
        index: usize,
        token: HoverToken,
        cache: &mut DetailCache,
    ) -> Effect {
        let Some(slide) = self.slides.get_mut(index) else {
            return Effect::None;
        };
        if !slide.hover.delay_elapsed(token) {
            tracing::debug!(anime_id = %slide.item.id, "Dropping stale hover delay");
            return Effect::None;
        }

        let endpoint = Endpoint::info(&slide.item.id);
        match cache.lookup(&endpoint) {
            Some(detail) => {
                slide.hover.detail_loaded(token, detail);
                Self::trailer_effect(slide, index, token)
            }
            None => {
                tracing::debug!(endpoint = %endpoint, "No cached detail, sending request");
                Effect::FetchDetail {
                    index,
                    token,
                    id: slide.item.id.clone(),
                }
            }
        }
    }

    /// A detail request finished. Successful responses are cached even when
    /// the hover that asked for them is gone.
    pub fn detail_loaded(
        &mut self,
        index: usize,
        token: HoverToken,
        result: Result<AnimeData, String>,
        cache: &mut DetailCache,
    ) -> Effect {
        let Some(slide) = self.slides.get_mut(index) else {
            return Effect::None;
        };
        match result {
            Ok(detail) => {
                cache.insert(&Endpoint::info(&slide.item.id), detail.clone());
                if slide.hover.detail_loaded(token, detail) {
                    Self::trailer_effect(slide, index, token)
                } else {
                    tracing::debug!(anime_id = %slide.item.id, "Dropping stale detail");
                    Effect::None
                }
            }
            Err(e) => {
                tracing::error!(anime_id = %slide.item.id, error = %e, "Detail fetch failed");
                slide.hover.detail_failed(token);
                Effect::None
            }
        }
    }

    /// Trailer lookup finished. Returns `true` if the slide accepted it.
    pub fn trailer_resolved(
        &mut self,
        index: usize,
        token: HoverToken,
        trailer: Option<String>,
    ) -> bool {
        let Some(slide) = self.slides.get_mut(index) else {
            return false;
        };
        let accepted = slide.hover.trailer_resolved(token, trailer);
        if !accepted {
            tracing::debug!(anime_id = %slide.item.id, "Dropping stale trailer");
        }
        accepted
    }

    /// Next step once detail is in: look up the trailer, or settle on the
    /// cover right away when the entry has no trailer id.
    fn trailer_effect(slide: &mut Slide, index: usize, token: HoverToken) -> Effect {
        let trailer_id = slide
            .item
            .trailer_id()
            .or_else(|| {
                slide
                    .hover
                    .detail()
                    .and_then(|d| d.trailer.as_ref())
                    .and_then(|t| t.id.as_deref())
                    .filter(|id| !id.is_empty())
            })
            .map(str::to_string);

        match trailer_id {
            Some(trailer_id) => Effect::FetchTrailer {
                index,
                token,
                trailer_id,
            },
            None => {
                slide.hover.trailer_resolved(token, None);
                Effect::None
            }
        }
    }
}
