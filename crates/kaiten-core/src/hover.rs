//! Per-slide hover lifecycle.
//!
//! Every slide owns one [`SlideHover`]. A hover moves it through
//! `Pending → LoadingDetail → LoadingTrailer → Ready`; leaving the slide
//! returns it to `Idle`. Each hover start mints a new [`HoverToken`] and
//! every asynchronous result must present the token it was started with.
//! Results carrying an older token, or arriving in the wrong phase, are
//! rejected so an abandoned hover can never change what is displayed.

use kaiten_api::types::AnimeData;

/// Generation stamp of one hover on one slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HoverToken(u64);

#[derive(Debug, Clone, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Pointer is over the slide; waiting for the hover delay.
    Pending { token: HoverToken },
    LoadingDetail { token: HoverToken },
    LoadingTrailer { token: HoverToken, detail: AnimeData },
    /// Sequence finished. `detail` is `None` when the detail fetch failed.
    Ready {
        token: HoverToken,
        detail: Option<AnimeData>,
        trailer: Option<String>,
    },
}

impl Phase {
    fn token(&self) -> Option<HoverToken> {
        match self {
            Self::Idle => None,
            Self::Pending { token }
            | Self::LoadingDetail { token }
            | Self::LoadingTrailer { token, .. }
            | Self::Ready { token, .. } => Some(*token),
        }
    }
}

/// What the slide's media area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Media<'a> {
    Cover,
    Trailer(&'a str),
}

#[derive(Debug, Default)]
pub struct SlideHover {
    phase: Phase,
    generation: u64,
}

impl SlideHover {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Begin a hover. Any earlier token becomes stale.
    pub fn start(&mut self) -> HoverToken {
        self.generation += 1;
        let token = HoverToken(self.generation);
        self.phase = Phase::Pending { token };
        token
    }

    /// Pointer left the slide: drop detail, trailer and flags.
    pub fn end(&mut self) {
        self.phase = Phase::Idle;
    }

    pub fn is_hovered(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Token of the hover in progress, if any.
    pub fn token(&self) -> Option<HoverToken> {
        self.phase.token()
    }

    /// True if `token` belongs to the hover currently in progress.
    pub fn is_current(&self, token: HoverToken) -> bool {
        self.phase.token() == Some(token)
    }

    /// The hover delay fired. Returns `true` if the detail fetch should start.
    pub fn delay_elapsed(&mut self, token: HoverToken) -> bool {
        match self.phase {
            Phase::Pending { token: current } if current == token => {
                self.phase = Phase::LoadingDetail { token };
                true
            }
            _ => false,
        }
    }

    /// Detail arrived. Returns `true` if the trailer lookup should start.
    pub fn detail_loaded(&mut self, token: HoverToken, detail: AnimeData) -> bool {
        match self.phase {
            Phase::LoadingDetail { token: current } if current == token => {
                self.phase = Phase::LoadingTrailer { token, detail };
                true
            }
            _ => false,
        }
    }

    /// Detail fetch failed; the sequence ends with the cover shown.
    pub fn detail_failed(&mut self, token: HoverToken) -> bool {
        match self.phase {
            Phase::LoadingDetail { token: current } if current == token => {
                self.phase = Phase::Ready {
                    token,
                    detail: None,
                    trailer: None,
                };
                true
            }
            _ => false,
        }
    }

    /// Trailer lookup finished (with or without a playable stream).
    pub fn trailer_resolved(&mut self, token: HoverToken, trailer: Option<String>) -> bool {
        match std::mem::take(&mut self.phase) {
            Phase::LoadingTrailer {
                token: current,
                detail,
            } if current == token => {
                self.phase = Phase::Ready {
                    token,
                    detail: Some(detail),
                    trailer,
                };
                true
            }
            other => {
                self.phase = other;
                false
            }
        }
    }

    /// Loaded detail for the current hover, if any.
    pub fn detail(&self) -> Option<&AnimeData> {
        match &self.phase {
            Phase::LoadingTrailer { detail, .. } => Some(detail),
            Phase::Ready { detail, .. } => detail.as_ref(),
            _ => None,
        }
    }

    /// The trailer replaces the cover only once a stream URL is known.
    pub fn media(&self) -> Media<'_> {
        match &self.phase {
            Phase::Ready {
                trailer: Some(url), ..
            } => Media::Trailer(url),
            _ => Media::Cover,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(id: &str) -> AnimeData {
        serde_json::from_value(serde_json::json!({ "id": id, "totalEpisodes": 12 })).unwrap()
    }

    #[test]
    fn test_full_sequence() {
        let mut hover = SlideHover::new();
        let token = hover.start();
        assert!(hover.is_hovered());
        assert_eq!(hover.media(), Media::Cover);

        assert!(hover.delay_elapsed(token));
        assert!(hover.detail_loaded(token, detail("5")));
        assert_eq!(hover.detail().and_then(|d| d.total_episodes), Some(12));
        assert_eq!(hover.media(), Media::Cover);

        assert!(hover.trailer_resolved(token, Some("https://cdn/t.webm".into())));
        assert_eq!(hover.media(), Media::Trailer("https://cdn/t.webm"));

        hover.end();
        assert!(!hover.is_hovered());
        assert!(hover.detail().is_none());
        assert_eq!(hover.media(), Media::Cover);
    }

    #[test]
    fn test_delay_after_hover_end_is_ignored() {
        let mut hover = SlideHover::new();
        let token = hover.start();
        hover.end();
        assert!(!hover.delay_elapsed(token));
        assert!(matches!(hover.phase(), Phase::Idle));
    }

    #[test]
    fn test_stale_token_from_previous_hover() {
        let mut hover = SlideHover::new();
        let old = hover.start();
        hover.end();
        let new = hover.start();
        assert_ne!(old, new);
        assert!(!hover.delay_elapsed(old));
        assert!(hover.is_current(new));
        assert!(hover.delay_elapsed(new));

        assert!(!hover.detail_loaded(old, detail("5")));
        assert!(hover.detail_loaded(new, detail("5")));
        assert!(!hover.trailer_resolved(old, Some("late".into())));
        assert!(matches!(hover.phase(), Phase::LoadingTrailer { .. }));
    }

    #[test]
    fn test_results_out_of_phase_are_rejected() {
        let mut hover = SlideHover::new();
        let token = hover.start();
        // Detail before the delay fired.
        assert!(!hover.detail_loaded(token, detail("5")));
        assert!(!hover.trailer_resolved(token, Some("x".into())));
        assert!(matches!(hover.phase(), Phase::Pending { .. }));
    }

    #[test]
    fn test_no_stream_keeps_cover() {
        let mut hover = SlideHover::new();
        let token = hover.start();
        hover.delay_elapsed(token);
        hover.detail_loaded(token, detail("5"));
        assert!(hover.trailer_resolved(token, None));
        assert_eq!(hover.media(), Media::Cover);
        assert!(hover.detail().is_some());
    }

    #[test]
    fn test_detail_failure_ends_sequence() {
        let mut hover = SlideHover::new();
        let token = hover.start();
        hover.delay_elapsed(token);
        assert!(hover.detail_failed(token));
        assert!(matches!(
            hover.phase(),
            Phase::Ready {
                detail: None,
                trailer: None,
                ..
            }
        ));
        assert_eq!(hover.media(), Media::Cover);
    }
}
