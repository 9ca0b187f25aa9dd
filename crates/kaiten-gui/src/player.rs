//! Trailer playback in an external player process.
//!
//! The slide that reaches a playable trailer gets exactly one player; it is
//! stopped as soon as that hover ends or another trailer takes over.

use std::process::{Child, Command, Stdio};

use kaiten_api::ListKind;
use kaiten_core::home::PlayingTrailer;
use kaiten_core::hover::HoverToken;

/// Which hover a running player belongs to.
type PlaybackKey = (ListKind, usize, HoverToken);

#[derive(Debug)]
struct Playback {
    key: PlaybackKey,
    /// `None` when the URL went to the system handler, which cannot be
    /// stopped from here.
    child: Option<Child>,
}

#[derive(Debug, Default)]
pub struct TrailerPlayer {
    command: Vec<String>,
    current: Option<Playback>,
}

impl TrailerPlayer {
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            current: None,
        }
    }

    /// Start, keep or stop playback so it matches the slide that should be
    /// showing a trailer.
    pub fn sync(&mut self, wanted: Option<PlayingTrailer<'_>>) {
        let wanted_key = wanted.map(|t| (t.kind, t.index, t.token));
        if self.current.as_ref().map(|p| p.key) == wanted_key {
            return;
        }
        self.stop();
        if let Some(trailer) = wanted {
            let child = self.launch(trailer.url);
            self.current = Some(Playback {
                key: (trailer.kind, trailer.index, trailer.token),
                child,
            });
        }
    }

    pub fn stop(&mut self) {
        let Some(playback) = self.current.take() else {
            return;
        };
        if let Some(mut child) = playback.child {
            tracing::debug!(pid = child.id(), "Stopping trailer");
            if let Err(e) = child.kill() {
                tracing::debug!(error = %e, "Trailer player already exited");
            }
            let _ = child.wait();
        }
    }

    fn launch(&self, url: &str) -> Option<Child> {
        if let Some((program, args)) = self.command.split_first() {
            match Command::new(program)
                .args(args)
                .arg(url)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
            {
                Ok(child) => {
                    tracing::info!(player = %program, url = %url, pid = child.id(), "Playing trailer");
                    return Some(child);
                }
                Err(e) => {
                    tracing::warn!(player = %program, error = %e, "Trailer player unavailable, using system handler");
                }
            }
        }
        tracing::info!(url = %url, "Opening trailer");
        if let Err(e) = open::that(url) {
            tracing::warn!(url = %url, "Failed to open trailer: {e}");
        }
        None
    }
}

impl Drop for TrailerPlayer {
    fn drop(&mut self) {
        self.stop();
    }
}
