//! Rendering contract of the player widget.
//!
//! A [`View`] is derived from the controller state alone, so any front end can
//! redraw from it after a state-changed notification. [`View::render`] is the
//! terminal rendering used by the CLI.

use colored::Colorize;

use crate::management::{Phase, PlaybackState};

pub const HEADING: &str = "🎧 Playing Now";
pub const COVER_ART_URL: &str = "https://picsum.photos/200/200";
pub const TITLE_PLACEHOLDER: &str = "Music Title";
pub const ARTIST_PLACEHOLDER: &str = "Artist";

/// What the single play/pause control offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAffordance {
    Play,
    Pause,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub heading: &'static str,
    pub cover_art: &'static str,
    pub title: String,
    pub artist: String,
    pub toggle: ToggleAffordance,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    /// Preview the audio surface is bound to; present iff the playlist is not empty.
    pub source: Option<String>,
    /// 1-based position and playlist length.
    pub position: Option<(usize, usize)>,
    pub phase: Phase,
}

impl View {
    pub fn from_state(state: &PlaybackState, phase: Phase) -> Self {
        let current = state.current_track();

        Self {
            heading: HEADING,
            cover_art: COVER_ART_URL,
            title: current
                .map(|t| t.title.as_str())
                .filter(|t| !t.is_empty())
                .unwrap_or(TITLE_PLACEHOLDER)
                .to_string(),
            artist: current
                .map(|t| t.artist.as_str())
                .filter(|a| !a.is_empty())
                .unwrap_or(ARTIST_PLACEHOLDER)
                .to_string(),
            toggle: if state.is_playing {
                ToggleAffordance::Pause
            } else {
                ToggleAffordance::Play
            },
            previous_enabled: state.has_previous(),
            next_enabled: state.has_next(),
            source: current.map(|t| t.preview_uri.clone()),
            position: current.map(|_| (state.position + 1, state.playlist.len())),
            phase,
        }
    }

    pub fn render(&self) -> String {
        let mut lines = vec![
            self.heading.bold().to_string(),
            format!("cover: {}", self.cover_art.dimmed()),
            String::new(),
            self.title.bold().green().to_string(),
            self.artist.to_string(),
            String::new(),
            self.controls(),
        ];

        match (&self.source, self.position) {
            (Some(source), Some((pos, len))) => {
                lines.push(format!("{} {}", format!("[{pos}/{len}]").blue(), source.dimmed()));
            }
            _ => lines.push(self.status_line().dimmed().to_string()),
        }

        lines.join("\n")
    }

    fn controls(&self) -> String {
        let previous = if self.previous_enabled {
            "⏮".green().to_string()
        } else {
            "⏮".dimmed().to_string()
        };
        let toggle = match self.toggle {
            ToggleAffordance::Play => "▶".green().bold().to_string(),
            ToggleAffordance::Pause => "⏸".green().bold().to_string(),
        };
        let next = if self.next_enabled {
            "⏭".green().to_string()
        } else {
            "⏭".dimmed().to_string()
        };

        format!("{previous}  {toggle}  {next}")
    }

    fn status_line(&self) -> &'static str {
        match self.phase {
            Phase::Uninitialized => "starting",
            Phase::AwaitingToken => "waiting for access token",
            Phase::NoPlayableTrack => "no playable track",
            Phase::Playing | Phase::Paused => "",
        }
    }
}
