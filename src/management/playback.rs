use crate::{
    error::PlayerError,
    management::surface::{PlaybackSurface, SurfaceStatus},
    types::Track,
    warning,
};

/// Observable phase of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    AwaitingToken,
    /// The playlist resolved empty; transport controls do nothing.
    NoPlayableTrack,
    Playing,
    Paused,
}

/// Playlist plus transport position.
///
/// If `playlist` is non-empty, `position` is a valid index into it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub playlist: Vec<Track>,
    pub position: usize,
    pub is_playing: bool,
}

impl PlaybackState {
    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.get(self.position)
    }

    pub fn has_previous(&self) -> bool {
        !self.playlist.is_empty() && self.position > 0
    }

    pub fn has_next(&self) -> bool {
        self.position + 1 < self.playlist.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Uninitialized,
    AwaitingToken,
    Loaded,
}

pub type Subscriber = Box<dyn FnMut(&PlaybackState, Phase)>;

/// Owns the playlist, the position and the playback surface.
///
/// Every operation is a synchronous mutation. Subscribers are notified once
/// after each operation that changed the state; no-ops notify nobody.
pub struct PlaybackController<S> {
    stage: Stage,
    state: PlaybackState,
    surface: Option<S>,
    torn_down: bool,
    subscribers: Vec<Subscriber>,
}

impl<S: PlaybackSurface> Default for PlaybackController<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PlaybackSurface> PlaybackController<S> {
    pub fn new() -> Self {
        Self {
            stage: Stage::Uninitialized,
            state: PlaybackState::default(),
            surface: None,
            torn_down: false,
            subscribers: Vec::new(),
        }
    }

    pub fn with_surface(surface: S) -> Self {
        let mut controller = Self::new();
        controller.surface = Some(surface);
        controller
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        match self.stage {
            Stage::Uninitialized => Phase::Uninitialized,
            Stage::AwaitingToken => Phase::AwaitingToken,
            Stage::Loaded if self.state.playlist.is_empty() => Phase::NoPlayableTrack,
            Stage::Loaded if self.state.is_playing => Phase::Playing,
            Stage::Loaded => Phase::Paused,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.stage != Stage::Uninitialized && !self.torn_down
    }

    /// Preview resource the surface currently points at.
    pub fn bound_source(&self) -> Option<&str> {
        self.surface.as_ref().and_then(|s| s.source())
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&PlaybackState, Phase) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Uninitialized → AwaitingToken.
    pub fn mount(&mut self) {
        if self.torn_down || self.stage != Stage::Uninitialized {
            return;
        }

        self.stage = Stage::AwaitingToken;
        self.notify();
    }

    /// Marks the component torn down. Late results and further transport
    /// commands are ignored from here on.
    pub fn unmount(&mut self) {
        self.torn_down = true;
    }

    /// AwaitingToken → Loaded, starting playback at position 0 when at least
    /// one playable track arrived.
    ///
    /// Accepted once. Tracks without a preview are dropped. Results arriving
    /// after [`unmount`](Self::unmount) are discarded.
    pub fn load(&mut self, mut tracks: Vec<Track>) {
        if self.torn_down {
            warning!(
                "Discarding {} tracks that arrived after teardown",
                tracks.len()
            );
            return;
        }

        if self.stage != Stage::AwaitingToken {
            warning!("Not awaiting tracks, ignoring {} tracks", tracks.len());
            return;
        }

        tracks.retain(|t| !t.preview_uri.trim().is_empty());

        self.stage = Stage::Loaded;
        self.state = PlaybackState {
            playlist: tracks,
            position: 0,
            is_playing: false,
        };

        if !self.state.playlist.is_empty() {
            self.start_current();
        }

        self.notify();
    }

    /// Starts the current track. Returns whether the state changed.
    pub fn play(&mut self) -> bool {
        if self.torn_down || self.state.is_playing || self.state.current_track().is_none() {
            return false;
        }

        let Some(surface) = self.surface.as_mut() else {
            warning!("{}", PlayerError::MissingAudioSurface);
            return false;
        };

        let status = surface.play();
        if status == SurfaceStatus::Refused {
            let source = surface.source().unwrap_or_default().to_string();
            warning!("{}", PlayerError::AutoplayRejected(source));
        }

        self.set_playing(status.is_playing())
    }

    /// Pauses the current track. Returns whether the state changed.
    pub fn pause(&mut self) -> bool {
        if self.torn_down || !self.state.is_playing || self.state.current_track().is_none() {
            return false;
        }

        let Some(surface) = self.surface.as_mut() else {
            warning!("{}", PlayerError::MissingAudioSurface);
            return false;
        };

        let status = surface.pause();
        self.set_playing(status.is_playing())
    }

    /// The single play/pause control.
    pub fn toggle(&mut self) -> bool {
        if self.torn_down || self.state.current_track().is_none() {
            return false;
        }

        if self.bound_source().is_none() {
            warning!("{}", PlayerError::MissingAudioSurface);
            return false;
        }

        if self.state.is_playing {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Steps back one track and (re)starts playback. Does not wrap.
    pub fn previous(&mut self) -> bool {
        if self.torn_down || !self.state.has_previous() {
            return false;
        }

        self.state.position -= 1;
        self.start_current();
        self.notify();
        true
    }

    /// Steps forward one track and (re)starts playback. Does not wrap.
    pub fn next(&mut self) -> bool {
        if self.torn_down || !self.state.has_next() {
            return false;
        }

        self.state.position += 1;
        self.start_current();
        self.notify();
        true
    }

    /// Reconciles `is_playing` with a status the surface reported on its own,
    /// e.g. the clip ended or the platform blocked playback.
    pub fn on_surface_status(&mut self, status: SurfaceStatus) -> bool {
        if self.torn_down || self.state.current_track().is_none() {
            return false;
        }

        self.set_playing(status.is_playing())
    }

    fn start_current(&mut self) {
        let Some(source) = self.state.current_track().map(|t| t.preview_uri.clone()) else {
            return;
        };

        match self.surface.as_mut() {
            Some(surface) => {
                surface.bind(&source);
                let status = surface.play();
                if status == SurfaceStatus::Refused {
                    warning!("{}", PlayerError::AutoplayRejected(source));
                }
                self.state.is_playing = status.is_playing();
            }
            None => self.state.is_playing = true,
        }
    }

    fn set_playing(&mut self, playing: bool) -> bool {
        if self.state.is_playing == playing {
            return false;
        }

        self.state.is_playing = playing;
        self.notify();
        true
    }

    fn notify(&mut self) {
        let phase = self.phase();
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&self.state, phase);
        }
    }
}
