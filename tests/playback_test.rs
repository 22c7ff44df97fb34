use std::{cell::RefCell, rc::Rc};

use jazzbox::management::{Phase, PlaybackController, PlaybackSurface, SurfaceStatus};
use jazzbox::types::Track;

// Surface that records every command and can be told to refuse playback
#[derive(Default)]
struct RecordingSurface {
    source: Option<String>,
    refuse_play: bool,
    commands: Rc<RefCell<Vec<String>>>,
}

impl PlaybackSurface for RecordingSurface {
    fn bind(&mut self, source: &str) {
        self.commands.borrow_mut().push(format!("bind {source}"));
        self.source = Some(source.to_string());
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn play(&mut self) -> SurfaceStatus {
        self.commands.borrow_mut().push("play".to_string());
        if self.refuse_play {
            SurfaceStatus::Refused
        } else {
            SurfaceStatus::Playing
        }
    }

    fn pause(&mut self) -> SurfaceStatus {
        self.commands.borrow_mut().push("pause".to_string());
        SurfaceStatus::Paused
    }
}

fn create_test_track(uri: &str, title: &str) -> Track {
    Track {
        preview_uri: uri.to_string(),
        artist: format!("{title} artist"),
        title: title.to_string(),
    }
}

fn three_tracks() -> Vec<Track> {
    vec![
        create_test_track("u1", "One"),
        create_test_track("u2", "Two"),
        create_test_track("u3", "Three"),
    ]
}

// Controller mounted and loaded with the given tracks
fn loaded_controller(tracks: Vec<Track>) -> PlaybackController<RecordingSurface> {
    let mut controller = PlaybackController::with_surface(RecordingSurface::default());
    controller.mount();
    controller.load(tracks);
    controller
}

#[test]
fn test_new_controller_is_uninitialized() {
    let controller: PlaybackController<RecordingSurface> = PlaybackController::new();
    assert_eq!(controller.phase(), Phase::Uninitialized);
    assert!(!controller.is_mounted());
    assert!(controller.bound_source().is_none());
}

#[test]
fn test_mount_enters_awaiting_token() {
    let mut controller = PlaybackController::with_surface(RecordingSurface::default());
    controller.mount();
    assert_eq!(controller.phase(), Phase::AwaitingToken);
    assert!(controller.is_mounted());

    // Mounting twice changes nothing
    controller.mount();
    assert_eq!(controller.phase(), Phase::AwaitingToken);
}

#[test]
fn test_load_three_tracks_starts_first() {
    let controller = loaded_controller(three_tracks());

    let state = controller.state();
    assert_eq!(state.playlist.len(), 3);
    assert_eq!(
        state
            .playlist
            .iter()
            .map(|t| t.preview_uri.as_str())
            .collect::<Vec<_>>(),
        vec!["u1", "u2", "u3"]
    );
    assert_eq!(state.position, 0);
    assert!(state.is_playing);
    assert_eq!(controller.phase(), Phase::Playing);
    assert_eq!(controller.bound_source(), Some("u1"));
}

#[test]
fn test_load_drops_tracks_without_preview() {
    let controller = loaded_controller(vec![
        create_test_track("u1", "One"),
        create_test_track("", "No preview"),
    ]);

    assert_eq!(controller.state().playlist.len(), 1);
    assert_eq!(controller.state().position, 0);
    assert_eq!(controller.bound_source(), Some("u1"));
}

#[test]
fn test_empty_playlist_makes_transport_inert() {
    let mut controller = loaded_controller(Vec::new());
    assert_eq!(controller.phase(), Phase::NoPlayableTrack);

    assert!(!controller.toggle());
    assert!(!controller.next());
    assert!(!controller.previous());
    assert!(!controller.play());
    assert!(!controller.pause());

    assert_eq!(controller.phase(), Phase::NoPlayableTrack);
    assert!(!controller.state().is_playing);
    assert!(controller.bound_source().is_none());
}

#[test]
fn test_toggle_on_empty_playlist_leaves_surface_untouched() {
    let surface = RecordingSurface::default();
    let commands = surface.commands.clone();
    let mut controller = PlaybackController::with_surface(surface);
    controller.mount();
    controller.load(Vec::new());

    let notified = Rc::new(RefCell::new(0));
    let counter = notified.clone();
    controller.subscribe(move |_, _| *counter.borrow_mut() += 1);

    assert!(!controller.toggle());
    assert!(!controller.toggle());

    assert!(commands.borrow().is_empty());
    assert_eq!(*notified.borrow(), 0);
    assert_eq!(controller.phase(), Phase::NoPlayableTrack);
}

#[test]
fn test_next_stops_at_last_track() {
    let mut controller = loaded_controller(three_tracks());

    assert!(controller.next());
    assert!(controller.next());
    assert!(!controller.next());

    assert_eq!(controller.state().position, 2);
    assert!(controller.state().is_playing);
    assert_eq!(controller.bound_source(), Some("u3"));
}

#[test]
fn test_next_at_last_track_keeps_paused_state() {
    let mut controller = loaded_controller(three_tracks());
    controller.next();
    controller.next();
    controller.pause();

    assert!(!controller.next());
    assert_eq!(controller.state().position, 2);
    assert!(!controller.state().is_playing);
}

#[test]
fn test_previous_at_first_track_is_noop() {
    let mut controller = loaded_controller(three_tracks());
    controller.pause();

    assert!(!controller.previous());
    assert_eq!(controller.state().position, 0);
    assert!(!controller.state().is_playing);
    assert_eq!(controller.bound_source(), Some("u1"));
}

#[test]
fn test_track_change_restarts_playback() {
    let mut controller = loaded_controller(three_tracks());
    controller.pause();
    assert_eq!(controller.phase(), Phase::Paused);

    assert!(controller.next());
    assert!(controller.state().is_playing);
    assert_eq!(controller.bound_source(), Some("u2"));

    controller.pause();
    assert!(controller.previous());
    assert!(controller.state().is_playing);
    assert_eq!(controller.state().position, 0);
    assert_eq!(controller.bound_source(), Some("u1"));
}

#[test]
fn test_toggle_twice_restores_state() {
    let mut controller = loaded_controller(three_tracks());
    controller.next();

    let before = controller.state().clone();
    let source_before = controller.bound_source().map(str::to_string);

    assert!(controller.toggle());
    assert!(!controller.state().is_playing);
    assert!(controller.toggle());

    assert_eq!(controller.state(), &before);
    assert_eq!(controller.bound_source().map(str::to_string), source_before);
}

#[test]
fn test_toggle_issues_surface_commands() {
    let commands = Rc::new(RefCell::new(Vec::new()));
    let surface = RecordingSurface {
        commands: Rc::clone(&commands),
        ..Default::default()
    };
    let mut controller = PlaybackController::with_surface(surface);
    controller.mount();
    controller.load(three_tracks());
    controller.toggle();
    controller.toggle();

    assert_eq!(
        *commands.borrow(),
        vec!["bind u1", "play", "pause", "play"]
    );
}

#[test]
fn test_toggle_without_surface_is_noop() {
    let mut controller: PlaybackController<RecordingSurface> = PlaybackController::new();
    controller.mount();
    controller.load(three_tracks());

    // Loading still starts the first track
    assert!(controller.state().is_playing);

    assert!(!controller.toggle());
    assert!(controller.state().is_playing);

    // Track changes still move the position
    assert!(controller.next());
    assert_eq!(controller.state().position, 1);
}

#[test]
fn test_refused_autoplay_is_reconciled() {
    let surface = RecordingSurface {
        refuse_play: true,
        ..Default::default()
    };
    let mut controller = PlaybackController::with_surface(surface);
    controller.mount();
    controller.load(three_tracks());

    assert_eq!(controller.bound_source(), Some("u1"));
    assert!(!controller.state().is_playing);
    assert_eq!(controller.phase(), Phase::Paused);

    // A refused play does not flip the state either
    assert!(!controller.play());
    assert!(!controller.state().is_playing);
}

#[test]
fn test_surface_status_events_update_state() {
    let mut controller = loaded_controller(three_tracks());

    assert!(controller.on_surface_status(SurfaceStatus::Paused));
    assert_eq!(controller.phase(), Phase::Paused);

    assert!(!controller.on_surface_status(SurfaceStatus::Paused));

    assert!(controller.on_surface_status(SurfaceStatus::Playing));
    assert_eq!(controller.phase(), Phase::Playing);
}

#[test]
fn test_subscribers_notified_on_change_only() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut controller = PlaybackController::with_surface(RecordingSurface::default());

    let sink = Rc::clone(&seen);
    controller.subscribe(move |state, phase| {
        sink.borrow_mut().push((state.position, state.is_playing, phase));
    });

    controller.mount();
    controller.load(three_tracks());
    controller.previous(); // no-op at position 0
    controller.next();
    controller.toggle();

    assert_eq!(
        *seen.borrow(),
        vec![
            (0, false, Phase::AwaitingToken),
            (0, true, Phase::Playing),
            (1, true, Phase::Playing),
            (1, false, Phase::Paused),
        ]
    );
}

#[test]
fn test_load_after_unmount_is_ignored() {
    let mut controller = PlaybackController::with_surface(RecordingSurface::default());
    controller.mount();
    controller.unmount();
    controller.load(three_tracks());

    assert!(!controller.is_mounted());
    assert_eq!(controller.phase(), Phase::AwaitingToken);
    assert!(controller.state().playlist.is_empty());
    assert!(controller.bound_source().is_none());
}

#[test]
fn test_transport_after_unmount_is_ignored() {
    let mut controller = loaded_controller(three_tracks());
    controller.unmount();

    assert!(!controller.next());
    assert!(!controller.toggle());
    assert_eq!(controller.state().position, 0);
    assert!(controller.state().is_playing);
}

#[test]
fn test_second_load_is_ignored() {
    let mut controller = loaded_controller(three_tracks());
    controller.load(vec![create_test_track("other", "Other")]);

    assert_eq!(controller.state().playlist.len(), 3);
    assert_eq!(controller.bound_source(), Some("u1"));
}

#[test]
fn test_load_before_mount_is_ignored() {
    let mut controller = PlaybackController::with_surface(RecordingSurface::default());
    controller.load(three_tracks());

    assert_eq!(controller.phase(), Phase::Uninitialized);
    assert!(controller.state().playlist.is_empty());
}
