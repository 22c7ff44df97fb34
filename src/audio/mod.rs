//! Audio playback for preview clips.
//!
//! Previews are decoded with Symphonia and pushed into a [`SampleSink`]. The
//! production sink is a ring buffer drained by a cpal output callback. A
//! [`PlaybackGate`] shared by the decoder and the callback carries the pause
//! flag and the generation of the currently bound source.

pub mod decoder;
pub mod output;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Destination of interleaved `f32` samples.
pub trait SampleSink: Send + Sync {
    fn sample_rate(&self) -> u32;

    fn channels(&self) -> u16;

    /// Writes as many samples as fit without blocking and returns that count.
    fn write(&self, samples: &[f32]) -> usize;

    /// Samples written but not yet played.
    fn pending(&self) -> usize;

    /// Drops everything not yet played.
    fn clear(&self);
}

/// Pause flag and source generation shared with the decoding task and the
/// audio callback.
#[derive(Debug, Default)]
pub struct PlaybackGate {
    paused: AtomicBool,
    running: AtomicBool,
    generation: AtomicU64,
}

impl PlaybackGate {
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::SeqCst);
    }

    /// Whether a decoding task is feeding the current source.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::SeqCst);
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Invalidates the running decoding task, if any, and returns the new
    /// generation.
    pub fn advance(&self) -> u64 {
        self.running.store(false, Ordering::SeqCst);
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation() == generation
    }
}
