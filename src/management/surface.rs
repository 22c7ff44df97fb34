use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    audio::{
        PlaybackGate, SampleSink,
        decoder::{self, AudioDecoder},
        output,
    },
    error::{PlayerError, PlayerResult},
    warning,
};

/// How long the decoding task waits for room in a full or paused sink.
const FEED_BACKOFF: Duration = Duration::from_millis(5);

/// Status a playback surface reports after a command or on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceStatus {
    Playing,
    Paused,
    /// The surface could not start or continue playback (e.g. autoplay
    /// blocked, the clip failed to download or decode).
    Refused,
}

impl SurfaceStatus {
    pub fn is_playing(self) -> bool {
        self == SurfaceStatus::Playing
    }
}

/// The single audio output the controller commands.
///
/// Commands return the status the surface actually reached, which may differ
/// from what was asked for.
pub trait PlaybackSurface {
    /// Points the surface at a new preview resource.
    fn bind(&mut self, source: &str);

    /// Currently bound preview resource.
    fn source(&self) -> Option<&str>;

    fn play(&mut self) -> SurfaceStatus;

    fn pause(&mut self) -> SurfaceStatus;
}

/// Plays previews through the default audio output device.
///
/// The bound clip is downloaded and decoded on the tokio runtime and fed into
/// a [`SampleSink`]. `pause` halts the output callback and the decoder in
/// place; `play` resumes from the same spot, or restarts the clip once it has
/// played out. Status changes the surface reaches on its own (clip ended,
/// download or decode failed) are sent on the channel returned by the
/// constructor.
pub struct AudioSurface {
    client: Client,
    runtime: Handle,
    source: Option<String>,
    started: Option<String>,
    gate: Arc<PlaybackGate>,
    sink: Option<Arc<dyn SampleSink>>,
    // keeps the device stream alive
    stream: Option<cpal::Stream>,
    events: UnboundedSender<SurfaceStatus>,
}

impl AudioSurface {
    /// Surface on the default output device. The device is opened on the
    /// first `play`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(client: Client) -> PlayerResult<(Self, UnboundedReceiver<SurfaceStatus>)> {
        Self::build(client, None)
    }

    /// Surface writing into `sink` instead of an output device.
    pub fn with_sink(
        client: Client,
        sink: Arc<dyn SampleSink>,
    ) -> PlayerResult<(Self, UnboundedReceiver<SurfaceStatus>)> {
        Self::build(client, Some(sink))
    }

    fn build(
        client: Client,
        sink: Option<Arc<dyn SampleSink>>,
    ) -> PlayerResult<(Self, UnboundedReceiver<SurfaceStatus>)> {
        let runtime = Handle::try_current().map_err(|e| PlayerError::Audio(e.to_string()))?;
        let (events, receiver) = mpsc::unbounded_channel();

        let surface = Self {
            client,
            runtime,
            source: None,
            started: None,
            gate: Arc::new(PlaybackGate::default()),
            sink,
            stream: None,
            events,
        };

        Ok((surface, receiver))
    }

    pub fn is_paused(&self) -> bool {
        self.gate.is_paused()
    }

    fn ensure_sink(&mut self) -> PlayerResult<Arc<dyn SampleSink>> {
        if let Some(sink) = &self.sink {
            return Ok(sink.clone());
        }

        let (stream, buffer) =
            output::open_output(self.gate.clone()).map_err(PlayerError::Audio)?;
        let sink: Arc<dyn SampleSink> = buffer;
        self.stream = Some(stream);
        self.sink = Some(sink.clone());
        Ok(sink)
    }
}

impl PlaybackSurface for AudioSurface {
    fn bind(&mut self, source: &str) {
        self.gate.advance();
        if let Some(sink) = &self.sink {
            sink.clear();
        }
        self.source = Some(source.to_string());
        self.started = None;
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn play(&mut self) -> SurfaceStatus {
        let Some(source) = self.source.clone() else {
            return SurfaceStatus::Refused;
        };

        let sink = match self.ensure_sink() {
            Ok(sink) => sink,
            Err(e) => {
                warning!("{}", e);
                return SurfaceStatus::Refused;
            }
        };

        if self.started.as_deref() != Some(source.as_str()) || !self.gate.is_running() {
            let generation = self.gate.advance();
            sink.clear();
            self.gate.set_running(true);
            self.started = Some(source.clone());
            self.runtime.spawn(feed(FeedJob {
                client: self.client.clone(),
                source,
                generation,
                gate: self.gate.clone(),
                sink,
                events: self.events.clone(),
            }));
        }

        self.gate.set_paused(false);
        SurfaceStatus::Playing
    }

    fn pause(&mut self) -> SurfaceStatus {
        self.gate.set_paused(true);
        SurfaceStatus::Paused
    }
}

impl Drop for AudioSurface {
    fn drop(&mut self) {
        self.gate.advance();
    }
}

struct FeedJob {
    client: Client,
    source: String,
    generation: u64,
    gate: Arc<PlaybackGate>,
    sink: Arc<dyn SampleSink>,
    events: UnboundedSender<SurfaceStatus>,
}

/// Downloads, decodes and plays one clip, then reports how it ended unless
/// the surface moved on to another source meanwhile.
async fn feed(job: FeedJob) {
    let outcome = match fetch_clip(&job.client, &job.source).await {
        Ok(bytes) => {
            let gate = job.gate.clone();
            let sink = job.sink.clone();
            let generation = job.generation;
            tokio::task::spawn_blocking(move || {
                play_clip(bytes, generation, &gate, sink.as_ref())
            })
            .await
            .unwrap_or_else(|e| Err(e.to_string()))
        }
        Err(e) => Err(e.to_string()),
    };

    if !job.gate.is_current(job.generation) {
        return;
    }
    job.gate.set_running(false);

    let status = match outcome {
        Ok(()) => SurfaceStatus::Paused,
        Err(e) => {
            warning!(
                "{}",
                PlayerError::Audio(format!("{} ({})", e, job.source))
            );
            SurfaceStatus::Refused
        }
    };

    // the receiver is gone once the session ended
    let _ = job.events.send(status);
}

async fn fetch_clip(client: &Client, source: &str) -> Result<Vec<u8>, reqwest::Error> {
    let bytes = client
        .get(source)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    Ok(bytes.to_vec())
}

fn play_clip(
    bytes: Vec<u8>,
    generation: u64,
    gate: &PlaybackGate,
    sink: &dyn SampleSink,
) -> Result<(), String> {
    let mut clip = AudioDecoder::from_bytes(bytes)?;
    let out_rate = sink.sample_rate();
    let out_channels = sink.channels() as usize;

    while let Some(samples) = clip.decode_next()? {
        let samples = decoder::remix(samples, clip.channels(), out_channels);
        let samples = decoder::resample(samples, out_channels, clip.sample_rate(), out_rate);

        let mut remaining = samples.as_slice();
        while !remaining.is_empty() {
            if !gate.is_current(generation) {
                return Ok(());
            }

            let written = if gate.is_paused() {
                0
            } else {
                sink.write(remaining)
            };
            remaining = &remaining[written..];

            if written == 0 {
                std::thread::sleep(FEED_BACKOFF);
            }
        }
    }

    // let the buffered tail play out
    while sink.pending() > 0 && gate.is_current(generation) {
        std::thread::sleep(FEED_BACKOFF);
    }

    Ok(())
}
