use std::sync::Arc;
use std::time::Duration;

use jazzbox::audio::{SampleSink, decoder};
use jazzbox::management::{
    AudioSurface, Phase, PlaybackController, PlaybackSurface, SurfaceStatus,
};
use jazzbox::types::Track;
use parking_lot::Mutex;
use reqwest::Client;
use tokio::sync::mpsc::UnboundedReceiver;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Sink that keeps every sample it is given
struct CollectingSink {
    samples: Mutex<Vec<f32>>,
    sample_rate: u32,
    channels: u16,
}

impl CollectingSink {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            samples: Mutex::new(Vec::new()),
            sample_rate: 44_100,
            channels: 2,
        })
    }

    fn len(&self) -> usize {
        self.samples.lock().len()
    }
}

impl SampleSink for CollectingSink {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn write(&self, samples: &[f32]) -> usize {
        self.samples.lock().extend_from_slice(samples);
        samples.len()
    }

    fn pending(&self) -> usize {
        0
    }

    fn clear(&self) {}
}

// 16-bit PCM WAV with a repeating ramp
fn wav_bytes(sample_rate: u32, channels: u16, frames: usize) -> Vec<u8> {
    let data_len = frames * channels as usize * 2;
    let mut out = Vec::with_capacity(44 + data_len);

    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&((36 + data_len) as u32).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * channels as u32 * 2).to_le_bytes());
    out.extend_from_slice(&(channels * 2).to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&(data_len as u32).to_le_bytes());

    for i in 0..frames * channels as usize {
        let value = ((i % 100) as i16 - 50) * 100;
        out.extend_from_slice(&value.to_le_bytes());
    }

    out
}

async fn serve_clip(server: &MockServer, route: &str, body: Vec<u8>, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body)
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

async fn next_event(events: &mut UnboundedReceiver<SurfaceStatus>) -> Option<SurfaceStatus> {
    tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .ok()
        .flatten()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_play_without_source_is_refused() {
    let (mut surface, _events) =
        AudioSurface::with_sink(Client::new(), CollectingSink::new()).unwrap();

    assert!(surface.source().is_none());
    assert_eq!(surface.play(), SurfaceStatus::Refused);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_clip_plays_out_and_reports_paused() {
    let server = MockServer::start().await;
    serve_clip(&server, "/clip.wav", wav_bytes(44_100, 2, 4410), Duration::ZERO).await;

    let sink = CollectingSink::new();
    let (mut surface, mut events) = AudioSurface::with_sink(Client::new(), sink.clone()).unwrap();

    let source = format!("{}/clip.wav", server.uri());
    surface.bind(&source);
    assert_eq!(surface.source(), Some(source.as_str()));
    assert_eq!(surface.play(), SurfaceStatus::Playing);

    assert_eq!(next_event(&mut events).await, Some(SurfaceStatus::Paused));
    assert_eq!(sink.len(), 8820);

    let first = sink.samples.lock()[0];
    assert!((first - (-5000.0 / 32768.0)).abs() < 1e-4);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_pause_holds_output_until_play() {
    let server = MockServer::start().await;
    serve_clip(
        &server,
        "/clip.wav",
        wav_bytes(44_100, 2, 4410),
        Duration::from_millis(200),
    )
    .await;

    let sink = CollectingSink::new();
    let (mut surface, mut events) = AudioSurface::with_sink(Client::new(), sink.clone()).unwrap();

    surface.bind(&format!("{}/clip.wav", server.uri()));
    assert_eq!(surface.play(), SurfaceStatus::Playing);
    assert_eq!(surface.pause(), SurfaceStatus::Paused);
    assert!(surface.is_paused());

    // Clip has arrived by now, nothing may reach the sink
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(sink.len(), 0);
    assert!(events.try_recv().is_err());

    assert_eq!(surface.play(), SurfaceStatus::Playing);
    assert!(!surface.is_paused());

    assert_eq!(next_event(&mut events).await, Some(SurfaceStatus::Paused));
    assert_eq!(sink.len(), 8820);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_play_after_clip_ended_restarts_it() {
    let server = MockServer::start().await;
    serve_clip(&server, "/clip.wav", wav_bytes(44_100, 2, 2205), Duration::ZERO).await;

    let sink = CollectingSink::new();
    let (mut surface, mut events) = AudioSurface::with_sink(Client::new(), sink.clone()).unwrap();

    surface.bind(&format!("{}/clip.wav", server.uri()));
    surface.play();
    assert_eq!(next_event(&mut events).await, Some(SurfaceStatus::Paused));
    assert_eq!(sink.len(), 4410);

    assert_eq!(surface.play(), SurfaceStatus::Playing);
    assert_eq!(next_event(&mut events).await, Some(SurfaceStatus::Paused));
    assert_eq!(sink.len(), 8820);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_clip_is_refused() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone.mp3"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let sink = CollectingSink::new();
    let (mut surface, mut events) = AudioSurface::with_sink(Client::new(), sink.clone()).unwrap();

    surface.bind(&format!("{}/gone.mp3", server.uri()));
    assert_eq!(surface.play(), SurfaceStatus::Playing);

    assert_eq!(next_event(&mut events).await, Some(SurfaceStatus::Refused));
    assert_eq!(sink.len(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_undecodable_clip_is_refused() {
    let server = MockServer::start().await;
    serve_clip(
        &server,
        "/noise.mp3",
        b"definitely not audio".to_vec(),
        Duration::ZERO,
    )
    .await;

    let sink = CollectingSink::new();
    let (mut surface, mut events) = AudioSurface::with_sink(Client::new(), sink.clone()).unwrap();

    surface.bind(&format!("{}/noise.mp3", server.uri()));
    surface.play();

    assert_eq!(next_event(&mut events).await, Some(SurfaceStatus::Refused));
    assert_eq!(sink.len(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rebind_drops_previous_clip() {
    let server = MockServer::start().await;
    serve_clip(
        &server,
        "/first.wav",
        wav_bytes(44_100, 2, 4410),
        Duration::from_millis(200),
    )
    .await;
    serve_clip(&server, "/second.wav", wav_bytes(44_100, 2, 2205), Duration::ZERO).await;

    let sink = CollectingSink::new();
    let (mut surface, mut events) = AudioSurface::with_sink(Client::new(), sink.clone()).unwrap();

    surface.bind(&format!("{}/first.wav", server.uri()));
    surface.play();
    surface.bind(&format!("{}/second.wav", server.uri()));
    surface.play();

    assert_eq!(next_event(&mut events).await, Some(SurfaceStatus::Paused));

    // The first clip finishes downloading later but reports nothing
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(events.try_recv().is_err());
    assert_eq!(sink.len(), 4410);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_mono_clip_is_converted_to_output_format() {
    let server = MockServer::start().await;
    serve_clip(&server, "/mono.wav", wav_bytes(22_050, 1, 2205), Duration::ZERO).await;

    let sink = CollectingSink::new();
    let (mut surface, mut events) = AudioSurface::with_sink(Client::new(), sink.clone()).unwrap();

    surface.bind(&format!("{}/mono.wav", server.uri()));
    surface.play();

    assert_eq!(next_event(&mut events).await, Some(SurfaceStatus::Paused));
    // twice the frames, two channels each
    assert_eq!(sink.len(), 2205 * 2 * 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_controller_follows_clip_end() {
    let server = MockServer::start().await;
    serve_clip(&server, "/clip.wav", wav_bytes(44_100, 2, 2205), Duration::ZERO).await;

    let (surface, mut events) =
        AudioSurface::with_sink(Client::new(), CollectingSink::new()).unwrap();
    let mut controller = PlaybackController::with_surface(surface);
    controller.mount();
    controller.load(vec![Track {
        preview_uri: format!("{}/clip.wav", server.uri()),
        artist: "Miles Davis".to_string(),
        title: "So What".to_string(),
    }]);
    assert_eq!(controller.phase(), Phase::Playing);

    let status = next_event(&mut events).await.unwrap();
    assert!(controller.on_surface_status(status));
    assert_eq!(controller.phase(), Phase::Paused);

    // Toggling replays the clip
    assert!(controller.toggle());
    assert_eq!(controller.phase(), Phase::Playing);
}

#[test]
fn test_remix_mono_to_stereo() {
    let out = decoder::remix(vec![0.1, 0.2], 1, 2);
    assert_eq!(out, vec![0.1, 0.1, 0.2, 0.2]);

    let out = decoder::remix(vec![0.1, 0.2, 0.3, 0.4], 2, 1);
    assert_eq!(out, vec![0.1, 0.3]);
}

#[test]
fn test_resample_doubles_rate() {
    let out = decoder::resample(vec![0.0, 1.0], 1, 1, 2);
    assert_eq!(out, vec![0.0, 0.5, 1.0, 1.0]);

    let same = decoder::resample(vec![0.25, 0.75], 2, 44_100, 44_100);
    assert_eq!(same, vec![0.25, 0.75]);
}
