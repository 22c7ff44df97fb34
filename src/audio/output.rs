// Audio output using cpal
// The callback drains a ring buffer and plays silence while the gate is paused

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream, StreamConfig, SupportedStreamConfig};
use parking_lot::Mutex;
use ringbuf::{
    HeapRb,
    traits::{Consumer, Observer, Producer, Split},
};

use crate::audio::{PlaybackGate, SampleSink};

/// Spotify previews are 44.1 kHz stereo MP3s.
pub const PREFERRED_SAMPLE_RATE: u32 = 44_100;
pub const PREFERRED_CHANNELS: u16 = 2;

type RingProducer = ringbuf::HeapProd<f32>;
type RingConsumer = ringbuf::HeapCons<f32>;

/// Producer side of the ring buffer read by the output stream.
pub struct OutputBuffer {
    producer: Mutex<RingProducer>,
    sample_rate: u32,
    channels: u16,
    clear_flag: Arc<AtomicBool>,
}

impl SampleSink for OutputBuffer {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn channels(&self) -> u16 {
        self.channels
    }

    fn write(&self, samples: &[f32]) -> usize {
        let mut producer = self.producer.lock();
        let mut written = 0;

        for &sample in samples {
            if producer.try_push(sample).is_err() {
                break;
            }
            written += 1;
        }

        written
    }

    fn pending(&self) -> usize {
        self.producer.lock().occupied_len()
    }

    fn clear(&self) {
        // the callback drains on its next run
        self.clear_flag.store(true, Ordering::SeqCst);
    }
}

/// Opens the default output device and starts its stream.
///
/// The returned stream must be kept alive for as long as audio should play.
pub fn open_output(gate: Arc<PlaybackGate>) -> Result<(Stream, Arc<OutputBuffer>), String> {
    let host = cpal::default_host();

    let device = host
        .default_output_device()
        .ok_or("No output device available")?;

    let config = pick_config(&device)?;
    let sample_rate = config.sample_rate().0;
    let channels = config.channels();

    // ~250ms of audio
    let capacity = (sample_rate as usize * channels as usize / 4).max(1024);
    let (producer, consumer) = HeapRb::<f32>::new(capacity).split();

    let clear_flag = Arc::new(AtomicBool::new(false));

    let stream_config: StreamConfig = config.config();
    let stream = match config.sample_format() {
        SampleFormat::F32 => {
            build_stream::<f32>(&device, &stream_config, consumer, gate, clear_flag.clone())?
        }
        SampleFormat::I16 => {
            build_stream::<i16>(&device, &stream_config, consumer, gate, clear_flag.clone())?
        }
        SampleFormat::U16 => {
            build_stream::<u16>(&device, &stream_config, consumer, gate, clear_flag.clone())?
        }
        format => return Err(format!("Unsupported sample format: {:?}", format)),
    };

    stream
        .play()
        .map_err(|e| format!("Failed to start stream: {}", e))?;

    let buffer = OutputBuffer {
        producer: Mutex::new(producer),
        sample_rate,
        channels,
        clear_flag,
    };

    Ok((stream, Arc::new(buffer)))
}

fn pick_config(device: &cpal::Device) -> Result<SupportedStreamConfig, String> {
    let preferred = device.supported_output_configs().ok().and_then(|mut ranges| {
        ranges
            .find(|range| {
                range.channels() == PREFERRED_CHANNELS
                    && range.min_sample_rate().0 <= PREFERRED_SAMPLE_RATE
                    && range.max_sample_rate().0 >= PREFERRED_SAMPLE_RATE
                    && matches!(
                        range.sample_format(),
                        SampleFormat::F32 | SampleFormat::I16 | SampleFormat::U16
                    )
            })
            .map(|range| range.with_sample_rate(cpal::SampleRate(PREFERRED_SAMPLE_RATE)))
    });

    match preferred {
        Some(config) => Ok(config),
        None => device
            .default_output_config()
            .map_err(|e| format!("Failed to get default output config: {}", e)),
    }
}

fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
    device: &cpal::Device,
    config: &StreamConfig,
    mut consumer: RingConsumer,
    gate: Arc<PlaybackGate>,
    clear_flag: Arc<AtomicBool>,
) -> Result<Stream, String> {
    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                if clear_flag.swap(false, Ordering::SeqCst) {
                    while consumer.try_pop().is_some() {}
                }

                // Paused: hold the buffered samples and emit silence
                if gate.is_paused() {
                    for sample in data.iter_mut() {
                        *sample = T::from_sample(0.0f32);
                    }
                    return;
                }

                for sample in data.iter_mut() {
                    *sample = T::from_sample(consumer.try_pop().unwrap_or(0.0));
                }
            },
            move |err| {
                eprintln!("Audio output error: {}", err);
            },
            None,
        )
        .map_err(|e| format!("Failed to build output stream: {}", e))
}
