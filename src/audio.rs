/// Fire-and-forget sound playback and the background track.
///
/// Cues are synthesized into short mono sample buffers and played on a
/// detached sink, so nothing here ever blocks the game loop. A low
/// engine-hum loop plays at half volume on a persistent sink for the
/// whole session, like the original soundtrack. If the audio device
/// cannot be opened the game simply runs silent — the caller holds an
/// `Option<Audio>` and drops cues when it is `None`.
use std::f32::consts::TAU;

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

use road_racer::entities::AudioCue;

const SAMPLE_RATE: u32 = 44_100;

/// Background-track volume, relative to the cues.
const MUSIC_VOLUME: f32 = 0.5;

pub struct Audio {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    /// Keeps the looping background track alive for the session.
    _music: Option<Sink>,
}

impl Audio {
    pub fn new() -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        let music = start_music(&handle);
        Ok(Self {
            _stream: stream,
            handle,
            _music: music,
        })
    }

    pub fn play(&self, cue: AudioCue) {
        let samples = match cue {
            AudioCue::Spawn => spawn_samples(),
            AudioCue::Crash => crash_samples(),
        };
        // A failed sink just means this one cue is lost; no reason to
        // disturb the game over it.
        if let Ok(sink) = Sink::try_new(&self.handle) {
            sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
            sink.detach();
        }
    }
}

/// Start the engine-hum loop on its own half-volume sink. Failure to
/// create the sink only costs the music, not the cues.
fn start_music(handle: &OutputStreamHandle) -> Option<Sink> {
    let sink = Sink::try_new(handle).ok()?;
    sink.set_volume(MUSIC_VOLUME);
    sink.append(SamplesBuffer::new(1, SAMPLE_RATE, music_samples()).repeat_infinite());
    Some(sink)
}

/// Two-second engine-hum loop: two low harmonics under a slow throb.
/// Every component frequency completes whole cycles over the loop, so
/// the seam is click-free when repeated.
fn music_samples() -> Vec<f32> {
    let duration = 2.0;
    let count = (SAMPLE_RATE as f32 * duration) as usize;
    let mut samples = Vec::with_capacity(count);
    for i in 0..count {
        let t = i as f32 / SAMPLE_RATE as f32;
        let hum = (TAU * 55.0 * t).sin() * 0.5 + (TAU * 110.0 * t).sin() * 0.3;
        let throb = 0.8 + 0.2 * (TAU * 2.0 * t).sin();
        samples.push(hum * throb * 0.35);
    }
    samples
}

/// Short rising blip for an enemy re-entering at the top of the road.
fn spawn_samples() -> Vec<f32> {
    sweep(0.09, 600.0, 2200.0, 0.15)
}

/// Longer falling tone for the crash.
fn crash_samples() -> Vec<f32> {
    sweep(0.5, 400.0, 60.0, 0.25)
}

/// Linear frequency sweep with a linear fade-out, rendered as mono f32
/// samples. Phase accumulates per sample so the sweep stays click-free.
fn sweep(duration: f32, from_hz: f32, to_hz: f32, volume: f32) -> Vec<f32> {
    let count = (SAMPLE_RATE as f32 * duration) as usize;
    let mut samples = Vec::with_capacity(count);
    let mut phase = 0.0f32;
    for i in 0..count {
        let t = i as f32 / count as f32;
        let freq = from_hz + (to_hz - from_hz) * t;
        phase += TAU * freq / SAMPLE_RATE as f32;
        samples.push(phase.sin() * volume * (1.0 - t));
    }
    samples
}
