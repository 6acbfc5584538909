use anyhow::{Context, Result};
use rodio::buffer::SamplesBuffer;
use rodio::{Decoder, Source};
use std::f32::consts::TAU;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Sample rate of synthesized clips
pub const SAMPLE_RATE: u32 = 44_100;

/// Fully decoded audio, cheap to clone and replay
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    channels: u16,
    sample_rate: u32,
    samples: Arc<[f32]>,
}

impl Clip {
    pub fn mono(samples: Vec<f32>) -> Self {
        Self {
            channels: 1,
            sample_rate: SAMPLE_RATE,
            samples: samples.into(),
        }
    }

    /// Decode a sound file completely into memory
    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Failed to open sound file {:?}", path))?;
        let decoder = Decoder::new(BufReader::new(file))
            .with_context(|| format!("Failed to decode sound file {:?}", path))?;

        let channels = decoder.channels();
        let sample_rate = decoder.sample_rate();
        let samples: Vec<f32> = decoder.convert_samples::<f32>().collect();

        Ok(Self {
            channels,
            sample_rate,
            samples: samples.into(),
        })
    }

    /// Sine tone with a linear fade-out
    pub fn tone(frequency: f32, duration: Duration, volume: f32) -> Self {
        Self::mono(render_tone(frequency, duration, volume))
    }

    /// Notes played back to back; a frequency of 0 is a rest
    pub fn sequence(notes: &[(f32, u64)], volume: f32) -> Self {
        let samples = notes
            .iter()
            .flat_map(|&(frequency, millis)| {
                render_tone(frequency, Duration::from_millis(millis), volume)
            })
            .collect();
        Self::mono(samples)
    }

    /// A fresh playable source over the clip's samples
    pub fn source(&self) -> SamplesBuffer<f32> {
        SamplesBuffer::new(self.channels, self.sample_rate, self.samples.to_vec())
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration(&self) -> Duration {
        let frames = self.samples.len() as f64 / f64::from(self.channels.max(1));
        Duration::from_secs_f64(frames / f64::from(self.sample_rate.max(1)))
    }
}

fn render_tone(frequency: f32, duration: Duration, volume: f32) -> Vec<f32> {
    let count = (SAMPLE_RATE as f32 * duration.as_secs_f32()) as usize;
    if frequency <= 0.0 {
        return vec![0.0; count];
    }

    (0..count)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let envelope = 1.0 - i as f32 / count as f32;
            (TAU * frequency * t).sin() * volume * envelope
        })
        .collect()
}
