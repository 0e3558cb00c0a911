//! Mono PCM tracks played into the analyser.

use std::f32::consts::PI;
use std::path::Path;

use log::info;

use crate::error::AudioError;

/// Decoded mono track held fully in memory
#[derive(Debug, Clone)]
pub struct WavTrack {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl WavTrack {
    pub fn from_samples(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Decode a WAV file, mixing all channels down to mono
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AudioError> {
        let path = path.as_ref();
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
            hound::SampleFormat::Int => {
                let scale = 1.0 / (1u64 << (spec.bits_per_sample.max(1) - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 * scale))
                    .collect::<Result<_, _>>()?
            }
        };

        let channels = usize::from(spec.channels.max(1));
        let samples: Vec<f32> = interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect();
        if samples.is_empty() {
            return Err(AudioError::Empty {
                path: path.display().to_string(),
            });
        }

        info!(
            "Loaded {}: {} channel(s) @ {}Hz, {:.1}s",
            path.display(),
            spec.channels,
            spec.sample_rate,
            samples.len() as f32 / spec.sample_rate as f32
        );
        Ok(Self::from_samples(samples, spec.sample_rate))
    }

    /// Synthetic stand-in: a decaying bass kick on every beat over a low hum
    pub fn pulse(sample_rate: u32, duration_s: f32, bpm: f32) -> Self {
        let beat_s = 60.0 / bpm.max(1.0);
        let len = (duration_s.max(0.0) * sample_rate as f32) as usize;
        let samples = (0..len)
            .map(|n| {
                let t = n as f32 / sample_rate as f32;
                let since_beat = t % beat_s;
                let kick = (-since_beat * 12.0).exp() * (2.0 * PI * 55.0 * since_beat).sin();
                let hum = 0.1 * (2.0 * PI * 220.0 * t).sin();
                0.8 * kick + hum
            })
            .collect();
        Self::from_samples(samples, sample_rate)
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

    pub fn duration_s(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate.max(1) as f32
    }

    /// Up to `len` samples ending at playback time `time_s`
    ///
    /// Clipped at the start of the track; empty past its end.
    pub fn window_ending_at(&self, time_s: f64, len: usize) -> &[f32] {
        let end = (time_s.max(0.0) * self.sample_rate as f64) as usize;
        if end > self.samples.len() {
            return &[];
        }
        &self.samples[end.saturating_sub(len)..end]
    }
}
