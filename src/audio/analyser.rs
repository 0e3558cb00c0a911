//! Byte-frequency analysis of PCM windows.

use std::f32::consts::PI;
use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use crate::error::ConfigError;
use crate::params::AnalyserConfig;

/// FFT analyser producing one 0-255 intensity per bin
///
/// Magnitudes are windowed, smoothed over time, converted to decibels and
/// mapped linearly from `[min_decibels, max_decibels]` onto 0-255.
pub struct FrequencyAnalyser {
    config: AnalyserConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
}

impl FrequencyAnalyser {
    pub fn new(config: AnalyserConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let size = config.fft_size();
        let fft = FftPlanner::new().plan_fft_forward(size);

        Ok(Self {
            window: (0..size).map(|i| blackman_window(i, size)).collect(),
            buffer: vec![Complex::new(0.0, 0.0); size],
            smoothed: vec![0.0; config.buffer_width],
            fft,
            config,
        })
    }

    pub fn config(&self) -> &AnalyserConfig {
        &self.config
    }

    /// Analyse the most recent `fft_size` samples
    ///
    /// Shorter input is treated as preceded by silence.
    pub fn analyse(&mut self, samples: &[f32]) -> Vec<u8> {
        let size = self.config.fft_size();
        let recent = &samples[samples.len().saturating_sub(size)..];
        let lead = size - recent.len();

        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = if i < lead { 0.0 } else { recent[i - lead] };
            *slot = Complex::new(sample * self.window[i], 0.0);
        }
        self.fft.process(&mut self.buffer);

        let tau = self.config.smoothing;
        let floor_db = self.config.min_decibels;
        let range = self.config.max_decibels - floor_db;
        let scale = 1.0 / size as f32;

        self.smoothed
            .iter_mut()
            .zip(&self.buffer)
            .map(|(smoothed, bin)| {
                *smoothed = tau * *smoothed + (1.0 - tau) * bin.norm() * scale;
                let db = 20.0 * smoothed.log10();
                let level = 255.0 / range * (db - floor_db);
                // -inf (silence) clamps to 0
                level.floor().clamp(0.0, 255.0) as u8
            })
            .collect()
    }
}

/// Blackman window over a periodic span of `size` samples
fn blackman_window(index: usize, size: usize) -> f32 {
    let x = index as f32 / size as f32;
    0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(bin: usize, size: usize) -> Vec<f32> {
        (0..size)
            .map(|n| (2.0 * PI * bin as f32 * n as f32 / size as f32).sin())
            .collect()
    }

    #[test]
    fn test_blackman_window() {
        assert!(blackman_window(0, 128).abs() < 1e-6);
        assert!((blackman_window(64, 128) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_silence_is_zero() {
        let mut analyser = FrequencyAnalyser::new(AnalyserConfig::default()).unwrap();
        let frame = analyser.analyse(&[0.0; 128]);
        assert_eq!(frame.len(), 64);
        assert!(frame.iter().all(|&b| b == 0));

        // Short input pads instead of failing
        assert_eq!(analyser.analyse(&[]).len(), 64);
    }

    #[test]
    fn test_tone_lights_its_bin() {
        let mut analyser = FrequencyAnalyser::new(AnalyserConfig::default()).unwrap();
        let frame = analyser.analyse(&tone(8, 128));

        assert_eq!(frame[8], 255);
        assert!(frame[7] > 0 && frame[9] > 0);
        assert!(frame[30] < 50);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = AnalyserConfig {
            buffer_width: 24,
            ..AnalyserConfig::default()
        };
        assert!(FrequencyAnalyser::new(config).is_err());
    }
}
