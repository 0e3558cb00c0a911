//! Frequency analyser configuration.

use crate::error::ConfigError;

/// Byte-frequency analyser configuration
///
/// Mirrors a browser analyser node: one FFT over `2 * buffer_width`
/// samples yields `buffer_width` bins, scaled from decibels to 0-255.
#[derive(Debug, Clone)]
pub struct AnalyserConfig {
    /// Bins delivered per audio frame (matches the landscape resolution)
    pub buffer_width: usize,

    /// Time constant for smoothing between analyses (0 = none, <1)
    pub smoothing: f32,

    /// Decibel level mapped to intensity 0
    pub min_decibels: f32,

    /// Decibel level mapped to intensity 255
    pub max_decibels: f32,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            buffer_width: 64,
            smoothing: 0.8,
            min_decibels: -100.0,
            max_decibels: -30.0,
        }
    }
}

impl AnalyserConfig {
    /// FFT window size (always twice the bin count)
    pub fn fft_size(&self) -> usize {
        self.buffer_width * 2
    }

    /// Convert a bin index to its centre frequency (Hz)
    pub fn bin_to_hz(&self, bin: usize, sample_rate_hz: u32) -> f32 {
        bin as f32 * sample_rate_hz as f32 / self.fft_size() as f32
    }

    /// Validate configuration (FFT size must be a power of 2, etc.)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fft_size().is_power_of_two() || self.buffer_width < 16 {
            return Err(ConfigError::invalid(
                "bufferWidth",
                format!(
                    "must be a power of 2 and at least 16, got {}",
                    self.buffer_width
                ),
            ));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(ConfigError::invalid(
                "smoothing",
                format!("must be in [0, 1), got {}", self.smoothing),
            ));
        }
        if self.min_decibels >= self.max_decibels {
            return Err(ConfigError::invalid(
                "minDecibels",
                "must be below maxDecibels",
            ));
        }
        Ok(())
    }
}
