//! Height field wave tuning.

use serde::Deserialize;

/// How the wave term's amplitude is chosen each frame
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WaveAmplitude {
    /// Constant wave height (grid units)
    Fixed(f32),

    /// `base + mean(frame) * audio_boost`, so louder passages swell the waves
    AudioDriven { base: f32 },
}

/// Deterministic wave function parameters for the height field
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveTuning {
    /// Spatial frequency along a row (radians per column)
    pub freq_x: f32,

    /// Spatial frequency across rows (radians per row)
    pub freq_z: f32,

    /// Temporal phase rate (radians per second of elapsed time)
    pub phase_rate: f32,

    /// Multiplier applied to the phase in the row term
    pub z_phase_factor: f32,

    /// Wave amplitude strategy
    pub amplitude: WaveAmplitude,

    /// Audio influence on elevation and on audio-driven amplitude
    pub audio_boost: f32,

    /// Extra scale on the per-bin audio term
    pub audio_scale: f32,
}

impl WaveTuning {
    /// Rolling hills: amplitude swells with the average loudness
    pub fn classic() -> Self {
        Self {
            freq_x: 0.25,
            freq_z: 0.15,
            phase_rate: 2.0,
            z_phase_factor: 1.5,
            amplitude: WaveAmplitude::AudioDriven { base: 4.0 },
            audio_boost: 0.2,
            audio_scale: 0.1,
        }
    }

    /// Calmer swell with a fixed 10-unit amplitude
    pub fn inverted() -> Self {
        Self {
            phase_rate: 1.0,
            amplitude: WaveAmplitude::Fixed(10.0),
            ..Self::classic()
        }
    }

    /// Wave amplitude for a frame with the given mean intensity
    pub fn amplitude_for(&self, average_intensity: f32) -> f32 {
        match self.amplitude {
            WaveAmplitude::Fixed(height) => height,
            WaveAmplitude::AudioDriven { base } => base + average_intensity * self.audio_boost,
        }
    }
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self::classic()
    }
}
