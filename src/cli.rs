//! Command-line argument parsing.

use clap::Parser;

use crate::error::ConfigError;
use crate::params::{SnapshotConfig, VisualPreset, VisualizerConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "wavescape")]
#[command(about = "Audio-reactive terrain rendered to PNG snapshots", long_about = None)]
pub struct Args {
    /// Visual preset: hills, volcano, crystal, seasky, vapor
    #[arg(long, value_name = "PRESET", default_value = "hills")]
    pub preset: VisualPreset,

    /// JSON configuration file (overrides --preset)
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// WAV file to analyse (a synthetic pulse is used otherwise)
    #[arg(long, value_name = "FILE")]
    pub wav: Option<String>,

    /// Tempo of the synthetic pulse
    #[arg(long, value_name = "BPM", default_value_t = 120.0)]
    pub bpm: f32,

    /// Seconds to simulate
    #[arg(long, value_name = "SECONDS", default_value_t = 10.0)]
    pub duration: f32,

    /// Simulated display refresh rate
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Seed for decoration and flock randomness
    #[arg(long)]
    pub seed: Option<u64>,

    /// Horizontal camera position used for terrain sampling
    #[arg(long, value_name = "X", allow_negative_numbers = true)]
    pub camera_x: Option<f32>,

    /// Write a snapshot every N frames (0 disables snapshots)
    #[arg(long, value_name = "N", default_value_t = 60)]
    pub snapshot_every: usize,

    /// Snapshot output directory
    #[arg(long, value_name = "DIR", default_value = "snapshots")]
    pub output: String,
}

impl Args {
    /// Resolve the visualizer configuration from the preset or config file
    pub fn visualizer_config(&self) -> Result<VisualizerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => VisualizerConfig::load(path)?,
            None => VisualizerConfig::from_preset(self.preset),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(x) = self.camera_x {
            let range = config.landscape.camera_x_range;
            if x.abs() > range {
                return Err(ConfigError::invalid(
                    "cameraX",
                    format!("{} lies outside +/-{}", x, range),
                ));
            }
            config.camera.position_x = x;
        }
        Ok(config)
    }

    pub fn snapshot_config(&self) -> Result<SnapshotConfig, ConfigError> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(ConfigError::invalid("duration", "must be positive"));
        }
        if self.fps == 0 {
            return Err(ConfigError::invalid("fps", "must be positive"));
        }
        Ok(SnapshotConfig {
            output_dir: self.output.clone(),
            fps: self.fps,
            every_n_frames: self.snapshot_every,
            ..SnapshotConfig::new(self.duration)
        })
    }
}
