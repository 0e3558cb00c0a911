//! Parameter definitions with world units and documented semantics.
//!
//! All tuning constants live here with:
//! - World units (grid units, seconds, radians per second)
//! - Documented ranges and meanings
//! - Validation at construction so the frame loop never fails

mod audio;
mod camera;
mod detail;
mod landscape;
mod preset;
mod render;
mod wave;

// Re-export all types
pub use audio::AnalyserConfig;
pub use camera::{CameraFollow, SampleOffsets};
pub use detail::{BeatThresholds, DetailKind, DetailParams, FlockParams};
pub use landscape::{ColourStrategy, LandscapeConfig, LandscapeKind, ROW_SPACING};
pub use preset::{VisualPreset, VisualizerConfig};
pub use render::SnapshotConfig;
pub use wave::{WaveAmplitude, WaveTuning};
