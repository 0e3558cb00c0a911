//! Wavescape library - audio-reactive terrain with a terrain-following
//! camera and short-lived decorations

pub mod audio;
pub mod camera;
pub mod cli;
pub mod clock;
pub mod details;
pub mod error;
pub mod params;
pub mod rendering;
pub mod terrain;
pub mod visualizer;
