//! Audio-modulated wave height field.

use super::grid::TerrainGrid;
use crate::params::WaveTuning;

/// Arithmetic mean of a frame's bin intensities (0 for an empty frame)
pub fn average_intensity(frame: &[u8]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    let sum: u32 = frame.iter().map(|&b| b as u32).sum();
    sum as f32 / frame.len() as f32
}

/// Rewrites every vertex elevation from time and the latest audio frame
///
/// A pure function of `(column, row, elapsed, frame)`: each update
/// overwrites the previous elevations instead of accumulating.
#[derive(Debug, Clone)]
pub struct HeightField {
    tuning: WaveTuning,
}

impl HeightField {
    pub fn new(tuning: WaveTuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> &WaveTuning {
        &self.tuning
    }

    /// Wave phase for an elapsed time
    pub fn phase(&self, elapsed_s: f32) -> f32 {
        elapsed_s * self.tuning.phase_rate
    }

    /// Elevation of one vertex
    ///
    /// # Arguments
    /// * `column` - Column index along the row (0..2 * resolution)
    /// * `row` - Row index
    /// * `phase` - Wave phase from [`HeightField::phase`]
    /// * `amplitude` - Wave amplitude for this frame
    /// * `sample` - Audio intensity feeding this column
    pub fn elevation(&self, column: usize, row: usize, phase: f32, amplitude: f32, sample: u8) -> f32 {
        let t = &self.tuning;
        let wave_x = (column as f32 * t.freq_x + phase).sin();
        let wave_z = (row as f32 * t.freq_z + phase * t.z_phase_factor).cos();
        wave_x * wave_z * amplitude + sample as f32 * t.audio_boost * t.audio_scale
    }

    /// Recompute every elevation in the grid
    ///
    /// Columns read `frame[column % resolution]`; bins missing from a short
    /// frame count as silence.
    ///
    /// # Returns
    /// * The wave amplitude used for this frame
    pub fn update(&self, grid: &mut TerrainGrid, frame: &[u8], elapsed_s: f32) -> f32 {
        let phase = self.phase(elapsed_s);
        let amplitude = self.tuning.amplitude_for(average_intensity(frame));
        let resolution = grid.resolution();

        for (column, row, vertex) in grid.vertices_mut() {
            let sample = frame.get(column % resolution).copied().unwrap_or(0);
            vertex.position[1] = self.elevation(column, row, phase, amplitude, sample);
        }

        amplitude
    }
}
