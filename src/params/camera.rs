//! Follow camera and terrain sampling configuration.

/// Damped spring that lifts the camera over upcoming terrain
#[derive(Debug, Clone)]
pub struct CameraFollow {
    /// Height kept above the sampled terrain (grid units)
    pub height_above_terrain: f32,

    /// Fraction of the remaining distance added to the acceleration each tick
    pub response: f32,

    /// Per-tick damping applied to the acceleration (0..1)
    pub damping: f32,

    /// Hard floor for camera altitude (grid units)
    pub min_altitude: f32,

    /// Horizontal camera position relative to the grid centre
    pub position_x: f32,
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self {
            height_above_terrain: 5.0,
            response: 0.01,
            damping: 0.9,
            min_altitude: 6.0,
            position_x: 0.0,
        }
    }
}

/// Where the camera height sampler looks, counted back from the last row
#[derive(Debug, Clone)]
pub struct SampleOffsets {
    /// Rows back from the end for the far sample
    pub far_rows: usize,

    /// Rows back from the end for the near samples
    pub near_rows: usize,

    /// Rows back from the end for the sample under the camera
    pub underneath_rows: usize,

    /// Column offset of the near-left and near-right samples
    pub lateral_columns: usize,

    /// Gain applied to the camera-to-column ratio
    pub x_gain: f32,
}

impl Default for SampleOffsets {
    fn default() -> Self {
        Self {
            far_rows: 20,
            near_rows: 10,
            underneath_rows: 5,
            lateral_columns: 2,
            x_gain: 1.2,
        }
    }
}
