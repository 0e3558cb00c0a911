//! Terrain-following camera: elevation sampling and damped altitude tracking.

use glam::Vec3;

use crate::params::{CameraFollow, SampleOffsets};
use crate::terrain::TerrainGrid;

/// Samples the grid ahead of the camera for the elevation it should clear
#[derive(Debug, Clone)]
pub struct CameraHeightSampler {
    offsets: SampleOffsets,
    camera_x_range: f32,
}

impl CameraHeightSampler {
    pub fn new(offsets: SampleOffsets, camera_x_range: f32) -> Self {
        Self {
            offsets,
            camera_x_range,
        }
    }

    /// Grid column under a horizontal camera position
    pub fn column_for(&self, grid: &TerrainGrid, camera_x: f32) -> i64 {
        let ratio = grid.resolution() as f32 / self.camera_x_range * self.offsets.x_gain;
        // Anything beyond one row either way lands off the grid and is
        // clamped by the caller; NaN casts to 0
        let reach = grid.row_len() as f32;
        let x_vertex_offset = (camera_x * ratio / grid.units_per_vertex())
            .ceil()
            .clamp(-reach, reach);
        grid.resolution() as i64 + x_vertex_offset as i64
    }

    /// Vertex indices read by [`CameraHeightSampler::sample_target_elevation`]
    ///
    /// Order: far, near, near-left, near-right, underneath. Every index is
    /// clamped onto the grid.
    pub fn sample_indices(&self, grid: &TerrainGrid, camera_x: f32) -> [usize; 5] {
        let column = self.column_for(grid, camera_x);
        let rows = grid.num_rows() as i64;
        let far = rows - self.offsets.far_rows as i64;
        let near = rows - self.offsets.near_rows as i64;
        let underneath = rows - self.offsets.underneath_rows as i64;
        let lateral = self.offsets.lateral_columns as i64;

        [
            grid.clamped_index(column, far),
            grid.clamped_index(column, near),
            grid.clamped_index(column - lateral, near),
            grid.clamped_index(column + lateral, near),
            grid.clamped_index(column, underneath),
        ]
    }

    /// Highest of the five sampled elevations around the camera
    ///
    /// Taking the maximum lets the camera rise ahead of upcoming peaks
    /// instead of reacting only to the ground directly below.
    pub fn sample_target_elevation(&self, grid: &TerrainGrid, camera_x: f32) -> f32 {
        self.sample_indices(grid, camera_x)
            .iter()
            .filter_map(|&i| grid.elevation(i))
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Maximum elevation over `span` rows of one column ending at `last_row`
    ///
    /// Returns `None` for an empty span. Rows and column are clamped onto
    /// the grid.
    pub fn highest_point_in_line(
        grid: &TerrainGrid,
        column: i64,
        last_row: i64,
        span: usize,
    ) -> Option<f32> {
        (0..span as i64)
            .map(|back| grid.clamped_index(column, last_row - back))
            .filter_map(|i| grid.elevation(i))
            .reduce(f32::max)
    }
}

/// Camera that eases its altitude toward a terrain-derived target
#[derive(Debug, Clone)]
pub struct FollowCamera {
    params: CameraFollow,
    altitude: f32,
    acceleration: f32,
    target: f32,
}

impl FollowCamera {
    pub fn new(params: CameraFollow) -> Self {
        let altitude = params.min_altitude;
        Self {
            params,
            altitude,
            acceleration: 0.0,
            target: altitude,
        }
    }

    /// Aim for `terrain_elevation` plus the configured clearance
    pub fn set_terrain_elevation(&mut self, terrain_elevation: f32) {
        self.target = terrain_elevation + self.params.height_above_terrain;
    }

    /// Advance the spring by one display tick
    pub fn step(&mut self) {
        let delta = self.target - self.altitude;
        self.acceleration += delta * self.params.response;
        self.acceleration *= self.params.damping;
        self.altitude = (self.altitude + self.acceleration).max(self.params.min_altitude);
    }

    pub fn altitude(&self) -> f32 {
        self.altitude
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Horizontal position used for terrain sampling
    pub fn x(&self) -> f32 {
        self.params.position_x
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.params.position_x, self.altitude, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_grid(resolution: usize, rows: usize) -> TerrainGrid {
        let mut grid = TerrainGrid::build(resolution, rows, 6.0).unwrap();
        // Elevation = flat index so every sample is distinguishable
        for i in 0..grid.vertex_count() {
            *grid.elevation_mut(i).unwrap() = i as f32;
        }
        grid
    }

    #[test]
    fn test_centre_column() {
        let grid = ramp_grid(64, 105);
        let sampler = CameraHeightSampler::new(SampleOffsets::default(), 75.0);
        assert_eq!(sampler.column_for(&grid, 0.0), 64);

        // 75 * (64 / 75 * 1.2) / 6 = 12.8 → 13
        assert_eq!(sampler.column_for(&grid, 75.0), 77);
        assert_eq!(sampler.column_for(&grid, -75.0), 52);
    }

    #[test]
    fn test_samples_take_maximum() {
        let grid = ramp_grid(64, 105);
        let sampler = CameraHeightSampler::new(SampleOffsets::default(), 75.0);
        let indices = sampler.sample_indices(&grid, 0.0);

        assert_eq!(indices[0], 85 * 128 + 64);
        assert_eq!(indices[1], 95 * 128 + 64);
        assert_eq!(indices[2], 95 * 128 + 62);
        assert_eq!(indices[3], 95 * 128 + 66);
        assert_eq!(indices[4], 100 * 128 + 64);

        // The underneath row is the furthest along the ramp
        let elevation = sampler.sample_target_elevation(&grid, 0.0);
        assert_eq!(elevation, (100 * 128 + 64) as f32);
    }

    #[test]
    fn test_samples_stay_in_bounds() {
        let sampler = CameraHeightSampler::new(SampleOffsets::default(), 75.0);
        for (resolution, rows, upv) in [(64, 105, 6.0), (4, 3, 6.0), (2, 2, 0.1), (8, 12, 1.0)] {
            let grid = TerrainGrid::build(resolution, rows, upv).unwrap();
            let mut x = -75.0;
            while x <= 75.0 {
                for i in sampler.sample_indices(&grid, x) {
                    assert!(i < grid.vertex_count(), "index {} out of range at x={}", i, x);
                }
                assert!(sampler.sample_target_elevation(&grid, x).is_finite());
                x += 2.5;
            }
        }
    }

    #[test]
    fn test_extreme_camera_x_clamps_onto_grid() {
        let grid = ramp_grid(64, 105);
        let sampler = CameraHeightSampler::new(SampleOffsets::default(), 75.0);
        let last_column = grid.row_len() - 1;

        for x in [1.0e30, f32::INFINITY, f32::MAX] {
            let indices = sampler.sample_indices(&grid, x);
            assert_eq!(indices[0], grid.index(last_column, 85));
            assert_eq!(indices[4], grid.index(last_column, 100));
            assert!(sampler.sample_target_elevation(&grid, x).is_finite());
        }
        for x in [-1.0e30, f32::NEG_INFINITY, f32::MIN] {
            let indices = sampler.sample_indices(&grid, x);
            assert_eq!(indices[0], grid.index(0, 85));
            assert_eq!(indices[4], grid.index(0, 100));
            assert!(sampler.sample_target_elevation(&grid, x).is_finite());
        }

        // NaN falls back to the centre column
        assert_eq!(sampler.column_for(&grid, f32::NAN), 64);
    }

    #[test]
    fn test_highest_point_in_line() {
        let mut grid = TerrainGrid::build(2, 6, 1.0).unwrap();
        let column = 1;
        for (row, y) in [(0, 3.0), (1, 9.0), (2, -1.0), (3, 4.0), (4, 2.0), (5, 0.5)] {
            let i = grid.index(column, row);
            *grid.elevation_mut(i).unwrap() = y;
        }

        assert_eq!(CameraHeightSampler::highest_point_in_line(&grid, 1, 4, 0), None);
        assert_eq!(CameraHeightSampler::highest_point_in_line(&grid, 1, 4, 1), Some(2.0));
        assert_eq!(CameraHeightSampler::highest_point_in_line(&grid, 1, 4, 3), Some(4.0));
        assert_eq!(CameraHeightSampler::highest_point_in_line(&grid, 1, 5, 6), Some(9.0));
        // Negative rows clamp onto row 0
        assert_eq!(CameraHeightSampler::highest_point_in_line(&grid, 1, 0, 4), Some(3.0));
    }

    #[test]
    fn test_follow_camera_converges_and_floors() {
        let mut camera = FollowCamera::new(CameraFollow::default());
        camera.set_terrain_elevation(20.0);
        assert_eq!(camera.target(), 25.0);

        for _ in 0..2000 {
            camera.step();
        }
        assert!((camera.altitude() - 25.0).abs() < 0.1);

        camera.set_terrain_elevation(-100.0);
        for _ in 0..2000 {
            camera.step();
            assert!(camera.altitude() >= 6.0);
        }
        assert_eq!(camera.position().y, 6.0);
    }
}
