//! Offline run and snapshot configuration.

/// Offline run configuration
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Duration to simulate (seconds)
    pub duration_secs: f32,

    /// Output directory for PNG snapshots
    pub output_dir: String,

    /// Simulated display refresh rate (FPS)
    pub fps: u32,

    /// Write a snapshot every N frames (0 disables snapshots)
    pub every_n_frames: usize,

    /// Pixels per grid vertex in snapshots
    pub pixel_scale: u32,
}

impl SnapshotConfig {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            duration_secs,
            output_dir: "snapshots".to_string(),
            fps: 60,
            every_n_frames: 60,
            pixel_scale: 4,
        }
    }

    /// Total number of frames to simulate
    pub fn total_frames(&self) -> usize {
        (self.duration_secs * self.fps as f32).ceil() as usize
    }

    /// Seconds between frames
    pub fn frame_interval(&self) -> f32 {
        1.0 / self.fps as f32
    }

    /// Whether frame `frame_num` should be written out
    pub fn wants_snapshot(&self, frame_num: usize) -> bool {
        self.every_n_frames != 0 && frame_num % self.every_n_frames == 0
    }

    /// Snapshot file path
    pub fn frame_path(&self, frame_num: usize) -> String {
        format!("{}/frame_{:05}.png", self.output_dir, frame_num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_bookkeeping() {
        let config = SnapshotConfig::new(2.5);
        assert_eq!(config.total_frames(), 150);
        assert!(config.wants_snapshot(0));
        assert!(!config.wants_snapshot(59));
        assert!(config.wants_snapshot(120));
        assert_eq!(config.frame_path(7), "snapshots/frame_00007.png");
    }
}
