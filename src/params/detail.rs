//! Decoration, flock and beat detection parameters.

use serde::Deserialize;

/// Kind of decoration scattered over the terrain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailKind {
    Tree,
    Light,
    Foam,
    #[default]
    None,
}

impl DetailKind {
    /// Offset from the anchor vertex to the decoration origin
    pub fn base_offset(self) -> [f32; 3] {
        match self {
            // Foam sits flat just above the surface
            DetailKind::Foam => [0.0, 0.5, 0.0],
            _ => [0.0; 3],
        }
    }

    /// Range of random uniform scale picked at spawn
    pub fn scale_range(self) -> (f32, f32) {
        match self {
            DetailKind::Foam => (0.6, 1.4),
            _ => (1.0, 1.0),
        }
    }
}

impl std::str::FromStr for DetailKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tree" => Ok(DetailKind::Tree),
            "light" => Ok(DetailKind::Light),
            "foam" => Ok(DetailKind::Foam),
            "none" => Ok(DetailKind::None),
            other => Err(format!("unknown detail type '{}'", other)),
        }
    }
}

/// Decoration lifecycle parameters
#[derive(Debug, Clone)]
pub struct DetailParams {
    /// Decoration kind (`None` disables spawning)
    pub kind: DetailKind,

    /// World-space origin added to every spawn position (grid units)
    pub offset: [f32; 3],

    /// Minimum clearance above water for a candidate vertex (grid units)
    pub water_clearance: f32,

    /// Scroll speed along -Z (grid units per second)
    /// One row (5 units) per frame at 60 frames per second
    pub scroll_speed: f32,

    /// Items at or beyond this Z are removed
    pub cull_z: f32,

    /// Resting height of bobbing items (grid units)
    pub bob_base: f32,

    /// Bobbing amplitude (grid units)
    pub bob_amplitude: f32,

    /// Animation phase rate (radians per second)
    pub phase_rate: f32,

    /// Minimum tracked frame rate that still allows spawning
    pub min_fps: f32,
}

impl Default for DetailParams {
    fn default() -> Self {
        Self {
            kind: DetailKind::None,
            offset: [-390.0, 0.0, 115.0],
            water_clearance: 3.0,
            scroll_speed: 300.0,
            cull_z: -400.0,
            bob_base: 1.0,
            bob_amplitude: 0.6,
            phase_rate: 2.0,
            min_fps: 30.0,
        }
    }
}

/// Beat thresholds on raw 0-255 bin intensities
#[derive(Debug, Clone)]
pub struct BeatThresholds {
    /// Number of lowest bins averaged as "bass"
    pub bass_bins: usize,

    /// Bass average that counts as a beat
    pub bass_level: f32,

    /// Whole-frame average that counts as a beat
    pub average_level: f32,
}

impl Default for BeatThresholds {
    fn default() -> Self {
        Self {
            bass_bins: 3,
            bass_level: 190.0,
            average_level: 160.0,
        }
    }
}

/// Birds launched on detected beats
#[derive(Debug, Clone)]
pub struct FlockParams {
    /// Probability that a beat launches a bird (0..1)
    pub spawn_chance: f64,

    /// Lateral spawn half-width around x = 0 (grid units)
    pub spawn_half_width: f32,

    /// Lowest spawn altitude (grid units)
    pub spawn_altitude: f32,

    /// Random extra altitude above `spawn_altitude` (grid units)
    pub altitude_jitter: f32,

    /// Spawn depth (grid units)
    pub spawn_z: f32,

    /// Drift speed along -Z (grid units per second)
    pub drift_speed: f32,

    /// Wing flap phase rate (radians per second)
    pub flap_rate: f32,

    /// Wing flap amplitude (radians)
    pub flap_amplitude: f32,

    /// Birds beyond this Z are removed
    pub cull_z: f32,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            spawn_chance: 0.4,
            spawn_half_width: 50.0,
            spawn_altitude: 70.0,
            altitude_jitter: 20.0,
            spawn_z: 100.0,
            drift_speed: 90.0,
            flap_rate: 5.0,
            flap_amplitude: 0.3,
            cull_z: -400.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_kind_parsing() {
        assert_eq!("Tree".parse::<DetailKind>(), Ok(DetailKind::Tree));
        assert_eq!("foam".parse::<DetailKind>(), Ok(DetailKind::Foam));
        assert!("boat".parse::<DetailKind>().is_err());

        let kind: DetailKind = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(kind, DetailKind::Light);
    }
}
