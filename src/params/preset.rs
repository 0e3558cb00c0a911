//! Named visual presets and the top-level visualizer configuration.

use serde::Deserialize;

use super::camera::{CameraFollow, SampleOffsets};
use super::detail::{BeatThresholds, DetailKind, DetailParams, FlockParams};
use super::landscape::{LandscapeConfig, LandscapeKind, RawLandscape};
use super::wave::WaveTuning;
use crate::error::ConfigError;
use crate::terrain::Colour;

/// Default RNG seed for decoration and flock placement
const DEFAULT_SEED: u64 = 42;

/// Named looks bundling palette, landscape flavour and decorations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualPreset {
    Hills,
    Volcano,
    Crystal,
    SeaSky,
    Vapor,
}

impl VisualPreset {
    pub const ALL: [VisualPreset; 5] = [
        VisualPreset::Hills,
        VisualPreset::Volcano,
        VisualPreset::Crystal,
        VisualPreset::SeaSky,
        VisualPreset::Vapor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            VisualPreset::Hills => "hills",
            VisualPreset::Volcano => "volcano",
            VisualPreset::Crystal => "crystal",
            VisualPreset::SeaSky => "seasky",
            VisualPreset::Vapor => "vapor",
        }
    }

    fn palette(self) -> [u32; 7] {
        match self {
            VisualPreset::Hills => [
                0x339900, 0x72b84f, 0xcce5bf, 0xe5f2df, 0xf2f8ef, 0xffffff, 0xefdd6f,
            ],
            VisualPreset::Volcano => [
                0x221111, 0x442222, 0x9c2a00, 0xcf5f10, 0xcf1020, 0xcf1020, 0xcf5f10,
            ],
            VisualPreset::Crystal => [
                0x00ffff, 0x66ffff, 0x99ccff, 0xccddff, 0xffffff, 0xeeeeff, 0xddddff,
            ],
            VisualPreset::SeaSky => [
                0x002b5c, 0x004c99, 0x0077be, 0x00bfff, 0xaaddff, 0xe0f7fa, 0xf0f0e0,
            ],
            VisualPreset::Vapor => [
                0x88ccff, 0x004477, 0x006699, 0x3399cc, 0x66ccff, 0xaaddff, 0xffffff,
            ],
        }
    }

    fn landscape_kind(self) -> LandscapeKind {
        match self {
            VisualPreset::Hills | VisualPreset::Volcano => LandscapeKind::Classic,
            _ => LandscapeKind::Inverted,
        }
    }

    /// Decoration kind actually spawned (presets may switch details off)
    fn detail_kind(self) -> DetailKind {
        match self {
            VisualPreset::Hills => DetailKind::Tree,
            VisualPreset::Volcano => DetailKind::Light,
            VisualPreset::SeaSky => DetailKind::Foam,
            VisualPreset::Crystal | VisualPreset::Vapor => DetailKind::None,
        }
    }

    fn camera_height(self) -> f32 {
        match self {
            VisualPreset::Hills => 5.0,
            VisualPreset::Volcano | VisualPreset::Crystal => 30.0,
            VisualPreset::SeaSky => 15.0,
            VisualPreset::Vapor => 10.0,
        }
    }

    fn mountain_level(self) -> f32 {
        match self {
            VisualPreset::SeaSky => 20.0,
            _ => 50.0,
        }
    }
}

impl std::str::FromStr for VisualPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        VisualPreset::ALL
            .into_iter()
            .find(|preset| preset.name() == wanted)
            .ok_or_else(|| format!("unknown preset '{}'", s))
    }
}

/// Everything the visualizer needs, validated once up front
#[derive(Debug, Clone)]
pub struct VisualizerConfig {
    pub landscape: LandscapeConfig,
    pub wave: WaveTuning,
    pub detail: DetailParams,
    pub camera: CameraFollow,
    pub sampler: SampleOffsets,
    pub beat: BeatThresholds,
    pub flock: FlockParams,

    /// Seed for decoration and flock randomness
    pub seed: u64,
}

/// On-disk shape of a visualizer configuration
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVisualizer {
    landscape: Option<RawLandscape>,
    #[serde(default)]
    landscape_type: LandscapeKind,
    wave: Option<WaveTuning>,
    #[serde(default)]
    include_detail: bool,
    #[serde(default)]
    detail_type: DetailKind,
    camera_height: Option<f32>,
    seed: Option<u64>,
}

impl VisualizerConfig {
    /// Build the configuration for a named preset
    pub fn from_preset(preset: VisualPreset) -> Self {
        let kind = preset.landscape_kind();
        let landscape = LandscapeConfig {
            mountain_level: preset.mountain_level(),
            colours: preset.palette().into_iter().map(Colour).collect(),
            strategy: kind.colour_strategy(),
            ..LandscapeConfig::default()
        };
        let detail = DetailParams {
            kind: preset.detail_kind(),
            offset: [landscape.mesh_x, 0.0, landscape.mesh_z],
            ..DetailParams::default()
        };
        let camera = CameraFollow {
            height_above_terrain: preset.camera_height(),
            ..CameraFollow::default()
        };

        Self {
            landscape,
            wave: kind.wave_tuning(),
            detail,
            camera,
            sampler: SampleOffsets::default(),
            beat: BeatThresholds::default(),
            flock: FlockParams::default(),
            seed: DEFAULT_SEED,
        }
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawVisualizer = serde_json::from_str(json)?;
        let landscape = raw
            .landscape
            .ok_or(ConfigError::Missing { field: "landscape" })?
            .into_config(raw.landscape_type.colour_strategy())?;

        let detail = DetailParams {
            kind: if raw.include_detail {
                raw.detail_type
            } else {
                DetailKind::None
            },
            offset: [landscape.mesh_x, 0.0, landscape.mesh_z],
            ..DetailParams::default()
        };
        let camera = CameraFollow {
            height_above_terrain: raw.camera_height.unwrap_or(5.0),
            ..CameraFollow::default()
        };

        Ok(Self {
            wave: raw.wave.unwrap_or_else(|| raw.landscape_type.wave_tuning()),
            landscape,
            detail,
            camera,
            sampler: SampleOffsets::default(),
            beat: BeatThresholds::default(),
            flock: FlockParams::default(),
            seed: raw.seed.unwrap_or(DEFAULT_SEED),
        })
    }

    /// Read and parse a JSON configuration file
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ColourStrategy;

    #[test]
    fn test_every_preset_validates() {
        for preset in VisualPreset::ALL {
            let config = VisualizerConfig::from_preset(preset);
            assert!(
                config.landscape.validate().is_ok(),
                "preset {} failed validation",
                preset.name()
            );
            assert_eq!(preset.name().parse::<VisualPreset>(), Ok(preset));
        }
    }

    #[test]
    fn test_preset_flavours() {
        let hills = VisualizerConfig::from_preset(VisualPreset::Hills);
        assert_eq!(hills.landscape.strategy, ColourStrategy::Banded);
        assert_eq!(hills.detail.kind, DetailKind::Tree);
        assert_eq!(hills.wave, WaveTuning::classic());

        let seasky = VisualizerConfig::from_preset(VisualPreset::SeaSky);
        assert_eq!(seasky.landscape.strategy, ColourStrategy::Gradient);
        assert_eq!(seasky.landscape.mountain_level, 20.0);
        assert_eq!(seasky.detail.kind, DetailKind::Foam);
        assert_eq!(seasky.camera.height_above_terrain, 15.0);
    }

    #[test]
    fn test_from_json_inverted() {
        let json = r#"{
            "landscapeType": "inverted",
            "landscape": {
                "resolution": 8, "numRows": 30, "waterLevel": 1, "mountainLevel": 20,
                "unitsPerVertex": 6, "colours": [1, 2, 3],
                "cameraXRange": 75, "meshX": -390, "meshZ": 115
            },
            "includeDetail": true,
            "detailType": "foam",
            "cameraHeight": 12,
            "seed": 7
        }"#;
        let config = VisualizerConfig::from_json(json).unwrap();
        assert_eq!(config.landscape.strategy, ColourStrategy::Gradient);
        assert_eq!(config.wave, WaveTuning::inverted());
        assert_eq!(config.detail.kind, DetailKind::Foam);
        assert_eq!(config.detail.offset, [-390.0, 0.0, 115.0]);
        assert_eq!(config.camera.height_above_terrain, 12.0);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_from_json_requires_landscape() {
        let err = VisualizerConfig::from_json(r#"{ "includeDetail": true }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { field: "landscape" }));
    }

    #[test]
    fn test_detail_disabled_unless_included() {
        let json = r#"{
            "landscape": {
                "resolution": 8, "numRows": 30, "waterLevel": 1, "mountainLevel": 50,
                "unitsPerVertex": 6, "colours": [1, 2, 3, 4, 5, 6, 7],
                "cameraXRange": 75, "meshX": -390, "meshZ": 115
            },
            "detailType": "tree"
        }"#;
        let config = VisualizerConfig::from_json(json).unwrap();
        assert_eq!(config.detail.kind, DetailKind::None);
    }
}
