//! Landscape geometry, elevation bands and colouring configuration.

use serde::Deserialize;

use super::wave::WaveTuning;
use crate::error::ConfigError;
use crate::terrain::Colour;

/// Distance between consecutive rows along -Z (grid units)
pub const ROW_SPACING: f32 = 5.0;

/// Colouring strategy applied after every height update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColourStrategy {
    /// Discrete height bands with wet-sand shoreline
    #[default]
    Banded,

    /// Flat per-face colour interpolated across the palette
    Gradient,
}

impl ColourStrategy {
    /// Smallest palette the strategy can index safely
    pub fn min_colours(self) -> usize {
        match self {
            ColourStrategy::Banded => 7,
            ColourStrategy::Gradient => 2,
        }
    }
}

/// Landscape flavour: pairs a colouring strategy with a wave tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandscapeKind {
    #[default]
    Classic,
    Inverted,
}

impl LandscapeKind {
    pub fn colour_strategy(self) -> ColourStrategy {
        match self {
            LandscapeKind::Classic => ColourStrategy::Banded,
            LandscapeKind::Inverted => ColourStrategy::Gradient,
        }
    }

    pub fn wave_tuning(self) -> WaveTuning {
        match self {
            LandscapeKind::Classic => WaveTuning::classic(),
            LandscapeKind::Inverted => WaveTuning::inverted(),
        }
    }
}

/// Validated landscape configuration
#[derive(Debug, Clone)]
pub struct LandscapeConfig {
    /// Vertices per half-row (a row holds `2 * resolution` vertices)
    pub resolution: usize,

    /// Number of rows (at least 2 to form a face)
    pub num_rows: usize,

    /// Water surface elevation (grid units)
    pub water_level: f32,

    /// Elevation where mountain banding starts (grid units, > water_level)
    pub mountain_level: f32,

    /// Spacing between vertices along a row (grid units)
    pub units_per_vertex: f32,

    /// Palette indexed by the colour strategy
    pub colours: Vec<Colour>,

    /// Horizontal camera travel mapped onto the grid (grid units)
    pub camera_x_range: f32,

    /// Mesh placement in the world (grid units)
    pub mesh_x: f32,
    pub mesh_z: f32,

    /// Colouring strategy
    pub strategy: ColourStrategy,
}

impl Default for LandscapeConfig {
    fn default() -> Self {
        Self {
            resolution: 64,
            num_rows: 105,
            water_level: 1.0,
            mountain_level: 50.0,
            units_per_vertex: 6.0,
            colours: Vec::new(),
            camera_x_range: 75.0,
            mesh_x: -390.0,
            mesh_z: 115.0,
            strategy: ColourStrategy::Banded,
        }
    }
}

/// On-disk shape; every geometric field is required
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawLandscape {
    resolution: Option<usize>,
    num_rows: Option<usize>,
    water_level: Option<f32>,
    mountain_level: Option<f32>,
    units_per_vertex: Option<f32>,
    colours: Option<Vec<Colour>>,
    camera_x_range: Option<f32>,
    mesh_x: Option<f32>,
    mesh_z: Option<f32>,
    strategy: Option<ColourStrategy>,
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ConfigError> {
    value.ok_or(ConfigError::Missing { field })
}

impl RawLandscape {
    /// Fill in the strategy if absent, then require and validate every field
    pub(crate) fn into_config(
        self,
        default_strategy: ColourStrategy,
    ) -> Result<LandscapeConfig, ConfigError> {
        let config = LandscapeConfig {
            resolution: required(self.resolution, "resolution")?,
            num_rows: required(self.num_rows, "numRows")?,
            water_level: required(self.water_level, "waterLevel")?,
            mountain_level: required(self.mountain_level, "mountainLevel")?,
            units_per_vertex: required(self.units_per_vertex, "unitsPerVertex")?,
            colours: required(self.colours, "colours")?,
            camera_x_range: required(self.camera_x_range, "cameraXRange")?,
            mesh_x: required(self.mesh_x, "meshX")?,
            mesh_z: required(self.mesh_z, "meshZ")?,
            strategy: self.strategy.unwrap_or(default_strategy),
        };
        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<RawLandscape> for LandscapeConfig {
    type Error = ConfigError;

    fn try_from(raw: RawLandscape) -> Result<Self, Self::Error> {
        raw.into_config(ColourStrategy::default())
    }
}

impl LandscapeConfig {
    /// Parse and validate a JSON landscape description
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawLandscape = serde_json::from_str(json)?;
        raw.try_into()
    }

    /// Number of vertices in one row
    pub fn row_len(&self) -> usize {
        self.resolution * 2
    }

    /// Validate ranges and palette size
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution == 0 {
            return Err(ConfigError::invalid("resolution", "must be greater than 0"));
        }
        if self.num_rows < 2 {
            return Err(ConfigError::invalid(
                "numRows",
                format!("need at least 2 rows to form a face, got {}", self.num_rows),
            ));
        }
        if !(self.units_per_vertex.is_finite() && self.units_per_vertex > 0.0) {
            return Err(ConfigError::invalid(
                "unitsPerVertex",
                format!("must be positive, got {}", self.units_per_vertex),
            ));
        }
        if !self.water_level.is_finite() {
            return Err(ConfigError::invalid("waterLevel", "must be finite"));
        }
        if !(self.mountain_level.is_finite() && self.mountain_level > self.water_level) {
            return Err(ConfigError::invalid(
                "mountainLevel",
                format!(
                    "must be above waterLevel ({}), got {}",
                    self.water_level, self.mountain_level
                ),
            ));
        }
        if !(self.camera_x_range.is_finite() && self.camera_x_range > 0.0) {
            return Err(ConfigError::invalid(
                "cameraXRange",
                format!("must be positive, got {}", self.camera_x_range),
            ));
        }
        let needed = self.strategy.min_colours();
        if self.colours.len() < needed {
            return Err(ConfigError::invalid(
                "colours",
                format!(
                    "{:?} colouring needs at least {} colours, got {}",
                    self.strategy,
                    needed,
                    self.colours.len()
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette(n: u32) -> Vec<Colour> {
        (0..n).map(|i| Colour(i * 0x111111)).collect()
    }

    #[test]
    fn test_from_json_complete() {
        let json = r#"{
            "resolution": 4, "numRows": 3, "waterLevel": 1, "mountainLevel": 50,
            "unitsPerVertex": 6, "colours": [1, 2, 3, 4, 5, 6, 7],
            "cameraXRange": 75, "meshX": -390, "meshZ": 115
        }"#;
        let config = LandscapeConfig::from_json(json).unwrap();
        assert_eq!(config.resolution, 4);
        assert_eq!(config.row_len(), 8);
        assert_eq!(config.strategy, ColourStrategy::Banded);
        assert_eq!(config.colours[6], Colour(7));
    }

    #[test]
    fn test_missing_field_is_named() {
        let json = r#"{ "resolution": 4, "waterLevel": 1 }"#;
        match LandscapeConfig::from_json(json) {
            Err(ConfigError::Missing { field }) => assert_eq!(field, "numRows"),
            other => panic!("expected missing numRows, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_failures() {
        let base = LandscapeConfig {
            colours: palette(7),
            ..LandscapeConfig::default()
        };
        assert!(base.validate().is_ok());

        let zero_res = LandscapeConfig {
            resolution: 0,
            ..base.clone()
        };
        assert!(matches!(
            zero_res.validate(),
            Err(ConfigError::Invalid { field: "resolution", .. })
        ));

        let one_row = LandscapeConfig {
            num_rows: 1,
            ..base.clone()
        };
        assert!(one_row.validate().is_err());

        let inverted_levels = LandscapeConfig {
            mountain_level: 0.5,
            ..base.clone()
        };
        assert!(inverted_levels.validate().is_err());

        let short_palette = LandscapeConfig {
            colours: palette(6),
            ..base.clone()
        };
        assert!(short_palette.validate().is_err());

        // Gradient colouring is fine with two colours
        let gradient = LandscapeConfig {
            colours: palette(2),
            strategy: ColourStrategy::Gradient,
            ..base
        };
        assert!(gradient.validate().is_ok());
    }
}
