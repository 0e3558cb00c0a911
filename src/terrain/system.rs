//! High-level terrain system with audio-reactive height and colour.

use log::debug;

use super::colour::{build_classifier, ColourClassifier};
use super::grid::TerrainGrid;
use super::heightfield::HeightField;
use crate::error::ConfigError;
use crate::params::{LandscapeConfig, WaveTuning};

/// Terrain grid plus the height field and colouring that drive it
pub struct TerrainSystem {
    pub grid: TerrainGrid,
    pub config: LandscapeConfig,
    height_field: HeightField,
    classifier: Box<dyn ColourClassifier>,
}

impl TerrainSystem {
    /// Create a terrain system; every face starts with the base land colour
    pub fn new(config: LandscapeConfig, wave: WaveTuning) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut grid =
            TerrainGrid::build(config.resolution, config.num_rows, config.units_per_vertex)?;
        grid.fill_colour(config.colours[0]);
        let classifier = build_classifier(&config)?;

        debug!(
            "Terrain: {} vertices, {} faces, {} colouring",
            grid.vertex_count(),
            grid.face_count(),
            classifier.name()
        );

        Ok(Self {
            grid,
            config,
            height_field: HeightField::new(wave),
            classifier,
        })
    }

    pub fn height_field(&self) -> &HeightField {
        &self.height_field
    }

    pub fn classifier_name(&self) -> &'static str {
        self.classifier.name()
    }

    /// Apply one audio frame: rewrite elevations, then recolour faces
    ///
    /// # Arguments
    /// * `frame` - Frequency bin intensities (0-255)
    /// * `elapsed_s` - Seconds since the visualization started
    ///
    /// # Returns
    /// * The wave amplitude used for this frame
    pub fn update(&mut self, frame: &[u8], elapsed_s: f32) -> f32 {
        let amplitude = self.height_field.update(&mut self.grid, frame, elapsed_s);
        self.classifier.classify(&mut self.grid);
        amplitude
    }
}
