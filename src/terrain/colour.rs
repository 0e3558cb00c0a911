//! Elevation-driven face colouring strategies.

use serde::Deserialize;

use super::grid::{ShoreState, TerrainGrid, VertexSlot};
use crate::error::ConfigError;
use crate::params::{ColourStrategy, LandscapeConfig};

/// Packed 0xRRGGBB colour
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct Colour(pub u32);

impl Colour {
    pub const BLACK: Colour = Colour(0x000000);
    pub const WHITE: Colour = Colour(0xffffff);

    /// 8-bit RGB channels
    pub fn rgb(self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }

    /// Normalized RGB channels for vertex colour buffers
    pub fn to_f32(self) -> [f32; 3] {
        let [r, g, b] = self.rgb();
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }
}

/// Recolours every face from the current vertex elevations
pub trait ColourClassifier: Send {
    fn name(&self) -> &'static str;

    fn classify(&self, grid: &mut TerrainGrid);
}

/// Build the classifier selected by the landscape configuration
pub fn build_classifier(
    config: &LandscapeConfig,
) -> Result<Box<dyn ColourClassifier>, ConfigError> {
    let colours = config.colours.clone();
    Ok(match config.strategy {
        ColourStrategy::Banded => Box::new(BandedClassifier::new(
            colours,
            config.water_level,
            config.mountain_level,
        )?),
        ColourStrategy::Gradient => Box::new(GradientClassifier::new(
            colours,
            config.water_level,
            config.mountain_level,
        )?),
    })
}

fn check_palette(
    colours: &[Colour],
    strategy: ColourStrategy,
    water_level: f32,
    mountain_level: f32,
) -> Result<(), ConfigError> {
    if colours.len() < strategy.min_colours() {
        return Err(ConfigError::invalid(
            "colours",
            format!(
                "{:?} colouring needs at least {} colours, got {}",
                strategy,
                strategy.min_colours(),
                colours.len()
            ),
        ));
    }
    if !(mountain_level > water_level) {
        return Err(ConfigError::invalid(
            "mountainLevel",
            "must be above waterLevel",
        ));
    }
    Ok(())
}

/// Discrete height bands with a wet-sand shoreline
///
/// Palette layout: `[0..6)` land and mountain bands, `[6]` wet sand.
#[derive(Debug, Clone)]
pub struct BandedClassifier {
    colours: Vec<Colour>,
    water_level: f32,
    mountain_level: f32,
}

impl BandedClassifier {
    /// Highest mountain band index
    pub const MAX_BAND: usize = 5;

    /// Palette slot used for wet sand
    pub const WET_SAND: usize = 6;

    /// Mountain band height (grid units)
    const BAND_HEIGHT: f32 = 2.0;

    pub fn new(
        colours: Vec<Colour>,
        water_level: f32,
        mountain_level: f32,
    ) -> Result<Self, ConfigError> {
        check_palette(&colours, ColourStrategy::Banded, water_level, mountain_level)?;
        Ok(Self {
            colours,
            water_level,
            mountain_level,
        })
    }

    /// Mountain band for an elevation, clamped to `0..=MAX_BAND`
    pub fn band_index(&self, elevation: f32) -> usize {
        let band = ((elevation - self.mountain_level) / Self::BAND_HEIGHT).floor();
        band.clamp(0.0, Self::MAX_BAND as f32) as usize
    }

    /// Shoreline hysteresis for one vertex slot below the mountain line
    ///
    /// Inside `(water, water + 1)` the slot turns wet sand. Above
    /// `water + 1` a wet slot dries back to the base land colour. Anything
    /// else leaves the slot as it was.
    pub fn shore_step(&self, slot: &mut VertexSlot, elevation: f32) {
        let shore_top = self.water_level + 1.0;
        if elevation > self.water_level && elevation < shore_top {
            slot.colour = self.colours[Self::WET_SAND];
            slot.shore = ShoreState::Wet;
        } else if elevation > shore_top && slot.shore == ShoreState::Wet {
            slot.colour = self.colours[0];
            slot.shore = ShoreState::Dry;
        }
    }
}

impl ColourClassifier for BandedClassifier {
    fn name(&self) -> &'static str {
        "banded"
    }

    fn classify(&self, grid: &mut TerrainGrid) {
        let (vertices, faces) = grid.colour_targets();
        for face in faces.iter_mut() {
            let heights = face.indices.map(|i| vertices[i as usize].elevation());

            if heights.iter().any(|&y| y > self.mountain_level) {
                for (slot, &y) in face.slots.iter_mut().zip(&heights) {
                    slot.colour = self.colours[self.band_index(y)];
                }
            } else {
                for (slot, &y) in face.slots.iter_mut().zip(&heights) {
                    self.shore_step(slot, y);
                }
            }
        }
    }
}

/// Flat per-face colour interpolated across the whole palette
#[derive(Debug, Clone)]
pub struct GradientClassifier {
    colours: Vec<Colour>,
    water_level: f32,
    mountain_level: f32,
}

impl GradientClassifier {
    pub fn new(
        colours: Vec<Colour>,
        water_level: f32,
        mountain_level: f32,
    ) -> Result<Self, ConfigError> {
        check_palette(
            &colours,
            ColourStrategy::Gradient,
            water_level,
            mountain_level,
        )?;
        Ok(Self {
            colours,
            water_level,
            mountain_level,
        })
    }

    /// Palette index for a face's mean elevation
    pub fn gradient_index(&self, mean_elevation: f32) -> usize {
        let span = self.mountain_level - self.water_level;
        let t = ((mean_elevation - self.water_level) / span).clamp(0.0, 1.0);
        let last = self.colours.len() - 1;
        ((t * last as f32).floor() as usize).min(last)
    }
}

impl ColourClassifier for GradientClassifier {
    fn name(&self) -> &'static str {
        "gradient"
    }

    fn classify(&self, grid: &mut TerrainGrid) {
        let (vertices, faces) = grid.colour_targets();
        for face in faces.iter_mut() {
            let sum: f32 = face
                .indices
                .iter()
                .map(|&i| vertices[i as usize].elevation())
                .sum();
            let colour = self.colours[self.gradient_index(sum / 3.0)];
            for slot in face.slots.iter_mut() {
                slot.colour = colour;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Vec<Colour> {
        (0..7).map(|i| Colour(0x100000 * (i + 1))).collect()
    }

    fn banded() -> BandedClassifier {
        BandedClassifier::new(palette(), 1.0, 50.0).unwrap()
    }

    /// Two-row grid of a single quad (2 faces); resolution 1 gives 2 columns
    fn tiny_grid() -> TerrainGrid {
        let mut grid = TerrainGrid::build(1, 2, 1.0).unwrap();
        grid.fill_colour(palette()[0]);
        grid
    }

    fn set_all(grid: &mut TerrainGrid, y: f32) {
        for i in 0..grid.vertex_count() {
            *grid.elevation_mut(i).unwrap() = y;
        }
    }

    #[test]
    fn test_colour_channels() {
        assert_eq!(Colour(0x336699).rgb(), [0x33, 0x66, 0x99]);
        assert_eq!(Colour::WHITE.to_f32(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_palette_too_short() {
        let short: Vec<Colour> = palette().into_iter().take(6).collect();
        assert!(BandedClassifier::new(short.clone(), 1.0, 50.0).is_err());
        assert!(GradientClassifier::new(short, 1.0, 50.0).is_ok());
        assert!(GradientClassifier::new(vec![Colour::BLACK], 1.0, 50.0).is_err());
    }

    #[test]
    fn test_band_index_clamped() {
        let classifier = banded();
        assert_eq!(classifier.band_index(40.0), 0);
        assert_eq!(classifier.band_index(50.5), 0);
        assert_eq!(classifier.band_index(52.0), 1);
        assert_eq!(classifier.band_index(59.9), 4);
        assert_eq!(classifier.band_index(500.0), BandedClassifier::MAX_BAND);
    }

    #[test]
    fn test_banded_monotonic_above_mountain() {
        let classifier = banded();
        let mut grid = tiny_grid();
        let mut last_band = 0;
        let mut y = 50.1;
        while y < 70.0 {
            set_all(&mut grid, y);
            classifier.classify(&mut grid);
            let colour = grid.faces()[0].slots[0].colour;
            let band = palette().iter().position(|&c| c == colour).unwrap();
            assert!(band >= last_band, "band dropped at elevation {}", y);
            last_band = band;
            y += 0.7;
        }
        assert_eq!(last_band, BandedClassifier::MAX_BAND);
    }

    #[test]
    fn test_mountain_face_colours_each_vertex() {
        let classifier = banded();
        let mut grid = tiny_grid();
        // Face 0 is (0, 1, 3); only vertex 3 is high
        *grid.elevation_mut(3).unwrap() = 55.0;
        classifier.classify(&mut grid);

        let face = &grid.faces()[0];
        assert_eq!(face.indices, [0, 1, 3]);
        assert_eq!(face.slots[0].colour, palette()[0]);
        assert_eq!(face.slots[1].colour, palette()[0]);
        assert_eq!(face.slots[2].colour, palette()[2]);
    }

    #[test]
    fn test_wet_sand_hysteresis() {
        let classifier = banded();
        let mut grid = tiny_grid();
        let wet = palette()[BandedClassifier::WET_SAND];
        let land = palette()[0];

        // Frame 1: below the water line leaves the base colour untouched
        set_all(&mut grid, 0.5);
        classifier.classify(&mut grid);
        assert_eq!(grid.faces()[0].slots[0].colour, land);
        assert_eq!(grid.faces()[0].slots[0].shore, ShoreState::Dry);

        // Frame 2: inside the shoreline band turns wet
        set_all(&mut grid, 1.5);
        classifier.classify(&mut grid);
        assert_eq!(grid.faces()[0].slots[0].colour, wet);
        assert_eq!(grid.faces()[0].slots[0].shore, ShoreState::Wet);

        // Exactly at water + 1 keeps the wet colour
        set_all(&mut grid, 2.0);
        classifier.classify(&mut grid);
        assert_eq!(grid.faces()[0].slots[0].colour, wet);

        // Frame 3: above water + 1 dries back to land
        set_all(&mut grid, 2.5);
        classifier.classify(&mut grid);
        assert_eq!(grid.faces()[0].slots[0].colour, land);
        assert_eq!(grid.faces()[0].slots[0].shore, ShoreState::Dry);
    }

    #[test]
    fn test_dry_slot_above_shore_keeps_colour() {
        let classifier = banded();
        let mut slot = VertexSlot {
            colour: Colour(0x123456),
            shore: ShoreState::Dry,
        };
        classifier.shore_step(&mut slot, 10.0);
        assert_eq!(slot.colour, Colour(0x123456));
    }

    #[test]
    fn test_gradient_boundaries() {
        let classifier = GradientClassifier::new(palette(), 1.0, 50.0).unwrap();
        assert_eq!(classifier.gradient_index(1.0), 0);
        assert_eq!(classifier.gradient_index(-20.0), 0);
        assert_eq!(classifier.gradient_index(50.0), 6);
        assert_eq!(classifier.gradient_index(80.0), 6);
        assert_eq!(classifier.gradient_index(25.5), 3);
    }

    #[test]
    fn test_gradient_flat_face_colour() {
        let classifier = GradientClassifier::new(palette(), 1.0, 50.0).unwrap();
        let mut grid = tiny_grid();
        // Face 0 is (0, 1, 3): mean of 50, 50, 50 hits the top colour
        for i in [0, 1, 3] {
            *grid.elevation_mut(i).unwrap() = 50.0;
        }
        classifier.classify(&mut grid);

        let face = &grid.faces()[0];
        assert!(face.slots.iter().all(|s| s.colour == palette()[6]));
    }
}
