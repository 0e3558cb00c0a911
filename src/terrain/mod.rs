//! Terrain grid, audio-driven height field and elevation colouring.

mod colour;
mod grid;
mod heightfield;
mod system;

// Re-export public types
pub use colour::{
    build_classifier, BandedClassifier, Colour, ColourClassifier, GradientClassifier,
};
pub use grid::{Face, MeshUpdate, ShoreState, TerrainGrid, Vertex, VertexSlot};
pub use heightfield::{average_intensity, HeightField};
pub use system::TerrainSystem;
