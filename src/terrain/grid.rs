//! Row-major terrain grid with fixed triangle topology.

use bytemuck::{Pod, Zeroable};
use log::debug;

use super::colour::Colour;
use crate::error::{ConfigError, DataShapeError};
use crate::params::ROW_SPACING;

/// Vertex data for the terrain mesh
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    pub fn elevation(&self) -> f32 {
        self.position[1]
    }
}

/// Shoreline state of one face vertex slot
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShoreState {
    #[default]
    Dry,
    Wet,
}

/// Face-local colour for one corner (not shared with neighbouring faces)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VertexSlot {
    pub colour: Colour,
    pub shore: ShoreState,
}

/// Triangle over three grid vertices
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    pub indices: [u32; 3],
    pub slots: [VertexSlot; 3],
}

/// What changed since the renderer last looked
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshUpdate {
    pub positions: bool,
    pub colours: bool,
}

/// Terrain grid: `2 * resolution` vertices per row, `num_rows` rows
///
/// Topology is built once. Afterwards only elevations and face colours
/// change.
#[derive(Debug, Clone)]
pub struct TerrainGrid {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    resolution: usize,
    num_rows: usize,
    units_per_vertex: f32,
    update: MeshUpdate,
}

impl TerrainGrid {
    /// Build a flat grid and its triangle list
    pub fn build(
        resolution: usize,
        num_rows: usize,
        units_per_vertex: f32,
    ) -> Result<Self, ConfigError> {
        if resolution == 0 {
            return Err(ConfigError::invalid("resolution", "must be greater than 0"));
        }
        if num_rows < 2 {
            return Err(ConfigError::invalid(
                "numRows",
                format!("need at least 2 rows to form a face, got {}", num_rows),
            ));
        }
        if !(units_per_vertex.is_finite() && units_per_vertex > 0.0) {
            return Err(ConfigError::invalid(
                "unitsPerVertex",
                format!("must be positive, got {}", units_per_vertex),
            ));
        }

        let row_len = resolution * 2;
        let mut vertices = Vec::with_capacity(row_len * num_rows);

        // Row r sits at z = -r * ROW_SPACING
        for row in 0..num_rows {
            for column in 0..row_len {
                vertices.push(Vertex {
                    position: [
                        column as f32 * units_per_vertex,
                        0.0,
                        -(row as f32) * ROW_SPACING,
                    ],
                });
            }
        }

        // Two triangles per cell between row i and i + 1
        let mut faces = Vec::with_capacity(2 * (num_rows - 1) * (row_len - 1));
        for row in 0..num_rows - 1 {
            let row_offset = row * row_len;
            for column in 0..row_len - 1 {
                let bottom_left = (row_offset + column) as u32;
                let top_right = (row_offset + row_len + column + 1) as u32;

                faces.push(Face {
                    indices: [bottom_left, bottom_left + 1, top_right],
                    slots: Default::default(),
                });
                faces.push(Face {
                    indices: [top_right, top_right - 1, bottom_left],
                    slots: Default::default(),
                });
            }
        }

        Ok(Self {
            vertices,
            faces,
            resolution,
            num_rows,
            units_per_vertex,
            update: MeshUpdate {
                positions: true,
                colours: true,
            },
        })
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Vertices per row
    pub fn row_len(&self) -> usize {
        self.resolution * 2
    }

    pub fn units_per_vertex(&self) -> f32 {
        self.units_per_vertex
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Vertices of one row
    pub fn row(&self, row: usize) -> &[Vertex] {
        let row_len = self.row_len();
        &self.vertices[row * row_len..(row + 1) * row_len]
    }

    /// Flat index of `(column, row)`
    pub fn index(&self, column: usize, row: usize) -> usize {
        row * self.row_len() + column
    }

    /// Flat index of `(column, row)` clamped onto the grid
    ///
    /// Out-of-range requests are logged and snapped to the nearest edge.
    pub fn clamped_index(&self, column: i64, row: i64) -> usize {
        let max_column = self.row_len() as i64 - 1;
        let max_row = self.num_rows as i64 - 1;
        let c = column.clamp(0, max_column);
        let r = row.clamp(0, max_row);
        if c != column || r != row {
            debug!(
                "{}",
                DataShapeError::IndexOutOfBounds {
                    column,
                    row,
                    columns: self.row_len(),
                    rows: self.num_rows,
                }
            );
        }
        self.index(c as usize, r as usize)
    }

    pub fn elevation(&self, index: usize) -> Option<f32> {
        self.vertices.get(index).map(Vertex::elevation)
    }

    /// Mutable elevation of one vertex (marks positions dirty)
    pub fn elevation_mut(&mut self, index: usize) -> Option<&mut f32> {
        self.update.positions = true;
        self.vertices.get_mut(index).map(|v| &mut v.position[1])
    }

    /// Mutable access to every vertex with its `(column, row)`
    pub fn vertices_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut Vertex)> {
        self.update.positions = true;
        let row_len = self.row_len();
        self.vertices
            .iter_mut()
            .enumerate()
            .map(move |(i, v)| (i % row_len, i / row_len, v))
    }

    /// Vertices to read from and faces to recolour, borrowed together
    pub fn colour_targets(&mut self) -> (&[Vertex], &mut [Face]) {
        self.update.colours = true;
        (&self.vertices, &mut self.faces)
    }

    /// Paint every face slot with one colour and reset shore state
    pub fn fill_colour(&mut self, colour: Colour) {
        let slot = VertexSlot {
            colour,
            shore: Default::default(),
        };
        for face in &mut self.faces {
            face.slots = [slot; 3];
        }
        self.update.colours = true;
    }

    /// Take and clear the pending update flags
    pub fn take_update(&mut self) -> MeshUpdate {
        std::mem::take(&mut self.update)
    }

    /// Peek at the pending update flags
    pub fn pending_update(&self) -> MeshUpdate {
        self.update
    }
}
