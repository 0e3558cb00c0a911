//! Mesh buffer export and offline top-down snapshots.

use std::collections::HashMap;
use std::path::Path;

use glam::Vec3;
use image::{Rgb, RgbImage};
use log::{debug, info};

use crate::details::{Bird, DetailItem, LifecycleEvent, ObjectId, ObjectKind};
use crate::params::{DetailKind, ROW_SPACING};
use crate::terrain::{Colour, MeshUpdate, TerrainGrid};

/// Flat buffers in the layout a GPU pipeline uploads
///
/// Indices never change after construction; colours are refreshed only
/// when the grid reports a colour change.
pub struct MeshBuffers {
    indices: Vec<u32>,
    colours: Vec<[f32; 3]>,
}

impl MeshBuffers {
    pub fn from_grid(grid: &TerrainGrid) -> Self {
        let indices = grid.faces().iter().flat_map(|f| f.indices).collect();
        let mut buffers = Self {
            indices,
            colours: Vec::with_capacity(grid.face_count() * 3),
        };
        buffers.refresh_colours(grid);
        buffers
    }

    /// Re-upload whatever `update` marks as changed
    ///
    /// # Returns
    /// * Bytes that would be written to the GPU
    pub fn apply(&mut self, grid: &TerrainGrid, update: MeshUpdate) -> usize {
        let mut uploaded = 0;
        if update.positions {
            uploaded += Self::position_bytes(grid).len();
        }
        if update.colours {
            self.refresh_colours(grid);
            uploaded += self.colour_bytes().len();
        }
        uploaded
    }

    fn refresh_colours(&mut self, grid: &TerrainGrid) {
        self.colours.clear();
        self.colours.extend(
            grid.faces()
                .iter()
                .flat_map(|f| f.slots.iter().map(|s| s.colour.to_f32())),
        );
    }

    /// Vertex positions as raw bytes
    pub fn position_bytes(grid: &TerrainGrid) -> &[u8] {
        bytemuck::cast_slice(grid.vertices())
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Per-face-vertex colours, three per face
    pub fn colours(&self) -> &[[f32; 3]] {
        &self.colours
    }

    pub fn colour_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colours)
    }
}

fn marker_colour(kind: ObjectKind) -> Colour {
    match kind {
        ObjectKind::Detail(DetailKind::Tree) => Colour(0x1b5e20),
        ObjectKind::Detail(DetailKind::Light) => Colour(0xffeb3b),
        ObjectKind::Detail(DetailKind::Foam) => Colour::WHITE,
        ObjectKind::Detail(DetailKind::None) => Colour(0xff00ff),
        ObjectKind::Bird => Colour::BLACK,
    }
}

/// Top-down rasterizer for the terrain and its scene objects
///
/// Keeps its own registry of live objects, built only from lifecycle
/// events, the way a scene graph would.
pub struct SnapshotRenderer {
    pixel_scale: u32,
    mesh_origin: Vec3,
    scene: HashMap<ObjectId, Vec3>,
}

impl SnapshotRenderer {
    /// # Arguments
    /// * `pixel_scale` - Pixels per grid cell
    /// * `mesh_origin` - World position of vertex 0
    pub fn new(pixel_scale: u32, mesh_origin: Vec3) -> Self {
        Self {
            pixel_scale: pixel_scale.max(1),
            mesh_origin,
            scene: HashMap::new(),
        }
    }

    pub fn apply_events<I: IntoIterator<Item = LifecycleEvent>>(&mut self, events: I) {
        for event in events {
            match event {
                LifecycleEvent::Added { id, position } => {
                    self.scene.insert(id, position);
                }
                LifecycleEvent::Removed { id } => {
                    if self.scene.remove(&id).is_none() {
                        debug!("Removal of unknown object {:?}", id);
                    }
                }
            }
        }
    }

    pub fn live_objects(&self) -> usize {
        self.scene.len()
    }

    /// Pixel under a world position, if it lands on the image
    fn project(&self, grid: &TerrainGrid, position: Vec3, size: (u32, u32)) -> Option<(u32, u32)> {
        let local = position - self.mesh_origin;
        let column = local.x / grid.units_per_vertex();
        let row = -local.z / ROW_SPACING;
        let px = column * self.pixel_scale as f32;
        let py = row * self.pixel_scale as f32;

        let inside = px >= 0.0 && py >= 0.0 && px < size.0 as f32 && py < size.1 as f32;
        inside.then(|| (px as u32, py as u32))
    }

    /// Draw one frame
    ///
    /// Each grid cell is filled with the first vertex colour of its first
    /// face; registered objects are drawn as square markers at their
    /// current borrowed positions.
    pub fn render(&self, grid: &TerrainGrid, details: &[DetailItem], birds: &[Bird]) -> RgbImage {
        let cells_x = (grid.row_len() - 1) as u32;
        let cells_z = (grid.num_rows() - 1) as u32;
        let scale = self.pixel_scale;
        let mut image = RgbImage::new(cells_x * scale, cells_z * scale);

        for (cell, pair) in grid.faces().chunks(2).enumerate() {
            let column = cell as u32 % cells_x;
            let row = cell as u32 / cells_x;
            let colour = Rgb(pair[0].slots[0].colour.rgb());
            for dy in 0..scale {
                for dx in 0..scale {
                    image.put_pixel(column * scale + dx, row * scale + dy, colour);
                }
            }
        }

        let size = image.dimensions();
        let live = details
            .iter()
            .map(|d| (d.id, d.position))
            .chain(birds.iter().map(|b| (b.id, b.position)))
            .filter(|(id, _)| self.scene.contains_key(id));

        let half = (scale / 2).max(1) as i64;
        for (id, position) in live {
            let Some((px, py)) = self.project(grid, position, size) else {
                continue;
            };
            let colour = Rgb(marker_colour(id.kind).rgb());
            for dy in -half..=half {
                for dx in -half..=half {
                    let x = px as i64 + dx;
                    let y = py as i64 + dy;
                    if x >= 0 && y >= 0 && (x as u32) < size.0 && (y as u32) < size.1 {
                        image.put_pixel(x as u32, y as u32, colour);
                    }
                }
            }
        }

        image
    }

    /// Write a frame to disk as PNG
    pub fn save<P: AsRef<Path>>(&self, image: &RgbImage, path: P) -> Result<(), image::ImageError> {
        image.save(path.as_ref())?;
        info!("Saved {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::Vertex;

    #[test]
    fn test_mesh_buffer_layout() {
        let mut grid = TerrainGrid::build(4, 3, 6.0).unwrap();
        grid.fill_colour(Colour::WHITE);
        let mut buffers = MeshBuffers::from_grid(&grid);

        assert_eq!(buffers.indices().len(), 28 * 3);
        assert_eq!(&buffers.indices()[..6], &[0, 1, 9, 9, 8, 0]);
        assert_eq!(buffers.index_bytes().len(), 28 * 3 * 4);
        assert_eq!(buffers.colours().len(), 28 * 3);
        assert!(buffers.colours().iter().all(|c| *c == [1.0, 1.0, 1.0]));

        let position_bytes = MeshBuffers::position_bytes(&grid).len();
        assert_eq!(position_bytes, 24 * std::mem::size_of::<Vertex>());

        grid.fill_colour(Colour::BLACK);
        let update = grid.take_update();
        assert!(update.positions && update.colours);
        assert_eq!(buffers.apply(&grid, update), position_bytes + 28 * 3 * 12);
        assert!(buffers.colours().iter().all(|c| *c == [0.0, 0.0, 0.0]));

        assert_eq!(buffers.apply(&grid, MeshUpdate::default()), 0);
    }

    #[test]
    fn test_scene_tracks_events() {
        let id = ObjectId {
            kind: ObjectKind::Bird,
            serial: 0,
        };
        let mut renderer = SnapshotRenderer::new(2, Vec3::ZERO);
        renderer.apply_events([LifecycleEvent::Added {
            id,
            position: Vec3::ZERO,
        }]);
        assert_eq!(renderer.live_objects(), 1);

        // Unknown removals are tolerated
        renderer.apply_events([
            LifecycleEvent::Removed { id },
            LifecycleEvent::Removed { id },
        ]);
        assert_eq!(renderer.live_objects(), 0);
    }

    #[test]
    fn test_render_paints_cells_and_markers() {
        let mut grid = TerrainGrid::build(4, 3, 6.0).unwrap();
        grid.fill_colour(Colour(0x336699));

        let id = ObjectId {
            kind: ObjectKind::Bird,
            serial: 7,
        };
        // Centre of cell (3, 1)
        let position = Vec3::new(3.5 * 6.0, 80.0, -1.5 * ROW_SPACING);
        let bird = Bird {
            id,
            position,
            wing_angle: 0.0,
        };

        let mut renderer = SnapshotRenderer::new(4, Vec3::ZERO);
        let image = renderer.render(&grid, &[], &[bird.clone()]);
        assert_eq!(image.dimensions(), (7 * 4, 2 * 4));
        // Unregistered objects are not drawn
        assert_eq!(image.get_pixel(14, 6), &Rgb([0x33, 0x66, 0x99]));

        renderer.apply_events([LifecycleEvent::Added { id, position }]);
        let image = renderer.render(&grid, &[], &[bird]);
        assert_eq!(image.get_pixel(14, 6), &Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(0, 0), &Rgb([0x33, 0x66, 0x99]));
    }
}
