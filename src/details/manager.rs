//! Terrain decoration spawning, animation and culling.

use glam::Vec3;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{LifecycleEvent, ObjectId, ObjectKind};
use crate::error::ConfigError;
use crate::params::{DetailKind, DetailParams, LandscapeConfig};
use crate::terrain::TerrainGrid;

/// One decoration riding the terrain
#[derive(Debug, Clone, PartialEq)]
pub struct DetailItem {
    pub id: ObjectId,
    pub position: Vec3,
    pub scale: f32,

    /// Scroll speed along -Z (grid units per second)
    pub scroll_velocity: f32,

    /// Per-item bobbing phase so identical items drift out of sync
    pub bob_phase_seed: f32,
}

/// Owns every live decoration from spawn to cull
pub struct DetailManager {
    params: DetailParams,
    water_level: f32,
    mountain_level: f32,
    items: Vec<DetailItem>,
    events: Vec<LifecycleEvent>,
    rng: ChaCha8Rng,
    next_serial: u64,
}

impl DetailManager {
    /// Create a manager with an injected random source
    pub fn new(
        params: DetailParams,
        landscape: &LandscapeConfig,
        rng: ChaCha8Rng,
    ) -> Result<Self, ConfigError> {
        if landscape.row_len() == 0 {
            return Err(ConfigError::invalid(
                "resolution",
                "decorations need at least one vertex per row",
            ));
        }
        let (lo, hi) = params.kind.scale_range();
        if !(lo > 0.0 && lo <= hi) {
            return Err(ConfigError::invalid("scale", "range must be positive"));
        }

        Ok(Self {
            params,
            water_level: landscape.water_level,
            mountain_level: landscape.mountain_level,
            items: Vec::new(),
            events: Vec::new(),
            rng,
            next_serial: 0,
        })
    }

    /// Create a manager with a seeded random source
    pub fn with_seed(
        params: DetailParams,
        landscape: &LandscapeConfig,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::new(params, landscape, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn kind(&self) -> DetailKind {
        self.params.kind
    }

    pub fn items(&self) -> &[DetailItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drain pending add/remove notifications
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, LifecycleEvent> {
        self.events.drain(..)
    }

    /// Indices of spawn-edge vertices strictly between the clearance line
    /// and the mountain line
    pub fn candidates(&self, grid: &TerrainGrid) -> Vec<usize> {
        let floor = self.water_level + self.params.water_clearance;
        grid.row(0)
            .iter()
            .enumerate()
            .filter(|(_, v)| v.elevation() > floor && v.elevation() < self.mountain_level)
            .map(|(i, _)| i)
            .collect()
    }

    /// Try to place one decoration on the newest terrain row
    ///
    /// Skips silently when decorations are off, the frame budget is
    /// exhausted, or no vertex qualifies.
    pub fn try_spawn(&mut self, grid: &TerrainGrid, frame_rate_ok: bool) -> Option<&DetailItem> {
        if self.params.kind == DetailKind::None {
            return None;
        }
        if !frame_rate_ok {
            debug!("Detail spawn skipped: frame budget exhausted");
            return None;
        }

        let candidates = self.candidates(grid);
        if candidates.is_empty() {
            return None;
        }

        let chosen = candidates[self.rng.gen_range(0..candidates.len())];
        let anchor = Vec3::from_array(grid.row(0)[chosen].position);
        let position = anchor
            + Vec3::from_array(self.params.kind.base_offset())
            + Vec3::from_array(self.params.offset);

        let (lo, hi) = self.params.kind.scale_range();
        let scale = if hi > lo {
            self.rng.gen_range(lo..=hi)
        } else {
            lo
        };

        let id = ObjectId {
            kind: ObjectKind::Detail(self.params.kind),
            serial: self.next_serial,
        };
        self.next_serial += 1;

        let item = DetailItem {
            id,
            position,
            scale,
            scroll_velocity: self.params.scroll_speed,
            bob_phase_seed: position.x * 0.2,
        };
        debug!(
            "Detail {:?} spawned at vertex {} of {} candidates",
            self.params.kind,
            chosen,
            candidates.len()
        );

        self.events.push(LifecycleEvent::Added { id, position });
        self.items.push(item);
        self.items.last()
    }

    /// Scroll, bob and breathe every item
    ///
    /// # Arguments
    /// * `elapsed_s` - Seconds since start (drives the periodic motion)
    /// * `dt_s` - Seconds since the previous tick (drives scrolling)
    pub fn advance(&mut self, elapsed_s: f32, dt_s: f32) {
        let phase = elapsed_s * self.params.phase_rate;
        for item in &mut self.items {
            item.position.z -= item.scroll_velocity * dt_s;
            item.position.y =
                self.params.bob_base + (phase + item.bob_phase_seed).sin() * self.params.bob_amplitude;
            item.scale = 0.8 + 0.2 * (phase + item.position.z * 0.1).sin();
        }
    }

    /// Remove items that scrolled past the cull line
    ///
    /// # Returns
    /// * Number of items removed
    pub fn cull(&mut self) -> usize {
        let cull_z = self.params.cull_z;
        let before = self.items.len();
        let events = &mut self.events;
        self.items.retain(|item| {
            let keep = item.position.z > cull_z;
            if !keep {
                events.push(LifecycleEvent::Removed { id: item.id });
            }
            keep
        });
        before - self.items.len()
    }
}
