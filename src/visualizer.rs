//! Frame loop owner: routes audio frames and display ticks through the
//! terrain, camera and decoration systems.
//!
//! Audio frames and display ticks are independent event sources. Each
//! handler runs under one `&mut` borrow, so a renderer reading the mesh
//! between calls never sees a half-applied update.

use log::{debug, info, warn};

use crate::audio::{conform_frame, AudioSource, Beat, BeatDetector};
use crate::camera::{CameraHeightSampler, FollowCamera};
use crate::clock::{Clock, FpsTracker};
use crate::details::{Bird, DetailItem, DetailManager, Flock, LifecycleEvent};
use crate::error::ConfigError;
use crate::params::VisualizerConfig;
use crate::terrain::{MeshUpdate, TerrainGrid, TerrainSystem};

/// What one accepted audio frame did
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Wave amplitude used for the height field
    pub amplitude: f32,

    /// Elevation the camera now tracks (before clearance)
    pub target_elevation: f32,

    /// A decoration was placed on the newest row
    pub spawned_detail: bool,

    pub beat: Option<Beat>,
}

pub struct Visualizer {
    terrain: TerrainSystem,
    sampler: CameraHeightSampler,
    camera: FollowCamera,
    details: DetailManager,
    flock: Flock,
    beat: BeatDetector,
    source: AudioSource,
    fps: FpsTracker,
    clock: Box<dyn Clock>,
    min_fps: f32,
    last_tick: Option<f64>,
}

impl Visualizer {
    /// Validate the configuration and build every subsystem
    pub fn new(config: VisualizerConfig, clock: Box<dyn Clock>) -> Result<Self, ConfigError> {
        let sampler = CameraHeightSampler::new(config.sampler, config.landscape.camera_x_range);
        let details = DetailManager::with_seed(config.detail.clone(), &config.landscape, config.seed)?;
        let flock = Flock::with_seed(config.flock, config.seed.wrapping_add(1))?;
        let terrain = TerrainSystem::new(config.landscape, config.wave)?;

        info!(
            "Visualizer ready: {}x{} grid, {} colouring, details {:?}, seed {}",
            terrain.grid.row_len(),
            terrain.grid.num_rows(),
            terrain.classifier_name(),
            details.kind(),
            config.seed
        );

        Ok(Self {
            terrain,
            sampler,
            camera: FollowCamera::new(config.camera),
            details,
            flock,
            beat: BeatDetector::new(config.beat),
            source: AudioSource::Idle,
            fps: FpsTracker::new(),
            clock,
            min_fps: config.detail.min_fps,
            last_tick: None,
        })
    }

    /// Begin accepting audio frames
    ///
    /// # Returns
    /// * `false` if audio had already started (the call is ignored)
    pub fn start_audio(&mut self) -> bool {
        let now = self.clock.now();
        if self.source.activate(now) {
            info!("Audio started at {:.2}s", now);
            true
        } else {
            warn!("Audio already playing; ignoring start request");
            false
        }
    }

    pub fn audio_source(&self) -> AudioSource {
        self.source
    }

    /// Seconds since audio started, 0 while idle
    pub fn elapsed(&self) -> f32 {
        self.source.elapsed(self.clock.now()).unwrap_or(0.0) as f32
    }

    /// Apply one byte-frequency frame
    ///
    /// Height field, colours, camera target and decoration spawn are
    /// updated in that order. Frames arriving before audio starts are
    /// dropped. Bins past the landscape resolution are ignored; short
    /// frames are used as received.
    pub fn on_audio_frame(&mut self, frame: &[u8]) -> Option<FrameReport> {
        let Some(elapsed) = self.source.elapsed(self.clock.now()) else {
            debug!("Audio frame before start; dropped");
            return None;
        };

        let frame = conform_frame(frame, self.terrain.grid.resolution());
        let amplitude = self.terrain.update(frame, elapsed as f32);

        let target_elevation = self
            .sampler
            .sample_target_elevation(&self.terrain.grid, self.camera.x());
        self.camera.set_terrain_elevation(target_elevation);

        let spawned_detail = self
            .details
            .try_spawn(&self.terrain.grid, self.fps.above(self.min_fps))
            .is_some();

        let beat = self.beat.detect(frame);
        if beat.is_some() {
            self.flock.on_beat();
        }

        Some(FrameReport {
            amplitude,
            target_elevation,
            spawned_detail,
            beat,
        })
    }

    /// Advance everything animated by the display clock
    ///
    /// Keeps running after audio stops so decorations scroll out.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        let dt = self.last_tick.map_or(0.0, |last| (now - last).max(0.0)) as f32;
        self.last_tick = Some(now);
        self.fps.record_frame(now);

        self.camera.step();

        let elapsed = now as f32;
        self.details.advance(elapsed, dt);
        self.flock.advance(elapsed, dt);

        let culled = self.details.cull() + self.flock.cull();
        if culled > 0 {
            debug!("Culled {} scene object(s)", culled);
        }
    }

    /// Pending add/remove notifications from every population
    pub fn drain_events(&mut self) -> Vec<LifecycleEvent> {
        let mut events: Vec<_> = self.details.drain_events().collect();
        events.extend(self.flock.drain_events());
        events
    }

    /// Consume the mesh change flags since the last call
    pub fn take_mesh_update(&mut self) -> MeshUpdate {
        self.terrain.grid.take_update()
    }

    pub fn grid(&self) -> &TerrainGrid {
        &self.terrain.grid
    }

    pub fn terrain(&self) -> &TerrainSystem {
        &self.terrain
    }

    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    pub fn details(&self) -> &[DetailItem] {
        self.details.items()
    }

    pub fn birds(&self) -> &[Bird] {
        self.flock.birds()
    }

    pub fn fps(&self) -> &FpsTracker {
        &self.fps
    }
}
