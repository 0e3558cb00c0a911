//! Birds launched on detected beats.

use glam::Vec3;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{LifecycleEvent, ObjectId, ObjectKind};
use crate::error::ConfigError;
use crate::params::FlockParams;

#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    pub id: ObjectId,
    pub position: Vec3,

    /// Current wing rotation (radians)
    pub wing_angle: f32,
}

/// Beat-driven birds drifting away from the camera
pub struct Flock {
    params: FlockParams,
    birds: Vec<Bird>,
    events: Vec<LifecycleEvent>,
    rng: ChaCha8Rng,
    next_serial: u64,
}

impl Flock {
    pub fn new(params: FlockParams, rng: ChaCha8Rng) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&params.spawn_chance) {
            return Err(ConfigError::invalid("spawnChance", "must lie in [0, 1]"));
        }
        if params.spawn_half_width < 0.0 || params.altitude_jitter < 0.0 {
            return Err(ConfigError::invalid("flock", "spawn extents must be non-negative"));
        }
        Ok(Self {
            params,
            birds: Vec::new(),
            events: Vec::new(),
            rng,
            next_serial: 0,
        })
    }

    pub fn with_seed(params: FlockParams, seed: u64) -> Result<Self, ConfigError> {
        Self::new(params, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn birds(&self) -> &[Bird] {
        &self.birds
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, LifecycleEvent> {
        self.events.drain(..)
    }

    /// Roll for a new bird after a beat
    pub fn on_beat(&mut self) -> Option<&Bird> {
        if !self.rng.gen_bool(self.params.spawn_chance) {
            return None;
        }

        let half = self.params.spawn_half_width;
        let x = if half > 0.0 {
            self.rng.gen_range(-half..half)
        } else {
            0.0
        };
        let lift = if self.params.altitude_jitter > 0.0 {
            self.rng.gen_range(0.0..self.params.altitude_jitter)
        } else {
            0.0
        };
        let position = Vec3::new(x, self.params.spawn_altitude + lift, self.params.spawn_z);

        let id = ObjectId {
            kind: ObjectKind::Bird,
            serial: self.next_serial,
        };
        self.next_serial += 1;
        debug!("Bird {} launched at {:?}", id.serial, position);

        self.events.push(LifecycleEvent::Added { id, position });
        self.birds.push(Bird {
            id,
            position,
            wing_angle: 0.0,
        });
        self.birds.last()
    }

    /// Drift and flap every bird
    pub fn advance(&mut self, elapsed_s: f32, dt_s: f32) {
        for bird in &mut self.birds {
            bird.position.z -= self.params.drift_speed * dt_s;
            bird.wing_angle = (elapsed_s * self.params.flap_rate + bird.position.x).sin()
                * self.params.flap_amplitude;
        }
    }

    /// Remove birds past the cull line, returning how many left
    pub fn cull(&mut self) -> usize {
        let cull_z = self.params.cull_z;
        let before = self.birds.len();
        let events = &mut self.events;
        self.birds.retain(|bird| {
            let keep = bird.position.z >= cull_z;
            if !keep {
                events.push(LifecycleEvent::Removed { id: bird.id });
            }
            keep
        });
        before - self.birds.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn certain() -> FlockParams {
        FlockParams {
            spawn_chance: 1.0,
            ..FlockParams::default()
        }
    }

    #[test]
    fn test_rejects_bad_chance() {
        let params = FlockParams {
            spawn_chance: 1.5,
            ..FlockParams::default()
        };
        assert!(Flock::with_seed(params, 0).is_err());
    }

    #[test]
    fn test_launch_within_bounds() {
        let mut flock = Flock::with_seed(certain(), 7).unwrap();
        for _ in 0..50 {
            let bird = flock.on_beat().unwrap();
            assert!(bird.position.x >= -50.0 && bird.position.x < 50.0);
            assert!(bird.position.y >= 70.0 && bird.position.y < 90.0);
            assert_eq!(bird.position.z, 100.0);
        }
        assert_eq!(flock.drain_events().count(), 50);
    }

    #[test]
    fn test_never_launch_at_zero_chance() {
        let params = FlockParams {
            spawn_chance: 0.0,
            ..FlockParams::default()
        };
        let mut flock = Flock::with_seed(params, 7).unwrap();
        for _ in 0..100 {
            assert!(flock.on_beat().is_none());
        }
        assert!(flock.birds().is_empty());
    }

    #[test]
    fn test_drift_and_cull() {
        let mut flock = Flock::with_seed(certain(), 3).unwrap();
        flock.on_beat();
        flock.drain_events().for_each(drop);

        // 100 - 90 * 5 = -350, still inside
        flock.advance(5.0, 5.0);
        assert_eq!(flock.birds()[0].position.z, -350.0);
        assert!(flock.birds()[0].wing_angle.abs() <= 0.3);
        assert_eq!(flock.cull(), 0);

        flock.advance(6.0, 1.0);
        let id = flock.birds()[0].id;
        assert_eq!(flock.cull(), 1);
        assert!(flock.birds().is_empty());
        assert_eq!(
            flock.drain_events().collect::<Vec<_>>(),
            vec![LifecycleEvent::Removed { id }]
        );
    }
}
