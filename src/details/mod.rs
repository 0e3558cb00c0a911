//! Short-lived decorations anchored to the terrain and the beat-driven flock.
//!
//! Each population owns its objects outright. The renderer only learns
//! about them through [`LifecycleEvent`]s and borrows them for drawing.

mod flock;
mod manager;

use glam::Vec3;

use crate::params::DetailKind;

// Re-export public types
pub use flock::{Bird, Flock};
pub use manager::{DetailItem, DetailManager};

/// What a scene object is, for the renderer's benefit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Detail(DetailKind),
    Bird,
}

/// Identity of one scene object, unique within its kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId {
    pub kind: ObjectKind,
    pub serial: u64,
}

/// Add/remove notifications for the renderer
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    Added { id: ObjectId, position: Vec3 },
    Removed { id: ObjectId },
}

impl LifecycleEvent {
    pub fn id(&self) -> ObjectId {
        match self {
            LifecycleEvent::Added { id, .. } | LifecycleEvent::Removed { id } => *id,
        }
    }
}
