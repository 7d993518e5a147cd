//! Events reported to the render and collision collaborators
//!
//! The simulation owns no sprites. A renderer drains these each frame and keeps
//! its own id → sprite map.

use glam::Vec2;
use serde::Serialize;

use super::monster::MonsterId;
use super::projectile::{Owner, ProjectileId};

/// Why a projectile left the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RemovalReason {
    /// Left the culling rectangle
    OutOfBounds,
    /// Removed by a collaborator (usually after a hit)
    Explicit,
    /// Bulk release at teardown
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SimEvent {
    ProjectileSpawned {
        id: ProjectileId,
        pos: Vec2,
        rotation: f32,
        owner: Owner,
        /// Frame key prefix
        visual: &'static str,
        unit_size: f32,
        frame_count: u32,
        depth: i32,
    },
    ProjectileTurned {
        id: ProjectileId,
        rotation: f32,
    },
    ProjectileRemoved {
        id: ProjectileId,
        reason: RemovalReason,
    },
    MonsterSpawned {
        id: MonsterId,
        pos: Vec2,
        kind: &'static str,
        unit_size: f32,
        frame_count: u32,
        depth: i32,
    },
    /// Tint on (`active`) or back off
    MonsterHitFlash {
        id: MonsterId,
        active: bool,
    },
    /// Start the fade-out; the unit stays in the world until `MonsterDespawned`
    MonsterDied {
        id: MonsterId,
        exp: u32,
        /// Fade-out duration
        fade_ms: f64,
        /// Scale the sprite grows to while fading
        fade_scale: f32,
    },
    /// Gone from the world: fade finished, left the field, or torn down
    MonsterDespawned {
        id: MonsterId,
    },
}
