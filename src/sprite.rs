//! Render-binding helpers
//!
//! The simulation never draws. These helpers describe what the renderer needs
//! (depth layer, display size, frame and animation keys) so every renderer
//! derives them the same way.

use glam::Vec2;
use serde::Serialize;

use crate::sim::Owner;
use crate::tuning::{MonsterDef, ProjectileDef};

/// Draw order: background < monsters < player bullets < monster bullets
pub const DEPTH_MONSTER: i32 = 5;
pub const DEPTH_PLAYER_BULLET: i32 = 7;
pub const DEPTH_MONSTER_BULLET: i32 = 9;

pub const PROJECTILE_FRAME_RATE: u32 = 10;
pub const MONSTER_FRAME_RATE: u32 = 6;

/// Scale factor on death fade (sprite grows while fading out)
pub const DEATH_FADE_SCALE: f32 = 1.5;

pub fn projectile_depth(owner: Owner) -> i32 {
    match owner {
        Owner::Player => DEPTH_PLAYER_BULLET,
        Owner::Monster => DEPTH_MONSTER_BULLET,
    }
}

/// Uniform scale so the larger native extent spans `units` size units.
/// Returns `None` (leave unscaled) for a zero unit request or an empty sprite.
pub fn unit_scale(native: Vec2, units: f32, unit_size: f32) -> Option<f32> {
    if units == 0.0 {
        return None;
    }
    let max_dimension = native.x.max(native.y);
    if max_dimension <= 0.0 {
        return None;
    }
    Some(unit_size * units / max_dimension)
}

/// On-screen extents after unit scaling
pub fn display_size(native: Vec2, units: f32, unit_size: f32) -> Vec2 {
    match unit_scale(native, units, unit_size) {
        Some(scale) => native * scale,
        None => native,
    }
}

/// Circular collision proxy: half the smaller display extent
pub fn radius_from_extents(display: Vec2) -> f32 {
    display.x.min(display.y) / 2.0
}

/// Texture key for a single frame
pub fn frame_key(prefix: &str, index: u32) -> String {
    format!("{prefix}-{index}")
}

/// Looping animation registered once per key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimationSpec {
    pub key: String,
    pub frames: Vec<String>,
    pub frame_rate: u32,
    /// -1 loops forever
    pub repeat: i32,
}

impl AnimationSpec {
    pub fn for_projectile(def: &ProjectileDef) -> Self {
        Self {
            key: format!("{}-anim", def.key),
            frames: (0..def.frame_count).map(|i| frame_key(def.key, i)).collect(),
            frame_rate: PROJECTILE_FRAME_RATE,
            repeat: -1,
        }
    }

    pub fn for_monster(def: &MonsterDef) -> Self {
        let prefix = monster_frame_prefix(def);
        Self {
            key: format!("mob-{}-idle", def.kind),
            frames: (0..def.frame_count).map(|i| frame_key(&prefix, i)).collect(),
            frame_rate: MONSTER_FRAME_RATE,
            repeat: -1,
        }
    }
}

pub fn monster_frame_prefix(def: &MonsterDef) -> String {
    format!("mob-{}", def.kind)
}
