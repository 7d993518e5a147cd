//! A single projectile
//!
//! Moves in a straight line; optionally turns exactly once after traveling a
//! fixed distance from where it was fired.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::heading;
use crate::settings::TurnMode;
use crate::sprite::{display_size, radius_from_extents};
use crate::tuning::ProjectileDef;

/// Which side fired a projectile (and therefore who it can hurt)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Monster,
}

/// Handle for a live projectile, valid until it is removed
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ProjectileId(pub u32);

/// One-shot trajectory change
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum TurnState {
    /// Never turns
    None,
    /// Turns once `distance` pixels from the origin have been covered
    Pending { distance: f32, angle: f32 },
    /// Already turned; terminal
    Done,
}

#[derive(Debug, Clone, Serialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing for the renderer (radians)
    pub rotation: f32,
    pub owner: Owner,
    pub def: ProjectileDef,
    origin: Vec2,
    turn: TurnState,
    radius: f32,
}

impl Projectile {
    /// `turn_distance` is in pixels; `<= 0` disables turning.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ProjectileId,
        pos: Vec2,
        angle: f32,
        def: &ProjectileDef,
        owner: Owner,
        turn_distance: f32,
        turn_angle: f32,
        unit_size: f32,
    ) -> Self {
        let turn = if turn_distance > 0.0 {
            TurnState::Pending {
                distance: turn_distance,
                angle: turn_angle,
            }
        } else {
            TurnState::None
        };
        let display = display_size(def.sprite_size, def.unit_size, unit_size);

        Self {
            id,
            pos,
            vel: heading(angle) * def.speed,
            rotation: angle,
            owner,
            def: *def,
            origin: pos,
            turn,
            radius: radius_from_extents(display),
        }
    }

    /// Integrate position and evaluate the turn. Returns true on the update
    /// where the turn happens.
    pub fn update(&mut self, dt: f32, mode: TurnMode) -> bool {
        self.pos += self.vel * dt;

        let TurnState::Pending { distance, angle } = self.turn else {
            return false;
        };
        if self.origin.distance(self.pos) < distance {
            return false;
        }

        match mode {
            TurnMode::SnapHorizontal => {
                self.vel = Vec2::new(self.def.speed, 0.0);
                self.rotation = 0.0;
            }
            TurnMode::Requested => {
                self.vel = heading(angle) * self.def.speed;
                self.rotation = angle;
            }
        }
        self.turn = TurnState::Done;
        true
    }

    pub fn damage(&self) -> i32 {
        self.def.damage
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn turn_state(&self) -> TurnState {
        self.turn
    }

    pub fn has_turned(&self) -> bool {
        self.turn == TurnState::Done
    }

    /// Requested post-turn angle, if a turn is still pending
    pub fn pending_turn_angle(&self) -> Option<f32> {
        match self.turn {
            TurnState::Pending { angle, .. } => Some(angle),
            _ => None,
        }
    }

    /// Distance covered from the firing point
    pub fn traveled(&self) -> f32 {
        self.origin.distance(self.pos)
    }

    /// Inclusive bounds test: (min_x, max_x, min_y, max_y)
    pub fn within(&self, bounds: (f32, f32, f32, f32)) -> bool {
        let (min_x, max_x, min_y, max_y) = bounds;
        self.pos.x >= min_x && self.pos.x <= max_x && self.pos.y >= min_y && self.pos.y <= max_y
    }
}
