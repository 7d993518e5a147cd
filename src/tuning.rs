//! Data-driven balance: projectile and monster definitions
//!
//! Speeds are pixels per second, timers are milliseconds, sizes are in size units.

use glam::Vec2;
use serde::Serialize;

/// Static description of a projectile type
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectileDef {
    /// Visual key prefix (frames are `{key}-{i}`)
    pub key: &'static str,
    /// Base speed (pixels/s)
    pub speed: f32,
    pub damage: i32,
    /// Display size in size units (0 = keep native sprite size)
    pub unit_size: f32,
    pub frame_count: u32,
    /// Native sprite extents in pixels
    pub sprite_size: Vec2,
}

pub const PLAYER_BULLET: ProjectileDef = ProjectileDef {
    key: "player-bullet",
    speed: 600.0,
    damage: 1,
    unit_size: 0.5,
    frame_count: 4,
    sprite_size: Vec2::new(32.0, 16.0),
};

pub const MOB_BULLET: ProjectileDef = ProjectileDef {
    key: "mob-bullet",
    speed: 200.0,
    damage: 1,
    unit_size: 0.3,
    frame_count: 2,
    sprite_size: Vec2::new(16.0, 16.0),
};

/// Ring of projectiles fired on a fixed timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CircleVolley {
    pub count: u32,
    pub interval_ms: u32,
}

impl Default for CircleVolley {
    fn default() -> Self {
        Self {
            count: 8,
            interval_ms: 3000,
        }
    }
}

/// Leftward fan repeated in waves
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FanVolley {
    pub spread_deg: f32,
    pub count: u32,
    pub waves: u32,
    pub wave_interval_ms: u32,
}

impl Default for FanVolley {
    fn default() -> Self {
        Self {
            spread_deg: 160.0,
            count: 8,
            waves: 3,
            wave_interval_ms: 200,
        }
    }
}

impl FanVolley {
    /// Projectiles emitted by one full volley
    pub fn total_projectiles(&self) -> u32 {
        self.waves * self.count
    }
}

/// Movement/firing strategy, fixed for a monster's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum BehaviorDef {
    /// Straight left, circle volley on a timer
    Linear { volley: CircleVolley },
    /// Left with a sine wave on y, circle volley on a timer
    Oscillating { volley: CircleVolley },
    /// Dash toward random points, fan volley on every pause
    DashPause { fan: FanVolley },
}

/// Static description of a monster type
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonsterDef {
    pub kind: &'static str,
    pub hp: i32,
    /// Base speed (pixels/s)
    pub speed: f32,
    pub unit_size: f32,
    pub frame_count: u32,
    pub sprite_size: Vec2,
    /// Experience awarded on kill
    pub exp: u32,
    /// Contact damage
    pub damage: i32,
    pub behavior: BehaviorDef,
}

pub const DRONE: MonsterDef = MonsterDef {
    kind: "drone",
    hp: 2,
    speed: 120.0,
    unit_size: 1.0,
    frame_count: 4,
    sprite_size: Vec2::new(64.0, 64.0),
    exp: 5,
    damage: 1,
    behavior: BehaviorDef::Linear {
        volley: CircleVolley {
            count: 8,
            interval_ms: 3000,
        },
    },
};

pub const SMALL: MonsterDef = MonsterDef {
    kind: "small",
    hp: 3,
    speed: 80.0,
    unit_size: 1.0,
    frame_count: 4,
    sprite_size: Vec2::new(64.0, 48.0),
    exp: 10,
    damage: 1,
    behavior: BehaviorDef::Oscillating {
        volley: CircleVolley {
            count: 8,
            interval_ms: 3000,
        },
    },
};

pub const MEDIUM: MonsterDef = MonsterDef {
    kind: "medium",
    hp: 8,
    speed: 60.0,
    unit_size: 1.5,
    frame_count: 6,
    sprite_size: Vec2::new(96.0, 96.0),
    exp: 30,
    damage: 2,
    behavior: BehaviorDef::DashPause {
        fan: FanVolley {
            spread_deg: 160.0,
            count: 8,
            waves: 3,
            wave_interval_ms: 200,
        },
    },
};

/// All built-in monster definitions
pub const MONSTERS: [MonsterDef; 3] = [DRONE, SMALL, MEDIUM];

/// Look up a built-in monster by kind
pub fn monster_by_kind(kind: &str) -> Option<&'static MonsterDef> {
    MONSTERS.iter().find(|def| def.kind == kind)
}
