//! STG Sim - enemy motion and bullet-pattern engine for a side-scrolling shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (projectiles, monsters, deferred actions)
//! - `tuning`: Data-driven projectile and monster definitions
//! - `sprite`: Render-binding helpers (scaling, depth layers, animation keys)
//! - `assets`: Image key/path manifest for the asset loader
//! - `settings`: Playfield and engine configuration

pub mod assets;
pub mod error;
pub mod settings;
pub mod sim;
pub mod sprite;
pub mod tuning;

pub use error::ConfigError;
pub use settings::{Settings, TurnMode};

use glam::Vec2;

/// Engine configuration constants
pub mod consts {
    /// Default playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
    /// Projectiles are culled once they leave the playfield expanded by this much
    pub const CULL_MARGIN: f32 = 50.0;

    /// Size unit in playfield pixels (turn distances, dash length, sprite sizes)
    pub const UNIT_SIZE: f32 = 48.0;

    /// Dash arrival threshold (pixels, not units)
    pub const DASH_ARRIVE_DISTANCE: f32 = 5.0;
    /// Dash length in size units
    pub const DASH_LENGTH_UNITS: f32 = 3.0;
    /// Half-width of the dash heading cone around due left (degrees)
    pub const DASH_CONE_DEG: i32 = 45;
    /// Dash moves at this multiple of base speed
    pub const DASH_SPEED_FACTOR: f32 = 2.0;
    /// Pause between dashes (seconds)
    pub const DASH_PAUSE_SECS: f32 = 1.0;

    /// Oscillation angular frequency (rad/s, 2 second period)
    pub const OSCILLATION_OMEGA: f32 = std::f32::consts::PI;

    /// Hit flash duration (ms)
    pub const HIT_FLASH_MS: f64 = 100.0;
    /// Death fade-out duration (ms)
    pub const DEATH_FADE_MS: f64 = 200.0;
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * std::f32::consts::PI / 180.0
}

/// Unit direction vector for an angle (radians, 0 = right, y grows downward)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    heading(theta) * r
}
