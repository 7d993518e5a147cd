//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Simulation clock only (no wall-clock timers)
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod bullets;
pub mod events;
pub mod monster;
pub mod projectile;
pub mod scheduler;
pub mod state;
pub mod tick;

pub use bullets::{Barrel, BulletSystem, circle_angles, fan_angles, symmetric_spread};
pub use events::{RemovalReason, SimEvent};
pub use monster::{FireRequest, Monster, MonsterId, MotionState};
pub use projectile::{Owner, Projectile, ProjectileId, TurnState};
pub use scheduler::{Deferred, Scheduler, Timer};
pub use state::World;
pub use tick::tick;
