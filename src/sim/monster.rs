//! Hostile units
//!
//! Each monster runs one behavior for its whole life. Movement state lives in a
//! single tagged value so a unit can't be, say, dashing and oscillating at once.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sprite::{display_size, radius_from_extents};
use crate::tuning::{BehaviorDef, FanVolley, MonsterDef};
use crate::{deg_to_rad, polar_to_cartesian};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct MonsterId(pub u32);

/// Runtime movement state
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum MotionState {
    Linear {
        fire_timer_ms: f32,
    },
    Oscillating {
        /// y the sine wave is centered on
        baseline: f32,
        /// Accumulated simulation seconds
        elapsed: f32,
        fire_timer_ms: f32,
    },
    Dashing {
        target: Vec2,
    },
    Paused {
        /// Seconds left before the next dash
        remaining: f32,
    },
}

/// Pattern a monster wants fired this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireRequest {
    Circle {
        pos: Vec2,
        count: u32,
    },
    /// First wave now, the rest through the scheduler
    FanVolley {
        pos: Vec2,
        fan: FanVolley,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Monster {
    pub id: MonsterId,
    pub def: MonsterDef,
    pub pos: Vec2,
    hp: i32,
    alive: bool,
    flashing: bool,
    state: MotionState,
    unit_size: f32,
}

impl Monster {
    pub fn new(
        id: MonsterId,
        def: &MonsterDef,
        pos: Vec2,
        unit_size: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let state = match def.behavior {
            BehaviorDef::Linear { .. } => MotionState::Linear { fire_timer_ms: 0.0 },
            BehaviorDef::Oscillating { .. } => MotionState::Oscillating {
                baseline: pos.y,
                elapsed: 0.0,
                fire_timer_ms: 0.0,
            },
            BehaviorDef::DashPause { .. } => MotionState::Dashing {
                target: next_dash_target(pos, unit_size, rng),
            },
        };

        Self {
            id,
            def: *def,
            pos,
            hp: def.hp,
            alive: true,
            flashing: false,
            state,
            unit_size,
        }
    }

    /// Advance movement by `dt_ms`. The state transition is applied before any
    /// fire request is returned, so a request is never issued twice for one
    /// transition.
    pub fn update(&mut self, dt_ms: f32, rng: &mut impl Rng) -> Option<FireRequest> {
        if !self.alive {
            return None;
        }
        let dt = dt_ms / 1000.0;

        match (self.def.behavior, &mut self.state) {
            (BehaviorDef::Linear { volley }, MotionState::Linear { fire_timer_ms }) => {
                self.pos.x -= self.def.speed * dt;
                tick_fire_timer(fire_timer_ms, dt_ms, volley.interval_ms).then_some(
                    FireRequest::Circle {
                        pos: self.pos,
                        count: volley.count,
                    },
                )
            }
            (
                BehaviorDef::Oscillating { volley },
                MotionState::Oscillating {
                    baseline,
                    elapsed,
                    fire_timer_ms,
                },
            ) => {
                *elapsed += dt;
                self.pos.x -= self.def.speed * dt;
                self.pos.y = *baseline + (*elapsed * OSCILLATION_OMEGA).sin() * self.unit_size;
                tick_fire_timer(fire_timer_ms, dt_ms, volley.interval_ms).then_some(
                    FireRequest::Circle {
                        pos: self.pos,
                        count: volley.count,
                    },
                )
            }
            (BehaviorDef::DashPause { .. }, MotionState::Paused { remaining }) => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    let target = next_dash_target(self.pos, self.unit_size, rng);
                    log::debug!(
                        "Monster {:?} dashing toward ({:.1}, {:.1})",
                        self.id,
                        target.x,
                        target.y
                    );
                    self.state = MotionState::Dashing { target };
                }
                None
            }
            (BehaviorDef::DashPause { fan }, MotionState::Dashing { target }) => {
                let to_target = *target - self.pos;
                let dist = to_target.length();
                if dist < DASH_ARRIVE_DISTANCE {
                    self.state = MotionState::Paused {
                        remaining: DASH_PAUSE_SECS,
                    };
                    log::debug!(
                        "Monster {:?} paused at ({:.1}, {:.1})",
                        self.id,
                        self.pos.x,
                        self.pos.y
                    );
                    return Some(FireRequest::FanVolley { pos: self.pos, fan });
                }
                let step = (self.def.speed * DASH_SPEED_FACTOR * dt).min(dist);
                self.pos += to_target / dist * step;
                None
            }
            (behavior, state) => {
                // Unreachable by construction: state is derived from the behavior
                log::warn!(
                    "Monster {:?} state {:?} does not match {:?}",
                    self.id,
                    state,
                    behavior
                );
                None
            }
        }
    }

    /// Apply damage. Returns true only on the call that kills the unit.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.hp -= amount;
        self.flashing = true;
        if self.hp <= 0 {
            self.alive = false;
            return true;
        }
        false
    }

    pub fn set_flashing(&mut self, flashing: bool) {
        self.flashing = flashing;
    }

    pub fn is_flashing(&self) -> bool {
        self.flashing
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.def.hp
    }

    pub fn exp(&self) -> u32 {
        self.def.exp
    }

    pub fn contact_damage(&self) -> i32 {
        self.def.damage
    }

    pub fn kind(&self) -> &'static str {
        self.def.kind
    }

    pub fn state(&self) -> MotionState {
        self.state
    }

    /// On-screen extents (collision proxy)
    pub fn display_size(&self) -> Vec2 {
        display_size(self.def.sprite_size, self.def.unit_size, self.unit_size)
    }

    pub fn radius(&self) -> f32 {
        radius_from_extents(self.display_size())
    }
}

/// Accumulate the fire timer; true (and reset) once the interval is reached.
/// An interval of 0 never fires.
fn tick_fire_timer(timer_ms: &mut f32, dt_ms: f32, interval_ms: u32) -> bool {
    if interval_ms == 0 {
        return false;
    }
    *timer_ms += dt_ms;
    if *timer_ms >= interval_ms as f32 {
        *timer_ms = 0.0;
        return true;
    }
    false
}

/// A point three units ahead, within 45° of due left
fn next_dash_target(from: Vec2, unit_size: f32, rng: &mut impl Rng) -> Vec2 {
    let offset = rng.random_range(-DASH_CONE_DEG..=DASH_CONE_DEG);
    let angle = deg_to_rad(180.0 + offset as f32);
    from + polar_to_cartesian(unit_size * DASH_LENGTH_UNITS, angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{DRONE, MEDIUM, SMALL};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const UNIT: f32 = 48.0;

    fn spawn(def: &MonsterDef) -> (Monster, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(7);
        let monster = Monster::new(MonsterId(1), def, Vec2::new(700.0, 300.0), UNIT, &mut rng);
        (monster, rng)
    }

    #[test]
    fn test_linear_moves_left_and_fires_on_interval() {
        let (mut m, mut rng) = spawn(&DRONE);
        let mut fired = 0;
        // 3000ms in 100ms steps: fires on the 30th
        for step in 1..=30 {
            if let Some(req) = m.update(100.0, &mut rng) {
                assert_eq!(step, 30);
                assert!(matches!(req, FireRequest::Circle { count: 8, .. }));
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
        assert!((m.pos.x - (700.0 - DRONE.speed * 3.0)).abs() < 1e-2);
        assert_eq!(m.pos.y, 300.0);
    }

    #[test]
    fn test_oscillation_follows_sine() {
        let (mut m, mut rng) = spawn(&SMALL);
        m.update(500.0, &mut rng);
        // quarter period: peak
        assert!((m.pos.y - (300.0 + UNIT)).abs() < 1e-3);
        m.update(1000.0, &mut rng);
        assert!((m.pos.y - (300.0 - UNIT)).abs() < 1e-3);
    }

    #[test]
    fn test_dash_starts_dashing_toward_cone() {
        for seed in 0..50 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let origin = Vec2::new(700.0, 300.0);
            let m = Monster::new(MonsterId(1), &MEDIUM, origin, UNIT, &mut rng);
            let MotionState::Dashing { target } = m.state() else {
                panic!("dash monster must start dashing");
            };
            let offset = target - origin;
            assert!((offset.length() - 3.0 * UNIT).abs() < 1e-3);
            // within 45° of due left
            assert!(offset.x < 0.0);
            assert!(offset.y.abs() <= -offset.x + 1e-3);
        }
    }

    #[test]
    fn test_dash_fires_once_per_pause() {
        let (mut m, mut rng) = spawn(&MEDIUM);
        let mut transitions = 0;
        let mut volleys = 0;
        for _ in 0..1000 {
            let was_dashing = matches!(m.state(), MotionState::Dashing { .. });
            let req = m.update(16.0, &mut rng);
            let now_paused = matches!(m.state(), MotionState::Paused { .. });
            if was_dashing && now_paused {
                transitions += 1;
                assert!(matches!(req, Some(FireRequest::FanVolley { .. })));
            }
            if req.is_some() {
                volleys += 1;
            }
        }
        assert!(transitions >= 3);
        assert_eq!(volleys, transitions);
    }

    #[test]
    fn test_pause_lasts_one_second() {
        let (mut m, mut rng) = spawn(&MEDIUM);
        while !matches!(m.state(), MotionState::Paused { .. }) {
            m.update(10.0, &mut rng);
        }
        let paused_at = m.pos;
        for _ in 0..99 {
            m.update(10.0, &mut rng);
            assert!(matches!(m.state(), MotionState::Paused { .. }));
        }
        assert_eq!(m.pos, paused_at);
        m.update(20.0, &mut rng);
        assert!(matches!(m.state(), MotionState::Dashing { .. }));
    }

    #[test]
    fn test_take_damage_kills_at_zero() {
        let mut m = spawn(&SMALL).0;
        let mut m5 = Monster { hp: 5, ..m.clone() };
        assert!(m5.take_damage(5));
        assert!(!m5.is_alive());

        m.hp = 5;
        assert!(!m.take_damage(3));
        assert_eq!(m.hp(), 2);
        assert!(m.take_damage(3));
        assert!(!m.is_alive());
        // Dead units ignore further damage
        assert!(!m.take_damage(3));
        assert_eq!(m.hp(), -1);
    }

    #[test]
    fn test_dead_monster_is_frozen() {
        let (mut m, mut rng) = spawn(&DRONE);
        m.take_damage(100);
        let pos = m.pos;
        for _ in 0..400 {
            assert!(m.update(16.0, &mut rng).is_none());
        }
        assert_eq!(m.pos, pos);
    }

    #[test]
    fn test_queries() {
        let m = spawn(&MEDIUM).0;
        assert_eq!(m.kind(), "medium");
        assert_eq!(m.exp(), MEDIUM.exp);
        assert_eq!(m.contact_damage(), MEDIUM.damage);
        assert_eq!(m.max_hp(), MEDIUM.hp);
        // 96x96 at 1.5 units of 48px -> 72x72
        assert_eq!(m.display_size(), Vec2::new(72.0, 72.0));
        assert_eq!(m.radius(), 36.0);
    }

    proptest! {
        #[test]
        fn prop_oscillation_is_frame_rate_independent(
            steps in proptest::collection::vec(1.0f32..50.0, 1..200),
        ) {
            let (mut m, mut rng) = spawn(&SMALL);
            let mut t = 0.0f64;
            for dt in &steps {
                m.update(*dt, &mut rng);
                t += *dt as f64 / 1000.0;
            }
            let expected = 300.0 + UNIT as f64 * (std::f64::consts::PI * t).sin();
            prop_assert!((m.pos.y as f64 - expected).abs() < 0.05);
        }
    }
}
