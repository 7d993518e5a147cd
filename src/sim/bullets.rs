//! Bullet system: owns every live projectile
//!
//! Spawns single shots and geometric patterns, advances all projectiles each
//! tick and culls those that leave the playfield.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use super::events::{RemovalReason, SimEvent};
use super::projectile::{Owner, Projectile, ProjectileId};
use crate::deg_to_rad;
use crate::settings::{Settings, TurnMode};
use crate::sprite::projectile_depth;
use crate::tuning::{MOB_BULLET, PLAYER_BULLET, ProjectileDef};

/// Main barrels in the player spread
pub const SPREAD_BARRELS: i32 = 7;
/// Launch angle difference between adjacent main barrels (degrees)
pub const SPREAD_FIRE_STEP_DEG: f32 = 10.0;
/// Post-turn angle difference between adjacent main barrels (degrees)
pub const SPREAD_TURN_STEP_DEG: f32 = 1.0;
pub const SPREAD_TURN_UNITS: f32 = 2.0;
pub const SIDE_FIRE_DEG: f32 = 35.0;
pub const SIDE_TURN_DEG: f32 = 15.0;
pub const SIDE_TURN_UNITS: f32 = 4.0;

/// One barrel of the player spread
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barrel {
    pub fire_deg: f32,
    pub turn_deg: f32,
    pub turn_units: f32,
}

/// Seven main barrels at 10° steps turning inward to 1° steps after two units,
/// then the two side barrels at ±35° turning to ±15° after four.
pub fn symmetric_spread() -> Vec<Barrel> {
    let half = SPREAD_BARRELS / 2;
    let mut barrels: Vec<Barrel> = (0..SPREAD_BARRELS)
        .map(|i| {
            let offset = (i - half) as f32;
            Barrel {
                fire_deg: offset * SPREAD_FIRE_STEP_DEG,
                turn_deg: offset * SPREAD_TURN_STEP_DEG,
                turn_units: SPREAD_TURN_UNITS,
            }
        })
        .collect();
    for side in [1.0, -1.0] {
        barrels.push(Barrel {
            fire_deg: side * SIDE_FIRE_DEG,
            turn_deg: side * SIDE_TURN_DEG,
            turn_units: SIDE_TURN_UNITS,
        });
    }
    barrels
}

/// `count` angles around a full turn starting at 0
pub fn circle_angles(count: u32) -> Vec<f32> {
    if count == 0 {
        return Vec::new();
    }
    let step = TAU / count as f32;
    (0..count).map(|i| step * i as f32).collect()
}

/// `count` angles evenly covering `spread_deg` centered on due left.
/// A single shot goes straight left.
pub fn fan_angles(spread_deg: f32, count: u32) -> Vec<f32> {
    match count {
        0 => Vec::new(),
        1 => vec![PI],
        _ => {
            let spread = deg_to_rad(spread_deg);
            let start = PI - spread / 2.0;
            let step = spread / (count - 1) as f32;
            (0..count).map(|i| start + step * i as f32).collect()
        }
    }
}

#[derive(Debug)]
pub struct BulletSystem {
    projectiles: Vec<Projectile>,
    next_id: u32,
    unit_size: f32,
    bounds: (f32, f32, f32, f32),
    turn_mode: TurnMode,
    events: Vec<SimEvent>,
}

impl BulletSystem {
    pub fn new(settings: &Settings) -> Self {
        Self {
            projectiles: Vec::new(),
            next_id: 1,
            unit_size: settings.unit_size,
            bounds: settings.cull_bounds(),
            turn_mode: settings.turn_mode,
            events: Vec::new(),
        }
    }

    /// Fire one projectile. `turn_after_units <= 0` means it never turns.
    pub fn spawn(
        &mut self,
        pos: Vec2,
        angle: f32,
        def: &ProjectileDef,
        owner: Owner,
        turn_after_units: f32,
        turn_angle: f32,
    ) -> ProjectileId {
        let id = ProjectileId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        let projectile = Projectile::new(
            id,
            pos,
            angle,
            def,
            owner,
            turn_after_units * self.unit_size,
            turn_angle,
            self.unit_size,
        );
        self.events.push(SimEvent::ProjectileSpawned {
            id,
            pos,
            rotation: angle,
            owner,
            visual: def.key,
            unit_size: def.unit_size,
            frame_count: def.frame_count,
            depth: projectile_depth(owner),
        });
        self.projectiles.push(projectile);
        id
    }

    /// Fire one non-turning projectile
    pub fn fire(
        &mut self,
        pos: Vec2,
        angle: f32,
        def: &ProjectileDef,
        owner: Owner,
    ) -> ProjectileId {
        self.spawn(pos, angle, def, owner, 0.0, 0.0)
    }

    /// The player's nine-barrel spread
    pub fn fire_symmetric_spread(&mut self, pos: Vec2) -> Vec<ProjectileId> {
        symmetric_spread()
            .into_iter()
            .map(|barrel| {
                self.spawn(
                    pos,
                    deg_to_rad(barrel.fire_deg),
                    &PLAYER_BULLET,
                    Owner::Player,
                    barrel.turn_units,
                    deg_to_rad(barrel.turn_deg),
                )
            })
            .collect()
    }

    /// Monster ring volley
    pub fn fire_circle(&mut self, pos: Vec2, count: u32) -> Vec<ProjectileId> {
        circle_angles(count)
            .into_iter()
            .map(|angle| self.fire(pos, angle, &MOB_BULLET, Owner::Monster))
            .collect()
    }

    /// Monster fan volley aimed left
    pub fn fire_fan(&mut self, pos: Vec2, spread_deg: f32, count: u32) -> Vec<ProjectileId> {
        if count == 1 {
            log::trace!("Single-shot fan fired straight left");
        }
        fan_angles(spread_deg, count)
            .into_iter()
            .map(|angle| self.fire(pos, angle, &MOB_BULLET, Owner::Monster))
            .collect()
    }

    /// Advance every projectile by `dt_ms` and cull the ones outside the
    /// expanded playfield, in one pass.
    pub fn tick(&mut self, dt_ms: f32) {
        let dt = dt_ms / 1000.0;
        let bounds = self.bounds;
        let mode = self.turn_mode;
        let events = &mut self.events;

        self.projectiles.retain_mut(|p| {
            if p.update(dt, mode) {
                events.push(SimEvent::ProjectileTurned {
                    id: p.id,
                    rotation: p.rotation,
                });
            }
            if p.within(bounds) {
                return true;
            }
            log::trace!(
                "Culled projectile {:?} at ({:.1}, {:.1})",
                p.id,
                p.pos.x,
                p.pos.y
            );
            events.push(SimEvent::ProjectileRemoved {
                id: p.id,
                reason: RemovalReason::OutOfBounds,
            });
            false
        });
    }

    /// Live projectiles fired by `owner`
    pub fn by_owner(&self, owner: Owner) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter().filter(move |p| p.owner == owner)
    }

    pub fn player_bullets(&self) -> Vec<&Projectile> {
        self.by_owner(Owner::Player).collect()
    }

    pub fn monster_bullets(&self) -> Vec<&Projectile> {
        self.by_owner(Owner::Monster).collect()
    }

    pub fn get(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id == id)
    }

    /// Remove a projectile now (e.g. after it hit something). Returns false if
    /// it was already gone.
    pub fn remove(&mut self, id: ProjectileId) -> bool {
        let Some(index) = self.projectiles.iter().position(|p| p.id == id) else {
            return false;
        };
        self.projectiles.remove(index);
        self.events.push(SimEvent::ProjectileRemoved {
            id,
            reason: RemovalReason::Explicit,
        });
        true
    }

    /// Release every live projectile
    pub fn shutdown(&mut self) {
        log::debug!("Releasing {} projectiles", self.projectiles.len());
        for p in self.projectiles.drain(..) {
            self.events.push(SimEvent::ProjectileRemoved {
                id: p.id,
                reason: RemovalReason::Shutdown,
            });
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-5;

    fn system() -> BulletSystem {
        BulletSystem::new(&Settings::default())
    }

    fn angle_of(p: &Projectile) -> f32 {
        p.vel.y.atan2(p.vel.x)
    }

    #[test]
    fn test_symmetric_spread_layout() {
        let barrels = symmetric_spread();
        assert_eq!(barrels.len(), 9);

        let fire: Vec<f32> = barrels[..7].iter().map(|b| b.fire_deg).collect();
        let turn: Vec<f32> = barrels[..7].iter().map(|b| b.turn_deg).collect();
        assert_eq!(fire, vec![-30.0, -20.0, -10.0, 0.0, 10.0, 20.0, 30.0]);
        assert_eq!(turn, vec![-3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0]);
        assert!(barrels[..7].iter().all(|b| b.turn_units == 2.0));

        assert_eq!(
            barrels[7],
            Barrel {
                fire_deg: 35.0,
                turn_deg: 15.0,
                turn_units: 4.0
            }
        );
        assert_eq!(
            barrels[8],
            Barrel {
                fire_deg: -35.0,
                turn_deg: -15.0,
                turn_units: 4.0
            }
        );
    }

    #[test]
    fn test_fire_symmetric_spread_spawns_turning_player_bullets() {
        let mut bullets = system();
        let ids = bullets.fire_symmetric_spread(Vec2::new(100.0, 300.0));
        assert_eq!(ids.len(), 9);
        assert_eq!(bullets.player_bullets().len(), 9);
        assert!(bullets.monster_bullets().is_empty());

        let center = bullets.get(ids[3]).unwrap();
        assert!(angle_of(center).abs() < EPS);
        assert_eq!(center.pending_turn_angle(), Some(0.0));

        let side = bullets.get(ids[7]).unwrap();
        assert!((angle_of(side) - deg_to_rad(35.0)).abs() < EPS);
        assert!(
            (side.pending_turn_angle().unwrap() - deg_to_rad(15.0)).abs() < EPS
        );
    }

    #[test]
    fn test_fire_circle_angles() {
        let mut bullets = system();
        let ids = bullets.fire_circle(Vec2::new(400.0, 300.0), 8);
        assert_eq!(ids.len(), 8);
        for (k, id) in ids.iter().enumerate() {
            let p = bullets.get(*id).unwrap();
            let expected = TAU * k as f32 / 8.0;
            let expected_vel = crate::heading(expected) * MOB_BULLET.speed;
            assert!((p.vel - expected_vel).length() < 1e-3);
            assert_eq!(p.owner, Owner::Monster);
        }
    }

    #[test]
    fn test_zero_count_patterns_spawn_nothing() {
        let mut bullets = system();
        assert!(bullets.fire_circle(Vec2::ZERO, 0).is_empty());
        assert!(bullets.fire_fan(Vec2::ZERO, 160.0, 0).is_empty());
        assert!(bullets.is_empty());
    }

    #[test]
    fn test_fan_single_shot_goes_left() {
        assert_eq!(fan_angles(160.0, 1), vec![PI]);
        let mut bullets = system();
        let ids = bullets.fire_fan(Vec2::new(400.0, 300.0), 160.0, 1);
        assert_eq!(ids.len(), 1);
        assert!(bullets.get(ids[0]).unwrap().vel.x < 0.0);
    }

    #[test]
    fn test_fan_reference_endpoints() {
        let angles = fan_angles(160.0, 8);
        assert_eq!(angles.len(), 8);
        assert!((angles[0] - deg_to_rad(100.0)).abs() < EPS);
        assert!((angles[7] - deg_to_rad(260.0)).abs() < EPS);
    }

    #[test]
    fn test_culling_at_margin() {
        let mut bullets = system();
        // Player bullet heading right at 600px/s from just inside the right margin
        let id = bullets.fire(Vec2::new(845.0, 300.0), 0.0, &PLAYER_BULLET, Owner::Player);
        // +3px -> 848, still inside [-50, 850]
        bullets.tick(5.0);
        assert!(bullets.get(id).is_some());
        // +6px -> 854, outside
        bullets.tick(10.0);
        assert!(bullets.get(id).is_none());

        let events = bullets.drain_events();
        assert!(events.contains(&SimEvent::ProjectileRemoved {
            id,
            reason: RemovalReason::OutOfBounds,
        }));
    }

    #[test]
    fn test_tick_culls_without_skipping_neighbors() {
        let mut bullets = system();
        // Alternate doomed and surviving projectiles
        let mut survivors = Vec::new();
        for i in 0..6 {
            if i % 2 == 0 {
                bullets.fire(Vec2::new(849.0, 300.0), 0.0, &PLAYER_BULLET, Owner::Player);
            } else {
                survivors.push(bullets.fire(
                    Vec2::new(400.0, 300.0),
                    0.0,
                    &PLAYER_BULLET,
                    Owner::Player,
                ));
            }
        }
        bullets.tick(16.0);
        assert_eq!(bullets.len(), 3);
        for id in survivors {
            // Every survivor advanced exactly once: 400 + 600 * 0.016
            let p = bullets.get(id).unwrap();
            assert!((p.pos.x - 409.6).abs() < 1e-3);
        }
    }

    #[test]
    fn test_turn_emits_event() {
        let mut bullets = system();
        let id = bullets.spawn(
            Vec2::new(100.0, 300.0),
            0.5,
            &PLAYER_BULLET,
            Owner::Player,
            0.1,
            0.0,
        );
        bullets.drain_events();
        bullets.tick(16.0);
        let events = bullets.drain_events();
        assert_eq!(
            events,
            vec![SimEvent::ProjectileTurned { id, rotation: 0.0 }]
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut bullets = system();
        let id = bullets.fire(Vec2::new(400.0, 300.0), 0.0, &MOB_BULLET, Owner::Monster);
        assert!(bullets.remove(id));
        assert!(!bullets.remove(id));
        assert!(bullets.is_empty());
    }

    #[test]
    fn test_shutdown_releases_everything() {
        let mut bullets = system();
        bullets.fire_circle(Vec2::new(400.0, 300.0), 12);
        bullets.fire_symmetric_spread(Vec2::new(100.0, 300.0));
        bullets.drain_events();
        bullets.shutdown();
        assert!(bullets.is_empty());
        let events = bullets.drain_events();
        assert_eq!(events.len(), 21);
        assert!(events.iter().all(|e| matches!(
            e,
            SimEvent::ProjectileRemoved {
                reason: RemovalReason::Shutdown,
                ..
            }
        )));
    }

    #[test]
    fn test_spawn_event_carries_visuals() {
        let mut bullets = system();
        let id = bullets.fire(Vec2::new(10.0, 20.0), 0.0, &MOB_BULLET, Owner::Monster);
        let events = bullets.drain_events();
        assert_eq!(
            events,
            vec![SimEvent::ProjectileSpawned {
                id,
                pos: Vec2::new(10.0, 20.0),
                rotation: 0.0,
                owner: Owner::Monster,
                visual: "mob-bullet",
                unit_size: MOB_BULLET.unit_size,
                frame_count: MOB_BULLET.frame_count,
                depth: 9,
            }]
        );
    }

    proptest! {
        #[test]
        fn prop_circle_angles_evenly_spaced(n in 1u32..64) {
            let angles = circle_angles(n);
            prop_assert_eq!(angles.len(), n as usize);
            for (k, a) in angles.iter().enumerate() {
                prop_assert!((a - TAU * k as f32 / n as f32).abs() < 1e-4);
            }
            prop_assert!(angles.windows(2).all(|w| w[0] <= w[1]));
        }

        #[test]
        fn prop_fan_covers_arc(spread in 1.0f32..360.0, n in 2u32..32) {
            let angles = fan_angles(spread, n);
            let half = deg_to_rad(spread) / 2.0;
            prop_assert_eq!(angles.len(), n as usize);
            prop_assert!((angles[0] - (PI - half)).abs() < 1e-4);
            prop_assert!((angles[n as usize - 1] - (PI + half)).abs() < 1e-4);
            let step = deg_to_rad(spread) / (n - 1) as f32;
            for w in angles.windows(2) {
                prop_assert!((w[1] - w[0] - step).abs() < 1e-4);
            }
        }

        #[test]
        fn prop_never_culled_while_inside(x in -49.0f32..849.0, y in -49.0f32..649.0) {
            let mut bullets = system();
            // Barely moves in 1ms: 0.2px
            let id = bullets.fire(Vec2::new(x, y), 0.0, &MOB_BULLET, Owner::Monster);
            bullets.tick(1.0);
            prop_assert!(bullets.get(id).is_some());
        }
    }
}
