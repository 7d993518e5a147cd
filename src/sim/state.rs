//! World state
//!
//! Owns every monster, the bullet system, the deferred-action queue and the
//! seeded RNG. Everything a replay needs to be exact lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bullets::BulletSystem;
use super::events::SimEvent;
use super::monster::{FireRequest, Monster, MonsterId};
use super::projectile::ProjectileId;
use super::scheduler::{Deferred, Scheduler, Timer};
use crate::consts::*;
use crate::settings::Settings;
use crate::sprite::{DEATH_FADE_SCALE, DEPTH_MONSTER};
use crate::tuning::MonsterDef;

#[derive(Debug)]
pub struct World {
    pub settings: Settings,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    pub(crate) bullets: BulletSystem,
    /// Sorted by id (spawn order)
    pub(crate) monsters: Vec<Monster>,
    pub(crate) scheduler: Scheduler,
    /// Units whose fade finished this tick, removed after projectiles advance
    faded: Vec<MonsterId>,
    events: Vec<SimEvent>,
    next_id: u32,
}

impl World {
    pub fn new(settings: Settings) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(settings.seed),
            bullets: BulletSystem::new(&settings),
            settings,
            time_ticks: 0,
            monsters: Vec::new(),
            scheduler: Scheduler::new(),
            faded: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new monster ID
    fn next_monster_id(&mut self) -> MonsterId {
        let id = MonsterId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn spawn_monster(&mut self, def: &MonsterDef, pos: Vec2) -> MonsterId {
        let id = self.next_monster_id();
        let monster = Monster::new(id, def, pos, self.settings.unit_size, &mut self.rng);
        log::debug!(
            "Spawned {} {:?} at ({:.1}, {:.1})",
            def.kind,
            id,
            pos.x,
            pos.y
        );
        self.emit(SimEvent::MonsterSpawned {
            id,
            pos,
            kind: def.kind,
            unit_size: def.unit_size,
            frame_count: def.frame_count,
            depth: DEPTH_MONSTER,
        });
        self.monsters.push(monster);
        id
    }

    pub fn monster(&self, id: MonsterId) -> Option<&Monster> {
        self.monsters.iter().find(|m| m.id == id)
    }

    /// All monsters still in the world, including ones fading out
    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    pub fn alive_monsters(&self) -> impl Iterator<Item = &Monster> {
        self.monsters.iter().filter(|m| m.is_alive())
    }

    /// Damage a monster. Returns true only on the hit that kills it. Unknown
    /// or dead monsters are ignored.
    pub fn damage_monster(&mut self, id: MonsterId, amount: i32) -> bool {
        let Some(monster) = self.monsters.iter_mut().find(|m| m.id == id) else {
            return false;
        };
        if !monster.is_alive() {
            return false;
        }
        let died = monster.take_damage(amount);
        let exp = monster.exp();

        // Flash lasts from the latest hit
        self.scheduler.cancel_where(id, |d| matches!(d, Deferred::ClearFlash));
        self.scheduler.schedule_in(HIT_FLASH_MS, id, Deferred::ClearFlash);
        self.emit(SimEvent::MonsterHitFlash { id, active: true });

        if died {
            let cancelled =
                self.scheduler.cancel_where(id, |d| matches!(d, Deferred::FanWave { .. }));
            log::debug!(
                "Monster {:?} died ({} pending waves cancelled)",
                id,
                cancelled
            );
            self.scheduler.schedule_in(DEATH_FADE_MS, id, Deferred::FadeComplete);
            self.emit(SimEvent::MonsterDied {
                id,
                exp,
                fade_ms: DEATH_FADE_MS,
                fade_scale: DEATH_FADE_SCALE,
            });
        }
        died
    }

    /// Remove a monster immediately, without a death or reward. Its pending
    /// timers go with it. Returns false if it was already gone.
    pub fn despawn_monster(&mut self, id: MonsterId) -> bool {
        let Some(index) = self.monsters.iter().position(|m| m.id == id) else {
            return false;
        };
        self.monsters.remove(index);
        let cancelled = self.scheduler.cancel_owner(id);
        log::debug!(
            "Monster {:?} despawned ({} timers cancelled)",
            id,
            cancelled
        );
        self.emit(SimEvent::MonsterDespawned { id });
        true
    }

    /// The player's spread, fired from `pos`
    pub fn fire_player_spread(&mut self, pos: Vec2) -> Vec<ProjectileId> {
        self.bullets.fire_symmetric_spread(pos)
    }

    pub fn bullets(&self) -> &BulletSystem {
        &self.bullets
    }

    pub fn bullets_mut(&mut self) -> &mut BulletSystem {
        &mut self.bullets
    }

    /// Remove a projectile after a hit; no-op if it is already gone
    pub fn remove_projectile(&mut self, id: ProjectileId) -> bool {
        self.bullets.remove(id)
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Simulation time in ms
    pub fn elapsed_ms(&self) -> f64 {
        self.scheduler.now_ms()
    }

    /// Take every event produced since the last drain, in the order the calls
    /// that caused them were made. Hosts are expected to drain once per frame.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.collect_bullet_events();
        std::mem::take(&mut self.events)
    }

    /// Tear everything down: projectiles, timers and monsters
    pub fn shutdown(&mut self) {
        log::info!(
            "Shutting down: {} monsters, {} projectiles, {} timers",
            self.monsters.len(),
            self.bullets.len(),
            self.scheduler.len()
        );
        self.scheduler.clear();
        self.faded.clear();
        self.bullets.shutdown();
        for monster in std::mem::take(&mut self.monsters) {
            self.emit(SimEvent::MonsterDespawned { id: monster.id });
        }
    }

    /// Queue a world event behind any projectile events already produced
    fn emit(&mut self, event: SimEvent) {
        self.collect_bullet_events();
        self.events.push(event);
    }

    pub(crate) fn collect_bullet_events(&mut self) {
        self.events.extend(self.bullets.drain_events());
    }

    /// Drop units whose fade finished and units that left the field. Monsters
    /// enter from the right, so only the left, top and bottom edges count.
    pub(crate) fn reap_monsters(&mut self) {
        let (min_x, _, min_y, max_y) = self.settings.cull_bounds();
        let mut gone = std::mem::take(&mut self.faded);
        for monster in &self.monsters {
            let p = monster.pos;
            if (p.x < min_x || p.y < min_y || p.y > max_y) && !gone.contains(&monster.id) {
                log::debug!(
                    "Monster {:?} left the field at ({:.1}, {:.1})",
                    monster.id,
                    p.x,
                    p.y
                );
                gone.push(monster.id);
            }
        }
        for id in gone {
            self.despawn_monster(id);
        }
    }

    /// Spawn whatever a monster asked for this tick
    pub(crate) fn dispatch_fire(&mut self, id: MonsterId, request: FireRequest) {
        match request {
            FireRequest::Circle { pos, count } => {
                self.bullets.fire_circle(pos, count);
            }
            FireRequest::FanVolley { pos, fan } => {
                if fan.waves == 0 {
                    return;
                }
                self.bullets.fire_fan(pos, fan.spread_deg, fan.count);
                if fan.waves > 1 {
                    self.scheduler.schedule_in(
                        fan.wave_interval_ms as f64,
                        id,
                        Deferred::FanWave {
                            fan,
                            remaining: fan.waves - 1,
                        },
                    );
                }
            }
        }
    }

    pub(crate) fn run_deferred(&mut self, timer: Timer) {
        let id = timer.owner;
        match timer.action {
            Deferred::FanWave { fan, remaining } => {
                let Some(pos) = self.monster(id).filter(|m| m.is_alive()).map(|m| m.pos) else {
                    return;
                };
                self.bullets.fire_fan(pos, fan.spread_deg, fan.count);
                if remaining > 1 {
                    self.scheduler.schedule_at(
                        timer.due_ms + fan.wave_interval_ms as f64,
                        id,
                        Deferred::FanWave {
                            fan,
                            remaining: remaining - 1,
                        },
                    );
                }
            }
            Deferred::ClearFlash => {
                if let Some(monster) = self.monsters.iter_mut().find(|m| m.id == id) {
                    monster.set_flashing(false);
                    self.emit(SimEvent::MonsterHitFlash { id, active: false });
                }
            }
            Deferred::FadeComplete => {
                if !self.faded.contains(&id) {
                    self.faded.push(id);
                }
            }
        }
    }
}
