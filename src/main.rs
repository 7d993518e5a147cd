//! STG Sim headless driver
//!
//! Runs a scripted encounter without a renderer and prints a JSON summary.
//! Usage: `stg-sim [settings.json] [seconds]`

use glam::Vec2;
use serde::Serialize;

use stg_sim::sim::{Owner, RemovalReason, SimEvent, World, tick};
use stg_sim::tuning::{DRONE, MEDIUM, SMALL};
use stg_sim::{ConfigError, Settings};

/// Frame time fed to the simulation (60 Hz)
const FRAME_MS: f32 = 1000.0 / 60.0;
/// Player fires a spread this often
const PLAYER_FIRE_MS: f64 = 250.0;

#[derive(Debug, Default, Serialize)]
struct Summary {
    frames: u64,
    elapsed_ms: f64,
    projectiles_spawned: u64,
    projectiles_culled: u64,
    projectiles_hit: u64,
    turns: u64,
    kills: u64,
    exp: u64,
    monsters_left: usize,
}

fn run() -> Result<(), ConfigError> {
    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let seconds: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(10.0);

    log::info!(
        "Encounter: {}x{} playfield, unit {}, seed {}, turn mode {}",
        settings.playfield_width,
        settings.playfield_height,
        settings.unit_size,
        settings.seed,
        settings.turn_mode.as_str()
    );

    let player = Vec2::new(80.0, settings.playfield_height / 2.0);
    let spawn_x = settings.playfield_width - 40.0;
    let mut world = World::new(settings);
    world.spawn_monster(&DRONE, Vec2::new(spawn_x, 120.0));
    world.spawn_monster(&SMALL, Vec2::new(spawn_x, 300.0));
    world.spawn_monster(&MEDIUM, Vec2::new(spawn_x, 480.0));

    let mut summary = Summary::default();
    let mut next_player_fire = 0.0;
    while world.elapsed_ms() < seconds * 1000.0 {
        if world.elapsed_ms() >= next_player_fire {
            world.fire_player_spread(player);
            next_player_fire += PLAYER_FIRE_MS;
        }
        tick(&mut world, FRAME_MS);
        resolve_hits(&mut world);
        summary.frames += 1;

        for event in world.drain_events() {
            match event {
                SimEvent::ProjectileSpawned { .. } => summary.projectiles_spawned += 1,
                SimEvent::ProjectileTurned { .. } => summary.turns += 1,
                SimEvent::ProjectileRemoved { reason, .. } => match reason {
                    RemovalReason::OutOfBounds => summary.projectiles_culled += 1,
                    RemovalReason::Explicit => summary.projectiles_hit += 1,
                    RemovalReason::Shutdown => {}
                },
                SimEvent::MonsterDied { id, exp, .. } => {
                    log::info!("Monster {:?} destroyed (+{} exp)", id, exp);
                    summary.kills += 1;
                    summary.exp += u64::from(exp);
                }
                _ => {}
            }
        }
    }

    summary.elapsed_ms = world.elapsed_ms();
    summary.monsters_left = world.alive_monsters().count();
    world.shutdown();

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode summary: {e}"),
    }
    Ok(())
}

/// Naive circle overlap standing in for the game's collider
fn resolve_hits(world: &mut World) {
    let hits: Vec<_> = world
        .bullets()
        .by_owner(Owner::Player)
        .filter_map(|p| {
            world
                .alive_monsters()
                .find(|m| m.pos.distance(p.pos) <= m.radius() + p.radius())
                .map(|m| (p.id, m.id, p.damage()))
        })
        .collect();

    for (projectile, monster, damage) in hits {
        if world.remove_projectile(projectile) {
            world.damage_monster(monster, damage);
        }
    }
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("stg-sim: {e}");
        std::process::exit(1);
    }
}
