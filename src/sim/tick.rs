//! Per-frame simulation step
//!
//! Core loop that advances the world deterministically.

use super::state::World;

/// Advance the world by `dt_ms` milliseconds.
///
/// Order: clock, monsters (transition first, then any volley), due deferred
/// actions, projectiles and culling, then removal of units whose fade finished
/// or that left the field.
pub fn tick(world: &mut World, dt_ms: f32) {
    // Bad frame times freeze the frame instead of corrupting state
    let dt_ms = if dt_ms.is_finite() && dt_ms > 0.0 {
        dt_ms
    } else {
        0.0
    };

    world.time_ticks += 1;
    world.scheduler.advance(dt_ms as f64);

    for i in 0..world.monsters.len() {
        let monster = &mut world.monsters[i];
        let id = monster.id;
        if let Some(request) = monster.update(dt_ms, &mut world.rng) {
            world.dispatch_fire(id, request);
        }
    }

    while let Some(timer) = world.scheduler.pop_due() {
        world.run_deferred(timer);
    }

    world.bullets.tick(dt_ms);
    world.collect_bullet_events();
    world.reap_monsters();
}
