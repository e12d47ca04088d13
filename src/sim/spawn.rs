//! Population seeding and maintenance
//!
//! Keeps the roamer count at the configured floor, scatters the initial
//! population away from the player, and runs the anti-frustration rule: a dry
//! spell with no consumption guarantees an edible spawn near the player.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Pickup, PickupKind, Roamer, World};
use crate::{clamp_to_bounds, heading_vec};

/// Initial population: roamers up to the floor plus the starting pickups.
pub fn seed_population(world: &mut World) {
    while world.roamers.len() < world.config.min_roamers {
        spawn_roamer(world);
    }
    for _ in 0..world.config.initial_pickups {
        spawn_health_pickup(world);
    }
}

/// Per-tick upkeep: top the population back up (consumed roamers are already
/// replaced in the same tick, this also covers projectile defeats) and fire
/// the starvation spawn when the deadline lapses.
pub fn maintain(world: &mut World) {
    while world.roamers.len() < world.config.min_roamers {
        spawn_roamer(world);
    }

    if world.tick_count >= world.timers.starvation_deadline {
        spawn_edible_near_player(world);
        world.timers.starvation_deadline = world.tick_count + world.config.starvation_window_ticks;
    }
}

/// Spawn one roamer somewhere outside the player's exclusion radius.
pub fn spawn_roamer(world: &mut World) {
    let size = world.config.sample_roamer_size(&mut world.rng);
    let pos = place_outside_exclusion(world, size);
    push_roamer(world, pos, size);
}

/// Anti-frustration spawn: strictly edible, placed in a ring near the player.
pub fn spawn_edible_near_player(world: &mut World) {
    let floor = world
        .config
        .roamer_sizes
        .iter()
        .map(|b| b.min)
        .fold(f32::MAX, f32::min);
    let size = (world.player.size * 0.7).max(floor).min(world.player.size - 1.0);

    let angle = world.rng.random_range(0.0..TAU);
    let dist = world.config.starvation_spawn_dist.sample(&mut world.rng);
    let pos = world.player.pos + heading_vec(angle) * dist;
    let pos = clamp_to_bounds(pos, size, world.bounds());
    push_roamer(world, pos, size);
}

fn push_roamer(world: &mut World, pos: Vec2, size: f32) {
    let id = world.next_entity_id();
    let speed = world.config.roamer_speed.sample(&mut world.rng);
    let heading = world.rng.random_range(0.0..TAU);
    let dwell_ticks = world.config.dwell_ticks.sample(&mut world.rng) as u32;
    let fire_cooldown = match &world.config.hostile_fire {
        Some(fire) if fire.cooldown_ticks > 0 => world.rng.random_range(0..fire.cooldown_ticks),
        _ => 0,
    };
    world.roamers.push(Roamer {
        id,
        pos,
        size,
        speed,
        heading,
        dwell_ticks,
        hp: size,
        fire_cooldown,
    });
}

fn spawn_health_pickup(world: &mut World) {
    let size = world.config.pickup_size;
    let pos = place_outside_exclusion(world, size);
    let id = world.next_entity_id();
    let amount = world.config.heal_amount;
    world.pickups.push(Pickup {
        id,
        pos,
        size,
        kind: PickupKind::Health { amount },
    });
}

/// Uniform placement, retrying while inside the player's exclusion radius.
/// Gives up after the configured attempt budget and accepts the last roll,
/// so placement always terminates.
fn place_outside_exclusion(world: &mut World, size: f32) -> Vec2 {
    let bounds = world.bounds();
    let mut pos = Vec2::ZERO;
    for _ in 0..world.config.spawn_attempts {
        pos = Vec2::new(
            world.rng.random_range(0.0..bounds.x),
            world.rng.random_range(0.0..bounds.y),
        );
        if pos.distance(world.player.pos) >= world.config.spawn_exclusion {
            break;
        }
    }
    clamp_to_bounds(pos, size, bounds)
}
