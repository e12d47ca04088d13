//! Entity update stage: one tick of per-kind motion and state
//!
//! Runs before collision every tick. Player and roamers clamp to world
//! bounds after integration; projectiles and effects are unclamped and are
//! removed on exit or expiry instead.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Drive, EffectKind, Faction, Projectile, World};
use super::tick::TickInput;
use crate::consts::SIM_DT;
use crate::{clamp_to_bounds, heading_vec, outside_bounds};

/// Advance every entity one tick, in kind order.
pub fn run(world: &mut World, input: &TickInput) {
    update_player(world, input);
    launch_projectile(world, input);
    update_roamers(world);
    update_projectiles(world);
    update_effects(world);
}

/// Dual-mode pointer drive: seek toward the pointer outside the deadzone,
/// glide (damped coasting) once the pointer settles next to the player.
/// The glide anchor keeps a stationary pointer from jittering the player.
fn update_player(world: &mut World, input: &TickInput) {
    let config = &world.config;
    let player = &mut world.player;

    match input.pointer {
        Some(raw_target) => {
            let target = raw_target.clamp(Vec2::ZERO, config.world_size);
            let mut seek = |player: &mut super::state::Player| {
                let to_target = target - player.pos;
                let dist = to_target.length();
                if dist > config.pointer_deadzone {
                    player.vel = to_target / dist * player.speed;
                } else {
                    player.drive = Drive::Glide { anchor: target };
                    player.vel *= config.glide_damping;
                }
            };
            match player.drive {
                Drive::Seek => seek(player),
                Drive::Glide { anchor } => {
                    if target.distance(anchor) > config.glide_release {
                        player.drive = Drive::Seek;
                        seek(player);
                    } else {
                        player.vel *= config.glide_damping;
                    }
                }
            }
        }
        None => {
            player.vel *= config.glide_damping;
        }
    }

    player.pos += player.vel * SIM_DT;
    player.pos = clamp_to_bounds(player.pos, player.size, config.world_size);

    if player.invuln_ticks > 0 {
        player.invuln_ticks -= 1;
    }
}

/// Drag-release launch: spawn a friendly projectile along the released
/// vector. Drag length sets the speed within a band around the configured
/// projectile speed.
fn launch_projectile(world: &mut World, input: &TickInput) {
    let Some(release) = input.launch else {
        return;
    };
    if release.length_squared() < 1.0 {
        return;
    }
    let speed_cap = world.config.projectile_speed;
    let size = world.config.projectile_size;
    let damage = world.config.projectile_damage;
    let vel = release.clamp_length(speed_cap * 0.25, speed_cap);
    let dir = vel.normalize_or_zero();
    let start = world.player.pos + dir * (world.player.size + size) / 2.0;

    let id = world.next_entity_id();
    world.projectiles.push(Projectile {
        id,
        pos: start,
        vel,
        size,
        damage,
        faction: Faction::Friendly,
    });
    world.push_event(super::events::GameEvent::ProjectileFired);
}

/// Roamers hold a heading for their dwell, then re-roll it. Oversized
/// roamers additionally spit a hostile projectile at the player when in
/// range and off cooldown.
fn update_roamers(world: &mut World) {
    let bounds = world.config.world_size;
    let player_pos = world.player.pos;
    let player_size = world.player.size;
    let dwell = world.config.dwell_ticks;
    let hostile = world.config.hostile_fire.clone();

    let mut shots: Vec<(Vec2, Vec2)> = Vec::new();

    for roamer in &mut world.roamers {
        if roamer.dwell_ticks == 0 {
            roamer.heading = world.rng.random_range(0.0..TAU);
            roamer.dwell_ticks = dwell.sample(&mut world.rng) as u32;
        } else {
            roamer.dwell_ticks -= 1;
        }

        roamer.pos += heading_vec(roamer.heading) * roamer.speed * SIM_DT;
        roamer.pos = clamp_to_bounds(roamer.pos, roamer.size, bounds);

        if roamer.fire_cooldown > 0 {
            roamer.fire_cooldown -= 1;
        } else if let Some(fire) = &hostile {
            let threatening = roamer.size >= player_size;
            let dist = roamer.pos.distance(player_pos);
            if threatening && dist <= fire.range && dist > f32::EPSILON {
                let dir = (player_pos - roamer.pos) / dist;
                shots.push((roamer.pos + dir * roamer.size / 2.0, dir * fire.speed));
                roamer.fire_cooldown = fire.cooldown_ticks;
            }
        }
    }

    if let Some(fire) = &hostile {
        for (pos, vel) in shots {
            let id = world.next_entity_id();
            world.projectiles.push(Projectile {
                id,
                pos,
                vel,
                size: fire.size,
                damage: 1.0,
                faction: Faction::Hostile,
            });
        }
    }
}

/// Straight-line flight; gone once fully off-world.
fn update_projectiles(world: &mut World) {
    let bounds = world.config.world_size;
    for projectile in &mut world.projectiles {
        projectile.pos += projectile.vel * SIM_DT;
    }
    world
        .projectiles
        .retain(|p| !outside_bounds(p.pos, p.size, bounds));
}

/// Age out timed visuals. Score text keeps rising; sparkles decelerate.
/// Like projectiles, effects are unclamped: off-world ones are dropped
/// early rather than waiting out their timer.
fn update_effects(world: &mut World) {
    let bounds = world.config.world_size;
    for effect in &mut world.effects {
        effect.pos += effect.vel * SIM_DT;
        if let EffectKind::Sparkle = effect.kind {
            effect.vel *= 0.95;
        }
        effect.age += 1;
    }
    world
        .effects
        .retain(|e| e.age < e.lifetime && !outside_bounds(e.pos, 32.0, bounds));
}
