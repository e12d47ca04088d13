//! Collision stage: overlap detection and table-driven resolution
//!
//! Every pairing uses circle semantics (distance between centers against the
//! sum of half-sizes), even for square sprites, so resolution stays uniform
//! across games. Which outcome a pair produces is looked up in a rules table
//! rather than wired into each game instance; the tunables (growth formula,
//! invulnerability window, drop chance) come from the world config.
//!
//! Resolutions run in stable entity-list order and several may land in the
//! same tick. The only throttle is an explicit cooldown field - the player's
//! invulnerability window.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::events::GameEvent;
use super::spawn;
use super::state::{Effect, EffectKind, Faction, Pickup, PickupKind, World};
use crate::heading_vec;

/// Entity kind discriminant for rule lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindTag {
    Player,
    Roamer,
    Projectile,
    Pickup,
    Effect,
}

/// Outcome family for a kind pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Size comparison decides: larger player consumes, larger roamer damages
    PredatorPrey,
    /// Projectile spends itself dealing its damage to the target
    ProjectileHit,
    /// Pickup is consumed exactly once, granting its resource
    Collect,
    /// No interaction
    Ignore,
}

/// The kind-pair rules, looked up symmetrically
const RULES: &[(KindTag, KindTag, Resolution)] = &[
    (KindTag::Player, KindTag::Roamer, Resolution::PredatorPrey),
    (KindTag::Projectile, KindTag::Roamer, Resolution::ProjectileHit),
    (KindTag::Projectile, KindTag::Player, Resolution::ProjectileHit),
    (KindTag::Player, KindTag::Pickup, Resolution::Collect),
];

/// Look up the resolution for a kind pair, in either order
pub fn resolution_for(a: KindTag, b: KindTag) -> Resolution {
    RULES
        .iter()
        .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map(|(_, _, r)| *r)
        .unwrap_or(Resolution::Ignore)
}

/// Circle overlap with half-size radius semantics
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_size: f32, b_pos: Vec2, b_size: f32) -> bool {
    a_pos.distance(b_pos) < (a_size + b_size) / 2.0
}

/// Run the full collision stage for one tick. Call after the update stage so
/// post-motion positions are tested.
pub fn run(world: &mut World) {
    resolve_player_roamers(world);
    resolve_projectiles(world);
    resolve_pickups(world);
}

fn resolve_player_roamers(world: &mut World) {
    if resolution_for(KindTag::Player, KindTag::Roamer) != Resolution::PredatorPrey {
        return;
    }
    // Replacement spawns land at the tail; examine only the roamers that
    // were present when the tick started
    let present = world.roamers.len();
    let mut examined = 0;
    let mut i = 0;
    while examined < present && i < world.roamers.len() {
        examined += 1;
        let (r_pos, r_size) = (world.roamers[i].pos, world.roamers[i].size);
        if !circles_overlap(world.player.pos, world.player.size, r_pos, r_size) {
            i += 1;
            continue;
        }
        if world.player.size > r_size {
            consume_roamer(world, i);
            // The removed slot now holds the next roamer; don't advance
        } else {
            damage_player(world, r_pos);
            i += 1;
        }
    }
}

/// Player ate a smaller roamer: growth, score, replacement spawn, and the
/// starvation clock rewinds.
fn consume_roamer(world: &mut World, index: usize) {
    let prey = world.roamers.remove(index);
    let config = &world.config;

    let scaled = (prey.size / config.growth_divisor).floor() * config.growth_scale;
    let growth = scaled.floor().max(config.min_growth);
    world.player.size += growth;

    let points =
        prey.size.floor() as u64 + (prey.size / config.score_bonus_divisor).floor() as u64;
    world.score += points;

    world.last_eat_tick = world.tick_count;
    world.timers.starvation_deadline = world.tick_count + world.config.starvation_window_ticks;

    world.push_event(GameEvent::Consumed { prey_size: prey.size, points });
    let score = world.score;
    world.push_event(GameEvent::ScoreChanged(score));
    world.push_score_text(prey.pos, points);

    // Keep the challenge constant: the pond refills immediately
    spawn::spawn_roamer(world);
}

/// One life lost unless the invulnerability window is open. Knockback pushes
/// the player off the source so the same contact doesn't pin them.
fn damage_player(world: &mut World, source_pos: Vec2) {
    if world.player.invuln_ticks > 0 {
        return;
    }
    world.lives = world.lives.saturating_sub(1);
    world.player.invuln_ticks = world.config.invuln_ticks;
    let away = (world.player.pos - source_pos).normalize_or_zero();
    world.player.vel = away * world.config.knockback_speed;

    let lives = world.lives;
    world.push_event(GameEvent::Damaged { lives_left: lives });
    world.push_event(GameEvent::LivesChanged(lives));

    if lives == 0 {
        world.end_game(false);
    }
}

fn resolve_projectiles(world: &mut World) {
    let mut i = 0;
    while i < world.projectiles.len() {
        let (p_pos, p_size, p_damage, p_faction) = {
            let p = &world.projectiles[i];
            (p.pos, p.size, p.damage, p.faction)
        };

        let mut spent = false;
        match p_faction {
            Faction::Friendly
                if resolution_for(KindTag::Projectile, KindTag::Roamer)
                    == Resolution::ProjectileHit =>
            {
                let mut j = 0;
                while j < world.roamers.len() {
                    let (r_pos, r_size) = (world.roamers[j].pos, world.roamers[j].size);
                    if circles_overlap(p_pos, p_size, r_pos, r_size) {
                        spent = true;
                        world.roamers[j].hp -= p_damage;
                        if world.roamers[j].hp <= 0.0 {
                            defeat_roamer(world, j);
                        }
                        break;
                    }
                    j += 1;
                }
            }
            Faction::Hostile
                if resolution_for(KindTag::Projectile, KindTag::Player)
                    == Resolution::ProjectileHit =>
            {
                if circles_overlap(p_pos, p_size, world.player.pos, world.player.size) {
                    // Impact always removes the projectile, even when the
                    // invulnerability window swallows the damage
                    spent = true;
                    damage_player(world, p_pos);
                }
            }
            _ => {}
        }

        if spent {
            world.projectiles.remove(i);
        } else {
            i += 1;
        }
    }
}

/// Defeat bookkeeping: counter, score, sparkles, chance drop.
fn defeat_roamer(world: &mut World, index: usize) {
    let victim = world.roamers.remove(index);
    world.defeated += 1;

    let points = victim.size.floor() as u64;
    world.score += points;
    let score = world.score;
    world.push_event(GameEvent::RoamerDefeated { points });
    world.push_event(GameEvent::ScoreChanged(score));
    world.push_score_text(victim.pos, points);

    for _ in 0..6 {
        let angle = world.rng.random_range(0.0..TAU);
        let speed = world.rng.random_range(60.0..180.0);
        let id = world.next_entity_id();
        world.push_effect(Effect {
            id,
            pos: victim.pos,
            vel: heading_vec(angle) * speed,
            kind: EffectKind::Sparkle,
            age: 0,
            lifetime: 40,
        });
    }

    let chance = world.config.defeat_drop_chance as f64;
    if chance > 0.0 && world.rng.random_bool(chance) {
        let id = world.next_entity_id();
        let (size, amount) = (world.config.pickup_size, world.config.heal_amount);
        world.pickups.push(Pickup {
            id,
            pos: victim.pos,
            size,
            kind: PickupKind::Health { amount },
        });
    }
}

fn resolve_pickups(world: &mut World) {
    if resolution_for(KindTag::Player, KindTag::Pickup) != Resolution::Collect {
        return;
    }
    let mut i = 0;
    while i < world.pickups.len() {
        let (p_pos, p_size, kind) = {
            let p = &world.pickups[i];
            (p.pos, p.size, p.kind)
        };
        if !circles_overlap(world.player.pos, world.player.size, p_pos, p_size) {
            i += 1;
            continue;
        }
        // Remove before crediting: the instance can never resolve twice
        world.pickups.remove(i);
        match kind {
            PickupKind::Health { amount } => {
                world.lives = (world.lives + amount).min(world.config.max_lives);
                let lives = world.lives;
                world.push_event(GameEvent::LivesChanged(lives));
            }
            PickupKind::Bonus { points } => {
                world.score += points;
                let score = world.score;
                world.push_event(GameEvent::ScoreChanged(score));
            }
        }
        world.push_event(GameEvent::PickupCollected(kind));
    }
}
