//! Fixed timestep simulation tick
//!
//! One tick runs the stages in a fixed order that must not change:
//! update (post-motion positions) -> collision -> spawn upkeep -> camera ->
//! countdown -> goal check. Collision needs updated positions; render (driven
//! by the host after the tick) needs the camera's final transform.

use glam::Vec2;

use super::collision;
use super::events::GameEvent;
use super::spawn;
use super::state::{GamePhase, World};
use super::update;
use crate::consts::TICK_HZ;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer target in world coordinates (pre-transformed by the caller,
    /// or via `Camera::screen_to_world`)
    pub pointer: Option<Vec2>,
    /// Drag-release vector; spawns a friendly projectile this tick
    pub launch: Option<Vec2>,
}

/// Advance the world by one fixed timestep. A no-op outside of `Playing`,
/// so a finished or menu world can never be mutated by a stray call.
pub fn tick(world: &mut World, input: &TickInput) {
    if world.phase != GamePhase::Playing {
        return;
    }
    world.tick_count += 1;

    update::run(world, input);
    collision::run(world);

    // Collision may have ended the round; a frozen world gets no upkeep
    if world.phase == GamePhase::Playing {
        spawn::maintain(world);
    }

    // Camera settles even on the ending tick so the final frame renders from
    // a consistent transform
    let (player_pos, player_size) = (world.player.pos, world.player.size);
    world.camera.follow(player_pos, player_size, &world.config);

    if world.phase == GamePhase::Playing {
        check_victory(world);
    }
    if world.phase == GamePhase::Playing {
        run_countdown(world);
    }
}

/// Coarse 1 Hz countdown, evaluated in-tick off the tick counter so it dies
/// with the session instead of dangling like a host interval would.
fn run_countdown(world: &mut World) {
    if world.tick_count < world.timers.countdown_next_at {
        return;
    }
    world.timers.countdown_next_at += TICK_HZ as u64;
    world.time_left = world.time_left.saturating_sub(1);
    let time_left = world.time_left;
    world.push_event(GameEvent::TimeChanged(time_left));
    if time_left == 0 {
        world.end_game(false);
    }
}

fn check_victory(world: &mut World) {
    if let Some(goal) = world.config.victory_score {
        if world.score >= goal {
            world.end_game(true);
        }
    }
}
