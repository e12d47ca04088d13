//! Pond Arena - a reusable simulation core for pond arcade mini-games
//!
//! Core modules:
//! - `sim`: Deterministic simulation (world state, update, collision, camera)
//! - `render`: Viewport culling and back-to-front draw dispatch
//! - `scheduler`: Frame-driven session loop with fixed-timestep accumulator
//! - `sinks`: Audio/UI collaborator contracts
//! - `best_score`: Single-integer best score persistence
//! - `platform`: Browser/native time and logging

pub mod best_score;
pub mod platform;
pub mod render;
pub mod scheduler;
pub mod sim;
pub mod sinks;

pub use best_score::BestScore;
pub use scheduler::Session;
pub use sim::{ConfigError, GamePhase, TickInput, World, WorldConfig};

use glam::Vec2;

/// Engine-wide constants
pub mod consts {
    /// Simulation rate - one tick per display frame at 60 Hz
    pub const TICK_HZ: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta accepted before clamping (seconds)
    pub const MAX_FRAME_DT: f32 = 0.2;
    /// Cap on ephemeral effect entities
    pub const MAX_EFFECTS: usize = 256;
}

/// Unit vector for a heading angle (radians)
#[inline]
pub fn heading_vec(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Clamp a circle center of `size` diameter into `[half, dim - half]` per
/// axis. An entity wider than the world pins to the far edge rather than
/// panicking on the inverted range.
#[inline]
pub fn clamp_to_bounds(pos: Vec2, size: f32, bounds: Vec2) -> Vec2 {
    let half = size / 2.0;
    Vec2::new(
        pos.x.max(half).min(bounds.x - half),
        pos.y.max(half).min(bounds.y - half),
    )
}

/// True once a circle center has left the bounds rect entirely
#[inline]
pub fn outside_bounds(pos: Vec2, size: f32, bounds: Vec2) -> bool {
    let half = size / 2.0;
    pos.x < -half || pos.y < -half || pos.x > bounds.x + half || pos.y > bounds.y + half
}
