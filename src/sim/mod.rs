//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity list position)
//! - No rendering or platform dependencies
//!
//! Stage order inside one tick is fixed: update -> collision -> spawn upkeep
//! -> camera -> countdown. Collision depends on post-motion positions and the
//! render stage depends on the camera's final transform for the frame.

pub mod camera;
pub mod collision;
pub mod config;
pub mod events;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod update;

pub use camera::Camera;
pub use collision::{KindTag, Resolution, circles_overlap, resolution_for};
pub use config::{CameraConfig, ConfigError, HostileFire, SizeBand, Span, WorldConfig};
pub use events::{Cue, GameEvent};
pub use state::{
    Drive, Effect, EffectKind, Faction, GamePhase, Pickup, PickupKind, Player, Projectile, Roamer,
    World,
};
pub use tick::{TickInput, tick};
