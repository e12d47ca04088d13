//! Frame events emitted by the simulation
//!
//! The core never calls the host directly. Each tick appends events to the
//! world's queue; the scheduler drains them and routes audio cues and UI
//! notifications to the registered sinks. Fire-and-forget in both directions.

use super::state::PickupKind;

/// Named audio cues for the host's sound collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Player swallowed a smaller roamer
    Consume,
    /// Player took a hit
    Damage,
    /// Player projectile launched
    Shoot,
    /// Pickup collected
    Pickup,
    /// Roamer defeated by projectile fire
    Defeat,
    /// Round won
    Victory,
    /// Round lost
    GameOver,
}

/// One simulation-side occurrence the host may care about
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ScoreChanged(u64),
    TimeChanged(u32),
    LivesChanged(u32),
    /// A consumption resolved: prey removed, player grew
    Consumed { prey_size: f32, points: u64 },
    /// Player lost a life
    Damaged { lives_left: u32 },
    ProjectileFired,
    PickupCollected(PickupKind),
    /// A roamer's hp reached zero from projectile fire
    RoamerDefeated { points: u64 },
    /// Terminal transition; emitted exactly once per round
    GameEnded { score: u64, won: bool },
}

impl GameEvent {
    /// Audio cue for this event, if it has one
    pub fn cue(&self) -> Option<Cue> {
        match self {
            GameEvent::Consumed { .. } => Some(Cue::Consume),
            GameEvent::Damaged { .. } => Some(Cue::Damage),
            GameEvent::ProjectileFired => Some(Cue::Shoot),
            GameEvent::PickupCollected(_) => Some(Cue::Pickup),
            GameEvent::RoamerDefeated { .. } => Some(Cue::Defeat),
            GameEvent::GameEnded { won: true, .. } => Some(Cue::Victory),
            GameEvent::GameEnded { won: false, .. } => Some(Cue::GameOver),
            _ => None,
        }
    }
}
