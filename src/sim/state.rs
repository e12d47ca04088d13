//! World state and entity types
//!
//! The world owns everything the stages touch: entity collections, counters,
//! camera, in-sim timers, and the per-tick event queue. No module-level
//! mutability anywhere - multiple independent worlds can run side by side.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::camera::Camera;
use super::config::{ConfigError, WorldConfig};
use super::events::GameEvent;
use super::spawn;
use crate::consts::MAX_EFFECTS;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for a start action; the world is inert
    Menu,
    /// Active round
    Playing,
    /// Round lost (timeout or lives exhausted)
    GameOver,
    /// Score goal reached
    Victory,
}

impl GamePhase {
    /// True for the end states a restart can leave
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// Player input drive mode.
///
/// Seeking snaps velocity toward the pointer; once the pointer sits inside
/// the deadzone the player latches into a glide that only ends when the
/// pointer moves away from the latched anchor. This keeps a stationary
/// pointer from jittering the player around its own center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drive {
    Seek,
    Glide { anchor: Vec2 },
}

/// The controlled entity
#[derive(Debug, Clone)]
pub struct Player {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Diameter in world units; grows with every consumption
    pub size: f32,
    pub speed: f32,
    pub drive: Drive,
    /// Ticks of damage suppression remaining
    pub invuln_ticks: u32,
}

impl Player {
    pub fn new(id: u32, pos: Vec2, config: &WorldConfig) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            size: config.player_size,
            speed: config.player_speed,
            drive: Drive::Seek,
            invuln_ticks: 0,
        }
    }
}

/// An autonomous wanderer; prey when smaller than the player, hazard when not
#[derive(Debug, Clone)]
pub struct Roamer {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    /// World units per second, fixed at spawn
    pub speed: f32,
    /// Current heading in radians
    pub heading: f32,
    /// Ticks left before the heading is re-rolled
    pub dwell_ticks: u32,
    /// Projectile target health
    pub hp: f32,
    /// Ticks until this roamer may shoot again (oversized roamers only)
    pub fire_cooldown: u32,
}

/// Which side launched a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Faction {
    Friendly,
    Hostile,
}

/// Ballistic entity; unclamped, removed once it leaves the world
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub damage: f32,
    pub faction: Faction,
}

/// What a pickup grants on contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickupKind {
    Health { amount: u32 },
    Bonus { points: u64 },
}

/// Static collectible
#[derive(Debug, Clone)]
pub struct Pickup {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub kind: PickupKind,
}

/// Visual-only ephemeral kinds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectKind {
    /// Floating "+N" score text
    ScoreText { points: u64 },
    /// Decelerating spark
    Sparkle,
}

/// Timed visual entity; never collides, never clamps
#[derive(Debug, Clone)]
pub struct Effect {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: EffectKind,
    pub age: u32,
    pub lifetime: u32,
}

impl Effect {
    /// Opacity proportional to remaining lifetime
    pub fn alpha(&self) -> f32 {
        if self.lifetime == 0 {
            return 0.0;
        }
        (1.0 - self.age as f32 / self.lifetime as f32).max(0.0)
    }
}

/// In-sim named timers, tick-counter based.
///
/// Replaces host interval callbacks: both die with the session because they
/// are only ever evaluated inside `tick`, so no dangling callback can touch
/// a finished world.
#[derive(Debug, Clone)]
pub struct Timers {
    /// Tick at which the next one-second countdown step fires
    pub countdown_next_at: u64,
    /// Tick at which the anti-frustration spawn triggers
    pub starvation_deadline: u64,
}

/// RNG seed wrapper; a run's stream is reconstructible from its seed
#[derive(Debug, Clone, Copy)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn to_rng(self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Authoritative container for one game instance
#[derive(Debug, Clone)]
pub struct World {
    pub config: WorldConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub tick_count: u64,
    pub score: u64,
    pub lives: u32,
    /// Seconds remaining on the round clock
    pub time_left: u32,
    /// Roamers defeated by projectile fire this round
    pub defeated: u32,
    /// Tick of the last successful consumption (drives anti-frustration)
    pub last_eat_tick: u64,
    pub player: Player,
    pub roamers: Vec<Roamer>,
    pub projectiles: Vec<Projectile>,
    pub pickups: Vec<Pickup>,
    pub effects: Vec<Effect>,
    pub camera: Camera,
    pub timers: Timers,
    /// Drained by the scheduler after every committed tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl World {
    /// Build an inert world in the menu phase. Fails fast on a bad config;
    /// callers must not start a session when this errors.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let center = config.world_size / 2.0;
        let player = Player::new(1, center, &config);
        let camera = Camera::snapped_to(center, config.player_size, &config);
        let time_left = config.round_secs;
        let lives = config.lives;
        Ok(Self {
            config,
            seed: 0,
            rng: RngState { seed: 0 }.to_rng(),
            phase: GamePhase::Menu,
            tick_count: 0,
            score: 0,
            lives,
            time_left,
            defeated: 0,
            last_eat_tick: 0,
            player,
            roamers: Vec::new(),
            projectiles: Vec::new(),
            pickups: Vec::new(),
            effects: Vec::new(),
            camera,
            timers: Timers { countdown_next_at: 0, starvation_deadline: 0 },
            events: Vec::new(),
            next_id: 2,
        })
    }

    /// Start (or restart) a round: re-seed, repopulate, zero the counters.
    ///
    /// The camera snaps here - the only legal discontinuity.
    pub fn reset(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = RngState { seed }.to_rng();
        self.tick_count = 0;
        self.score = 0;
        self.lives = self.config.lives;
        self.time_left = self.config.round_secs;
        self.defeated = 0;
        self.last_eat_tick = 0;
        self.next_id = 1;

        let center = self.config.world_size / 2.0;
        let id = self.next_entity_id();
        self.player = Player::new(id, center, &self.config);
        self.roamers.clear();
        self.projectiles.clear();
        self.pickups.clear();
        self.effects.clear();
        self.events.clear();
        self.camera = Camera::snapped_to(center, self.config.player_size, &self.config);

        let tick_hz = crate::consts::TICK_HZ as u64;
        self.timers = Timers {
            countdown_next_at: tick_hz,
            starvation_deadline: self.config.starvation_window_ticks,
        };

        spawn::seed_population(self);
        self.phase = GamePhase::Playing;

        // Prime the UI with the fresh counters
        self.push_event(GameEvent::ScoreChanged(0));
        self.push_event(GameEvent::TimeChanged(self.time_left));
        self.push_event(GameEvent::LivesChanged(self.lives));
    }

    /// Freeze the world in a terminal phase. Safe to call only from Playing;
    /// a second call is a no-op, so GameEnded fires exactly once per round.
    pub fn end_game(&mut self, won: bool) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = if won { GamePhase::Victory } else { GamePhase::GameOver };
        self.push_event(GameEvent::GameEnded { score: self.score, won });
    }

    /// Allocate a new entity id
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Append an effect, evicting the oldest once the cap is reached
    pub fn push_effect(&mut self, effect: Effect) {
        if self.effects.len() >= MAX_EFFECTS {
            self.effects.remove(0);
        }
        self.effects.push(effect);
    }

    /// Spawn the floating "+N" text that accompanies a score gain
    pub fn push_score_text(&mut self, pos: Vec2, points: u64) {
        let id = self.next_entity_id();
        self.push_effect(Effect {
            id,
            pos,
            vel: Vec2::new(0.0, -120.0),
            kind: EffectKind::ScoreText { points },
            age: 0,
            lifetime: 60,
        });
    }

    pub fn bounds(&self) -> Vec2 {
        self.config.world_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::new(WorldConfig::default()).expect("default config")
    }

    #[test]
    fn test_new_world_is_inert() {
        let w = world();
        assert_eq!(w.phase, GamePhase::Menu);
        assert!(w.roamers.is_empty());
    }

    #[test]
    fn test_reset_populates_and_enters_playing() {
        let mut w = world();
        w.reset(42);
        assert_eq!(w.phase, GamePhase::Playing);
        assert_eq!(w.roamers.len(), w.config.min_roamers);
        assert_eq!(w.pickups.len(), w.config.initial_pickups);
        assert_eq!(w.lives, w.config.lives);
        assert_eq!(w.time_left, w.config.round_secs);
        assert_eq!(w.score, 0);
        // One player, centered
        assert_eq!(w.player.pos, w.config.world_size / 2.0);
    }

    #[test]
    fn test_reset_is_deterministic_per_seed() {
        let mut a = world();
        let mut b = world();
        a.reset(7);
        b.reset(7);
        for (ra, rb) in a.roamers.iter().zip(&b.roamers) {
            assert_eq!(ra.pos, rb.pos);
            assert_eq!(ra.size, rb.size);
        }
    }

    #[test]
    fn test_end_game_fires_once() {
        let mut w = world();
        w.reset(1);
        w.events.clear();
        w.end_game(false);
        w.end_game(false);
        let ended: Vec<_> = w
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameEnded { .. }))
            .collect();
        assert_eq!(ended.len(), 1);
        assert_eq!(w.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_effect_cap_evicts_oldest() {
        let mut w = world();
        for _ in 0..(MAX_EFFECTS + 10) {
            w.push_score_text(Vec2::ZERO, 1);
        }
        assert_eq!(w.effects.len(), MAX_EFFECTS);
    }

    #[test]
    fn test_effect_alpha_fades_with_age() {
        let mut w = world();
        w.push_score_text(Vec2::ZERO, 5);
        let mut e = w.effects.pop().expect("pushed");
        assert!((e.alpha() - 1.0).abs() < f32::EPSILON);
        e.age = 30;
        assert!((e.alpha() - 0.5).abs() < 0.01);
        e.age = 60;
        assert_eq!(e.alpha(), 0.0);
    }
}
