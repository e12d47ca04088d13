//! World configuration and validation
//!
//! Every tuning knob the corpus of pond games disagrees on (invulnerability
//! window length, growth divisors, spawn distances) lives here rather than in
//! the stage code. `WorldConfig::validate` fails fast so a session is never
//! started on top of a config that would misbehave mid-frame.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration rejection reasons, reported before a session may start
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("world size must be positive, got {0}x{1}")]
    BadWorldSize(f32, f32),
    #[error("viewport must be positive, got {0}x{1}")]
    BadViewport(f32, f32),
    #[error("round length must be at least 1 second")]
    ZeroRound,
    #[error("player needs at least one life")]
    ZeroLives,
    #[error("player size must be positive, got {0}")]
    BadPlayerSize(f32),
    #[error("roamer population floor must be at least 1")]
    ZeroRoamers,
    #[error("roamer size table is empty")]
    EmptySizeTable,
    #[error("roamer size table has zero total weight")]
    ZeroWeightTable,
    #[error("size band {0} is inverted or non-positive ({1}..{2})")]
    BadSizeBand(usize, f32, f32),
    #[error("span is inverted or non-positive ({0}..{1})")]
    BadSpan(f32, f32),
    #[error("glide damping must lie in (0, 1), got {0}")]
    BadDamping(f32),
    #[error("smoothing factor must lie in (0, 1], got {0}")]
    BadSmoothing(f32),
    #[error("camera minimum scale must lie in (0, 1], got {0}")]
    BadMinScale(f32),
    #[error("drop chance must lie in [0, 1], got {0}")]
    BadDropChance(f32),
    #[error("spawn placement needs at least one attempt")]
    ZeroSpawnAttempts,
}

/// Inclusive random range, sampled uniformly
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample(&self, rng: &mut Pcg32) -> f32 {
        if self.max <= self.min {
            return self.min;
        }
        rng.random_range(self.min..self.max)
    }
}

/// One row of the roamer size distribution (weighted band, sizes are diameters)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SizeBand {
    pub weight: u32,
    pub min: f32,
    pub max: f32,
}

/// Camera framing and smoothing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Scale floor - the view never zooms out past this
    pub min_scale: f32,
    /// Player size at which the view is unzoomed (scale 1.0)
    pub size_baseline: f32,
    /// How much player growth is needed to zoom all the way out
    pub zoom_falloff: f32,
    /// Exponential smoothing factor for scale, per tick
    pub scale_smoothing: f32,
    /// Exponential smoothing factor for offset, per tick (faster than scale)
    pub offset_smoothing: f32,
    /// Smoothing for the decorative backdrop zoom (much slower)
    pub backdrop_smoothing: f32,
    /// Backdrop scale floor
    pub backdrop_min_scale: f32,
    /// Backdrop scale at baseline player size
    pub backdrop_base_scale: f32,
    /// Extra world units around the viewport still considered visible
    pub cull_margin: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.3,
            size_baseline: 20.0,
            zoom_falloff: 200.0,
            scale_smoothing: 0.05,
            offset_smoothing: 0.1,
            backdrop_smoothing: 0.01,
            backdrop_min_scale: 0.5,
            backdrop_base_scale: 40.0,
            cull_margin: 50.0,
        }
    }
}

/// Hostile fire behavior for roamers that outsize the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostileFire {
    /// Maximum distance to the player at which a roamer shoots
    pub range: f32,
    /// Ticks between shots per roamer
    pub cooldown_ticks: u32,
    /// Projectile speed, world units per second
    pub speed: f32,
    /// Projectile diameter
    pub size: f32,
}

impl Default for HostileFire {
    fn default() -> Self {
        Self {
            range: 300.0,
            cooldown_ticks: 120,
            speed: 240.0,
            size: 8.0,
        }
    }
}

/// Complete world tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// World extent in world units
    pub world_size: Vec2,
    /// Viewport extent in screen units
    pub viewport: Vec2,
    /// Round length in seconds
    pub round_secs: u32,
    /// Starting lives
    pub lives: u32,
    /// Lives cap for health pickups
    pub max_lives: u32,
    /// Optional score goal - reaching it ends the round as a victory
    pub victory_score: Option<u64>,

    /// Player starting diameter
    pub player_size: f32,
    /// Player speed, world units per second
    pub player_speed: f32,
    /// Pointer distance under which the player stops seeking
    pub pointer_deadzone: f32,
    /// Velocity decay per tick while gliding
    pub glide_damping: f32,
    /// Pointer travel from the glide anchor that resumes seeking
    pub glide_release: f32,

    /// Roamer population floor, maintained during play
    pub min_roamers: usize,
    /// Per-roamer speed range, world units per second
    pub roamer_speed: Span,
    /// Weighted size bands for spawned roamers
    pub roamer_sizes: Vec<SizeBand>,
    /// Ticks a roamer holds one heading before re-rolling
    pub dwell_ticks: Span,
    /// No spawn lands closer to the player than this
    pub spawn_exclusion: f32,
    /// Placement retries before giving up on the exclusion zone
    pub spawn_attempts: u32,

    /// Consumed prey size is divided by this before scaling
    pub growth_divisor: f32,
    /// Growth multiplier applied after division
    pub growth_scale: f32,
    /// Every consumption grows the player at least this much
    pub min_growth: f32,
    /// Prey size divided by this is the score bonus on top of the base
    pub score_bonus_divisor: f32,

    /// Damage suppression window after a hit, in ticks
    pub invuln_ticks: u32,
    /// Speed the player is pushed away from a damage source
    pub knockback_speed: f32,

    /// Ticks without a consumption before a guaranteed-edible spawn
    pub starvation_window_ticks: u64,
    /// Distance band around the player for the guaranteed-edible spawn
    pub starvation_spawn_dist: Span,

    /// Player projectile speed, world units per second
    pub projectile_speed: f32,
    /// Damage per projectile hit against roamer hp
    pub projectile_damage: f32,
    /// Player projectile diameter
    pub projectile_size: f32,
    /// Hostile fire from oversized roamers; None disables it
    pub hostile_fire: Option<HostileFire>,
    /// Chance a defeated roamer drops a health pickup
    pub defeat_drop_chance: f32,

    /// Health pickups scattered at round start
    pub initial_pickups: usize,
    /// Lives restored per health pickup
    pub heal_amount: u32,
    /// Pickup diameter
    pub pickup_size: f32,

    pub camera: CameraConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_size: Vec2::splat(2000.0),
            viewport: Vec2::new(800.0, 600.0),
            round_secs: 60,
            lives: 3,
            max_lives: 5,
            victory_score: None,

            player_size: 20.0,
            player_speed: 180.0,
            pointer_deadzone: 6.0,
            glide_damping: 0.9,
            glide_release: 12.0,

            min_roamers: 30,
            roamer_speed: Span::new(15.0, 45.0),
            // Mostly bite-sized, a fifth chunky, the rare monster
            roamer_sizes: vec![
                SizeBand { weight: 69, min: 15.0, max: 50.0 },
                SizeBand { weight: 20, min: 50.0, max: 80.0 },
                SizeBand { weight: 10, min: 80.0, max: 120.0 },
                SizeBand { weight: 1, min: 150.0, max: 200.0 },
            ],
            dwell_ticks: Span::new(45.0, 75.0),
            spawn_exclusion: 300.0,
            spawn_attempts: 50,

            growth_divisor: 8.0,
            growth_scale: 1.5,
            min_growth: 3.0,
            score_bonus_divisor: 5.0,

            invuln_ticks: 90,
            knockback_speed: 240.0,

            starvation_window_ticks: 300,
            starvation_spawn_dist: Span::new(150.0, 250.0),

            projectile_speed: 360.0,
            projectile_damage: 25.0,
            projectile_size: 8.0,
            hostile_fire: Some(HostileFire::default()),
            defeat_drop_chance: 0.25,

            initial_pickups: 8,
            heal_amount: 1,
            pickup_size: 20.0,

            camera: CameraConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Check every knob that could make a running session misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world_size.x <= 0.0 || self.world_size.y <= 0.0 {
            return Err(ConfigError::BadWorldSize(self.world_size.x, self.world_size.y));
        }
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return Err(ConfigError::BadViewport(self.viewport.x, self.viewport.y));
        }
        if self.round_secs == 0 {
            return Err(ConfigError::ZeroRound);
        }
        if self.lives == 0 {
            return Err(ConfigError::ZeroLives);
        }
        if self.player_size <= 0.0 {
            return Err(ConfigError::BadPlayerSize(self.player_size));
        }
        if self.min_roamers == 0 {
            return Err(ConfigError::ZeroRoamers);
        }
        if self.roamer_sizes.is_empty() {
            return Err(ConfigError::EmptySizeTable);
        }
        if self.roamer_sizes.iter().map(|b| b.weight as u64).sum::<u64>() == 0 {
            return Err(ConfigError::ZeroWeightTable);
        }
        for (i, band) in self.roamer_sizes.iter().enumerate() {
            if band.min <= 0.0 || band.max < band.min {
                return Err(ConfigError::BadSizeBand(i, band.min, band.max));
            }
        }
        for span in [self.roamer_speed, self.dwell_ticks, self.starvation_spawn_dist] {
            if span.min <= 0.0 || span.max < span.min {
                return Err(ConfigError::BadSpan(span.min, span.max));
            }
        }
        if !(self.glide_damping > 0.0 && self.glide_damping < 1.0) {
            return Err(ConfigError::BadDamping(self.glide_damping));
        }
        let cam = &self.camera;
        for factor in [cam.scale_smoothing, cam.offset_smoothing, cam.backdrop_smoothing] {
            if !(factor > 0.0 && factor <= 1.0) {
                return Err(ConfigError::BadSmoothing(factor));
            }
        }
        if !(cam.min_scale > 0.0 && cam.min_scale <= 1.0) {
            return Err(ConfigError::BadMinScale(cam.min_scale));
        }
        if !(0.0..=1.0).contains(&self.defeat_drop_chance) {
            return Err(ConfigError::BadDropChance(self.defeat_drop_chance));
        }
        if self.spawn_attempts == 0 {
            return Err(ConfigError::ZeroSpawnAttempts);
        }
        Ok(())
    }

    /// Sample a roamer diameter from the weighted size table.
    ///
    /// Callers must have validated the config: the table is non-empty with a
    /// positive total weight.
    pub fn sample_roamer_size(&self, rng: &mut Pcg32) -> f32 {
        let total: u32 = self.roamer_sizes.iter().map(|b| b.weight).sum();
        let mut roll = rng.random_range(0..total);
        for band in &self.roamer_sizes {
            if roll < band.weight {
                return Span::new(band.min, band.max).sample(rng);
            }
            roll -= band.weight;
        }
        // Unreachable with a validated table; fall back to the last band
        match self.roamer_sizes.last() {
            Some(last) => Span::new(last.min, last.max).sample(rng),
            None => self.player_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_default_config_is_valid() {
        assert!(WorldConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_world() {
        let mut config = WorldConfig::default();
        config.world_size = Vec2::new(0.0, 2000.0);
        assert!(matches!(config.validate(), Err(ConfigError::BadWorldSize(..))));
    }

    #[test]
    fn test_rejects_empty_size_table() {
        let mut config = WorldConfig::default();
        config.roamer_sizes.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptySizeTable)));
    }

    #[test]
    fn test_rejects_zero_weights() {
        let mut config = WorldConfig::default();
        for band in &mut config.roamer_sizes {
            band.weight = 0;
        }
        assert!(matches!(config.validate(), Err(ConfigError::ZeroWeightTable)));
    }

    #[test]
    fn test_rejects_bad_damping() {
        let mut config = WorldConfig::default();
        config.glide_damping = 1.0;
        assert!(matches!(config.validate(), Err(ConfigError::BadDamping(_))));
    }

    #[test]
    fn test_rejects_zero_population() {
        let mut config = WorldConfig::default();
        config.min_roamers = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroRoamers)));
    }

    #[test]
    fn test_size_sampling_stays_in_bands() {
        let config = WorldConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let lo = config.roamer_sizes.iter().map(|b| b.min).fold(f32::MAX, f32::min);
        let hi = config.roamer_sizes.iter().map(|b| b.max).fold(0.0, f32::max);
        for _ in 0..200 {
            let size = config.sample_roamer_size(&mut rng);
            assert!(size >= lo && size <= hi, "sampled {size} outside {lo}..{hi}");
        }
    }
}
