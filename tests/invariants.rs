//! Cross-stage invariants driven through the public API

use glam::Vec2;
use pond_arena::sim::{GamePhase, TickInput, World, WorldConfig, tick};
use pond_arena::sinks::{MemoryScores, NullAudio, NullUi};
use pond_arena::{Session, consts};
use proptest::prelude::*;

fn playing_world(seed: u64) -> World {
    let mut world = World::new(WorldConfig::default()).expect("default config");
    world.reset(seed);
    world
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Bounds invariant: clamped kinds never leave `[half, dim - half]`,
    /// whatever the pointer does.
    #[test]
    fn prop_bounds_hold_under_arbitrary_pointers(
        seed in 0u64..512,
        targets in prop::collection::vec((0f32..2000.0, 0f32..2000.0), 1..6),
    ) {
        let mut world = playing_world(seed);
        for (tx, ty) in targets {
            let input = TickInput { pointer: Some(Vec2::new(tx, ty)), launch: None };
            for _ in 0..30 {
                tick(&mut world, &input);
                let bounds = world.bounds();
                let p = &world.player;
                let half = p.size / 2.0;
                prop_assert!(p.pos.x >= half - 0.001 && p.pos.x <= bounds.x - half + 0.001);
                prop_assert!(p.pos.y >= half - 0.001 && p.pos.y <= bounds.y - half + 0.001);
                for r in &world.roamers {
                    let half = r.size / 2.0;
                    prop_assert!(r.pos.x >= half - 0.001 && r.pos.x <= bounds.x - half + 0.001);
                    prop_assert!(r.pos.y >= half - 0.001 && r.pos.y <= bounds.y - half + 0.001);
                }
            }
        }
    }

    /// Score never decreases while playing.
    #[test]
    fn prop_score_is_monotonic(seed in 0u64..512) {
        let mut world = playing_world(seed);
        // Chase the middle so consumptions actually happen
        let input = TickInput {
            pointer: Some(Vec2::new(500.0, 500.0)),
            launch: None,
        };
        let mut previous = world.score;
        for _ in 0..240 {
            tick(&mut world, &input);
            prop_assert!(world.score >= previous);
            previous = world.score;
        }
    }

    /// Roamer population never dips below the configured floor during play.
    #[test]
    fn prop_population_floor(seed in 0u64..512) {
        let mut world = playing_world(seed);
        let input = TickInput {
            pointer: Some(Vec2::new(1500.0, 1500.0)),
            launch: None,
        };
        for _ in 0..240 {
            tick(&mut world, &input);
            if world.phase == GamePhase::Playing {
                prop_assert!(world.roamers.len() >= world.config.min_roamers);
            }
        }
    }
}

/// A full round through the session driver: start, play out the clock,
/// land in game over with the best score recorded.
#[test]
fn full_round_times_out_cleanly() {
    let mut config = WorldConfig::default();
    config.round_secs = 2;
    config.hostile_fire = None;
    let mut session = Session::new(
        config,
        Box::new(NullAudio),
        Box::new(NullUi),
        Box::new(MemoryScores::default()),
    )
    .expect("config valid");

    session.start(1234);
    let mut now = 0.0;
    let mut frames = 0;
    while session.phase() == GamePhase::Playing && frames < 10_000 {
        session.set_pointer(Vec2::new(1000.0, 1000.0));
        session.frame(now);
        now += 1000.0 / 60.0;
        frames += 1;
    }

    assert_eq!(session.phase(), GamePhase::GameOver);
    assert_eq!(session.world().time_left, 0);
    assert!(session.world().tick_count >= 2 * consts::TICK_HZ as u64);
    assert_eq!(session.best_score(), session.world().score);
}
