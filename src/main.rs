//! Pond Arena entry point
//!
//! The browser host drives `Session` from its own frame callback; this native
//! binary runs a short headless round as a smoke demo.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use pond_arena::render::{RenderSink, Sprite};
    use pond_arena::sinks::{MemoryScores, NullAudio, UiSink};
    use pond_arena::{Session, WorldConfig, platform};

    #[derive(Default)]
    struct CountingSink {
        drawn: usize,
    }

    impl RenderSink for CountingSink {
        fn draw(&mut self, _sprite: &Sprite) {
            self.drawn += 1;
        }
    }

    struct LogUi;

    impl UiSink for LogUi {
        fn on_score_changed(&mut self, value: u64) {
            log::debug!("score {}", value);
        }
        fn on_time_changed(&mut self, seconds: u32) {
            log::debug!("time {}", seconds);
        }
        fn on_lives_changed(&mut self, lives: u32) {
            log::debug!("lives {}", lives);
        }
        fn on_game_ended(&mut self, final_score: u64, won: bool) {
            log::info!("round ended: score {} won {}", final_score, won);
        }
    }

    platform::init_logging();
    log::info!("Pond Arena (native) starting...");

    let config = WorldConfig::default();
    let mut session = Session::new(
        config,
        Box::new(NullAudio),
        Box::new(LogUi),
        Box::new(MemoryScores::default()),
    )
    .expect("default config is valid");

    session.start(platform::seed_from_clock());

    // Ten simulated seconds chasing a fixed spot across the pond
    let target = Vec2::new(1400.0, 800.0);
    for frame in 0..600u32 {
        session.set_pointer(target);
        session.frame(frame as f64 * (1000.0 / 60.0));
    }

    let mut sink = CountingSink::default();
    session.render(&mut sink);

    let world = session.world();
    println!(
        "after 10s: score {} size {:.0} lives {} roamers {} ({} sprites in view)",
        world.score,
        world.player.size,
        world.lives,
        world.roamers.len(),
        sink.drawn
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm host enters through the library; nothing to do here
}
