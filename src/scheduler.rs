//! Session scheduler: the frame-driven loop around the simulation
//!
//! The host calls `frame` once per display frame with a wall-clock timestamp;
//! the accumulator converts elapsed time into fixed ticks with a substep cap.
//! Each substep runs on a scratch copy of the world under `catch_unwind`: a
//! panicking tick discards that frame's partial effects, logs, and the loop
//! keeps scheduling - a glitched frame must never end a running session.
//!
//! Phase flow: `Menu --start--> Playing --timeout|lives=0--> GameOver`,
//! `Playing --score goal--> Victory`, terminal `--start--> Playing` again,
//! `Playing --stop--> Menu`. Once the world leaves `Playing` no further
//! mutation happens: the countdown lives inside the tick, so there is no
//! dangling host timer to cancel.

use std::panic::{AssertUnwindSafe, catch_unwind};

use glam::Vec2;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::render::{RenderSink, draw_world};
use crate::sim::{ConfigError, GameEvent, GamePhase, TickInput, World, WorldConfig, tick};
use crate::sinks::{AudioSink, ScoreStore, UiSink};

/// One running game instance wired to its collaborators
pub struct Session {
    world: World,
    input: TickInput,
    accumulator: f32,
    last_time_ms: Option<f64>,
    audio: Box<dyn AudioSink>,
    ui: Box<dyn UiSink>,
    scores: Box<dyn ScoreStore>,
}

impl Session {
    /// Validate the config and wire up the collaborators. Errors here mean
    /// the session must not be started.
    pub fn new(
        config: WorldConfig,
        audio: Box<dyn AudioSink>,
        ui: Box<dyn UiSink>,
        scores: Box<dyn ScoreStore>,
    ) -> Result<Self, ConfigError> {
        let world = World::new(config)?;
        log::info!("Session ready (best so far: {})", scores.load_best());
        Ok(Self {
            world,
            input: TickInput::default(),
            accumulator: 0.0,
            last_time_ms: None,
            audio,
            ui,
            scores,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn phase(&self) -> GamePhase {
        self.world.phase
    }

    pub fn best_score(&self) -> u64 {
        self.scores.load_best()
    }

    /// Start a round. Also serves as restart: identical semantics from the
    /// menu or from a terminal phase.
    pub fn start(&mut self, seed: u64) {
        self.world.reset(seed);
        self.accumulator = 0.0;
        self.last_time_ms = None;
        self.input = TickInput::default();
        log::info!("Round started with seed {}", seed);
        self.dispatch_events();
    }

    /// Explicit reset back to the menu. The world freezes; nothing ticks
    /// until the next start.
    pub fn stop(&mut self) {
        self.world.phase = GamePhase::Menu;
        self.input = TickInput::default();
        log::info!("Session stopped, back to menu");
    }

    /// Continuously-updated pointer target, already in world coordinates
    pub fn set_pointer(&mut self, world_pos: Vec2) {
        self.input.pointer = Some(world_pos);
    }

    pub fn clear_pointer(&mut self) {
        self.input.pointer = None;
    }

    /// Queue a drag-release launch for the next tick
    pub fn launch(&mut self, vector: Vec2) {
        self.input.launch = Some(vector);
    }

    /// Advance by wall-clock time; returns the number of ticks run.
    ///
    /// Outside of `Playing` this only refreshes the frame clock - terminal
    /// and menu worlds receive no ticks, which is the cancellation guarantee.
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time_ms = Some(now_ms);

        if self.world.phase != GamePhase::Playing {
            return 0;
        }

        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= SIM_DT;
            substeps += 1;
            // One-shot inputs are consumed by the first substep
            self.input.launch = None;
        }
        substeps
    }

    /// Emit this frame's draw calls. A panicking sink loses its frame, not
    /// the session.
    pub fn render(&self, sink: &mut dyn RenderSink) {
        let result = catch_unwind(AssertUnwindSafe(|| draw_world(&self.world, sink)));
        if result.is_err() {
            log::error!("render sink panicked; frame skipped");
        }
    }

    /// One fixed tick on a scratch world; commit only on success.
    fn step(&mut self) {
        let mut scratch = self.world.clone();
        let input = self.input.clone();
        let result = catch_unwind(AssertUnwindSafe(move || {
            tick(&mut scratch, &input);
            scratch
        }));
        match result {
            Ok(next) => {
                self.world = next;
                self.dispatch_events();
            }
            Err(_) => {
                log::error!("simulation tick panicked; frame discarded");
            }
        }
    }

    /// Route the tick's events: cues to audio, scalar changes to the UI,
    /// and the terminal event to persistence.
    fn dispatch_events(&mut self) {
        for event in self.world.events.drain(..) {
            if let Some(cue) = event.cue() {
                self.audio.play(cue);
            }
            match event {
                GameEvent::ScoreChanged(value) => self.ui.on_score_changed(value),
                GameEvent::TimeChanged(seconds) => self.ui.on_time_changed(seconds),
                GameEvent::LivesChanged(lives) => self.ui.on_lives_changed(lives),
                GameEvent::GameEnded { score, won } => {
                    let previous = self.scores.load_best();
                    self.scores.save_best(score);
                    if score > previous {
                        log::info!("Round over: {} - new record (was {})", score, previous);
                    } else {
                        log::info!("Round over: {} (best {})", score, previous);
                    }
                    self.ui.on_game_ended(score, won);
                }
                _ => {}
            }
        }
    }
}
