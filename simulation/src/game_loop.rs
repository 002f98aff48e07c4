use std::time::Duration;

use mobile_strike_core::{InputEvent, SoundCue, SoundSink, TICK_DURATION};
use mobile_strike_system_input::{InputAggregator, InputContext};
use mobile_strike_world::query;
use tracing::{debug, info};

use crate::Simulation;

/// Upper bound on ticks executed by a single [`GameLoop::advance`] call.
pub const MAX_TICKS_PER_ADVANCE: u32 = 5;

/// Drives a [`Simulation`] at a fixed tick rate from variable frame times.
#[derive(Debug)]
pub struct GameLoop<S> {
    simulation: Simulation<S>,
    input: InputAggregator,
    accumulator: Duration,
    paused: bool,
}

impl<S: SoundSink> GameLoop<S> {
    /// Creates a running loop with an empty accumulator.
    #[must_use]
    pub fn new(simulation: Simulation<S>, input: InputAggregator) -> Self {
        Self {
            simulation,
            input,
            accumulator: Duration::ZERO,
            paused: false,
        }
    }

    /// Buffers a raw input event until the next tick takes its intent.
    pub fn handle_input(&mut self, event: InputEvent) {
        let player = query::player(self.simulation.world());
        let context = InputContext {
            weapon: player.weapon(),
            alive: player.is_alive(),
        };
        self.input.handle(event, context);
    }

    /// Accumulates wall time and runs every whole tick it covers.
    ///
    /// At most [`MAX_TICKS_PER_ADVANCE`] ticks run per call; any backlog
    /// beyond that is discarded rather than replayed. Returns the number of
    /// ticks executed.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.paused {
            return 0;
        }

        self.accumulator += elapsed;
        let mut ticks = 0;
        while self.accumulator >= TICK_DURATION && ticks < MAX_TICKS_PER_ADVANCE {
            self.accumulator -= TICK_DURATION;
            let intent = self.input.take_intent();
            self.simulation.step(&intent);
            ticks += 1;
        }

        if self.accumulator >= TICK_DURATION {
            debug!(backlog = ?self.accumulator, "dropping simulation backlog");
            self.accumulator = Duration::ZERO;
        }
        ticks
    }

    /// Pauses or resumes the loop, stopping or restarting the music.
    ///
    /// Held keys and contacts keep being tracked while paused, but taps made
    /// during the pause are dropped on resume.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        if paused {
            info!(tick = query::tick(self.simulation.world()), "paused");
            self.simulation.play(SoundCue::MusicStop);
        } else {
            info!(tick = query::tick(self.simulation.world()), "resumed");
            self.accumulator = Duration::ZERO;
            let _ = self.input.take_intent();
            self.simulation.play(SoundCue::MusicStart);
        }
    }

    /// Flips the pause state.
    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    /// Reports whether the loop is paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// The simulation being driven.
    #[must_use]
    pub fn simulation(&self) -> &Simulation<S> {
        &self.simulation
    }

    /// The aggregator buffering raw input.
    #[must_use]
    pub fn input(&self) -> &InputAggregator {
        &self.input
    }
}
