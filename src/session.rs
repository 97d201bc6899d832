//! Frame loop
//!
//! A session owns the game state and its collaborators and runs one frame
//! per [`Session::step`]:
//! 1. take dt from the previous clock tick
//! 2. state telemetry
//! 3. poll input (quit ends the session here)
//! 4. clear the surface
//! 5. tick the simulation (update, collisions), forward its events
//! 6. draw, flip, throttle

use crate::error::SimError;
use crate::platform::{Clock, InputSource};
use crate::renderer::{Color, Surface};
use crate::sim::{GameState, tick};
use crate::telemetry::{StateGate, StateSnapshot, TelemetrySink};

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The input source asked to stop
    Quit { frames: u64 },
    /// An asteroid hit the player
    GameOver { frames: u64 },
}

impl SessionOutcome {
    pub fn frames(self) -> u64 {
        match self {
            SessionOutcome::Quit { frames } | SessionOutcome::GameOver { frames } => frames,
        }
    }
}

pub struct Session<S, C, I, T> {
    state: GameState,
    surface: S,
    clock: C,
    input: I,
    telemetry: T,
    gate: StateGate,
    /// Seconds reported by the last clock tick
    dt: f32,
    /// Frames fully simulated
    frames: u64,
}

impl<S, C, I, T> Session<S, C, I, T>
where
    S: Surface,
    C: Clock,
    I: InputSource,
    T: TelemetrySink,
{
    pub fn new(state: GameState, surface: S, clock: C, input: I, telemetry: T) -> Self {
        let gate = StateGate::from_settings(&state.settings);
        Self {
            state,
            surface,
            clock,
            input,
            telemetry,
            gate,
            dt: 0.0,
            frames: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn telemetry(&self) -> &T {
        &self.telemetry
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame. Returns the outcome once the session is over.
    pub fn step(&mut self) -> Result<Option<SessionOutcome>, SimError> {
        let dt = self.dt;

        if self.gate.advance() {
            let snapshot = StateSnapshot::capture(
                &self.state,
                self.gate.frame(),
                self.state.settings.log_sample_limit,
            );
            self.telemetry.log_state(&snapshot);
        }

        let input = self.input.poll();
        if input.quit {
            log::info!("Quit after {} frames", self.frames);
            return Ok(Some(SessionOutcome::Quit {
                frames: self.frames,
            }));
        }

        self.surface.fill(Color::Black);

        tick(&mut self.state, &input, dt)?;
        for event in self.state.drain_events() {
            self.telemetry.log_event(self.gate.frame(), &event);
        }
        self.frames += 1;

        if self.state.is_over() {
            println!("Game over!");
            log::info!("Game over after {} frames", self.frames);
            return Ok(Some(SessionOutcome::GameOver {
                frames: self.frames,
            }));
        }

        let line_width = self.state.settings.line_width;
        self.state.world.draw_all(&mut self.surface, line_width);
        self.surface.flip();

        let ms = self.clock.tick(self.state.settings.fps);
        self.dt = ms as f32 / 1000.0;
        Ok(None)
    }

    /// Step until the session ends
    pub fn run(&mut self) -> Result<SessionOutcome, SimError> {
        loop {
            if let Some(outcome) = self.step()? {
                return Ok(outcome);
            }
        }
    }
}
