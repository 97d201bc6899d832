//! Input sources
//!
//! Polled once per frame for the current intents. A source reports `quit`
//! when it has nothing more to give.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::TickInput;

pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

const QUIT: TickInput = TickInput {
    turn_left: false,
    turn_right: false,
    thrust_forward: false,
    thrust_back: false,
    fire: false,
    quit: true,
};

/// Replays a fixed list of inputs, then quits
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// The same input for `count` frames
    pub fn repeat(input: TickInput, count: usize) -> Self {
        Self::new(std::iter::repeat_n(input, count))
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        self.frames.pop_front().unwrap_or(QUIT)
    }
}

/// Frames an autopilot manoeuvre is held before re-rolling
const MANOEUVRE_FRAMES: u32 = 20;

/// Idle/demo pilot: seeded random manoeuvres with the trigger held down.
/// Quits after a fixed number of frames.
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    frames_left: u32,
    hold: u32,
    current: TickInput,
}

impl Autopilot {
    pub fn new(seed: u64, frames: u32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            frames_left: frames,
            hold: 0,
            current: TickInput::default(),
        }
    }

    fn roll(&mut self) -> TickInput {
        let turn = self.rng.random_range(0..3);
        TickInput {
            turn_left: turn == 1,
            turn_right: turn == 2,
            thrust_forward: self.rng.random_bool(0.4),
            thrust_back: self.rng.random_bool(0.1),
            fire: true,
            quit: false,
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self) -> TickInput {
        if self.frames_left == 0 {
            return QUIT;
        }
        self.frames_left -= 1;

        if self.hold == 0 {
            self.current = self.roll();
            self.hold = MANOEUVRE_FRAMES;
        }
        self.hold -= 1;
        self.current
    }
}
