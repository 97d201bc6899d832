//! Frame clocks
//!
//! `tick` is called once at the end of every frame. It returns whole
//! milliseconds since the previous call; the session turns that into the
//! next frame's dt.

use std::thread;
use std::time::{Duration, Instant};

pub trait Clock {
    /// Wait out the rest of the frame at `target_fps` and report its length in ms
    fn tick(&mut self, target_fps: u32) -> u32;
}

/// Real clock that sleeps to hold the target frame rate
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Clock for FrameClock {
    fn tick(&mut self, target_fps: u32) -> u32 {
        if target_fps > 0 {
            let frame = Duration::from_secs(1) / target_fps;
            let elapsed = self.last.elapsed();
            if elapsed < frame {
                thread::sleep(frame - elapsed);
            }
        }

        let now = Instant::now();
        let ms = now.duration_since(self.last).as_millis();
        self.last = now;
        u32::try_from(ms).unwrap_or(u32::MAX)
    }
}

/// Deterministic clock: every frame lasts exactly `1000 / target_fps` ms
#[derive(Debug, Default)]
pub struct FixedClock {
    ticks: u64,
}

impl FixedClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Clock for FixedClock {
    fn tick(&mut self, target_fps: u32) -> u32 {
        self.ticks += 1;
        1000u32.checked_div(target_fps).unwrap_or(0)
    }
}
