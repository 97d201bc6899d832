//! Platform abstraction layer
//!
//! Everything the frame loop needs from the outside world:
//! - Time/ticks (frame clock and throttle)
//! - Input intents

pub mod input;
pub mod time;

pub use input::{Autopilot, InputSource, ScriptedInput};
pub use time::{Clock, FixedClock, FrameClock};
