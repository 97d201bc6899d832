//! Rocks - A minimal asteroids arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, splitting, collisions, game state)
//! - `session`: Per-frame driver that wires the simulation to its collaborators
//! - `renderer`: Render surface abstraction and vertex-buffer implementation
//! - `platform`: Clock/throttle and input sources
//! - `telemetry`: JSON-lines state snapshots and event log
//! - `settings`: Runtime configuration

pub mod error;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod telemetry;

pub use error::{SettingsError, SimError};
pub use session::{Session, SessionOutcome};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Screen dimensions (pixels, y grows downward)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Outline width for every shape
    pub const LINE_WIDTH: f32 = 2.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    /// Degrees per second
    pub const PLAYER_TURN_SPEED: f32 = 300.0;
    pub const PLAYER_SPEED: f32 = 200.0;
    pub const PLAYER_SHOOT_SPEED: f32 = 500.0;
    /// Seconds between shots
    pub const PLAYER_SHOOT_COOLDOWN: f32 = 0.3;

    pub const SHOT_RADIUS: f32 = 5.0;

    /// Asteroid defaults - radius is always MIN_RADIUS * kind
    pub const ASTEROID_MIN_RADIUS: f32 = 20.0;
    pub const ASTEROID_KINDS: u32 = 3;
    pub const ASTEROID_SPAWN_RATE: f32 = 0.8;
    pub const ASTEROID_MAX_RADIUS: f32 = ASTEROID_MIN_RADIUS * ASTEROID_KINDS as f32;

    /// Split angle range (degrees, inclusive)
    pub const SPLIT_ANGLE_MIN: f32 = 20.0;
    pub const SPLIT_ANGLE_MAX: f32 = 50.0;
    /// Each split generation is this much faster than its parent
    pub const SPLIT_SPEEDUP: f32 = 1.2;

    /// Spawn speed range (integer px/s, inclusive)
    pub const SPAWN_SPEED_MIN: i32 = 40;
    pub const SPAWN_SPEED_MAX: i32 = 100;
    /// Spawn heading jitter (integer degrees, inclusive)
    pub const SPAWN_JITTER_DEG: i32 = 30;

    /// Target frame rate
    pub const FPS: u32 = 60;

    /// State snapshots stop after this many seconds
    pub const LOG_MAX_SECONDS: u32 = 16;
    /// Entities sampled per collection in a snapshot
    pub const LOG_SAMPLE_LIMIT: usize = 10;
}

/// Round to two decimal places (telemetry precision)
#[inline]
pub fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
