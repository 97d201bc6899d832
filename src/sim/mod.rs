//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied dt only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies beyond the `Surface` trait

pub mod asteroid;
pub mod body;
pub mod field;
pub mod geometry;
pub mod groups;
pub mod player;
pub mod shot;
pub mod state;
pub mod tick;
pub mod world;

pub use asteroid::Asteroid;
pub use body::{Body, Entity, Update};
pub use field::{AsteroidField, Edge};
pub use geometry::{FORWARD, RotateDegrees};
pub use groups::{EntityId, Group, Groups};
pub use player::Player;
pub use shot::Shot;
pub use state::{GameEvent, GamePhase, GameState, Spawn, UpdateCtx};
pub use tick::{TickInput, tick};
pub use world::{Slot, SplitOutcome, World};
