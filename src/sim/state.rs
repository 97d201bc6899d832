//! Game state and core simulation types
//!
//! Everything the tick needs to evolve the game deterministically lives here.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::asteroid::Asteroid;
use super::field::AsteroidField;
use super::groups::EntityId;
use super::player::Player;
use super::shot::Shot;
use super::tick::TickInput;
use super::world::{SplitOutcome, World};
use crate::error::{SettingsError, SimError};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// The player was hit; the state no longer changes
    GameOver,
}

/// Entity created during an update, registered once the pass is over
#[derive(Debug, Clone, PartialEq)]
pub enum Spawn {
    Asteroid(Asteroid),
    Shot(Shot),
}

/// What an entity may read and request during its update
pub struct UpdateCtx<'a> {
    pub input: &'a TickInput,
    pub settings: &'a Settings,
    pub rng: &'a mut Pcg32,
    /// Deferred spawns; see [`Spawn`]
    pub spawns: &'a mut Vec<Spawn>,
}

/// Discrete gameplay events (for telemetry)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A shot destroyed an asteroid
    AsteroidShot { radius: f32 },
    /// An asteroid was replaced by `children` fragments
    AsteroidSplit { radius: f32, children: usize },
    /// An asteroid reached the player
    PlayerHit,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub settings: Settings,
    pub world: World,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Id of the player's ship
    pub player: EntityId,
    /// Id of the asteroid field
    pub field: EntityId,
    /// Events since the last drain
    events: Vec<GameEvent>,
}

impl GameState {
    /// New game: the player at the screen center plus an idle asteroid field.
    /// Settings are validated first.
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SimError> {
        if let Err(SettingsError::OutOfRange { field, value }) = settings.validate() {
            return Err(SimError::InvalidSetting { field, value });
        }
        let mut world = World::new();
        let player = world.spawn_player(Player::new(
            settings.screen_center(),
            settings.player_radius,
        )?);
        let field = world.spawn_field(AsteroidField::new());

        Ok(Self {
            seed,
            settings,
            world,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            time_ticks: 0,
            player,
            field,
            events: Vec::new(),
        })
    }

    pub fn player(&self) -> Option<&Player> {
        self.world.player(self.player)
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Split an asteroid using the game's rng. Only a split that produced
    /// fragments is recorded; the smallest size just disappears.
    pub fn split_asteroid(&mut self, id: EntityId) -> Result<Option<SplitOutcome>, SimError> {
        let outcome =
            self.world
                .split_asteroid(id, self.settings.asteroid_min_radius, &mut self.rng)?;
        if let Some(outcome) = outcome.as_ref().filter(|o| o.angle.is_some()) {
            self.push_event(GameEvent::AsteroidSplit {
                radius: outcome.radius,
                children: outcome.children.len(),
            });
        }
        Ok(outcome)
    }
}
