//! Simulation tick
//!
//! Advances the game by one frame: update pass, shot cleanup, then the two
//! collision passes. Each collision pass iterates frozen snapshots of the
//! collections, so an entity destroyed earlier in a pass is skipped and
//! fragments created by a split wait for the next tick.

use super::body::Entity;
use super::groups::{EntityId, Group};
use super::state::{GameEvent, GamePhase, GameState};
use crate::error::SimError;

/// Input intents for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust_forward: bool,
    pub thrust_back: bool,
    pub fire: bool,
    /// Window closed / quit requested; handled by the session, not the tick
    pub quit: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Result<(), SimError> {
    if state.phase == GamePhase::GameOver {
        return Ok(());
    }
    state.time_ticks += 1;

    state
        .world
        .update_all(dt, input, &state.settings, &mut state.rng)?;

    if state.settings.despawn_offscreen_shots {
        despawn_lost_shots(state);
    }

    if player_hit(state) {
        state.phase = GamePhase::GameOver;
        state.push_event(GameEvent::PlayerHit);
        log::info!("Player hit at tick {}", state.time_ticks);
        return Ok(());
    }

    shoot_asteroids(state)
}

/// Destroy shots too far off screen to ever reach an asteroid again
fn despawn_lost_shots(state: &mut GameState) {
    let settings = &state.settings;
    let margin = 2.0 * settings.asteroid_max_radius() + settings.shot_radius;
    let lost: Vec<EntityId> = state
        .world
        .groups()
        .iter(Group::Shots)
        .filter(|&id| {
            state.world.shot(id).is_some_and(|shot| {
                shot.is_beyond(settings.screen_width, settings.screen_height, margin)
            })
        })
        .collect();

    for id in lost {
        if state.world.destroy(id) {
            log::debug!("Shot {id} left the play area");
        }
    }
}

/// Pass A: any asteroid touching the player
fn player_hit(state: &GameState) -> bool {
    let Some(player) = state.world.player(state.player) else {
        return false;
    };
    state
        .world
        .groups()
        .iter(Group::Asteroids)
        .filter_map(|id| state.world.asteroid(id))
        .any(|asteroid| asteroid.collides_with(player))
}

/// Pass B: each asteroid is consumed by at most one shot per tick
fn shoot_asteroids(state: &mut GameState) -> Result<(), SimError> {
    let asteroids = state.world.groups().snapshot(Group::Asteroids);
    let shots = state.world.groups().snapshot(Group::Shots);

    for asteroid_id in asteroids {
        for &shot_id in &shots {
            let (Some(asteroid), Some(shot)) =
                (state.world.asteroid(asteroid_id), state.world.shot(shot_id))
            else {
                continue;
            };
            if !asteroid.collides_with(shot) {
                continue;
            }

            let radius = asteroid.body.radius;
            state.push_event(GameEvent::AsteroidShot { radius });
            state.world.destroy(shot_id);
            state.split_asteroid(asteroid_id)?;
            break;
        }
    }
    Ok(())
}
