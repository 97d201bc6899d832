//! Asteroid field: timer-driven spawning at the screen edges
//!
//! The field has no geometry; it only takes part in the update pass. Every
//! `asteroid_spawn_rate` seconds it launches one first-generation asteroid
//! from just outside a random screen edge, heading roughly inward.

use glam::Vec2;
use rand::Rng;

use super::asteroid::Asteroid;
use super::body::Update;
use super::geometry::RotateDegrees;
use super::groups::Group;
use super::state::{Spawn, UpdateCtx};
use crate::consts::{SPAWN_JITTER_DEG, SPAWN_SPEED_MAX, SPAWN_SPEED_MIN};
use crate::error::SimError;
use crate::settings::Settings;

/// Screen edge an asteroid can enter from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Unit vector pointing into the screen
    pub fn inward(self) -> Vec2 {
        match self {
            Edge::Left => Vec2::new(1.0, 0.0),
            Edge::Right => Vec2::new(-1.0, 0.0),
            Edge::Top => Vec2::new(0.0, 1.0),
            Edge::Bottom => Vec2::new(0.0, -1.0),
        }
    }

    /// Point along this edge for `t` in [0, 1], pushed out by the largest
    /// asteroid radius so nothing pops into view
    pub fn position(self, t: f32, settings: &Settings) -> Vec2 {
        let offset = settings.asteroid_max_radius();
        let (w, h) = (settings.screen_width, settings.screen_height);
        match self {
            Edge::Left => Vec2::new(-offset, t * h),
            Edge::Right => Vec2::new(w + offset, t * h),
            Edge::Top => Vec2::new(t * w, -offset),
            Edge::Bottom => Vec2::new(t * w, h + offset),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AsteroidField {
    /// Seconds since the last spawn
    pub spawn_timer: f32,
}

impl AsteroidField {
    /// Collections the field joins on spawn
    pub const GROUPS: &'static [Group] = &[Group::Updatable];

    pub fn new() -> Self {
        Self::default()
    }

    /// Roll a new first-generation asteroid
    pub fn roll_asteroid<R: Rng>(rng: &mut R, settings: &Settings) -> Result<Asteroid, SimError> {
        let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
        let speed = rng.random_range(SPAWN_SPEED_MIN..=SPAWN_SPEED_MAX);
        let jitter = rng.random_range(-SPAWN_JITTER_DEG..=SPAWN_JITTER_DEG);
        let velocity = (edge.inward() * speed as f32).rotate_degrees(jitter as f32);
        let position = edge.position(rng.random_range(0.0..=1.0), settings);
        let kind = rng.random_range(1..=settings.asteroid_kinds);

        log::debug!("Spawning kind {kind} asteroid from {edge:?} at speed {speed}");
        Asteroid::of_kind(position, velocity, kind, settings.asteroid_min_radius)
    }
}

impl Update for AsteroidField {
    fn update(&mut self, dt: f32, ctx: &mut UpdateCtx<'_>) -> Result<(), SimError> {
        self.spawn_timer += dt;
        if self.spawn_timer > ctx.settings.asteroid_spawn_rate {
            self.spawn_timer = 0.0;
            let asteroid = Self::roll_asteroid(&mut *ctx.rng, ctx.settings)?;
            ctx.spawns.push(Spawn::Asteroid(asteroid));
        }
        Ok(())
    }
}
