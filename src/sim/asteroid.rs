//! Asteroids and the splitting rule
//!
//! An asteroid's radius is always `min_radius * kind`. Shooting one removes
//! it; unless it is already at the minimum size, two fragments one size
//! smaller fly off at `±θ` from the parent's heading, 20% faster.

use glam::Vec2;
use rand::Rng;

use super::body::{Body, Entity, Update};
use super::geometry::RotateDegrees;
use super::groups::Group;
use super::state::UpdateCtx;
use crate::consts::{SPLIT_ANGLE_MAX, SPLIT_ANGLE_MIN, SPLIT_SPEEDUP};
use crate::error::SimError;
use crate::renderer::{Color, Rect, Surface};

#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    pub body: Body,
}

impl Asteroid {
    /// Collections an asteroid joins on spawn
    pub const GROUPS: &'static [Group] = &[Group::Asteroids, Group::Updatable, Group::Drawable];

    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Result<Self, SimError> {
        Ok(Self {
            body: Body::new(pos, vel, radius)?,
        })
    }

    /// An asteroid of size `kind`, whose radius is `min_radius * kind`
    pub fn of_kind(pos: Vec2, vel: Vec2, kind: u32, min_radius: f32) -> Result<Self, SimError> {
        if kind == 0 {
            return Err(SimError::InvalidKind { kind });
        }
        Self::new(pos, vel, min_radius * kind as f32)
    }

    /// Whether splitting produces fragments
    pub fn can_split(&self, min_radius: f32) -> bool {
        self.body.radius > min_radius
    }

    /// Draw a split angle in degrees, uniform over the inclusive range
    pub fn roll_split_angle<R: Rng>(rng: &mut R) -> f32 {
        rng.random_range(SPLIT_ANGLE_MIN..=SPLIT_ANGLE_MAX)
    }

    /// The two fragments for a given split angle, or `None` at minimum size.
    ///
    /// Fragments start at the parent's position with radius reduced by one
    /// `min_radius` and velocities rotated by `+angle` and `-angle`.
    pub fn fragments(&self, min_radius: f32, angle: f32) -> Result<Option<[Asteroid; 2]>, SimError> {
        if !self.can_split(min_radius) {
            return Ok(None);
        }

        let radius = self.body.radius - min_radius;
        let vel = self.body.vel;
        let a = Asteroid::new(self.body.pos, vel.rotate_degrees(angle) * SPLIT_SPEEDUP, radius)?;
        let b = Asteroid::new(self.body.pos, vel.rotate_degrees(-angle) * SPLIT_SPEEDUP, radius)?;
        Ok(Some([a, b]))
    }
}

impl Update for Asteroid {
    fn update(&mut self, dt: f32, _ctx: &mut UpdateCtx<'_>) -> Result<(), SimError> {
        self.body.advance(dt);
        Ok(())
    }
}

impl Entity for Asteroid {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn draw(&self, surface: &mut dyn Surface, line_width: f32) -> Rect {
        surface.circle(self.body.pos, self.body.radius, Color::White, line_width)
    }
}
