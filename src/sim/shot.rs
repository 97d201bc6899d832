//! Projectiles fired by the player
//!
//! Shots fly in a straight line until they hit an asteroid (or, when
//! enabled, leave the play area for good).

use glam::Vec2;

use super::body::{Body, Entity, Update};
use super::groups::Group;
use super::state::UpdateCtx;
use crate::error::SimError;
use crate::renderer::{Color, Rect, Surface};

#[derive(Debug, Clone, PartialEq)]
pub struct Shot {
    pub body: Body,
}

impl Shot {
    /// Collections a shot joins on spawn
    pub const GROUPS: &'static [Group] = &[Group::Shots, Group::Updatable, Group::Drawable];

    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Result<Self, SimError> {
        Ok(Self {
            body: Body::new(pos, vel, radius)?,
        })
    }

    /// True once the shot is further than `margin` outside a `width` x `height` area
    pub fn is_beyond(&self, width: f32, height: f32, margin: f32) -> bool {
        let p = self.body.pos;
        p.x < -margin || p.y < -margin || p.x > width + margin || p.y > height + margin
    }
}

impl Update for Shot {
    fn update(&mut self, dt: f32, _ctx: &mut UpdateCtx<'_>) -> Result<(), SimError> {
        self.body.advance(dt);
        Ok(())
    }
}

impl Entity for Shot {
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
