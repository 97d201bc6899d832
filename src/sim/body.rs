//! Shared circle state and the entity capability set
//!
//! Every simulated object is a circle with a position, a velocity and a
//! radius. [`Body`] holds that state; [`Entity`] is the behaviour contract
//! the world dispatches through.

use glam::Vec2;

use super::state::UpdateCtx;
use crate::error::SimError;
use crate::renderer::{Rect, Surface};

/// Circle state common to all entities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Body {
    /// Validated constructor. Rejects non-finite vectors and radius <= 0.
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Result<Self, SimError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(SimError::InvalidRadius { radius });
        }
        if !pos.is_finite() {
            return Err(SimError::NonFinite { what: "position" });
        }
        if !vel.is_finite() {
            return Err(SimError::NonFinite { what: "velocity" });
        }
        Ok(Self { pos, vel, radius })
    }

    /// Straight-line motion: `pos += vel * dt`
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// Circles overlap. Exact tangency is not a collision.
    #[inline]
    pub fn collides_with(&self, other: &Body) -> bool {
        self.pos.distance(other.pos) < self.radius + other.radius
    }
}

/// Per-tick behaviour. Implemented by every entity and by the asteroid field.
pub trait Update {
    fn update(&mut self, dt: f32, ctx: &mut UpdateCtx<'_>) -> Result<(), SimError>;
}

/// Capability set shared by all physical entities
pub trait Entity: Update {
    fn body(&self) -> &Body;

    fn body_mut(&mut self) -> &mut Body;

    /// Emit this entity's outline; returns the area drawn
    fn draw(&self, surface: &mut dyn Surface, line_width: f32) -> Rect;

    fn position(&self) -> Vec2 {
        self.body().pos
    }

    fn velocity(&self) -> Vec2 {
        self.body().vel
    }

    fn radius(&self) -> f32 {
        self.body().radius
    }

    fn collides_with(&self, other: &dyn Entity) -> bool {
        self.body().collides_with(other.body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn circle(x: f32, y: f32, r: f32) -> Body {
        Body::new(Vec2::new(x, y), Vec2::ZERO, r).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_input() {
        assert_eq!(
            Body::new(Vec2::ZERO, Vec2::ZERO, 0.0),
            Err(SimError::InvalidRadius { radius: 0.0 })
        );
        assert!(Body::new(Vec2::ZERO, Vec2::ZERO, -3.0).is_err());
        assert!(Body::new(Vec2::ZERO, Vec2::ZERO, f32::NAN).is_err());
        assert_eq!(
            Body::new(Vec2::new(f32::NAN, 0.0), Vec2::ZERO, 1.0),
            Err(SimError::NonFinite { what: "position" })
        );
        assert_eq!(
            Body::new(Vec2::ZERO, Vec2::new(0.0, f32::INFINITY), 1.0),
            Err(SimError::NonFinite { what: "velocity" })
        );
    }

    #[test]
    fn test_advance() {
        let mut body = Body::new(Vec2::new(10.0, 10.0), Vec2::new(100.0, -50.0), 5.0).unwrap();
        body.advance(0.5);
        assert_eq!(body.pos, Vec2::new(60.0, -15.0));
        body.advance(0.0);
        assert_eq!(body.pos, Vec2::new(60.0, -15.0));
    }

    #[test]
    fn test_tangent_circles_do_not_collide() {
        let a = circle(0.0, 0.0, 20.0);
        let b = circle(30.0, 0.0, 10.0);
        assert!(!a.collides_with(&b));

        let c = circle(29.9, 0.0, 10.0);
        assert!(a.collides_with(&c));
    }

    #[test]
    fn test_distant_circles_do_not_collide() {
        let a = circle(0.0, 0.0, 5.0);
        let b = circle(100.0, 100.0, 5.0);
        assert!(!a.collides_with(&b));
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0, ar in 0.1f32..100.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0, br in 0.1f32..100.0,
        ) {
            let a = circle(ax, ay, ar);
            let b = circle(bx, by, br);
            prop_assert_eq!(a.collides_with(&b), b.collides_with(&a));
        }

        #[test]
        fn prop_exact_tangency_is_not_a_hit(
            ar in 1u32..100, br in 1u32..100, x in -500i32..500, y in -500i32..500,
        ) {
            // Integer geometry along an axis keeps the distance exact
            let a = circle(x as f32, y as f32, ar as f32);
            let b = circle(x as f32 + (ar + br) as f32, y as f32, br as f32);
            prop_assert!(!a.collides_with(&b));
            prop_assert!(!b.collides_with(&a));
        }
    }
}
