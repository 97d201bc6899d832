//! Screen-space vector helpers
//!
//! Positions and velocities are plain `glam::Vec2` values: add, subtract,
//! scale, `length` and `distance` come from glam. The one operation glam does
//! not express is rotation by an angle in degrees, which lives here.

use glam::Vec2;

/// Rotation by an angle in degrees.
///
/// Uses the standard rotation matrix `[cos -sin; sin cos]`. With +y pointing
/// down the screen, a positive angle turns clockwise as seen by the player.
/// Whole quarter turns are computed exactly so that axis-aligned directions
/// (the player's forward vector, spawn edge directions) stay exact.
pub trait RotateDegrees {
    fn rotate_degrees(self, degrees: f32) -> Self;
}

impl RotateDegrees for Vec2 {
    fn rotate_degrees(self, degrees: f32) -> Vec2 {
        let turned = degrees.rem_euclid(360.0);
        let quarters = turned / 90.0;
        if quarters.fract() == 0.0 {
            return match quarters as u32 % 4 {
                0 => self,
                1 => Vec2::new(-self.y, self.x),
                2 => Vec2::new(-self.x, -self.y),
                _ => Vec2::new(self.y, -self.x),
            };
        }

        let (sin, cos) = turned.to_radians().sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

/// Unit vector the player faces at rotation 0
pub const FORWARD: Vec2 = Vec2::new(0.0, 1.0);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_quarter_turns_are_exact() {
        let v = Vec2::new(0.0, 1.0);
        assert_eq!(v.rotate_degrees(0.0), Vec2::new(0.0, 1.0));
        assert_eq!(v.rotate_degrees(90.0), Vec2::new(-1.0, 0.0));
        assert_eq!(v.rotate_degrees(180.0), Vec2::new(-0.0, -1.0));
        assert_eq!(v.rotate_degrees(270.0), Vec2::new(1.0, -0.0));
        assert_eq!(v.rotate_degrees(-90.0), v.rotate_degrees(270.0));
        assert_eq!(v.rotate_degrees(450.0), v.rotate_degrees(90.0));
    }

    #[test]
    fn test_rotate_matches_matrix() {
        let v = Vec2::new(100.0, 0.0);
        let r = v.rotate_degrees(30.0);
        let (s, c) = 30f32.to_radians().sin_cos();
        assert!((r.x - 100.0 * c).abs() < EPS);
        assert!((r.y - 100.0 * s).abs() < EPS);
    }

    #[test]
    fn test_wrapped_angles_agree() {
        let v = Vec2::new(3.0, -4.0);
        let a = v.rotate_degrees(361.0);
        let b = v.rotate_degrees(1.0);
        assert!((a - b).length() < EPS);

        let a = v.rotate_degrees(-719.0);
        assert!((a - b).length() < EPS);
    }

    proptest! {
        #[test]
        fn prop_rotation_preserves_length(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
            deg in -1080.0f32..1080.0,
        ) {
            let v = Vec2::new(x, y);
            let r = v.rotate_degrees(deg);
            prop_assert!((r.length() - v.length()).abs() <= 1e-3 * v.length().max(1.0));
        }

        #[test]
        fn prop_rotation_round_trips(
            x in -100.0f32..100.0,
            y in -100.0f32..100.0,
            deg in -360.0f32..360.0,
        ) {
            let v = Vec2::new(x, y);
            let back = v.rotate_degrees(deg).rotate_degrees(-deg);
            prop_assert!((back - v).length() < 1e-2);
        }
    }
}
