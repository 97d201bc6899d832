//! The player's ship
//!
//! A triangle that turns, thrusts forward/back, and fires shots on a
//! cooldown. Rotation is in degrees and is never wrapped.

use glam::Vec2;

use super::body::{Body, Entity, Update};
use super::geometry::{FORWARD, RotateDegrees};
use super::groups::Group;
use super::shot::Shot;
use super::state::{Spawn, UpdateCtx};
use crate::error::SimError;
use crate::renderer::{Color, Rect, Surface};

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: Body,
    /// Degrees, unbounded in both directions
    pub rotation: f32,
    /// Seconds until the next shot; fire is ready at <= 0
    pub shoot_cooldown: f32,
}

impl Player {
    /// Collections a player joins on spawn
    pub const GROUPS: &'static [Group] = &[Group::Updatable, Group::Drawable];

    /// A stationary player facing rotation 0
    pub fn new(pos: Vec2, radius: f32) -> Result<Self, SimError> {
        Ok(Self {
            body: Body::new(pos, Vec2::ZERO, radius)?,
            rotation: 0.0,
            shoot_cooldown: 0.0,
        })
    }

    /// Unit vector the ship is facing
    pub fn forward(&self) -> Vec2 {
        FORWARD.rotate_degrees(self.rotation)
    }

    /// Turn by `turn_speed * dt` degrees (negative dt turns the other way)
    pub fn rotate(&mut self, dt: f32, turn_speed: f32) {
        self.rotation += turn_speed * dt;
    }

    /// Move along the facing direction (negative dt moves backwards)
    pub fn thrust(&mut self, dt: f32, speed: f32) {
        self.body.pos += self.forward() * speed * dt;
    }

    pub fn can_shoot(&self) -> bool {
        self.shoot_cooldown <= 0.0
    }

    /// Fire a shot from the ship's center and restart the cooldown
    pub fn shoot(
        &mut self,
        shoot_speed: f32,
        shot_radius: f32,
        cooldown: f32,
    ) -> Result<Shot, SimError> {
        let shot = Shot::new(self.body.pos, self.forward() * shoot_speed, shot_radius)?;
        self.shoot_cooldown = cooldown;
        Ok(shot)
    }

    /// Nose, left rear and right rear vertices
    pub fn triangle(&self) -> [Vec2; 3] {
        let forward = self.forward();
        // Rear corners sit radius / 1.5 to either side of the tail
        let right = FORWARD.rotate_degrees(self.rotation + 90.0) * self.body.radius / 1.5;
        let pos = self.body.pos;
        let radius = self.body.radius;
        [
            pos + forward * radius,
            pos - forward * radius - right,
            pos - forward * radius + right,
        ]
    }
}

impl Update for Player {
    fn update(&mut self, dt: f32, ctx: &mut UpdateCtx<'_>) -> Result<(), SimError> {
        self.shoot_cooldown -= dt;

        let input = ctx.input;
        let settings = ctx.settings;
        if input.turn_left {
            self.rotate(-dt, settings.player_turn_speed);
        }
        if input.turn_right {
            self.rotate(dt, settings.player_turn_speed);
        }
        if input.thrust_forward {
            self.thrust(dt, settings.player_speed);
        }
        if input.thrust_back {
            self.thrust(-dt, settings.player_speed);
        }
        if input.fire && self.can_shoot() {
            let shot = self.shoot(
                settings.player_shoot_speed,
                settings.shot_radius,
                settings.player_shoot_cooldown,
            )?;
            log::debug!("Shot fired at rotation {:.1}", self.rotation);
            ctx.spawns.push(Spawn::Shot(shot));
        }
        Ok(())
    }
}

impl Entity for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn draw(&self, surface: &mut dyn Surface, line_width: f32) -> Rect {
        surface.polygon(&self.triangle(), Color::White, line_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sim::tick::TickInput;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const EPS: f32 = 1e-3;

    fn player() -> Player {
        Player::new(Vec2::new(640.0, 360.0), PLAYER_RADIUS).unwrap()
    }

    fn run_update(player: &mut Player, input: TickInput, dt: f32) -> Vec<Spawn> {
        let settings = Settings::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spawns = Vec::new();
        let mut ctx = UpdateCtx {
            input: &input,
            settings: &settings,
            rng: &mut rng,
            spawns: &mut spawns,
        };
        player.update(dt, &mut ctx).unwrap();
        spawns
    }

    #[test]
    fn test_new_player_defaults() {
        let p = player();
        assert_eq!(p.rotation, 0.0);
        assert_eq!(p.velocity(), Vec2::ZERO);
        assert_eq!(p.radius(), PLAYER_RADIUS);
        assert!(p.can_shoot());
        assert!(Player::new(Vec2::ZERO, 0.0).is_err());
    }

    #[test]
    fn test_shoot_from_center_at_rotation_zero() {
        let mut p = player();
        let shot = p
            .shoot(PLAYER_SHOOT_SPEED, SHOT_RADIUS, PLAYER_SHOOT_COOLDOWN)
            .unwrap();
        assert_eq!(shot.position(), Vec2::new(640.0, 360.0));
        assert_eq!(shot.velocity(), Vec2::new(0.0, PLAYER_SHOOT_SPEED));
        assert_eq!(shot.radius(), SHOT_RADIUS);
        assert_eq!(p.shoot_cooldown, PLAYER_SHOOT_COOLDOWN);
        assert!(!p.can_shoot());
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut p = player();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };

        assert_eq!(run_update(&mut p, fire, 0.1).len(), 1);
        // 0.3 cooldown: next two ticks are blocked
        assert!(run_update(&mut p, fire, 0.1).is_empty());
        assert!(run_update(&mut p, fire, 0.1).is_empty());
        // cooldown reaches ~0 here
        let spawned = run_update(&mut p, fire, 0.11);
        assert_eq!(spawned.len(), 1);
    }

    #[test]
    fn test_cooldown_decays_without_input() {
        let mut p = player();
        p.shoot_cooldown = 0.3;
        run_update(&mut p, TickInput::default(), 0.5);
        assert!((p.shoot_cooldown - -0.2).abs() < EPS);
        assert!(p.can_shoot());
    }

    #[test]
    fn test_turning_and_thrust() {
        let mut p = player();
        let right = TickInput {
            turn_right: true,
            ..Default::default()
        };
        run_update(&mut p, right, 0.5);
        assert!((p.rotation - 150.0).abs() < EPS);

        let left = TickInput {
            turn_left: true,
            ..Default::default()
        };
        run_update(&mut p, left, 1.0);
        assert!((p.rotation - -150.0).abs() < EPS);

        let mut p = player();
        let forward = TickInput {
            thrust_forward: true,
            ..Default::default()
        };
        run_update(&mut p, forward, 0.5);
        assert_eq!(p.position(), Vec2::new(640.0, 460.0));

        let back = TickInput {
            thrust_back: true,
            ..Default::default()
        };
        run_update(&mut p, back, 1.0);
        assert_eq!(p.position(), Vec2::new(640.0, 260.0));
    }

    #[test]
    fn test_triangle_at_rotation_zero() {
        let p = player();
        let [nose, left, right] = p.triangle();
        let side = PLAYER_RADIUS / 1.5;
        assert_eq!(nose, Vec2::new(640.0, 380.0));
        assert!((left - Vec2::new(640.0 + side, 340.0)).length() < EPS);
        assert!((right - Vec2::new(640.0 - side, 340.0)).length() < EPS);
    }

    #[test]
    fn test_rotation_is_not_wrapped() {
        let mut p = player();
        p.rotate(2.0, PLAYER_TURN_SPEED);
        assert_eq!(p.rotation, 600.0);

        let mut q = player();
        q.rotate(240.0 / PLAYER_TURN_SPEED, PLAYER_TURN_SPEED);
        assert!((p.forward() - q.forward()).length() < EPS);
    }

    #[test]
    fn test_draw_emits_triangle() {
        let p = player();
        let mut surface = crate::renderer::VertexSurface::new(1280.0, 720.0);
        let rect = p.draw(&mut surface, LINE_WIDTH);
        assert!(p.triangle().iter().all(|v| rect.contains(*v)));
        assert_eq!(surface.current().draw_calls, 1);
    }

    proptest! {
        #[test]
        fn prop_rotate_is_linear(r0 in -1000.0f32..1000.0, dt1 in 0.0f32..2.0, dt2 in 0.0f32..2.0, sign in prop::bool::ANY) {
            let s = if sign { 1.0 } else { -1.0 };
            let mut a = player();
            a.rotation = r0;
            a.rotate(s * dt1, PLAYER_TURN_SPEED);
            a.rotate(s * dt2, PLAYER_TURN_SPEED);

            let mut b = player();
            b.rotation = r0;
            b.rotate(s * (dt1 + dt2), PLAYER_TURN_SPEED);

            prop_assert!((a.rotation - b.rotation).abs() < 1e-2);
        }

        #[test]
        fn prop_nose_is_one_radius_out(rotation in -5000.0f32..5000.0, x in 0.0f32..1280.0, y in 0.0f32..720.0) {
            let mut p = Player::new(Vec2::new(x, y), PLAYER_RADIUS).unwrap();
            p.rotation = rotation;
            let [nose, ..] = p.triangle();
            prop_assert!((nose.distance(p.position()) - PLAYER_RADIUS).abs() < 1e-2);
        }
    }
}
