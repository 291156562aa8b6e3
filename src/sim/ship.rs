//! The player's ship

use glam::Vec2;

use super::entity::{Armed, Body, BoundsPolicy, Entity, Gun};
use crate::consts::*;
use crate::{Playfield, heading_to_vec};

/// Steering commands for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShipControls {
    pub thrust: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Shoot key went down this frame (edge, not level)
    pub fire: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    body: Body,
    gun: Gun,
}

impl Ship {
    pub const BOUNDS: BoundsPolicy = BoundsPolicy::Wrap;

    /// A fresh ship at rest, nose pointing up the screen
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, Vec2::ZERO).with_rotation(270.0, 0.0),
            gun: Gun::default(),
        }
    }

    /// Unit vector along the nose
    pub fn heading(&self) -> Vec2 {
        heading_to_vec(self.body.rotation)
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.vel
    }

    /// Apply input: set turn rate, accelerate, and fire.
    ///
    /// Returns true if a bullet left the gun.
    pub fn steer(&mut self, controls: &ShipControls, dt: f32) -> bool {
        self.body.angular_vel = match (controls.turn_left, controls.turn_right) {
            (true, false) => -SHIP_TURN_SPEED,
            (false, true) => SHIP_TURN_SPEED,
            _ => 0.0,
        };

        if controls.thrust {
            let vel = self.body.vel + self.heading() * SHIP_THRUST * dt;
            self.body.vel = vel.clamp_length_max(SHIP_MAX_SPEED);
        }

        if controls.fire {
            let nose = self.body.pos + self.heading() * PLAYER_RADIUS;
            return self.gun.fire(nose, self.heading(), BULLET_SPEED);
        }
        false
    }
}

impl Entity for Ship {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn radius(&self) -> f32 {
        PLAYER_RADIUS
    }

    fn advance(&mut self, dt: f32, field: &Playfield) {
        self.body.integrate(dt);
        self.body.confine(Self::BOUNDS, field, PLAYER_RADIUS);
        self.gun.advance(dt, field);
    }
}

impl Armed for Ship {
    fn gun(&self) -> &Gun {
        &self.gun
    }

    fn gun_mut(&mut self) -> &mut Gun {
        &mut self.gun
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_new_ship_is_at_rest_facing_up() {
        let ship = Ship::new(Vec2::new(400.0, 300.0));
        assert_eq!(ship.velocity(), Vec2::ZERO);
        assert!(ship.heading().y < -0.99);
        assert!(ship.bullets().is_empty());
    }

    #[test]
    fn test_thrust_accelerates_along_nose() {
        let mut ship = Ship::new(Vec2::new(400.0, 300.0));
        let controls = ShipControls {
            thrust: true,
            ..Default::default()
        };
        ship.steer(&controls, DT);
        assert!(ship.velocity().y < 0.0);
        assert!(ship.velocity().x.abs() < 1e-3);
    }

    #[test]
    fn test_speed_is_capped() {
        let mut ship = Ship::new(Vec2::new(400.0, 300.0));
        let controls = ShipControls {
            thrust: true,
            ..Default::default()
        };
        for _ in 0..600 {
            ship.steer(&controls, DT);
        }
        assert!(ship.velocity().length() <= SHIP_MAX_SPEED + 1e-3);
    }

    #[test]
    fn test_turning_changes_heading() {
        let field = Playfield::default();
        let mut ship = Ship::new(Vec2::new(400.0, 300.0));
        let controls = ShipControls {
            turn_right: true,
            ..Default::default()
        };
        ship.steer(&controls, 0.5);
        ship.advance(0.5, &field);
        assert!((ship.rotation() - (270.0 + SHIP_TURN_SPEED * 0.5).rem_euclid(360.0)).abs() < 1e-3);
    }

    #[test]
    fn test_fire_spawns_bullet_at_nose() {
        let mut ship = Ship::new(Vec2::new(400.0, 300.0));
        let controls = ShipControls {
            fire: true,
            ..Default::default()
        };
        assert!(ship.steer(&controls, DT));
        let bullet = &ship.bullets()[0];
        assert!((bullet.position() - Vec2::new(400.0, 280.0)).length() < 1e-3);
        assert!(bullet.body().vel.y < 0.0);
    }

    #[test]
    fn test_ship_wraps_around_edges() {
        let field = Playfield::default();
        let mut ship = Ship::new(Vec2::new(400.0, 300.0));
        ship.body_mut().vel = Vec2::new(SHIP_MAX_SPEED, 0.0);
        for _ in 0..300 {
            ship.advance(DT, &field);
        }
        assert!(ship.position().x >= -PLAYER_RADIUS && ship.position().x <= field.width + PLAYER_RADIUS);
        assert!(ship.is_active());
    }
}
