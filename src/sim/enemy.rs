//! Enemy saucer: chases the player and shoots at it

use glam::Vec2;

use super::entity::{Armed, Body, BoundsPolicy, Entity, Gun};
use super::spawn::direction_toward;
use crate::Playfield;
use crate::consts::*;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    body: Body,
    gun: Gun,
    /// Seconds until the next shot
    fire_cooldown: f32,
}

impl Enemy {
    pub const BOUNDS: BoundsPolicy = BoundsPolicy::Wrap;

    pub fn new(pos: Vec2) -> Result<Self> {
        let body = Body::new(pos, Vec2::ZERO);
        body.validate("enemy")?;
        Ok(Self {
            body,
            gun: Gun::default(),
            fire_cooldown: ENEMY_FIRE_INTERVAL,
        })
    }

    /// Point the velocity at `target` (constant speed) and shoot when ready.
    ///
    /// Returns true if a shot was fired.
    pub fn pursue(&mut self, target: Vec2, dt: f32) -> bool {
        let dir = direction_toward(self.body.pos, target);
        self.body.vel = dir * ENEMY_SPEED;

        self.fire_cooldown -= dt;
        if self.fire_cooldown > 0.0 {
            return false;
        }
        self.fire_cooldown = ENEMY_FIRE_INTERVAL;
        let muzzle = self.body.pos + dir * ENEMY_RADIUS;
        self.gun.fire(muzzle, dir, ENEMY_BULLET_SPEED)
    }

    /// Full per-frame update: steer, move, age bullets
    pub fn update(&mut self, dt: f32, target: Vec2, field: &Playfield) {
        self.pursue(target, dt);
        self.advance(dt, field);
    }
}

impl Entity for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn radius(&self) -> f32 {
        ENEMY_RADIUS
    }

    fn advance(&mut self, dt: f32, field: &Playfield) {
        self.body.integrate(dt);
        self.body.confine(Self::BOUNDS, field, ENEMY_RADIUS);
        self.gun.advance(dt, field);
    }
}

impl Armed for Enemy {
    fn gun(&self) -> &Gun {
        &self.gun
    }

    fn gun_mut(&mut self) -> &mut Gun {
        &mut self.gun
    }
}
