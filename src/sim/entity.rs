//! Shared motion and lifetime contract for every simulated body
//!
//! Concrete kinds (ship, asteroid, enemy, bullet) compose a [`Body`] and
//! implement [`Entity`]. Bullet ownership is a component ([`Gun`]) mixed into
//! the kinds that can shoot.

use glam::Vec2;

use crate::consts::*;
use crate::error::{GameError, Result};
use crate::{Playfield, wrap_position};

/// What happens when a body leaves the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsPolicy {
    /// Reappear on the opposite edge
    Wrap,
    /// Mark inactive as soon as the center leaves the screen
    Destroy,
}

/// Kinematic state common to all entities
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in degrees
    pub rotation: f32,
    /// Degrees per second
    pub angular_vel: f32,
    pub active: bool,
}

impl Body {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            rotation: 0.0,
            angular_vel: 0.0,
            active: true,
        }
    }

    pub fn with_rotation(mut self, rotation: f32, angular_vel: f32) -> Self {
        self.rotation = rotation;
        self.angular_vel = angular_vel;
        self
    }

    /// Linear integration of position and heading
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.rotation = (self.rotation + self.angular_vel * dt).rem_euclid(360.0);
    }

    /// Apply a bounds policy after integration
    pub fn confine(&mut self, policy: BoundsPolicy, field: &Playfield, radius: f32) {
        match policy {
            BoundsPolicy::Wrap => self.pos = wrap_position(self.pos, field, radius),
            BoundsPolicy::Destroy => {
                if !field.contains(self.pos) {
                    self.active = false;
                }
            }
        }
    }

    /// Reject bodies that would poison the simulation with NaN/inf
    pub fn validate(&self, kind: &'static str) -> Result<()> {
        if !self.pos.is_finite() {
            return Err(GameError::invalid_spawn(kind, format!("position {}", self.pos)));
        }
        if !self.vel.is_finite() {
            return Err(GameError::invalid_spawn(kind, format!("velocity {}", self.vel)));
        }
        if !self.rotation.is_finite() || !self.angular_vel.is_finite() {
            return Err(GameError::invalid_spawn(kind, "non-finite rotation"));
        }
        Ok(())
    }
}

/// Capability set shared by every simulated object
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Collision radius
    fn radius(&self) -> f32;

    /// Move one frame forward and apply this kind's bounds policy
    fn advance(&mut self, dt: f32, field: &Playfield);

    fn position(&self) -> Vec2 {
        self.body().pos
    }

    fn rotation(&self) -> f32 {
        self.body().rotation
    }

    fn is_active(&self) -> bool {
        self.body().active
    }

    fn destroy(&mut self) {
        self.body_mut().active = false;
    }
}

/// A projectile owned by whoever fired it
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    body: Body,
    /// Seconds left before the bullet fizzles
    ttl: f32,
}

impl Bullet {
    pub const BOUNDS: BoundsPolicy = BoundsPolicy::Destroy;

    pub fn new(pos: Vec2, vel: Vec2) -> Result<Self> {
        let body = Body::new(pos, vel);
        body.validate("bullet")?;
        Ok(Self {
            body,
            ttl: BULLET_LIFETIME,
        })
    }

    pub fn ttl(&self) -> f32 {
        self.ttl
    }
}

impl Entity for Bullet {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn radius(&self) -> f32 {
        BULLET_RADIUS
    }

    fn advance(&mut self, dt: f32, field: &Playfield) {
        self.body.integrate(dt);
        self.body.confine(Self::BOUNDS, field, BULLET_RADIUS);
        self.ttl -= dt;
        if self.ttl <= 0.0 {
            self.body.active = false;
        }
    }
}

/// Bounded bullet magazine
#[derive(Debug, Clone, PartialEq)]
pub struct Gun {
    bullets: Vec<Bullet>,
    capacity: usize,
}

impl Default for Gun {
    fn default() -> Self {
        Self::new(MAX_BULLETS)
    }
}

impl Gun {
    pub fn new(capacity: usize) -> Self {
        Self {
            bullets: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Fire a bullet from `origin` along `direction`.
    ///
    /// Returns false when the magazine is full or the shot is malformed; the
    /// shot is dropped in both cases.
    pub fn fire(&mut self, origin: Vec2, direction: Vec2, speed: f32) -> bool {
        if self.bullets.len() >= self.capacity {
            return false;
        }
        match Bullet::new(origin, direction * speed) {
            Ok(bullet) => {
                self.bullets.push(bullet);
                true
            }
            Err(e) => {
                log::warn!("Dropped shot: {e}");
                false
            }
        }
    }

    /// Advance every bullet and drop the ones that expired or left the screen
    pub fn advance(&mut self, dt: f32, field: &Playfield) {
        for bullet in &mut self.bullets {
            bullet.advance(dt, field);
        }
        self.retain_active();
    }

    pub fn retain_active(&mut self) {
        self.bullets.retain(|b| b.is_active());
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn bullets_mut(&mut self) -> &mut [Bullet] {
        &mut self.bullets
    }

    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }

    pub fn clear(&mut self) {
        self.bullets.clear();
    }

    #[cfg(test)]
    pub(crate) fn load(&mut self, bullet: Bullet) {
        self.bullets.push(bullet);
    }
}

/// Kinds that own a [`Gun`]
pub trait Armed {
    fn gun(&self) -> &Gun;
    fn gun_mut(&mut self) -> &mut Gun;

    fn bullets(&self) -> &[Bullet] {
        self.gun().bullets()
    }
}
