//! Asteroids and their fragmentation

use glam::Vec2;
use rand::Rng;

use super::entity::{Body, BoundsPolicy, Entity};
use super::spawn;
use crate::Playfield;
use crate::consts::*;
use crate::error::Result;

/// Size tier. Large rocks are spawned; small ones only come from splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AsteroidSize {
    Small = 1,
    Large = 2,
}

impl AsteroidSize {
    pub fn tier(self) -> u8 {
        self as u8
    }

    pub fn radius(self) -> f32 {
        match self {
            AsteroidSize::Small => SMALL_ASTEROID_RADIUS,
            AsteroidSize::Large => LARGE_ASTEROID_RADIUS,
        }
    }

    /// Points for shooting one of these
    pub fn points(self) -> u64 {
        u64::from(self.tier()) * 100
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    body: Body,
    size: AsteroidSize,
    /// Sprite variant picked at spawn time (the renderer maps it to a texture)
    variant: u8,
}

/// What a destroyed asteroid leaves behind
#[derive(Debug, Clone)]
pub struct Shatter {
    pub points: u64,
    pub size: AsteroidSize,
    pub fragments: Vec<Asteroid>,
}

impl Asteroid {
    pub const BOUNDS: BoundsPolicy = BoundsPolicy::Wrap;

    pub fn new(pos: Vec2, vel: Vec2, size: AsteroidSize, spin: f32, variant: u8) -> Result<Self> {
        let body = Body::new(pos, vel).with_rotation(0.0, spin);
        body.validate("asteroid")?;
        Ok(Self {
            body,
            size,
            variant,
        })
    }

    pub fn size(&self) -> AsteroidSize {
        self.size
    }

    pub fn variant(&self) -> u8 {
        self.variant
    }

    /// Destroy this asteroid, splitting it if it is large.
    ///
    /// Returns `None` if it was already destroyed earlier in the frame, so two
    /// bullets landing together can never split the same rock twice.
    pub fn shatter<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Shatter> {
        if !self.body.active {
            return None;
        }
        self.body.active = false;

        let mut fragments = Vec::new();
        if self.size == AsteroidSize::Large {
            for _ in 0..2 {
                let (vel, spin) = spawn::fragment_launch(rng);
                let variant = rng.random_range(0..2);
                match Asteroid::new(self.body.pos, vel, AsteroidSize::Small, spin, variant) {
                    Ok(fragment) => fragments.push(fragment),
                    Err(e) => log::warn!("Skipped fragment: {e}"),
                }
            }
        }

        log::debug!(
            "Asteroid (size {}) destroyed at {}, {} fragments",
            self.size.tier(),
            self.body.pos,
            fragments.len()
        );

        Some(Shatter {
            points: self.size.points(),
            size: self.size,
            fragments,
        })
    }
}

impl Entity for Asteroid {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn radius(&self) -> f32 {
        self.size.radius()
    }

    fn advance(&mut self, dt: f32, field: &Playfield) {
        self.body.integrate(dt);
        self.body.confine(Self::BOUNDS, field, self.size.radius());
    }
}
