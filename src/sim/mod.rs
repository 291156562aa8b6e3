//! Simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only, owned by the session
//! - Entities removed in the same frame they are destroyed
//! - No rendering, audio or platform dependencies

pub mod asteroid;
pub mod collision;
pub mod enemy;
pub mod entity;
pub mod ship;
pub mod spawn;
pub mod state;
pub mod tick;

pub use asteroid::{Asteroid, AsteroidSize, Shatter};
pub use collision::{CollisionReport, HitCause, collides, resolve_collisions};
pub use enemy::Enemy;
pub use entity::{Armed, Body, BoundsPolicy, Bullet, Entity, Gun};
pub use ship::{Ship, ShipControls};
pub use spawn::{EnemyArrival, EnemyIntroduction};
pub use state::{GameEvent, GameOverState, GamePhase, GameState, SessionSnapshot};
pub use tick::{TickInput, tick};
