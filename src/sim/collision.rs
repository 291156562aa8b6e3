//! Circle-vs-circle collision passes
//!
//! Five narrow-phase scans run in a fixed order each frame. Each pass removes
//! what it destroyed before the next pass looks at the collections.

use glam::Vec2;
use rand::Rng;

use super::asteroid::{Asteroid, AsteroidSize};
use super::enemy::Enemy;
use super::entity::{Armed, Entity};
use super::ship::Ship;
use crate::consts::ENEMY_KILL_SCORE;

/// True if two circles touch or overlap
#[inline]
pub fn collides(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    pos_a.distance_squared(pos_b) <= reach * reach
}

/// What struck the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum HitCause {
    Asteroid,
    Enemy,
    EnemyBullet,
}

/// Outcome of one frame's collision passes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Points earned this frame
    pub score: u64,
    pub asteroids_destroyed: Vec<AsteroidSize>,
    pub enemies_destroyed: u32,
    /// At most one hit per frame; the first matching pass wins
    pub player_hit: Option<HitCause>,
}

/// Run all collision passes for one frame
pub fn resolve_collisions<R: Rng + ?Sized>(
    ship: &mut Ship,
    asteroids: &mut Vec<Asteroid>,
    enemies: &mut Vec<Enemy>,
    rng: &mut R,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    player_bullets_vs_asteroids(ship, asteroids, rng, &mut report);
    player_bullets_vs_enemies(ship, enemies, &mut report);
    ship.gun_mut().retain_active();

    report.player_hit = player_vs_asteroids(ship, asteroids)
        .or_else(|| player_vs_enemies(ship, enemies))
        .or_else(|| enemy_bullets_vs_player(ship, enemies));

    report
}

fn player_bullets_vs_asteroids<R: Rng + ?Sized>(
    ship: &mut Ship,
    asteroids: &mut Vec<Asteroid>,
    rng: &mut R,
    report: &mut CollisionReport,
) {
    // Fragments join the field after the scan so they can't be hit this frame
    let mut fragments = Vec::new();

    for bullet in ship.gun_mut().bullets_mut() {
        if !bullet.is_active() {
            continue;
        }
        for asteroid in asteroids.iter_mut() {
            if !asteroid.is_active() {
                continue;
            }
            if collides(bullet.position(), bullet.radius(), asteroid.position(), asteroid.radius()) {
                if let Some(shatter) = asteroid.shatter(rng) {
                    report.score += shatter.points;
                    report.asteroids_destroyed.push(shatter.size);
                    fragments.extend(shatter.fragments);
                }
                bullet.destroy();
                break;
            }
        }
    }

    asteroids.retain(|a| a.is_active());
    asteroids.extend(fragments);
}

fn player_bullets_vs_enemies(ship: &mut Ship, enemies: &mut Vec<Enemy>, report: &mut CollisionReport) {
    for bullet in ship.gun_mut().bullets_mut() {
        if !bullet.is_active() {
            continue;
        }
        for enemy in enemies.iter_mut() {
            if !enemy.is_active() {
                continue;
            }
            if collides(bullet.position(), bullet.radius(), enemy.position(), enemy.radius()) {
                report.score += ENEMY_KILL_SCORE;
                report.enemies_destroyed += 1;
                enemy.destroy();
                bullet.destroy();
                log::debug!("Enemy destroyed at {}", enemy.position());
                break;
            }
        }
    }

    enemies.retain(|e| e.is_active());
}

fn player_vs_asteroids(ship: &Ship, asteroids: &[Asteroid]) -> Option<HitCause> {
    asteroids
        .iter()
        .any(|a| collides(ship.position(), ship.radius(), a.position(), a.radius()))
        .then_some(HitCause::Asteroid)
}

fn player_vs_enemies(ship: &Ship, enemies: &[Enemy]) -> Option<HitCause> {
    enemies
        .iter()
        .any(|e| collides(ship.position(), ship.radius(), e.position(), e.radius()))
        .then_some(HitCause::Enemy)
}

fn enemy_bullets_vs_player(ship: &Ship, enemies: &mut [Enemy]) -> Option<HitCause> {
    for enemy in enemies.iter_mut() {
        let gun = enemy.gun_mut();
        let hit = gun
            .bullets_mut()
            .iter_mut()
            .find(|b| collides(ship.position(), ship.radius(), b.position(), b.radius()));
        if let Some(bullet) = hit {
            bullet.destroy();
            gun.retain_active();
            return Some(HitCause::EnemyBullet);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::entity::Bullet;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rock_at(x: f32, y: f32, size: AsteroidSize) -> Asteroid {
        Asteroid::new(Vec2::new(x, y), Vec2::ZERO, size, 0.0, 0).unwrap()
    }

    fn bullet_at(x: f32, y: f32) -> Bullet {
        Bullet::new(Vec2::new(x, y), Vec2::ZERO).unwrap()
    }

    /// Ship parked in a corner far from everything
    fn parked_ship() -> Ship {
        Ship::new(Vec2::new(700.0, 550.0))
    }

    #[test]
    fn test_collides_touching_counts() {
        assert!(collides(Vec2::ZERO, 3.0, Vec2::new(5.0, 0.0), 2.0));
        assert!(!collides(Vec2::ZERO, 3.0, Vec2::new(5.01, 0.0), 2.0));
    }

    #[test]
    fn test_bullet_splits_first_of_four_asteroids() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut ship = parked_ship();
        let mut asteroids = vec![
            rock_at(100.0, 100.0, AsteroidSize::Large),
            rock_at(300.0, 100.0, AsteroidSize::Large),
            rock_at(500.0, 100.0, AsteroidSize::Large),
            rock_at(100.0, 400.0, AsteroidSize::Large),
        ];
        let mut enemies = Vec::new();
        ship.gun_mut().load(bullet_at(105.0, 100.0));

        let report = resolve_collisions(&mut ship, &mut asteroids, &mut enemies, &mut rng);

        assert_eq!(report.score, 200);
        assert_eq!(asteroids.len(), 5);
        assert_eq!(
            asteroids.iter().filter(|a| a.size() == AsteroidSize::Small).count(),
            2
        );
        assert!(asteroids.iter().all(|a| a.is_active()));
        assert!(ship.bullets().is_empty());
        assert_eq!(report.player_hit, None);
    }

    #[test]
    fn test_two_bullets_one_asteroid_splits_once() {
        let mut rng = Pcg32::seed_from_u64(12);
        let mut ship = parked_ship();
        let mut asteroids = vec![rock_at(100.0, 100.0, AsteroidSize::Large)];
        let mut enemies = Vec::new();
        ship.gun_mut().load(bullet_at(100.0, 100.0));
        ship.gun_mut().load(bullet_at(102.0, 100.0));

        let report = resolve_collisions(&mut ship, &mut asteroids, &mut enemies, &mut rng);

        assert_eq!(report.score, 200);
        assert_eq!(asteroids.len(), 2);
        // Second bullet found nothing live to hit and survives
        assert_eq!(ship.bullets().len(), 1);
    }

    #[test]
    fn test_small_asteroid_scores_100() {
        let mut rng = Pcg32::seed_from_u64(13);
        let mut ship = parked_ship();
        let mut asteroids = vec![rock_at(100.0, 100.0, AsteroidSize::Small)];
        let mut enemies = Vec::new();
        ship.gun_mut().load(bullet_at(100.0, 100.0));

        let report = resolve_collisions(&mut ship, &mut asteroids, &mut enemies, &mut rng);

        assert_eq!(report.score, 100);
        assert!(asteroids.is_empty());
    }

    #[test]
    fn test_bullet_kills_enemy_for_500() {
        let mut rng = Pcg32::seed_from_u64(14);
        let mut ship = parked_ship();
        let mut asteroids = Vec::new();
        let mut enemies = vec![Enemy::new(Vec2::new(200.0, 200.0)).unwrap()];
        ship.gun_mut().load(bullet_at(210.0, 200.0));

        let report = resolve_collisions(&mut ship, &mut asteroids, &mut enemies, &mut rng);

        assert_eq!(report.score, 500);
        assert_eq!(report.enemies_destroyed, 1);
        assert!(enemies.is_empty());
        assert!(ship.bullets().is_empty());
    }

    #[test]
    fn test_bullet_consumed_by_asteroid_cannot_hit_enemy() {
        let mut rng = Pcg32::seed_from_u64(15);
        let mut ship = parked_ship();
        let mut asteroids = vec![rock_at(200.0, 200.0, AsteroidSize::Small)];
        let mut enemies = vec![Enemy::new(Vec2::new(205.0, 200.0)).unwrap()];
        ship.gun_mut().load(bullet_at(202.0, 200.0));

        let report = resolve_collisions(&mut ship, &mut asteroids, &mut enemies, &mut rng);

        assert_eq!(report.score, 100);
        assert_eq!(enemies.len(), 1);
    }

    #[test]
    fn test_single_hit_with_multiple_overlaps() {
        let mut rng = Pcg32::seed_from_u64(16);
        let mut ship = Ship::new(Vec2::new(400.0, 300.0));
        let mut asteroids = vec![
            rock_at(405.0, 300.0, AsteroidSize::Large),
            rock_at(395.0, 300.0, AsteroidSize::Small),
        ];
        let mut enemies = vec![Enemy::new(Vec2::new(400.0, 310.0)).unwrap()];

        let report = resolve_collisions(&mut ship, &mut asteroids, &mut enemies, &mut rng);

        assert_eq!(report.player_hit, Some(HitCause::Asteroid));
        // Ramming doesn't destroy anything
        assert_eq!(asteroids.len(), 2);
        assert_eq!(enemies.len(), 1);
    }

    #[test]
    fn test_player_vs_enemy() {
        let mut rng = Pcg32::seed_from_u64(17);
        let mut ship = Ship::new(Vec2::new(400.0, 300.0));
        let mut asteroids = Vec::new();
        let mut enemies = vec![Enemy::new(Vec2::new(440.0, 300.0)).unwrap()];

        let report = resolve_collisions(&mut ship, &mut asteroids, &mut enemies, &mut rng);

        assert_eq!(report.player_hit, Some(HitCause::Enemy));
    }

    #[test]
    fn test_enemy_bullet_hits_player_and_is_consumed() {
        let mut rng = Pcg32::seed_from_u64(18);
        let mut ship = Ship::new(Vec2::new(400.0, 300.0));
        let mut asteroids = Vec::new();
        let mut enemy = Enemy::new(Vec2::new(100.0, 100.0)).unwrap();
        enemy.gun_mut().load(bullet_at(410.0, 300.0));
        enemy.gun_mut().load(bullet_at(395.0, 300.0));
        let mut enemies = vec![enemy];

        let report = resolve_collisions(&mut ship, &mut asteroids, &mut enemies, &mut rng);

        assert_eq!(report.player_hit, Some(HitCause::EnemyBullet));
        // Scan stops at the first bullet; the other stays live
        assert_eq!(enemies[0].bullets().len(), 1);
    }

    proptest! {
        #[test]
        fn prop_collides_is_symmetric(
            ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0, ar in 0.0f32..100.0,
            bx in -1000.0f32..1000.0, by in -1000.0f32..1000.0, br in 0.0f32..100.0,
        ) {
            let a = Vec2::new(ax, ay);
            let b = Vec2::new(bx, by);
            prop_assert_eq!(collides(a, ar, b, br), collides(b, br, a, ar));
        }

        #[test]
        fn prop_concentric_always_collide(x in -1000.0f32..1000.0, y in -1000.0f32..1000.0, r in 0.0f32..100.0) {
            let p = Vec2::new(x, y);
            prop_assert!(collides(p, r, p, BULLET_RADIUS));
        }
    }
}
