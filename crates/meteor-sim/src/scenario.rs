//! Seeded arena population: one ship at the origin and an asteroid field.

use std::f64::consts::TAU;

use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use meteor_core::config::ScenarioConfig;
use meteor_core::error::MeteorError;
use meteor_core::{BodyId, Vec3};

use crate::bodies::{Asteroid, Ship};
use crate::world::World;

/// Fill `world` from `config` and return the ship's handle.
///
/// Same config, same world: every random draw comes from one `ChaCha8Rng`
/// seeded with `config.seed`, in a fixed order.
pub fn populate(world: &mut World, config: &ScenarioConfig) -> Result<BodyId, MeteorError> {
    config.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let plane = world.arena().reference_plane_y;

    let ship = world.add(Box::new(Ship::new(
        Vec3::new(0.0, plane, 0.0),
        Vec3::ZERO,
    )))?;

    let mut moving = 0;
    for _ in 0..config.asteroid_count {
        let asteroid = random_asteroid(&mut rng, config, plane);
        if asteroid.is_moving() {
            moving += 1;
        }
        world.add(Box::new(asteroid))?;
    }

    info!(
        "seed {}: {} asteroids ({} drifting) within {} m",
        config.seed, config.asteroid_count, moving, config.field_radius
    );
    Ok(ship)
}

/// One asteroid, uniformly distributed over the annulus between the clear
/// zone and the field edge.
pub fn random_asteroid(rng: &mut ChaCha8Rng, config: &ScenarioConfig, plane: f64) -> Asteroid {
    let bearing = rng.gen_range(0.0..TAU);
    let range = rng
        .gen_range(config.clear_zone.powi(2)..config.field_radius.powi(2))
        .sqrt();
    let position = Vec3::new(range * bearing.cos(), plane, range * bearing.sin());
    let radius = rng.gen_range(config.min_radius..=config.max_radius);

    let velocity = if rng.gen_bool(config.moving_fraction) {
        let heading = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(0.0..=config.max_speed);
        Vec3::new(speed * heading.cos(), 0.0, speed * heading.sin())
    } else {
        Vec3::ZERO
    };

    Asteroid::new(position, velocity, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use meteor_core::config::ArenaConfig;
    use meteor_core::enums::BodyKind;

    fn world() -> World {
        World::new(&ArenaConfig::default()).unwrap()
    }

    #[test]
    fn test_populate_places_ship_and_field() {
        let mut world = world();
        let config = ScenarioConfig {
            seed: 3,
            asteroid_count: 50,
            ..Default::default()
        };
        let ship = populate(&mut world, &config).unwrap();

        assert_eq!(world.body(ship).map(|b| b.kind()), Some(BodyKind::Ship));
        assert_eq!(world.count_of(BodyKind::Asteroid), 50);
        for (_, body) in world.iter() {
            let p = body.position();
            assert_eq!(p.y, 0.0);
            if body.kind() == BodyKind::Asteroid {
                let range = (p.x * p.x + p.z * p.z).sqrt();
                assert!(range >= config.clear_zone - 1e-9 && range <= config.field_radius);
                assert!((config.min_radius..=config.max_radius).contains(&body.bounding_radius()));
                assert!(body.velocity().length() <= config.max_speed + 1e-9);
            }
        }
    }

    #[test]
    fn test_only_drifting_asteroids_are_tracked() {
        let mut world = world();
        let config = ScenarioConfig {
            seed: 11,
            asteroid_count: 40,
            moving_fraction: 0.0,
            ..Default::default()
        };
        populate(&mut world, &config).unwrap();
        // Just the ship.
        assert_eq!(world.tracked_len(), 1);
    }

    #[test]
    fn test_same_seed_same_field() {
        let config = ScenarioConfig {
            seed: 99,
            asteroid_count: 30,
            ..Default::default()
        };
        let mut a = world();
        let mut b = world();
        populate(&mut a, &config).unwrap();
        populate(&mut b, &config).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());

        let mut c = world();
        populate(&mut c, &ScenarioConfig { seed: 100, ..config }).unwrap();
        assert_ne!(a.snapshot(), c.snapshot());
    }

    #[test]
    fn test_invalid_scenario_is_rejected() {
        let mut world = world();
        let config = ScenarioConfig {
            min_radius: 3.0,
            max_radius: 1.0,
            ..Default::default()
        };
        assert!(populate(&mut world, &config).is_err());
        assert!(world.is_empty());
    }
}
