//! Concrete bodies: drifting asteroids, the ship and its projectiles.

pub mod asteroid;
pub mod projectile;
pub mod ship;

pub use asteroid::Asteroid;
pub use projectile::Projectile;
pub use ship::Ship;
