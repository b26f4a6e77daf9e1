//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Grid index ---

/// Side length of one grid cell (meters).
///
/// Smaller cells give tighter query results but more buckets and more
/// re-keying as bodies move. Larger cells mean fewer, fuller buckets and
/// more false candidates per query.
pub const CELL_SIZE: f64 = 30.0;

/// Row stride used to fold (row, col) into one key: `row * stride + col`.
///
/// Should exceed the widest column span the arena can reach (about 150 km
/// each side of the origin at the default cell size). Beyond that two
/// distinct cells share a key and a bucket: queries stay correct, since
/// every candidate is checked against its own box, but get slower.
pub const GRID_ROW_STRIDE: i64 = 10_000;

/// Y coordinate of the plane the primary queries are centered on.
pub const REFERENCE_PLANE_Y: f64 = 0.0;

// --- Targeting ---

/// Side length of the cube the targeting policy queries around the shooter.
pub const TARGETING_BOX_SIZE: f64 = 60.0;

// --- Gun ---

/// Projectile speed relative to the shooter (m/s).
pub const PROJECTILE_SPEED: f64 = 50.0;

/// Maximum projectile flight time (seconds).
pub const PROJECTILE_LIFETIME_SECS: f64 = 1.2;

/// Projectile collision radius (meters).
pub const PROJECTILE_RADIUS: f64 = 0.25;

/// Minimum time between two shots (seconds).
pub const GUN_COOLDOWN_SECS: f64 = 0.25;

// --- Bodies ---

/// Ship collision radius (meters).
pub const SHIP_RADIUS: f64 = 2.0;

/// Default number of asteroids in a generated field.
pub const ASTEROID_COUNT: usize = 200;

/// Radius of the disc the asteroid field is scattered over (meters).
pub const ASTEROID_FIELD_RADIUS: f64 = 400.0;

/// Asteroids never spawn closer than this to the ship (meters).
pub const ASTEROID_CLEAR_ZONE: f64 = 10.0;

/// Asteroid radius range (meters).
pub const ASTEROID_MIN_RADIUS: f64 = 1.0;
pub const ASTEROID_MAX_RADIUS: f64 = 4.0;

/// Top drift speed of a moving asteroid (m/s).
pub const ASTEROID_MAX_SPEED: f64 = 8.0;

/// Share of the field that drifts instead of sitting still.
pub const ASTEROID_MOVING_FRACTION: f64 = 0.5;
