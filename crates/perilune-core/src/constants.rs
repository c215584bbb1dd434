//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- World bounds ---

/// Entities beyond this range from the origin are despawned.
pub const WORLD_RADIUS: f64 = 2_000.0;

// --- Gravity ---

/// Gravitational constant (arcade-tuned, not physical).
pub const GRAVITY_CONST: f64 = 1.0;

/// Minimum separation used in the inverse-square law. Distances below
/// this are clamped so near-zero separation never produces a singular
/// acceleration.
pub const MIN_GRAVITY_DISTANCE: f64 = 1.0;

// --- Moon ---

/// Moon mass — the dominant gravity source.
pub const MOON_MASS: f64 = 300_000.0;

/// Moon collision radius.
pub const MOON_RADIUS: f64 = 20.0;

/// Moon starting health. Each fighter impact removes one point.
pub const MOON_HEALTH: u32 = 100;

/// Damage dealt by a fighter striking the Moon.
pub const FIGHTER_IMPACT_DAMAGE: u32 = 1;

// --- Gun ---

/// Gun mount point relative to the Moon's center (on the surface).
pub const GUN_MOUNT_X: f64 = 0.0;
pub const GUN_MOUNT_Y: f64 = -30.0;

/// Barrel length — bullets spawn this far from the mount, along the aim.
pub const GUN_LENGTH: f64 = 20.0;

/// Gun collision/render extent.
pub const GUN_RADIUS: f64 = 8.0;

/// Gun mass (render/inertia parameter; the gun is not a gravity source).
pub const GUN_MASS: f64 = 20.0;

/// Manual rotation rate (radians per second of held input).
pub const GUN_TURN_RATE: f64 = 1.0;

// --- Bullets ---

/// Minimum seconds between shots while the trigger is held.
pub const BULLET_PERIOD: f64 = 0.5;

/// Muzzle speed (units per second).
pub const BULLET_SPEED: f64 = 200.0;

pub const BULLET_MASS: f64 = 1.0;
pub const BULLET_RADIUS: f64 = 3.0;

// --- Fighters ---

pub const FIGHTER_MASS: f64 = 100.0;
pub const FIGHTER_RADIUS: f64 = 10.0;

// --- Wave levels ---

/// Spawn ring for scripted waves (min/max range from origin).
pub const WAVE_SPAWN_RANGE_MIN: f64 = 350.0;
pub const WAVE_SPAWN_RANGE_MAX: f64 = 500.0;

/// Tangential speed given to wave-spawned fighters so they arrive on a
/// curved infall rather than a straight drop.
pub const WAVE_TANGENTIAL_SPEED: f64 = 40.0;
