//! Entity spawn factories.
//!
//! Creates Moon, Gun, bullet and fighter entities with their component
//! bundles. Collision-pair wiring lives in the engine, which owns the
//! registry.

use hecs::{Entity, World};

use perilune_core::components::{Body, Bullet, Fighter, Gun, Health, Hull, Moon, Turret};
use perilune_core::constants::*;
use perilune_core::types::{Position, Vec2, Velocity};

use crate::systems::gravity::GravitySources;

/// Spawn the Moon at the origin. It is the dominant gravity source and
/// the damage sink; it feels no gravity itself.
pub fn spawn_moon(world: &mut World) -> Entity {
    world.spawn((
        Moon,
        Position(Vec2::ZERO),
        Velocity::default(),
        Body {
            mass: MOON_MASS,
            radius: MOON_RADIUS,
        },
        Hull::default(),
        Health::new(MOON_HEALTH),
    ))
}

/// Spawn the gun on the Moon's surface. Stationary, rotational only.
pub fn spawn_gun(world: &mut World) -> Entity {
    world.spawn((
        Gun,
        Position(Vec2::new(GUN_MOUNT_X, GUN_MOUNT_Y)),
        Velocity::default(),
        Body {
            mass: GUN_MASS,
            radius: GUN_RADIUS,
        },
        Hull::default(),
        Turret::default(),
    ))
}

/// Spawn a fighter with the Moon as its sole gravity source.
pub fn spawn_fighter(world: &mut World, pos: Vec2, vel: Vec2, moon: Entity) -> Entity {
    world.spawn((
        Fighter,
        Position(pos),
        Velocity(vel),
        Body {
            mass: FIGHTER_MASS,
            radius: FIGHTER_RADIUS,
        },
        Hull::default(),
        GravitySources(vec![moon]),
    ))
}

/// Spawn a bullet with the Moon as its gravity source.
pub fn spawn_bullet(world: &mut World, pos: Vec2, vel: Vec2, moon: Entity) -> Entity {
    world.spawn((
        Bullet,
        Position(pos),
        Velocity(vel),
        Body {
            mass: BULLET_MASS,
            radius: BULLET_RADIUS,
        },
        Hull::default(),
        GravitySources(vec![moon]),
    ))
}
