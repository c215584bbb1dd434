//! Cleanup system: despawns destroyed and out-of-bounds entities.
//!
//! Runs after collision resolution so collections are free of dead
//! entities before the next frame's spawn wiring. Removal never happens
//! while another system is iterating — entities are marked first, then
//! despawned here. Uses a pre-allocated buffer to avoid per-tick
//! allocation. Safe on an empty world.

use hecs::{Entity, World};

use perilune_core::components::{Bullet, Fighter, Hull};
use perilune_core::constants::WORLD_RADIUS;
use perilune_core::types::Position;

/// Remove entities whose hull is destroyed, plus bullets and fighters
/// beyond the world boundary.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, hull) in world.query_mut::<&Hull>() {
        if hull.destroyed {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (pos, _bullet)) in world.query_mut::<(&Position, &Bullet)>() {
        if pos.0.magnitude() > WORLD_RADIUS {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (pos, _fighter)) in world.query_mut::<(&Position, &Fighter)>() {
        if pos.0.magnitude() > WORLD_RADIUS {
            despawn_buffer.push(entity);
        }
    }

    // An entity can be collected twice (destroyed and out of bounds);
    // the second despawn is a harmless NoSuchEntity.
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
