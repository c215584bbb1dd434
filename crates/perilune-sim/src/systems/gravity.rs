//! Gravity and kinematic integration.
//!
//! Each steppable body accumulates inverse-square acceleration from its
//! registered sources, then integrates with semi-implicit Euler
//! (`velocity += accel * dt` before `position += velocity * dt`). Plenty
//! stable for arcade orbits; exact analytic trajectories are not a goal.

use std::collections::HashMap;

use hecs::{Component, Entity, World};

use perilune_core::components::{Body, Bullet, Fighter};
use perilune_core::constants::{DT, GRAVITY_CONST, MIN_GRAVITY_DISTANCE};
use perilune_core::types::{Position, Vec2, Velocity};

/// Ordered list of bodies whose gravity this entity feels. The Moon's
/// own list is empty; bullets and fighters register the Moon.
#[derive(Debug, Clone, Default)]
pub struct GravitySources(pub Vec<Entity>);

/// Integrate one tick of gravity-coupled motion: bullets first, then
/// fighters, matching the engine's fixed step order.
pub fn run(world: &mut World) {
    // Snapshot source masses/positions so every body integrates against
    // the same pre-step state.
    let mut sources: HashMap<Entity, (f64, Vec2)> = HashMap::new();
    {
        let mut query = world.query::<(&Body, &Position)>();
        for (entity, (body, pos)) in query.iter() {
            sources.insert(entity, (body.mass, pos.0));
        }
    }

    integrate::<Bullet>(world, &sources);
    integrate::<Fighter>(world, &sources);
}

fn integrate<M: Component>(world: &mut World, sources: &HashMap<Entity, (f64, Vec2)>) {
    for (_entity, (_marker, pos, vel, gravity)) in
        world.query_mut::<(&M, &mut Position, &mut Velocity, &GravitySources)>()
    {
        let accel = net_acceleration(pos.0, gravity, sources);
        vel.0 += accel * DT;
        pos.0 += vel.0 * DT;
    }
}

/// Sum of `G * m_src / d²` toward each registered source, with the
/// separation clamped above `MIN_GRAVITY_DISTANCE` so near-zero distances
/// never blow up.
fn net_acceleration(
    pos: Vec2,
    gravity: &GravitySources,
    sources: &HashMap<Entity, (f64, Vec2)>,
) -> Vec2 {
    let mut accel = Vec2::ZERO;
    for source in &gravity.0 {
        let Some(&(mass, source_pos)) = sources.get(source) else {
            continue;
        };
        let offset = source_pos - pos;
        let distance = offset.magnitude().max(MIN_GRAVITY_DISTANCE);
        // offset / d³ is the normalized direction divided by d².
        accel += offset * (GRAVITY_CONST * mass / (distance * distance * distance));
    }
    accel
}
