//! Gun aiming system.
//!
//! Pointer auto-aim and held rotation keys are layered, not exclusive:
//! auto-aim sets the base angle toward the tracked pointer every tick,
//! and held cw/ccw input accumulates into an additive manual offset.

use hecs::World;

use perilune_core::components::{Gun, Turret};
use perilune_core::constants::GUN_TURN_RATE;
use perilune_core::types::Position;

use crate::engine::InputIntent;

/// Apply rotational input, then re-aim at the pointer.
pub fn run_aim(world: &mut World, input: &InputIntent, dt: f64) {
    for (_entity, (_gun, turret, pos)) in world.query_mut::<(&Gun, &mut Turret, &Position)>() {
        if input.cw || input.ccw {
            let direction = (input.ccw as i8 - input.cw as i8) as f64;
            turret.manual_offset += GUN_TURN_RATE * direction * dt;
        }
        let to_pointer = input.pointer - pos.0;
        turret.base_angle = to_pointer.angle();
    }
}
