//! Snapshot system — flattens the world into a `GameSnapshot`.
//!
//! View order is Moon, Gun, bullets, fighters, mirroring the engine's
//! ownership layout and keeping serialized output stable for the
//! determinism tests.

use hecs::World;

use perilune_core::components::{Body, Bullet, Fighter, Gun, Health, Moon, Turret};
use perilune_core::enums::{EntityKind, GamePhase};
use perilune_core::events::{AudioEvent, ScreenEvent};
use perilune_core::state::{EntityView, GameSnapshot};
use perilune_core::types::{Position, SimTime, Velocity};

pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    audio_events: Vec<AudioEvent>,
    screen_events: Vec<ScreenEvent>,
) -> GameSnapshot {
    let mut entities = Vec::new();
    let mut moon_health = 0;

    {
        let mut query = world.query::<(&Moon, &Position, &Velocity, &Body, &Health)>();
        for (_entity, (_moon, pos, vel, body, health)) in query.iter() {
            moon_health = health.current;
            entities.push(EntityView {
                kind: EntityKind::Moon,
                position: pos.0,
                velocity: vel.0,
                radius: body.radius,
                angle: None,
            });
        }
    }

    {
        let mut query = world.query::<(&Gun, &Position, &Velocity, &Body, &Turret)>();
        for (_entity, (_gun, pos, vel, body, turret)) in query.iter() {
            entities.push(EntityView {
                kind: EntityKind::Gun,
                position: pos.0,
                velocity: vel.0,
                radius: body.radius,
                angle: Some(turret.angle()),
            });
        }
    }

    {
        let mut query = world.query::<(&Bullet, &Position, &Velocity, &Body)>();
        for (_entity, (_bullet, pos, vel, body)) in query.iter() {
            entities.push(EntityView {
                kind: EntityKind::Bullet,
                position: pos.0,
                velocity: vel.0,
                radius: body.radius,
                angle: None,
            });
        }
    }

    {
        let mut query = world.query::<(&Fighter, &Position, &Velocity, &Body)>();
        for (_entity, (_fighter, pos, vel, body)) in query.iter() {
            entities.push(EntityView {
                kind: EntityKind::Fighter,
                position: pos.0,
                velocity: vel.0,
                radius: body.radius,
                angle: None,
            });
        }
    }

    GameSnapshot {
        time: *time,
        phase,
        moon_health,
        entities,
        audio_events,
        screen_events,
    }
}
