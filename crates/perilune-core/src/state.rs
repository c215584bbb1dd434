//! Game state snapshot — the complete visible state produced each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, GamePhase};
use crate::events::{AudioEvent, ScreenEvent};
use crate::types::{SimTime, Vec2};

/// Complete game state handed to the presentation layer after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    /// Moon health remaining; zero once the game is lost.
    pub moon_health: u32,
    pub entities: Vec<EntityView>,
    /// Audio cues emitted this tick, in emission order.
    pub audio_events: Vec<AudioEvent>,
    /// Screen transitions emitted this tick.
    pub screen_events: Vec<ScreenEvent>,
}

/// One renderable entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub kind: EntityKind,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f64,
    /// Aim angle (gun only).
    pub angle: Option<f64>,
}
