//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary, keeping
//! input handling decoupled from the frame step.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start a new game. Also the reset operation: valid from any phase.
    Start,
    /// Pointer moved, in game coordinates (origin at the Moon's center).
    UpdatePointer { x: f64, y: f64 },
    /// Hold or release the bullet trigger.
    SetFiring { firing: bool },
    /// Held rotation keys: clockwise / counter-clockwise.
    SetRotation { cw: bool, ccw: bool },
    /// Fire the laser (one-shot cue; the beam itself is presentation).
    FireLaser,
}
