//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Game phase (top-level state machine).
///
/// `Won` and `Lost` are terminal until `Start` resets everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    NotStarted,
    Running,
    Won,
    Lost,
}

/// Kind tag for snapshot entity views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Moon,
    Gun,
    Bullet,
    Fighter,
}
