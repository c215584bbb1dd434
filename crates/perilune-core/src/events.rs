//! Events emitted by the simulation for the audio and presentation layers.
//!
//! Fire-and-forget: the engine pushes these during a tick and drains them
//! into the snapshot; no return values are consumed.

use serde::{Deserialize, Serialize};

/// Audio cue points for the frontend sound system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// Start the looping theme (game started).
    ThemeStart,
    /// Stop the looping theme (game over).
    ThemeStop,
    /// A bullet left the barrel.
    BulletFired,
    /// The laser was triggered.
    LaserFired,
}

/// Screen-transition hooks for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScreenEvent {
    /// Close the active game screen.
    GameScreenClosed,
    /// Open the loss screen.
    LossScreenOpened,
    /// Open the win screen.
    WinScreenOpened,
}
