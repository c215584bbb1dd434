//! Core types and definitions for the PERILUNE simulation.
//!
//! This crate defines the vocabulary shared across the workspace:
//! geometric types, components, commands, snapshots, events, and constants.
//! It has no dependency on any ECS or runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
