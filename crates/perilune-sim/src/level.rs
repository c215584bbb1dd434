//! Level scripting.
//!
//! A level is an external collaborator behind a narrow interface: each
//! tick it is stepped and may order fighter spawns; after the collision
//! pass the engine asks it whether the player has won. `WaveLevel` is the
//! stock implementation: scheduled waves spawning fighters on a ring at
//! seeded-random bearings.

use std::f64::consts::{FRAC_PI_2, TAU};

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use perilune_core::constants::{
    WAVE_SPAWN_RANGE_MAX, WAVE_SPAWN_RANGE_MIN, WAVE_TANGENTIAL_SPEED,
};
use perilune_core::types::{SimTime, Vec2};

/// A fighter spawn ordered by a level script.
#[derive(Debug, Clone, Copy)]
pub struct FighterSpawn {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// The level-script interface the engine drives.
pub trait Level {
    /// Advance the script by one tick; returns the fighters to spawn now.
    fn step(&mut self, time: &SimTime, rng: &mut ChaCha8Rng) -> Vec<FighterSpawn>;

    /// Victory condition, evaluated after the collision pass.
    fn won(&self, fighters_alive: usize) -> bool;

    /// Re-arm the script for a fresh run. Called by `start()` so a
    /// restart mid-mission replays the schedule instead of inheriting
    /// its spent state.
    fn reset(&mut self) {}
}

/// A single scheduled wave.
#[derive(Debug, Clone)]
pub struct WaveEntry {
    /// Tick at which this wave spawns.
    pub spawn_at_tick: u64,
    /// Number of fighters in the wave.
    pub count: u32,
    /// Whether this wave has already been spawned.
    pub spawned: bool,
}

impl WaveEntry {
    pub fn new(spawn_at_tick: u64, count: u32) -> Self {
        Self {
            spawn_at_tick,
            count,
            spawned: false,
        }
    }
}

/// Scheduled-wave level: victory once every wave has spawned and no
/// fighter remains alive.
#[derive(Debug, Clone, Default)]
pub struct WaveLevel {
    waves: Vec<WaveEntry>,
}

impl WaveLevel {
    pub fn new(waves: Vec<WaveEntry>) -> Self {
        Self { waves }
    }

    /// Default 3-wave mission with escalating pressure. The opening
    /// fighter comes from `start()`, not from the schedule.
    pub fn default_mission() -> Self {
        Self::new(vec![
            WaveEntry::new(300, 2),
            WaveEntry::new(900, 3),
            WaveEntry::new(1800, 4),
        ])
    }

    /// Total fighters across all waves.
    pub fn total_fighters(&self) -> u32 {
        self.waves.iter().map(|w| w.count).sum()
    }
}

impl Level for WaveLevel {
    fn step(&mut self, time: &SimTime, rng: &mut ChaCha8Rng) -> Vec<FighterSpawn> {
        let mut spawns = Vec::new();
        for wave in &mut self.waves {
            if !wave.spawned && time.tick >= wave.spawn_at_tick {
                for _ in 0..wave.count {
                    spawns.push(ring_spawn(rng));
                }
                wave.spawned = true;
            }
        }
        spawns
    }

    fn won(&self, fighters_alive: usize) -> bool {
        self.waves.iter().all(|w| w.spawned) && fighters_alive == 0
    }

    fn reset(&mut self) {
        for wave in &mut self.waves {
            wave.spawned = false;
        }
    }
}

/// Spawn point on the ring: random bearing, random range within the
/// band, tangential velocity so the fighter falls in on a curve.
fn ring_spawn(rng: &mut ChaCha8Rng) -> FighterSpawn {
    let bearing: f64 = rng.gen_range(0.0..TAU);
    let range: f64 = rng.gen_range(WAVE_SPAWN_RANGE_MIN..WAVE_SPAWN_RANGE_MAX);
    FighterSpawn {
        position: Vec2::polar(bearing, range),
        velocity: Vec2::polar(bearing + FRAC_PI_2, WAVE_TANGENTIAL_SPEED),
    }
}
