//! Game engine — the core orchestrator.
//!
//! `Game` owns the hecs world, the collision registry and the phase
//! machine, processes queued player commands at tick boundaries, drives
//! the fixed per-tick step order, and produces `GameSnapshot`s.
//!
//! Single-threaded and frame-driven: one `tick` per rendered frame,
//! nothing suspends, and within a step the order is always
//! spawn → level → aim → physics → collision → cleanup → win check,
//! because collision resolution assumes every body has already moved.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use perilune_core::commands::PlayerCommand;
use perilune_core::components::{Bullet, Fighter, Health, Hull, Turret};
use perilune_core::constants::{BULLET_PERIOD, BULLET_SPEED, FIGHTER_IMPACT_DAMAGE, GUN_LENGTH};
use perilune_core::enums::GamePhase;
use perilune_core::events::{AudioEvent, ScreenEvent};
use perilune_core::state::GameSnapshot;
use perilune_core::types::{Position, SimTime, Vec2};

use crate::collision::{CollisionEvent, CollisionGroup, CollisionKind};
use crate::level::Level;
use crate::systems;
use crate::world_setup;

/// Configuration for a new game.
pub struct GameConfig {
    /// RNG seed for level scripts. Same seed = same simulation.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// Continuous control inputs, kept separate from the discrete game
/// phase. Updated by commands, read by the step.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputIntent {
    /// Tracked pointer position in game coordinates.
    pub pointer: Vec2,
    /// Bullet trigger held.
    pub firing: bool,
    /// Clockwise rotation key held.
    pub cw: bool,
    /// Counter-clockwise rotation key held.
    pub ccw: bool,
}

/// The game engine. Owns the world, all entities and the collision
/// registry; no other component mutates them directly.
pub struct Game {
    world: World,
    time: SimTime,
    phase: GamePhase,
    input: InputIntent,
    collisions: CollisionGroup,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    audio_events: Vec<AudioEvent>,
    screen_events: Vec<ScreenEvent>,
    level: Option<Box<dyn Level>>,
    rng: ChaCha8Rng,
    moon: Option<Entity>,
    gun: Option<Entity>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            input: InputIntent::default(),
            collisions: CollisionGroup::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
            screen_events: Vec::new(),
            level: None,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            moon: None,
            gun: None,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Install the active level script.
    pub fn play_level(&mut self, level: Box<dyn Level>) {
        self.level = Some(level);
    }

    /// Start a new game. Also the reset operation, re-entrant from any
    /// phase: fresh world, fresh Moon and Gun, empty collections, one
    /// opening fighter, the installed level re-armed, theme loop started.
    pub fn start(&mut self) {
        self.world = World::new();
        self.collisions = CollisionGroup::default();
        self.despawn_buffer.clear();
        self.time = SimTime::default();
        if let Some(level) = &mut self.level {
            level.reset();
        }

        self.moon = Some(world_setup::spawn_moon(&mut self.world));
        self.gun = Some(world_setup::spawn_gun(&mut self.world));
        self.add_fighter(Vec2::new(100.0, 50.0), Vec2::ZERO);

        // Discrete intents reset; the tracked pointer survives.
        self.input.firing = false;
        self.input.cw = false;
        self.input.ccw = false;

        self.audio_events.push(AudioEvent::ThemeStart);
        self.phase = GamePhase::Running;
    }

    /// Advance the simulation by one tick and return the snapshot.
    pub fn tick(&mut self) -> GameSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Running {
            self.step();
            self.time.advance();
        }

        let audio_events = std::mem::take(&mut self.audio_events);
        let screen_events = std::mem::take(&mut self.screen_events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            audio_events,
            screen_events,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Number of registered collision pairs.
    pub fn collision_pairs(&self) -> usize {
        self.collisions.len()
    }

    /// Fighters currently alive (spawned and not destroyed).
    pub fn fighters_alive(&self) -> usize {
        let mut query = self.world.query::<(&Fighter, &Hull)>();
        query.iter().filter(|(_, (_, hull))| !hull.destroyed).count()
    }

    /// Bullets currently alive.
    pub fn bullets_alive(&self) -> usize {
        let mut query = self.world.query::<(&Bullet, &Hull)>();
        query.iter().filter(|(_, (_, hull))| !hull.destroyed).count()
    }

    /// Mutable world access for test setups.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Read-only access to the collision registry for tests.
    #[cfg(test)]
    pub fn collisions(&self) -> &CollisionGroup {
        &self.collisions
    }

    /// Spawn a fighter: Moon as sole gravity source, one pair against
    /// every live bullet, one pair against the Moon.
    pub fn add_fighter(&mut self, pos: Vec2, vel: Vec2) {
        debug_assert!(self.moon.is_some(), "add_fighter called before start");
        let Some(moon) = self.moon else {
            return;
        };

        let fighter = world_setup::spawn_fighter(&mut self.world, pos, vel, moon);

        let mut live_bullets = Vec::new();
        {
            let mut query = self.world.query::<(&Bullet, &Hull)>();
            for (entity, (_bullet, hull)) in query.iter() {
                if !hull.destroyed {
                    live_bullets.push(entity);
                }
            }
        }
        for bullet in live_bullets {
            self.collisions
                .add_pair(bullet, fighter, CollisionKind::BulletFighter);
        }
        self.collisions
            .add_pair(fighter, moon, CollisionKind::FighterMoon);
    }

    /// Spawn a bullet: Moon as gravity source, one pair against every
    /// live fighter. Fighters spawned later wire themselves back, so the
    /// pairing stays symmetric.
    pub fn add_bullet(&mut self, pos: Vec2, vel: Vec2) {
        debug_assert!(self.moon.is_some(), "add_bullet called before start");
        let Some(moon) = self.moon else {
            return;
        };

        let bullet = world_setup::spawn_bullet(&mut self.world, pos, vel, moon);

        let mut live_fighters = Vec::new();
        {
            let mut query = self.world.query::<(&Fighter, &Hull)>();
            for (entity, (_fighter, hull)) in query.iter() {
                if !hull.destroyed {
                    live_fighters.push(entity);
                }
            }
        }
        for fighter in live_fighters {
            self.collisions
                .add_pair(bullet, fighter, CollisionKind::BulletFighter);
        }

        self.audio_events.push(AudioEvent::BulletFired);
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Start => self.start(),
            PlayerCommand::UpdatePointer { x, y } => {
                self.input.pointer = Vec2::new(x, y);
            }
            PlayerCommand::SetFiring { firing } => {
                self.input.firing = firing;
            }
            PlayerCommand::SetRotation { cw, ccw } => {
                self.input.cw = cw;
                self.input.ccw = ccw;
            }
            PlayerCommand::FireLaser => {
                self.audio_events.push(AudioEvent::LaserFired);
            }
        }
    }

    /// One frame of simulation, in the fixed order.
    fn step(&mut self) {
        // 1. Fire if the trigger is held and the cooldown elapsed. Uses
        //    the aim from the previous frame.
        self.fire_if_ready();

        // 2. Level script spawns.
        if let Some(mut level) = self.level.take() {
            let spawns = level.step(&self.time, &mut self.rng);
            self.level = Some(level);
            for spawn in spawns {
                self.add_fighter(spawn.position, spawn.velocity);
            }
        }

        // 3. Gun rotation + pointer aim.
        systems::gun::run_aim(&mut self.world, &self.input, self.time.dt());

        // 4. Gravity + integration, bullets then fighters.
        systems::gravity::run(&mut self.world);

        // 5. Pairwise contact detection.
        let events = self.collisions.check_collisions(&self.world);

        // 6. Resolve contacts, then prune — within this frame, so the
        //    collections are clean before the next frame's wiring.
        self.resolve_collisions(events);
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        self.collisions.clean(&self.world);

        // 7. Victory check.
        if self.phase == GamePhase::Running {
            if let Some(level) = &self.level {
                if level.won(self.fighters_alive()) {
                    self.win();
                }
            }
        }
    }

    /// Spawn a bullet at the muzzle if firing and off cooldown.
    fn fire_if_ready(&mut self) {
        if !self.input.firing {
            return;
        }
        let Some(gun) = self.gun else {
            return;
        };

        let shot = {
            let Ok(mut turret) = self.world.get::<&mut Turret>(gun) else {
                return;
            };
            let Ok(pos) = self.world.get::<&Position>(gun) else {
                return;
            };
            if turret.ready(self.time.elapsed_secs, BULLET_PERIOD) {
                turret.last_shot_secs = Some(self.time.elapsed_secs);
                let angle = turret.angle();
                Some((
                    pos.0 + Vec2::polar(angle, GUN_LENGTH),
                    Vec2::polar(angle, BULLET_SPEED),
                ))
            } else {
                None
            }
        };

        if let Some((muzzle, velocity)) = shot {
            self.add_bullet(muzzle, velocity);
        }
    }

    /// Resolve this frame's contact events through the single dispatcher.
    /// Handlers tolerate participants already destroyed earlier in the
    /// same pass.
    fn resolve_collisions(&mut self, events: Vec<CollisionEvent>) {
        for event in events {
            match event.kind {
                CollisionKind::BulletFighter => {
                    if !self.is_live(event.a) || !self.is_live(event.b) {
                        continue;
                    }
                    self.destroy(event.a);
                    self.destroy(event.b);
                }
                CollisionKind::FighterMoon => {
                    // a = fighter, b = moon
                    if !self.is_live(event.a) {
                        continue;
                    }
                    self.destroy(event.a);

                    let depleted = match self.world.get::<&mut Health>(event.b) {
                        Ok(mut health) => {
                            health.damage(FIGHTER_IMPACT_DAMAGE);
                            health.depleted()
                        }
                        Err(_) => false,
                    };
                    if depleted && self.phase == GamePhase::Running {
                        self.lose();
                    }
                }
            }
        }
    }

    fn destroy(&mut self, entity: Entity) {
        if let Ok(mut hull) = self.world.get::<&mut Hull>(entity) {
            hull.destroy();
        }
    }

    fn is_live(&self, entity: Entity) -> bool {
        self.world
            .get::<&Hull>(entity)
            .map(|hull| !hull.destroyed)
            .unwrap_or(false)
    }

    /// Moon health exhausted: terminal until the next `start`.
    fn lose(&mut self) {
        self.phase = GamePhase::Lost;
        self.screen_events.push(ScreenEvent::GameScreenClosed);
        self.screen_events.push(ScreenEvent::LossScreenOpened);
        self.audio_events.push(AudioEvent::ThemeStop);
    }

    /// Level reported victory: terminal until the next `start`.
    fn win(&mut self) {
        self.phase = GamePhase::Won;
        self.screen_events.push(ScreenEvent::GameScreenClosed);
        self.screen_events.push(ScreenEvent::WinScreenOpened);
        self.audio_events.push(AudioEvent::ThemeStop);
    }
}
