//! Pairwise collision registry.
//!
//! Pairs are registered explicitly at entity-creation time (bullet against
//! every live fighter, fighter against every live bullet plus the Moon), so
//! the per-tick cost is O(registered pairs), not an all-pairs scan. Hits are
//! reported as tagged events and resolved by the engine in one place.

use hecs::{Entity, World};

use perilune_core::components::{Body, Hull};
use perilune_core::types::{Position, Vec2};

/// What a registered pair means when it touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// `a` = bullet, `b` = fighter: both are destroyed.
    BulletFighter,
    /// `a` = fighter, `b` = Moon: the Moon takes damage, the fighter dies.
    FighterMoon,
}

/// A registered pair under per-frame overlap testing.
#[derive(Debug, Clone)]
struct CollisionPair {
    a: Entity,
    b: Entity,
    kind: CollisionKind,
    /// Whether the pair was overlapping on the previous check. An event
    /// fires only on the transition into overlap, once per contact
    /// episode; after the bodies separate it can fire again.
    in_contact: bool,
}

/// A contact detected this frame.
#[derive(Debug, Clone, Copy)]
pub struct CollisionEvent {
    pub kind: CollisionKind,
    pub a: Entity,
    pub b: Entity,
}

/// Registry of collision pairs. Holds non-owning entity handles; the
/// engine owns the entities and this group.
#[derive(Debug, Clone, Default)]
pub struct CollisionGroup {
    pairs: Vec<CollisionPair>,
}

impl CollisionGroup {
    /// Register a pair. Neither entity has to be alive yet; dead or
    /// despawned participants are skipped at check time and dropped by
    /// `clean`.
    pub fn add_pair(&mut self, a: Entity, b: Entity, kind: CollisionKind) {
        self.pairs.push(CollisionPair {
            a,
            b,
            kind,
            in_contact: false,
        });
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of registered pairs of a given kind.
    pub fn count_kind(&self, kind: CollisionKind) -> usize {
        self.pairs.iter().filter(|p| p.kind == kind).count()
    }

    /// Test every registered pair for circle-circle overlap
    /// (`distance <= radius_a + radius_b`) and return the fresh contacts.
    pub fn check_collisions(&mut self, world: &World) -> Vec<CollisionEvent> {
        let mut events = Vec::new();

        for pair in &mut self.pairs {
            let (Some((pos_a, radius_a)), Some((pos_b, radius_b))) =
                (circle_of(world, pair.a), circle_of(world, pair.b))
            else {
                // A participant is destroyed or despawned; the pair is
                // moot and will be removed by the next clean.
                pair.in_contact = false;
                continue;
            };

            let touching = pos_a.distance_to(&pos_b) <= radius_a + radius_b;
            if touching && !pair.in_contact {
                events.push(CollisionEvent {
                    kind: pair.kind,
                    a: pair.a,
                    b: pair.b,
                });
            }
            pair.in_contact = touching;
        }

        events
    }

    /// Drop every pair referencing a destroyed or despawned participant.
    /// Must run after any destruction so stale pairs neither fire nor
    /// accumulate as entities churn.
    pub fn clean(&mut self, world: &World) {
        self.pairs
            .retain(|pair| is_live(world, pair.a) && is_live(world, pair.b));
    }
}

/// Collision circle of a live entity, or `None` if it is dead or gone.
fn circle_of(world: &World, entity: Entity) -> Option<(Vec2, f64)> {
    if !is_live(world, entity) {
        return None;
    }
    let pos = world.get::<&Position>(entity).ok()?;
    let body = world.get::<&Body>(entity).ok()?;
    Some((pos.0, body.radius))
}

fn is_live(world: &World, entity: Entity) -> bool {
    world
        .get::<&Hull>(entity)
        .map(|hull| !hull.destroyed)
        .unwrap_or(false)
}
