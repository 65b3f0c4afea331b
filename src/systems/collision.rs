//! Collision detection: mask intersection and placement queries.
//!
//! Detection runs in two phases. The broad phase rejects mask pairs whose
//! bounding rectangles do not overlap (touching edges count as overlap).
//! When either mask has no outline the broad-phase verdict is final; masks
//! with outlines continue to the narrow phase, an all-pairs line-segment
//! intersection scan.
//!
//! Placement queries ([`is_place_free`] and friends) run against a
//! [`SolidScope`]: a snapshot of every entity's kind, solid flag, and
//! positioned mask taken at the start of the tick. Entities advanced earlier
//! in the same tick are still seen at their start-of-tick positions, while
//! the entity under evaluation supplies its own in-progress candidate
//! position. Snapshotting also keeps the stored mask components untouched
//! during queries.

use bevy_ecs::prelude::*;

use crate::components::collisionmask::CollisionMask;
use crate::components::mapposition::MapPosition;
use crate::components::objectkind::ObjectKind;
use crate::events::collision::CollisionEvent;
use crate::math::{self, Vec2};
use crate::resources::objectregistry::ObjectRegistry;

/// Exact intersection test between two positioned masks.
pub fn masks_intersect(a: &CollisionMask, b: &CollisionMask) -> bool {
    if !a.bounding_rect().overlaps(&b.bounding_rect()) {
        return false;
    }
    if a.is_aabb_only() || b.is_aabb_only() {
        return true;
    }

    // Outlines are at most a handful of segments; the scan stays exhaustive
    // instead of returning on the first hit.
    let mut hit = false;
    for s1 in a.translated_segments() {
        for s2 in b.translated_segments() {
            if math::segments_intersect(s1.start(), s1.end(), s2.start(), s2.end()) {
                hit = true;
            }
        }
    }
    hit
}

/// One snapshotted entity inside a [`SolidScope`].
#[derive(Clone, Debug)]
pub struct ScopeEntry {
    pub entity: Entity,
    pub kind: &'static str,
    pub solid: bool,
    /// The entity's mask positioned where the entity was at tick start.
    pub mask: CollisionMask,
}

/// Start-of-tick snapshot of every collidable entity.
#[derive(Clone, Debug, Default)]
pub struct SolidScope {
    entries: Vec<ScopeEntry>,
}

impl SolidScope {
    /// Capture the scope from the current entity state.
    pub fn capture<'a>(
        entities: impl Iterator<Item = (Entity, &'a ObjectKind, &'a MapPosition, &'a CollisionMask)>,
        registry: &ObjectRegistry,
    ) -> Self {
        let entries = entities
            .map(|(entity, kind, position, mask)| ScopeEntry {
                entity,
                kind: kind.name(),
                solid: registry.is_solid(kind.name()),
                mask: mask.at(position.pos),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ScopeEntry] {
        &self.entries
    }
}

/// The first solid, mutually eligible entity whose mask intersects `mask`
/// positioned at `candidate`, excluding `entity` itself.
pub fn blocking_entry<'a>(
    entity: Entity,
    kind: &str,
    mask: &CollisionMask,
    candidate: Vec2,
    scope: &'a SolidScope,
    registry: &ObjectRegistry,
) -> Option<&'a ScopeEntry> {
    let probe = mask.at(candidate);
    scope.entries().iter().find(|entry| {
        entry.entity != entity
            && entry.solid
            && registry.collision_eligible(kind, entry.kind)
            && registry.collision_eligible(entry.kind, kind)
            && masks_intersect(&probe, &entry.mask)
    })
}

/// Whether `entity` could occupy `candidate` without being blocked.
///
/// Only solid entities whose kind pair is mutually eligible can block; a
/// one-directional eligibility still blocks the pair.
pub fn is_place_free(
    entity: Entity,
    kind: &str,
    mask: &CollisionMask,
    candidate: Vec2,
    scope: &SolidScope,
    registry: &ObjectRegistry,
) -> bool {
    blocking_entry(entity, kind, mask, candidate, scope, registry).is_none()
}

/// Whether `candidate` overlaps no other entity at all, regardless of
/// solidity or eligibility.
pub fn is_place_empty(
    entity: Entity,
    mask: &CollisionMask,
    candidate: Vec2,
    scope: &SolidScope,
) -> bool {
    let probe = mask.at(candidate);
    !scope
        .entries()
        .iter()
        .any(|entry| entry.entity != entity && masks_intersect(&probe, &entry.mask))
}

/// Whether `candidate` overlaps any entity of `target_kind`, regardless of
/// solidity or eligibility. Sensor/trigger-style query.
pub fn is_place_meeting(
    entity: Entity,
    mask: &CollisionMask,
    candidate: Vec2,
    target_kind: &str,
    scope: &SolidScope,
) -> bool {
    let probe = mask.at(candidate);
    scope.entries().iter().any(|entry| {
        entry.entity != entity && entry.kind == target_kind && masks_intersect(&probe, &entry.mask)
    })
}

/// Whether one polar move from `position` lands somewhere free.
pub fn is_move_free(
    entity: Entity,
    kind: &str,
    mask: &CollisionMask,
    position: Vec2,
    magnitude: f64,
    direction: f64,
    scope: &SolidScope,
    registry: &ObjectRegistry,
) -> bool {
    let candidate = position + math::polar_offset(magnitude, direction);
    is_place_free(entity, kind, mask, candidate, scope, registry)
}

/// Pairwise overlap scan over all masked entities at their current
/// positions. Each overlapping pair triggers one [`CollisionEvent`].
pub fn collision_events(
    mut commands: Commands,
    query: Query<(Entity, &MapPosition, &CollisionMask)>,
) {
    let mut pairs: Vec<(Entity, Entity)> = Vec::new();

    for [(entity_a, position_a, mask_a), (entity_b, position_b, mask_b)] in
        query.iter_combinations()
    {
        if masks_intersect(&mask_a.at(position_a.pos), &mask_b.at(position_b.pos)) {
            pairs.push((entity_a, entity_b));
        }
    }

    for (a, b) in pairs {
        commands.trigger(CollisionEvent { a, b });
    }
}
