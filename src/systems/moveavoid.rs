//! Collision resolution by iterative back-off.
//!
//! When a computed position collides, the resolver walks the obstructed
//! endpoint back along the movement line toward its start in ten fixed
//! increments of one tenth of the attempted distance. There is no closed-form
//! separation solve; a result that still collides after the budget is spent
//! is an accepted outcome the caller tolerates for one tick.
//!
//! [`move_avoid`] replays the previous step's moves one at a time from the
//! recorded pre-step position, correcting each obstructed sub-move and
//! rewriting its magnitude so later speed queries agree with the corrected
//! positions.

use bevy_ecs::prelude::Entity;

use crate::components::collisionmask::CollisionMask;
use crate::components::mapposition::MapPosition;
use crate::components::motion::Motion;
use crate::math::{self, Rect, Vec2};
use crate::resources::objectregistry::ObjectRegistry;
use crate::systems::collision::{SolidScope, is_place_free, masks_intersect};

/// Fixed iteration budget shared by both back-off variants.
const BACKOFF_ATTEMPTS: u32 = 10;

/// Back `to` off toward `from` until `mask` no longer intersects `obstacle`
/// or the attempt budget runs out.
///
/// The returned point never lies farther from `from` than `to` does, and may
/// still collide when the budget is exhausted.
pub fn move_outside(
    mask: &CollisionMask,
    from: Vec2,
    to: Vec2,
    obstacle: &CollisionMask,
) -> Vec2 {
    let total = math::distance(from, to);
    let back = math::direction_between(to, from);
    let delta = total / f64::from(BACKOFF_ATTEMPTS);

    let mut current = to;
    let mut attempts = 0;
    while masks_intersect(&mask.at(current), obstacle) && attempts < BACKOFF_ATTEMPTS {
        current += math::polar_offset(delta, back);
        attempts += 1;
    }
    current
}

/// Rectangle-vs-rectangle variant of [`move_outside`] with the identical
/// iteration and step-size contract.
pub fn move_outside_rect(size: Vec2, from: Vec2, to: Vec2, obstacle: &Rect) -> Vec2 {
    let total = math::distance(from, to);
    let back = math::direction_between(to, from);
    let delta = total / f64::from(BACKOFF_ATTEMPTS);

    let mut current = to;
    let mut attempts = 0;
    while Rect::new(current.x, current.y, size.x, size.y).overlaps(obstacle)
        && attempts < BACKOFF_ATTEMPTS
    {
        current += math::polar_offset(delta, back);
        attempts += 1;
    }
    current
}

/// Re-simulate the previous step's moves with per-move correction against
/// `obstacle`.
///
/// The entity is rewound to its recorded pre-step position, then each move
/// in [`Motion::previous_step`] is applied in order. A sub-move landing on a
/// non-free spot is backed off via [`move_outside`] and its recorded
/// magnitude updated to the distance actually covered.
pub fn move_avoid(
    entity: Entity,
    kind: &str,
    position: &mut MapPosition,
    motion: &mut Motion,
    mask: &CollisionMask,
    obstacle: &CollisionMask,
    scope: &SolidScope,
    registry: &ObjectRegistry,
) {
    position.pos = position.previous;

    for mv in motion.previous_step.iter_mut() {
        position.previous = position.pos;
        position.pos += mv.offset();

        if !is_place_free(entity, kind, mask, position.pos, scope, registry)
            && position.pos != position.previous
        {
            position.pos = move_outside(mask, position.previous, position.pos, obstacle);
            mv.magnitude = math::distance(position.pos, position.previous);
        }
    }
}
