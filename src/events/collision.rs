//! Collision event type and a simple observer.
//!
//! The collision system triggers [`CollisionEvent`] whenever two entities'
//! masks overlap at their current positions. Observers can subscribe to the
//! event to react in a decoupled manner (damage, sound, despawn, etc.).
//!
//! [`observe_log_collision`] is a minimal observer that logs each pair; use
//! it as a reference or replace it with game-specific logic.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

/// Event fired when two entities' collision masks overlap.
///
/// The two fields, [`CollisionEvent::a`] and [`CollisionEvent::b`], are the
/// entity IDs of the participants. No ordering guarantees are provided.
#[derive(Event, Debug, Clone, Copy)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
}

/// Global observer that logs every collision pair at debug level.
pub fn observe_log_collision(trigger: On<CollisionEvent>) {
    let event = trigger.event();
    log::debug!("collision between {:?} and {:?}", event.a, event.b);
}
