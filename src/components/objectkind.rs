//! Entity-type tag component.
//!
//! The string names a kind registered in
//! [`ObjectRegistry`](crate::resources::objectregistry::ObjectRegistry),
//! which holds the solid flag, the collision-eligibility filter, and the
//! mask template for the kind.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ObjectKind(pub &'static str);

impl ObjectKind {
    pub fn name(&self) -> &'static str {
        self.0
    }
}
