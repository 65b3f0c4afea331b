//! Debug toggle resource.
//!
//! The mere presence of this resource indicates that debug overlays and
//! diagnostics should be emitted. Remove it to disable debug behavior.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, systems may emit overlay draw commands or
/// extra logs.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode {}
