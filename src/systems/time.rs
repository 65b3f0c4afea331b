//! Tick update system.
//!
//! Increments the shared [`WorldTick`](crate::resources::worldtick::WorldTick)
//! resource once per simulation step.

use bevy_ecs::prelude::*;

use crate::resources::worldtick::WorldTick;

/// Advance the committed tick counter by one.
pub fn advance_world_tick(world: &mut World) {
    world.resource_mut::<WorldTick>().tick += 1;
}
