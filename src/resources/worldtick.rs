//! Simulation tick counter.
//!
//! The simulation is step-based: one tick advances every entity's motion,
//! collision, and path state in a deterministic order. This resource counts
//! committed ticks; [`advance_world_tick`](crate::systems::time::advance_world_tick)
//! increments it once per tick.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct WorldTick {
    pub tick: u64,
}
