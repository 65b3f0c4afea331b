//! Spatial container bounds.
//!
//! The room is the active spatial scope of the simulation: its dimensions
//! bound world-wrap and random placement. Entity iteration happens through
//! ECS queries; this resource only carries the geometry.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct Room {
    pub width: f64,
    pub height: f64,
}

impl Room {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
