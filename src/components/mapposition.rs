//! World-space position component.
//!
//! Besides the current position, [`MapPosition`] remembers the position at
//! the start of the previous simulation step and the position the entity was
//! created at. The previous position anchors speed/direction fallbacks and
//! collision back-off; the start position supports respawn-style game logic.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::math::{self, Vec2};
use crate::resources::room::Room;

#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapPosition {
    /// Current position.
    pub pos: Vec2,
    /// Position at the start of the previous committed step.
    pub previous: Vec2,
    /// Position the entity was created at.
    pub start: Vec2,
}

impl MapPosition {
    /// Create a position with `previous` and `start` equal to `pos`.
    pub fn new(x: f64, y: f64) -> Self {
        let pos = Vec2::new(x, y);
        Self {
            pos,
            previous: pos,
            start: pos,
        }
    }

    pub fn distance_to(&self, target: Vec2) -> f64 {
        math::distance(self.pos, target)
    }

    pub fn direction_to(&self, target: Vec2) -> f64 {
        math::direction_between(self.pos, target)
    }

    /// The position aligned down to the given grid. Snap intervals below 1
    /// are treated as 1. Negative coordinates snap toward negative infinity
    /// on both axes.
    pub fn snapped(&self, hsnap: f64, vsnap: f64) -> Vec2 {
        let hsnap = hsnap.max(1.0);
        let vsnap = vsnap.max(1.0);
        Vec2::new(
            (self.pos.x / hsnap).floor() * hsnap,
            (self.pos.y / vsnap).floor() * vsnap,
        )
    }

    /// Align the position to the given grid.
    pub fn snap(&mut self, hsnap: f64, vsnap: f64) {
        self.pos = self.snapped(hsnap, vsnap);
    }

    pub fn is_snapped(&self, hsnap: f64, vsnap: f64) -> bool {
        self.pos == self.snapped(hsnap, vsnap)
    }

    /// Wrap the position around the room bounds on the requested axes.
    /// `margin` widens the wrap band beyond the room edge on both sides.
    pub fn wrap(&mut self, room: &Room, horizontal: bool, vertical: bool, margin: f64) {
        let hspan = room.width + 2.0 * margin;
        let vspan = room.height + 2.0 * margin;
        if horizontal {
            if self.pos.x < -margin {
                self.pos.x += hspan;
            } else if self.pos.x > room.width + margin {
                self.pos.x -= hspan;
            }
        }
        if vertical {
            if self.pos.y < -margin {
                self.pos.y += vspan;
            } else if self.pos.y > room.height + margin {
                self.pos.y -= vspan;
            }
        }
    }

    /// Move to a random grid-snapped point inside the room.
    pub fn randomize(&mut self, room: &Room, rng: &mut fastrand::Rng, hsnap: f64, vsnap: f64) {
        self.pos = Vec2::new(rng.f64() * room.width, rng.f64() * room.height);
        self.snap(hsnap, vsnap);
    }
}
