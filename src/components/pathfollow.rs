//! Path-following component.
//!
//! A [`PathFollower`] attached to an entity is the "running" state of path
//! traversal; removing the component returns the entity to idle. The
//! follower references a [`Path`](crate::resources::pathstore::Path) by name
//! (the path itself lives in the
//! [`PathStore`](crate::resources::pathstore::PathStore) resource) and keeps
//! the traversal state: signed speed, current node index, end-of-path policy,
//! and the origin the path's relative coordinates are offset from.
//!
//! Each tick, [`PathFollower::step`] moves the entity toward the target node
//! (the next node when moving forward, the current node when moving
//! backward), advances the node index when the remaining distance drops
//! below the per-tick speed, and resolves the configured [`EndAction`] once
//! the index would run past the last (or first) waypoint.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use super::mapposition::MapPosition;
use crate::math::{self, Vec2};
use crate::resources::pathstore::Path;

/// Policy applied when a traversal runs past the end of its path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndAction {
    /// Retire the follower.
    Stop,
    /// Restart at node 0 and snap the entity to the path's start.
    RestartFromStart,
    /// Restart at node 0 with the origin re-anchored to the entity's
    /// current position.
    RestartFromCurrent,
    /// Negate the speed and continue in the opposite direction.
    Reverse,
}

/// Outcome of one [`PathFollower::step`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathProgress {
    /// The path is empty; nothing happened.
    NotRunning,
    /// The follower moved or resolved a non-terminating end action.
    Following,
    /// A `Stop` end action fired; the caller should retire the follower.
    Finished,
}

#[derive(Component, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathFollower {
    /// Name of the path in the `PathStore`.
    pub path: String,
    /// Signed traversal speed; the sign selects the direction.
    pub speed: f64,
    pub end_action: EndAction,
    /// Index of the most recently reached node.
    pub current_node: usize,
    /// World position the path's relative coordinates are offset from.
    pub origin: Vec2,
}

impl PathFollower {
    /// Begin traversal of `path`.
    ///
    /// With `absolute` set, the origin anchors at the path's first waypoint;
    /// otherwise the path replays relative to the entity's current position.
    pub fn start(
        name: impl Into<String>,
        path: &Path,
        speed: f64,
        end_action: EndAction,
        absolute: bool,
        entity_pos: Vec2,
    ) -> Self {
        let origin = if absolute {
            path.node(0)
                .map(|n| Vec2::new(n.x, n.y))
                .unwrap_or(entity_pos)
        } else {
            entity_pos
        };
        Self {
            path: name.into(),
            speed,
            end_action,
            current_node: 0,
            origin,
        }
    }

    /// World position of the path node at `index`.
    pub fn node_position(&self, path: &Path, index: usize) -> Option<Vec2> {
        path.node(index)
            .map(|n| self.origin + Vec2::new(n.x, n.y))
    }

    /// Advance the traversal by one tick.
    pub fn step(&mut self, path: &Path, position: &mut MapPosition) -> PathProgress {
        if path.is_empty() {
            return PathProgress::NotRunning;
        }
        let last = path.len() - 1;
        self.current_node = self.current_node.min(last);
        let forward = self.speed >= 0.0;

        let target_index = if forward {
            if self.current_node >= last {
                // The index would run past the final waypoint.
                return self.handle_path_end(path, position);
            }
            self.current_node + 1
        } else {
            self.current_node
        };
        let Some(target) = self.node_position(path, target_index) else {
            return PathProgress::NotRunning;
        };

        let pace = (self.speed * path.nodes()[target_index].speed).abs();
        position.previous = position.pos;
        position.pos = math::approach(position.pos, target, pace);

        if math::distance(position.pos, target) < pace {
            if forward {
                self.current_node += 1;
            } else if self.current_node == 0 {
                // The index would run past the first waypoint.
                return self.handle_path_end(path, position);
            } else {
                self.current_node -= 1;
            }
        }
        PathProgress::Following
    }

    fn handle_path_end(&mut self, path: &Path, position: &mut MapPosition) -> PathProgress {
        match self.end_action {
            EndAction::Stop => PathProgress::Finished,
            EndAction::RestartFromStart => {
                self.current_node = 0;
                if let Some(start) = self.node_position(path, 0) {
                    position.previous = start;
                    position.pos = start;
                }
                PathProgress::Following
            }
            EndAction::RestartFromCurrent => {
                self.current_node = 0;
                self.origin = position.pos;
                PathProgress::Following
            }
            EndAction::Reverse => {
                self.speed = -self.speed;
                self.current_node = if self.speed >= 0.0 {
                    0
                } else {
                    path.len().saturating_sub(2)
                };
                PathProgress::Following
            }
        }
    }
}
