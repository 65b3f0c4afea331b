//! Path traversal events.
//!
//! The path system triggers [`PathFinishedEvent`] when a follower with a
//! `Stop` end action runs past its final waypoint and is retired. Restarting
//! and reversing end actions resolve silently inside the follower.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;

/// Event fired when a follower finishes its path and is removed.
#[derive(Event, Debug, Clone)]
pub struct PathFinishedEvent {
    pub entity: Entity,
    /// Name of the path that finished.
    pub path: String,
}

/// Global observer that logs finished paths.
pub fn observe_log_path_finished(trigger: On<PathFinishedEvent>) {
    let event = trigger.event();
    log::info!("{:?} finished path '{}'", event.entity, event.path);
}
