//! Path-following system.
//!
//! Advances every entity carrying a
//! [`PathFollower`](crate::components::pathfollow::PathFollower) by one tick.
//! A follower whose `Stop` end action fires is removed from the entity and a
//! [`PathFinishedEvent`] is triggered; a follower whose path has disappeared
//! from the store is removed with a warning. Followers on empty paths report
//! "not running" and are left untouched.

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::mapposition::MapPosition;
use crate::components::pathfollow::{PathFollower, PathProgress};
use crate::events::path::PathFinishedEvent;
use crate::resources::pathstore::PathStore;

/// Step all active path followers.
pub fn path_follow(
    mut commands: Commands,
    paths: Res<PathStore>,
    mut query: Query<(Entity, &mut PathFollower, &mut MapPosition)>,
) {
    for (entity, mut follower, mut position) in query.iter_mut() {
        let Some(path) = paths.get(&follower.path) else {
            warn!(
                "path '{}' is not in the store; removing follower from {:?}",
                follower.path, entity
            );
            commands.entity(entity).remove::<PathFollower>();
            continue;
        };

        match follower.step(path, &mut position) {
            PathProgress::NotRunning => {
                debug!("{:?} follows empty path '{}'; nothing to do", entity, follower.path);
            }
            PathProgress::Following => {}
            PathProgress::Finished => {
                commands.trigger(PathFinishedEvent {
                    entity,
                    path: follower.path.clone(),
                });
                commands.entity(entity).remove::<PathFollower>();
            }
        }
    }
}
