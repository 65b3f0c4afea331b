//! Debug overlay emission.
//!
//! When both [`DebugMode`] and the [`DebugDrawBridge`] are present, this
//! system emits the current collision geometry as draw commands: polygon
//! masks as their world-space segment loops, outline-less masks as their
//! bounding rectangles, and active paths as polylines from each follower's
//! origin. Delivery is fire-and-forget; without the resources the system
//! does nothing.

use bevy_ecs::prelude::*;

use crate::components::collisionmask::CollisionMask;
use crate::components::mapposition::MapPosition;
use crate::components::pathfollow::PathFollower;
use crate::math::Vec2;
use crate::resources::debugdraw::{DebugDrawBridge, DebugDrawCmd};
use crate::resources::debugmode::DebugMode;
use crate::resources::pathstore::PathStore;

/// Emit mask outlines and path polylines over the debug-draw bridge.
pub fn debug_draw_overlays(
    debug: Option<Res<DebugMode>>,
    bridge: Option<Res<DebugDrawBridge>>,
    paths: Option<Res<PathStore>>,
    masks: Query<(&MapPosition, &CollisionMask)>,
    followers: Query<&PathFollower>,
) {
    let (Some(_), Some(bridge)) = (debug, bridge) else {
        return;
    };

    for (position, mask) in masks.iter() {
        let world_mask = mask.at(position.pos);
        if world_mask.is_aabb_only() {
            let rect = world_mask.bounding_rect();
            bridge.send(DebugDrawCmd::Rect {
                x: rect.x,
                y: rect.y,
                w: rect.w,
                h: rect.h,
            });
        } else {
            for segment in world_mask.translated_segments() {
                bridge.send(DebugDrawCmd::Line {
                    x1: segment.x1,
                    y1: segment.y1,
                    x2: segment.x2,
                    y2: segment.y2,
                });
            }
        }
    }

    let Some(paths) = paths else {
        return;
    };
    for follower in followers.iter() {
        let Some(path) = paths.get(&follower.path) else {
            continue;
        };
        for pair in path.nodes().windows(2) {
            let a = follower.origin + Vec2::new(pair[0].x, pair[0].y);
            let b = follower.origin + Vec2::new(pair[1].x, pair[1].y);
            bridge.send(DebugDrawCmd::Line {
                x1: a.x,
                y1: a.y,
                x2: b.x,
                y2: b.y,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(debug_draw_overlays);
        schedule.run(world);
    }

    #[test]
    fn silent_without_debug_mode() {
        let mut world = World::new();
        let (bridge, rx) = DebugDrawBridge::channel();
        world.insert_resource(bridge);
        world.spawn((
            MapPosition::new(0.0, 0.0),
            CollisionMask::rectangle(16.0, 16.0),
        ));

        tick(&mut world);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn polygon_mask_emits_segment_lines() {
        let mut world = World::new();
        let (bridge, rx) = DebugDrawBridge::channel();
        world.insert_resource(bridge);
        world.insert_resource(DebugMode {});
        world.spawn((
            MapPosition::new(10.0, 20.0),
            CollisionMask::rectangle(16.0, 16.0),
        ));

        tick(&mut world);
        let cmds: Vec<_> = rx.try_iter().collect();
        assert_eq!(cmds.len(), 4);
        assert!(cmds.iter().all(|c| matches!(c, DebugDrawCmd::Line { .. })));
    }

    #[test]
    fn aabb_mask_emits_a_rectangle() {
        let mut world = World::new();
        let (bridge, rx) = DebugDrawBridge::channel();
        world.insert_resource(bridge);
        world.insert_resource(DebugMode {});
        world.spawn((
            MapPosition::new(5.0, 6.0),
            CollisionMask::aabb_only(8.0, 4.0),
        ));

        tick(&mut world);
        let cmds: Vec<_> = rx.try_iter().collect();
        assert_eq!(cmds.len(), 1);
        assert_eq!(
            cmds[0],
            DebugDrawCmd::Rect {
                x: 5.0,
                y: 6.0,
                w: 8.0,
                h: 4.0
            }
        );
    }
}
