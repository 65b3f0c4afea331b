//! Per-tick motion integration.
//!
//! One run of [`motion_step`] advances every entity that carries a
//! [`Motion`], a [`MapPosition`], and a [`CollisionMask`]:
//!
//! 1. A [`SolidScope`] snapshot captures all masks at their start-of-tick
//!    positions. Every placement query this tick reads that snapshot, so
//!    iteration order cannot leak mid-tick positions into other entities'
//!    checks.
//! 2. Gravity is applied once, the pending moves resolve into a candidate
//!    position, and the step commits.
//! 3. If the committed spot is blocked, the previous step's moves are
//!    replayed with per-move back-off against the blocking mask. The result
//!    is best-effort: residual overlap can survive one tick.

use bevy_ecs::prelude::*;

use crate::components::collisionmask::CollisionMask;
use crate::components::mapposition::MapPosition;
use crate::components::motion::Motion;
use crate::components::objectkind::ObjectKind;
use crate::resources::objectregistry::ObjectRegistry;
use crate::systems::collision::{SolidScope, blocking_entry};
use crate::systems::moveavoid::move_avoid;

/// Integrate all pending motion and resolve blocked positions.
///
/// Entities without a [`Motion`] component never move but still occupy the
/// scope as obstacles.
pub fn motion_step(
    mut query: Query<(
        Entity,
        &ObjectKind,
        &mut MapPosition,
        Option<&mut Motion>,
        &CollisionMask,
    )>,
    registry: Res<ObjectRegistry>,
) {
    let scope = SolidScope::capture(
        query
            .iter()
            .map(|(entity, kind, position, _, mask)| (entity, kind, position, mask)),
        &registry,
    );

    for (entity, kind, mut position, motion, mask) in query.iter_mut() {
        let Some(mut motion) = motion else {
            continue;
        };
        motion.apply_gravity();
        let candidate = motion.resultant_position(position.pos);
        motion.commit_step(&mut position, candidate);

        let obstacle = blocking_entry(
            entity,
            kind.name(),
            mask,
            position.pos,
            &scope,
            &registry,
        )
        .map(|entry| entry.mask.clone());

        if let Some(obstacle) = obstacle {
            move_avoid(
                entity,
                kind.name(),
                &mut position,
                &mut motion,
                mask,
                &obstacle,
                &scope,
                &registry,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;
    use crate::resources::objectregistry::ObjectSpec;
    use crate::systems::collision::is_place_free;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn make_world() -> World {
        let mut world = World::new();
        let mut registry = ObjectRegistry::default();
        registry.register(
            "ball",
            ObjectSpec::new(true, CollisionMask::rectangle(16.0, 16.0)),
        );
        registry.register(
            "wall",
            ObjectSpec::new(true, CollisionMask::rectangle(16.0, 16.0)),
        );
        world.insert_resource(registry);
        world
    }

    fn tick(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(motion_step);
        schedule.run(world);
    }

    #[test]
    fn free_move_commits_the_resultant() {
        let mut world = make_world();
        let mut motion = Motion::new();
        motion.add_move(5.0, 90.0);
        let entity = world
            .spawn((
                ObjectKind("ball"),
                MapPosition::new(0.0, 0.0),
                motion,
                CollisionMask::rectangle(16.0, 16.0),
            ))
            .id();

        tick(&mut world);

        let position = world.get::<MapPosition>(entity).unwrap();
        assert!(approx_eq(position.pos.x, 5.0));
        assert_eq!(position.previous, Vec2::ZERO);
        let motion = world.get::<Motion>(entity).unwrap();
        assert!(motion.pending.is_empty());
        assert_eq!(motion.previous_step.len(), 1);
    }

    #[test]
    fn blocked_move_backs_off() {
        let mut world = make_world();
        let mut motion = Motion::new();
        motion.add_move(36.0, 90.0);
        let entity = world
            .spawn((
                ObjectKind("ball"),
                MapPosition::new(0.0, 0.0),
                motion,
                CollisionMask::rectangle(16.0, 16.0),
            ))
            .id();
        world.spawn((
            ObjectKind("wall"),
            MapPosition::new(40.0, 0.0),
            Motion::new(),
            CollisionMask::rectangle(16.0, 16.0),
        ));

        tick(&mut world);

        let position = *world.get::<MapPosition>(entity).unwrap();
        assert!(position.pos.x < 36.0);

        let registry = world.resource::<ObjectRegistry>().clone();
        let scope = {
            let mut query =
                world.query::<(Entity, &ObjectKind, &MapPosition, &CollisionMask)>();
            SolidScope::capture(query.iter(&world), &registry)
        };
        let mask = CollisionMask::rectangle(16.0, 16.0);
        assert!(is_place_free(
            entity, "ball", &mask, position.pos, &scope, &registry
        ));
    }

    #[test]
    fn gravity_accumulates_across_ticks() {
        let mut world = make_world();
        let mut motion = Motion::new();
        motion.set_gravity(2.0);
        let entity = world
            .spawn((
                ObjectKind("ball"),
                MapPosition::new(0.0, 0.0),
                motion,
                CollisionMask::rectangle(16.0, 16.0),
            ))
            .id();

        tick(&mut world);
        tick(&mut world);

        let position = world.get::<MapPosition>(entity).unwrap();
        // Base 1.0 keeps the ramp flat: two ticks of plain gravity.
        assert!(approx_eq(position.pos.y, 4.0));
        let motion = world.get::<Motion>(entity).unwrap();
        assert!(approx_eq(motion.gravity_exponent(), 0.02));
    }

    #[test]
    fn entities_without_moves_stay_put() {
        let mut world = make_world();
        let entity = world
            .spawn((
                ObjectKind("ball"),
                MapPosition::new(7.0, 7.0),
                Motion::new(),
                CollisionMask::rectangle(16.0, 16.0),
            ))
            .id();

        tick(&mut world);

        let position = world.get::<MapPosition>(entity).unwrap();
        assert_eq!(position.pos, Vec2::new(7.0, 7.0));
    }

    #[test]
    fn stale_scope_keeps_ticks_order_independent() {
        // Two movers heading toward each other check against start-of-tick
        // positions, so both resolve against where the other began.
        let mut world = make_world();
        let mut a_motion = Motion::new();
        a_motion.add_move(10.0, 90.0);
        let a = world
            .spawn((
                ObjectKind("ball"),
                MapPosition::new(0.0, 0.0),
                a_motion,
                CollisionMask::rectangle(16.0, 16.0),
            ))
            .id();
        let mut b_motion = Motion::new();
        b_motion.add_move(10.0, 270.0);
        let b = world
            .spawn((
                ObjectKind("ball"),
                MapPosition::new(24.0, 0.0),
                b_motion,
                CollisionMask::rectangle(16.0, 16.0),
            ))
            .id();

        tick(&mut world);

        // Each mover was resolved against the other's start-of-tick mask,
        // so neither ends inside the space the other occupied at capture
        // time.
        let a_pos = world.get::<MapPosition>(a).unwrap().pos;
        let b_pos = world.get::<MapPosition>(b).unwrap().pos;
        assert!(a_pos.x <= 10.0);
        assert!(b_pos.x >= 14.0);
    }
}
