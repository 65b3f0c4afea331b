//! Motion accumulator component.
//!
//! [`Motion`] collects polar move vectors during a simulation step, together
//! with friction and a ramping gravity term, and resolves them into one
//! candidate position per step. The accumulator never mutates the entity's
//! position itself; [`Motion::resultant_position`] is pure and the caller
//! commits the step once collision checks have settled on a final position.
//!
//! Moves resolved during the previous step stay available in
//! [`Motion::previous_step`] so that collision avoidance can replay them one
//! at a time against an obstacle.
//!
//! None of these operations fail. NaN magnitudes or directions propagate
//! into the resulting coordinates; validating inputs is the caller's job.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::mapposition::MapPosition;
use crate::math::{self, Vec2};

/// Upper bound of the gravity ramp exponent.
const GRAVITY_EXPONENT_CAP: f64 = 10.0;
/// Exponent growth per gravity application.
const GRAVITY_RAMP_STEP: f64 = 0.01;
/// Ramp step count at which the exponent reaches the cap.
const GRAVITY_RAMP_STEPS_MAX: u32 = 1000;

/// A pending displacement in polar form.
///
/// Canonicalized on construction: a negative magnitude flips the direction by
/// 180°, and the direction is normalized into `[0, 360)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolarMove {
    pub magnitude: f64,
    pub direction: f64,
}

impl PolarMove {
    pub fn new(magnitude: f64, direction: f64) -> Self {
        if magnitude < 0.0 {
            Self {
                magnitude: -magnitude,
                direction: math::absolute_angle(direction + 180.0),
            }
        } else {
            Self {
                magnitude,
                direction: math::absolute_angle(direction),
            }
        }
    }

    /// Cartesian projection of this move.
    pub fn offset(&self) -> Vec2 {
        math::polar_offset(self.magnitude, self.direction)
    }
}

/// Per-entity motion state: pending moves, friction, and gravity.
#[derive(Component, Clone, Debug, Serialize, Deserialize)]
pub struct Motion {
    /// Moves queued for the current step. Cleared by [`Motion::commit_step`].
    pub pending: SmallVec<[PolarMove; 4]>,
    /// The resolved moves of the last committed step, consumed by
    /// collision-avoidance replay.
    pub previous_step: SmallVec<[PolarMove; 4]>,
    /// Friction magnitude applied once per step against the net travel
    /// direction. Never negative.
    pub friction: f64,
    gravity: f64,
    gravity_direction: f64,
    gravity_base: f64,
    gravity_steps: u32,
}

impl Default for Motion {
    fn default() -> Self {
        Self::new()
    }
}

impl Motion {
    pub fn new() -> Self {
        Self {
            pending: SmallVec::new(),
            previous_step: SmallVec::new(),
            friction: 0.0,
            gravity: 0.0,
            gravity_direction: 180.0,
            gravity_base: 1.0,
            gravity_steps: 0,
        }
    }

    /// Queue a canonicalized move for this step.
    pub fn add_move(&mut self, magnitude: f64, direction: f64) {
        self.pending.push(PolarMove::new(magnitude, direction));
    }

    /// Queue a move of `magnitude` from `from` toward `target`.
    ///
    /// Returns `false` without queuing anything when `from` is already
    /// within `magnitude` of the target.
    pub fn move_toward(&mut self, magnitude: f64, from: Vec2, target: Vec2) -> bool {
        if math::distance(from, target) < magnitude {
            return false;
        }
        self.add_move(magnitude, math::direction_between(from, target));
        true
    }

    /// Queue a move of `magnitude` from `from` directly away from `repel`.
    pub fn move_away(&mut self, magnitude: f64, from: Vec2, repel: Vec2) {
        self.add_move(
            magnitude,
            math::opposite_angle(math::direction_between(from, repel)),
        );
    }

    /// Resolve all pending moves from `position` and apply one friction step.
    ///
    /// The friction step pulls the summed point back along the line toward
    /// `position` and never travels past it: friction larger than the net
    /// displacement lands exactly on `position`. Pure; call
    /// [`Motion::commit_step`] to install the result.
    pub fn resultant_position(&self, position: Vec2) -> Vec2 {
        let mut sum = position;
        for mv in &self.pending {
            sum += mv.offset();
        }

        if self.friction > 0.0 {
            let travel = math::distance(position, sum);
            if travel > 0.0 {
                if self.friction >= travel {
                    return position;
                }
                let ahead = math::direction_between(position, sum);
                sum -= math::polar_offset(self.friction, ahead);
            }
        }

        sum
    }

    /// Queue the gravity displacement for this step and advance the ramp.
    ///
    /// The displacement has magnitude `gravity · base^exponent` along the
    /// gravity direction; the exponent then grows by 0.01, capped at 10.
    /// Call at most once per simulation step; repeated calls double-apply
    /// gravity.
    pub fn apply_gravity(&mut self) {
        if self.gravity != 0.0 {
            let magnitude = self.gravity * self.gravity_base.powf(self.gravity_exponent());
            self.pending
                .push(PolarMove::new(magnitude, self.gravity_direction));
            if self.gravity_steps < GRAVITY_RAMP_STEPS_MAX {
                self.gravity_steps += 1;
            }
        }
    }

    /// Install `new_position` as the entity's position and retire the
    /// pending moves into [`Motion::previous_step`].
    pub fn commit_step(&mut self, position: &mut MapPosition, new_position: Vec2) {
        position.previous = position.pos;
        position.pos = new_position;
        self.previous_step = std::mem::take(&mut self.pending);
    }

    /// Scalar speed of the current step.
    ///
    /// Derived from the delta between the resultant and current positions;
    /// when that delta is exactly zero, falls back to the distance covered
    /// by the previous step so the value never degenerates mid-tick.
    pub fn speed(&self, position: &MapPosition) -> f64 {
        let sum = self.resultant_position(position.pos);
        if sum == position.pos {
            math::distance(position.previous, position.pos)
        } else {
            math::distance(position.pos, sum)
        }
    }

    /// Compass direction of the current step, with the same fallback rule
    /// as [`Motion::speed`].
    pub fn direction(&self, position: &MapPosition) -> f64 {
        let sum = self.resultant_position(position.pos);
        if sum == position.pos {
            math::direction_between(position.previous, position.pos)
        } else {
            math::direction_between(position.pos, sum)
        }
    }

    /// Horizontal component of the current step's displacement.
    pub fn hspeed(&self, position: &MapPosition) -> f64 {
        let sum = self.resultant_position(position.pos);
        if sum == position.pos {
            position.pos.x - position.previous.x
        } else {
            sum.x - position.pos.x
        }
    }

    /// Vertical component of the current step's displacement.
    pub fn vspeed(&self, position: &MapPosition) -> f64 {
        let sum = self.resultant_position(position.pos);
        if sum == position.pos {
            position.pos.y - position.previous.y
        } else {
            sum.y - position.pos.y
        }
    }

    pub fn set_friction(&mut self, friction: f64) {
        self.friction = friction;
    }

    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: f64) {
        self.gravity = gravity;
    }

    pub fn gravity_direction(&self) -> f64 {
        self.gravity_direction
    }

    pub fn set_gravity_direction(&mut self, direction: f64) {
        self.gravity_direction = direction;
    }

    pub fn gravity_acceleration(&self) -> f64 {
        self.gravity_base
    }

    /// Set the base of the gravity ramp. 1.0 disables the ramp.
    pub fn set_gravity_acceleration(&mut self, base: f64) {
        self.gravity_base = base;
    }

    /// Current ramp exponent, in `[0, 10]`.
    pub fn gravity_exponent(&self) -> f64 {
        (f64::from(self.gravity_steps) * GRAVITY_RAMP_STEP).min(GRAVITY_EXPONENT_CAP)
    }

    /// Restart the gravity ramp from exponent 0.
    pub fn reset_gravity_acceleration(&mut self) {
        self.gravity_steps = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    // ==================== POLAR MOVE TESTS ====================

    #[test]
    fn negative_magnitude_flips_direction() {
        let mv = PolarMove::new(-5.0, 90.0);
        assert!(approx_eq(mv.magnitude, 5.0));
        assert!(approx_eq(mv.direction, 270.0));
    }

    #[test]
    fn direction_normalized_into_range() {
        let mv = PolarMove::new(3.0, -45.0);
        assert!(approx_eq(mv.direction, 315.0));
        let mv = PolarMove::new(3.0, 720.0);
        assert!(approx_eq(mv.direction, 0.0));
    }

    #[test]
    fn flipped_move_projects_to_same_offset() {
        let a = PolarMove::new(-5.0, 90.0).offset();
        let b = PolarMove::new(5.0, 270.0).offset();
        assert!(approx_eq(a.x, b.x));
        assert!(approx_eq(a.y, b.y));
    }

    // ==================== RESULTANT POSITION TESTS ====================

    #[test]
    fn resultant_sums_pending_moves() {
        let mut motion = Motion::new();
        motion.add_move(3.0, 90.0);
        motion.add_move(4.0, 180.0);
        let sum = motion.resultant_position(Vec2::new(10.0, 10.0));
        assert!(approx_eq(sum.x, 13.0));
        assert!(approx_eq(sum.y, 14.0));
    }

    #[test]
    fn resultant_does_not_mutate_state() {
        let mut motion = Motion::new();
        motion.add_move(5.0, 90.0);
        let first = motion.resultant_position(Vec2::ZERO);
        let second = motion.resultant_position(Vec2::ZERO);
        assert_eq!(first, second);
        assert_eq!(motion.pending.len(), 1);
    }

    #[test]
    fn friction_opposes_net_travel() {
        let mut motion = Motion::new();
        motion.friction = 2.0;
        motion.add_move(10.0, 90.0);
        let sum = motion.resultant_position(Vec2::ZERO);
        assert!(approx_eq(sum.x, 8.0));
        assert!(approx_eq(sum.y, 0.0));
    }

    #[test]
    fn friction_clamps_at_step_start() {
        let mut motion = Motion::new();
        motion.friction = 50.0;
        motion.add_move(10.0, 90.0);
        let start = Vec2::new(3.0, 7.0);
        let sum = motion.resultant_position(start);
        assert_eq!(sum, start);
    }

    #[test]
    fn friction_without_moves_is_noop() {
        let mut motion = Motion::new();
        motion.friction = 5.0;
        let start = Vec2::new(1.0, 2.0);
        assert_eq!(motion.resultant_position(start), start);
    }

    // ==================== GRAVITY TESTS ====================

    #[test]
    fn gravity_queues_a_pending_move() {
        let mut motion = Motion::new();
        motion.set_gravity(2.0);
        motion.apply_gravity();
        assert_eq!(motion.pending.len(), 1);
        let sum = motion.resultant_position(Vec2::ZERO);
        assert!(approx_eq(sum.x, 0.0));
        assert!(approx_eq(sum.y, 2.0)); // default direction is straight down
    }

    #[test]
    fn zero_gravity_queues_nothing() {
        let mut motion = Motion::new();
        motion.apply_gravity();
        assert!(motion.pending.is_empty());
        assert!(approx_eq(motion.gravity_exponent(), 0.0));
    }

    #[test]
    fn gravity_ramp_grows_magnitude() {
        let mut motion = Motion::new();
        motion.set_gravity(1.0);
        motion.set_gravity_acceleration(2.0);
        motion.apply_gravity(); // exponent 0 -> magnitude 1
        motion.apply_gravity(); // exponent 0.01 -> magnitude 2^0.01
        assert!(approx_eq(motion.pending[0].magnitude, 1.0));
        assert!(approx_eq(motion.pending[1].magnitude, 2f64.powf(0.01)));
    }

    #[test]
    fn gravity_exponent_caps_at_exactly_ten() {
        let mut motion = Motion::new();
        motion.set_gravity(1.0);
        for _ in 0..1000 {
            motion.apply_gravity();
        }
        assert_eq!(motion.gravity_exponent(), 10.0);
        for _ in 0..500 {
            motion.apply_gravity();
        }
        assert_eq!(motion.gravity_exponent(), 10.0);
    }

    #[test]
    fn gravity_ramp_resets() {
        let mut motion = Motion::new();
        motion.set_gravity(1.0);
        for _ in 0..10 {
            motion.apply_gravity();
        }
        assert!(motion.gravity_exponent() > 0.0);
        motion.reset_gravity_acceleration();
        assert!(approx_eq(motion.gravity_exponent(), 0.0));
    }

    // ==================== COMMIT / DERIVED SPEED TESTS ====================

    #[test]
    fn commit_rotates_positions_and_moves() {
        let mut motion = Motion::new();
        let mut position = MapPosition::new(0.0, 0.0);
        motion.add_move(5.0, 90.0);
        let target = motion.resultant_position(position.pos);
        motion.commit_step(&mut position, target);

        assert!(approx_eq(position.pos.x, 5.0));
        assert_eq!(position.previous, Vec2::ZERO);
        assert_eq!(position.start, Vec2::ZERO);
        assert!(motion.pending.is_empty());
        assert_eq!(motion.previous_step.len(), 1);
    }

    #[test]
    fn speed_reads_pending_moves() {
        let mut motion = Motion::new();
        let position = MapPosition::new(0.0, 0.0);
        motion.add_move(3.0, 90.0);
        motion.add_move(4.0, 180.0);
        assert!(approx_eq(motion.speed(&position), 5.0));
    }

    #[test]
    fn speed_falls_back_to_previous_delta() {
        let mut motion = Motion::new();
        let mut position = MapPosition::new(0.0, 0.0);
        motion.add_move(5.0, 90.0);
        let target = motion.resultant_position(position.pos);
        motion.commit_step(&mut position, target);
        // No pending moves: the resultant equals the position, so speed and
        // direction come from the previous -> current delta.
        assert!(approx_eq(motion.speed(&position), 5.0));
        assert!(approx_eq(motion.direction(&position), 90.0));
    }

    #[test]
    fn per_axis_speeds_split_the_step() {
        let mut motion = Motion::new();
        let position = MapPosition::new(0.0, 0.0);
        motion.add_move(3.0, 90.0);
        motion.add_move(4.0, 180.0);
        assert!(approx_eq(motion.hspeed(&position), 3.0));
        assert!(approx_eq(motion.vspeed(&position), 4.0));
    }

    // ==================== DIRECTED MOVE HELPERS ====================

    #[test]
    fn move_toward_queues_direction_to_target() {
        let mut motion = Motion::new();
        assert!(motion.move_toward(2.0, Vec2::ZERO, Vec2::new(10.0, 0.0)));
        assert!(approx_eq(motion.pending[0].direction, 90.0));
    }

    #[test]
    fn move_toward_within_reach_is_reported() {
        let mut motion = Motion::new();
        assert!(!motion.move_toward(20.0, Vec2::ZERO, Vec2::new(10.0, 0.0)));
        assert!(motion.pending.is_empty());
    }

    #[test]
    fn move_away_queues_opposite_direction() {
        let mut motion = Motion::new();
        motion.move_away(2.0, Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert!(approx_eq(motion.pending[0].direction, 270.0));
    }
}
