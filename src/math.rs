//! Scalar and vector math helpers shared by the motion and collision code.
//!
//! Angles are expressed in degrees with a compass convention: 0° points up
//! (negative y), and angles grow clockwise. [`polar_offset`] projects a
//! (magnitude, direction) pair into a Cartesian displacement and
//! [`direction_between`] is its exact inverse, so a displacement projected
//! from an angle reports that same angle back.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// 2D coordinate pair in world units. No invariants beyond finiteness;
/// NaN inputs propagate through every operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Axis-aligned rectangle in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// AABB overlap test. Touching edges count as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x <= other.x + other.w
            && other.x <= self.x + self.w
            && self.y <= other.y + other.h
            && other.y <= self.y + self.h
    }
}

pub fn deg_to_rad(a: f64) -> f64 {
    a * std::f64::consts::PI / 180.0
}

pub fn rad_to_deg(a: f64) -> f64 {
    a * 180.0 / std::f64::consts::PI
}

/// Normalize an angle into `[0, 360)`.
pub fn absolute_angle(a: f64) -> f64 {
    let a = a % 360.0;
    if a < 0.0 { a + 360.0 } else { a }
}

/// The angle 180° across the unit circle, normalized into `[0, 360)`.
pub fn opposite_angle(a: f64) -> f64 {
    let a = absolute_angle(a);
    if a < 180.0 { a + 180.0 } else { a - 180.0 }
}

/// Project a polar displacement into Cartesian coordinates.
/// 0° points up (negative y) and angles grow clockwise.
pub fn polar_offset(magnitude: f64, direction: f64) -> Vec2 {
    let r = deg_to_rad(direction);
    Vec2::new(r.sin() * magnitude, -r.cos() * magnitude)
}

/// Compass direction from `a` to `b`, in `[0, 360)`.
///
/// Exact inverse of [`polar_offset`]:
/// `polar_offset(1.0, direction_between(a, b))` is the unit vector from `a`
/// toward `b`.
pub fn direction_between(a: Vec2, b: Vec2) -> f64 {
    absolute_angle(rad_to_deg((b.x - a.x).atan2(-(b.y - a.y))))
}

pub fn dist_sqr(a: Vec2, b: Vec2) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

pub fn distance(a: Vec2, b: Vec2) -> f64 {
    dist_sqr(a, b).sqrt()
}

/// Move `from` toward `to` by `amount`, landing exactly on `to` when the
/// remaining distance is not larger than `amount`.
pub fn approach(from: Vec2, to: Vec2, amount: f64) -> Vec2 {
    let d = distance(from, to);
    if d <= amount {
        return to;
    }
    let ratio = amount / d;
    Vec2::new(from.x + (to.x - from.x) * ratio, from.y + (to.y - from.y) * ratio)
}

/// -1, 0, or 1 depending on the sign of `x`.
pub fn sign(x: f64) -> i32 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// Whether `x` lies between or on the given bounds, in either order.
pub fn is_between(x: f64, a: f64, b: f64) -> bool {
    x >= a.min(b) && x <= a.max(b)
}

/// Whether an angle lies inside the arc from `a` to `b` (clockwise),
/// including arcs that cross 0°.
pub fn is_angle_between(x: f64, a: f64, b: f64) -> bool {
    let x = absolute_angle(x);
    if a < b {
        is_between(x, a, b)
    } else {
        is_between(x, a, 360.0) || is_between(x, 0.0, b)
    }
}

/// Clamp `x` into the given bounds, in either order.
pub fn fit_bounds(x: f64, a: f64, b: f64) -> f64 {
    x.max(a.min(b)).min(a.max(b))
}

fn orientation(o: Vec2, a: Vec2, p: Vec2) -> f64 {
    (a.x - o.x) * (p.y - o.y) - (a.y - o.y) * (p.x - o.x)
}

fn on_span(a: Vec2, b: Vec2, p: Vec2) -> bool {
    is_between(p.x, a.x, b.x) && is_between(p.y, a.y, b.y)
}

/// Line-segment intersection between `a1→a2` and `b1→b2`.
///
/// Collinear overlaps and segments that share only an endpoint both count
/// as intersecting.
pub fn segments_intersect(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    let d1 = orientation(b1, b2, a1);
    let d2 = orientation(b1, b2, a2);
    let d3 = orientation(a1, a2, b1);
    let d4 = orientation(a1, a2, b2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_span(b1, b2, a1))
        || (d2 == 0.0 && on_span(b1, b2, a2))
        || (d3 == 0.0 && on_span(a1, a2, b1))
        || (d4 == 0.0 && on_span(a1, a2, b2))
}
