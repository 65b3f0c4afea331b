//! Maskmotion library.
//!
//! A per-entity motion, collision-mask, and path-following engine for
//! step-based 2D simulations, built on bevy_ecs. Each simulation tick
//! resolves every entity's queued polar moves (with friction and ramping
//! gravity) into a candidate position, tests that position's polygon mask
//! against the other entities in scope, corrects blocked moves with an
//! iterative back-off, and advances waypoint paths.
//!
//! This module exposes the components, resources, systems, and events for
//! use in integration tests and as a reusable library.

pub mod components;
pub mod events;
pub mod math;
pub mod resources;
pub mod systems;
