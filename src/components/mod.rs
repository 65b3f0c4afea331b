//! ECS components for entities.
//!
//! This module groups the component types that can be attached to movable
//! and collidable entities in the simulation world.
//!
//! Submodules overview:
//! - [`collisionmask`] – positioned polygon outline (or bounding box) for collision tests
//! - [`mapposition`] – world-space position with previous/start history and placement ops
//! - [`motion`] – polar move accumulator with friction and ramping gravity
//! - [`objectkind`] – tag naming the entity's type in the object registry
//! - [`pathfollow`] – waypoint traversal state with end-of-path policies

pub mod collisionmask;
pub mod mapposition;
pub mod motion;
pub mod objectkind;
pub mod pathfollow;
