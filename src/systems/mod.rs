//! Simulation systems.
//!
//! This module groups the ECS systems and free-function queries that advance
//! the simulation.
//!
//! Submodules overview
//! - [`collision`] – mask intersection, placement queries, and collision events
//! - [`debugdraw`] – emit mask/path overlays over the debug-draw bridge
//! - [`motion`] – integrate pending moves and resolve blocked positions
//! - [`moveavoid`] – iterative back-off correction for obstructed moves
//! - [`path`] – advance path followers and resolve end-of-path actions
//! - [`time`] – advance the simulation tick counter

pub mod collision;
pub mod debugdraw;
pub mod motion;
pub mod moveavoid;
pub mod path;
pub mod time;
