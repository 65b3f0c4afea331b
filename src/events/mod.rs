//! Event types and observers used by the simulation.
//!
//! This module groups the domain events exchanged across systems and the
//! corresponding observers that react to them. Events provide a decoupled
//! way for systems to communicate without direct dependencies.
//!
//! Submodules:
//! - [`collision`] – collision notifications emitted by the collision system
//! - [`path`] – end-of-path notifications emitted by the path system

pub mod collision;
pub mod path;
