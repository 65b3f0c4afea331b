//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: spatial bounds, entity-type
//! descriptors, shared path data, configuration, and debug utilities.
//!
//! Overview
//! - `debugdraw` – channel bridge for fire-and-forget overlay draw commands
//! - `debugmode` – presence toggles optional debug overlays and logs
//! - `objectregistry` – per-kind solid flag, eligibility filter, mask template
//! - `pathstore` – named waypoint paths shared across followers
//! - `room` – active spatial container bounds
//! - `simconfig` – INI-backed simulation settings
//! - `worldtick` – committed simulation tick counter

pub mod debugdraw;
pub mod debugmode;
pub mod objectregistry;
pub mod pathstore;
pub mod room;
pub mod simconfig;
pub mod worldtick;
