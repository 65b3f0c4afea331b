//! Path resources shared across entities.
//!
//! A [`Path`] is an ordered waypoint list with a per-node speed factor;
//! node coordinates are relative to whatever origin a follower anchors them
//! to. Paths live in the [`PathStore`] resource keyed by name, so many
//! followers can traverse one path. Edit paths only while no follower is
//! running them.
//!
//! # Path File Format
//!
//! ```json
//! {
//!     "patrol": [
//!         { "x": 0.0, "y": 0.0, "speed": 1.0 },
//!         { "x": 200.0, "y": 0.0, "speed": 1.0 }
//!     ]
//! }
//! ```

use bevy_ecs::prelude::Resource;
use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// One waypoint: relative coordinates plus a speed factor applied to the
/// follower's speed while this node is the target.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathNode {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
}

/// Ordered waypoint sequence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    nodes: Vec<PathNode>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, x: f64, y: f64, speed: f64) {
        self.nodes.push(PathNode { x, y, speed });
    }

    /// Remove the final waypoint. Returns `false` when the path is empty.
    pub fn remove_last_node(&mut self) -> bool {
        self.nodes.pop().is_some()
    }

    /// Remove the waypoint at `index`. Returns `false` when out of range.
    pub fn remove_node(&mut self, index: usize) -> bool {
        if index < self.nodes.len() {
            self.nodes.remove(index);
            true
        } else {
            false
        }
    }

    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&PathNode> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Named paths available to followers.
#[derive(Resource, Clone, Debug, Default)]
pub struct PathStore {
    paths: FxHashMap<String, Path>,
}

impl PathStore {
    pub fn insert(&mut self, name: impl Into<String>, path: Path) {
        self.paths.insert(name.into(), path);
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.paths.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Path> {
        self.paths.remove(name)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Load paths from a JSON file, merging them into the store.
    ///
    /// Returns the number of paths loaded, or an error if the file cannot
    /// be read or parsed. Existing entries with the same name are replaced.
    pub fn load_from_file(&mut self, file: impl AsRef<std::path::Path>) -> Result<usize, String> {
        let file = file.as_ref();
        let text = std::fs::read_to_string(file)
            .map_err(|e| format!("Failed to read path file {:?}: {}", file, e))?;
        let parsed: FxHashMap<String, Vec<PathNode>> = serde_json::from_str(&text)
            .map_err(|e| format!("Failed to parse path file {:?}: {}", file, e))?;

        let count = parsed.len();
        for (name, nodes) in parsed {
            self.paths.insert(name, Path { nodes });
        }

        info!("Loaded {} path(s) from {:?}", count, file);

        Ok(count)
    }
}
