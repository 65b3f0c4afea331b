//! Simulation configuration resource.
//!
//! Manages simulation settings loaded from an INI configuration file.
//! Provides defaults for safe startup and methods to load/save the
//! configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [room]
//! width = 640
//! height = 360
//!
//! [sim]
//! ticks = 600
//! seed = 1
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_ROOM_WIDTH: u32 = 640;
const DEFAULT_ROOM_HEIGHT: u32 = 360;
const DEFAULT_TICKS: u32 = 600;
const DEFAULT_SEED: u64 = 1;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Simulation configuration resource.
///
/// Stores room dimensions and run settings for the headless driver. Missing
/// values in the configuration file retain their defaults.
#[derive(Resource, Debug, Clone)]
pub struct SimConfig {
    /// Room width in world units.
    pub room_width: u32,
    /// Room height in world units.
    pub room_height: u32,
    /// Number of simulation ticks to run.
    pub ticks: u32,
    /// Seed for random placement.
    pub seed: u64,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            room_width: DEFAULT_ROOM_WIDTH,
            room_height: DEFAULT_ROOM_HEIGHT,
            ticks: DEFAULT_TICKS,
            seed: DEFAULT_SEED,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [room] section
        if let Some(width) = config.getuint("room", "width").ok().flatten() {
            self.room_width = width as u32;
        }
        if let Some(height) = config.getuint("room", "height").ok().flatten() {
            self.room_height = height as u32;
        }

        // [sim] section
        if let Some(ticks) = config.getuint("sim", "ticks").ok().flatten() {
            self.ticks = ticks as u32;
        }
        if let Some(seed) = config.getuint("sim", "seed").ok().flatten() {
            self.seed = seed;
        }

        info!(
            "Loaded config: {}x{} room, {} ticks, seed={}",
            self.room_width, self.room_height, self.ticks, self.seed
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    #[allow(dead_code)]
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [room] section
        config.set("room", "width", Some(self.room_width.to_string()));
        config.set("room", "height", Some(self.room_height.to_string()));

        // [sim] section
        config.set("sim", "ticks", Some(self.ticks.to_string()));
        config.set("sim", "seed", Some(self.seed.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the room size.
    pub fn room_size(&self) -> (u32, u32) {
        (self.room_width, self.room_height)
    }
}
