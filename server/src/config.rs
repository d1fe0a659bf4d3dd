use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

/// Host configuration. Every field defaults, so running without a config
/// file works.
#[derive(Debug, Clone, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct Config {
    /// Simulation ticks per second.
    pub tick_hz: f64,
    /// Seed for the turbulence RNG; a fixed seed reproduces a storm.
    pub rng_seed: u64,
    /// Cap applied to every character's level counter.
    pub level_cap: u32,
    /// Flight-state autosave cadence in ticks; zero disables autosave.
    pub autosave_ticks: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_hz: 20.0,
            rng_seed: 7,
            level_cap: 30,
            autosave_ticks: 1200,
        }
    }
}

pub fn load_config(path: &Option<PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let cfg = toml::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?;
            Ok(cfg)
        }
        None => Ok(Config::default()),
    }
}
