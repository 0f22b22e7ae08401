//! Skyflap - a terminal Flappy Bird style arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, state machine)
//! - `config`: Immutable game configuration with startup validation
//! - `render`: Terminal cell renderer
//! - `audio`: Procedural sound effects
//! - `bestscore`: Persisted best score

pub mod audio;
pub mod bestscore;
pub mod config;
pub mod render;
pub mod sim;

pub use config::{Config, ConfigError, NOMINAL_FRAME_MS};
