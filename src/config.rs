//! Game configuration
//!
//! All tunables live in one immutable struct that is passed explicitly into
//! every simulation function, so tests can vary constants per case.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Nominal frame duration the simulation is normalized to (60 Hz).
/// A step with `dt = 1.0` advances the world by exactly one nominal frame.
pub const NOMINAL_FRAME_MS: f32 = 1000.0 / 60.0;

/// Immutable game configuration.
///
/// Units: positions and sizes are playfield pixels, velocities are pixels per
/// nominal frame, accelerations are pixels per nominal frame squared, and
/// intervals are counted in nominal frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Playfield width
    pub width: f32,
    /// Playfield height (including the ground strip)
    pub height: f32,
    /// Height of the solid ground strip at the bottom
    pub ground_height: f32,

    /// Downward acceleration applied to the flyer each step
    pub gravity: f32,
    /// Velocity the flyer is set to on jump (negative = upward)
    pub jump_force: f32,

    /// Leftward obstacle speed
    pub obstacle_speed: f32,
    /// Frames between obstacle spawns (1.5 s at 60 Hz)
    pub spawn_interval: f32,
    /// Obstacle column width
    pub obstacle_width: f32,
    /// Vertical size of the gap between an obstacle's two segments
    pub gap_height: f32,
    /// Minimum distance between the gap and the top of the playfield or the
    /// ground; bounds the random gap placement
    pub min_gap_y: f32,

    /// Flyer visual width
    pub flyer_width: f32,
    /// Flyer visual height
    pub flyer_height: f32,
    /// Fixed horizontal flyer position
    pub flyer_start_x: f32,
    /// Hitbox inset from the visual rectangle, on every side
    pub hitbox_inset: f32,
    /// Frames the cosmetic flap flag stays set after a jump (~200 ms)
    pub flap_frames: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 360.0,
            height: 640.0,
            ground_height: 80.0,
            gravity: 0.5,
            jump_force: -10.0,
            obstacle_speed: 2.0,
            spawn_interval: 90.0,
            obstacle_width: 68.0,
            gap_height: 150.0,
            min_gap_y: 100.0,
            flyer_width: 34.0,
            flyer_height: 24.0,
            flyer_start_x: 80.0,
            hitbox_inset: 2.0,
            flap_frames: 12,
        }
    }
}

impl Config {
    /// Top of the ground strip; the flyer dies here, obstacles end here.
    pub fn floor_y(&self) -> f32 {
        self.height - self.ground_height
    }

    /// Inclusive bounds for random gap placement: `[min_gap_y, max_gap_y]`.
    pub fn gap_y_range(&self) -> (f32, f32) {
        (
            self.min_gap_y,
            self.floor_y() - self.gap_height - self.min_gap_y,
        )
    }

    /// Check the configuration for degenerate geometry.
    ///
    /// An impossible gap or a non-positive dimension would otherwise produce
    /// obstacles with negative-height segments or an inverted random range,
    /// so this must be called once at startup and treated as fatal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("ground_height", self.ground_height),
            ("gravity", self.gravity),
            ("obstacle_speed", self.obstacle_speed),
            ("spawn_interval", self.spawn_interval),
            ("obstacle_width", self.obstacle_width),
            ("gap_height", self.gap_height),
            ("min_gap_y", self.min_gap_y),
            ("flyer_width", self.flyer_width),
            ("flyer_height", self.flyer_height),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if self.jump_force >= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "upward jump_force",
                value: -self.jump_force,
            });
        }
        if !(self.hitbox_inset > 0.0)
            || self.hitbox_inset * 2.0 >= self.flyer_width.min(self.flyer_height)
        {
            return Err(ConfigError::BadInset {
                inset: self.hitbox_inset,
            });
        }
        let (min_gap_y, max_gap_y) = self.gap_y_range();
        if max_gap_y < min_gap_y {
            return Err(ConfigError::GapTooTall {
                gap_height: self.gap_height,
                min_gap_y: self.min_gap_y,
                floor_y: self.floor_y(),
            });
        }
        Ok(())
    }
}

/// Degenerate configuration detected at startup.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A dimension, speed, or interval that must be positive is not
    NonPositive { name: &'static str, value: f32 },
    /// Hitbox inset missing or at least half the flyer size
    BadInset { inset: f32 },
    /// The gap plus both margins does not fit above the ground
    GapTooTall {
        gap_height: f32,
        min_gap_y: f32,
        floor_y: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive { name, value } => {
                write!(f, "{name} must be positive, got {value}")
            }
            ConfigError::BadInset { inset } => {
                write!(f, "hitbox_inset {inset} must be > 0 and smaller than half the flyer")
            }
            ConfigError::GapTooTall {
                gap_height,
                min_gap_y,
                floor_y,
            } => write!(
                f,
                "gap_height {gap_height} with margin {min_gap_y} on both sides \
                 does not fit above the ground at y={floor_y}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
