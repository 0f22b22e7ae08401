//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Driven only by normalized per-frame dt and discrete input edges
//! - Seeded RNG only (gap placement)
//! - No rendering, audio, or platform dependencies; side effects are
//!   reported as events for the loop driver to dispatch

pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, collides_ground, collides_obstacle, ground_rect, overlap};
pub use spawner::Spawner;
pub use state::{Flyer, GameEvent, GamePhase, GameState, Obstacle};
pub use tick::{Activation, handle_activate, handle_restart, step};
