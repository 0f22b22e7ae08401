//! Axis-aligned collision detection
//!
//! Pure predicates only; the simulation step decides what a hit means.
//! Overlap uses strict inequalities on all four axes, so rectangles that
//! merely share an edge do not collide.

use super::state::Obstacle;
use crate::config::Config;

/// An axis-aligned rectangle, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// True iff the two rectangles overlap with positive area.
///
/// Half-open convention: touching edges are not a collision.
#[inline]
pub fn overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Ground strip as a rectangle, from the floor line to the bottom edge.
pub fn ground_rect(cfg: &Config) -> Rect {
    Rect::new(0.0, cfg.floor_y(), cfg.width, cfg.ground_height)
}

/// Flyer hitbox against the ground strip.
pub fn collides_ground(hitbox: &Rect, cfg: &Config) -> bool {
    overlap(hitbox, &ground_rect(cfg))
}

/// Flyer hitbox against either solid segment of an obstacle.
pub fn collides_obstacle(hitbox: &Rect, obstacle: &Obstacle, cfg: &Config) -> bool {
    obstacle.segments(cfg).iter().any(|seg| overlap(hitbox, seg))
}
