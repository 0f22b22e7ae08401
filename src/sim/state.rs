//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::spawner::Spawner;
use crate::config::Config;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Flyer at rest, no obstacles, waiting for the first input
    Idle,
    /// Simulation advances every frame
    Running,
    /// Frozen after a collision; entities keep their last values for display
    GameOver,
}

/// Events a simulation step reports outward.
///
/// The core never calls into rendering, audio, or persistence; the loop
/// driver reacts to these after the step returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// An obstacle was passed; carries the new score
    Scored(u32),
    /// The flyer hit the ground or an obstacle; the run is over
    Collided,
    /// The finished run beat the stored best score
    NewBest(u32),
}

/// The player-controlled entity.
///
/// x never changes during flight; obstacles move instead, so the world
/// scrolls in the flyer's reference frame.
#[derive(Debug, Clone)]
pub struct Flyer {
    pub pos: Vec2,
    /// Vertical velocity, positive = downward
    pub vel: f32,
    /// Visual tilt in radians, derived from velocity, no physical effect
    pub rotation: f32,
    /// Cosmetic flap countdown, decremented once per step
    pub flap_frames: u32,
}

impl Flyer {
    pub fn new(cfg: &Config) -> Self {
        // Slightly below the vertical center of the open sky, as the
        // original placed it.
        let start_y = cfg.floor_y() / 2.0 - cfg.flyer_height / 2.0 + 30.0;
        Self {
            pos: Vec2::new(cfg.flyer_start_x, start_y),
            vel: 0.0,
            rotation: 0.0,
            flap_frames: 0,
        }
    }

    /// Semi-implicit Euler: velocity first, then position from the new
    /// velocity. Velocity is in pixels per nominal frame, so the position
    /// update takes no dt factor.
    pub fn apply_gravity(&mut self, cfg: &Config, dt: f32) {
        self.vel += cfg.gravity * dt;
        self.pos.y += self.vel;
        self.update_rotation();
    }

    /// Hard velocity override, unconditional. Also re-arms the cosmetic
    /// flap countdown; the countdown never blocks another jump.
    pub fn jump(&mut self, cfg: &Config) {
        self.vel = cfg.jump_force;
        self.flap_frames = cfg.flap_frames;
        self.update_rotation();
    }

    pub fn tick_flap(&mut self) {
        self.flap_frames = self.flap_frames.saturating_sub(1);
    }

    pub fn is_flapping(&self) -> bool {
        self.flap_frames > 0
    }

    /// Forgiving hitbox: inset from the visual rectangle on all sides.
    pub fn bounds(&self, cfg: &Config) -> Rect {
        Rect::new(
            self.pos.x + cfg.hitbox_inset,
            self.pos.y + cfg.hitbox_inset,
            cfg.flyer_width - 2.0 * cfg.hitbox_inset,
            cfg.flyer_height - 2.0 * cfg.hitbox_inset,
        )
    }

    fn update_rotation(&mut self) {
        self.rotation = if self.vel < 0.0 {
            (self.vel * 0.1).max(-0.3)
        } else {
            (self.vel * 0.05).min(0.5)
        };
    }
}

/// A paired top/bottom solid column with a vertical gap.
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Left edge; decreases monotonically while alive
    pub x: f32,
    /// Top of the gap, fixed at spawn
    pub gap_y: f32,
    passed: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_y: f32) -> Self {
        Self {
            x,
            gap_y,
            passed: false,
        }
    }

    pub fn update(&mut self, cfg: &Config, dt: f32) {
        self.x -= cfg.obstacle_speed * dt;
    }

    /// The two solid rectangles: top spans `[0, gap_y]`, bottom spans
    /// `[gap_y + gap_height, floor_y]`. The single canonical definition;
    /// collision and rendering both use it.
    pub fn segments(&self, cfg: &Config) -> [Rect; 2] {
        let bottom_y = self.gap_y + cfg.gap_height;
        [
            Rect::new(self.x, 0.0, cfg.obstacle_width, self.gap_y),
            Rect::new(self.x, bottom_y, cfg.obstacle_width, cfg.floor_y() - bottom_y),
        ]
    }

    pub fn is_passed(&self) -> bool {
        self.passed
    }

    /// Flip the passed flag the first time the trailing edge falls behind
    /// the flyer. Returns true exactly once per obstacle.
    pub fn try_pass(&mut self, flyer_x: f32, cfg: &Config) -> bool {
        if !self.passed && self.x + cfg.obstacle_width < flyer_x {
            self.passed = true;
            true
        } else {
            false
        }
    }

    pub fn is_offscreen(&self, cfg: &Config) -> bool {
        self.x + cfg.obstacle_width < 0.0
    }
}

/// Complete simulation state, owned by the loop driver's call path.
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub flyer: Flyer,
    /// Spawn order, which is also left-to-right order since speed is uniform
    pub obstacles: Vec<Obstacle>,
    pub spawner: Spawner,
    pub score: u32,
    /// Best score across runs; loaded at init, updated at game-over
    pub best: u32,
    /// Simulation time in nominal frames since the last reset
    pub clock: f32,
    /// Gap placement RNG; seeded from entropy in production, fixed in tests
    pub rng: Pcg32,
}

impl GameState {
    pub fn new(cfg: &Config, seed: u64, best: u32) -> Self {
        Self {
            phase: GamePhase::Idle,
            flyer: Flyer::new(cfg),
            obstacles: Vec::new(),
            spawner: Spawner::new(cfg),
            score: 0,
            best,
            clock: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Reinitialize all entities for a fresh run. Best score and the RNG
    /// stream carry over.
    pub fn reset(&mut self, cfg: &Config) {
        self.phase = GamePhase::Idle;
        self.flyer = Flyer::new(cfg);
        self.obstacles.clear();
        self.spawner = Spawner::new(cfg);
        self.score = 0;
        self.clock = 0.0;
    }
}
