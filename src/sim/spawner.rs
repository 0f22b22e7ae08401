//! Obstacle spawning and recycling
//!
//! The spawner owns the cadence, not the pool: obstacles live in
//! `GameState::obstacles` so the rest of the simulation can see them.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Obstacle;
use crate::config::Config;

/// Edge-triggered obstacle spawner.
///
/// Spawning happens when the clock crosses `last_spawn + spawn_interval`,
/// and the timestamp is then re-baselined to now. A stalled frame with a
/// huge dt therefore produces exactly one obstacle, after which the normal
/// cadence resumes; missed ticks are never replayed.
#[derive(Debug, Clone)]
pub struct Spawner {
    last_spawn: f32,
}

impl Spawner {
    /// Seed the timestamp one interval in the past so the first obstacle
    /// appears on the first running step.
    pub fn new(cfg: &Config) -> Self {
        Self {
            last_spawn: -cfg.spawn_interval,
        }
    }

    /// Advance the pool by one step: move every obstacle left, spawn at most
    /// one new obstacle at the right edge, drop the fully off-screen ones.
    /// Relative order of survivors is preserved.
    pub fn advance(
        &mut self,
        clock: f32,
        cfg: &Config,
        rng: &mut Pcg32,
        obstacles: &mut Vec<Obstacle>,
        dt: f32,
    ) {
        for obstacle in obstacles.iter_mut() {
            obstacle.update(cfg, dt);
        }

        if clock - self.last_spawn >= cfg.spawn_interval {
            let (min_gap_y, max_gap_y) = cfg.gap_y_range();
            // Config validation guarantees a non-inverted range; the guard
            // keeps a zero-width range from panicking the RNG.
            let gap_y = if max_gap_y > min_gap_y {
                rng.random_range(min_gap_y..max_gap_y)
            } else {
                min_gap_y
            };
            obstacles.push(Obstacle::new(cfg.width, gap_y));
            self.last_spawn = clock;
            log::debug!("spawned obstacle, gap_y={gap_y:.1}, clock={clock:.1}");
        }

        obstacles.retain(|o| !o.is_offscreen(cfg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn first_obstacle_spawns_immediately() {
        let cfg = Config::default();
        let mut spawner = Spawner::new(&cfg);
        let mut obstacles = Vec::new();
        spawner.advance(0.0, &cfg, &mut rng(), &mut obstacles, 1.0);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].x, cfg.width);
    }

    #[test]
    fn at_most_one_spawn_per_interval() {
        let cfg = Config::default();
        let mut spawner = Spawner::new(&cfg);
        let mut obstacles = Vec::new();
        let mut r = rng();
        let mut clock = 0.0;
        // Immediate spawn on the first step, then nothing for a full interval.
        for _ in 0..(cfg.spawn_interval as usize) {
            clock += 1.0;
            spawner.advance(clock, &cfg, &mut r, &mut obstacles, 0.0);
        }
        assert_eq!(obstacles.len(), 1);
        clock += 1.0;
        spawner.advance(clock, &cfg, &mut r, &mut obstacles, 0.0);
        assert_eq!(obstacles.len(), 2);
    }

    #[test]
    fn stalled_frame_spawns_exactly_one_and_rebaselines() {
        let cfg = Config::default();
        let mut spawner = Spawner::new(&cfg);
        let mut obstacles = Vec::new();
        let mut r = rng();
        // dt 0 keeps obstacles in place; this test is about cadence only.
        spawner.advance(0.0, &cfg, &mut r, &mut obstacles, 0.0);
        assert_eq!(obstacles.len(), 1);

        // A clock jump spanning three spawn intervals yields one obstacle.
        let stall = cfg.spawn_interval * 3.4;
        spawner.advance(stall, &cfg, &mut r, &mut obstacles, 0.0);
        assert_eq!(obstacles.len(), 2);

        // Cadence resumes from the stall time, not from the missed ticks.
        spawner.advance(stall + 1.0, &cfg, &mut r, &mut obstacles, 0.0);
        assert_eq!(obstacles.len(), 2);
        spawner.advance(stall + cfg.spawn_interval, &cfg, &mut r, &mut obstacles, 0.0);
        assert_eq!(obstacles.len(), 3);
    }

    #[test]
    fn gap_positions_stay_within_bounds() {
        let cfg = Config::default();
        let mut spawner = Spawner::new(&cfg);
        let mut obstacles = Vec::new();
        let mut r = rng();
        let (lo, hi) = cfg.gap_y_range();
        let mut clock = 0.0;
        for _ in 0..50 {
            clock += cfg.spawn_interval;
            spawner.advance(clock, &cfg, &mut r, &mut obstacles, 0.0);
        }
        assert!(!obstacles.is_empty());
        for o in &obstacles {
            assert!(o.gap_y >= lo && o.gap_y <= hi, "gap_y {} out of range", o.gap_y);
        }
    }

    #[test]
    fn degenerate_range_clamps_to_min() {
        // gap_height exactly fills the playfield minus both margins, so the
        // random range collapses to a single legal value.
        let cfg = Config {
            gap_height: 360.0,
            ..Config::default()
        };
        cfg.validate().unwrap();
        let mut spawner = Spawner::new(&cfg);
        let mut obstacles = Vec::new();
        spawner.advance(0.0, &cfg, &mut rng(), &mut obstacles, 0.0);
        assert_eq!(obstacles[0].gap_y, cfg.min_gap_y);
    }

    #[test]
    fn offscreen_removal_preserves_order() {
        let cfg = Config::default();
        let mut spawner = Spawner::new(&cfg);
        spawner.last_spawn = f32::MAX; // disable spawning for this test
        let mut obstacles = vec![
            Obstacle::new(-cfg.obstacle_width - 1.0, 150.0),
            Obstacle::new(120.0, 200.0),
            Obstacle::new(-cfg.obstacle_width - 5.0, 250.0),
            Obstacle::new(300.0, 300.0),
        ];
        spawner.advance(0.0, &cfg, &mut rng(), &mut obstacles, 0.0);
        assert_eq!(obstacles.len(), 2);
        assert!(obstacles[0].x < obstacles[1].x);
        assert_eq!(obstacles[0].gap_y, 200.0);
        assert_eq!(obstacles[1].gap_y, 300.0);
    }
}
