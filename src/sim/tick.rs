//! Per-frame simulation step and input entry points
//!
//! The loop driver calls `step` once per frame with a dt normalized to the
//! nominal 60 Hz frame, and `handle_activate`/`handle_restart` on discrete
//! input edges. All phase transitions happen here.

use super::collision::{collides_ground, collides_obstacle};
use super::state::{GameEvent, GamePhase, GameState};
use crate::config::Config;

/// What an activate input did, so the driver can react (e.g. play the flap
/// sound only when a flap actually happened).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Idle → Running, plus the initial jump
    Started,
    /// Jump during a run
    Flapped,
    /// Activate during GameOver is a no-op until an explicit restart
    Ignored,
}

/// The single "flap or start" input.
pub fn handle_activate(state: &mut GameState, cfg: &Config) -> Activation {
    match state.phase {
        GamePhase::Idle => {
            state.phase = GamePhase::Running;
            state.flyer.jump(cfg);
            log::debug!("run started");
            Activation::Started
        }
        GamePhase::Running => {
            state.flyer.jump(cfg);
            Activation::Flapped
        }
        GamePhase::GameOver => Activation::Ignored,
    }
}

/// Explicit restart input. Only meaningful after a run has ended; returns
/// whether a reset happened. The next activate starts the new run.
pub fn handle_restart(state: &mut GameState, cfg: &Config) -> bool {
    if state.phase == GamePhase::GameOver {
        state.reset(cfg);
        log::debug!("game reset");
        true
    } else {
        false
    }
}

/// Advance the simulation by one frame.
///
/// Fixed order while Running: gravity, spawner (move/spawn/recycle), pass
/// scoring, collision, top clamp. Outside Running this is a no-op; after a
/// collision the state freezes until `handle_restart`.
pub fn step(state: &mut GameState, cfg: &Config, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Running {
        return events;
    }

    state.clock += dt;
    state.flyer.tick_flap();
    state.flyer.apply_gravity(cfg, dt);

    state
        .spawner
        .advance(state.clock, cfg, &mut state.rng, &mut state.obstacles, dt);

    let flyer_x = state.flyer.pos.x;
    for obstacle in &mut state.obstacles {
        if obstacle.try_pass(flyer_x, cfg) {
            state.score += 1;
            events.push(GameEvent::Scored(state.score));
        }
    }

    let hitbox = state.flyer.bounds(cfg);
    let hit = collides_ground(&hitbox, cfg)
        || state
            .obstacles
            .iter()
            .any(|o| collides_obstacle(&hitbox, o, cfg));
    if hit {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::Collided);
        if state.score > state.best {
            state.best = state.score;
            events.push(GameEvent::NewBest(state.best));
        }
        log::debug!("collision at score {}", state.score);
        return events;
    }

    // Top boundary only; the ground is a terminal collision, not a clamp.
    if state.flyer.pos.y < 0.0 {
        state.flyer.pos.y = 0.0;
        state.flyer.vel = state.flyer.vel.max(0.0);
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Obstacle;

    fn new_state(cfg: &Config, best: u32) -> GameState {
        GameState::new(cfg, 1234, best)
    }

    /// Step until the run ends, with a safety bound.
    fn run_to_game_over(state: &mut GameState, cfg: &Config) -> Vec<GameEvent> {
        for _ in 0..10_000 {
            let events = step(state, cfg, 1.0);
            if state.phase == GamePhase::GameOver {
                return events;
            }
        }
        panic!("run never ended");
    }

    #[test]
    fn activate_starts_run_with_jump_velocity() {
        let cfg = Config::default();
        let mut state = new_state(&cfg, 0);
        assert_eq!(handle_activate(&mut state, &cfg), Activation::Started);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.flyer.vel, cfg.jump_force);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn step_is_a_noop_outside_running() {
        let cfg = Config::default();
        let mut state = new_state(&cfg, 0);
        let before_y = state.flyer.pos.y;
        assert!(step(&mut state, &cfg, 1.0).is_empty());
        assert_eq!(state.flyer.pos.y, before_y);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn falling_without_input_ends_on_the_ground() {
        let cfg = Config::default();
        let mut state = new_state(&cfg, 0);
        handle_activate(&mut state, &cfg);
        let events = run_to_game_over(&mut state, &cfg);
        assert!(events.contains(&GameEvent::Collided));
        // Frozen: further steps and activations change nothing.
        let y = state.flyer.pos.y;
        let obstacles = state.obstacles.len();
        assert!(step(&mut state, &cfg, 1.0).is_empty());
        assert_eq!(handle_activate(&mut state, &cfg), Activation::Ignored);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.flyer.pos.y, y);
        assert_eq!(state.obstacles.len(), obstacles);
    }

    #[test]
    fn restart_returns_to_idle_defaults() {
        let cfg = Config::default();
        let mut state = new_state(&cfg, 0);
        handle_activate(&mut state, &cfg);
        run_to_game_over(&mut state, &cfg);
        assert!(handle_restart(&mut state, &cfg));
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.flyer.vel, 0.0);
        // Restart while not in GameOver is refused.
        assert!(!handle_restart(&mut state, &cfg));
        assert_eq!(handle_activate(&mut state, &cfg), Activation::Started);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn passing_an_obstacle_scores_once() {
        let cfg = Config::default();
        let mut state = new_state(&cfg, 0);
        state.phase = GamePhase::Running;
        // Keep the flyer safely inside the gap and the obstacle just about
        // to fall behind it.
        let gap_y = 200.0;
        state.flyer.pos.y = gap_y + cfg.gap_height / 2.0;
        state.flyer.vel = 0.0;
        state.obstacles.push(Obstacle::new(
            state.flyer.pos.x - cfg.obstacle_width - 0.5,
            gap_y,
        ));

        let events = step(&mut state, &cfg, 1.0);
        assert!(events.contains(&GameEvent::Scored(1)));
        assert_eq!(state.score, 1);

        // The same obstacle never scores again.
        state.flyer.vel = 0.0;
        state.flyer.pos.y = gap_y + cfg.gap_height / 2.0;
        let events = step(&mut state, &cfg, 1.0);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Scored(_))));
        assert_eq!(state.score, 1);
    }

    #[test]
    fn flying_into_an_obstacle_ends_the_run() {
        let cfg = Config::default();
        let mut state = new_state(&cfg, 0);
        state.phase = GamePhase::Running;
        // Column directly on the flyer, gap far below.
        state.obstacles.push(Obstacle::new(state.flyer.pos.x, 400.0));
        let events = step(&mut state, &cfg, 1.0);
        assert!(events.contains(&GameEvent::Collided));
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn top_boundary_clamps_position_and_velocity() {
        let cfg = Config::default();
        let mut state = new_state(&cfg, 0);
        state.phase = GamePhase::Running;
        state.flyer.pos.y = 1.0;
        state.flyer.vel = -30.0;
        step(&mut state, &cfg, 1.0);
        assert_eq!(state.flyer.pos.y, 0.0);
        assert!(state.flyer.vel >= 0.0);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn new_best_is_emitted_only_when_beaten() {
        let cfg = Config::default();
        let mut state = new_state(&cfg, 5);
        state.phase = GamePhase::Running;
        state.score = 7;
        // Drop straight onto the ground to end the run.
        state.flyer.pos.y = cfg.floor_y();
        let events = step(&mut state, &cfg, 1.0);
        assert!(events.contains(&GameEvent::NewBest(7)));
        assert_eq!(state.best, 7);

        // A worse follow-up run leaves the best untouched.
        state.reset(&cfg);
        state.phase = GamePhase::Running;
        state.score = 3;
        state.flyer.pos.y = cfg.floor_y();
        let events = step(&mut state, &cfg, 1.0);
        assert!(events.contains(&GameEvent::Collided));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::NewBest(_))));
        assert_eq!(state.best, 7);
    }

    #[test]
    fn collision_freezes_spawning() {
        let cfg = Config::default();
        let mut state = new_state(&cfg, 0);
        handle_activate(&mut state, &cfg);
        run_to_game_over(&mut state, &cfg);
        let count = state.obstacles.len();
        for _ in 0..(cfg.spawn_interval as usize * 2) {
            step(&mut state, &cfg, 1.0);
        }
        assert_eq!(state.obstacles.len(), count);
    }
}
