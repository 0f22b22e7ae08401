//! Skyflap entry point
//!
//! Terminal loop driver: polls input, normalizes frame time, steps the
//! simulation, then dispatches events to audio and persistence and renders.
//! Side effects happen strictly after the simulation step.

use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode},
    execute, terminal,
};
use rand::Rng;
use std::io::{self, stdout};
use std::time::{Duration, Instant};

use skyflap::audio::{AudioManager, SoundEffect};
use skyflap::bestscore::{FileScoreStore, ScoreStore};
use skyflap::config::{Config, NOMINAL_FRAME_MS};
use skyflap::render::{self, Screen};
use skyflap::sim::{self, Activation, GameEvent, GameState};

/// Upper bound on a single step's dt in nominal frames. A stalled terminal
/// (suspend, resize storm) re-baselines instead of replaying the gap.
const MAX_FRAME_DT: f32 = 4.0;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cfg = Config::default();
    cfg.validate().context("invalid game configuration")?;

    let store = FileScoreStore::new();
    let best = store.load();
    let seed: u64 = rand::rng().random();
    let mut state = GameState::new(&cfg, seed, best);
    let mut audio = AudioManager::new();

    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
    )?;

    let cleanup = |out: &mut io::Stdout| -> io::Result<()> {
        execute!(
            out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()
    };

    let (cols, rows) = terminal::size()?;
    let mut screen = Screen::new(cols, rows);

    let frame_dur = Duration::from_secs_f32(NOMINAL_FRAME_MS / 1000.0);
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        cleanup(&mut out)?;
                        return Ok(());
                    }
                    KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => {
                        match sim::handle_activate(&mut state, &cfg) {
                            Activation::Started | Activation::Flapped => {
                                audio.play(SoundEffect::Flap);
                            }
                            Activation::Ignored => {}
                        }
                    }
                    KeyCode::Char('r') => {
                        sim::handle_restart(&mut state, &cfg);
                    }
                    KeyCode::Char('m') => {
                        audio.toggle_muted();
                    }
                    _ => {}
                },
                Event::Resize(c, r) => screen.resize(c, r),
                _ => {}
            }
        }

        // dt in nominal frames, clamped so a stall cannot jolt the physics.
        let now = Instant::now();
        let dt = (now - last_frame).as_secs_f32() * 1000.0 / NOMINAL_FRAME_MS;
        last_frame = now;
        let dt = dt.min(MAX_FRAME_DT);

        for event in sim::step(&mut state, &cfg, dt) {
            match event {
                GameEvent::Scored(_) => audio.play(SoundEffect::Score),
                GameEvent::Collided => audio.play(SoundEffect::Hit),
                GameEvent::NewBest(new_best) => {
                    audio.play(SoundEffect::NewBest);
                    store.save(new_best);
                }
            }
        }

        if let Err(e) = render::draw(&mut out, &mut screen, &state, &cfg) {
            cleanup(&mut out)?;
            return Err(e).context("render failed");
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }
}
