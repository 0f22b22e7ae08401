//! Terminal rendering
//!
//! A cell color buffer mapped from playfield coordinates, redrawn in full
//! every frame, with text overlays queued on top. Purely a consumer of the
//! simulation state; it never mutates it.

use crossterm::{
    cursor, queue,
    style::{self, Color},
};
use std::io::{self, Write};

use crate::config::Config;
use crate::sim::{GamePhase, GameState, Rect, ground_rect};

// Palette of the original game.
const SKY: Color = Color::Rgb { r: 0x70, g: 0xc5, b: 0xce };
const GROUND: Color = Color::Rgb { r: 0xde, g: 0xd8, b: 0x95 };
const GRASS: Color = Color::Rgb { r: 0x54, g: 0xa8, b: 0x37 };
const GRASS_LIGHT: Color = Color::Rgb { r: 0x6a, g: 0xbf, b: 0x45 };
const CLOUD_COLORS: [Color; 3] = [
    Color::Rgb { r: 0xff, g: 0xff, b: 0xff },
    Color::Rgb { r: 0xf8, g: 0xf8, b: 0xf8 },
    Color::Rgb { r: 0xf0, g: 0xf0, b: 0xf0 },
];
const PIPE: Color = Color::Rgb { r: 0x74, g: 0xbf, b: 0x2e };
const PIPE_CAP: Color = Color::Rgb { r: 0x5a, g: 0x8a, b: 0x2a };
const FLYER: Color = Color::Rgb { r: 0xff, g: 0xeb, b: 0x3b };
const FLYER_FLAP: Color = Color::Rgb { r: 0xff, g: 0xc1, b: 0x07 };

/// Pipe cap thickness in world pixels (visual detail only).
const CAP_HEIGHT: f32 = 20.0;
/// Grass strip thickness in world pixels.
const GRASS_HEIGHT: f32 = 8.0;
/// Grass stripe width; a light/dark pair repeats every 50 world pixels.
const STRIPE_WIDTH: f32 = 25.0;
/// Leftward ground scroll in world pixels per nominal frame.
const GROUND_SCROLL_SPEED: f32 = 1.0;
/// Leftward cloud drift in world pixels per nominal frame.
const CLOUD_SPEED: f32 = 0.25;

/// Background cloud rectangles as `(x, y, w, h)` in world pixels.
const CLOUDS: [(f32, f32, f32, f32); 3] = [
    (40.0, 100.0, 70.0, 22.0),
    (170.0, 60.0, 90.0, 26.0),
    (280.0, 150.0, 60.0, 18.0),
];

/// Cell color buffer covering the whole terminal.
pub struct Screen {
    cols: u16,
    rows: u16,
    cells: Vec<Color>,
}

impl Screen {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![SKY; cols as usize * rows as usize],
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![SKY; cols as usize * rows as usize];
    }

    fn clear(&mut self) {
        self.cells.fill(SKY);
    }

    /// Fill the cells covered by a world-space rectangle.
    fn fill_world(&mut self, cfg: &Config, rect: &Rect, color: Color) {
        if rect.w <= 0.0 || rect.h <= 0.0 {
            return;
        }
        let sx = self.cols as f32 / cfg.width;
        let sy = self.rows as f32 / cfg.height;
        let x0 = (rect.x * sx).floor().max(0.0) as i32;
        let x1 = (rect.right() * sx).ceil().min(self.cols as f32) as i32;
        let y0 = (rect.y * sy).floor().max(0.0) as i32;
        let y1 = (rect.bottom() * sy).ceil().min(self.rows as f32) as i32;
        for y in y0..y1 {
            for x in x0..x1 {
                self.cells[y as usize * self.cols as usize + x as usize] = color;
            }
        }
    }

    fn present(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let mut prev: Option<Color> = None;
        for row in 0..self.rows {
            queue!(out, cursor::MoveTo(0, row))?;
            for col in 0..self.cols {
                let c = self.cells[row as usize * self.cols as usize + col as usize];
                if prev != Some(c) {
                    queue!(out, style::SetBackgroundColor(c))?;
                    prev = Some(c);
                }
                queue!(out, style::Print(' '))?;
            }
        }
        queue!(out, style::ResetColor)?;
        Ok(())
    }

    fn draw_text_centered(&self, out: &mut impl Write, row: u16, text: &str) -> io::Result<()> {
        let col = (self.cols.saturating_sub(text.len() as u16)) / 2;
        queue!(
            out,
            cursor::MoveTo(col, row.min(self.rows.saturating_sub(1))),
            style::SetForegroundColor(Color::White),
            style::SetBackgroundColor(Color::Black),
            style::Print(text),
            style::ResetColor,
        )
    }
}

/// Draw one frame: world cells, then overlays, then flush.
pub fn draw(
    out: &mut impl Write,
    screen: &mut Screen,
    state: &GameState,
    cfg: &Config,
) -> io::Result<()> {
    screen.clear();

    // Clouds drift left with the simulation clock and wrap around the
    // playfield, so they freeze along with everything else on game over.
    for (i, &(x, y, w, h)) in CLOUDS.iter().enumerate() {
        let drifted = (x + w - state.clock * CLOUD_SPEED).rem_euclid(cfg.width + w) - w;
        let color = CLOUD_COLORS[i % CLOUD_COLORS.len()];
        screen.fill_world(cfg, &Rect::new(drifted, y, w, h), color);
    }

    for obstacle in &state.obstacles {
        let [top, bottom] = obstacle.segments(cfg);
        screen.fill_world(cfg, &top, PIPE);
        screen.fill_world(cfg, &bottom, PIPE);
        // Caps hug the gap on both sides.
        let top_cap = Rect::new(top.x, (top.bottom() - CAP_HEIGHT).max(0.0), top.w, CAP_HEIGHT);
        let bottom_cap = Rect::new(bottom.x, bottom.y, bottom.w, CAP_HEIGHT.min(bottom.h));
        screen.fill_world(cfg, &top_cap, PIPE_CAP);
        screen.fill_world(cfg, &bottom_cap, PIPE_CAP);
    }

    let ground = ground_rect(cfg);
    screen.fill_world(cfg, &ground, GROUND);
    let grass = Rect::new(ground.x, ground.y, ground.w, GRASS_HEIGHT);
    screen.fill_world(cfg, &grass, GRASS);
    // Alternating grass stripes scroll left at the world speed, keyed off the
    // simulation clock. Dark stripes keep the base fill.
    let offset = (state.clock * GROUND_SCROLL_SPEED).rem_euclid(STRIPE_WIDTH * 2.0);
    let mut stripe_x = -offset;
    let mut light = false;
    while stripe_x < cfg.width {
        if light {
            let stripe = Rect::new(stripe_x, ground.y, STRIPE_WIDTH, GRASS_HEIGHT);
            screen.fill_world(cfg, &stripe, GRASS_LIGHT);
        }
        light = !light;
        stripe_x += STRIPE_WIDTH;
    }

    let flyer = Rect::new(
        state.flyer.pos.x,
        state.flyer.pos.y,
        cfg.flyer_width,
        cfg.flyer_height,
    );
    let color = if state.flyer.is_flapping() { FLYER_FLAP } else { FLYER };
    screen.fill_world(cfg, &flyer, color);

    screen.present(out)?;

    screen.draw_text_centered(out, 1, &format!(" {} ", state.score))?;
    match state.phase {
        GamePhase::Idle => {
            screen.draw_text_centered(out, 5, " S K Y F L A P ")?;
            screen.draw_text_centered(out, 7, " space to flap, q to quit ")?;
            screen.draw_text_centered(out, 8, &format!(" best: {} ", state.best))?;
        }
        GamePhase::Running => {}
        GamePhase::GameOver => {
            screen.draw_text_centered(out, 5, " GAME OVER ")?;
            screen.draw_text_centered(
                out,
                7,
                &format!(" score: {}   best: {} ", state.score, state.best),
            )?;
            screen.draw_text_centered(out, 9, " r to restart, q to quit ")?;
        }
    }

    out.flush()
}
