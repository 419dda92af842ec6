//! Terminal front-end for the starclash simulation core.
//!
//! The core consumes decoded `TickInput` and exposes frame snapshots;
//! this binary supplies both ends: it decodes crossterm key events into
//! inputs and rasterizes snapshots into a character grid through the
//! `DrawSink` port. A `--headless <ticks>` mode drives the core with a
//! scripted input and dumps the final snapshot as JSON.

use std::collections::HashMap;
use std::io::{Write, stdout};
use std::time::Duration;

use crossterm::{
    QueueableCommand, cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    style::Print,
    terminal,
};
use glam::Vec2;

use starclash::consts::*;
use starclash::draw::{DrawSink, draw_frame};
use starclash::sim::{
    BattleStar, Bounds, Composite, MotionRule, Shape, ShootRule, SimError, SimState, TickInput,
    Triangle, run_frame,
};

const FRAME: Duration = Duration::from_millis(33); // ~30 FPS

/// A key counts as held if its last press/repeat arrived within this
/// many frames. Covers terminals that never emit key-release events.
const HOLD_WINDOW: u64 = 4;

fn arena() -> Bounds {
    Bounds::new(ARENA_MIN_X, ARENA_MAX_X, ARENA_MIN_Y, ARENA_MAX_Y)
        .expect("arena constants form a valid range")
}

// ── Entity factories ──────────────────────────────────────────────────────────

fn build_player(id: u32) -> Result<BattleStar, SimError> {
    let ship = Triangle::new(
        Vec2::new(0.0, -12.0),
        Vec2::new(-9.0, 9.0),
        Vec2::new(9.0, 9.0),
    )?;
    BattleStar::new(
        id,
        Vec2::new(400.0, 560.0),
        Shape::Triangle(ship),
        PLAYER_HEALTH,
        MotionRule::PlayerControlled {
            speed: PLAYER_SPEED,
        },
        ShootRule::forward(Vec2::new(0.0, -1.0), PLAYER_SHOT_SPEED, PLAYER_SHOT_DAMAGE, 4)?,
    )
}

fn build_enemies(first_id: u32) -> Result<Vec<BattleStar>, SimError> {
    let mut enemies = Vec::new();
    for k in 0..5 {
        let hull = Composite::hexagon(14.0)?;
        let down = ShootRule::forward(
            Vec2::new(0.0, 1.0),
            ENEMY_SHOT_SPEED,
            ENEMY_SHOT_DAMAGE,
            ENEMY_SHOT_COOLDOWN + k * 7,
        )?;
        enemies.push(BattleStar::new(
            first_id + k,
            Vec2::new(120.0 + 140.0 * k as f32, 80.0 + 30.0 * (k % 2) as f32),
            Shape::Composite(hull),
            ENEMY_HEALTH,
            MotionRule::Patrol {
                velocity: Vec2::new(2.0 + 0.5 * k as f32, 0.0),
            },
            down,
        )?);
    }
    Ok(enemies)
}

fn build_state() -> Result<SimState, SimError> {
    SimState::new(build_player(1)?, build_enemies(2)?)
}

// ── Rasterizing sink ──────────────────────────────────────────────────────────

/// Rasterizes world-space primitives into a character grid.
struct TermSink {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
}

impl TermSink {
    fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![' '; cols * rows],
        }
    }

    fn clear(&mut self) {
        self.cells.fill(' ');
    }

    fn plot(&mut self, pos: Vec2, ch: char) {
        if self.cols == 0 || self.rows == 0 {
            return;
        }
        let cx = (pos.x - ARENA_MIN_X) / (ARENA_MAX_X - ARENA_MIN_X) * (self.cols - 1) as f32;
        let cy = (pos.y - ARENA_MIN_Y) / (ARENA_MAX_Y - ARENA_MIN_Y) * (self.rows - 1) as f32;
        if cx < 0.0 || cy < 0.0 {
            return;
        }
        let (col, row) = (cx.round() as usize, cy.round() as usize);
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = ch;
        }
    }

    fn line(&mut self, from: Vec2, to: Vec2, ch: char) {
        let steps = 16;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.plot(from.lerp(to, t), ch);
        }
    }

    fn present(&self, out: &mut impl Write) -> std::io::Result<()> {
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row as u16 + 1))?;
            let text: String = self.cells[row * self.cols..(row + 1) * self.cols]
                .iter()
                .collect();
            out.queue(Print(text))?;
        }
        Ok(())
    }
}

impl DrawSink for TermSink {
    fn circle(&mut self, center: Vec2, radius: f32) {
        let steps = 24;
        for i in 0..steps {
            let theta = i as f32 / steps as f32 * std::f32::consts::TAU;
            self.plot(center + Vec2::new(theta.cos(), theta.sin()) * radius, 'o');
        }
    }

    fn rect(&mut self, min: Vec2, max: Vec2) {
        self.line(min, Vec2::new(max.x, min.y), '#');
        self.line(Vec2::new(max.x, min.y), max, '#');
        self.line(max, Vec2::new(min.x, max.y), '#');
        self.line(Vec2::new(min.x, max.y), min, '#');
    }

    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2) {
        self.line(a, b, '^');
        self.line(b, c, '^');
        self.line(c, a, '^');
    }

    fn point(&mut self, pos: Vec2) {
        self.plot(pos, '*');
    }
}

// ── Input decoding ────────────────────────────────────────────────────────────

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: KeyCode, frame: u64) -> bool {
    key_frame
        .get(&key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn decode_input(key_frame: &HashMap<KeyCode, u64>, frame: u64, exit: bool) -> TickInput {
    let mut dir = Vec2::ZERO;
    if is_held(key_frame, KeyCode::Left, frame) || is_held(key_frame, KeyCode::Char('a'), frame) {
        dir.x -= 1.0;
    }
    if is_held(key_frame, KeyCode::Right, frame) || is_held(key_frame, KeyCode::Char('d'), frame) {
        dir.x += 1.0;
    }
    if is_held(key_frame, KeyCode::Up, frame) || is_held(key_frame, KeyCode::Char('w'), frame) {
        dir.y -= 1.0;
    }
    if is_held(key_frame, KeyCode::Down, frame) || is_held(key_frame, KeyCode::Char('s'), frame) {
        dir.y += 1.0;
    }
    TickInput {
        move_dir: if dir == Vec2::ZERO {
            dir
        } else {
            dir.normalize()
        },
        shoot: is_held(key_frame, KeyCode::Char(' '), frame),
        exit,
    }
}

// ── Modes ─────────────────────────────────────────────────────────────────────

fn run_interactive() -> Result<(), Box<dyn std::error::Error>> {
    let bounds = arena();
    let mut state = build_state()?;

    let mut out = stdout();
    terminal::enable_raw_mode()?;
    out.queue(terminal::EnterAlternateScreen)?;
    out.queue(cursor::Hide)?;
    out.flush()?;

    let (cols, rows) = terminal::size()?;
    let mut sink = TermSink::new(cols as usize, rows.saturating_sub(2) as usize);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut exit_requested = false;

    let outcome = loop {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat {
                    match key.code {
                        KeyCode::Esc | KeyCode::Char('q') => exit_requested = true,
                        code => {
                            key_frame.insert(code, frame);
                        }
                    }
                }
            }
        }

        let input = decode_input(&key_frame, frame, exit_requested);
        let cont = run_frame(&mut state, &bounds, &input)?;

        let snapshot = state.snapshot();
        sink.clear();
        draw_frame(&snapshot, &mut sink);

        out.queue(terminal::Clear(terminal::ClearType::All))?;
        out.queue(cursor::MoveTo(0, 0))?;
        out.queue(Print(format!(
            "hull {:3}   enemies {}   [arrows/wasd move, space fire, q quit]",
            snapshot.player.health,
            snapshot.enemies.len()
        )))?;
        sink.present(&mut out)?;
        out.flush()?;

        if !cont || snapshot.enemies.is_empty() {
            break snapshot;
        }
        frame += 1;
        std::thread::sleep(FRAME);
    };

    out.queue(cursor::Show)?;
    out.queue(terminal::LeaveAlternateScreen)?;
    out.flush()?;
    terminal::disable_raw_mode()?;

    if outcome.player.destroyed {
        println!("game over - your battlestar was destroyed");
    } else if outcome.enemies.is_empty() {
        println!("all enemies destroyed - you win");
    } else {
        println!("session ended");
    }
    Ok(())
}

/// Drive the core with a scripted input and dump the final snapshot.
fn run_headless(ticks: u32) -> Result<(), Box<dyn std::error::Error>> {
    let bounds = arena();
    let mut state = build_state()?;

    for tick in 0..ticks {
        let sweep = if (tick / 40) % 2 == 0 { 1.0 } else { -1.0 };
        let input = TickInput {
            move_dir: Vec2::new(sweep, 0.0),
            shoot: tick % 2 == 0,
            exit: false,
        };
        if !run_frame(&mut state, &bounds, &input)? {
            log::info!("run ended early at tick {tick}");
            break;
        }
    }

    println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("--headless") => {
            let ticks = args.next().and_then(|s| s.parse().ok()).unwrap_or(600);
            run_headless(ticks)
        }
        Some(other) => Err(format!("unknown argument: {other}").into()),
        None => run_interactive(),
    }
}
