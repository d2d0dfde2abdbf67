mod display;
mod gamepad;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing_subscriber::EnvFilter;

use alien_invasion::compute::{handle_input, init_state, tick, GameState, LifeLoss};
use alien_invasion::input::{Control, HeldKeys, InputEvent, Key};
use alien_invasion::keymap::ControllerKeymap;
use alien_invasion::render::draw_frame;
use alien_invasion::settings::Settings;
use alien_invasion::viewport::Viewport;

use display::TerminalRenderer;
use gamepad::GamepadSource;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "alien_invasion")]
#[command(about = "Shoot down the descending alien fleet before it lands")]
struct Args {
    /// Logical screen width in pixels
    #[arg(long, default_value_t = 800)]
    width: i32,

    /// Logical screen height in pixels
    #[arg(long, default_value_t = 600)]
    height: i32,

    /// Tick ceiling (frames per second)
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Ships per game
    #[arg(long, default_value_t = 3)]
    ships: u32,

    /// Controller keymap (JSON of button name → index)
    #[arg(long, default_value = "ps4_keys.json")]
    keymap: PathBuf,

    /// Log file; the terminal itself is the game screen
    #[arg(long, default_value = "alien_invasion.log")]
    log_file: PathBuf,
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let settings = Settings {
            screen_width: self.width,
            screen_height: self.height,
            frame_rate: self.fps,
            ship_limit: self.ships,
            ..Settings::default()
        };
        settings
            .validate()
            .with_context(|| format!("invalid --width {} / --height {}", self.width, self.height))?;
        Ok(settings)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Input translation ─────────────────────────────────────────────────────────

fn logical_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => Some(Key::Play),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Quit),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Key::Quit),
        _ => None,
    }
}

/// Translate one terminal event into at most one game input event.
fn translate(event: Event, held: &mut HeldKeys, viewport: &Viewport, frame: u64) -> Option<InputEvent> {
    match event {
        Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
            let key = logical_key(code, modifiers)?;
            match kind {
                KeyEventKind::Press => Some(held.press(key, frame)),
                KeyEventKind::Repeat => {
                    held.repeat(key, frame);
                    None
                }
                KeyEventKind::Release => held.release(key),
            }
        }
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => viewport
            .to_screen(column, row)
            .map(|(x, y)| InputEvent::Click { x, y }),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Each frame: drain terminal and controller input, expire silent keys, run
/// one tick, pause after a lost ship, draw, then sleep out the rest of the
/// frame budget.  Input always lands before the tick, and the tick before
/// the draw.
fn game_loop<W: Write>(
    renderer: &mut TerminalRenderer<W>,
    mut state: GameState,
    keymap: &ControllerKeymap,
    rx: &mpsc::Receiver<Event>,
    held: &mut HeldKeys,
    gamepad: &mut GamepadSource,
) -> Result<GameState> {
    let frame_budget = state.settings.frame_duration();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut inputs = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            if let Event::Resize(cols, rows) = ev {
                renderer.resize(cols, rows);
                continue;
            }
            if let Some(input) = translate(ev, held, &renderer.viewport(), frame) {
                inputs.push(input);
            }
        }
        inputs.extend(held.expire(frame));
        inputs.extend(gamepad.poll());

        for input in &inputs {
            let (next, control) = handle_input(&state, input, keymap);
            state = next;
            if control == Control::Quit {
                tracing::info!(high_score = state.stats.high_score, "quit");
                return Ok(state);
            }
        }

        // ── Simulation ────────────────────────────────────────────────────────
        let (next, report) = tick(&state);
        state = next;
        if report.aliens_destroyed > 0 {
            tracing::trace!(
                destroyed = report.aliens_destroyed,
                points = report.points,
                score = state.stats.score,
                "aliens hit"
            );
        }

        // Hold the last drawn frame before showing the respawned fleet.
        if report.life_lost == Some(LifeLoss::Respawned) {
            thread::sleep(state.settings.hit_pause);
        }

        draw_frame(&state, renderer).context("failed to draw frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    // Logging is best effort: the game still runs if the file can't be made.
    let logging = init_logging(&args.log_file);

    let settings = args.settings()?;
    let keymap = ControllerKeymap::load_or_default(&args.keymap);
    let mut gamepad = GamepadSource::connect();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to expiring
    // keys that stop repeating.
    let keyboard_enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    tracing::info!(keyboard_enhanced, "terminal ready");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, settings, &keymap, &rx, keyboard_enhanced, &mut gamepad);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = logging {
        eprintln!("warning: {err:#}");
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    settings: Settings,
    keymap: &ControllerKeymap,
    rx: &mpsc::Receiver<Event>,
    keyboard_enhanced: bool,
    gamepad: &mut GamepadSource,
) -> Result<()> {
    let (cols, rows) = terminal::size().context("failed to read terminal size")?;
    let viewport = Viewport::new(cols, rows, settings.screen_width, settings.screen_height);
    let mut renderer = TerminalRenderer::new(out, viewport);
    let mut held = HeldKeys::new(!keyboard_enhanced);

    let state = init_state(settings);
    let final_state = game_loop(&mut renderer, state, keymap, rx, &mut held, gamepad)?;
    tracing::debug!(frames = final_state.frame, "session ended");
    Ok(())
}
