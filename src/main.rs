use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use canvas_blaster::display;
use canvas_blaster::{GameConfig, GameState, InputState, Key};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈128 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Translate a terminal key into the DOM-style name the core understands.
fn key_name(code: &KeyCode) -> Option<&'static str> {
    let key = match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::Right,
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Key::Up,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Key::Down,
        KeyCode::Char(' ') => Key::Fire,
        _ => return None,
    };
    Some(key.name())
}

enum LoopExit {
    Quit,
    Restart,
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: every press/repeat refreshes the frame a key was last seen in
/// `key_frame`; release events (keyboard-enhancement terminals) or silence
/// longer than `HOLD_WINDOW` (classic terminals) turn into `key_up`.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<LoopExit> {
    let mut rng = thread_rng();
    let mut input = InputState::new();
    let mut key_frame: HashMap<&'static str, u64> = HashMap::new();
    let started = Instant::now();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(LoopExit::Quit);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(LoopExit::Quit);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') if state.is_over() => {
                            return Ok(LoopExit::Restart);
                        }
                        _ => {}
                    }
                    if let Some(name) = key_name(&code) {
                        key_frame.insert(name, frame);
                        input.key_down(name);
                    }
                }
                KeyEventKind::Release => {
                    if let Some(name) = key_name(&code) {
                        key_frame.remove(name);
                        input.key_up(name);
                    }
                }
            }
        }

        // ── Expire keys that stopped repeating ────────────────────────────────
        key_frame.retain(|name, last| {
            let live = frame.saturating_sub(*last) <= HOLD_WINDOW;
            if !live {
                input.key_up(name);
            }
            live
        });

        let now_ms = started.elapsed().as_millis() as u64;
        let frame_input = input.frame_input();
        let snapshot = state.advance_frame(&frame_input, now_ms, &mut rng);

        let (width, height) = terminal::size()?;
        display::render(out, &snapshot, width, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn load_config() -> GameConfig {
    match std::env::args().nth(1) {
        Some(path) => GameConfig::load(&path).unwrap_or_else(|e| {
            log::warn!("{}; using default config", e);
            GameConfig::default()
        }),
        None => GameConfig::default(),
    }
}

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let config = load_config();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
) -> std::io::Result<()> {
    let mut rng = thread_rng();

    loop {
        let mut state = GameState::new(config.clone(), &mut rng);
        log::info!("New game on a {}x{} canvas", config.canvas_width, config.canvas_height);

        match game_loop(out, &mut state, rx)? {
            LoopExit::Quit => break,
            LoopExit::Restart => continue,
        }
    }
    Ok(())
}
