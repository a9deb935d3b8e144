mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
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
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use river_raid::{Game, GameConfig, Input};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// Log destination; the terminal itself is busy drawing the game.
const LOG_FILE: &str = "river_raid.log";

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// Logging is opt-in through `RUST_LOG` and always goes to `LOG_FILE`.
fn init_logging() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    match File::create(LOG_FILE) {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init(),
        Err(e) => eprintln!("cannot open {LOG_FILE}: {e}"),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum Outcome {
    Quit,
    Restart,
}

/// Runs one game until the player quits or asks for a restart.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key.  Each frame, keys still "fresh" (within
/// `HOLD_WINDOW` frames) become this tick's `Input`, so steering and firing
/// can be held together.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<Outcome> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut reported = false;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(Outcome::Quit);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(Outcome::Quit);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') if game.is_over() => {
                            return Ok(Outcome::Restart);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let input = Input {
            left: any_held(
                &key_frame,
                &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                frame,
            ),
            right: any_held(
                &key_frame,
                &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                frame,
            ),
            fire: is_held(&key_frame, &KeyCode::Char(' '), frame),
        };

        let snap = game.step(input);
        if game.is_over() && !reported {
            info!(score = snap.score, tick = snap.tick, cause = ?snap.cause(), "run finished");
            reported = true;
        }

        let (cols, rows) = terminal::size()?;
        display::render(out, &snap, cols, rows)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();

    let config = GameConfig::default();
    if let Err(e) = config.validate() {
        eprintln!("invalid configuration: {e}");
        std::process::exit(2);
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

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
            Err(e) => {
                warn!("input thread stopped: {e}");
                break;
            }
        }
    });

    let result = run(&mut out, &rx, config);

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
    mut config: GameConfig,
) -> std::io::Result<()> {
    loop {
        info!(seed = config.seed, "starting run");
        let mut game = Game::new(config.clone());
        match game_loop(out, &mut game, rx)? {
            Outcome::Quit => break,
            // A fresh seed gives a fresh river.
            Outcome::Restart => config.seed = config.seed.wrapping_add(1),
        }
    }
    Ok(())
}
