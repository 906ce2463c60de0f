mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::Print,
    terminal, ExecutableCommand, QueueableCommand,
};
use env_logger::{Env, Target};
use log::info;

use platformer::assets::AssetCatalog;
use platformer::config::GameConfig;
use platformer::game::{Action, Game};
use platformer::host::{Clock, SystemClock};

use display::{TerminalAudio, TerminalRenderer};

/// Side-scrolling platformer in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Simulation ticks per second. Physics is tuned for 90.
    #[arg(long, default_value_t = 90, value_parser = clap::value_parser!(u32).range(1..))]
    tps: u32,
    /// Seconds allowed per level.
    #[arg(long, default_value_t = 120.0, value_parser = positive_seconds)]
    time_limit: f64,
    /// Seed for level generation (random when omitted).
    #[arg(long)]
    seed: Option<u64>,
    /// Log destination; set RUST_LOG to change verbosity.
    #[arg(long, default_value = "platformer.log")]
    log_file: PathBuf,
}

fn positive_seconds(arg: &str) -> Result<f64, String> {
    let seconds: f64 = arg
        .parse()
        .map_err(|_| format!("`{}` is not a number", arg))?;
    if seconds > 0.0 && seconds.is_finite() {
        Ok(seconds)
    } else {
        Err(format!("time limit must be positive, got {}", seconds))
    }
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key counts as held if its last press/repeat event arrived within this
/// window. Covers terminals that never report key releases: OS key repeat
/// runs at ≥ 15 Hz, so the window is refreshed before it expires.
const HOLD_WINDOW_MS: u64 = 133;

fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64, window: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= window)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64, window: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame, window))
}

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];

fn action_for(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Action::Jump),
        KeyCode::Char(' ') => Some(Action::Shoot),
        KeyCode::Char('l') | KeyCode::Char('L') => Some(Action::RestartLevel),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::RestartGame),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Event drain ───────────────────────────────────────────────────────────────

/// One frame's worth of input.
#[derive(Debug, Default, PartialEq)]
struct FrameInput {
    actions: Vec<Action>,
    resize: Option<(u16, u16)>,
    quit: bool,
}

/// Folds pending terminal events into `key_frame` and collects the actions
/// they trigger.
///
/// An action fires only on a fresh press: a key not already held. Classic
/// terminals report OS key-repeat as repeated `Press` events, and those
/// land inside the hold window, so a held key fires once. Draining stops
/// at a quit key.
fn drain_events(
    events: impl IntoIterator<Item = Event>,
    key_frame: &mut HashMap<KeyCode, u64>,
    frame: u64,
    hold_window: u64,
) -> FrameInput {
    let mut input = FrameInput::default();
    for event in events {
        match event {
            Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) => match kind {
                KeyEventKind::Press => {
                    let fresh = !is_held(key_frame, &code, frame, hold_window);
                    key_frame.insert(code, frame);
                    if is_quit(code, modifiers) {
                        input.quit = true;
                        break;
                    }
                    if let Some(action) = action_for(code).filter(|_| fresh) {
                        input.actions.push(action);
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            },
            Event::Resize(cols, rows) => input.resize = Some((cols, rows)),
            _ => {}
        }
    }
    input
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs frames until the player quits.
///
/// Each frame: drain input, forward edge actions and held movement, step
/// the simulation, draw, then sleep off the rest of the frame budget.
/// Actions fire on fresh presses only (see [`drain_events`]), so holding a
/// key never repeats a restart or a shot.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
    renderer: &mut TerminalRenderer,
    audio: &mut TerminalAudio,
    clock: &dyn Clock,
) -> Result<()> {
    let tps = game.config().tps;
    let frame_budget = Duration::from_secs_f64(1.0 / tps as f64);
    let hold_window = (HOLD_WINDOW_MS * tps as u64 / 1000).max(1);

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let input = drain_events(rx.try_iter(), &mut key_frame, frame, hold_window);
        if let Some((cols, rows)) = input.resize {
            renderer.resize(cols, rows);
        }
        if input.quit {
            info!("quit requested");
            return Ok(());
        }
        for action in input.actions {
            game.handle_action(action, clock, audio);
        }

        let left = any_held(&key_frame, &LEFT_KEYS, frame, hold_window);
        let right = any_held(&key_frame, &RIGHT_KEYS, frame, hold_window);
        game.set_movement(left, right);

        game.update(clock, audio);
        game.draw(renderer);
        if audio.take_bell() {
            out.queue(Print('\x07'))?;
        }
        renderer.present(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let mut config = GameConfig::new()
        .with_tps(cli.tps)
        .with_time_limit(cli.time_limit);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release events; terminals without the kitty protocol fall
    // back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads happen on their own thread so the frame loop
    // never waits on input.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
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

    if let Err(err) = &result {
        log::error!("{:#}", err);
    }
    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, config: GameConfig) -> Result<()> {
    let clock = SystemClock::new();
    let catalog = AssetCatalog::builtin();
    let (width, height) = (config.screen_width, config.screen_height);

    let mut game = Game::new(config, &catalog, &clock).context("loading game assets")?;
    info!("game started");

    let (cols, rows) = terminal::size().context("querying terminal size")?;
    let mut renderer = TerminalRenderer::new(cols, rows, width, height);
    let mut audio = TerminalAudio::default();
    game.start(&mut audio);

    game_loop(out, &mut game, rx, &mut renderer, &mut audio, &clock)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: u64 = 12;

    fn press(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn release(c: char) -> Event {
        Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char(c),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ))
    }

    #[test]
    fn auto_repeated_presses_fire_once() {
        let mut keys = HashMap::new();
        let input = drain_events([press(' '), press(' '), press(' ')], &mut keys, 1, WINDOW);
        assert_eq!(input.actions, vec![Action::Shoot]);
    }

    #[test]
    fn held_key_does_not_refire_on_later_frames() {
        let mut keys = HashMap::new();
        let mut fired = Vec::new();
        for frame in 1..=30 {
            // OS repeat every third frame, well inside the hold window.
            let events = if frame % 3 == 1 { vec![press('w')] } else { vec![] };
            fired.extend(drain_events(events, &mut keys, frame, WINDOW).actions);
        }
        assert_eq!(fired, vec![Action::Jump]);
    }

    #[test]
    fn release_then_press_fires_again() {
        let mut keys = HashMap::new();
        let input = drain_events([press(' '), release(' '), press(' ')], &mut keys, 1, WINDOW);
        assert_eq!(input.actions, vec![Action::Shoot, Action::Shoot]);
    }

    #[test]
    fn press_after_hold_window_expires_fires_again() {
        let mut keys = HashMap::new();
        drain_events([press('l')], &mut keys, 1, WINDOW);
        let input = drain_events([press('l')], &mut keys, 2 + WINDOW, WINDOW);
        assert_eq!(input.actions, vec![Action::RestartLevel]);
    }

    #[test]
    fn distinct_keys_fire_independently() {
        let mut keys = HashMap::new();
        let input = drain_events([press('w'), press(' '), press('w')], &mut keys, 1, WINDOW);
        assert_eq!(input.actions, vec![Action::Jump, Action::Shoot]);
    }

    #[test]
    fn movement_keys_are_held_not_fired() {
        let mut keys = HashMap::new();
        let input = drain_events([press('a')], &mut keys, 5, WINDOW);
        assert!(input.actions.is_empty());
        assert!(any_held(&keys, &LEFT_KEYS, 5 + WINDOW, WINDOW));
        assert!(!any_held(&keys, &LEFT_KEYS, 6 + WINDOW, WINDOW));
    }

    #[test]
    fn quit_stops_the_drain() {
        let mut keys = HashMap::new();
        let input = drain_events([press('q'), press(' ')], &mut keys, 1, WINDOW);
        assert!(input.quit);
        assert!(input.actions.is_empty());
    }

    #[test]
    fn resize_is_reported() {
        let mut keys = HashMap::new();
        let input = drain_events([Event::Resize(120, 40)], &mut keys, 1, WINDOW);
        assert_eq!(input.resize, Some((120, 40)));
    }

    #[test]
    fn cli_rejects_non_positive_rates() {
        assert!(Cli::try_parse_from(["platformer", "--tps", "0"]).is_err());
        assert!(Cli::try_parse_from(["platformer", "--time-limit", "0"]).is_err());
        assert!(Cli::try_parse_from(["platformer", "--time-limit", "-5"]).is_err());
        assert!(Cli::try_parse_from(["platformer", "--time-limit", "soon"]).is_err());

        let cli = Cli::try_parse_from(["platformer", "--tps", "30", "--time-limit", "45.5"]).unwrap();
        assert_eq!(cli.tps, 30);
        assert_eq!(cli.time_limit, 45.5);
    }
}
