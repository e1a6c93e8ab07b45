use std::backtrace::Backtrace;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};

use paperboy::assets::Assets;
use paperboy::config::{Config, LogConfig, DEFAULT_CONFIG_PATH};
use paperboy::display::{HudStyle, TerminalRenderer};
use paperboy::input::TerminalInput;
use paperboy::session::{contain_panic, Outcome, Session};

// ── Logging ───────────────────────────────────────────────────────────────────

/// The game owns the terminal, so log lines go to a file when one is
/// configured (stderr otherwise).
fn init_logging(config: &LogConfig) {
    let env = env_logger::Env::default().default_filter_or(config.level.as_str());
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(path) = &config.file {
        match File::create(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(err) => eprintln!("Can't open log file {}: {}", path.display(), err),
        }
    }
    builder.init();
}

/// Route panics into the log with a backtrace; the session loop catches the
/// unwind and shuts down normally.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        log::error!("{}\n{}", info, Backtrace::force_capture());
    }));
}

// ── Terminal ──────────────────────────────────────────────────────────────────

fn play<W: Write>(out: &mut W, config: &Config, assets: Assets) -> anyhow::Result<Outcome> {
    let (cols, rows) = terminal::size().context("reading terminal size")?;
    let seed = config.game.seed.unwrap_or_else(rand::random);
    log::info!("Starting session: seed {}, {}x{} cells, {} fps", seed, cols, rows, config.game.fps);

    let hud = HudStyle::from_name(&config.hud.color);
    let renderer = TerminalRenderer::new(out, cols, rows, hud);
    let mut session = Session::new(assets, TerminalInput::new(), renderer, seed)
        .with_frame_budget(std::time::Duration::from_secs_f64(config.frame_secs()));
    Ok(session.run())
}

/// Raw mode, alternate screen, hidden cursor. Returns whether the terminal
/// accepted the keyboard enhancement flags.
fn enter_terminal<W: Write>(out: &mut W) -> anyhow::Result<bool> {
    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back gracefully.
    Ok(out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok())
}

fn leave_terminal<W: Write>(out: &mut W, keyboard_enhanced: bool) {
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

fn run(config: &Config) -> anyhow::Result<Outcome> {
    // Loaded before the loop starts; never fatal
    let assets = Assets::load(&config.assets.dir);

    let mut out = BufWriter::new(stdout());
    match enter_terminal(&mut out) {
        Ok(keyboard_enhanced) => {
            // A panic here must not skip the restore below
            let result = contain_panic("playing", || play(&mut out, config, assets));
            leave_terminal(&mut out, keyboard_enhanced);
            result
        }
        Err(err) => {
            leave_terminal(&mut out, false);
            Err(err)
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Every way out of here exits with status 0.
fn main() {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let (config, config_error) = match Config::load(&config_path) {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };

    init_logging(&config.log);
    install_panic_hook();
    if let Some(err) = config_error {
        log::error!("{}; using defaults", err);
    }

    match run(&config) {
        Ok(outcome) => log::info!("Exiting after {:?}", outcome),
        Err(err) => log::error!("Fatal error: {:?}", err),
    }
}
