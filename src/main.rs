//! Terminal falling-block runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `blockfall-term`.
//! Logs go to a file so they never mix with the game screen.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{Clock, EngineConfig, GameEvent, GameSnapshot, GameState, MonotonicClock};
use blockfall::input::{should_quit, InputHandler};
use blockfall::term::{Blink, FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, TICK_MS};

/// Blockfall - falling-block puzzle game for the terminal
#[derive(Parser)]
#[command(name = "blockfall")]
#[command(about = "Falling-block puzzle game for the terminal", long_about = None)]
struct Cli {
    /// TOML file with engine tuning (cooldowns, gravity, seed)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the piece picker; overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where to write logs
    #[arg(long, default_value = "blockfall.log")]
    log_file: PathBuf,
}

/// Restore terminal state - called on panic
fn restore_terminal() {
    use crossterm::{
        cursor, execute,
        terminal::{disable_raw_mode, LeaveAlternateScreen},
    };
    let _ = disable_raw_mode();
    let _ = execute!(std::io::stdout(), cursor::Show, LeaveAlternateScreen);
}

fn init_logging(path: &Path) {
    // Without a writable log file the game still runs, just silently.
    let Ok(log_file) = File::create(path) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    config.validate().context("invalid engine config")?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file);

    let config = load_config(&cli)?;
    tracing::info!(?config, "starting");

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        tracing::warn!(%err, "failed to restore terminal");
    }
    if let Err(err) = &result {
        tracing::error!(%err, "exited with error");
    }
    result
}

fn run(term: &mut TerminalRenderer, config: EngineConfig) -> Result<()> {
    let clock = MonotonicClock::new();
    let mut game = GameState::new(config);
    let mut input = InputHandler::new().with_release_events(term.has_enhanced_keys());

    let view = GameView::default();
    let blink = Blink::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick_ms = clock.now_ms();

    loop {
        let now = clock.now_ms();

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), blink.is_on(now), &mut fb);
        term.present(&fb)?;

        // Input with timeout until next tick.
        let elapsed = Duration::from_millis(clock.now_ms().saturating_sub(last_tick_ms));
        let timeout = tick.checked_sub(elapsed).unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            tracing::info!(score = game.score(), "quit");
                            return Ok(());
                        }
                        let now = clock.now_ms();
                        if let Some(action) = input.handle_key_press(key.code, now) {
                            game.apply_action(action, now);
                        }
                    }
                    KeyEventKind::Release => input.handle_key_release(key.code),
                },
                Event::Resize(..) => term.invalidate(),
                Event::FocusLost => input.reset(),
                _ => {}
            }
        }

        // Tick.
        let now = clock.now_ms();
        if now.saturating_sub(last_tick_ms) >= TICK_MS as u64 {
            last_tick_ms = now;

            for action in input.update(now) {
                if action != GameAction::Start {
                    game.apply_action(action, now);
                }
            }
            game.tick(now);

            for event in game.take_events() {
                log_event(event);
            }
        }
    }
}

/// Hook for sound cues; for now each event is only logged.
fn log_event(event: GameEvent) {
    match event {
        GameEvent::Started => tracing::debug!(cue = "start", "event"),
        GameEvent::LinesCleared { lines, points } => {
            tracing::debug!(cue = "clear_line", lines, points, "event")
        }
        GameEvent::LevelUp { level, .. } => tracing::debug!(cue = "level_up", level, "event"),
        GameEvent::GameOver { score } => tracing::debug!(cue = "game_over", score, "event"),
    }
}
