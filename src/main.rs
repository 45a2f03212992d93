// 2048 of Life in the terminal.
// Controls: W/A/S/D or arrow keys to slide, R to restart, Q to quit.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::mpsc;
use std::time::Instant;

use clap::Parser;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;
use tracing_subscriber::prelude::*;

use life2048::appearance::ClassicAppearance;
use life2048::config::GameConfig;
use life2048::console_interface::{ConsoleInput, cleanup_terminal, handle_input, render_game, setup_terminal};
use life2048::core::{EventLog, GameModel, GameStatus, MoveCompletion, UserAction};
use life2048::models::{GameRenderState, highlighted_cells};

#[derive(Debug, Parser)]
#[command(name = "life2048", about = "2048 of Life, a sliding tile puzzle")]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width and height
    #[arg(long)]
    dimension: Option<usize>,

    /// Tile value that wins the game
    #[arg(long)]
    threshold: Option<u32>,

    /// Minimum delay between animated moves, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Seed for tile placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write logs (the terminal is busy drawing the game)
    #[arg(long, default_value = "life2048.log")]
    log_file: PathBuf,
}

fn load_config(args: &Args) -> anyhow::Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(dimension) = args.dimension {
        config.dimension = dimension;
    }
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if let Some(delay_ms) = args.delay_ms {
        config.queue_delay_ms = delay_ms;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;
    Ok(config)
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let log_out = OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(path)?;
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(log_out)),
        )
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    init_logging(&args.log_file)?;
    info!(?config, "starting");

    let mut terminal = setup_terminal()?;
    let result = run_interactive(config, &mut terminal);
    cleanup_terminal()?;
    result
}

fn run_interactive(
    config: GameConfig,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> anyhow::Result<()> {
    let appearance = ClassicAppearance;
    let (completed_tx, completed_rx) = mpsc::channel::<bool>();
    let mut model = GameModel::new(config, EventLog::new());
    model.start();

    let mut error: Option<String> = None;
    let opening = model.delegate_mut().drain();
    let mut last_events = opening.len();
    let mut highlights = highlighted_cells(&opening);

    loop {
        model.tick(Instant::now());

        match handle_input()? {
            ConsoleInput::Quit => break,
            ConsoleInput::UserAction(UserAction::Restart) => {
                model.start();
                error = None;
            }
            ConsoleInput::UserAction(UserAction::Move(direction)) => {
                if model.status() == GameStatus::Playing {
                    let tx = completed_tx.clone();
                    let completion: MoveCompletion = Box::new(move |changed| {
                        let _ = tx.send(changed);
                    });
                    error = model
                        .queue_move(direction, completion, Instant::now())
                        .err()
                        .map(|e| e.to_string());
                }
            }
            ConsoleInput::Timeout | ConsoleInput::Unknown => {}
        }

        let blocked = completed_rx.try_iter().filter(|changed| !changed).count();
        if blocked > 0 {
            tracing::debug!(blocked, "moves that changed nothing");
        }

        let events = model.delegate_mut().drain();
        if !events.is_empty() {
            last_events = events.len();
            highlights = highlighted_cells(&events);
        }

        let mut to_render = GameRenderState::from_model(&model);
        to_render.error = error.clone();
        to_render.last_events = last_events;
        to_render.highlights = highlights.clone();
        render_game(terminal, &appearance, &to_render)?;
    }

    info!(score = model.score(), "quit");
    Ok(())
}
