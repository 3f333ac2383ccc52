use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use grid_snake::config::{GameConfig, load_config};
use grid_snake::game::{Event, GameState};
use grid_snake::input::{Direction, parse_move_script};
use grid_snake::logging;
use grid_snake::snake::Position;
use serde::Serialize;

/// Headless Snake simulator: plays a seeded game and prints one JSON line per tick.
#[derive(Debug, Parser)]
#[command(name = "snake-sim", version)]
struct Cli {
    /// JSON file with `width`, `height`, `init_length`, `wrap` and `seed`.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<u16>,

    #[arg(long)]
    height: Option<u16>,

    /// Initial snake length.
    #[arg(long)]
    length: Option<usize>,

    /// Wrap around the grid edges instead of dying on them.
    #[arg(long)]
    wrap: bool,

    #[arg(long)]
    seed: Option<u64>,

    /// Per-tick turns: `U`, `D`, `L`, `R`, or `.` to keep going.
    #[arg(long)]
    moves: Option<String>,

    /// Ticks to run after the move script is exhausted.
    #[arg(long, default_value_t = 32)]
    ticks: usize,

    /// Raise log verbosity (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Serialize)]
struct TickReport {
    tick: u64,
    event: Event,
    direction: Direction,
    head: Position,
    length: usize,
    score: u32,
    food: Option<Position>,
}

impl TickReport {
    fn new(state: &GameState, event: Event) -> Self {
        Self {
            tick: state.tick_count(),
            event,
            direction: state.direction(),
            head: state.snake().head(),
            length: state.snake().len(),
            score: state.score(),
            food: state.food(),
        }
    }
}

fn main() -> io::Result<ExitCode> {
    let cli = Cli::parse();
    if let Err(error) = logging::init(logging::level_for_verbosity(cli.verbose)) {
        eprintln!("Failed to install logger: {error}");
    }

    let config = resolve_config(&cli)?;
    let moves = match cli.moves.as_deref().map(parse_move_script).transpose() {
        Ok(moves) => moves.unwrap_or_default(),
        Err(error) => {
            eprintln!("Invalid move script: {error}");
            return Ok(ExitCode::from(2));
        }
    };

    let state = match GameState::new_game(&config) {
        Ok(state) => state,
        Err(error) => {
            eprintln!("Invalid configuration: {error}");
            return Ok(ExitCode::from(2));
        }
    };

    let final_state = run(state.start(), &moves, cli.ticks)?;
    log::info!(
        "finished after {} ticks with score {} ({:?})",
        final_state.tick_count(),
        final_state.score(),
        final_state.status(),
    );

    Ok(ExitCode::SUCCESS)
}

/// Merges the optional config file with command-line overrides.
fn resolve_config(cli: &Cli) -> io::Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };

    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(length) = cli.length {
        config.init_length = length;
    }
    if cli.wrap {
        config.wrap = true;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    Ok(config)
}

fn run(
    mut state: GameState,
    moves: &[Option<Direction>],
    extra_ticks: usize,
) -> io::Result<GameState> {
    let mut stdout = io::stdout().lock();
    let inputs = moves
        .iter()
        .copied()
        .chain(std::iter::repeat(None).take(extra_ticks));

    for input in inputs {
        let (next, event) = state.step(input);
        state = next;

        serde_json::to_writer(&mut stdout, &TickReport::new(&state, event))?;
        writeln!(stdout)?;

        if matches!(event, Event::Dead | Event::NoOp) {
            break;
        }
    }

    stdout.flush()?;
    Ok(state)
}
