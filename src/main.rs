//! Headless autoplay runner (default binary).
//!
//! Plays a seeded game to completion (or a piece limit) by choosing a landing with the
//! engine heuristic and driving the board through ordinary commands. No terminal UI,
//! no clock: every piece is placed as fast as the rules allow.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{debug, info, warn};

use tetris_board::core::{
    Board, BoardConfig, BoardEvent, BoardObserver, PieceProvider, ProgressTracker, SevenBag,
    UniformRandom,
};
use tetris_board::engine::{apply_place, best_placement};
use tetris_board::types::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Randomizer {
    /// Shuffled bags of all seven kinds
    Bag,
    /// Independent uniform draws
    Uniform,
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Play a headless falling-block game with the autoplayer")]
struct Cli {
    /// Board width in cells
    #[arg(long, value_name = "N", default_value_t = DEFAULT_BOARD_WIDTH)]
    width: usize,

    /// Board height in cells
    #[arg(long, value_name = "N", default_value_t = DEFAULT_BOARD_HEIGHT)]
    height: usize,

    /// Seed for the piece randomizer
    #[arg(long, default_value_t = 1)]
    seed: u32,

    /// Stop after this many pieces (0 => play until game over)
    #[arg(long, value_name = "N", default_value_t = 500)]
    pieces: u32,

    #[arg(long, value_enum, default_value_t = Randomizer::Bag)]
    randomizer: Randomizer,

    /// Only log warnings
    #[arg(long)]
    quiet: bool,
}

/// Notification tallies for the summary line
#[derive(Debug, Default)]
struct EventCounts {
    board_changed: u64,
    next_piece: u64,
    locks: u64,
}

impl BoardObserver for EventCounts {
    fn on_event(&mut self, event: &BoardEvent) {
        match event {
            BoardEvent::BoardChanged(_) => self.board_changed += 1,
            BoardEvent::NextPieceChanged(_) => self.next_piece += 1,
            BoardEvent::LinesCompleted(_) => self.locks += 1,
            BoardEvent::GameOver(_) => {}
        }
    }
}

fn provider(randomizer: Randomizer, seed: u32) -> Box<dyn PieceProvider> {
    match randomizer {
        Randomizer::Bag => Box::new(SevenBag::new(seed)),
        Randomizer::Uniform => Box::new(UniformRandom::new(seed)),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(filter)).init();

    let config = BoardConfig::new(cli.width, cli.height)
        .validated()
        .with_context(|| format!("invalid board size {}x{}", cli.width, cli.height))?;

    let mut board = Board::new(config, provider(cli.randomizer, cli.seed));
    let progress = Rc::new(RefCell::new(ProgressTracker::new()));
    let counts = Rc::new(RefCell::new(EventCounts::default()));
    board.subscribe(Box::new(progress.clone()));
    board.subscribe(Box::new(counts.clone()));

    info!(
        "playing on {}x{} board, seed {}, {:?} randomizer",
        config.width, config.height, cli.seed, cli.randomizer
    );
    board.clear();

    let mut placed = 0u32;
    while board.is_running() && (cli.pieces == 0 || placed < cli.pieces) {
        match best_placement(&board) {
            Some(placement) => {
                if let Err(err) = apply_place(&mut board, placement) {
                    debug!("placement {:?} failed ({}), dropping", placement, err.code());
                    board.drop();
                }
            }
            None => {
                warn!("no landing found for {:?}, dropping", board.active());
                board.drop();
            }
        }
        placed += 1;
    }

    let progress = progress.borrow();
    let counts = counts.borrow();
    info!(
        "finished: {} pieces, {} lines, level {}, step interval {}ms, game over: {}",
        progress.pieces_locked(),
        progress.lines(),
        progress.level(),
        progress.step_interval_ms(),
        progress.game_over()
    );
    debug!(
        "events: {} board changes, {} next piece, {} locks",
        counts.board_changed, counts.next_piece, counts.locks
    );

    println!("{}", board.snapshot());
    Ok(())
}
