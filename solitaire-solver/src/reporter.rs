//! Reporting of search events.
//!
//! The engine raises three events: a winning line, a terminal loss
//! below the reporting threshold, and search completion. Reporters
//! render them; they hold no search logic.

use solitaire_core::{Board, Move};

use crate::stats::SearchStats;

/// Consumer of search events.
pub trait Reporter {
    /// A winning line was found; `line` is the full move sequence
    /// from the initial position.
    fn on_win(&mut self, line: &[Move]);

    /// A terminal loss with `remaining` stones, only raised when
    /// `remaining` is under the configured threshold.
    fn on_game_over(&mut self, board: &Board, remaining: u32);

    /// The whole tree was explored.
    fn on_finished(&mut self, stats: &SearchStats);
}

/// Prints wins as board-by-board replays and near-miss losses as
/// single boards.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn on_win(&mut self, line: &[Move]) {
        println!("\n============= WIN ! =============");
        for (ply, mv) in line.iter().enumerate() {
            println!("{:2}. {}", ply + 1, mv);
        }

        // Replay from the start so the line is human-checkable.
        let mut board = Board::new();
        println!("\n{}", board);
        for mv in line {
            board.apply(*mv);
            println!("{}", board);
        }
    }

    fn on_game_over(&mut self, board: &Board, remaining: u32) {
        println!("\nGame over: {} stones remaining", remaining);
        println!("{}", board);
    }

    fn on_finished(&mut self, stats: &SearchStats) {
        println!("\n==========================");
        println!("Search complete!");
        println!("==========================");
        stats.print_summary();
    }
}

/// Discards every event. Used where only the counters matter.
#[derive(Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn on_win(&mut self, _line: &[Move]) {}
    fn on_game_over(&mut self, _board: &Board, _remaining: u32) {}
    fn on_finished(&mut self, _stats: &SearchStats) {}
}
