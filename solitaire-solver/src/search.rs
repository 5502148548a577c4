//! Recursive depth-first search over the peg solitaire game tree.
//!
//! Every explored node owns an independent copy of the board (the
//! board is `Copy`), so sibling branches never observe each other's
//! mutations. Deduplication works on 128-bit digests of board states:
//! before expanding a node, the engine checks whether any of the 8
//! symmetry variations of the new state was already visited.
//!
//! The recursion depth is bounded by the stone count (at most 31 plies
//! from the standard start), so the call stack is not a concern for
//! this board. The per-node state is small enough that switching to an
//! explicit frame stack would be a local change to `explore`.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use solitaire_core::{Board, Move};

use crate::movegen::MoveGenerator;
use crate::reporter::Reporter;
use crate::stats::SearchStats;

/// Tunables for one search run.
pub struct SearchConfig {
    /// Terminal losses with fewer stones than this are reported.
    pub report_threshold: u32,
    /// When false, the visited-set check is bypassed entirely and
    /// every branch is explored.
    pub symmetry_pruning: bool,
    /// Seconds between progress log lines.
    pub log_interval_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            report_threshold: 3,
            symmetry_pruning: true,
            log_interval_secs: 5,
        }
    }
}

/// Exhaustive depth-first driver.
///
/// Counters and the visited set live here rather than in globals, so
/// independent searches (tests in particular) never cross-contaminate.
pub struct SearchEngine<R: Reporter> {
    pub config: SearchConfig,
    /// Digests of every visited state and its symmetry variations.
    /// Grows monotonically for the life of the run; unbounded memory
    /// is the accepted cost of exhaustive search.
    pub visited: HashSet<u128>,
    pub stats: SearchStats,
    pub reporter: R,
}

impl<R: Reporter> SearchEngine<R> {
    pub fn new(config: SearchConfig, reporter: R) -> Self {
        Self {
            config,
            visited: HashSet::new(),
            stats: SearchStats::new(),
            reporter,
        }
    }

    /// Explore the full game tree below `board`.
    ///
    /// `running` is polled at every node; clearing it makes the whole
    /// recursion unwind without reporting completion.
    pub fn run(&mut self, board: &Board, running: &AtomicBool) {
        let mut line = Vec::new();
        let mut gen = MoveGenerator::new();
        while let Some(mv) = gen.next(board) {
            self.explore(board, mv, &mut line, running);
        }
        if running.load(Ordering::SeqCst) {
            self.reporter.on_finished(&self.stats);
        }
    }

    /// Apply `mv` to a copy of `board` and classify the result:
    /// symmetry duplicate, win, terminal loss, or ongoing (recurse).
    fn explore(&mut self, board: &Board, mv: Move, line: &mut Vec<Move>, running: &AtomicBool) {
        if !running.load(Ordering::SeqCst) {
            return;
        }
        if self.stats.should_log(self.config.log_interval_secs) {
            self.stats.log_progress(self.visited.len());
        }

        let mut next = *board;
        self.stats.iterations += 1;
        next.apply(mv);

        if self.config.symmetry_pruning {
            let digests = next.all_digests();
            if digests.iter().any(|d| self.visited.contains(d)) {
                self.stats.skipped_symmetry += 1;
                return;
            }
            // Record the whole equivalence class, so any later
            // orientation of this state is recognized as visited.
            self.visited.extend(digests);
        }

        line.push(mv);
        self.stats.note_depth(line.len());

        if next.is_won() {
            self.stats.record_score(1);
            self.reporter.on_win(line);
            line.pop();
            return;
        }

        let mut gen = MoveGenerator::new();
        match gen.next(&next) {
            None => {
                // Terminal loss: stones remain but nothing can jump.
                let remaining = next.stone_count();
                self.stats.games_over += 1;
                self.stats.record_score(remaining);
                if remaining < self.config.report_threshold {
                    self.reporter.on_game_over(&next, remaining);
                }
            }
            Some(first) => {
                self.explore(&next, first, line, running);
                while let Some(follow_up) = gen.next(&next) {
                    self.explore(&next, follow_up, line, running);
                }
            }
        }
        line.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::AtomicBool;

    use solitaire_core::{Cell, Coord};

    /// Captures events for assertions.
    #[derive(Default)]
    struct RecordingReporter {
        wins: Vec<Vec<Move>>,
        game_overs: Vec<u32>,
        finished: bool,
    }

    impl Reporter for RecordingReporter {
        fn on_win(&mut self, line: &[Move]) {
            self.wins.push(line.to_vec());
        }
        fn on_game_over(&mut self, _board: &Board, remaining: u32) {
            self.game_overs.push(remaining);
        }
        fn on_finished(&mut self, _stats: &SearchStats) {
            self.finished = true;
        }
    }

    fn board_with_stones(stones: &[(i8, i8)]) -> Board {
        let mut board = Board::cleared();
        for &(row, col) in stones {
            board.set(Coord::new(row, col), Cell::Stone);
        }
        board
    }

    fn run_search(board: &Board, config: SearchConfig) -> SearchEngine<RecordingReporter> {
        let mut engine = SearchEngine::new(config, RecordingReporter::default());
        let running = AtomicBool::new(true);
        engine.run(board, &running);
        engine
    }

    #[test]
    fn test_two_stones_in_a_row_both_jumps_win() {
        let board = board_with_stones(&[(0, 1), (0, 2)]);
        let engine = run_search(&board, SearchConfig::default());

        // Either stone can jump the other; both results are won.
        assert_eq!(engine.stats.iterations, 2);
        assert_eq!(engine.stats.wins(), 2);
        assert_eq!(engine.stats.games_over, 0);
        assert_eq!(engine.stats.score_histogram.get(&1), Some(&2));
        assert_eq!(engine.reporter.wins.len(), 2);
        for line in &engine.reporter.wins {
            assert_eq!(line.len(), 1);
        }
        assert!(engine.reporter.finished);
    }

    #[test]
    fn test_win_line_replays_to_won_board() {
        let start = board_with_stones(&[(0, 1), (0, 2)]);
        let engine = run_search(&start, SearchConfig::default());

        for line in &engine.reporter.wins {
            let mut board = start;
            for mv in line {
                board.apply(*mv);
            }
            assert!(board.is_won());
        }
    }

    #[test]
    fn test_terminal_losses_recorded_and_reported() {
        // Both first jumps strand two stones that cannot reach each
        // other.
        let board = board_with_stones(&[(0, 0), (0, 1), (3, 0)]);
        let engine = run_search(&board, SearchConfig::default());

        assert_eq!(engine.stats.iterations, 2);
        assert_eq!(engine.stats.wins(), 0);
        assert_eq!(engine.stats.games_over, 2);
        assert_eq!(engine.stats.score_histogram.get(&2), Some(&2));
        // Threshold 3 covers 2-stone losses.
        assert_eq!(engine.reporter.game_overs, vec![2, 2]);
    }

    #[test]
    fn test_report_threshold_silences_game_overs() {
        let board = board_with_stones(&[(0, 0), (0, 1), (3, 0)]);
        let config = SearchConfig {
            report_threshold: 1,
            ..Default::default()
        };
        let engine = run_search(&board, config);

        // Histogram still records the losses, only reporting is muted.
        assert_eq!(engine.stats.games_over, 2);
        assert_eq!(engine.stats.score_histogram.get(&2), Some(&2));
        assert!(engine.reporter.game_overs.is_empty());
    }

    #[test]
    fn test_symmetry_pruning_skips_mirrored_branches() {
        // Two stone pairs mirrored around the center: the mirrored
        // half of the tree collapses onto the first half.
        let board = board_with_stones(&[(0, -2), (0, -1), (0, 1), (0, 2)]);

        let pruned = run_search(&board, SearchConfig::default());
        let unpruned = run_search(
            &board,
            SearchConfig {
                symmetry_pruning: false,
                ..Default::default()
            },
        );

        assert!(pruned.stats.skipped_symmetry > 0);
        assert_eq!(unpruned.stats.skipped_symmetry, 0);
        assert!(unpruned.stats.iterations > pruned.stats.iterations);

        // Pruning discards duplicate work, not outcomes: no winning
        // line exists here either way.
        assert_eq!(pruned.stats.wins(), 0);
        assert_eq!(unpruned.stats.wins(), 0);

        // Exact counts for this position are stable: 4 first moves,
        // each followed by 2 terminal continuations.
        assert_eq!(unpruned.stats.iterations, 12);
        assert_eq!(unpruned.stats.games_over, 8);
        assert_eq!(pruned.stats.iterations, 8);
        assert_eq!(pruned.stats.games_over, 3);
        assert_eq!(pruned.stats.skipped_symmetry, 3);
    }

    /// Orientation-independent identity of a play line: the sequence
    /// of minimum class digests of the boards it passes through. Two
    /// lines related by a single symmetry transform visit boards that
    /// are transforms of each other at every ply, so they share a
    /// signature.
    fn line_signature(start: &Board, line: &[Move]) -> Vec<u128> {
        let mut board = *start;
        let mut signature = Vec::with_capacity(line.len());
        for mv in line {
            board.apply(*mv);
            let class_digest = board.all_digests().into_iter().min().unwrap();
            signature.push(class_digest);
        }
        signature
    }

    #[test]
    fn test_pruning_preserves_winning_lines_up_to_symmetry() {
        // A 2x2 block is invariant under the diagonal reflection, so
        // half of the 8 first jumps collapse onto the other half, and
        // the position is solvable down to one stone.
        let board = board_with_stones(&[(0, 0), (0, 1), (1, 0), (1, 1)]);

        let pruned = run_search(&board, SearchConfig::default());
        let unpruned = run_search(
            &board,
            SearchConfig {
                symmetry_pruning: false,
                ..Default::default()
            },
        );

        assert!(pruned.stats.skipped_symmetry > 0);
        assert!(unpruned.stats.iterations > pruned.stats.iterations);

        // Both runs find wins; the exhaustive run also revisits
        // duplicates, so it can only find more.
        assert!(pruned.stats.wins() > 0);
        assert!(unpruned.stats.wins() >= pruned.stats.wins());

        let pruned_lines: HashSet<Vec<u128>> = pruned
            .reporter
            .wins
            .iter()
            .map(|line| line_signature(&board, line))
            .collect();
        let unpruned_lines: HashSet<Vec<u128>> = unpruned
            .reporter
            .wins
            .iter()
            .map(|line| line_signature(&board, line))
            .collect();

        // Every winning line the deduplicated run keeps also occurs,
        // ply for ply, in the exhaustive run.
        assert!(pruned_lines.is_subset(&unpruned_lines));

        // Dedup drops only duplicate work, not solutions: the two
        // runs reach exactly the same won end positions up to
        // symmetry. (Line-for-line equality cannot hold in the other
        // direction, because the visited set also collapses
        // transpositions: the same state reached through a different
        // move order.)
        let pruned_finals: HashSet<u128> = pruned_lines
            .iter()
            .map(|sig| *sig.last().unwrap())
            .collect();
        let unpruned_finals: HashSet<u128> = unpruned_lines
            .iter()
            .map(|sig| *sig.last().unwrap())
            .collect();
        assert_eq!(pruned_finals, unpruned_finals);
    }

    #[test]
    fn test_cleared_running_flag_stops_immediately() {
        let mut engine = SearchEngine::new(SearchConfig::default(), RecordingReporter::default());
        let running = AtomicBool::new(false);
        engine.run(&Board::new(), &running);

        assert_eq!(engine.stats.iterations, 0);
        assert!(!engine.reporter.finished);
    }

    #[test]
    fn test_independent_runs_share_nothing() {
        let board = board_with_stones(&[(0, 1), (0, 2)]);
        let first = run_search(&board, SearchConfig::default());
        let second = run_search(&board, SearchConfig::default());

        // A fresh engine starts with an empty visited set; nothing
        // from the first run bleeds over.
        assert_eq!(first.stats.iterations, second.stats.iterations);
        assert_eq!(first.stats.wins(), second.stats.wins());
    }

    #[test]
    #[ignore] // Long-running and memory-hungry - run manually with: cargo test --release -- --ignored
    fn test_full_search_finds_wins() {
        use crate::reporter::NullReporter;

        let mut engine = SearchEngine::new(SearchConfig::default(), NullReporter);
        let running = AtomicBool::new(true);
        engine.run(&Board::new(), &running);

        // The 33-hole board with center start is known solvable.
        assert!(engine.stats.wins() > 0);
        assert!(engine.stats.score_histogram.contains_key(&1));
        assert!(engine.stats.skipped_symmetry > 0);
    }
}
