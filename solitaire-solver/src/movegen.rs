//! Lazy move generator for memory-efficient search.
//!
//! Instead of materializing a move list at every node, this iterator
//! produces moves one at a time, tracking a cursor so it resumes where
//! it left off. It yields exactly the moves of
//! [`Board::legal_moves`], in the same order: empty cells row-major,
//! directions in `Direction::ALL` order.

use solitaire_core::{Board, Cell, Coord, Direction, Move, BOARD_RADIUS};

/// Cursor over the legal jumps of one fixed position.
pub struct MoveGenerator {
    row: i8,
    col: i8,
    dir_idx: u8,
}

impl MoveGenerator {
    pub fn new() -> Self {
        Self {
            row: -BOARD_RADIUS,
            col: -BOARD_RADIUS,
            dir_idx: 0,
        }
    }

    /// Get the next legal move, or None if exhausted.
    ///
    /// The board must be the same position across calls; the cursor
    /// has no way to notice mutation.
    pub fn next(&mut self, board: &Board) -> Option<Move> {
        while self.row <= BOARD_RADIUS {
            let destination = Coord::new(self.row, self.col);

            if board.cell(destination) == Cell::Empty {
                while self.dir_idx < 4 {
                    let direction = Direction::ALL[self.dir_idx as usize];
                    self.dir_idx += 1;

                    let captured = destination.step(direction);
                    if !board.has_stone(captured) {
                        continue;
                    }
                    let origin = captured.step(direction);
                    if !board.has_stone(origin) {
                        continue;
                    }
                    return Some(Move {
                        origin,
                        captured,
                        destination,
                        direction,
                    });
                }
            }

            // Advance to the next cell, row-major.
            self.dir_idx = 0;
            if self.col < BOARD_RADIUS {
                self.col += 1;
            } else {
                self.col = -BOARD_RADIUS;
                self.row += 1;
            }
        }
        None
    }
}

impl Default for MoveGenerator {
    fn default() -> Self {
        Self::new()
    }
}
