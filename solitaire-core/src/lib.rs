//! Peg solitaire game logic for the cross-shaped 33-hole board.
//!
//! # Board Geometry
//!
//! ```text
//! Coordinates are (row, col) pairs in [-3, 3]. A cell is out of the
//! board when both |row| >= 2 and |col| >= 2, which carves the four
//! corner 2x2 blocks out of the 7x7 square:
//!
//!      · · ·
//!      · · ·
//!    · · · · · · ·
//!    · · · o · · ·      o = the single empty start cell (0,0)
//!    · · · · · · ·
//!      · · ·
//!      · · ·
//! ```
//!
//! The starting position holds 32 stones with only the center empty.
//! A move jumps a stone over an adjacent stone into an empty cell two
//! steps away, removing the jumped stone. One remaining stone is a won
//! position.
//!
//! # Symmetry
//!
//! The cross maps onto itself under the dihedral group of order 8
//! (4 rotations x reflection). [`Board::all_digests`] fingerprints a
//! position together with its 7 variations so that search code can
//! recognize states already reached in any orientation.

use std::fmt;

use xxhash_rust::xxh3::xxh3_128;

/// Half-width of the square that bounds the cross.
pub const BOARD_RADIUS: i8 = 3;

/// Both |row| and |col| at or beyond this lie in a carved-out corner.
const CORNER_CUTOFF: i8 = 2;

/// Side length of the bounding grid.
const GRID: usize = (2 * BOARD_RADIUS as usize) + 1;

/// Number of playable cells on the cross.
pub const CELLS: usize = 33;

/// A (row, col) pair. Pure value type; two coordinates are equal iff
/// both components match.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    #[inline]
    pub const fn new(row: i8, col: i8) -> Coord {
        Coord { row, col }
    }

    /// The coordinate one step away in the given direction.
    #[inline]
    pub fn step(self, direction: Direction) -> Coord {
        let (dr, dc) = direction.offset();
        Coord::new(self.row + dr, self.col + dc)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// One of the four cardinal jump directions.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Fixed enumeration order used by move generation.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Unit displacement vector (row delta, col delta).
    #[inline]
    pub const fn offset(self) -> (i8, i8) {
        match self {
            Direction::North => (1, 0),
            Direction::South => (-1, 0),
            Direction::East => (0, -1),
            Direction::West => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
        };
        write!(f, "{}", letter)
    }
}

/// State of a single grid cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Cell {
    OutOfBoard = 0,
    Stone = 1,
    Empty = 2,
}

/// A candidate jump.
///
/// `origin` holds the stone that jumps, `captured` the adjacent stone
/// it jumps over, and `destination` the empty cell it lands on.
/// Geometrically `destination + direction = captured` and
/// `captured + direction = origin`: move generation scans empty cells
/// and walks backward, so the origin is the farthest cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Move {
    pub origin: Coord,
    pub captured: Coord,
    pub destination: Coord,
    pub direction: Direction,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} over {} to {} [{}]",
            self.origin, self.captured, self.destination, self.direction
        )
    }
}

/// A full board state: every cell of the bounding 7x7 grid mapped to a
/// [`Cell`]. Carved-out corner cells are permanently `OutOfBoard`.
///
/// `Board` is `Copy`; the search clones one per explored branch so
/// sibling branches never observe each other's mutations.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; GRID * GRID],
}

impl Board {
    /// The canonical starting position: stones everywhere on the
    /// cross except the center.
    pub fn new() -> Board {
        let mut board = Board::cleared();
        for coord in Board::coords() {
            board.set(coord, Cell::Stone);
        }
        board.set(Coord::new(0, 0), Cell::Empty);
        board
    }

    /// A board with every playable cell empty. Useful for building
    /// specific positions in tests and tooling.
    pub fn cleared() -> Board {
        let mut board = Board {
            cells: [Cell::OutOfBoard; GRID * GRID],
        };
        for coord in Board::coords() {
            board.set(coord, Cell::Empty);
        }
        board
    }

    /// Whether the coordinate lies on the playable cross.
    #[inline]
    pub fn in_board(coord: Coord) -> bool {
        if coord.row.abs() > BOARD_RADIUS || coord.col.abs() > BOARD_RADIUS {
            return false;
        }
        !(coord.row.abs() >= CORNER_CUTOFF && coord.col.abs() >= CORNER_CUTOFF)
    }

    /// All playable coordinates in row-major order. This order is
    /// load-bearing: move generation and digests both rely on it for
    /// determinism.
    pub fn coords() -> impl Iterator<Item = Coord> {
        (-BOARD_RADIUS..=BOARD_RADIUS).flat_map(|row| {
            (-BOARD_RADIUS..=BOARD_RADIUS)
                .map(move |col| Coord::new(row, col))
                .filter(|&coord| Board::in_board(coord))
        })
    }

    #[inline]
    fn grid_index(row: i8, col: i8) -> usize {
        debug_assert!(row.abs() <= BOARD_RADIUS && col.abs() <= BOARD_RADIUS);
        (row + BOARD_RADIUS) as usize * GRID + (col + BOARD_RADIUS) as usize
    }

    /// Cell state at a coordinate; `OutOfBoard` for anything beyond
    /// the bounding grid.
    #[inline]
    pub fn cell(&self, coord: Coord) -> Cell {
        if coord.row.abs() > BOARD_RADIUS || coord.col.abs() > BOARD_RADIUS {
            return Cell::OutOfBoard;
        }
        self.cells[Self::grid_index(coord.row, coord.col)]
    }

    /// Overwrite a playable cell. Panics in debug builds for
    /// off-board coordinates.
    #[inline]
    pub fn set(&mut self, coord: Coord, cell: Cell) {
        debug_assert!(Board::in_board(coord), "set() outside the cross: {}", coord);
        self.cells[Self::grid_index(coord.row, coord.col)] = cell;
    }

    /// Whether the cell holds a stone; false off-board.
    #[inline]
    pub fn has_stone(&self, coord: Coord) -> bool {
        self.cell(coord) == Cell::Stone
    }

    /// Count of stones on the board.
    pub fn stone_count(&self) -> u32 {
        self.cells.iter().filter(|&&c| c == Cell::Stone).count() as u32
    }

    /// Win condition: a single remaining stone.
    #[inline]
    pub fn is_won(&self) -> bool {
        self.stone_count() == 1
    }

    /// All empty playable cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        Board::coords().filter(move |&coord| self.cell(coord) == Cell::Empty)
    }

    /// Apply a jump: origin and captured become empty, the destination
    /// gains the stone.
    ///
    /// Unchecked by contract: callers must pass moves produced by
    /// legal-move enumeration. Illegal input is a precondition failure
    /// caught by debug assertions, not a recoverable error.
    pub fn apply(&mut self, mv: Move) {
        debug_assert!(self.has_stone(mv.origin), "no stone at origin {}", mv.origin);
        debug_assert!(
            self.has_stone(mv.captured),
            "no stone at captured {}",
            mv.captured
        );
        debug_assert!(
            self.cell(mv.destination) == Cell::Empty,
            "destination not empty: {}",
            mv.destination
        );
        self.set(mv.origin, Cell::Empty);
        self.set(mv.captured, Cell::Empty);
        self.set(mv.destination, Cell::Stone);
    }

    /// Enumerate every legal jump.
    ///
    /// Scans empty cells in row-major order; for each, walks backward
    /// through the four directions in [`Direction::ALL`] order: one
    /// step back must hold the stone to capture, two steps back the
    /// stone that jumps. The resulting order is deterministic, which
    /// keeps run statistics and the first-discovered winning line
    /// reproducible. An empty result is a valid terminal state.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for destination in self.empty_cells() {
            for direction in Direction::ALL {
                let captured = destination.step(direction);
                if !self.has_stone(captured) {
                    continue;
                }
                let origin = captured.step(direction);
                if !self.has_stone(origin) {
                    continue;
                }
                moves.push(Move {
                    origin,
                    captured,
                    destination,
                    direction,
                });
            }
        }
        moves
    }

    // ========== Symmetry & Digests ==========

    /// A new board rotated by 90 degrees: the cell at (-c, r) takes
    /// this board's value at (r, c). Four applications are the
    /// identity.
    pub fn rotate90(&self) -> Board {
        let mut board = Board {
            cells: [Cell::OutOfBoard; GRID * GRID],
        };
        for row in -BOARD_RADIUS..=BOARD_RADIUS {
            for col in -BOARD_RADIUS..=BOARD_RADIUS {
                board.cells[Self::grid_index(-col, row)] =
                    self.cells[Self::grid_index(row, col)];
            }
        }
        board
    }

    /// A new board mirrored across the row axis: the cell at (-r, c)
    /// takes this board's value at (r, c).
    pub fn reflect(&self) -> Board {
        let mut board = Board {
            cells: [Cell::OutOfBoard; GRID * GRID],
        };
        for row in -BOARD_RADIUS..=BOARD_RADIUS {
            for col in -BOARD_RADIUS..=BOARD_RADIUS {
                board.cells[Self::grid_index(-row, col)] =
                    self.cells[Self::grid_index(row, col)];
            }
        }
        board
    }

    /// The 7 non-identity symmetry variations of this board: three
    /// rotations, the reflection, and the reflection rotated once,
    /// twice and three times. Together with `self` they cover the full
    /// order-8 group.
    pub fn variations(&self) -> [Board; 7] {
        let rotate1 = self.rotate90();
        let rotate2 = rotate1.rotate90();
        let rotate3 = rotate2.rotate90();
        let mirrored = self.reflect();
        let mirrored1 = mirrored.rotate90();
        let mirrored2 = mirrored1.rotate90();
        let mirrored3 = mirrored2.rotate90();
        [
            rotate1, rotate2, rotate3, mirrored, mirrored1, mirrored2, mirrored3,
        ]
    }

    /// Stable 128-bit fingerprint of this exact orientation: the 33
    /// playable cells serialized in row-major order and hashed with
    /// xxh3-128.
    pub fn digest(&self) -> u128 {
        let mut bytes = [0u8; CELLS];
        for (slot, coord) in bytes.iter_mut().zip(Board::coords()) {
            *slot = match self.cell(coord) {
                Cell::Stone => b'1',
                _ => b'0',
            };
        }
        xxh3_128(&bytes)
    }

    /// Digests of this board and its 7 variations. As a set this is an
    /// invariant of the symmetry-equivalence class: any two boards
    /// related by a group transform produce the same 8 digests.
    pub fn all_digests(&self) -> [u128; 8] {
        let mut digests = [0u128; 8];
        digests[0] = self.digest();
        for (slot, variation) in digests[1..].iter_mut().zip(self.variations()) {
            *slot = variation.digest();
        }
        digests
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// ASCII rendering: `o` stone, `·` empty slot, blank off-board.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in -BOARD_RADIUS..=BOARD_RADIUS {
            for col in -BOARD_RADIUS..=BOARD_RADIUS {
                let coord = Coord::new(row, col);
                match self.cell(coord) {
                    Cell::Stone => write!(f, "o")?,
                    Cell::Empty => write!(f, "·")?,
                    Cell::OutOfBoard => write!(f, " ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board ({} stones)", self.stone_count())?;
        fmt::Display::fmt(self, f)
    }
}
