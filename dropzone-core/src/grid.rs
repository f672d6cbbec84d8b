//! Grid pieces: move legality and the piece-set reducer.
//!
//! # Coordinates
//!
//! ```text
//!        col 0 1 2 3 4 5 6 7
//!   row 0    . # . # . # . #
//!   row 1    # . # . # . P .     P = pawn (1, 6) in the starting position
//!   row 2    . # . # . # . #
//!   row 3    # . K . # . # .     K = king (3, 2)
//!   ...
//!   row 7    # . # . # . # .
//! ```
//!
//! Pawns advance toward row 0, one row per move.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, MoveRejection};

/// Number of rows and columns on the board.
pub const BOARD_SIZE: u8 = 8;

/// A square on the 8x8 board.
///
/// Serialized as a `[row, col]` pair, the shape the drag layer attaches to
/// pieces and squares.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; 2]", into = "[u8; 2]")]
pub struct Cell {
    row: u8,
    col: u8,
}

impl Cell {
    /// Create a cell, or `None` if either coordinate is off the board.
    #[inline]
    pub fn new(row: u8, col: u8) -> Option<Cell> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Cell { row, col })
        } else {
            None
        }
    }

    /// Create a cell from coordinates already known to be in range.
    #[inline]
    pub fn from_row_col(row: u8, col: u8) -> Cell {
        debug_assert!(row < BOARD_SIZE && col < BOARD_SIZE);
        Cell { row, col }
    }

    #[inline]
    pub fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub fn col(self) -> u8 {
        self.col
    }

    /// Dark squares are those whose coordinates sum to an odd number.
    #[inline]
    pub fn is_dark(self) -> bool {
        (self.row + self.col) % 2 == 1
    }

    /// Absolute (row, column) distance to another cell.
    #[inline]
    pub fn distance(self, other: Cell) -> (u8, u8) {
        (self.row.abs_diff(other.row), self.col.abs_diff(other.col))
    }

    /// Iterate over all 64 cells in row-major order.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Cell { row, col }))
    }
}

impl TryFrom<[u8; 2]> for Cell {
    type Error = String;

    fn try_from([row, col]: [u8; 2]) -> Result<Self, Self::Error> {
        Cell::new(row, col).ok_or_else(|| format!("cell ({row}, {col}) is off the board"))
    }
}

impl From<Cell> for [u8; 2] {
    fn from(cell: Cell) -> Self {
        [cell.row, cell.col]
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The kinds of piece the board knows how to move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    King,
    Pawn,
}

impl PieceKind {
    /// Parse the wire name (`"king"` / `"pawn"`).
    pub fn parse(name: &str) -> Option<PieceKind> {
        match name {
            "king" => Some(PieceKind::King),
            "pawn" => Some(PieceKind::Pawn),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::King => "king",
            PieceKind::Pawn => "pawn",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A piece standing on the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub location: Cell,
}

impl Piece {
    pub fn new(kind: PieceKind, location: Cell) -> Piece {
        Piece { kind, location }
    }
}

/// The tutorial starting position: a king at (3, 2) and a pawn at (1, 6).
pub fn starting_pieces() -> Vec<Piece> {
    vec![
        Piece::new(PieceKind::King, Cell::from_row_col(3, 2)),
        Piece::new(PieceKind::Pawn, Cell::from_row_col(1, 6)),
    ]
}

/// Find the piece standing on `cell`, if any.
pub fn piece_at(pieces: &[Piece], cell: Cell) -> Option<&Piece> {
    pieces.iter().find(|piece| piece.location == cell)
}

/// Check that no two pieces share a square.
pub fn validate_pieces(pieces: &[Piece]) -> Result<(), BoardError> {
    let mut occupied = HashSet::with_capacity(pieces.len());
    for piece in pieces {
        if !occupied.insert(piece.location) {
            return Err(BoardError::SharedCell(piece.location));
        }
    }
    Ok(())
}

/// Check whether a piece of `kind` may move from `origin` to `destination`.
///
/// Captures are not modelled, so an occupied destination is never legal.
/// Staying in place is not a move either.
pub fn can_move(origin: Cell, destination: Cell, kind: PieceKind, occupancy: &[Piece]) -> bool {
    if origin == destination || piece_at(occupancy, destination).is_some() {
        return false;
    }

    let (row_dist, col_dist) = origin.distance(destination);
    match kind {
        PieceKind::King => row_dist <= 1 && col_dist <= 1,
        PieceKind::Pawn => {
            col_dist == 0 && i16::from(destination.row) - i16::from(origin.row) == -1
        }
    }
}

/// Resolve a drop of the piece on `source` onto `destination`.
///
/// Returns the next piece set, or the reason the drop is refused. The moved
/// piece keeps its kind and its slot in the sequence.
pub fn try_drop(
    pieces: &[Piece],
    source: Cell,
    destination: Cell,
    kind: PieceKind,
) -> Result<Vec<Piece>, MoveRejection> {
    if piece_at(pieces, source).is_none() {
        return Err(MoveRejection::NoPieceAtSource(source));
    }
    if !can_move(source, destination, kind, pieces) {
        return Err(MoveRejection::IllegalMove {
            kind,
            from: source,
            to: destination,
        });
    }

    Ok(pieces
        .iter()
        .map(|piece| {
            if piece.location == source {
                Piece::new(piece.kind, destination)
            } else {
                *piece
            }
        })
        .collect())
}

/// Apply a drop, returning the unchanged piece set when it is refused.
pub fn apply_drop(
    pieces: &[Piece],
    source: Cell,
    destination: Cell,
    kind: PieceKind,
) -> Vec<Piece> {
    try_drop(pieces, source, destination, kind).unwrap_or_else(|_| pieces.to_vec())
}
