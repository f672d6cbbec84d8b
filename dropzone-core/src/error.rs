use crate::grid::{Cell, PieceKind};
use crate::kanban::{CardId, ColumnId};

/// Reasons a raw drag or drop payload could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("payload is not an object")]
    NotAnObject,

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` is not {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("unknown piece type `{0}`")]
    UnknownPieceType(String),

    #[error("cell ({row}, {col}) is off the board")]
    OutOfBounds { row: i64, col: i64 },

    #[error("source payload is neither a piece nor a card")]
    UnknownSource,

    #[error("dropped outside every target")]
    NoTarget,
}

/// Reasons the piece reducer refuses a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejection {
    #[error("no piece at {0}")]
    NoPieceAtSource(Cell),

    #[error("{kind} cannot move from {from} to {to}")]
    IllegalMove { kind: PieceKind, from: Cell, to: Cell },
}

/// Reasons the reorder engine refuses a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReorderRejection {
    #[error("no column with id {0}")]
    UnknownColumn(ColumnId),
}

/// Reasons a set of pieces or a kanban board cannot be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("more than one piece on {0}")]
    SharedCell(Cell),

    #[error("duplicate column id {0}")]
    DuplicateColumn(ColumnId),

    #[error("duplicate card id {0}")]
    DuplicateCard(CardId),

    #[error("card id -1 is reserved for end-of-column drops")]
    ReservedCardId,
}
