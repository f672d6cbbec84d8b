//! Rule engine behind drag-and-drop rearrangement of chess pieces and
//! kanban cards.
//!
//! # Data flow
//!
//! ```text
//! drop event (untyped data)
//!     -> payload::decode_drop        typed DropEvent, or a PayloadError
//!     -> grid::try_drop              next piece set, or a MoveRejection
//!      | kanban::try_move_card       next board, or a ReorderRejection
//!     -> caller commits the new value
//! ```
//!
//! Every engine function is pure: it borrows the current state and returns
//! a freshly built next state. [`DropSession`] is a small container that
//! commits those values in order, one drop at a time.
//!
//! # Modules
//!
//! - [`grid`]: cells, pieces, `can_move`, `apply_drop`
//! - [`kanban`]: cards, columns, `move_card`
//! - [`payload`]: decoding of drag source / drop target data
//! - [`hover`]: per-element drag feedback state
//! - [`session`]: ordered application of drops, plus the hover state of the
//!   gesture in progress

pub mod error;
pub mod grid;
pub mod hover;
pub mod kanban;
pub mod payload;
pub mod session;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{BoardError, MoveRejection, PayloadError, ReorderRejection};
pub use grid::{
    apply_drop, can_move, starting_pieces, validate_pieces, Cell, Piece, PieceKind, BOARD_SIZE,
};
pub use hover::{CardHover, DragPhase, HoverMap, SquareHover};
pub use kanban::{
    move_card, Anchor, Card, CardDestination, CardId, Column, ColumnId, KanbanBoard, END_OF_COLUMN,
};
pub use payload::{decode_drop, DropEvent, PieceSource};
pub use session::{DropOutcome, DropSession, Rejection};
