//! A minimal state container for the two engines.
//!
//! Drops are resolved one at a time against the state committed by the
//! previous drop, never against a snapshot taken when the drag started.

use std::fmt;

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{BoardError, MoveRejection, PayloadError, ReorderRejection};
use crate::grid::{self, Cell, Piece};
use crate::hover::{self, CardHover, DragPhase, HoverMap, SquareHover};
use crate::kanban::{self, CardId, KanbanBoard};
use crate::payload::{self, DropEvent};

/// Why a well-formed drop was refused.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Rejection {
    Move(MoveRejection),
    Reorder(ReorderRejection),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Move(reason) => write!(f, "{reason}"),
            Rejection::Reorder(reason) => write!(f, "{reason}"),
        }
    }
}

impl From<MoveRejection> for Rejection {
    fn from(reason: MoveRejection) -> Self {
        Rejection::Move(reason)
    }
}

impl From<ReorderRejection> for Rejection {
    fn from(reason: ReorderRejection) -> Self {
        Rejection::Reorder(reason)
    }
}

/// Result of dispatching one drop. Only `Applied` changes the state.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DropOutcome {
    Applied,
    Rejected(Rejection),
    Ignored(PayloadError),
}

impl DropOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, DropOutcome::Applied)
    }
}

/// Committed pieces and kanban board, plus the feedback state of the
/// gesture in progress.
#[derive(Clone, Debug, Default)]
pub struct DropSession {
    pieces: Vec<Piece>,
    board: KanbanBoard,
    squares: HoverMap<Cell, SquareHover>,
    cards: HoverMap<CardId, CardHover>,
    dragging: HoverMap<CardId, DragPhase>,
}

impl DropSession {
    /// Start from the given state, refusing pieces that share a square and
    /// boards with repeated ids.
    pub fn new(pieces: Vec<Piece>, board: KanbanBoard) -> Result<DropSession, BoardError> {
        grid::validate_pieces(&pieces)?;
        board.validate()?;
        Ok(DropSession {
            pieces,
            board,
            ..DropSession::default()
        })
    }

    /// The tutorial chessboard next to an empty kanban board.
    pub fn with_starting_pieces() -> DropSession {
        DropSession {
            pieces: grid::starting_pieces(),
            ..DropSession::default()
        }
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn board(&self) -> &KanbanBoard {
        &self.board
    }

    /// Replace the kanban content, e.g. once it has been loaded. An invalid
    /// board leaves the current one in place.
    pub fn load_board(&mut self, board: KanbanBoard) -> Result<(), BoardError> {
        board.validate()?;
        self.board = board;
        self.cards.drop_all();
        self.dragging.drop_all();
        Ok(())
    }

    /// Decode a raw drop and apply it.
    ///
    /// Malformed payloads and refused moves leave the state untouched. Either
    /// way the gesture is over, so all hover feedback is reset.
    pub fn dispatch(&mut self, source: &Value, target: Option<&Value>) -> DropOutcome {
        let outcome = match payload::decode_drop(source, target) {
            Ok(event) => match self.apply(&event) {
                Ok(()) => DropOutcome::Applied,
                Err(reason) => DropOutcome::Rejected(reason),
            },
            Err(err) => {
                debug!(%err, "ignoring drop with malformed payload");
                DropOutcome::Ignored(err)
            }
        };
        self.end_drag();
        outcome
    }

    /// Apply an already decoded drop.
    pub fn apply(&mut self, event: &DropEvent) -> Result<(), Rejection> {
        let result = match event {
            DropEvent::Piece { source, target } => {
                match grid::try_drop(&self.pieces, source.location, *target, source.kind) {
                    Ok(pieces) => {
                        trace!(
                            kind = %source.kind,
                            from = %source.location,
                            to = %target,
                            "piece moved"
                        );
                        self.pieces = pieces;
                        Ok(())
                    }
                    Err(reason) => Err(Rejection::from(reason)),
                }
            }
            DropEvent::Card { card, destination } => {
                match kanban::try_move_card(card, *destination, &self.board) {
                    Ok(board) => {
                        trace!(card = card.id, column = destination.column_id, "card moved");
                        self.board = board;
                        Ok(())
                    }
                    Err(reason) => Err(Rejection::from(reason)),
                }
            }
        };

        if let Err(reason) = &result {
            debug!(%reason, "drop rejected");
        }
        result
    }

    /// Feedback for a square while the piece described by `source` hovers
    /// over it. Undecodable sources give no feedback.
    pub fn square_hover(&self, source: &Value, target: Cell) -> SquareHover {
        match payload::decode_piece_source(source) {
            Ok(piece) => hover::square_hover(&piece, target, &self.pieces),
            Err(_) => SquareHover::Idle,
        }
    }

    /// A dragged piece entered `target`. Returns the feedback now shown there.
    pub fn enter_square(&mut self, source: &Value, target: Cell) -> SquareHover {
        let state = self.square_hover(source, target);
        self.squares.enter(target, state);
        state
    }

    pub fn leave_square(&mut self, target: Cell) {
        self.squares.leave(&target);
    }

    pub fn square_state(&self, cell: Cell) -> SquareHover {
        self.squares.state(&cell)
    }

    /// A card was picked up.
    pub fn start_card_drag(&mut self, card_id: CardId) {
        self.dragging.enter(card_id, DragPhase::Dragging);
    }

    /// A dragged card entered the drop zone of `card_id`.
    pub fn enter_card(&mut self, card_id: CardId) {
        self.cards.enter(card_id, CardHover::DraggedOver);
    }

    pub fn leave_card(&mut self, card_id: CardId) {
        self.cards.leave(&card_id);
    }

    pub fn card_state(&self, card_id: CardId) -> CardHover {
        self.cards.state(&card_id)
    }

    pub fn drag_phase(&self, card_id: CardId) -> DragPhase {
        self.dragging.state(&card_id)
    }

    /// The gesture finished without a drop being dispatched.
    pub fn end_drag(&mut self) {
        self.squares.drop_all();
        self.cards.drop_all();
        self.dragging.drop_all();
    }
}
