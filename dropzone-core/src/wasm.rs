//! WASM bindings for dropzone-core
//!
//! JavaScript hands over the raw `data` objects of the drag source and drop
//! target; they are decoded on this side exactly like any other payload.

use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::hover::{can_drop_on_square, DragPhase, SquareHover};
use crate::{CardId, Cell, DropOutcome, DropSession, KanbanBoard};

/// Convert a JS value into the untyped payload model. Anything that does not
/// convert is treated as null.
fn to_payload(value: JsValue) -> Value {
    if value.is_null() || value.is_undefined() {
        return Value::Null;
    }
    serde_wasm_bindgen::from_value(value).unwrap_or(Value::Null)
}

fn square_hover_name(state: SquareHover) -> String {
    match state {
        SquareHover::Idle => "idle",
        SquareHover::ValidMove => "validMove",
        SquareHover::InvalidMove => "invalidMove",
    }
    .to_string()
}

/// WASM-friendly wrapper around DropSession
#[wasm_bindgen]
pub struct WasmDropSession {
    inner: DropSession,
}

#[wasm_bindgen]
impl WasmDropSession {
    /// Start from the tutorial chessboard and an empty kanban board
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmDropSession {
        WasmDropSession {
            inner: DropSession::with_starting_pieces(),
        }
    }

    /// Replace the kanban content. Returns false if `board` is not a board,
    /// or repeats a column or card id.
    #[wasm_bindgen(js_name = loadKanban)]
    pub fn load_kanban(&mut self, board: JsValue) -> bool {
        let board = match serde_wasm_bindgen::from_value::<KanbanBoard>(board) {
            Ok(board) => board,
            Err(err) => {
                tracing::debug!(%err, "kanban content is not a board");
                return false;
            }
        };
        match self.inner.load_board(board) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(%err, "refusing kanban content");
                false
            }
        }
    }

    /// Pieces as an array of { kind, location: [row, col] }
    pub fn pieces(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.pieces()).unwrap_or(JsValue::NULL)
    }

    /// Kanban board as { columns: [{ id, name, content: [{ id, title }] }] }
    pub fn kanban(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.inner.board()).unwrap_or(JsValue::NULL)
    }

    /// Resolve a drop. Returns "applied", "rejected" or "ignored".
    /// Pass null as the target when the drop landed outside every target.
    #[wasm_bindgen(js_name = drop)]
    pub fn drop_event(&mut self, source: JsValue, target: JsValue) -> String {
        let source = to_payload(source);
        let target = to_payload(target);
        let outcome = self.inner.dispatch(&source, Some(&target));

        match outcome {
            DropOutcome::Applied => "applied",
            DropOutcome::Rejected(_) => "rejected",
            DropOutcome::Ignored(_) => "ignored",
        }
        .to_string()
    }

    /// Whether the square accepts a drop at all (not the piece's own square)
    #[wasm_bindgen(js_name = canDropOnSquare)]
    pub fn can_drop_on_square(&self, source_row: u8, source_col: u8, row: u8, col: u8) -> bool {
        match (Cell::new(source_row, source_col), Cell::new(row, col)) {
            (Some(source), Some(target)) => can_drop_on_square(source, target),
            _ => false,
        }
    }

    /// Hover feedback for a square: "idle", "validMove" or "invalidMove"
    #[wasm_bindgen(js_name = squareHover)]
    pub fn square_hover(&self, source: JsValue, row: u8, col: u8) -> String {
        let Some(target) = Cell::new(row, col) else {
            return "idle".to_string();
        };

        square_hover_name(self.inner.square_hover(&to_payload(source), target))
    }

    /// A dragged piece entered a square. Returns the square's new feedback.
    #[wasm_bindgen(js_name = dragEnterSquare)]
    pub fn drag_enter_square(&mut self, source: JsValue, row: u8, col: u8) -> String {
        let Some(target) = Cell::new(row, col) else {
            return "idle".to_string();
        };
        square_hover_name(self.inner.enter_square(&to_payload(source), target))
    }

    #[wasm_bindgen(js_name = dragLeaveSquare)]
    pub fn drag_leave_square(&mut self, row: u8, col: u8) {
        if let Some(target) = Cell::new(row, col) {
            self.inner.leave_square(target);
        }
    }

    /// Feedback currently recorded for a square
    #[wasm_bindgen(js_name = squareState)]
    pub fn square_state(&self, row: u8, col: u8) -> String {
        match Cell::new(row, col) {
            Some(cell) => square_hover_name(self.inner.square_state(cell)),
            None => "idle".to_string(),
        }
    }

    #[wasm_bindgen(js_name = dragStartCard)]
    pub fn drag_start_card(&mut self, card_id: i32) {
        self.inner.start_card_drag(CardId::from(card_id));
    }

    #[wasm_bindgen(js_name = dragEnterCard)]
    pub fn drag_enter_card(&mut self, card_id: i32) {
        self.inner.enter_card(CardId::from(card_id));
    }

    #[wasm_bindgen(js_name = dragLeaveCard)]
    pub fn drag_leave_card(&mut self, card_id: i32) {
        self.inner.leave_card(CardId::from(card_id));
    }

    /// Whether a ghost placeholder should be drawn above the card
    #[wasm_bindgen(js_name = showsGhost)]
    pub fn shows_ghost(&self, card_id: i32) -> bool {
        self.inner.card_state(CardId::from(card_id)).shows_ghost()
    }

    #[wasm_bindgen(js_name = isDragging)]
    pub fn is_dragging(&self, card_id: i32) -> bool {
        self.inner.drag_phase(CardId::from(card_id)) == DragPhase::Dragging
    }

    /// The gesture was cancelled without a drop
    #[wasm_bindgen(js_name = endDrag)]
    pub fn end_drag(&mut self) {
        self.inner.end_drag();
    }
}

impl Default for WasmDropSession {
    fn default() -> Self {
        Self::new()
    }
}
