//! Drag feedback state, kept per element instead of inside each widget.
//!
//! The drag layer reports `enter`, `leave` and `drop` per drop target. A
//! [`HoverMap`] turns those reports into one finite-state value per element
//! id, which the render layer reads to colour squares or show a ghost card.

use std::collections::HashMap;
use std::hash::Hash;

use crate::grid::{can_move, Cell, Piece};
use crate::payload::PieceSource;

/// Feedback for a board square while a piece hovers over it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub enum SquareHover {
    #[default]
    Idle,
    ValidMove,
    InvalidMove,
}

/// Feedback for a card while another card hovers over it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub enum CardHover {
    #[default]
    Idle,
    DraggedOver,
}

impl CardHover {
    /// A ghost placeholder is drawn above a card that is being dragged over.
    pub fn shows_ghost(self) -> bool {
        self == CardHover::DraggedOver
    }
}

/// Whether an element is itself being dragged.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

/// A square accepts a drop from anywhere except the dragged piece's own square.
pub fn can_drop_on_square(source: Cell, target: Cell) -> bool {
    source != target
}

/// Feedback for `target` when `source` is dragged over it.
pub fn square_hover(source: &PieceSource, target: Cell, occupancy: &[Piece]) -> SquareHover {
    if can_move(source.location, target, source.kind, occupancy) {
        SquareHover::ValidMove
    } else {
        SquareHover::InvalidMove
    }
}

/// One state value per element id. Unknown ids read as the idle default.
#[derive(Clone, Debug)]
pub struct HoverMap<K, S> {
    states: HashMap<K, S>,
}

impl<K: Eq + Hash, S: Copy + Default + PartialEq> HoverMap<K, S> {
    pub fn new() -> Self {
        HoverMap {
            states: HashMap::new(),
        }
    }

    /// Current state of an element.
    pub fn state(&self, key: &K) -> S {
        self.states.get(key).copied().unwrap_or_default()
    }

    /// The drag entered an element.
    pub fn enter(&mut self, key: K, state: S) {
        if state == S::default() {
            self.states.remove(&key);
        } else {
            self.states.insert(key, state);
        }
    }

    /// The drag left an element.
    pub fn leave(&mut self, key: &K) {
        self.states.remove(key);
    }

    /// The gesture finished; every element goes back to idle.
    pub fn drop_all(&mut self) {
        self.states.clear();
    }

    /// Elements currently in a non-idle state.
    pub fn active(&self) -> impl Iterator<Item = (&K, S)> + '_ {
        self.states.iter().map(|(key, state)| (key, *state))
    }

    pub fn is_idle(&self) -> bool {
        self.states.is_empty()
    }
}

impl<K: Eq + Hash, S: Copy + Default + PartialEq> Default for HoverMap<K, S> {
    fn default() -> Self {
        Self::new()
    }
}
