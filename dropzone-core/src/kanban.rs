//! Kanban columns and card reordering.
//!
//! A move is two pure passes over the board:
//!
//! ```text
//! 1. remove: filter the card id out of every column
//! 2. insert: splice the card into the destination column
//!            Anchor::End        -> push to the back
//!            Anchor::Before(id) -> insert at the index of `id`
//! ```
//!
//! Every pass rebuilds the column sequences it returns, so the previous
//! board value is never aliased by the next one.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, ReorderRejection};

pub type CardId = i64;
pub type ColumnId = i64;

/// Wire sentinel for "drop at the end of the column".
pub const END_OF_COLUMN: CardId = -1;

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
}

impl Card {
    pub fn new(id: CardId, title: impl Into<String>) -> Card {
        Card {
            id,
            title: title.into(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    #[serde(default)]
    pub content: Vec<Card>,
}

impl Column {
    pub fn new(id: ColumnId, name: impl Into<String>, content: Vec<Card>) -> Column {
        Column {
            id,
            name: name.into(),
            content,
        }
    }

    /// Position of a card within this column.
    pub fn position(&self, card_id: CardId) -> Option<usize> {
        self.content.iter().position(|card| card.id == card_id)
    }

    pub fn card_ids(&self) -> Vec<CardId> {
        self.content.iter().map(|card| card.id).collect()
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct KanbanBoard {
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl KanbanBoard {
    /// An empty board, the state before any content has been loaded.
    pub fn new() -> KanbanBoard {
        KanbanBoard::default()
    }

    /// Wrap columns as they are. Use `KanbanBoard::try_from` for content
    /// that has not been checked yet.
    pub fn from_columns(columns: Vec<Column>) -> KanbanBoard {
        KanbanBoard { columns }
    }

    /// Check the invariants moves rely on. See [`validate_columns`].
    pub fn validate(&self) -> Result<(), BoardError> {
        validate_columns(&self.columns)
    }

    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == id)
    }

    /// Find which column holds a card, and where.
    pub fn locate(&self, card_id: CardId) -> Option<(ColumnId, usize)> {
        self.columns
            .iter()
            .find_map(|column| column.position(card_id).map(|index| (column.id, index)))
    }

    /// Total number of cards across all columns.
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|column| column.content.len()).sum()
    }
}

impl TryFrom<Vec<Column>> for KanbanBoard {
    type Error = BoardError;

    fn try_from(columns: Vec<Column>) -> Result<Self, Self::Error> {
        let board = KanbanBoard { columns };
        board.validate()?;
        Ok(board)
    }
}

/// Where in the destination column a dropped card lands.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Anchor {
    /// After the last card.
    End,
    /// Immediately before the card with this id.
    Before(CardId),
}

impl Anchor {
    /// Decode the drop target's `cardId`, where `-1` means the end.
    pub fn from_wire(card_id: CardId) -> Anchor {
        if card_id == END_OF_COLUMN {
            Anchor::End
        } else {
            Anchor::Before(card_id)
        }
    }

    pub fn to_wire(self) -> CardId {
        match self {
            Anchor::End => END_OF_COLUMN,
            Anchor::Before(id) => id,
        }
    }
}

/// Drop target for a card: a column, and a spot within it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct CardDestination {
    pub column_id: ColumnId,
    pub anchor: Anchor,
}

impl CardDestination {
    pub fn new(column_id: ColumnId, anchor: Anchor) -> CardDestination {
        CardDestination { column_id, anchor }
    }

    pub fn end_of(column_id: ColumnId) -> CardDestination {
        CardDestination::new(column_id, Anchor::End)
    }

    pub fn before(column_id: ColumnId, card_id: CardId) -> CardDestination {
        CardDestination::new(column_id, Anchor::Before(card_id))
    }
}

/// Column ids and card ids must be unique, and no card may use the
/// end-of-column sentinel as its id.
pub fn validate_columns(columns: &[Column]) -> Result<(), BoardError> {
    let mut column_ids = HashSet::new();
    let mut card_ids = HashSet::new();
    for column in columns {
        if !column_ids.insert(column.id) {
            return Err(BoardError::DuplicateColumn(column.id));
        }
        for card in &column.content {
            if card.id == END_OF_COLUMN {
                return Err(BoardError::ReservedCardId);
            }
            if !card_ids.insert(card.id) {
                return Err(BoardError::DuplicateCard(card.id));
            }
        }
    }
    Ok(())
}

/// Remove a card id from every column.
pub fn remove_card(board: &KanbanBoard, card_id: CardId) -> KanbanBoard {
    let columns = board
        .columns
        .iter()
        .map(|column| Column {
            id: column.id,
            name: column.name.clone(),
            content: column
                .content
                .iter()
                .filter(|card| card.id != card_id)
                .cloned()
                .collect(),
        })
        .collect();

    KanbanBoard { columns }
}

/// Insert a card into a column at the given anchor.
///
/// An anchor that is not in the column falls back to the end.
pub fn insert_card(column: &Column, card: Card, anchor: Anchor) -> Column {
    let index = match anchor {
        Anchor::End => None,
        Anchor::Before(id) => column.position(id),
    }
    .unwrap_or(column.content.len());

    let mut content = Vec::with_capacity(column.content.len() + 1);
    content.extend_from_slice(&column.content[..index]);
    content.push(card);
    content.extend_from_slice(&column.content[index..]);

    Column {
        id: column.id,
        name: column.name.clone(),
        content,
    }
}

/// Move a card to `destination`, or report why the board cannot take it.
///
/// A card that is not on the board yet is still inserted. Dropping a card
/// onto itself within its own column leaves the board as it was.
pub fn try_move_card(
    card: &Card,
    destination: CardDestination,
    board: &KanbanBoard,
) -> Result<KanbanBoard, ReorderRejection> {
    let Some(target_index) =
        board.columns.iter().position(|column| column.id == destination.column_id)
    else {
        return Err(ReorderRejection::UnknownColumn(destination.column_id));
    };
    let target = &board.columns[target_index];
    if destination.anchor == Anchor::Before(card.id) && target.position(card.id).is_some() {
        return Ok(board.clone());
    }

    // Only the first column with the id receives the card
    let without = remove_card(board, card.id);
    let columns = without
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            if index == target_index {
                insert_card(column, card.clone(), destination.anchor)
            } else {
                column.clone()
            }
        })
        .collect();

    Ok(KanbanBoard { columns })
}

/// Move a card, returning the board unchanged when the move is refused.
pub fn move_card(card: &Card, destination: CardDestination, board: &KanbanBoard) -> KanbanBoard {
    try_move_card(card, destination, board).unwrap_or_else(|_| board.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backlog / Doing / Done, as the tutorial seeds it.
    fn sample_board() -> KanbanBoard {
        KanbanBoard::from_columns(vec![
            Column::new(
                1,
                "Backlog",
                vec![
                    Card::new(1, "Create the cards"),
                    Card::new(2, "Place the cards in the columns"),
                    Card::new(3, "Implement card dragging"),
                    Card::new(4, "Implement drop card"),
                    Card::new(5, "Implement drag & drop column"),
                ],
            ),
            Column::new(2, "Doing", vec![Card::new(6, "Delete a card")]),
            Column::new(
                3,
                "Done",
                vec![
                    Card::new(7, "Create boilerplate"),
                    Card::new(8, "Define data model"),
                    Card::new(9, "Create columns"),
                ],
            ),
        ])
    }

    fn ids(board: &KanbanBoard, column_id: ColumnId) -> Vec<CardId> {
        board.column(column_id).map(Column::card_ids).unwrap_or_default()
    }

    fn card(board: &KanbanBoard, id: CardId) -> Card {
        let (column_id, index) = board.locate(id).unwrap();
        board.column(column_id).unwrap().content[index].clone()
    }

    #[test]
    fn test_anchor_wire_roundtrip() {
        assert_eq!(Anchor::from_wire(-1), Anchor::End);
        assert_eq!(Anchor::from_wire(0), Anchor::Before(0));
        assert_eq!(Anchor::from_wire(7), Anchor::Before(7));
        assert_eq!(Anchor::End.to_wire(), END_OF_COLUMN);
        assert_eq!(Anchor::Before(7).to_wire(), 7);
    }

    #[test]
    fn test_locate_and_count() {
        let board = sample_board();
        assert_eq!(board.card_count(), 9);
        assert_eq!(board.locate(6), Some((2, 0)));
        assert_eq!(board.locate(9), Some((3, 2)));
        assert_eq!(board.locate(42), None);
        assert_eq!(KanbanBoard::new().card_count(), 0);
    }

    #[test]
    fn test_validate_board() {
        assert_eq!(sample_board().validate(), Ok(()));
        assert_eq!(KanbanBoard::new().validate(), Ok(()));

        let mut board = sample_board();
        board.columns.push(Column::new(2, "Doing again", vec![]));
        assert_eq!(board.validate(), Err(BoardError::DuplicateColumn(2)));

        let mut board = sample_board();
        board.columns[2].content.push(Card::new(4, "Twin"));
        assert_eq!(board.validate(), Err(BoardError::DuplicateCard(4)));

        let mut board = sample_board();
        board.columns[1].content.push(Card::new(END_OF_COLUMN, "Sentinel"));
        assert_eq!(board.validate(), Err(BoardError::ReservedCardId));
    }

    #[test]
    fn test_try_from_columns() {
        let board = KanbanBoard::try_from(sample_board().columns).unwrap();
        assert_eq!(board, sample_board());

        let columns = vec![
            Column::new(1, "a", vec![Card::new(1, "x"), Card::new(2, "y")]),
            Column::new(1, "b", vec![]),
        ];
        assert_eq!(KanbanBoard::try_from(columns), Err(BoardError::DuplicateColumn(1)));
    }

    #[test]
    fn test_duplicate_column_ids_take_the_card_once() {
        // from_columns does not validate, so the engine must not fan out
        let board = KanbanBoard::from_columns(vec![
            Column::new(1, "a", vec![Card::new(1, "x"), Card::new(2, "y")]),
            Column::new(1, "b", vec![]),
        ]);
        let after = move_card(&Card::new(1, "x"), CardDestination::end_of(1), &board);

        assert_eq!(after.card_count(), board.card_count());
        assert_eq!(after.columns[0].card_ids(), vec![2, 1]);
        assert!(after.columns[1].content.is_empty());
    }

    #[test]
    fn test_remove_card_from_every_column() {
        let board = sample_board();
        let without = remove_card(&board, 3);
        assert_eq!(ids(&without, 1), vec![1, 2, 4, 5]);
        assert_eq!(without.card_count(), 8);
        assert_eq!(remove_card(&without, 3), without);
    }

    #[test]
    fn test_move_to_end_of_other_column() {
        let board = sample_board();
        let after = move_card(&card(&board, 2), CardDestination::end_of(3), &board);

        assert_eq!(ids(&after, 1), vec![1, 3, 4, 5]);
        assert_eq!(ids(&after, 3), vec![7, 8, 9, 2]);
        assert_eq!(after.card_count(), board.card_count());
    }

    #[test]
    fn test_move_to_end_of_own_column() {
        let board = sample_board();
        let after = move_card(&card(&board, 1), CardDestination::end_of(1), &board);
        assert_eq!(ids(&after, 1), vec![2, 3, 4, 5, 1]);
    }

    #[test]
    fn test_move_to_end_of_empty_column() {
        let mut board = sample_board();
        board.columns.push(Column::new(4, "Archive", vec![]));

        let after = move_card(&card(&board, 6), CardDestination::end_of(4), &board);
        assert_eq!(ids(&after, 4), vec![6]);
        assert!(ids(&after, 2).is_empty());
    }

    #[test]
    fn test_move_before_anchor_shifts_the_rest() {
        let board = sample_board();
        let after = move_card(&card(&board, 6), CardDestination::before(3, 8), &board);

        assert_eq!(ids(&after, 3), vec![7, 6, 8, 9]);
        assert!(ids(&after, 2).is_empty());
    }

    #[test]
    fn test_move_before_first_card() {
        let board = sample_board();
        let after = move_card(&card(&board, 9), CardDestination::before(1, 1), &board);
        assert_eq!(ids(&after, 1), vec![9, 1, 2, 3, 4, 5]);
        assert_eq!(ids(&after, 3), vec![7, 8]);
    }

    #[test]
    fn test_move_within_column_up_and_down() {
        let board = sample_board();

        let up = move_card(&card(&board, 4), CardDestination::before(1, 2), &board);
        assert_eq!(ids(&up, 1), vec![1, 4, 2, 3, 5]);

        let down = move_card(&card(&board, 2), CardDestination::before(1, 5), &board);
        assert_eq!(ids(&down, 1), vec![1, 3, 4, 2, 5]);
    }

    #[test]
    fn test_missing_anchor_appends() {
        let board = sample_board();
        let after = move_card(&card(&board, 1), CardDestination::before(3, 42), &board);
        assert_eq!(ids(&after, 3), vec![7, 8, 9, 1]);
        assert_eq!(after.card_count(), board.card_count());

        // An anchor living in a different column is not in the destination either.
        let after = move_card(&card(&board, 1), CardDestination::before(2, 8), &board);
        assert_eq!(ids(&after, 2), vec![6, 1]);
    }

    #[test]
    fn test_drop_on_itself_is_noop() {
        let board = sample_board();
        let after = move_card(&card(&board, 3), CardDestination::before(1, 3), &board);
        assert_eq!(after, board);
    }

    #[test]
    fn test_unknown_column_is_rejected() {
        let board = sample_board();
        let moved = card(&board, 1);
        assert_eq!(
            try_move_card(&moved, CardDestination::end_of(99), &board),
            Err(ReorderRejection::UnknownColumn(99))
        );
        assert_eq!(move_card(&moved, CardDestination::end_of(99), &board), board);
    }

    #[test]
    fn test_card_not_on_board_is_inserted() {
        let board = sample_board();
        let stranger = Card::new(100, "From elsewhere");
        let after = move_card(&stranger, CardDestination::before(2, 6), &board);

        assert_eq!(ids(&after, 2), vec![100, 6]);
        assert_eq!(after.card_count(), board.card_count() + 1);
    }

    #[test]
    fn test_move_is_idempotent() {
        let board = sample_board();
        let destinations = [
            CardDestination::end_of(1),
            CardDestination::end_of(2),
            CardDestination::before(3, 7),
            CardDestination::before(1, 5),
            CardDestination::before(2, 42),
        ];

        for id in 1..=9 {
            let moved = card(&board, id);
            for &destination in &destinations {
                let once = move_card(&moved, destination, &board);
                let twice = move_card(&moved, destination, &once);
                assert_eq!(once, twice, "card {id} to {destination:?}");
            }
        }
    }

    #[test]
    fn test_input_board_is_untouched() {
        let board = sample_board();
        let _ = move_card(&card(&board, 5), CardDestination::before(2, 6), &board);
        assert_eq!(board, sample_board());
    }

    #[test]
    fn test_move_fuzz_preserves_cards() {
        use rand::prelude::*;

        let mut rng = rand::rng();

        for _ in 0..100 {
            let mut board = sample_board();
            for _ in 0..30 {
                let id = rng.random_range(1..=9);
                let column_id = rng.random_range(1..=3);
                let anchor = Anchor::from_wire(rng.random_range(-1..=10));
                let moved = card(&board, id);

                let next = move_card(&moved, CardDestination::new(column_id, anchor), &board);
                assert_eq!(next.card_count(), 9, "card count changed");

                let mut all: Vec<CardId> =
                    next.columns.iter().flat_map(Column::card_ids).collect();
                all.sort_unstable();
                assert_eq!(all, (1..=9).collect::<Vec<_>>(), "card duplicated or lost");

                assert_eq!(next.locate(id).map(|(column, _)| column), Some(column_id));
                board = next;
            }
        }
    }
}
