//! Decoding of the untyped `data` objects attached to drag sources and drop
//! targets.
//!
//! # Shapes
//!
//! ```text
//! piece source:  { "location": [row, col], "pieceType": "king" | "pawn" }
//! square target: { "location": [row, col] }
//! card source:   { "card": { "id": n, "title": "..." } }
//! card target:   { "columnId": n, "cardId": n }      cardId -1 = end of column
//! ```
//!
//! The drag layer hands these over as plain JSON-like values. Everything is
//! checked here, so the engines only ever see typed input.

use serde_json::{json, Map, Value};

use crate::error::PayloadError;
use crate::grid::{Cell, Piece, PieceKind};
use crate::kanban::{Anchor, Card, CardDestination, END_OF_COLUMN};

/// The piece being dragged, as described by its drag source.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PieceSource {
    pub location: Cell,
    pub kind: PieceKind,
}

/// A fully decoded drop: what was dragged and where it landed.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DropEvent {
    Piece { source: PieceSource, target: Cell },
    Card { card: Card, destination: CardDestination },
}

fn object(value: &Value) -> Result<&Map<String, Value>, PayloadError> {
    value.as_object().ok_or(PayloadError::NotAnObject)
}

/// A present, non-null field.
fn field<'a>(obj: &'a Map<String, Value>, name: &'static str) -> Result<&'a Value, PayloadError> {
    match obj.get(name) {
        None | Some(Value::Null) => Err(PayloadError::MissingField(name)),
        Some(value) => Ok(value),
    }
}

/// Whole numbers only. JS numbers may arrive as floats, so `3.0` counts.
fn integer(value: &Value) -> Option<i64> {
    const MAX_SAFE: f64 = 9_007_199_254_740_991.0;

    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() <= MAX_SAFE)
            .map(|f| f as i64)
    })
}

fn integer_field(obj: &Map<String, Value>, name: &'static str) -> Result<i64, PayloadError> {
    integer(field(obj, name)?).ok_or(PayloadError::InvalidField {
        field: name,
        expected: "an integer",
    })
}

fn cell_field(obj: &Map<String, Value>, name: &'static str) -> Result<Cell, PayloadError> {
    let invalid = PayloadError::InvalidField {
        field: name,
        expected: "a [row, col] pair",
    };

    let pair = match field(obj, name)?.as_array() {
        Some(items) if items.len() == 2 => items,
        _ => return Err(invalid),
    };
    let (Some(row), Some(col)) = (integer(&pair[0]), integer(&pair[1])) else {
        return Err(invalid);
    };

    let in_range = |n: i64| u8::try_from(n).ok();
    in_range(row)
        .zip(in_range(col))
        .and_then(|(r, c)| Cell::new(r, c))
        .ok_or(PayloadError::OutOfBounds { row, col })
}

/// Decode a piece drag source.
pub fn decode_piece_source(value: &Value) -> Result<PieceSource, PayloadError> {
    let obj = object(value)?;
    let location = cell_field(obj, "location")?;
    let name = field(obj, "pieceType")?.as_str().ok_or(PayloadError::InvalidField {
        field: "pieceType",
        expected: "a string",
    })?;
    let kind =
        PieceKind::parse(name).ok_or_else(|| PayloadError::UnknownPieceType(name.to_string()))?;

    Ok(PieceSource { location, kind })
}

/// Decode a board square drop target.
pub fn decode_square_target(value: &Value) -> Result<Cell, PayloadError> {
    cell_field(object(value)?, "location")
}

/// Decode a card drag source.
pub fn decode_card_source(value: &Value) -> Result<Card, PayloadError> {
    let card = object(field(object(value)?, "card")?).map_err(|_| PayloadError::InvalidField {
        field: "card",
        expected: "an object",
    })?;
    let id = integer_field(card, "id")?;
    if id == END_OF_COLUMN {
        return Err(PayloadError::InvalidField {
            field: "id",
            expected: "a non-sentinel card id",
        });
    }
    let title = field(card, "title")?.as_str().ok_or(PayloadError::InvalidField {
        field: "title",
        expected: "a string",
    })?;

    Ok(Card::new(id, title))
}

/// Decode a column or card drop target.
pub fn decode_card_target(value: &Value) -> Result<CardDestination, PayloadError> {
    let obj = object(value)?;
    let column_id = integer_field(obj, "columnId")?;
    let anchor = Anchor::from_wire(integer_field(obj, "cardId")?);

    Ok(CardDestination { column_id, anchor })
}

/// Decode a complete drop.
///
/// The source payload's shape picks the variant: a `card` field means a card
/// drag, a `location` or `pieceType` field means a piece drag. `target` is
/// `None` (or null) when the pointer was released outside every drop target.
pub fn decode_drop(source: &Value, target: Option<&Value>) -> Result<DropEvent, PayloadError> {
    let obj = object(source)?;
    let target = match target {
        None | Some(Value::Null) => return Err(PayloadError::NoTarget),
        Some(target) => target,
    };

    if obj.contains_key("card") {
        Ok(DropEvent::Card {
            card: decode_card_source(source)?,
            destination: decode_card_target(target)?,
        })
    } else if obj.contains_key("location") || obj.contains_key("pieceType") {
        Ok(DropEvent::Piece {
            source: decode_piece_source(source)?,
            target: decode_square_target(target)?,
        })
    } else {
        Err(PayloadError::UnknownSource)
    }
}

/// Data a draggable piece carries.
pub fn piece_source_data(piece: &Piece) -> Value {
    json!({ "location": piece.location, "pieceType": piece.kind })
}

/// Data a board square carries as a drop target.
pub fn square_target_data(cell: Cell) -> Value {
    json!({ "location": cell })
}

/// Data a draggable card carries.
pub fn card_source_data(card: &Card) -> Value {
    json!({ "card": card })
}

/// Data a card, or a column's trailing drop zone, carries as a drop target.
pub fn card_target_data(destination: CardDestination) -> Value {
    json!({ "columnId": destination.column_id, "cardId": destination.anchor.to_wire() })
}
