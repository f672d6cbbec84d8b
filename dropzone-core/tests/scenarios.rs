//! Recorded drop scenarios
//!
//! Replays each scenario in `tests/fixtures/drop_scenarios.json` through a
//! `DropSession` and checks:
//! - the outcome of every drop (applied / rejected / ignored)
//! - the final piece set
//! - the final card order of each listed column
//! - that piece and card counts never change along the way

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use dropzone_core::{CardId, ColumnId, DropOutcome, DropSession, KanbanBoard, Piece};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct TestData {
    version: String,
    scenarios: Vec<Scenario>,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    description: String,
    #[serde(default)]
    pieces: Vec<Piece>,
    #[serde(default)]
    kanban: KanbanBoard,
    drops: Vec<RecordedDrop>,
    #[serde(default)]
    final_pieces: Option<Vec<Piece>>,
    #[serde(default)]
    final_columns: Vec<ColumnOrder>,
}

#[derive(Debug, Deserialize)]
struct RecordedDrop {
    source: Value,
    target: Value,
    expect: Expect,
}

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum Expect {
    Applied,
    Rejected,
    Ignored,
}

#[derive(Debug, Deserialize)]
struct ColumnOrder {
    id: ColumnId,
    cards: Vec<CardId>,
}

fn outcome_kind(outcome: &DropOutcome) -> Expect {
    match outcome {
        DropOutcome::Applied => Expect::Applied,
        DropOutcome::Rejected(_) => Expect::Rejected,
        DropOutcome::Ignored(_) => Expect::Ignored,
    }
}

fn load_scenarios() -> TestData {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/drop_scenarios.json");
    let file = File::open(&path).expect("Failed to open drop scenarios file");
    serde_json::from_reader(BufReader::new(file)).expect("Failed to parse JSON")
}

#[test]
fn test_recorded_scenarios() {
    let data = load_scenarios();
    assert!(!data.scenarios.is_empty());

    let mut failures: Vec<String> = Vec::new();

    for scenario in &data.scenarios {
        let mut session = DropSession::new(scenario.pieces.clone(), scenario.kanban.clone())
            .expect("scenario start state is valid");
        let piece_count = session.pieces().len();
        let card_count = session.board().card_count();

        for (i, drop) in scenario.drops.iter().enumerate() {
            let outcome = session.dispatch(&drop.source, Some(&drop.target));
            if outcome_kind(&outcome) != drop.expect {
                failures.push(format!(
                    "{} / drop {}: expected {:?}, got {:?}",
                    scenario.description, i, drop.expect, outcome
                ));
            }
            let counts = (session.pieces().len(), session.board().card_count());
            if counts != (piece_count, card_count) {
                failures.push(format!(
                    "{} / drop {}: item count changed",
                    scenario.description, i
                ));
            }
        }

        if let Some(expected) = &scenario.final_pieces {
            let mut actual = session.pieces().to_vec();
            let mut expected = expected.clone();
            actual.sort_by_key(|p| (p.location.row(), p.location.col()));
            expected.sort_by_key(|p| (p.location.row(), p.location.col()));
            if actual != expected {
                failures.push(format!(
                    "{}: final pieces {:?}, expected {:?}",
                    scenario.description, actual, expected
                ));
            }
        }

        for order in &scenario.final_columns {
            let actual = session.board().column(order.id).map(|c| c.card_ids());
            if actual.as_ref() != Some(&order.cards) {
                failures.push(format!(
                    "{}: column {} holds {:?}, expected {:?}",
                    scenario.description, order.id, actual, order.cards
                ));
            }
        }
    }

    for f in &failures {
        println!("{}", f);
    }
    assert!(failures.is_empty(), "{} scenario checks failed", failures.len());
}

/// Replaying a scenario twice from the same start gives the same state.
#[test]
fn test_scenarios_are_deterministic() {
    let data = load_scenarios();

    for scenario in &data.scenarios {
        let run = || {
            let mut session = DropSession::new(scenario.pieces.clone(), scenario.kanban.clone())
                .expect("scenario start state is valid");
            for drop in &scenario.drops {
                session.dispatch(&drop.source, Some(&drop.target));
            }
            (session.pieces().to_vec(), session.board().clone())
        };
        assert_eq!(run(), run(), "{}", scenario.description);
    }
}
