//! Dropzone replay
//!
//! Loads a scenario, replays recorded drag-and-drop events against it and
//! prints the resulting state.

mod config;
mod error;
mod replay;
mod stats;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use dropzone_core::{DropSession, KanbanBoard, Piece};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ScenarioConfig;
use crate::error::ReplayError;
use crate::replay::Replayer;

#[derive(Debug, Parser)]
#[command(name = "dropzone-replay", version, about = "Replay recorded drag-and-drop events")]
struct Args {
    /// Scenario TOML with the starting pieces and columns
    #[arg(short, long, default_value = "scenario.toml")]
    scenario: PathBuf,

    /// JSON-lines file of drop events, or `-` for stdin
    #[arg(default_value = "-")]
    events: String,

    /// Print the final state as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Exit with a failure status if any event was malformed or ignored
    #[arg(long)]
    strict: bool,
}

#[derive(Serialize)]
struct FinalState<'a> {
    pieces: &'a [Piece],
    kanban: &'a KanbanBoard,
}

fn print_state(session: &DropSession) {
    println!("Pieces:");
    for piece in session.pieces() {
        println!("  {:<5} {}", piece.kind, piece.location);
    }
    println!("Columns:");
    for column in &session.board().columns {
        println!("  [{}] {} ({} cards)", column.id, column.name, column.content.len());
        for card in &column.content {
            println!("    #{} {}", card.id, card.title);
        }
    }
}

fn run(args: &Args, running: &AtomicBool) -> Result<ExitCode, ReplayError> {
    let scenario = ScenarioConfig::load_or_default(&args.scenario)?;
    tracing::info!(
        pieces = scenario.pieces.len(),
        columns = scenario.columns.len(),
        "scenario loaded"
    );

    let mut replayer = Replayer::new(scenario.into_session()?);
    if args.events == "-" {
        replayer.replay(io::stdin().lock(), running)?;
    } else {
        let path = PathBuf::from(&args.events);
        let file = File::open(&path).map_err(|source| ReplayError::EventsOpen { path, source })?;
        replayer.replay(BufReader::new(file), running)?;
    }

    tracing::info!(
        events = replayer.stats().total(),
        pieces = replayer.session().pieces().len(),
        cards = replayer.session().board().card_count(),
        "replay finished"
    );

    let (session, stats) = replayer.into_parts();
    if args.json {
        let state = FinalState {
            pieces: session.pieces(),
            kanban: session.board(),
        };
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print_state(&session);
    }
    println!();
    stats.print_summary();

    if args.strict && !stats.is_clean() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dropzone_replay=info,dropzone_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    // Stop between events on Ctrl-C and still report what was replayed
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(err) = ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    }) {
        tracing::warn!(%err, "could not install Ctrl-C handler");
    }

    match run(&args, &running) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(%err, "replay failed");
            ExitCode::FAILURE
        }
    }
}
