//! Replay of recorded drop events.
//!
//! Events are JSON lines, one drop each:
//!
//! ```text
//! {"source": {"location": [3, 2], "pieceType": "king"}, "target": {"location": [4, 3]}}
//! {"source": {"card": {"id": 1, "title": "Create"}}, "target": {"columnId": 2, "cardId": -1}}
//! {"source": {"location": [1, 6], "pieceType": "pawn"}, "target": null}
//! ```
//!
//! Events are applied strictly in file order, each against the state left by
//! the one before it.

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};

use dropzone_core::{DropOutcome, DropSession};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::ReplayError;
use crate::stats::ReplayStats;

/// One recorded drop: the dragged element's data and the drop target's data.
#[derive(Debug, Deserialize)]
pub struct RecordedEvent {
    pub source: Value,
    /// Null when the drop landed outside every target.
    #[serde(default)]
    pub target: Value,
}

pub struct Replayer {
    session: DropSession,
    stats: ReplayStats,
}

impl Replayer {
    pub fn new(session: DropSession) -> Self {
        Replayer {
            session,
            stats: ReplayStats::new(),
        }
    }

    pub fn session(&self) -> &DropSession {
        &self.session
    }

    pub fn stats(&self) -> &ReplayStats {
        &self.stats
    }

    /// Handle one line of the events stream. Blank lines are skipped.
    pub fn handle_line(&mut self, line_no: usize, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        let event: RecordedEvent = match serde_json::from_str(line) {
            Ok(event) => event,
            Err(err) => {
                warn!(line = line_no, %err, "skipping unparsable event");
                self.stats.record_malformed();
                return;
            }
        };

        let outcome = self.session.dispatch(&event.source, Some(&event.target));
        match &outcome {
            DropOutcome::Applied => debug!(line = line_no, "drop applied"),
            DropOutcome::Rejected(reason) => info!(line = line_no, %reason, "drop rejected"),
            DropOutcome::Ignored(err) => warn!(line = line_no, %err, "drop ignored"),
        }
        self.stats.record(&outcome);
    }

    /// Replay every event from `reader`, stopping early once `running` is
    /// cleared.
    pub fn replay<R: BufRead>(
        &mut self,
        reader: R,
        running: &AtomicBool,
    ) -> Result<(), ReplayError> {
        for (index, line) in reader.lines().enumerate() {
            if !running.load(Ordering::SeqCst) {
                info!(events = self.stats.total(), "replay interrupted");
                self.stats.interrupted = true;
                break;
            }

            let line_no = index + 1;
            let line = line.map_err(|source| ReplayError::EventRead { line: line_no, source })?;
            self.handle_line(line_no, &line);
        }
        Ok(())
    }

    pub fn into_parts(self) -> (DropSession, ReplayStats) {
        (self.session, self.stats)
    }
}
