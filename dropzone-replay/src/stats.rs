//! Replay statistics tracking.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use dropzone_core::{DropOutcome, MoveRejection, Rejection, ReorderRejection};

/// Short label used to group rejections in the summary.
fn rejection_label(rejection: &Rejection) -> &'static str {
    match rejection {
        Rejection::Move(MoveRejection::NoPieceAtSource(_)) => "no piece at source",
        Rejection::Move(MoveRejection::IllegalMove { .. }) => "illegal move",
        Rejection::Reorder(ReorderRejection::UnknownColumn(_)) => "unknown column",
    }
}

/// Counters for a single replay run.
pub struct ReplayStats {
    pub applied: u64,
    pub rejected: BTreeMap<&'static str, u64>,
    pub ignored: u64,
    /// Lines that were not valid JSON events.
    pub malformed: u64,
    pub interrupted: bool,
    start_time: Instant,
}

impl ReplayStats {
    pub fn new() -> Self {
        ReplayStats {
            applied: 0,
            rejected: BTreeMap::new(),
            ignored: 0,
            malformed: 0,
            interrupted: false,
            start_time: Instant::now(),
        }
    }

    pub fn record(&mut self, outcome: &DropOutcome) {
        match outcome {
            DropOutcome::Applied => self.applied += 1,
            DropOutcome::Rejected(rejection) => {
                *self.rejected.entry(rejection_label(rejection)).or_insert(0) += 1;
            }
            DropOutcome::Ignored(_) => self.ignored += 1,
        }
    }

    pub fn record_malformed(&mut self) {
        self.malformed += 1;
    }

    pub fn total_rejected(&self) -> u64 {
        self.rejected.values().sum()
    }

    /// Events read, including malformed lines.
    pub fn total(&self) -> u64 {
        self.applied + self.total_rejected() + self.ignored + self.malformed
    }

    /// True when every event decoded cleanly.
    pub fn is_clean(&self) -> bool {
        self.ignored == 0 && self.malformed == 0
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn print_summary(&self) {
        println!("Replay Summary:");
        println!("  Events:     {}", self.total());
        println!("  Applied:    {}", self.applied);
        println!("  Rejected:   {}", self.total_rejected());
        for (label, count) in &self.rejected {
            println!("    {:<20} {}", label, count);
        }
        println!("  Ignored:    {}", self.ignored);
        println!("  Malformed:  {}", self.malformed);
        println!("  Time:       {:.3}s", self.elapsed().as_secs_f64());
        if self.interrupted {
            println!("  (interrupted before the end of the event stream)");
        }
    }
}

impl Default for ReplayStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropzone_core::{Cell, PayloadError, PieceKind};

    #[test]
    fn test_record_outcomes() {
        let mut stats = ReplayStats::new();
        let cell = Cell::from_row_col(3, 2);

        stats.record(&DropOutcome::Applied);
        stats.record(&DropOutcome::Applied);
        stats.record(&DropOutcome::Rejected(Rejection::Move(MoveRejection::NoPieceAtSource(cell))));
        stats.record(&DropOutcome::Rejected(Rejection::Move(MoveRejection::IllegalMove {
            kind: PieceKind::Pawn,
            from: cell,
            to: cell,
        })));
        stats.record(&DropOutcome::Rejected(Rejection::Move(MoveRejection::NoPieceAtSource(cell))));
        stats.record(&DropOutcome::Ignored(PayloadError::NoTarget));
        stats.record_malformed();

        assert_eq!(stats.applied, 2);
        assert_eq!(stats.rejected.get("no piece at source"), Some(&2));
        assert_eq!(stats.rejected.get("illegal move"), Some(&1));
        assert_eq!(stats.total_rejected(), 3);
        assert_eq!(stats.total(), 7);
        assert!(!stats.is_clean());
    }

    #[test]
    fn test_new_stats_are_clean() {
        let stats = ReplayStats::default();
        assert_eq!(stats.total(), 0);
        assert!(stats.is_clean());
        assert!(!stats.interrupted);
    }
}
