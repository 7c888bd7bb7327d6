//! Process-wide session counters, summarised in the log when the binary exits.
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static RIDDLES_SERVED: AtomicU64 = AtomicU64::new(0);
static RIDDLE_FAILURES: AtomicU64 = AtomicU64::new(0);
static WINS: AtomicU64 = AtomicU64::new(0);
static LOSSES: AtomicU64 = AtomicU64::new(0);
static HINTS_SHOWN: AtomicU64 = AtomicU64::new(0);
static HINT_FAILURES: AtomicU64 = AtomicU64::new(0);
static VALIDATION_FAILURES: AtomicU64 = AtomicU64::new(0);

pub fn inc_riddles_served() {
    RIDDLES_SERVED.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_riddle_failures() {
    RIDDLE_FAILURES.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_wins() {
    WINS.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_losses() {
    LOSSES.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_hints_shown() {
    HINTS_SHOWN.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_hint_failures() {
    HINT_FAILURES.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_validation_failures() {
    VALIDATION_FAILURES.fetch_add(1, Ordering::Relaxed);
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub riddles_served: u64,
    pub riddle_failures: u64,
    pub wins: u64,
    pub losses: u64,
    pub hints_shown: u64,
    pub hint_failures: u64,
    pub validation_failures: u64,
}

pub fn snapshot() -> Snapshot {
    Snapshot {
        riddles_served: RIDDLES_SERVED.load(Ordering::Relaxed),
        riddle_failures: RIDDLE_FAILURES.load(Ordering::Relaxed),
        wins: WINS.load(Ordering::Relaxed),
        losses: LOSSES.load(Ordering::Relaxed),
        hints_shown: HINTS_SHOWN.load(Ordering::Relaxed),
        hint_failures: HINT_FAILURES.load(Ordering::Relaxed),
        validation_failures: VALIDATION_FAILURES.load(Ordering::Relaxed),
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "riddles={} riddle_failures={} wins={} losses={} hints={} hint_failures={} validation_failures={}",
            self.riddles_served,
            self.riddle_failures,
            self.wins,
            self.losses,
            self.hints_shown,
            self.hint_failures,
            self.validation_failures
        )
    }
}
