use std::time::Duration;

use indexmap::IndexMap;
use serde::Serialize;

/// Per-checker timings collected during one engine run.
///
/// Entries are keyed by [`Checker::name`](crate::checker::Checker::name).
/// `CheckerRegistry::instantiate` rejects duplicate names; an [`Engine`](super::Engine)
/// built by hand with two same-named checkers keeps the last timing recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PerfStats {
    checker_inits: IndexMap<String, Duration>,
    checker_runs: IndexMap<String, Duration>,
}

impl PerfStats {
    pub(crate) fn record_init(&mut self, checker: &str, elapsed: Duration) {
        self.checker_inits.insert(checker.to_string(), elapsed);
    }

    pub(crate) fn record_run(&mut self, checker: &str, elapsed: Duration) {
        self.checker_runs.insert(checker.to_string(), elapsed);
    }

    /// Reorder entries to follow `names`; unknown names go last.
    pub(crate) fn order_by(&mut self, names: &[&str]) {
        let rank = |name: &str| {
            names
                .iter()
                .position(|n| *n == name)
                .unwrap_or(names.len())
        };
        self.checker_inits.sort_by(|a, _, b, _| rank(a).cmp(&rank(b)));
        self.checker_runs.sort_by(|a, _, b, _| rank(a).cmp(&rank(b)));
    }

    /// Initialization time per checker.
    #[must_use]
    pub const fn checker_inits(&self) -> &IndexMap<String, Duration> {
        &self.checker_inits
    }

    /// Analysis time per checker, excluding initialization.
    #[must_use]
    pub const fn checker_runs(&self) -> &IndexMap<String, Duration> {
        &self.checker_runs
    }

    #[must_use]
    pub fn init_duration(&self, checker: &str) -> Option<Duration> {
        self.checker_inits.get(checker).copied()
    }

    #[must_use]
    pub fn run_duration(&self, checker: &str) -> Option<Duration> {
        self.checker_runs.get(checker).copied()
    }

    /// Sum of all recorded init and run time (CPU time across workers, not
    /// wall-clock time).
    #[must_use]
    pub fn total(&self) -> Duration {
        self.checker_inits
            .values()
            .chain(self.checker_runs.values())
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checker_inits.is_empty() && self.checker_runs.is_empty()
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
