//! Human-readable rendering of run statistics.

mod perf;

pub use perf::StatsTextFormatter;
