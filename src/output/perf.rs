use std::fmt::Write;
use std::time::Duration;

use indexmap::IndexMap;

use crate::engine::PerfStats;

/// Renders [`PerfStats`] for the `print_stats` side channel.
pub struct StatsTextFormatter;

impl StatsTextFormatter {
    #[must_use]
    pub fn format(&self, stats: &PerfStats) -> String {
        let mut output = String::new();
        write_section(&mut output, "Checker inits:", stats.checker_inits());
        write_section(&mut output, "Checker runs:", stats.checker_runs());
        output
    }
}

fn write_section(output: &mut String, title: &str, entries: &IndexMap<String, Duration>) {
    writeln!(output, "{title}").ok();
    for (checker, elapsed) in entries {
        writeln!(output, "\t{checker}: {elapsed:?}").ok();
    }
}

#[cfg(test)]
#[path = "perf_tests.rs"]
mod tests;
