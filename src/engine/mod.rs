//! Bounded-concurrency execution of a list of checkers.

mod stats;

pub use stats::PerfStats;

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use crate::checker::{Checker, CheckerContext, Package, Problem};
use crate::config::Options;
use crate::error::{BundleError, Result};
use crate::ignore::IgnoreRules;
use crate::output::StatsTextFormatter;

/// Problems and timings from one engine run.
#[derive(Debug, Default)]
pub struct EngineOutput {
    pub problems: Vec<Problem>,
    pub stats: PerfStats,
}

/// Runs checkers against a shared package set.
pub struct Engine {
    checkers: Vec<Arc<dyn Checker>>,
}

impl Engine {
    #[must_use]
    pub fn new(checkers: Vec<Arc<dyn Checker>>) -> Self {
        Self { checkers }
    }

    #[must_use]
    pub fn checker_names(&self) -> Vec<&str> {
        self.checkers.iter().map(|checker| checker.name()).collect()
    }

    /// Run every checker and aggregate their problems.
    ///
    /// Problems are concatenated in checker order, each checker's own order
    /// preserved. The run is all-or-nothing: if any checker fails, no
    /// problems are returned. With `print_stats` set, timings go to stderr.
    ///
    /// # Errors
    /// Returns an error if the ignore specification is malformed, the worker
    /// pool cannot be built, or any checker fails.
    pub fn run(&self, packages: &[Package], options: &Options) -> Result<EngineOutput> {
        self.run_with_writer(packages, options, &mut io::stderr())
    }

    /// Like [`Engine::run`], but `print_stats` output goes to `stats_out`.
    ///
    /// Nothing is written when `print_stats` is off or the run fails.
    ///
    /// # Errors
    /// Same as [`Engine::run`]. Write failures on `stats_out` are ignored.
    pub fn run_with_writer(
        &self,
        packages: &[Package],
        options: &Options,
        stats_out: &mut impl Write,
    ) -> Result<EngineOutput> {
        if self.checkers.is_empty() {
            return Ok(EngineOutput::default());
        }

        let ignores = IgnoreRules::parse(&options.ignores)?;

        if packages.is_empty() {
            return Ok(EngineOutput::default());
        }

        let stats = Mutex::new(PerfStats::default());
        let per_checker = self.execute(packages, options, &stats)?;

        let mut stats = stats.into_inner().unwrap_or_else(PoisonError::into_inner);
        stats.order_by(&self.checker_names());

        let problems = per_checker.into_iter().flatten().collect();
        let problems = ignores.apply(problems, options.return_ignored);

        if options.print_stats {
            stats_out
                .write_all(StatsTextFormatter.format(&stats).as_bytes())
                .ok();
        }

        Ok(EngineOutput { problems, stats })
    }

    fn execute(
        &self,
        packages: &[Package],
        options: &Options,
        stats: &Mutex<PerfStats>,
    ) -> Result<Vec<Vec<Problem>>> {
        let ctx = CheckerContext::from_options(options);
        let run_all = || {
            self.checkers
                .par_iter()
                .map(|checker| run_checker(checker.as_ref(), packages, &ctx, stats))
                .collect::<Result<Vec<_>>>()
        };

        if options.max_concurrent_jobs == 0 {
            return run_all();
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.max_concurrent_jobs)
            .build()?;
        pool.install(run_all)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("checkers", &self.checker_names())
            .finish()
    }
}

fn run_checker(
    checker: &dyn Checker,
    packages: &[Package],
    ctx: &CheckerContext<'_>,
    stats: &Mutex<PerfStats>,
) -> Result<Vec<Problem>> {
    let name = checker.name();
    let wrap = |source| BundleError::Checker {
        checker: name.to_string(),
        source,
    };

    debug!(
        checker = name,
        packages = packages.len(),
        target_version = ctx.target_version,
        "initializing checker"
    );
    let start = Instant::now();
    checker.init(packages, ctx).map_err(wrap)?;
    let init_elapsed = start.elapsed();

    let start = Instant::now();
    let problems = checker.check(packages, ctx).map_err(wrap)?;
    let run_elapsed = start.elapsed();

    {
        let mut stats = stats.lock().unwrap_or_else(PoisonError::into_inner);
        stats.record_init(name, init_elapsed);
        stats.record_run(name, run_elapsed);
    }

    debug!(
        checker = name,
        problems = problems.len(),
        init = ?init_elapsed,
        run = ?run_elapsed,
        "checker finished"
    );

    Ok(problems)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
