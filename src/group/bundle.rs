use tracing::debug;

use crate::checker::Package;
use crate::config::Options;
use crate::engine::{Engine, PerfStats};
use crate::error::Result;
use crate::issue::{Issue, map_problems};

use super::{CheckerRegistry, EnablementFlags, GroupIdentity};

/// Issues and timings from one group run.
#[derive(Debug, Default)]
pub struct GroupReport {
    pub issues: Vec<Issue>,
    pub stats: PerfStats,
}

/// Several checkers presented as a single analyzer.
#[derive(Debug)]
pub struct CheckerGroup {
    flags: EnablementFlags,
    registry: CheckerRegistry,
}

impl CheckerGroup {
    #[must_use]
    pub const fn new(flags: EnablementFlags, registry: CheckerRegistry) -> Self {
        Self { flags, registry }
    }

    #[must_use]
    pub const fn flags(&self) -> EnablementFlags {
        self.flags
    }

    #[must_use]
    pub fn identity(&self) -> GroupIdentity {
        self.flags.identity()
    }

    #[must_use]
    pub fn name(&self) -> String {
        self.identity().name()
    }

    #[must_use]
    pub fn description(&self) -> String {
        self.identity().description()
    }

    /// Run every enabled checker and return the surviving issues.
    ///
    /// # Errors
    /// Returns an error if the ignore specification is malformed, an enabled
    /// kind has no registered checker, or any checker fails.
    pub fn run(&self, packages: &[Package], options: &Options) -> Result<Vec<Issue>> {
        self.run_with_stats(packages, options)
            .map(|report| report.issues)
    }

    /// Like [`CheckerGroup::run`], also returning per-checker timings.
    ///
    /// # Errors
    /// See [`CheckerGroup::run`].
    pub fn run_with_stats(&self, packages: &[Package], options: &Options) -> Result<GroupReport> {
        let identity = self.identity();
        let kinds = identity.kinds();
        if kinds.is_empty() {
            debug!("no checkers enabled");
            return Ok(GroupReport::default());
        }

        let checkers = self.registry.instantiate(&kinds, &options.config)?;
        let output = Engine::new(checkers).run(packages, options)?;

        debug!(
            group = %identity.name(),
            problems = output.problems.len(),
            "checker group finished"
        );

        Ok(GroupReport {
            issues: map_problems(output.problems, &identity),
            stats: output.stats,
        })
    }
}

#[cfg(test)]
#[path = "bundle_tests.rs"]
mod tests;
