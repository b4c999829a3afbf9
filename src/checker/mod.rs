mod problem;

pub use problem::{Position, Problem, Severity};

use std::path::PathBuf;

use crate::config::{CheckerConfig, Options};
use crate::error::CheckerError;

/// A type-checked compilation unit handed to every checker.
///
/// Produced by the program-loading front end; read-only for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Import path, e.g. `example.com/project/pkg`.
    pub path: String,
    pub name: String,
    pub files: Vec<PathBuf>,
}

impl Package {
    #[must_use]
    pub fn new(path: impl Into<String>, name: impl Into<String>, files: Vec<PathBuf>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            files,
        }
    }
}

/// Run-wide inputs shared by every checker besides the packages.
#[derive(Debug, Clone, Copy)]
pub struct CheckerContext<'a> {
    /// Target language version marker, e.g. `11` for 1.11.
    pub target_version: u32,
    pub config: &'a CheckerConfig,
}

impl<'a> CheckerContext<'a> {
    #[must_use]
    pub const fn new(target_version: u32, config: &'a CheckerConfig) -> Self {
        Self {
            target_version,
            config,
        }
    }

    #[must_use]
    pub const fn from_options(options: &'a Options) -> Self {
        Self::new(options.target_version, &options.config)
    }
}

/// An independent analyzer that turns a package set into problems.
///
/// Checkers share nothing mutable; the engine may call several of them at
/// once from different worker threads.
pub trait Checker: Send + Sync {
    /// Stable short name, used in error context and performance stats.
    fn name(&self) -> &str;

    /// Prepare whole-program state before [`Checker::check`] runs.
    ///
    /// # Errors
    /// Returns an error if the checker cannot be set up for these packages.
    fn init(&self, _packages: &[Package], _ctx: &CheckerContext<'_>) -> Result<(), CheckerError> {
        Ok(())
    }

    /// Analyze the packages and report problems in a stable order.
    ///
    /// # Errors
    /// Returns an error if the analysis itself fails.
    fn check(
        &self,
        packages: &[Package],
        ctx: &CheckerContext<'_>,
    ) -> Result<Vec<Problem>, CheckerError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
