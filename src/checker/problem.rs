use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Source location of a problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub filename: PathBuf,
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub fn new(filename: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            filename: filename.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename.display(), self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One raw defect report from a single checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub position: Position,
    pub message: String,
    /// Identifier of the check that fired, e.g. `SA4006`.
    pub check: String,
    /// Import path of the package the problem belongs to.
    pub package: Option<String>,
    pub severity: Option<Severity>,
    /// Set by the engine when an ignore rule matched and ignored problems
    /// are retained.
    pub ignored: bool,
}

impl Problem {
    #[must_use]
    pub fn new(position: Position, check: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
            check: check.into(),
            package: None,
            severity: None,
            ignored: false,
        }
    }

    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = Some(package.into());
        self
    }

    #[must_use]
    pub const fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    #[must_use]
    pub fn filename(&self) -> &Path {
        &self.position.filename
    }
}
