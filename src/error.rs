use thiserror::Error;

use crate::group::CheckerKind;

/// Broad category of a [`BundleError`], for callers that branch on the
/// failure class instead of matching individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid input supplied before any checker ran.
    Config,
    /// A checker failed while analyzing packages.
    Checker,
    /// Worker pool failures.
    Internal,
}

#[derive(Error, Debug)]
pub enum BundleError {
    #[error("ignore parsing: malformed ignore entry '{entry}': expected exactly one ':'")]
    MalformedIgnore { entry: String },

    #[error("ignore parsing: invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("no checker registered for {kind}")]
    UnregisteredChecker { kind: CheckerKind },

    #[error("duplicate checker name '{name}'")]
    DuplicateChecker { name: String },

    #[error("failed to run {checker}: {source}")]
    Checker {
        checker: String,
        #[source]
        source: CheckerError,
    },

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl BundleError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedIgnore { .. }
            | Self::InvalidPattern { .. }
            | Self::Config(_)
            | Self::UnregisteredChecker { .. }
            | Self::DuplicateChecker { .. } => ErrorKind::Config,
            Self::Checker { .. } => ErrorKind::Checker,
            Self::WorkerPool(_) => ErrorKind::Internal,
        }
    }

    /// Short label used when rendering the error for humans.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::MalformedIgnore { .. } | Self::InvalidPattern { .. } => "Ignore",
            Self::Config(_)
            | Self::UnregisteredChecker { .. }
            | Self::DuplicateChecker { .. } => "Config",
            Self::Checker { .. } => "Checker",
            Self::WorkerPool(_) => "WorkerPool",
        }
    }

    /// Name of the checker that failed, if this is a checker failure.
    #[must_use]
    pub fn checker_name(&self) -> Option<&str> {
        match self {
            Self::Checker { checker, .. } => Some(checker),
            _ => None,
        }
    }

    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::MalformedIgnore { .. } => Some(
                "Write each ignore entry as <path-glob>:<check>[,<check>...] and separate entries with whitespace",
            ),
            Self::InvalidPattern { .. } => Some("Check the glob pattern syntax"),
            Self::UnregisteredChecker { .. } => {
                Some("Register a factory for every checker kind that is enabled")
            }
            Self::DuplicateChecker { .. } => {
                Some("Give every registered checker a distinct name")
            }
            Self::WorkerPool(_) => Some("Try lowering max_concurrent_jobs"),
            Self::Config(_) | Self::Checker { .. } => None,
        }
    }
}

/// Failure reported by an individual checker.
#[derive(Error, Debug)]
pub enum CheckerError {
    #[error("{0}")]
    Failed(String),

    #[error("package {package}: {message}")]
    Package { package: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BundleError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
