//! Run several independent static-analysis checkers as one analyzer.
//!
//! A [`CheckerGroup`] selects checkers from [`EnablementFlags`], runs them
//! with bounded concurrency through the [`Engine`], filters problems with
//! ignore rules and maps what survives to [`Issue`]s tagged with the group
//! name.

pub mod checker;
pub mod config;
pub mod engine;
pub mod error;
pub mod group;
pub mod ignore;
pub mod issue;
pub mod output;

pub use checker::{Checker, CheckerContext, Package, Position, Problem, Severity};
pub use config::{CheckerConfig, Options};
pub use engine::{Engine, EngineOutput, PerfStats};
pub use error::{BundleError, CheckerError, ErrorKind, Result};
pub use group::{
    CheckerGroup, CheckerKind, CheckerRegistry, EnablementFlags, GroupIdentity, GroupReport,
};
pub use ignore::{IgnoreRule, IgnoreRules, parse_ignores};
pub use issue::{Issue, map_problems, mark_identifiers};
