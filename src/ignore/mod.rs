//! Suppression rules of the form `<path-glob>:<check>[,<check>...]`.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use tracing::trace;

use crate::checker::Problem;
use crate::error::{BundleError, Result};

/// Pattern that matches every path without consulting the glob engine.
const MATCH_ALL: &str = "*";

#[derive(Debug, Clone)]
pub struct IgnoreRule {
    pattern: String,
    checks: Vec<String>,
    path_matcher: Option<GlobMatcher>,
    check_matcher: GlobSet,
}

impl IgnoreRule {
    /// Compile a rule from a path pattern and check identifiers.
    ///
    /// # Errors
    /// Returns an error if the pattern or any check identifier is not a valid glob.
    pub fn new(pattern: &str, checks: Vec<String>) -> Result<Self> {
        let path_matcher = if pattern == MATCH_ALL {
            None
        } else {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| BundleError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source: e,
                })?;
            Some(glob.compile_matcher())
        };

        let mut builder = GlobSetBuilder::new();
        for check in &checks {
            let glob = Glob::new(check).map_err(|e| BundleError::InvalidPattern {
                pattern: check.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        let check_matcher = builder.build().map_err(|e| BundleError::InvalidPattern {
            pattern: checks.join(","),
            source: e,
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            checks,
            path_matcher,
            check_matcher,
        })
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn checks(&self) -> &[String] {
        &self.checks
    }

    #[must_use]
    pub fn matches(&self, problem: &Problem) -> bool {
        self.matches_path(problem) && self.check_matcher.is_match(&problem.check)
    }

    fn matches_path(&self, problem: &Problem) -> bool {
        let Some(matcher) = &self.path_matcher else {
            return true;
        };

        matcher.is_match(problem.filename())
            || package_relative_path(problem).is_some_and(|path| matcher.is_match(path))
    }
}

/// `<package path>/<file name>`, with a trailing `_test` stripped from the
/// package path so external test packages match their package's rules.
fn package_relative_path(problem: &Problem) -> Option<PathBuf> {
    let package = problem.package.as_deref()?;
    let package = package.strip_suffix("_test").unwrap_or(package);
    let file_name = problem.filename().file_name()?;
    Some(Path::new(package).join(file_name))
}

/// Parsed ignore specification, read-only for the duration of a run.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    rules: Vec<IgnoreRule>,
}

impl IgnoreRules {
    /// Parse a whitespace-separated ignore specification.
    ///
    /// An empty specification yields no rules. Any entry without exactly one
    /// `:` fails the whole parse.
    ///
    /// # Errors
    /// Returns an error on a malformed entry or an invalid glob.
    pub fn parse(spec: &str) -> Result<Self> {
        let rules = spec
            .split_whitespace()
            .map(parse_entry)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    #[must_use]
    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if any rule matches both the problem's path and its check.
    #[must_use]
    pub fn is_suppressed(&self, problem: &Problem) -> bool {
        self.rules.iter().any(|rule| rule.matches(problem))
    }

    /// Drop suppressed problems, or flag them as ignored when
    /// `return_ignored` is set. Order is preserved.
    #[must_use]
    pub fn apply(&self, problems: Vec<Problem>, return_ignored: bool) -> Vec<Problem> {
        if self.is_empty() {
            return problems;
        }

        problems
            .into_iter()
            .filter_map(|mut problem| {
                if !self.is_suppressed(&problem) {
                    return Some(problem);
                }
                trace!(
                    check = %problem.check,
                    position = %problem.position,
                    "problem suppressed by ignore rule"
                );
                if return_ignored {
                    problem.ignored = true;
                    Some(problem)
                } else {
                    None
                }
            })
            .collect()
    }
}

fn parse_entry(entry: &str) -> Result<IgnoreRule> {
    let mut parts = entry.split(':');
    let (Some(pattern), Some(checks), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(BundleError::MalformedIgnore {
            entry: entry.to_string(),
        });
    };

    let checks = checks.split(',').map(String::from).collect();
    IgnoreRule::new(pattern, checks)
}

/// Parse an ignore specification into rules.
///
/// # Errors
/// See [`IgnoreRules::parse`].
pub fn parse_ignores(spec: &str) -> Result<IgnoreRules> {
    IgnoreRules::parse(spec)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
