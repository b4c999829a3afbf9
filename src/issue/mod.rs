mod markup;

pub use markup::{IdentifierMarker, mark_identifiers};

use serde::Serialize;

use crate::checker::{Position, Problem, Severity};
use crate::group::GroupIdentity;

/// Externally visible defect record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub pos: Position,
    pub text: String,
    /// Name of the checker group that produced the issue, shared by every
    /// issue from one run.
    pub from_linter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "is_false")]
    pub ignored: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

impl Issue {
    #[must_use]
    pub fn from_problem(problem: Problem, from_linter: &str) -> Self {
        Self {
            pos: problem.position,
            text: mark_identifiers(&problem.message),
            from_linter: from_linter.to_string(),
            severity: problem.severity,
            ignored: problem.ignored,
        }
    }
}

/// Convert problems to issues tagged with the group's name.
#[must_use]
pub fn map_problems(problems: Vec<Problem>, identity: &GroupIdentity) -> Vec<Issue> {
    let from_linter = identity.name();
    problems
        .into_iter()
        .map(|problem| Issue::from_problem(problem, &from_linter))
        .collect()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
