#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use lint_bundle::{
    Checker, CheckerConfig, CheckerContext, CheckerError, CheckerKind, CheckerRegistry, Package,
    Position, Problem,
};

/// A checker that reports a fixed list of problems.
pub struct ScriptedChecker {
    name: String,
    problems: Vec<Problem>,
    error: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedChecker {
    pub fn new(name: &str, problems: Vec<Problem>) -> Self {
        Self {
            name: name.to_string(),
            problems,
            error: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(name: &str, message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Self::new(name, Vec::new())
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl Checker for ScriptedChecker {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(
        &self,
        _packages: &[Package],
        _ctx: &CheckerContext<'_>,
    ) -> Result<Vec<Problem>, CheckerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.error {
            Some(message) => Err(CheckerError::Failed(message.clone())),
            None => Ok(self.problems.clone()),
        }
    }
}

/// `count` problems for `kind`, one per line of `<kind>/<kind>.go`.
pub fn problems_for(kind: CheckerKind, count: usize) -> Vec<Problem> {
    let file = format!("{0}/{0}.go", kind.name());
    (1..=count)
        .map(|line| {
            Problem::new(
                Position::new(&file, line, 1),
                "U1000",
                format!("var v{line} is unused"),
            )
            .with_package(format!("example.com/{}", kind.name()))
        })
        .collect()
}

/// Registry where every kind reports `count` problems.
pub fn registry_with_problems(count: usize) -> CheckerRegistry {
    let mut registry = CheckerRegistry::new();
    for kind in CheckerKind::ALL {
        registry.register(kind, move |_: &CheckerConfig| -> Arc<dyn Checker> {
            Arc::new(ScriptedChecker::new(kind.name(), problems_for(kind, count)))
        });
    }
    registry
}

pub fn sample_packages() -> Vec<Package> {
    vec![
        Package::new("example.com/app", "app", vec!["app/main.go".into()]),
        Package::new("example.com/lib", "lib", vec!["lib/lib.go".into()]),
    ]
}
