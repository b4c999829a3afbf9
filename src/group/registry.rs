use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::checker::Checker;
use crate::config::CheckerConfig;
use crate::error::{BundleError, Result};

use super::CheckerKind;

/// Builds a checker instance from the shared configuration.
pub type CheckerFactory = Box<dyn Fn(&CheckerConfig) -> Arc<dyn Checker> + Send + Sync>;

/// Maps each checker kind to the factory that builds it.
pub struct CheckerRegistry {
    factories: IndexMap<CheckerKind, CheckerFactory>,
}

impl CheckerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: IndexMap::new(),
        }
    }

    /// Register (or replace) the factory for `kind`.
    pub fn register<F>(&mut self, kind: CheckerKind, factory: F)
    where
        F: Fn(&CheckerConfig) -> Arc<dyn Checker> + Send + Sync + 'static,
    {
        self.factories.insert(kind, Box::new(factory));
    }

    #[must_use]
    pub fn with<F>(mut self, kind: CheckerKind, factory: F) -> Self
    where
        F: Fn(&CheckerConfig) -> Arc<dyn Checker> + Send + Sync + 'static,
    {
        self.register(kind, factory);
        self
    }

    #[must_use]
    pub fn contains(&self, kind: CheckerKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// Registered kinds in priority order.
    #[must_use]
    pub fn kinds(&self) -> Vec<CheckerKind> {
        let mut kinds: Vec<_> = self.factories.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    /// Build one checker per kind, keeping the order of `kinds`.
    ///
    /// # Errors
    /// Returns an error if any kind has no registered factory, or if two
    /// factories produce checkers with the same name.
    pub fn instantiate(
        &self,
        kinds: &[CheckerKind],
        config: &CheckerConfig,
    ) -> Result<Vec<Arc<dyn Checker>>> {
        let checkers = kinds
            .iter()
            .map(|kind| {
                self.factories
                    .get(kind)
                    .map(|factory| factory(config))
                    .ok_or(BundleError::UnregisteredChecker { kind: *kind })
            })
            .collect::<Result<Vec<_>>>()?;

        // Names key error context and timings, so they must be unique per run.
        let mut seen = HashSet::new();
        for checker in &checkers {
            if !seen.insert(checker.name()) {
                return Err(BundleError::DuplicateChecker {
                    name: checker.name().to_string(),
                });
            }
        }

        Ok(checkers)
    }
}

impl Default for CheckerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CheckerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckerRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
