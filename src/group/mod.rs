//! Checker selection and group naming.
//!
//! The four known checker kinds run in a fixed priority order:
//! `unused`, `gosimple`, `staticcheck`, `stylecheck`. That order drives
//! activation, composite names and the order of the engine's output, no
//! matter how the enablement flags were assembled by the caller.

mod bundle;
mod identity;
mod registry;

pub use bundle::{CheckerGroup, GroupReport};
pub use identity::{ALL_COMBINED_NAME, COMPOSITE_PREFIX, GroupIdentity, describe};
pub use registry::{CheckerFactory, CheckerRegistry};

use std::fmt;

use serde::{Deserialize, Serialize};

/// A known checker, ordered by priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckerKind {
    Unused,
    Gosimple,
    Staticcheck,
    Stylecheck,
}

impl CheckerKind {
    /// Every kind in priority order.
    pub const ALL: [Self; 4] = [
        Self::Unused,
        Self::Gosimple,
        Self::Staticcheck,
        Self::Stylecheck,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unused => "unused",
            Self::Gosimple => "gosimple",
            Self::Staticcheck => "staticcheck",
            Self::Stylecheck => "stylecheck",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Unused => "Checks Go code for unused constants, variables, functions and types",
            Self::Gosimple => "Linter for Go source code that specializes in simplifying a code",
            Self::Staticcheck => {
                "Staticcheck is a go vet on steroids, applying a ton of static analysis checks"
            }
            Self::Stylecheck => "Stylecheck is a replacement for golint",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for CheckerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One boolean per known checker kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnablementFlags {
    #[serde(default)]
    pub unused: bool,
    #[serde(default)]
    pub gosimple: bool,
    #[serde(default)]
    pub staticcheck: bool,
    #[serde(default)]
    pub stylecheck: bool,
}

struct Activation {
    kind: CheckerKind,
    enabled: fn(&EnablementFlags) -> bool,
}

/// Activation rows in priority order. Adding a checker kind means adding a
/// row here and a variant to [`CheckerKind`].
const ACTIVATION_TABLE: &[Activation] = &[
    Activation {
        kind: CheckerKind::Unused,
        enabled: |flags| flags.unused,
    },
    Activation {
        kind: CheckerKind::Gosimple,
        enabled: |flags| flags.gosimple,
    },
    Activation {
        kind: CheckerKind::Staticcheck,
        enabled: |flags| flags.staticcheck,
    },
    Activation {
        kind: CheckerKind::Stylecheck,
        enabled: |flags| flags.stylecheck,
    },
];

impl EnablementFlags {
    #[must_use]
    pub const fn all() -> Self {
        Self {
            unused: true,
            gosimple: true,
            staticcheck: true,
            stylecheck: true,
        }
    }

    /// Flags with exactly the given kinds enabled.
    #[must_use]
    pub fn from_kinds(kinds: &[CheckerKind]) -> Self {
        let mut flags = Self::default();
        for kind in kinds {
            flags.set(*kind, true);
        }
        flags
    }

    pub const fn set(&mut self, kind: CheckerKind, enabled: bool) {
        match kind {
            CheckerKind::Unused => self.unused = enabled,
            CheckerKind::Gosimple => self.gosimple = enabled,
            CheckerKind::Staticcheck => self.staticcheck = enabled,
            CheckerKind::Stylecheck => self.stylecheck = enabled,
        }
    }

    #[must_use]
    pub fn is_enabled(&self, kind: CheckerKind) -> bool {
        ACTIVATION_TABLE
            .iter()
            .any(|row| row.kind == kind && (row.enabled)(self))
    }

    /// Enabled kinds in priority order.
    #[must_use]
    pub fn enabled_kinds(&self) -> Vec<CheckerKind> {
        ACTIVATION_TABLE
            .iter()
            .filter(|row| (row.enabled)(self))
            .map(|row| row.kind)
            .collect()
    }

    #[must_use]
    pub fn identity(&self) -> GroupIdentity {
        GroupIdentity::from_kinds(&self.enabled_kinds())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
