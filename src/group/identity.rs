use super::CheckerKind;

/// Name used when every known checker is enabled.
pub const ALL_COMBINED_NAME: &str = "megacheck";

/// Prefix of the `combined.{a,b}` name used for two or three checkers.
pub const COMPOSITE_PREFIX: &str = "combined";

const ALL_COMBINED_DESCRIPTION: &str =
    "4 sub-linters in one: unused, gosimple, staticcheck and stylecheck";

/// Derived name and description of a set of active checkers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupIdentity {
    /// Nothing enabled; there is nothing to run.
    Empty,
    Single(CheckerKind),
    /// Two or three kinds, always held in priority order.
    Composite(Vec<CheckerKind>),
    All,
}

impl GroupIdentity {
    /// Build the identity for a set of kinds. Order and duplicates in the
    /// input do not matter.
    #[must_use]
    pub fn from_kinds(kinds: &[CheckerKind]) -> Self {
        let mut kinds = kinds.to_vec();
        kinds.sort_unstable();
        kinds.dedup();

        match kinds.len() {
            0 => Self::Empty,
            1 => Self::Single(kinds[0]),
            n if n == CheckerKind::ALL.len() => Self::All,
            _ => Self::Composite(kinds),
        }
    }

    /// Parse a name produced by [`GroupIdentity::name`].
    ///
    /// Composite names must list their members in priority order, exactly
    /// as they are generated.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name.is_empty() {
            return Some(Self::Empty);
        }
        if name == ALL_COMBINED_NAME {
            return Some(Self::All);
        }
        if let Some(kind) = CheckerKind::from_name(name) {
            return Some(Self::Single(kind));
        }

        let members = name
            .strip_prefix(COMPOSITE_PREFIX)?
            .strip_prefix(".{")?
            .strip_suffix('}')?;
        let kinds = members
            .split(',')
            .map(CheckerKind::from_name)
            .collect::<Option<Vec<_>>>()?;

        match Self::from_kinds(&kinds) {
            Self::Composite(ordered) if ordered == kinds => Some(Self::Composite(ordered)),
            _ => None,
        }
    }

    #[must_use]
    pub fn kinds(&self) -> Vec<CheckerKind> {
        match self {
            Self::Empty => Vec::new(),
            Self::Single(kind) => vec![*kind],
            Self::Composite(kinds) => kinds.clone(),
            Self::All => CheckerKind::ALL.to_vec(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Single(kind) => kind.name().to_string(),
            Self::Composite(kinds) => {
                let names: Vec<&str> = kinds.iter().map(|kind| kind.name()).collect();
                format!("{COMPOSITE_PREFIX}.{{{}}}", names.join(","))
            }
            Self::All => ALL_COMBINED_NAME.to_string(),
        }
    }

    /// Human-readable description. Empty only for [`GroupIdentity::Empty`].
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Single(kind) => kind.description().to_string(),
            Self::Composite(kinds) => kinds
                .iter()
                .map(|kind| kind.description())
                .collect::<Vec<_>>()
                .join("; "),
            Self::All => ALL_COMBINED_DESCRIPTION.to_string(),
        }
    }
}

/// Description for a group name; unknown names describe as `""`.
#[must_use]
pub fn describe(name: &str) -> String {
    GroupIdentity::from_name(name)
        .map(|identity| identity.description())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;
