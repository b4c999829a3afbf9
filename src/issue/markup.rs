use std::sync::LazyLock;

use regex::Regex;

/// Rewrites for the message shapes the bundled checkers emit. Each pattern
/// is anchored; the first one that matches wins.
const REWRITES: &[(&str, &str)] = &[
    // unused
    (
        r"^(func|const|field|type|var) (\S+) is unused$",
        "${1} `${2}` is unused",
    ),
    // staticcheck
    (
        r"^this value of (\S+) is never used$",
        "this value of `${1}` is never used",
    ),
    (
        r"^should check returned error before deferring response\.Close\(\)$",
        "should check returned error before deferring `response.Close()`",
    ),
    (
        r"^no value of type uint is less than 0$",
        "no value of type `uint` is less than `0`",
    ),
    (
        r"^(\S+) is deprecated: (.*)$",
        "`${1}` is deprecated: ${2}",
    ),
    // gosimple
    (
        r"^should use time\.Since instead of time\.Now\(\)\.Sub$",
        "should use `time.Since` instead of `time.Now().Sub`",
    ),
    (r"^redundant return statement$", "redundant `return` statement"),
    (r"^redundant break statement$", "redundant `break` statement"),
    (
        r"^should replace loop with (.*)$",
        "should replace loop with `${1}`",
    ),
    (
        r"^should replace this if statement with an unconditional strings\.TrimPrefix$",
        "should replace this `if` statement with an unconditional `strings.TrimPrefix`",
    ),
    (
        r"^should use a simple channel send/receive instead of select with a single case$",
        "should use a simple channel send/receive instead of `select` with a single case",
    ),
    (
        r"^should omit comparison to bool constant, can be simplified to (.+)$",
        "should omit comparison to bool constant, can be simplified to `${1}`",
    ),
    (
        r"^should use (\S+) instead of (.+)$",
        "should use `${1}` instead of `${2}`",
    ),
    (
        r"^should replace (.+) with (.+)$",
        "should replace `${1}` with `${2}`",
    ),
    // stylecheck
    (
        r"^exported (type|method|function|var|const) (\S+) should have comment or be unexported$",
        "exported ${1} `${2}` should have comment or be unexported",
    ),
    (
        r#"^comment on exported (type|method|function|var|const) (\S+) should be of the form "(\S+) \.\.\."$"#,
        "comment on exported ${1} `${2}` should be of the form `${3} ...`",
    ),
    (
        r"^receiver name (\S+) should be consistent with previous receiver name (\S+) for (\S+)$",
        "receiver name `${1}` should be consistent with previous receiver name `${2}` for `${3}`",
    ),
    (
        r"^(struct field|var|range var|const|type|func|method|func parameter|func result) (\S+) should be (\S+)$",
        "${1} `${2}` should be `${3}`",
    ),
    (
        r"^if block ends with a return statement, so drop this else and outdent its block$",
        "`if` block ends with a `return` statement, so drop this `else` and outdent its block",
    ),
];

/// Wraps code identifiers in checker messages with inline-code backticks.
pub struct IdentifierMarker {
    rewrites: Vec<(Regex, &'static str)>,
}

impl Default for IdentifierMarker {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierMarker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rewrites: REWRITES
                .iter()
                .map(|(pattern, replacement)| {
                    (Regex::new(pattern).expect("Invalid regex"), *replacement)
                })
                .collect(),
        }
    }

    /// Apply the first matching rewrite; unmatched text is returned as is.
    #[must_use]
    pub fn mark(&self, text: &str) -> String {
        self.rewrites
            .iter()
            .find(|(pattern, _)| pattern.is_match(text))
            .map_or_else(
                || text.to_string(),
                |(pattern, replacement)| pattern.replace(text, *replacement).into_owned(),
            )
    }
}

static MARKER: LazyLock<IdentifierMarker> = LazyLock::new(IdentifierMarker::new);

/// Mark identifiers using the shared [`IdentifierMarker`].
#[must_use]
pub fn mark_identifiers(text: &str) -> String {
    MARKER.mark(text)
}

#[cfg(test)]
#[path = "markup_tests.rs"]
mod tests;
