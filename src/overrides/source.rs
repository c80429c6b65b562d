use std::fmt;

use super::OverridesError;

/// Which override table an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideScope {
    /// Placeholders declared by features.
    Variables,
    /// Framework-level settings.
    Properties,
}

impl OverrideScope {
    /// Matches a table name as written in a build descriptor or env var, ignoring case.
    pub(super) fn from_table_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("variables") {
            Some(Self::Variables)
        } else if name.eq_ignore_ascii_case("properties") {
            Some(Self::Properties)
        } else {
            None
        }
    }
}

impl fmt::Display for OverrideScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variables => f.write_str("variables"),
            Self::Properties => f.write_str("properties"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct OverrideEntry {
    pub scope: OverrideScope,
    pub key: String,
    pub value: String,
}

impl OverrideEntry {
    pub fn new(scope: OverrideScope, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            scope,
            key: key.into(),
            value: value.into(),
        }
    }
}

pub(super) trait OverrideSource: Send + Sync + fmt::Debug {
    fn entries(&self) -> Result<Vec<OverrideEntry>, OverridesError>;
}
