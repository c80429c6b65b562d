use std::path::Path;

use super::env::EnvSource;
use super::file::FileSource;
use super::pairs::PairSource;
use super::source::{OverrideScope, OverrideSource};
use super::{OverrideTable, OverridesError};

/// Variable and property overrides for one build.
///
/// Hand these to
/// [`BuildContextBuilder::with_overrides`](crate::BuildContextBuilder::with_overrides).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub variables: OverrideTable,
    pub properties: OverrideTable,
}

impl Overrides {
    /// Creates a new overrides builder.
    pub fn builder() -> OverridesBuilder {
        OverridesBuilder::default()
    }

    fn table_mut(&mut self, scope: OverrideScope) -> &mut OverrideTable {
        match scope {
            OverrideScope::Variables => &mut self.variables,
            OverrideScope::Properties => &mut self.properties,
        }
    }
}

/// Builder for loading overrides from build descriptors, the environment and
/// command-line pairs.
///
/// Sources are applied in registration order, so a key set by a later source
/// replaces the value from an earlier one.
///
/// ## Example
///
/// ```no_run
/// use feature_builder::{OverrideScope, Overrides};
///
/// let overrides = Overrides::builder()
///     .with_file("build.toml", true)
///     .with_env("FEATURE_BUILD", "__")
///     .with_pairs(OverrideScope::Variables, ["version=1.2.0"])
///     .build()?;
/// # Ok::<(), feature_builder::OverridesError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct OverridesBuilder {
    sources: Vec<Box<dyn OverrideSource>>,
}

impl OverridesBuilder {
    /// Adds a TOML build descriptor with `[variables]` and `[properties]` tables.
    ///
    /// If `required` is `true`, the build fails if the file doesn't exist.
    /// Optional files that are missing are skipped.
    pub fn with_file(mut self, path: impl AsRef<Path>, required: bool) -> Self {
        self.sources.push(Box::new(FileSource::new(path, required)));
        self
    }

    /// Adds environment variables of the form `PREFIX<sep>VARIABLES<sep>NAME`
    /// or `PREFIX<sep>PROPERTIES<sep>NAME`.
    ///
    /// The remaining segments are lowercased and joined with `.` to form the key.
    ///
    /// # Panics
    ///
    /// Panics if `separator` is empty.
    pub fn with_env(mut self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.sources.push(Box::new(EnvSource::new(prefix, separator)));
        self
    }

    /// Adds `key=value` pairs for one scope.
    pub fn with_pairs<I, S>(mut self, scope: OverrideScope, pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources.push(Box::new(PairSource::new(scope, pairs)));
        self
    }

    /// Loads every source and merges the results.
    pub fn build(self) -> Result<Overrides, OverridesError> {
        let mut overrides = Overrides::default();

        for source in &self.sources {
            for entry in source.entries()? {
                overrides
                    .table_mut(entry.scope)
                    .import([(entry.key, entry.value)]);
            }
        }

        tracing::debug!(
            sources = self.sources.len(),
            variables = overrides.variables.len(),
            properties = overrides.properties.len(),
            "loaded overrides"
        );
        Ok(overrides)
    }
}
