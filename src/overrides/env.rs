use super::source::{OverrideEntry, OverrideScope, OverrideSource};
use super::OverridesError;

/// Reads overrides from environment variables.
///
/// `MYBUILD__VARIABLES__VERSION=1.2` becomes the variable `version`, and
/// `MYBUILD__PROPERTIES__FRAMEWORK__DEBUG=true` the property `framework.debug`.
#[derive(Debug, Clone)]
pub(super) struct EnvSource {
    prefix: String,
    separator: String,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        assert!(!separator.is_empty(), "separator must not be empty");
        Self {
            prefix: prefix.into(),
            separator,
        }
    }

    fn collect<I>(&self, vars: I) -> Vec<OverrideEntry>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let prefix_with_sep = format!("{}{}", self.prefix, self.separator);
        let mut entries = Vec::new();

        for (key, value) in vars {
            let Some(path) = key.strip_prefix(&prefix_with_sep) else {
                continue;
            };
            let Some((table, rest)) = path.split_once(self.separator.as_str()) else {
                continue;
            };
            let Some(scope) = OverrideScope::from_table_name(table) else {
                continue;
            };
            let segments: Vec<&str> = rest.split(self.separator.as_str()).collect();
            if segments.iter().any(|s| s.is_empty()) {
                tracing::trace!(key = %key, "ignoring env var with empty key segment");
                continue;
            }

            let name = segments
                .iter()
                .map(|s| s.to_lowercase())
                .collect::<Vec<_>>()
                .join(".");
            entries.push(OverrideEntry::new(scope, name, value));
        }

        // Process environment order is unspecified.
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        entries
    }
}

impl OverrideSource for EnvSource {
    fn entries(&self) -> Result<Vec<OverrideEntry>, OverridesError> {
        let entries = self.collect(std::env::vars());
        tracing::debug!(
            prefix = %self.prefix,
            count = entries.len(),
            "loaded overrides from environment"
        );
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_env_maps_scopes_and_paths() {
        let source = EnvSource::new("FB", "__");
        let entries = source.collect(vars(&[
            ("FB__VARIABLES__VERSION", "1.2"),
            ("FB__properties__FRAMEWORK__DEBUG", "true"),
            ("FB__OTHER__IGNORED", "x"),
            ("UNRELATED", "y"),
            ("FB__VARIABLES", "no-key"),
        ]));

        assert_eq!(
            entries,
            vec![
                OverrideEntry::new(OverrideScope::Properties, "framework.debug", "true"),
                OverrideEntry::new(OverrideScope::Variables, "version", "1.2"),
            ]
        );
    }

    #[test]
    fn test_env_skips_empty_segments() {
        let source = EnvSource::new("FB", "__");
        let entries = source.collect(vars(&[
            ("FB__VARIABLES__A____B", "doubled"),
            ("FB__VARIABLES__TRAILING__", "trailing"),
            ("FB__VARIABLES__", "empty"),
            ("FB__VARIABLES__OK", "kept"),
        ]));

        assert_eq!(
            entries,
            vec![OverrideEntry::new(OverrideScope::Variables, "ok", "kept")]
        );
    }

    #[test]
    fn test_env_values_are_kept_verbatim() {
        let source = EnvSource::new("FB", "_");
        let entries = source.collect(vars(&[("FB_VARIABLES_PATH", "/opt/App Data")]));

        assert_eq!(entries[0].value, "/opt/App Data");
        assert_eq!(entries[0].key, "path");
    }

    #[test]
    #[should_panic(expected = "separator must not be empty")]
    fn test_env_empty_separator_panics() {
        let _ = EnvSource::new("FB", "");
    }
}
