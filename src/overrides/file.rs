//! Build descriptor file source.

use std::path::{Path, PathBuf};

use toml::{Table, Value};

use super::source::{OverrideEntry, OverrideScope, OverrideSource};
use super::OverridesError;

/// Loads overrides from a TOML build descriptor.
///
/// The file may contain a `[variables]` and a `[properties]` table. Their
/// values must be scalars; numbers, booleans and datetimes are converted to
/// their string form. Other top-level keys are ignored.
///
/// ```toml
/// [variables]
/// version = "1.2.0"
///
/// [properties]
/// "org.osgi.framework.startlevel.beginning" = 20
/// ```
#[derive(Debug, Clone)]
pub(super) struct FileSource {
    path: PathBuf,
    required: bool,
}

impl FileSource {
    /// Creates a new file source.
    ///
    /// If `required` is true, loading fails if the file doesn't exist.
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }
}

impl OverrideSource for FileSource {
    fn entries(&self) -> Result<Vec<OverrideEntry>, OverridesError> {
        let Some(table) = load_descriptor(&self.path, self.required)? else {
            tracing::debug!(
                path = %self.path.display(),
                "optional overrides file not found, skipping"
            );
            return Ok(vec![]);
        };

        let mut entries = Vec::new();
        for (name, value) in table {
            let Some(scope) = OverrideScope::from_table_name(&name) else {
                tracing::trace!(
                    path = %self.path.display(),
                    key = %name,
                    "ignoring unknown top-level key"
                );
                continue;
            };
            let Value::Table(values) = value else {
                return Err(OverridesError::NonScalarValue(name));
            };
            for (key, value) in values {
                let value = scalar_to_string(&value)
                    .ok_or_else(|| OverridesError::NonScalarValue(format!("{scope}.{key}")))?;
                entries.push(OverrideEntry::new(scope, key, value));
            }
        }

        tracing::debug!(
            path = %self.path.display(),
            count = entries.len(),
            "loaded overrides file"
        );
        Ok(entries)
    }
}

/// Loads and parses a TOML build descriptor.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
fn load_descriptor(path: &Path, required: bool) -> Result<Option<Table>, OverridesError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let table = toml::from_str(&contents).map_err(|e| OverridesError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;
            Ok(Some(table))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if required {
                Err(OverridesError::FileNotFound(path.to_path_buf()))
            } else {
                Ok(None)
            }
        }
        Err(e) => Err(OverridesError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        // TOML rendering keeps floats like `1.0` intact.
        Value::Integer(_) | Value::Float(_) | Value::Boolean(_) | Value::Datetime(_) => {
            Some(value.to_string())
        }
        Value::Array(_) | Value::Table(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn descriptor(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_file_source_loads_both_tables() {
        let file = descriptor(
            r#"
            name = "ignored"

            [variables]
            version = "1.2.0"

            [properties]
            "framework.startlevel" = 20
            debug = true
            "#,
        );

        let entries = FileSource::new(file.path(), true).entries().unwrap();

        assert_eq!(
            entries,
            vec![
                OverrideEntry::new(OverrideScope::Properties, "debug", "true"),
                OverrideEntry::new(OverrideScope::Properties, "framework.startlevel", "20"),
                OverrideEntry::new(OverrideScope::Variables, "version", "1.2.0"),
            ]
        );
    }

    #[test]
    fn test_file_source_keeps_float_and_datetime_text() {
        let file = descriptor(
            r#"
            [variables]
            version = 1.0
            ratio = 2.5
            released = 1979-05-27
            "#,
        );

        let entries = FileSource::new(file.path(), true).entries().unwrap();
        let value = |key: &str| {
            entries
                .iter()
                .find(|e| e.key == key)
                .map(|e| e.value.as_str())
        };

        assert_eq!(value("version"), Some("1.0"));
        assert_eq!(value("ratio"), Some("2.5"));
        assert_eq!(value("released"), Some("1979-05-27"));
    }

    #[test]
    fn test_file_source_rejects_non_scalar() {
        let file = descriptor(
            r#"
            [variables]
            list = ["a", "b"]
            "#,
        );

        let result = FileSource::new(file.path(), true).entries();

        assert!(matches!(
            result,
            Err(OverridesError::NonScalarValue(key)) if key == "variables.list"
        ));
    }

    #[test]
    fn test_file_source_parse_error() {
        let file = descriptor("[variables\nbroken");

        let result = FileSource::new(file.path(), true).entries();

        assert!(matches!(result, Err(OverridesError::ParseError { .. })));
    }

    #[test]
    fn test_file_source_required_missing() {
        let source = FileSource::new("/nonexistent/path/build.toml", true);

        assert!(matches!(source.entries(), Err(OverridesError::FileNotFound(_))));
    }

    #[test]
    fn test_file_source_optional_missing() {
        let source = FileSource::new("/nonexistent/path/build.toml", false);

        assert!(source.entries().unwrap().is_empty());
    }
}
