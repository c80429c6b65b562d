use indexmap::IndexMap;

use super::interpolate::interpolate;
use super::OverridesError;

/// An ordered string-to-string override mapping.
///
/// Tables are filled once while a [`BuildContext`](crate::BuildContext) is
/// built and are read-only afterwards. Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTable {
    entries: IndexMap<String, String>,
}

impl OverrideTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies every entry of `source` into the table, overwriting existing keys.
    pub(crate) fn import<I, K, V>(&mut self, source: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in source {
            self.entries.insert(key.into(), value.into());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replaces `${name}` references in `text` with values from this table.
    ///
    /// `$$` produces a literal `$`. References to names missing from the table
    /// are kept as written.
    pub fn interpolate(&self, text: &str) -> Result<String, OverridesError> {
        interpolate(text, |name| self.get(name))
    }
}

impl<K, V> FromIterator<(K, V)> for OverrideTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.import(iter);
        table
    }
}

impl<'a> IntoIterator for &'a OverrideTable {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_overwrites_existing_keys() {
        let mut table: OverrideTable = [("a", "1"), ("b", "2")].into_iter().collect();
        table.import([("b", "3"), ("c", "4")]);

        assert_eq!(table.len(), 3);
        assert_eq!(table.get("b"), Some("3"));
        assert_eq!(table.get("c"), Some("4"));
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let table: OverrideTable = [("zeta", "1"), ("alpha", "2"), ("mid", "3")]
            .into_iter()
            .collect();
        let keys: Vec<&str> = table.iter().map(|(k, _)| k).collect();

        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_empty_table() {
        let table = OverrideTable::new();

        assert!(table.is_empty());
        assert_eq!(table.get("anything"), None);
        assert!(!table.contains_key("anything"));
    }

    #[test]
    fn test_interpolate_uses_table_values() {
        let table: OverrideTable = [("version", "1.2.0")].into_iter().collect();

        assert_eq!(
            table.interpolate("org.example:app:${version}").unwrap(),
            "org.example:app:1.2.0"
        );
    }
}
