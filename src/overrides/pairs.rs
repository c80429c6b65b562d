use super::source::{OverrideEntry, OverrideScope, OverrideSource};
use super::OverridesError;

/// `key=value` overrides, as given on a command line.
///
/// Only the first `=` separates key from value, so values may contain `=`.
#[derive(Debug, Clone)]
pub(super) struct PairSource {
    scope: OverrideScope,
    pairs: Vec<String>,
}

impl PairSource {
    pub fn new<I, S>(scope: OverrideScope, pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scope,
            pairs: pairs.into_iter().map(Into::into).collect(),
        }
    }
}

impl OverrideSource for PairSource {
    fn entries(&self) -> Result<Vec<OverrideEntry>, OverridesError> {
        self.pairs
            .iter()
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    Ok(OverrideEntry::new(self.scope, key.trim(), value))
                }
                _ => Err(OverridesError::MalformedPair(pair.clone())),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_split_on_first_equals() {
        let source = PairSource::new(OverrideScope::Variables, ["opts=-Xmx=512m", " name =app"]);
        let entries = source.entries().unwrap();

        assert_eq!(
            entries,
            vec![
                OverrideEntry::new(OverrideScope::Variables, "opts", "-Xmx=512m"),
                OverrideEntry::new(OverrideScope::Variables, "name", "app"),
            ]
        );
    }

    #[test]
    fn test_pairs_allow_empty_value() {
        let source = PairSource::new(OverrideScope::Properties, ["cleared="]);

        assert_eq!(source.entries().unwrap()[0].value, "");
    }

    #[test]
    fn test_pairs_reject_malformed() {
        for bad in ["novalue", "=value", "  =x"] {
            let source = PairSource::new(OverrideScope::Properties, [bad]);
            assert!(
                matches!(source.entries(), Err(OverridesError::MalformedPair(p)) if p == bad),
                "{bad} should be rejected"
            );
        }
    }
}
