//! Feature extensions and the pluggable handlers that merge them.

use serde::{Deserialize, Serialize};

use crate::BuildContext;

/// Error returned by an [`ExtensionHandler`] that fails to merge an extension.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// A named block of feature content outside the core feature schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    pub name: String,
    pub content: toml::Value,
}

impl Extension {
    pub fn new(name: impl Into<String>, content: impl Into<toml::Value>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Merges extensions the merge algorithm does not understand itself.
///
/// Handlers are consulted in registration order and the first one whose
/// [`can_handle`](Self::can_handle) returns `true` handles the extension
/// exclusively.
pub trait ExtensionHandler<F>: Send + Sync {
    /// Returns `true` if this handler claims `extension`.
    fn can_handle(&self, extension: &Extension) -> bool;

    /// Merges `source` into `target`, which is `None` when the target feature
    /// has no extension of that name yet.
    fn merge(
        &self,
        context: &BuildContext<F>,
        target: Option<&Extension>,
        source: &Extension,
    ) -> Result<Extension, HandlerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_from_descriptor() {
        let extension: Extension = toml::from_str(
            r#"
            name = "repoinit"
            content = "create path /content/app"
            "#,
        )
        .unwrap();

        assert_eq!(
            extension,
            Extension::new("repoinit", "create path /content/app")
        );
    }

    #[test]
    fn test_extension_with_table_content() {
        let mut content = toml::Table::new();
        content.insert("pid".into(), "org.example.Service".into());
        let extension = Extension::new("configurations", content);

        assert_eq!(
            extension.content.get("pid").and_then(toml::Value::as_str),
            Some("org.example.Service")
        );
    }
}
