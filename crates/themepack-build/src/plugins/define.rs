use crate::bundler::{BundlePlugin, Compilation};
use indexmap::IndexMap;

/// Replaces global identifiers with constant expressions at compile time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinePlugin {
    definitions: IndexMap<String, String>,
}

impl DefinePlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `key` as the raw JS expression `expression`.
    pub fn with(mut self, key: impl Into<String>, expression: impl Into<String>) -> Self {
        self.definitions.insert(key.into(), expression.into());
        self
    }

    /// `THEME_NAME` as a string literal.
    pub fn theme_name(name: &str) -> Self {
        Self::new().with(
            "THEME_NAME",
            serde_json::Value::String(name.to_string()).to_string(),
        )
    }
}

impl BundlePlugin for DefinePlugin {
    fn name(&self) -> &str {
        "define"
    }

    fn apply(&self, compilation: &mut Compilation) {
        for (key, value) in &self.definitions {
            compilation.define(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_name_is_quoted() {
        let mut compilation = Compilation::new();
        DefinePlugin::theme_name("my \"quoted\" theme").apply(&mut compilation);
        assert_eq!(
            compilation.definitions()["THEME_NAME"],
            r#""my \"quoted\" theme""#
        );
    }
}
