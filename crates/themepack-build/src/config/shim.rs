//! The self-registration shim wrapped around the custom-element entry.

use std::path::Path;

/// Module source that imports a theme and registers it globally by name.
///
/// `__THEME_MODULE__` and `__THEME_NAME__` are replaced with JSON string
/// literals by [`render_installer`].
pub const INSTALLER_TEMPLATE: &str = r#"import * as theme from __THEME_MODULE__;

var registry = (globalThis.themepackThemes = globalThis.themepackThemes || {});
registry[__THEME_NAME__] = theme.default || theme;

export default theme;
"#;

pub fn render_installer(module: &Path, theme_name: &str) -> String {
    let module = module.to_string_lossy().replace('\\', "/");
    INSTALLER_TEMPLATE
        .replace("__THEME_MODULE__", &serde_json::Value::String(module).to_string())
        .replace(
            "__THEME_NAME__",
            &serde_json::Value::String(theme_name.to_string()).to_string(),
        )
}
