use crate::config::ThemepackConfig;
use crate::error::{ConfigError, Result};
use themepack_build::{BuildError, ProjectLayout};
use themepack_build::request::{validate_release, validate_theme_name};

impl ThemepackConfig {
    /// Check field values before anything touches the project.
    pub fn validate(&self) -> Result<()> {
        let name = match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                return Err(ConfigError::MissingField {
                    field: "name".to_string(),
                    hint: "Pass --name <theme> or set \"name\" in themepack.config.json"
                        .to_string(),
                }
                .into());
            }
        };

        if validate_theme_name(name).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "name".to_string(),
                value: name.to_string(),
                hint: "The theme name must be a single directory name under srcDir".to_string(),
            }
            .into());
        }

        if let Some(release) = self.release.as_deref() {
            if let Err(e) = validate_release(release) {
                let reason = match e {
                    BuildError::InvalidRequest(reason) => reason,
                    other => other.to_string(),
                };
                return Err(ConfigError::InvalidValue {
                    field: "release".to_string(),
                    value: release.to_string(),
                    hint: format!("The {}; use a plain version such as 1.2.0", reason),
                }
                .into());
            }
        }

        for (field, value) in [
            ("styleCodegen", &self.style_codegen),
            ("declarationCompiler", &self.declaration_compiler),
            ("bundler", &self.bundler),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: String::new(),
                    hint: "Name an executable in binDir".to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Check that the configured theme exists in `layout`.
    pub async fn validate_project(&self, layout: &ProjectLayout) -> Result<()> {
        self.request()?.ensure_theme_exists(layout).await?;
        Ok(())
    }
}
