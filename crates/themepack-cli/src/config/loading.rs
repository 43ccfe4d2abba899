use crate::cli::ThemeArgs;
use crate::config::ThemepackConfig;
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
    value::Uncased,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file looked up in the project root when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "themepack.config.json";

pub const ENV_PREFIX: &str = "THEMEPACK_";

/// Environment keys read after the prefix, compared case-insensitively.
const ENV_KEYS: &[&str] = &[
    "name",
    "release",
    "cwd",
    "src_dir",
    "out_dir",
    "bin_dir",
    "tsconfig",
    "style_codegen",
    "declaration_compiler",
    "bundler",
    "minify",
    "sourcemap",
    "copy_assets",
];

/// Values given on the command line. Absent flags leave lower layers alone.
#[derive(Debug, Default, Serialize)]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    release: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cwd: Option<PathBuf>,
}

impl From<&ThemeArgs> for CliOverrides {
    fn from(args: &ThemeArgs) -> Self {
        Self {
            name: args.name.clone(),
            release: args.release.clone(),
            cwd: args.cwd.clone(),
        }
    }
}

/// Field name for an environment key: `SRC_DIR` becomes `srcDir`.
fn env_field_name(key: &str) -> String {
    let mut field = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c == '_' {
            upper_next = !field.is_empty();
        } else if upper_next {
            field.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            field.push(c.to_ascii_lowercase());
        }
    }
    field
}

fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX)
        .only(ENV_KEYS)
        .map(|key| Uncased::from_owned(env_field_name(key.as_str())))
        .lowercase(false)
}

impl ThemepackConfig {
    /// Load configuration from every layer.
    ///
    /// `base_dir` is the invocation directory; relative `--cwd` and
    /// `--config` paths are resolved against it. Without `--config`, the
    /// config file is looked up in the `--cwd` directory (or `base_dir`).
    pub fn load(args: &ThemeArgs, base_dir: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default_config()));

        if let Some(path) = Self::config_file(args, base_dir)? {
            debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Json::file(path));
        }

        figment = figment.merge(env_provider());
        figment = figment.merge(Serialized::defaults(CliOverrides::from(args)));

        figment.extract().map_err(|e| {
            ConfigError::InvalidValue {
                field: "configuration".to_string(),
                value: e.to_string(),
                hint: format!("Check {} syntax and field types", CONFIG_FILE_NAME),
            }
            .into()
        })
    }

    fn config_file(args: &ThemeArgs, base_dir: &Path) -> Result<Option<PathBuf>> {
        if let Some(explicit) = &args.config {
            let path = base_dir.join(explicit);
            if !path.is_file() {
                return Err(ConfigError::NotFound(path).into());
            }
            return Ok(Some(path));
        }

        let search_dir = match &args.cwd {
            Some(cwd) => base_dir.join(cwd),
            None => base_dir.to_path_buf(),
        };
        let default_path = search_dir.join(CONFIG_FILE_NAME);
        Ok(default_path.is_file().then_some(default_path))
    }
}
