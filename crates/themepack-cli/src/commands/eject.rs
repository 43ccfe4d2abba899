//! `themepack eject`.
//!
//! Writes what a build would use into one directory:
//!
//! | File                 | Contents                                        |
//! |----------------------|-------------------------------------------------|
//! | `bundle.config.json` | the resolved bundle configuration               |
//! | `build-options.json` | the build options, usable with `--config`       |
//! | `theme-installer.js` | the self-registration shim for the theme entry  |

use crate::cli::EjectArgs;
use crate::commands::utils::{ensure_output_dir, resolve_path, resolve_theme};
use crate::config::ThemepackConfig;
use crate::error::{Result, ResultExt};
use crate::ui;
use std::path::{Path, PathBuf};
use themepack_build::config::shim;
use themepack_build::version::resolve_release_version;
use themepack_build::BundleConfigBuilder;
use tracing::debug;

pub const BUNDLE_CONFIG_FILE: &str = "bundle.config.json";
pub const BUILD_OPTIONS_FILE: &str = "build-options.json";
pub const INSTALLER_FILE: &str = "theme-installer.js";

pub async fn execute(args: EjectArgs, quiet: bool) -> Result<()> {
    let target = resolve_theme(&args.theme).await?;
    let layout = &target.layout;
    let request = &target.request;
    let theme = request.theme_name();

    let bundle_config = BundleConfigBuilder::new(layout)
        .minify(target.config.minify)
        .sourcemap(target.config.sourcemap)
        .build(request)
        .await?;
    let release = resolve_release_version(request, &layout.package_json()).await?;

    let options = ThemepackConfig {
        name: Some(theme.to_string()),
        release: Some(release),
        cwd: None,
        ..target.config.clone()
    };

    let out_dir = resolve_path(&args.out, layout.root());
    ensure_output_dir(&out_dir).await?;

    let entry = layout
        .resolve(layout.theme_source_dir(theme))
        .join("index.ts");
    let written = [
        write(&out_dir, BUNDLE_CONFIG_FILE, serde_json::to_string_pretty(&bundle_config)?).await?,
        write(&out_dir, BUILD_OPTIONS_FILE, serde_json::to_string_pretty(&options)?).await?,
        write(&out_dir, INSTALLER_FILE, shim::render_installer(&entry, theme)).await?,
    ];

    if !quiet {
        for path in &written {
            ui::success(&format!("Wrote {}", display_relative(path, layout.root())));
        }
        ui::info(&format!(
            "to build run themepack build --config {}",
            display_relative(&out_dir.join(BUILD_OPTIONS_FILE), layout.root())
        ));
    }
    Ok(())
}

async fn write(dir: &Path, name: &str, contents: String) -> Result<PathBuf> {
    let path = dir.join(name);
    debug!(path = %path.display(), "writing ejected file");
    tokio::fs::write(&path, contents)
        .await
        .context(format!("Failed to write {}", path.display()))?;
    Ok(path)
}

fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
