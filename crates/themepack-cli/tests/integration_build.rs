//! End-to-end tests for `themepack build` and `themepack eject`.
//!
//! Each test creates a throwaway project whose `node_modules/.bin` holds
//! shell stubs for `tcm`, `tsc` and `esbuild`, then drives the real binary.

#![cfg(unix)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serial_test::serial;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;

const TCM_OK: &str = r#"#!/bin/sh
for arg in "$@"; do
  case "$arg" in
    -p=*) pattern="${arg#-p=}" ;;
  esac
done
dir="$(dirname "$pattern")"
for css in "$dir"/*.m.css; do
  [ -f "$css" ] && echo "export const root: string;" > "$css.d.ts"
done
exit 0
"#;

const TCM_FAIL: &str = r#"#!/bin/sh
echo "boom: cannot parse button.m.css" >&2
exit 1
"#;

const TSC: &str = r#"#!/bin/sh
while [ $# -gt 0 ]; do
  case "$1" in
    --outDir) out="$2"; shift 2 ;;
    *) shift ;;
  esac
done
mkdir -p "$out"
echo "export {};" > "$out/index.d.ts"
"#;

const ESBUILD: &str = r#"#!/bin/sh
for arg in "$@"; do
  case "$arg" in
    --outfile=*) out="${arg#--outfile=}" ;;
  esac
done
mkdir -p "$(dirname "$out")"
echo "(()=>{})();" > "$out"
echo ".root{}" > "${out%.js}.css"
"#;

fn write_tool(project: &Path, name: &str, script: &str) {
    let bin = project.join("node_modules/.bin");
    fs::create_dir_all(&bin).unwrap();
    let path = bin.join(name);
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn project(tcm: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::write(root.join("package.json"), r#"{ "name": "themes", "version": "1.1.1" }"#).unwrap();
    fs::write(root.join("tsconfig.json"), r#"{ "compilerOptions": {} }"#).unwrap();

    let theme = root.join("src/my-theme");
    fs::create_dir_all(theme.join("assets")).unwrap();
    fs::write(theme.join("index.ts"), "import * as button from './button.m.css';\nexport default { button };\n").unwrap();
    fs::write(theme.join("button.m.css"), ".root { color: red; }\n").unwrap();
    fs::write(theme.join("assets/logo.svg"), "<svg/>").unwrap();

    write_tool(root, "tcm", tcm);
    write_tool(root, "tsc", TSC);
    write_tool(root, "esbuild", ESBUILD);
    temp
}

fn themepack(project: &Path) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("themepack");
    cmd.current_dir(project).env("NO_COLOR", "1").env_remove("RUST_LOG");
    for (key, _) in std::env::vars_os() {
        if key.to_string_lossy().starts_with("THEMEPACK_") {
            cmd.env_remove(key);
        }
    }
    cmd
}

#[test]
#[serial]
fn test_build_produces_both_bundles() {
    let temp = project(TCM_OK);
    let out = temp.path().join("dist/src/my-theme");

    themepack(temp.path())
        .args(["build", "--name", "my-theme"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Build Summary"));

    for file in [
        "index.js",
        "index.css",
        "my-theme-1.1.1.js",
        "my-theme-1.1.1.css",
        "index.d.ts",
        "button.m.css",
        "button.m.css.d.ts",
        "assets/logo.svg",
    ] {
        assert!(out.join(file).is_file(), "missing {}", file);
    }
}

#[test]
#[serial]
fn test_release_flag_overrides_package_version() {
    let temp = project(TCM_OK);

    themepack(temp.path())
        .args(["build", "-n", "my-theme", "-r", "2.0.0"])
        .assert()
        .success();

    let out = temp.path().join("dist/src/my-theme");
    assert!(out.join("my-theme-2.0.0.js").is_file());
    assert!(!out.join("my-theme-1.1.1.js").exists());
}

#[test]
#[serial]
fn test_environment_layer() {
    let temp = project(TCM_OK);

    themepack(temp.path())
        .arg("build")
        .env("THEMEPACK_NAME", "my-theme")
        .env("THEMEPACK_RELEASE", "3.0.0")
        .assert()
        .success();
    assert!(temp.path().join("dist/src/my-theme/my-theme-3.0.0.js").is_file());

    // Flags still win over the environment.
    themepack(temp.path())
        .args(["build", "-r", "4.0.0"])
        .env("THEMEPACK_NAME", "my-theme")
        .env("THEMEPACK_RELEASE", "3.0.0")
        .assert()
        .success();
    let out = temp.path().join("dist/src/my-theme");
    assert!(out.join("my-theme-4.0.0.js").is_file());
    assert!(!out.join("my-theme-3.0.0.js").exists());
}

#[test]
#[serial]
fn test_multi_word_environment_keys() {
    let temp = project(TCM_OK);

    themepack(temp.path())
        .args(["build", "-n", "my-theme"])
        .env("THEMEPACK_OUT_DIR", "build/themes")
        .env("THEMEPACK_COPY_ASSETS", "false")
        .env("THEMEPACK_DECLARATION_COMPILER", "tsc")
        .assert()
        .success();

    let out = temp.path().join("build/themes/my-theme");
    assert!(out.join("index.js").is_file());
    assert!(!out.join("assets").exists());
    assert!(!temp.path().join("dist").exists());
}

#[test]
#[serial]
fn test_release_with_whitespace_rejected_from_environment() {
    let temp = project(TCM_OK);

    themepack(temp.path())
        .args(["build", "-n", "my-theme"])
        .env("THEMEPACK_RELEASE", "1.0 beta")
        .assert()
        .failure()
        .stderr(predicate::str::contains("whitespace"));
    assert!(!temp.path().join("dist").exists());
}

#[test]
#[serial]
fn test_config_file_and_cwd() {
    let temp = project(TCM_OK);
    fs::write(
        temp.path().join("themepack.config.json"),
        r#"{ "name": "my-theme", "copyAssets": false }"#,
    )
    .unwrap();
    let outside = TempDir::new().unwrap();

    themepack(outside.path())
        .arg("build")
        .arg("--cwd")
        .arg(temp.path())
        .assert()
        .success();

    let out = temp.path().join("dist/src/my-theme");
    assert!(out.join("index.js").is_file());
    assert!(!out.join("assets").exists());
}

#[test]
#[serial]
fn test_rebuild_clears_stale_output() {
    let temp = project(TCM_OK);
    let out = temp.path().join("dist/src/my-theme");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("stale.js"), "old").unwrap();

    themepack(temp.path()).args(["build", "-n", "my-theme"]).assert().success();
    themepack(temp.path()).args(["build", "-n", "my-theme"]).assert().success();

    assert!(!out.join("stale.js").exists());
    assert!(out.join("index.js").is_file());
}

#[test]
#[serial]
fn test_failing_stage_reports_message() {
    let temp = project(TCM_FAIL);

    themepack(temp.path())
        .args(["build", "-n", "my-theme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to build CSS modules"));

    let out = temp.path().join("dist/src/my-theme");
    assert!(!out.join("index.js").exists());
    assert!(!out.join("index.d.ts").exists());
}

#[test]
#[serial]
fn test_missing_name() {
    let temp = project(TCM_OK);

    themepack(temp.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required field: name"));
}

#[test]
#[serial]
fn test_unknown_theme() {
    let temp = project(TCM_OK);

    themepack(temp.path())
        .args(["build", "-n", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Theme 'nope' not found"));
}

#[test]
#[serial]
fn test_missing_version_fails_bundle_stage() {
    let temp = project(TCM_OK);
    fs::write(temp.path().join("package.json"), r#"{ "name": "themes" }"#).unwrap();

    themepack(temp.path())
        .args(["build", "-n", "my-theme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to build my-theme theme bundles"));

    // Earlier stages ran.
    assert!(temp.path().join("dist/src/my-theme/index.d.ts").is_file());
}

#[test]
#[serial]
fn test_eject_writes_configuration() {
    let temp = project(TCM_OK);
    let config_before = "{ \"name\": \"my-theme\" }";
    fs::write(temp.path().join("themepack.config.json"), config_before).unwrap();

    themepack(temp.path())
        .arg("eject")
        .assert()
        .success()
        .stderr(predicate::str::contains("build-options.json"));

    let out = temp.path().join("config/build-theme");
    let bundle_text = fs::read_to_string(out.join("bundle.config.json")).unwrap();
    let bundle: serde_json::Value = serde_json::from_str(&bundle_text).unwrap();
    assert!(bundle["entry"]["my-theme"].is_object());
    // serde_json::Value sorts keys, so entry order is read off the raw text.
    let element = bundle_text.find("\"my-theme-custom-element\":").unwrap();
    let library = bundle_text.find("\"my-theme\":").unwrap();
    assert!(element < library, "custom element entry must come first");

    let options: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("build-options.json")).unwrap()).unwrap();
    assert_eq!(options["name"], "my-theme");
    assert_eq!(options["release"], "1.1.1");

    let installer = fs::read_to_string(out.join("theme-installer.js")).unwrap();
    assert!(installer.contains("\"my-theme\""));

    // The user's config is left alone and nothing was built.
    assert_eq!(
        fs::read_to_string(temp.path().join("themepack.config.json")).unwrap(),
        config_before
    );
    assert!(!temp.path().join("dist").exists());
}

#[test]
#[serial]
fn test_ejected_options_drive_a_build() {
    let temp = project(TCM_OK);

    themepack(temp.path())
        .args(["eject", "-n", "my-theme", "-r", "5.0.0", "--out", "ejected"])
        .assert()
        .success();

    themepack(temp.path())
        .args(["build", "--config", "ejected/build-options.json"])
        .assert()
        .success();

    assert!(temp.path().join("dist/src/my-theme/my-theme-5.0.0.js").is_file());
}
