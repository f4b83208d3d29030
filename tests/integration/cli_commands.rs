//! Integration tests for the attachkit binary

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(project: &Path, args: &[&str]) -> Output {
    let home = project.join("home");
    std::fs::create_dir_all(&home).unwrap();
    Command::new(env!("CARGO_BIN_EXE_attachkit"))
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("ATTACHKIT_ENV")
        .env_remove("ATTACHKIT_LOG")
        .arg("--quiet")
        .arg("--project")
        .arg(project)
        .args(args)
        .output()
        .unwrap()
}

fn write_project(temp: &TempDir, contents: &str) {
    std::fs::write(temp.path().join("attachkit.toml"), contents).unwrap();
}

#[test]
fn test_resolve_prints_json() {
    let temp = TempDir::new().unwrap();
    write_project(
        &temp,
        r#"
[request]
url = "/upload"

[assistant]
camera = true
"#,
    );

    let output = run(temp.path(), &["resolve"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["request_settings"]["url"], "/upload");
    assert_eq!(
        value["file_types"]["images"]["files"]["accepted_formats"],
        "image/*"
    );
    assert!(value.get("camera").is_none());
}

#[test]
fn test_resolve_user_media_flag_and_env_override() {
    let temp = TempDir::new().unwrap();
    write_project(
        &temp,
        r#"
[assistant]
camera = true
"#,
    );

    let output = Command::new(env!("CARGO_BIN_EXE_attachkit"))
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join(".config"))
        .env("ATTACHKIT__ASSISTANT__MIXED_FILES", "true")
        .arg("--quiet")
        .arg("--project")
        .arg(temp.path())
        .args(["resolve", "--user-media", "true", "--trace"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value["resolved"]["camera"]["files"]["accepted_formats"],
        "image/*"
    );
    assert_eq!(
        value["resolved"]["file_types"]["mixed_files"]["files"]["accepted_formats"],
        ""
    );
    assert_eq!(value["trace"][1]["written"], "camera");
    assert_eq!(value["trace"][1]["user_media"], true);
}

#[test]
fn test_validate_exit_status() {
    let temp = TempDir::new().unwrap();
    write_project(&temp, "[request]\nmethod = \"POST\"\n");
    let output = run(temp.path(), &["validate"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Configuration is valid"));

    write_project(&temp, "[request]\nmethod = \"TELEPORT\"\n");
    let output = run(temp.path(), &["validate"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("TELEPORT"));
}

#[test]
fn test_show_config_toml() {
    let temp = TempDir::new().unwrap();
    write_project(&temp, "[assistant]\naudio = true\n");
    let output = run(temp.path(), &["show-config"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let shown: toml::Value = toml::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(shown["assistant"]["audio"].as_bool(), Some(true));
    assert_eq!(shown["request"]["method"].as_str(), Some("POST"));
}

#[test]
fn test_render_command() {
    let temp = TempDir::new().unwrap();
    let output = run(temp.path(), &["render", "**Upload** a file"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "<p><strong>Upload</strong> a file</p>\n\n"
    );
}

#[test]
fn test_missing_global_config_keeps_stderr_quiet() {
    let temp = TempDir::new().unwrap();
    write_project(&temp, "[assistant]\nimages = true\n");
    let home = temp.path().join("home");
    std::fs::create_dir_all(&home).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_attachkit"))
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("ATTACHKIT_ENV")
        .env_remove("ATTACHKIT_LOG")
        .env_remove("ATTACHKIT_LOG_OUTPUT")
        .arg("--project")
        .arg(temp.path())
        .arg("resolve")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(
        output.stderr.is_empty(),
        "unexpected stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}
