//! CLI Integration Tests
//!
//! Tests the command-line interface end-to-end.

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Get the binary to test.
///
/// `PATH` is pointed at the (empty) temp dir so no real AI tool or
/// Firebase CLI is ever detected, and the config/home dirs are redirected
/// so the snapshot never touches the real user environment.
fn crashflow(workspace: &assert_fs::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("crashflow").unwrap();
    cmd.current_dir(workspace.path())
        .env("PATH", workspace.path())
        .env("HOME", workspace.path())
        .env("XDG_CONFIG_HOME", workspace.path().join(".config"));
    cmd
}

const GOOGLE_SERVICES: &str = r#"{
    "project_info": {
        "project_number": "123456789",
        "project_id": "demo-app-prod"
    },
    "client": [
        {"client_info": {"mobilesdk_app_id": "1:123456789:android:abcdef"}}
    ]
}"#;

// ============================================================================
// Help & Version Tests
// ============================================================================

#[test]
fn test_help_flag() {
    let workspace = assert_fs::TempDir::new().unwrap();
    crashflow(&workspace)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("crash triage workflow"));
}

#[test]
fn test_short_help_flag() {
    let workspace = assert_fs::TempDir::new().unwrap();
    crashflow(&workspace).arg("-h").assert().success().stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_flag() {
    let workspace = assert_fs::TempDir::new().unwrap();
    crashflow(&workspace)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Pre-flight Tests
// ============================================================================

#[test]
fn test_unknown_tool_exits_with_code_1() {
    let workspace = assert_fs::TempDir::new().unwrap();
    crashflow(&workspace)
        .args(["--cli", "unknown-tool"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown tool 'unknown-tool'"))
        .stderr(predicate::str::contains("claude"))
        .stderr(predicate::str::contains("copilot"))
        .stderr(predicate::str::contains("gemini"))
        .stderr(predicate::str::contains("codex"));
}

#[test]
fn test_uninstalled_tool_exits_with_install_help() {
    let workspace = assert_fs::TempDir::new().unwrap();
    crashflow(&workspace)
        .args(["--cli", "claude"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not installed"))
        .stderr(predicate::str::contains("To install Claude Code"));
}

#[test]
fn test_preflight_failure_generates_no_document() {
    let workspace = assert_fs::TempDir::new().unwrap();
    crashflow(&workspace).args(["--cli", "claude"]).assert().code(1);
    workspace.child("crash-analyzer.md").assert(predicate::path::missing());
}

// ============================================================================
// Generate-Only Tests
// ============================================================================

#[test]
fn test_generate_only_end_to_end() {
    let workspace = assert_fs::TempDir::new().unwrap();
    workspace.child("app/google-services.json").write_str(GOOGLE_SERVICES).unwrap();

    // Empty stdin: every prompt falls back to its discovered default.
    crashflow(&workspace)
        .arg("--generate-only")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated workflow saved to"));

    let document =
        std::fs::read_to_string(workspace.path().join("crash-analyzer.md")).unwrap();
    assert!(document.contains("demo-app-prod"));
    assert!(document.contains("1:123456789:android:abcdef"));
    assert!(!document.contains("{{"), "unresolved placeholders in: {document}");
}

#[test]
fn test_generate_only_writes_config_snapshot() {
    let workspace = assert_fs::TempDir::new().unwrap();
    workspace.child("google-services.json").write_str(GOOGLE_SERVICES).unwrap();

    crashflow(&workspace).arg("--generate-only").assert().success();

    workspace
        .child(".config/crashflow/last-config.json")
        .assert(predicate::path::exists());
    let snapshot = std::fs::read_to_string(
        workspace.path().join(".config/crashflow/last-config.json"),
    )
    .unwrap();
    assert!(snapshot.contains("demo-app-prod"));
}

#[test]
fn test_generate_only_takes_priority_over_cli_flag() {
    let workspace = assert_fs::TempDir::new().unwrap();
    workspace.child("google-services.json").write_str(GOOGLE_SERVICES).unwrap();

    // Even an unknown tool name is irrelevant when --generate-only is set.
    crashflow(&workspace)
        .args(["--generate-only", "--cli", "unknown-tool"])
        .assert()
        .success();

    workspace.child("crash-analyzer.md").assert(predicate::path::exists());
}

#[test]
fn test_generate_only_in_empty_project() {
    let workspace = assert_fs::TempDir::new().unwrap();

    // No configs, no Firebase CLI, all prompts defaulted: still generates.
    crashflow(&workspace).arg("--generate-only").assert().success();

    let document =
        std::fs::read_to_string(workspace.path().join("crash-analyzer.md")).unwrap();
    assert!(!document.contains("{{"));
}

#[test]
fn test_scan_respects_project_dir_flag() {
    let workspace = assert_fs::TempDir::new().unwrap();
    workspace.child("nested/project/app/google-services.json").write_str(GOOGLE_SERVICES).unwrap();

    crashflow(&workspace)
        .args(["--generate-only", "--project-dir"])
        .arg(workspace.path().join("nested/project"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 google-services.json file(s)"));
}

#[test]
fn test_interactive_default_degrades_to_generate_only() {
    let workspace = assert_fs::TempDir::new().unwrap();
    workspace.child("google-services.json").write_str(GOOGLE_SERVICES).unwrap();

    // No flags and empty stdin: stage one of the interactive choice
    // defaults to generate-only, and the run completes without a tool.
    crashflow(&workspace)
        .assert()
        .success()
        .stdout(predicate::str::contains("Next steps"));

    workspace.child("crash-analyzer.md").assert(predicate::path::exists());
}
