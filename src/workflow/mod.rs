//! Workflow document rendering and persistence.
//!
//! Turns the collected configuration into the crash-triage document the AI
//! tools consume, and records each tool invocation in a plain-text log.
//! Both artifacts are write-only; nothing here is read back.

mod template;

pub use template::WORKFLOW_TEMPLATE;

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::GeneratorConfig;
use crate::executor::{AiTool, RunOutcome};

/// File name of the generated workflow document.
pub const WORKFLOW_FILE: &str = "crash-analyzer.md";

/// File name of the per-invocation execution log.
pub const EXECUTION_LOG_FILE: &str = "crash-analyzer-execution.log";

/// Render the workflow document from the configuration.
pub fn render(config: &GeneratorConfig) -> String {
    let optional = |value: &Option<String>| value.clone().unwrap_or_default();
    let config_file = config
        .firebase
        .config_file
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "auto-detected".to_string());
    let environment =
        config.firebase.environment.clone().unwrap_or_else(|| "default".to_string());

    let replacements = [
        ("{{PROJECT_DIR}}", config.project.directory.display().to_string()),
        ("{{PROJECT_NAME}}", config.project.name.clone()),
        ("{{PLATFORM}}", config.project.platform.as_str().to_string()),
        ("{{FIREBASE_PROJECT_ID}}", optional(&config.firebase.project_id)),
        ("{{APP_ID}}", optional(&config.firebase.app_id)),
        ("{{FIREBASE_CONFIG_FILE}}", config_file),
        ("{{FIREBASE_ENVIRONMENT}}", environment),
        ("{{KANBAN_SYSTEM}}", config.kanban.system.clone()),
        ("{{KANBAN_PROJECT_NAME}}", config.kanban.project_name.clone()),
        ("{{CRITICAL_CRASHES}}", config.thresholds.critical.crashes.to_string()),
        ("{{CRITICAL_USERS}}", config.thresholds.critical.users.to_string()),
        ("{{HIGH_CRASHES}}", config.thresholds.high.crashes.to_string()),
        ("{{HIGH_USERS}}", config.thresholds.high.users.to_string()),
        ("{{MEDIUM_CRASHES}}", config.thresholds.medium.crashes.to_string()),
        ("{{MEDIUM_USERS}}", config.thresholds.medium.users.to_string()),
    ];

    let mut document = WORKFLOW_TEMPLATE.to_string();
    for (placeholder, value) in replacements {
        document = document.replace(placeholder, &value);
    }
    document
}

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{[A-Z_]+\}\}").expect("valid regex"));

/// Placeholder markers still unresolved after rendering.
pub fn unresolved_placeholders(document: &str) -> Vec<String> {
    PLACEHOLDER.find_iter(document).map(|m| m.as_str().to_string()).collect()
}

/// Write the workflow document into the given directory.
pub fn save_workflow(document: &str, dir: &Path) -> anyhow::Result<PathBuf> {
    let path = dir.join(WORKFLOW_FILE);
    std::fs::write(&path, document)?;
    Ok(path)
}

/// Record one tool invocation: status, captured output, and errors.
pub fn write_execution_log(
    dir: &Path,
    tool: AiTool,
    invocation: &str,
    outcome: &RunOutcome,
) -> anyhow::Result<PathBuf> {
    let path = dir.join(EXECUTION_LOG_FILE);

    let mut content = String::new();
    content.push_str("Crash analyzer execution log\n");
    content.push_str(&format!(
        "Timestamp: {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    content.push_str(&format!("Tool: {}\n", tool.display_name()));
    content.push_str(&format!("Command: {}\n", invocation));
    content.push_str(&format!(
        "Status: {}\n",
        if outcome.success { "SUCCESS" } else { "FAILED" }
    ));
    if let Some(output) = &outcome.output {
        content.push_str(&format!("Output:\n{}\n", output));
    }
    if let Some(error) = &outcome.error {
        content.push_str(&format!("Error:\n{}\n", error));
    }

    std::fs::write(&path, content)?;
    Ok(path)
}
