//! Execution mode selection.
//!
//! Decides whether the run only emits the workflow document or also hands
//! it to a chosen AI tool. Flags win over interactive choice, and an
//! explicitly requested tool is validated up front: this is the one place
//! where a failed check is fatal instead of degraded.

use std::io;

use thiserror::Error;

use crate::console::Console;
use crate::executor::{AiTool, ExecutorRegistry};

/// The finalized plan for this run.
///
/// A tool is only ever attached to the invoke variant, and only after it
/// passed the install and auth checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionPlan {
    /// Emit the workflow document and stop.
    GenerateOnly,

    /// Emit the document, then run it with the given tool.
    Invoke(AiTool),
}

/// Pre-flight failure for an explicitly requested tool.
#[derive(Debug, Error)]
pub enum PreflightError {
    /// The requested name matches no registered tool.
    #[error("unknown tool '{name}'; supported tools: {supported}")]
    UnknownTool {
        /// The requested name.
        name: String,
        /// Comma-separated supported tool names.
        supported: String,
    },

    /// The requested tool's binary is not on the PATH.
    #[error("{0} is not installed")]
    NotInstalled(AiTool),

    /// The requested tool is installed but not authenticated.
    #[error("{tool} is not authenticated: {message}")]
    NotAuthenticated {
        /// The requested tool.
        tool: AiTool,
        /// Message from the auth check.
        message: String,
    },
}

/// Decide the execution plan from flags and, failing those, interactively.
///
/// Priority order: `generate_only` short-circuits; an explicit `requested`
/// tool must be known, installed, and authenticated or the error is
/// returned for a fatal exit; otherwise the user chooses. Any I/O or probe
/// trouble on the interactive path degrades to generate-only with a
/// warning.
pub fn select_plan(
    generate_only: bool,
    requested: Option<&str>,
    registry: &ExecutorRegistry,
    console: &mut Console,
) -> Result<ExecutionPlan, PreflightError> {
    if generate_only {
        return Ok(ExecutionPlan::GenerateOnly);
    }

    if let Some(name) = requested {
        return preflight(name, registry);
    }

    Ok(choose_interactively(registry, console).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Interactive selection failed, generating only");
        ExecutionPlan::GenerateOnly
    }))
}

/// Validate an explicitly requested tool.
fn preflight(name: &str, registry: &ExecutorRegistry) -> Result<ExecutionPlan, PreflightError> {
    let Some(tool) = registry.by_name(name) else {
        return Err(PreflightError::UnknownTool {
            name: name.to_string(),
            supported: registry.supported_names().join(", "),
        });
    };

    if !tool.is_installed() {
        return Err(PreflightError::NotInstalled(tool));
    }

    let auth = tool.check_auth();
    if !auth.authenticated {
        return Err(PreflightError::NotAuthenticated { tool, message: auth.message });
    }

    Ok(ExecutionPlan::Invoke(tool))
}

/// Two-stage interactive choice: generate-only vs. invoke, then which tool.
fn choose_interactively(
    registry: &ExecutorRegistry,
    console: &mut Console,
) -> io::Result<ExecutionPlan> {
    console.say("\nAI tool status:")?;
    let report = registry.status_report();
    for entry in &report {
        let state = if entry.ready {
            "ready".to_string()
        } else if entry.installed {
            format!("not ready: {}", entry.message)
        } else {
            "not installed".to_string()
        };
        console.say(&format!("  {} - {}", entry.display_name, state))?;
    }

    console.say("\nHow should this run proceed?")?;
    console.say("1. Generate the workflow document only")?;
    console.say("2. Generate and execute with an AI tool")?;
    if console.select("Choose", 2)? == 0 {
        return Ok(ExecutionPlan::GenerateOnly);
    }

    let ready: Vec<_> = report.into_iter().filter(|entry| entry.ready).collect();
    if ready.is_empty() {
        console.say("No AI tool is installed and authenticated; generating only")?;
        return Ok(ExecutionPlan::GenerateOnly);
    }

    console.say("\nAvailable AI tools:")?;
    for (index, entry) in ready.iter().enumerate() {
        console.say(&format!("{}. {}", index + 1, entry.display_name))?;
    }
    let index = console.select("Select tool", ready.len())?;

    Ok(ExecutionPlan::Invoke(ready[index].tool))
}
