//! AI CLI tool executors.
//!
//! Each supported external AI tool is one variant of the closed [`AiTool`]
//! enum, carrying its own presence probe, auth check, and invocation
//! template. The set is fixed; adding a tool means adding a variant, which
//! keeps every `match` in this module exhaustive.

mod registry;

pub use registry::{ExecutorRegistry, ToolStatus};

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

use crate::probe;

/// Deadline for auth status probes.
const AUTH_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Result of an authentication check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthStatus {
    /// Best-guess authentication state.
    pub authenticated: bool,

    /// Human-readable explanation.
    pub message: String,
}

impl AuthStatus {
    fn yes(message: &str) -> Self {
        Self { authenticated: true, message: message.to_string() }
    }

    fn no(message: &str) -> Self {
        Self { authenticated: false, message: message.to_string() }
    }
}

/// Result of a tool invocation.
#[derive(Debug)]
pub struct RunOutcome {
    /// Whether the tool exited with status zero.
    pub success: bool,

    /// Captured success output, if any.
    pub output: Option<String>,

    /// Captured error text on failure.
    pub error: Option<String>,
}

/// A supported external AI command-line tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiTool {
    /// Claude Code.
    Claude,
    /// GitHub Copilot CLI.
    Copilot,
    /// Gemini CLI.
    Gemini,
    /// Codex CLI.
    Codex,
}

impl std::fmt::Display for AiTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl AiTool {
    /// Every supported tool, in registration order.
    pub const ALL: [AiTool; 4] = [Self::Claude, Self::Copilot, Self::Gemini, Self::Codex];

    /// Stable identifier used for `--cli <name>`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Copilot => "copilot",
            Self::Gemini => "gemini",
            Self::Codex => "codex",
        }
    }

    /// Human-readable display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Claude => "Claude Code",
            Self::Copilot => "GitHub Copilot CLI",
            Self::Gemini => "Gemini CLI",
            Self::Codex => "Codex CLI",
        }
    }

    /// Check whether the tool's binary is on the PATH.
    ///
    /// A pure lookup, bounded by construction; never errors.
    pub fn is_installed(self) -> bool {
        which::which(self.name()).is_ok()
    }

    /// Check authentication against the live environment.
    ///
    /// Never cached and never an error: exhausted or ambiguous checks
    /// degrade to a best-guess boolean plus an explanatory message.
    pub fn check_auth(self) -> AuthStatus {
        match self {
            Self::Claude => auth_from_status_command(self.name()),
            Self::Gemini => auth_from_status_command(self.name()),
            Self::Copilot => check_copilot_auth(),
            Self::Codex => check_codex_auth(),
        }
    }

    /// The exact command line that runs the workflow with this tool.
    ///
    /// Pure string templating: the document content is embedded via command
    /// substitution, and tool-specific safety flags are part of the
    /// template.
    pub fn invocation(self, document: &Path) -> String {
        let path = document.display();
        match self {
            Self::Claude => format!(r#"claude -p "$(cat {path})""#),
            Self::Copilot => format!(
                r#"copilot --allow-all-tools --deny-tool 'shell(rm)' --deny-tool 'shell(git push)' -p "Execute this workflow: $(cat '{path}')""#
            ),
            Self::Gemini => format!(r#"gemini -p "$(cat {path})" --auto-approve"#),
            Self::Codex => format!(r#"codex exec "$(cat {path})""#),
        }
    }

    /// Run the workflow with inherited interactive I/O, so the user sees the
    /// tool's own output live. Unbounded: the invocation runs to its natural
    /// completion.
    pub fn run(self, document: &Path) -> RunOutcome {
        let invocation = self.invocation(document);
        let (shell, shell_arg) = shell();

        let status = Command::new(shell)
            .arg(shell_arg)
            .arg(&invocation)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();

        match status {
            Ok(status) if status.success() => RunOutcome {
                success: true,
                output: Some("Execution completed successfully".to_string()),
                error: None,
            },
            Ok(status) => RunOutcome {
                success: false,
                output: None,
                error: Some(format!("{} exited with {}", self.display_name(), status)),
            },
            Err(e) => RunOutcome { success: false, output: None, error: Some(e.to_string()) },
        }
    }

    /// Installation instructions shown on pre-flight failure.
    pub fn install_help(self) -> &'static str {
        match self {
            Self::Claude => {
                "To install Claude Code:\n\
                 1. Visit: https://claude.ai/download\n\
                 2. Download and install the Claude CLI\n\
                 3. Run: claude auth login"
            }
            Self::Copilot => {
                "To install GitHub Copilot CLI:\n\
                 1. Install globally: npm install -g @github/copilot\n\
                 2. Generate a fine-grained PAT at: https://github.com/settings/personal-access-tokens/new\n\
                 3. Enable the \"Copilot Requests\" permission\n\
                 4. Set: export GH_TOKEN=your-token-here"
            }
            Self::Gemini => {
                "To install Gemini CLI:\n\
                 1. Visit: https://ai.google.dev/gemini-api/docs/cli\n\
                 2. Install using: npm install -g @google/generative-ai-cli\n\
                 3. Authenticate: gemini auth login"
            }
            Self::Codex => {
                "To install Codex CLI:\n\
                 1. Install: npm install -g @openai/codex (or: brew install codex)\n\
                 2. Run: codex (will prompt for ChatGPT login or API key)"
            }
        }
    }

    /// Authentication instructions shown on pre-flight failure.
    pub fn auth_help(self) -> &'static str {
        match self {
            Self::Claude => "To authenticate with Claude Code:\nRun: claude auth login",
            Self::Copilot => {
                "To authenticate with GitHub Copilot CLI:\n\
                 1. Generate a fine-grained PAT at: https://github.com/settings/personal-access-tokens/new\n\
                 2. Enable the \"Copilot Requests\" permission\n\
                 3. Set: export GH_TOKEN=your-token-here (or GITHUB_TOKEN)"
            }
            Self::Gemini => "To authenticate with Gemini CLI:\nRun: gemini auth login",
            Self::Codex => {
                "To authenticate with Codex CLI:\n\
                 1. Run 'codex' and sign in with a ChatGPT account\n\
                 2. Or set: export OPENAI_API_KEY=your-key-here"
            }
        }
    }
}

/// Probe `<binary> auth status` and look for an authenticated marker.
fn auth_from_status_command(binary: &str) -> AuthStatus {
    match probe::run_bounded(binary, &["auth", "status"], None, AUTH_PROBE_TIMEOUT) {
        Some(output) if output.success => {
            let text = output.stdout.to_lowercase();
            if text.contains("authenticated") || text.contains("logged in") {
                AuthStatus::yes("Authenticated")
            } else {
                AuthStatus::no("Not authenticated")
            }
        }
        Some(_) => AuthStatus::no("Not authenticated"),
        None => AuthStatus::no("Authentication status unknown"),
    }
}

/// Copilot authenticates via GitHub tokens; either credential variable
/// works. A runnable binary without a token is assumed to be logged in.
fn check_copilot_auth() -> AuthStatus {
    let runs = probe::run_bounded("copilot", &["--version"], None, AUTH_PROBE_TIMEOUT)
        .map(|output| output.success)
        .unwrap_or(false);
    if !runs {
        return AuthStatus::no("Not authenticated or not installed");
    }

    if has_env("GH_TOKEN") || has_env("GITHUB_TOKEN") {
        AuthStatus::yes("Authenticated via token")
    } else {
        AuthStatus::yes("Authenticated")
    }
}

/// Codex authenticates via an OpenAI API key or a ChatGPT login recorded in
/// its config file.
fn check_codex_auth() -> AuthStatus {
    if has_env("OPENAI_API_KEY") {
        return AuthStatus::yes("OpenAI API key found");
    }

    let config_exists = dirs::home_dir()
        .map(|home| home.join(".codex").join("config.toml").exists())
        .unwrap_or(false);
    if config_exists {
        return AuthStatus::yes("Codex config found");
    }

    AuthStatus::no("No API key or auth found")
}

/// Whether an environment variable is set to a non-empty value.
fn has_env(name: &str) -> bool {
    std::env::var(name).map(|value| !value.is_empty()).unwrap_or(false)
}

fn shell() -> (&'static str, &'static str) {
    if cfg!(target_os = "windows") {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    }
}
