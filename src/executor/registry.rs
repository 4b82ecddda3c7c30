//! Registry of AI tool executors.
//!
//! Holds every supported tool in registration order and aggregates
//! detection and status across them. One tool's failed probe never aborts
//! the others; it simply shows up as a not-ready entry.

use super::{AiTool, AuthStatus};

/// Point-in-time status of one registered tool.
///
/// Recomputed on demand and never cached: installation and authentication
/// can change between runs.
#[derive(Debug, Clone)]
pub struct ToolStatus {
    /// The tool this entry describes.
    pub tool: AiTool,

    /// Stable tool name.
    pub name: &'static str,

    /// Human-readable display name.
    pub display_name: &'static str,

    /// Whether the binary was found on the PATH.
    pub installed: bool,

    /// Whether the auth check reported authenticated.
    pub authenticated: bool,

    /// Explanatory status message.
    pub message: String,

    /// Installed and authenticated.
    pub ready: bool,
}

/// Registry over the closed set of supported tools.
pub struct ExecutorRegistry {
    tools: Vec<AiTool>,
}

impl Default for ExecutorRegistry {
    fn default() -> Self {
        Self { tools: AiTool::ALL.to_vec() }
    }
}

impl ExecutorRegistry {
    /// Registry holding every supported tool.
    pub fn new() -> Self {
        Self::default()
    }

    /// All registered tools, in registration order.
    pub fn list_all(&self) -> &[AiTool] {
        &self.tools
    }

    /// Look a tool up by its stable name.
    pub fn by_name(&self, name: &str) -> Option<AiTool> {
        self.tools.iter().copied().find(|tool| tool.name() == name)
    }

    /// The stable names of every registered tool.
    pub fn supported_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|tool| tool.name()).collect()
    }

    /// Probe each tool's presence, in registration order.
    pub fn detect_installed(&self) -> Vec<AiTool> {
        let mut installed = Vec::new();
        for tool in &self.tools {
            tracing::debug!(tool = tool.name(), "Probing for installation");
            if tool.is_installed() {
                installed.push(*tool);
            }
        }
        installed
    }

    /// Status snapshot of every registered tool.
    pub fn status_report(&self) -> Vec<ToolStatus> {
        self.tools
            .iter()
            .map(|&tool| {
                let installed = tool.is_installed();
                let auth = if installed {
                    tool.check_auth()
                } else {
                    AuthStatus { authenticated: false, message: "Not installed".to_string() }
                };

                ToolStatus {
                    tool,
                    name: tool.name(),
                    display_name: tool.display_name(),
                    installed,
                    authenticated: auth.authenticated,
                    ready: installed && auth.authenticated,
                    message: auth.message,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_registry_holds_all_tools_in_order() {
        let registry = ExecutorRegistry::new();
        assert_eq!(registry.list_all(), &AiTool::ALL);
    }

    #[test]
    fn test_by_name_finds_registered_tools() {
        let registry = ExecutorRegistry::new();
        assert_eq!(registry.by_name("claude"), Some(AiTool::Claude));
        assert_eq!(registry.by_name("codex"), Some(AiTool::Codex));
        assert_eq!(registry.by_name("does-not-exist"), None);
    }

    #[test]
    fn test_supported_names() {
        let registry = ExecutorRegistry::new();
        assert_eq!(registry.supported_names(), vec!["claude", "copilot", "gemini", "codex"]);
    }

    #[test]
    #[serial]
    fn test_status_report_with_nothing_installed() {
        let empty = tempfile::tempdir().unwrap();
        let saved = std::env::var_os("PATH");
        std::env::set_var("PATH", empty.path());

        let report = ExecutorRegistry::new().status_report();

        match saved {
            Some(path) => std::env::set_var("PATH", path),
            None => std::env::remove_var("PATH"),
        }

        assert_eq!(report.len(), AiTool::ALL.len());
        for entry in &report {
            assert!(!entry.installed);
            assert!(!entry.ready);
            assert_eq!(entry.message, "Not installed");
        }
    }

    #[test]
    #[serial]
    fn test_detect_installed_with_nothing_installed() {
        let empty = tempfile::tempdir().unwrap();
        let saved = std::env::var_os("PATH");
        std::env::set_var("PATH", empty.path());

        let installed = ExecutorRegistry::new().detect_installed();

        match saved {
            Some(path) => std::env::set_var("PATH", path),
            None => std::env::remove_var("PATH"),
        }

        assert!(installed.is_empty());
    }
}
