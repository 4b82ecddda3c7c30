//! Collected generator configuration and snapshot persistence.
//!
//! The finalized configuration is written once per run as a JSON snapshot,
//! for humans to inspect; this program never reads it back.

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::console::Console;
use crate::resolver::{FirebaseIdentity, IdentityRecord, Platform};

/// Everything the workflow document is rendered from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Project identity.
    pub project: ProjectConfig,

    /// Firebase identity.
    pub firebase: FirebaseIdentity,

    /// Kanban destination for triaged crashes.
    pub kanban: KanbanConfig,

    /// Crash severity thresholds.
    pub thresholds: Thresholds,
}

/// Project section of the configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project directory.
    pub directory: PathBuf,

    /// Display name.
    pub name: String,

    /// Target platform.
    pub platform: Platform,
}

/// Kanban section of the configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KanbanConfig {
    /// Kanban system identifier.
    pub system: String,

    /// Board/project name inside the kanban system.
    pub project_name: String,
}

/// Crash volume thresholds per severity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threshold {
    /// Crash event count.
    pub crashes: u32,

    /// Affected user count.
    pub users: u32,
}

/// The three severity tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Critical tier.
    pub critical: Threshold,

    /// High tier.
    pub high: Threshold,

    /// Medium tier.
    pub medium: Threshold,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            critical: Threshold { crashes: 800, users: 600 },
            high: Threshold { crashes: 400, users: 300 },
            medium: Threshold { crashes: 100, users: 50 },
        }
    }
}

impl GeneratorConfig {
    /// Build the configuration from a resolved identity record.
    pub fn from_record(record: IdentityRecord) -> Self {
        let name = record
            .name
            .clone()
            .or_else(|| {
                record.directory.file_name().map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_default();

        Self {
            kanban: KanbanConfig { system: "vibe".to_string(), project_name: name.clone() },
            project: ProjectConfig {
                directory: record.directory,
                name,
                platform: record.platform,
            },
            firebase: record.firebase,
            thresholds: Thresholds::default(),
        }
    }

    /// Ask for the kanban board name and optional threshold overrides.
    pub fn collect_extras(&mut self, console: &mut Console) -> io::Result<()> {
        console.say("Using Vibe Kanban system")?;
        self.kanban.project_name =
            console.prompt("Vibe Kanban project name", &self.kanban.project_name)?;

        if console.confirm("Customize crash thresholds?")? {
            self.thresholds.critical.crashes =
                prompt_count(console, "Critical threshold - crashes", self.thresholds.critical.crashes)?;
            self.thresholds.high.crashes =
                prompt_count(console, "High threshold - crashes", self.thresholds.high.crashes)?;
            self.thresholds.medium.crashes =
                prompt_count(console, "Medium threshold - crashes", self.thresholds.medium.crashes)?;
        }

        Ok(())
    }

    /// Fixed location of the per-run snapshot.
    pub fn snapshot_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("crashflow").join("last-config.json"))
    }

    /// Write the JSON snapshot, returning its path.
    pub fn save_snapshot(&self) -> anyhow::Result<PathBuf> {
        let path = Self::snapshot_path()
            .ok_or_else(|| anyhow::anyhow!("No config directory available"))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(path)
    }
}

/// Numeric prompt keeping the current value on invalid input.
fn prompt_count(console: &mut Console, question: &str, current: u32) -> io::Result<u32> {
    let answer = console.prompt(question, &current.to_string())?;
    match answer.parse() {
        Ok(value) => Ok(value),
        Err(_) => {
            console.say(&format!("Invalid number '{}', keeping {}", answer, current))?;
            Ok(current)
        }
    }
}
