//! Firebase CLI lookup.
//!
//! Queries the `firebase` CLI for the active project and registered apps.
//! The tabular output format is pinned by the regexes below; if the CLI
//! changes its layout, enrichment yields fewer fields rather than failing.

use std::path::{Path, PathBuf};
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::probe;

/// Deadline for Firebase CLI invocations; app and project listings hit the
/// network.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(15);

/// One row of `firebase apps:list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebaseApp {
    /// App id, e.g. `1:123456789:android:abcdef`.
    pub id: String,

    /// Platform column: `android`, `ios`, or `web`.
    pub platform: String,

    /// Display name column.
    pub display_name: String,
}

/// One row of `firebase projects:list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebaseProject {
    /// Project id.
    pub id: String,

    /// Display name column.
    pub display_name: String,
}

/// Project/app lookup against an external source.
///
/// All methods degrade to empty results; the CLI being absent or logged out
/// is an expected, non-fatal condition.
pub trait FirebaseLookup {
    /// The currently active project id, if any.
    fn active_project(&self) -> Option<String>;

    /// Registered apps of the given project.
    fn list_apps(&self, project_id: &str) -> Vec<FirebaseApp>;

    /// Projects visible to the logged-in account.
    fn list_projects(&self) -> Vec<FirebaseProject>;
}

/// Lookup backed by the real `firebase` CLI.
pub struct FirebaseCli {
    cwd: PathBuf,
}

impl FirebaseCli {
    /// Create a lookup running in the given working directory.
    pub fn new(cwd: &Path) -> Self {
        Self { cwd: cwd.to_path_buf() }
    }
}

static ACTIVE_PROJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Active project: (.+)").expect("valid regex"));

// Table row format: │ app-id │ platform │ display-name │
static APP_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"│\s*([^\s│]+)\s*│\s*(android|ios|web)\s*│\s*([^│]+)\s*│").expect("valid regex")
});

// Table row format: │ project-id │ display-name │ resource-name │
static PROJECT_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"│\s*([^\s│]+)\s*│\s*([^│]+)\s*│\s*([^│]+)\s*│").expect("valid regex")
});

impl FirebaseLookup for FirebaseCli {
    fn active_project(&self) -> Option<String> {
        let output = probe::run_bounded("firebase", &["use"], Some(&self.cwd), LOOKUP_TIMEOUT)?;
        if !output.success {
            tracing::warn!("Firebase CLI not available or not logged in");
            return None;
        }

        ACTIVE_PROJECT.captures(&output.stdout).map(|c| c[1].trim().to_string())
    }

    fn list_apps(&self, project_id: &str) -> Vec<FirebaseApp> {
        let output = probe::run_bounded(
            "firebase",
            &["apps:list", "--project", project_id],
            Some(&self.cwd),
            LOOKUP_TIMEOUT,
        );

        match output {
            Some(output) if output.success => parse_app_rows(&output.stdout),
            _ => {
                tracing::warn!(
                    project_id,
                    "Could not fetch Firebase apps list (authentication may be required)"
                );
                Vec::new()
            }
        }
    }

    fn list_projects(&self) -> Vec<FirebaseProject> {
        let output =
            probe::run_bounded("firebase", &["projects:list"], Some(&self.cwd), LOOKUP_TIMEOUT);

        match output {
            Some(output) if output.success => parse_project_rows(&output.stdout),
            _ => {
                tracing::warn!("Could not fetch Firebase projects list");
                Vec::new()
            }
        }
    }
}

/// Parse `firebase apps:list` table rows.
fn parse_app_rows(table: &str) -> Vec<FirebaseApp> {
    let apps: Vec<FirebaseApp> = table
        .lines()
        .filter_map(|line| APP_ROW.captures(line))
        .map(|caps| FirebaseApp {
            id: caps[1].trim().to_string(),
            platform: caps[2].trim().to_string(),
            display_name: caps[3].trim().to_string(),
        })
        .collect();

    tracing::debug!(rows = apps.len(), "Parsed apps:list output");
    apps
}

/// Parse `firebase projects:list` table rows, skipping the header.
fn parse_project_rows(table: &str) -> Vec<FirebaseProject> {
    let projects: Vec<FirebaseProject> = table
        .lines()
        .filter_map(|line| PROJECT_ROW.captures(line))
        .filter(|caps| !caps[1].eq_ignore_ascii_case("project") && !caps[1].eq_ignore_ascii_case("id"))
        .map(|caps| FirebaseProject {
            id: caps[1].trim().to_string(),
            display_name: caps[2].trim().to_string(),
        })
        .collect();

    tracing::debug!(rows = projects.len(), "Parsed projects:list output");
    projects
}
