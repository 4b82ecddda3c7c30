//! Project identity resolution.
//!
//! Merges the filesystem scan, parsed config fields, a Firebase CLI lookup,
//! and user answers into one authoritative [`IdentityRecord`]. Resolution is
//! a linear state machine: scan, disambiguate, CLI enrichment, user
//! finalization. Each enrichment step only fills fields that are still
//! empty; explicit user answers always win.

mod firebase;

pub use firebase::{FirebaseApp, FirebaseCli, FirebaseLookup, FirebaseProject};

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::console::{Answer, Console};
use crate::scanner::{
    classify_environment, parse_google_services, parse_service_plist, ConfigScanner, ParsedFields,
    ANDROID_CONFIG, IOS_CONFIG,
};

/// Detected project platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Android project.
    Android,
    /// iOS project.
    Ios,
    /// Cross-platform Flutter project.
    Flutter,
    /// Platform could not be determined.
    Unknown,
}

impl Platform {
    /// Lower-case label used in prompts and the generated document.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Flutter => "flutter",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a prompt answer.
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer.to_lowercase().as_str() {
            "android" => Some(Self::Android),
            "ios" => Some(Self::Ios),
            "flutter" => Some(Self::Flutter),
            _ => None,
        }
    }
}

/// Which config file format a candidate was discovered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKind {
    /// `google-services.json`.
    Android,
    /// `GoogleService-Info.plist`.
    Ios,
}

impl ConfigKind {
    fn label(self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }

    fn platform(self) -> Platform {
        match self {
            Self::Android => Platform::Android,
            Self::Ios => Platform::Ios,
        }
    }
}

/// One discovered identity-config file; never mutated after creation.
#[derive(Debug, Clone)]
pub struct ConfigCandidate {
    /// Absolute path of the config file.
    pub path: PathBuf,

    /// Config file format.
    pub kind: ConfigKind,

    /// Fields extracted by the per-kind parser.
    pub fields: ParsedFields,

    /// Environment label inferred from the path.
    pub environment: Option<String>,
}

/// Firebase identity of the resolved record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirebaseIdentity {
    /// Firebase project id.
    pub project_id: Option<String>,

    /// Firebase app id.
    pub app_id: Option<String>,

    /// Numeric project number.
    pub project_number: Option<String>,

    /// Config file the identity was read from.
    pub config_file: Option<PathBuf>,

    /// Environment label inferred from the config file path.
    pub environment: Option<String>,
}

impl FirebaseIdentity {
    /// Whether both core fields are present. Once this holds, no enrichment
    /// step may overwrite them.
    pub fn has_core_fields(&self) -> bool {
        self.project_id.is_some() && self.app_id.is_some()
    }
}

/// The resolved, authoritative project identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Project directory.
    pub directory: PathBuf,

    /// Detected or user-chosen platform.
    pub platform: Platform,

    /// Project display name.
    pub name: Option<String>,

    /// Firebase identity.
    pub firebase: FirebaseIdentity,
}

impl IdentityRecord {
    /// Empty record rooted at the given directory.
    pub fn new(directory: &Path) -> Self {
        Self {
            directory: directory.to_path_buf(),
            platform: Platform::Unknown,
            name: None,
            firebase: FirebaseIdentity::default(),
        }
    }
}

/// Relevant subset of `package.json` for project-name detection.
#[derive(Debug, Deserialize)]
struct PackageJson {
    name: Option<String>,
    #[serde(rename = "displayName")]
    display_name: Option<String>,
}

/// Relevant subset of `pubspec.yaml`.
#[derive(Debug, Deserialize)]
struct Pubspec {
    name: Option<String>,
}

/// Multi-source identity resolver.
pub struct ConfigResolver<L> {
    root: PathBuf,
    lookup: L,
}

impl<L: FirebaseLookup> ConfigResolver<L> {
    /// Create a resolver rooted at the given project directory.
    pub fn new(root: &Path, lookup: L) -> Self {
        Self { root: root.to_path_buf(), lookup }
    }

    /// Run the full resolution state machine.
    pub fn resolve(&self, console: &mut Console) -> anyhow::Result<IdentityRecord> {
        let candidates = self.scan_candidates(console)?;
        let mut record = self.disambiguate(&candidates, console)?;
        self.enrich_from_cli(&mut record, console)?;
        self.detect_project_name(&mut record);
        self.finalize_with_user(&mut record, console)?;
        Ok(record)
    }

    /// EMPTY → SCANNED: discover and parse config candidates.
    pub fn scan_candidates(&self, console: &mut Console) -> io::Result<Vec<ConfigCandidate>> {
        console.say("Searching for Firebase config files recursively...")?;
        let outcome = ConfigScanner::new(&self.root).scan();

        console.say(&format!("Found {} {} file(s)", outcome.android.len(), ANDROID_CONFIG))?;
        console.say(&format!("Found {} {} file(s)", outcome.ios.len(), IOS_CONFIG))?;

        let mut candidates = Vec::new();
        for path in outcome.android {
            let fields = parse_google_services(&path);
            let environment = classify_environment(&path);
            candidates.push(ConfigCandidate { path, kind: ConfigKind::Android, fields, environment });
        }
        for path in outcome.ios {
            let fields = parse_service_plist(&path);
            let environment = classify_environment(&path);
            candidates.push(ConfigCandidate { path, kind: ConfigKind::Ios, fields, environment });
        }

        Ok(candidates)
    }

    /// SCANNED → DISAMBIGUATED: pick one candidate, asking the user when
    /// several exist. Zero candidates proceed straight to CLI enrichment.
    pub fn disambiguate(
        &self,
        candidates: &[ConfigCandidate],
        console: &mut Console,
    ) -> io::Result<IdentityRecord> {
        let mut record = IdentityRecord::new(&self.root);

        if candidates.is_empty() {
            return Ok(record);
        }

        let chosen = if candidates.len() == 1 {
            &candidates[0]
        } else {
            console.say("\nMultiple Firebase configurations found:")?;
            for (index, candidate) in candidates.iter().enumerate() {
                console.say(&format!(
                    "{}. [{}] {}",
                    index + 1,
                    candidate.kind.label().to_uppercase(),
                    candidate.path.display()
                ))?;
                if let Some(environment) = &candidate.environment {
                    console.say(&format!("   Environment: {}", environment))?;
                }
            }
            let index = console.select("Select configuration", candidates.len())?;
            &candidates[index]
        };

        console.say(&format!(
            "Selected {} config: {}",
            chosen.kind.label(),
            chosen.path.display()
        ))?;

        record.platform = chosen.kind.platform();
        record.firebase.project_id = chosen.fields.project_id.clone();
        record.firebase.app_id = chosen.fields.app_id.clone();
        record.firebase.project_number = chosen.fields.project_number.clone();
        record.firebase.config_file = Some(chosen.path.clone());
        record.firebase.environment = chosen.environment.clone();

        let both_kinds = candidates.iter().any(|c| c.kind == ConfigKind::Android)
            && candidates.iter().any(|c| c.kind == ConfigKind::Ios);
        if both_kinds
            && console.confirm("Both Android and iOS configs found. Is this a Flutter project?")?
        {
            record.platform = Platform::Flutter;
            console.say("Detected as Flutter project with multiple environments")?;
        }

        Ok(record)
    }

    /// DISAMBIGUATED → CLI_ENRICHED: fill still-missing core fields from the
    /// Firebase CLI. Command failures are logged, never raised.
    pub fn enrich_from_cli(
        &self,
        record: &mut IdentityRecord,
        console: &mut Console,
    ) -> io::Result<()> {
        if record.firebase.has_core_fields() {
            return Ok(());
        }

        console.say("Fetching Firebase project info from CLI...")?;
        let Some(active) = self.lookup.active_project() else {
            console.say("Firebase CLI not available or not logged in")?;
            console.say(
                "Run \"firebase login\" and \"firebase use <project-id>\" to enable auto-detection",
            )?;
            return Ok(());
        };

        if record.firebase.project_id.is_none() {
            console.say(&format!("Found active Firebase project: {}", active))?;
            record.firebase.project_id = Some(active);
        }

        if record.firebase.app_id.is_none() {
            if let Some(project_id) = record.firebase.project_id.clone() {
                let wanted = match record.platform {
                    Platform::Ios => "ios",
                    _ => "android",
                };
                let apps = self.lookup.list_apps(&project_id);
                if let Some(app) = apps.iter().find(|app| app.platform == wanted) {
                    console.say(&format!("Found Firebase {} app: {}", app.platform, app.id))?;
                    record.firebase.app_id = Some(app.id.clone());
                }
            }
        }

        Ok(())
    }

    /// Detect the project display name from `package.json` or `pubspec.yaml`
    /// at the scan root.
    pub fn detect_project_name(&self, record: &mut IdentityRecord) {
        if record.name.is_some() {
            return;
        }

        let package_json = self.root.join("package.json");
        if package_json.exists() {
            match std::fs::read_to_string(&package_json)
                .map_err(anyhow::Error::from)
                .and_then(|content| serde_json::from_str::<PackageJson>(&content).map_err(Into::into))
            {
                Ok(package) => {
                    record.name = package.name.or(package.display_name);
                    if record.name.is_some() {
                        return;
                    }
                }
                Err(e) => tracing::warn!(error = %e, "Could not parse package.json"),
            }
        }

        let pubspec = self.root.join("pubspec.yaml");
        if pubspec.exists() {
            match std::fs::read_to_string(&pubspec)
                .map_err(anyhow::Error::from)
                .and_then(|content| serde_yaml::from_str::<Pubspec>(&content).map_err(Into::into))
            {
                Ok(pubspec) => record.name = pubspec.name,
                Err(e) => tracing::warn!(error = %e, "Could not parse pubspec.yaml"),
            }
        }
    }

    /// CLI_ENRICHED → USER_FINALIZED: ask the user for every core field,
    /// offering the best value discovered so far as the default. Explicit
    /// answers always win; empty input keeps the default.
    pub fn finalize_with_user(
        &self,
        record: &mut IdentityRecord,
        console: &mut Console,
    ) -> io::Result<()> {
        console.say("\nPlease provide the following information:\n")?;

        let directory = console.prompt("Project directory path", &self.root.display().to_string())?;
        record.directory = PathBuf::from(shellexpand::tilde(&directory).into_owned());

        let name_default = record
            .name
            .clone()
            .or_else(|| {
                record.directory.file_name().map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_default();
        let name = console.prompt("Project display name", &name_default)?;
        record.name = non_empty(name);

        let platform_default = match record.platform {
            Platform::Unknown => Platform::Android,
            platform => platform,
        };
        let answer = console.prompt("Platform (android/ios/flutter)", platform_default.as_str())?;
        record.platform = match Platform::from_answer(&answer) {
            Some(platform) => platform,
            None => {
                console.say(&format!("Unrecognized platform '{}', keeping {}", answer, platform_default.as_str()))?;
                platform_default
            }
        };

        if record.firebase.project_id.is_none() {
            console.say("\nFirebase project not auto-detected. Let me help you find it...")?;
            self.select_project_interactively(record, console)?;
        }

        let project_default = record.firebase.project_id.clone().unwrap_or_default();
        let project_id = console.prompt("Firebase project ID", &project_default)?;
        record.firebase.project_id = non_empty(project_id);

        let app_default = record.firebase.app_id.clone().unwrap_or_default();
        let app_id = console.prompt("Firebase app ID", &app_default)?;
        record.firebase.app_id = non_empty(app_id);

        Ok(())
    }

    /// Offer the CLI's project list (then the chosen project's apps) when no
    /// project id was discovered automatically.
    fn select_project_interactively(
        &self,
        record: &mut IdentityRecord,
        console: &mut Console,
    ) -> io::Result<()> {
        console.say("Fetching available Firebase projects...")?;
        let projects = self.lookup.list_projects();
        if projects.is_empty() {
            return Ok(());
        }

        console.say("\nAvailable Firebase projects:")?;
        for (index, project) in projects.iter().enumerate() {
            console.say(&format!("{}. {} ({})", index + 1, project.id, project.display_name))?;
        }

        match console.select_or_entry("Select project", projects.len())? {
            Answer::Index(index) => {
                record.firebase.project_id = Some(projects[index].id.clone());
            }
            Answer::Text(text) => {
                record.firebase.project_id = non_empty(text);
            }
        }

        let Some(project_id) = record.firebase.project_id.clone() else {
            return Ok(());
        };
        if record.firebase.app_id.is_some() {
            return Ok(());
        }

        let wanted = match record.platform {
            Platform::Ios => "ios",
            Platform::Android | Platform::Unknown => "android",
            Platform::Flutter => "",
        };
        let apps: Vec<FirebaseApp> = self
            .lookup
            .list_apps(&project_id)
            .into_iter()
            .filter(|app| wanted.is_empty() || app.platform == wanted)
            .collect();

        if apps.is_empty() {
            return Ok(());
        }

        console.say(&format!("\nFound {} apps in {}:", record.platform.as_str(), project_id))?;
        for (index, app) in apps.iter().enumerate() {
            console.say(&format!("{}. {} ({})", index + 1, app.id, app.display_name))?;
        }

        match console.select_or_entry("Select app", apps.len())? {
            Answer::Index(index) => {
                record.firebase.app_id = Some(apps[index].id.clone());
            }
            Answer::Text(text) => {
                record.firebase.app_id = non_empty(text);
            }
        }

        Ok(())
    }
}

/// Treat an empty prompt answer as absent.
fn non_empty(answer: String) -> Option<String> {
    if answer.is_empty() {
        None
    } else {
        Some(answer)
    }
}
