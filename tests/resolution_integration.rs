//! Integration tests for identity resolution over a real project tree.

use std::io::{self, Cursor};
use std::path::Path;

use assert_fs::prelude::*;
use crashflow::console::Console;
use crashflow::resolver::{
    ConfigResolver, FirebaseApp, FirebaseLookup, FirebaseProject, Platform,
};

#[derive(Default)]
struct StubLookup {
    active: Option<String>,
    apps: Vec<FirebaseApp>,
    projects: Vec<FirebaseProject>,
}

impl FirebaseLookup for StubLookup {
    fn active_project(&self) -> Option<String> {
        self.active.clone()
    }

    fn list_apps(&self, _project_id: &str) -> Vec<FirebaseApp> {
        self.apps.clone()
    }

    fn list_projects(&self) -> Vec<FirebaseProject> {
        self.projects.clone()
    }
}

fn scripted(input: &str) -> Console<'_> {
    Console::new(Cursor::new(input.to_string()), io::sink())
}

const ANDROID_CONFIG: &str = r#"{
    "project_info": {
        "project_number": "123456789",
        "project_id": "demo-app-prod"
    },
    "client": [
        {"client_info": {"mobilesdk_app_id": "1:123456789:android:abcdef"}}
    ]
}"#;

const IOS_CONFIG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>PROJECT_ID</key>
    <string>demo-app-prod</string>
    <key>GOOGLE_APP_ID</key>
    <string>1:123456789:ios:fedcba</string>
</dict>
</plist>"#;

#[test]
fn test_resolve_single_android_config() {
    let tree = assert_fs::TempDir::new().unwrap();
    tree.child("app/google-services.json").write_str(ANDROID_CONFIG).unwrap();
    tree.child("package.json").write_str(r#"{"name": "demo-app"}"#).unwrap();

    let resolver = ConfigResolver::new(tree.path(), StubLookup::default());
    // Accept every prompt default: directory, name, platform, project, app.
    let mut console = scripted("\n\n\n\n\n");
    let record = resolver.resolve(&mut console).unwrap();

    assert_eq!(record.platform, Platform::Android);
    assert_eq!(record.name.as_deref(), Some("demo-app"));
    assert_eq!(record.firebase.project_id.as_deref(), Some("demo-app-prod"));
    assert_eq!(record.firebase.app_id.as_deref(), Some("1:123456789:android:abcdef"));
    assert!(record
        .firebase
        .config_file
        .as_ref()
        .unwrap()
        .ends_with(Path::new("app/google-services.json")));
}

#[test]
fn test_resolve_flutter_project_with_both_configs() {
    let tree = assert_fs::TempDir::new().unwrap();
    tree.child("android/app/google-services.json").write_str(ANDROID_CONFIG).unwrap();
    tree.child("ios/Runner/GoogleService-Info.plist").write_str(IOS_CONFIG).unwrap();
    tree.child("pubspec.yaml").write_str("name: demo_flutter\n").unwrap();

    let resolver = ConfigResolver::new(tree.path(), StubLookup::default());
    // Pick config 1, answer yes to Flutter, then accept every default.
    let mut console = scripted("1\ny\n\n\n\n\n\n");
    let record = resolver.resolve(&mut console).unwrap();

    assert_eq!(record.platform, Platform::Flutter);
    assert_eq!(record.name.as_deref(), Some("demo_flutter"));
}

#[test]
fn test_environment_label_flows_from_config_path() {
    let tree = assert_fs::TempDir::new().unwrap();
    tree.child("app/Staging/google-services.json").write_str(ANDROID_CONFIG).unwrap();

    let resolver = ConfigResolver::new(tree.path(), StubLookup::default());
    let mut console = scripted("\n\n\n\n\n");
    let record = resolver.resolve(&mut console).unwrap();

    assert_eq!(record.firebase.environment.as_deref(), Some("Staging"));
}

#[test]
fn test_cli_enrichment_fills_missing_fields_only() {
    let tree = assert_fs::TempDir::new().unwrap();
    // Config with a project id but no app id.
    tree.child("google-services.json")
        .write_str(r#"{"project_info": {"project_id": "parsed-project"}}"#)
        .unwrap();

    let lookup = StubLookup {
        active: Some("cli-project".to_string()),
        apps: vec![FirebaseApp {
            id: "1:1:android:cli".to_string(),
            platform: "android".to_string(),
            display_name: "CLI App".to_string(),
        }],
        ..StubLookup::default()
    };

    let resolver = ConfigResolver::new(tree.path(), lookup);
    let mut console = scripted("\n\n\n\n\n");
    let record = resolver.resolve(&mut console).unwrap();

    // Parsed value wins; only the missing app id comes from the CLI.
    assert_eq!(record.firebase.project_id.as_deref(), Some("parsed-project"));
    assert_eq!(record.firebase.app_id.as_deref(), Some("1:1:android:cli"));
}

#[test]
fn test_configs_in_dependency_caches_are_ignored() {
    let tree = assert_fs::TempDir::new().unwrap();
    tree.child("node_modules/sdk/google-services.json").write_str(ANDROID_CONFIG).unwrap();

    let lookup = StubLookup {
        projects: vec![FirebaseProject {
            id: "listed-project".to_string(),
            display_name: "Listed".to_string(),
        }],
        ..StubLookup::default()
    };
    let resolver = ConfigResolver::new(tree.path(), lookup);

    // Nothing detected, so resolution falls through to the interactive
    // project listing: defaults pick the first listed project.
    let mut console = scripted("\n\n\n\n\n\n");
    let record = resolver.resolve(&mut console).unwrap();

    assert!(record.firebase.config_file.is_none());
    assert_eq!(record.firebase.project_id.as_deref(), Some("listed-project"));
}
