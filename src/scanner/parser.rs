//! Config field extraction.
//!
//! Two per-kind parsers, both normalizing to the same [`ParsedFields`]
//! shape. Malformed input yields an empty field set plus a warning, never
//! an error past this boundary.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// Identity fields extracted from a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFields {
    /// Firebase project id.
    pub project_id: Option<String>,

    /// Firebase app id (`mobilesdk_app_id` on Android, `GOOGLE_APP_ID` on iOS).
    pub app_id: Option<String>,

    /// Numeric project number (Android only).
    pub project_number: Option<String>,
}

/// Relevant subset of `google-services.json`.
#[derive(Debug, Deserialize)]
struct GoogleServices {
    project_info: Option<ProjectInfo>,
    client: Option<Vec<Client>>,
}

#[derive(Debug, Deserialize)]
struct ProjectInfo {
    project_id: Option<String>,
    project_number: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Client {
    client_info: Option<ClientInfo>,
}

#[derive(Debug, Deserialize)]
struct ClientInfo {
    mobilesdk_app_id: Option<String>,
}

/// Extract identity fields from a `google-services.json` file.
pub fn parse_google_services(path: &Path) -> ParsedFields {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Could not read google-services.json");
            return ParsedFields::default();
        }
    };

    let doc: GoogleServices = match serde_json::from_str(&content) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Could not parse google-services.json");
            return ParsedFields::default();
        }
    };

    ParsedFields {
        project_id: doc.project_info.as_ref().and_then(|p| p.project_id.clone()),
        project_number: doc.project_info.as_ref().and_then(|p| p.project_number.clone()),
        app_id: doc
            .client
            .as_ref()
            .and_then(|clients| clients.first())
            .and_then(|client| client.client_info.as_ref())
            .and_then(|info| info.mobilesdk_app_id.clone()),
    }
}

static PLIST_PROJECT_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<key>PROJECT_ID</key>\s*<string>([^<]+)</string>").expect("valid regex")
});

static PLIST_APP_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<key>GOOGLE_APP_ID</key>\s*<string>([^<]+)</string>").expect("valid regex")
});

/// Extract identity fields from a `GoogleService-Info.plist` file.
///
/// Pattern extraction over the raw text; the plist format carries no
/// project number.
pub fn parse_service_plist(path: &Path) -> ParsedFields {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Could not read GoogleService-Info.plist");
            return ParsedFields::default();
        }
    };

    ParsedFields {
        project_id: PLIST_PROJECT_ID.captures(&content).map(|c| c[1].to_string()),
        app_id: PLIST_APP_ID.captures(&content).map(|c| c[1].to_string()),
        project_number: None,
    }
}
