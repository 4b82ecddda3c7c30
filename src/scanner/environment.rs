//! Environment label inference from config file paths.
//!
//! A heuristic, not a guarantee: ambiguous paths resolve to the first
//! keyword hit in segment order.

use std::path::Path;

/// Environment keywords and their display labels, checked in this order
/// within each path segment.
const KEYWORDS: [(&str, &str); 14] = [
    ("prod", "Production"),
    ("production", "Production"),
    ("release", "Production"),
    ("dev", "Development"),
    ("development", "Development"),
    ("debug", "Development"),
    ("staging", "Staging"),
    ("stage", "Staging"),
    ("test", "Testing"),
    ("testing", "Testing"),
    ("qa", "QA"),
    ("uat", "UAT"),
    ("demo", "Demo"),
    ("beta", "Beta"),
];

/// Structural directory names excluded from the capitalized-segment
/// fallback.
const STRUCTURAL_DIRS: [&str; 6] = ["src", "app", "config", "firebase", "resources", "assets"];

/// Infer a human-readable environment label from a config file path.
///
/// First match wins: (1) any lower-cased segment containing a known
/// environment keyword; (2) failing that, the first capitalized-word
/// segment outside the structural directory names, returned verbatim.
pub fn classify_environment(path: &Path) -> Option<String> {
    let segments: Vec<&str> = path.iter().filter_map(|s| s.to_str()).collect();

    for segment in &segments {
        let lower = segment.to_lowercase();
        for (keyword, label) in KEYWORDS {
            if lower.contains(keyword) {
                return Some(label.to_string());
            }
        }
    }

    for segment in segments {
        if STRUCTURAL_DIRS.contains(&segment.to_lowercase().as_str()) {
            continue;
        }
        if is_capitalized_word(segment) {
            return Some(segment.to_string());
        }
    }

    None
}

/// One uppercase letter followed by one or more lowercase letters.
fn is_capitalized_word(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            let rest: Vec<char> = chars.collect();
            !rest.is_empty() && rest.iter().all(|c| c.is_ascii_lowercase())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_segments_map_to_labels() {
        let cases = [
            ("/app/Staging/google-services.json", "Staging"),
            ("/project/android/prod/google-services.json", "Production"),
            ("/project/release/google-services.json", "Production"),
            ("/project/dev/google-services.json", "Development"),
            ("/project/debug/google-services.json", "Development"),
            ("/project/qa/google-services.json", "QA"),
            ("/project/uat/google-services.json", "UAT"),
            ("/project/demo-env/google-services.json", "Demo"),
            ("/project/beta/GoogleService-Info.plist", "Beta"),
        ];

        for (path, expected) in cases {
            assert_eq!(
                classify_environment(Path::new(path)).as_deref(),
                Some(expected),
                "path: {path}"
            );
        }
    }

    #[test]
    fn test_keyword_containment_not_exact_match() {
        assert_eq!(
            classify_environment(Path::new("/app/preproduction/google-services.json")).as_deref(),
            Some("Production")
        );
    }

    #[test]
    fn test_first_keyword_in_segment_order_wins() {
        // "dev" appears in an earlier segment than "Staging".
        assert_eq!(
            classify_environment(Path::new("/work/dev/Staging/google-services.json")).as_deref(),
            Some("Development")
        );
    }

    #[test]
    fn test_structural_path_yields_none() {
        assert_eq!(classify_environment(Path::new("/app/src/main/config.json")), None);
    }

    #[test]
    fn test_capitalized_segment_fallback() {
        assert_eq!(
            classify_environment(Path::new("/work/src/Sandbox/google-services.json")).as_deref(),
            Some("Sandbox")
        );
    }

    #[test]
    fn test_structural_dirs_excluded_from_fallback() {
        // "App" lower-cases to a structural name and must not be returned.
        assert_eq!(classify_environment(Path::new("/work/App/google-services.json")), None);
    }

    #[test]
    fn test_is_capitalized_word() {
        assert!(is_capitalized_word("Sandbox"));
        assert!(!is_capitalized_word("sandbox"));
        assert!(!is_capitalized_word("SANDBOX"));
        assert!(!is_capitalized_word("S"));
        assert!(!is_capitalized_word("Sand-box"));
    }
}
