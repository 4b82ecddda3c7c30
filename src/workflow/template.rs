//! The crash-triage workflow template.

/// Workflow document handed to the AI tool as its task prompt.
///
/// `{{…}}` markers are substituted during rendering; the substitution set
/// lives in the parent module.
pub const WORKFLOW_TEMPLATE: &str = r#"# Crashlytics Crash Triage Workflow - {{PROJECT_NAME}}

You are an automated crash triage agent. Work through the steps below in
order, inside the project directory, without asking for confirmation.

## Project Configuration

- Project directory: `{{PROJECT_DIR}}`
- Project name: {{PROJECT_NAME}}
- Platform: {{PLATFORM}}
- Firebase project ID: `{{FIREBASE_PROJECT_ID}}`
- Firebase app ID: `{{APP_ID}}`
- Firebase config file: `{{FIREBASE_CONFIG_FILE}}`
- Environment: {{FIREBASE_ENVIRONMENT}}
- Kanban system: {{KANBAN_SYSTEM}}
- Kanban project: {{KANBAN_PROJECT_NAME}}

## Severity Thresholds

| Severity | Crash events (7 days) | Affected users |
|----------|-----------------------|----------------|
| Critical | >= {{CRITICAL_CRASHES}} | >= {{CRITICAL_USERS}} |
| High     | >= {{HIGH_CRASHES}} | >= {{HIGH_USERS}} |
| Medium   | >= {{MEDIUM_CRASHES}} | >= {{MEDIUM_USERS}} |

Anything below the medium tier is Low severity and is not ticketed.

## Step 1: Fetch crash data

1. Change into `{{PROJECT_DIR}}`.
2. Use the Firebase CLI (or the Crashlytics MCP tools if available) to list
   the top crash issues of the last 7 days for app `{{APP_ID}}` in project
   `{{FIREBASE_PROJECT_ID}}`.
3. For each issue capture: issue ID, title, crash event count, affected
   user count, first/latest affected app version, and the top stack frame.

## Step 2: Classify severity

Assign each issue the highest severity tier whose crash-event OR
affected-user threshold it meets, using the table above. Record the tier
with the issue data from step 1.

## Step 3: Locate the crash in the codebase

For every Critical and High issue:

1. Map the top stack frames to files in `{{PROJECT_DIR}}` ({{PLATFORM}}
   sources).
2. Identify the most likely faulting code path and summarize the root-cause
   hypothesis in two or three sentences.
3. Note the affected file paths and line numbers where resolvable.

## Step 4: Create kanban tasks

For each Critical, High, and Medium issue, create a task in the
"{{KANBAN_PROJECT_NAME}}" project of the {{KANBAN_SYSTEM}} kanban system:

- Title: `[<SEVERITY>] <crash issue title>`
- Description must include: Crashlytics issue ID, crash/user counts,
  affected versions, the root-cause hypothesis from step 3, and the
  affected file paths.
- Skip issues that already have an open task with the same issue ID in the
  title.

## Step 5: Report

Print a summary table of every processed issue: issue ID, severity, crash
count, user count, and the created (or skipped) task. Finish with totals
per severity tier.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_contains_every_placeholder() {
        for placeholder in [
            "{{PROJECT_DIR}}",
            "{{PROJECT_NAME}}",
            "{{PLATFORM}}",
            "{{FIREBASE_PROJECT_ID}}",
            "{{APP_ID}}",
            "{{FIREBASE_CONFIG_FILE}}",
            "{{FIREBASE_ENVIRONMENT}}",
            "{{KANBAN_SYSTEM}}",
            "{{KANBAN_PROJECT_NAME}}",
            "{{CRITICAL_CRASHES}}",
            "{{CRITICAL_USERS}}",
            "{{HIGH_CRASHES}}",
            "{{HIGH_USERS}}",
            "{{MEDIUM_CRASHES}}",
            "{{MEDIUM_USERS}}",
        ] {
            assert!(WORKFLOW_TEMPLATE.contains(placeholder), "missing {placeholder}");
        }
    }
}
