//! Crashflow - generate a crash triage workflow and optionally hand it to
//! an AI CLI for unattended execution.

use std::path::PathBuf;
use std::process::exit;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crashflow::config::GeneratorConfig;
use crashflow::console::Console;
use crashflow::executor::ExecutorRegistry;
use crashflow::resolver::{ConfigResolver, FirebaseCli};
use crashflow::selector::{select_plan, ExecutionPlan, PreflightError};
use crashflow::workflow;

/// Generate a Crashlytics crash triage workflow for AI execution
#[derive(Parser)]
#[command(name = "crashflow")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Emit the workflow document without invoking any AI tool
    #[arg(long)]
    generate_only: bool,

    /// Execute the generated workflow with the named AI tool
    #[arg(long, value_name = "NAME")]
    cli: Option<String>,

    /// Directory to scan for project configuration
    #[arg(long, value_name = "DIR", default_value = ".")]
    project_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };
    tracing_subscriber::registry().with(fmt::layer().with_target(false)).with(filter).init();

    match run(cli) {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let registry = ExecutorRegistry::new();
    let mut console = Console::stdio();

    // Finalize the plan first: a bad --cli request must fail before any
    // document is generated.
    let plan = match select_plan(cli.generate_only, cli.cli.as_deref(), &registry, &mut console) {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("{err}");
            match &err {
                PreflightError::NotInstalled(tool) => eprintln!("\n{}", tool.install_help()),
                PreflightError::NotAuthenticated { tool, .. } => {
                    eprintln!("\n{}", tool.auth_help());
                }
                PreflightError::UnknownTool { .. } => {}
            }
            return Ok(1);
        }
    };

    console.say("Firebase Crashlytics crash triage workflow generator\n")?;
    console.say("Auto-detecting project configuration...")?;

    let resolver = ConfigResolver::new(&cli.project_dir, FirebaseCli::new(&cli.project_dir));
    let record = resolver.resolve(&mut console)?;

    let mut config = GeneratorConfig::from_record(record);
    config.collect_extras(&mut console)?;
    console.say("\nConfiguration collected successfully!")?;

    let document = workflow::render(&config);
    let unresolved = workflow::unresolved_placeholders(&document);
    if !unresolved.is_empty() {
        tracing::warn!(?unresolved, "Rendered document has unresolved placeholders");
    }

    let output_dir = std::env::current_dir()?;
    let document_path = workflow::save_workflow(&document, &output_dir)?;
    console.say(&format!("\nGenerated workflow saved to: {}", document_path.display()))?;

    match config.save_snapshot() {
        Ok(path) => console.say(&format!("Configuration saved to: {}", path.display()))?,
        Err(e) => tracing::warn!(error = %e, "Could not save configuration snapshot"),
    }

    let tool = match plan {
        ExecutionPlan::Invoke(tool) => tool,
        ExecutionPlan::GenerateOnly => {
            console.say("\nNext steps:")?;
            console.say(&format!("1. Review the generated {}", workflow::WORKFLOW_FILE))?;
            console.say("2. Update any project-specific details as needed")?;
            console.say("3. Run the workflow with your AI assistant")?;
            return Ok(0);
        }
    };

    let invocation = tool.invocation(&document_path);
    console.say(&format!("\nExecuting with {}...", tool.display_name()))?;
    console.say(&format!("Command: {}\n", invocation))?;

    let outcome = tool.run(&document_path);
    if let Err(e) = workflow::write_execution_log(&output_dir, tool, &invocation, &outcome) {
        tracing::warn!(error = %e, "Could not write execution log");
    }

    if outcome.success {
        console.say(&format!("\n{} finished successfully", tool.display_name()))?;
        Ok(0)
    } else {
        if let Some(error) = &outcome.error {
            eprintln!("\nExecution failed: {error}");
        } else {
            eprintln!("\nExecution failed");
        }
        eprintln!("The generated document and config snapshot remain on disk.");
        Ok(2)
    }
}
