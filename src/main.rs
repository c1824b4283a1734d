//! git-auto-commit - CLI entry point.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use git_auto_commit::config::wizard::{TerminalPrompter, prompt_settings};
use git_auto_commit::config::{ConfigFile, resolve_config_path};
use git_auto_commit::error::WorkflowError;
use git_auto_commit::git::{GitCli, check_git_installed, discover_workdir};
use git_auto_commit::llm::create_provider;
use git_auto_commit::workflow::{GenerateOptions, generate_and_commit};

/// Generate commit messages for staged changes using AI.
#[derive(Parser, Debug)]
#[command(name = "git-auto-commit")]
#[command(about = "Generate commit messages for staged changes using AI")]
#[command(version)]
struct Cli {
    /// Config file path (default: $HOME/.git-auto-commit.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Generate the commit message without committing
    #[arg(short, long)]
    dry_run: bool,

    /// Do not read commit guidelines from CONTRIBUTING.md, instruction files, or .gitmessage
    #[arg(long)]
    no_guidelines: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactively configure the AI provider and credentials
    Configure,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Some(Command::Configure) => run_configure(cli.config.as_deref()),
        None => run_generate(&cli).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.downcast_ref::<WorkflowError>().is_some_and(WorkflowError::is_cancelled) => {
            eprintln!("Cancelled. Nothing was committed.");
            ExitCode::from(130)
        }
        Err(e) => {
            eprintln!("Error: {}", render_error(&e));
            ExitCode::FAILURE
        }
    }
}

/// Join the error chain, skipping causes already spelled out by their parent.
fn render_error(err: &anyhow::Error) -> String {
    let mut rendered = String::new();
    for cause in err.chain() {
        let text = cause.to_string();
        if rendered.contains(&text) {
            continue;
        }
        if !rendered.is_empty() {
            rendered.push_str(": ");
        }
        rendered.push_str(&text);
    }
    rendered
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

async fn run_generate(cli: &Cli) -> Result<()> {
    // Step 1: Load configuration and select the provider
    let config_path = resolve_config_path(cli.config.as_deref())?;
    let config = ConfigFile::load(&config_path).with_context(|| {
        format!(
            "Failed to load configuration. Run `git-auto-commit configure` to create {}",
            config_path.display()
        )
    })?;
    let provider = create_provider(&config).context("Failed to create AI provider")?;

    // Step 2: Locate the repository
    check_git_installed()?;
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let workdir = discover_workdir(&cwd)?;
    debug!("Repository work tree: {}", workdir.display());

    // Step 3: Cancel in-flight git/HTTP calls on Ctrl-C
    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_token.cancel();
        }
    });

    // Step 4: Generate and (optionally) commit
    let vcs = GitCli::new(&workdir);
    let options = GenerateOptions {
        dry_run: cli.dry_run,
        guidance_root: (!cli.no_guidelines).then(|| workdir.clone()),
    };

    let outcome = generate_and_commit(&vcs, provider.as_ref(), &options, &cancel, |message| {
        println!("Generated commit message:");
        println!("---");
        println!("{}", message);
        println!("---");
    })
    .await?;

    if outcome.committed {
        println!("✓ Changes committed successfully");
    }

    Ok(())
}

fn run_configure(explicit_path: Option<&Path>) -> Result<()> {
    let path = resolve_config_path(explicit_path)?;

    println!("Git Auto-Commit Configuration");
    println!("==============================");
    println!();

    let settings = prompt_settings(&mut TerminalPrompter)?;
    ConfigFile::from(settings)
        .save(&path)
        .context("Failed to save configuration")?;

    println!("\n✓ Configuration saved to {}", path.display());
    Ok(())
}
