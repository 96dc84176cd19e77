use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use git_review_branch::cli::{run_review_workflow, ReviewWorkflowArgs};
use git_review_branch::config;
use git_review_branch::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-review-branch",
    version,
    about = "Collect the commits that reference tickets onto a new review branch"
)]
struct Args {
    #[arg(long, default_value = ".", help = "Path to repository")]
    repo: PathBuf,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Show the matching commits and planned branch without changing anything")]
    dry_run: bool,

    #[arg(short, long, help = "Log git operations to stderr")]
    verbose: bool,

    #[arg(
        required = true,
        value_name = "TICKET",
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Ticket number(s) for review"
    )]
    tickets: Vec<u64>,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("git_review_branch=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let workflow_args = ReviewWorkflowArgs {
        repo_path: args.repo,
        tickets: args.tickets,
        dry_run: args.dry_run,
    };

    if let Err(e) = run_review_workflow(workflow_args, config) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
