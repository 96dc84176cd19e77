//! Main workflow orchestration logic
//!
//! Ties the finder and the builder together and reports progress through
//! the `ui` module. Kept apart from `main.rs` so the workflow can run
//! programmatically, and against any [Repository], without clap.

use std::path::PathBuf;

use git2::Oid;
use tracing::info;

use crate::builder::{build_review_branch, ReplayedCommit};
use crate::config::Config;
use crate::domain::{plan_review_branch, TicketSet};
use crate::error::{ReviewBranchError, Result};
use crate::finder::find_ticket_commits;
use crate::git::{Git2Repository, Repository};
use crate::ui;
use crate::warnings::ReviewWarning;

/// Arguments for the review workflow
///
/// Mirrors the CLI arguments in a form that does not depend on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewWorkflowArgs {
    /// Repository to work in
    pub repo_path: PathBuf,

    /// Ticket numbers to collect, in the order given
    pub tickets: Vec<u64>,

    /// Find and plan only; leave the repository untouched
    pub dry_run: bool,
}

/// Result of a successful review workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Name of the review branch (created, or planned on a dry run)
    pub branch: String,

    /// Commit the review branch starts at
    pub root: Oid,

    /// One entry per matched commit; empty on a dry run
    pub replayed: Vec<ReplayedCommit>,

    /// Matched commit ids, oldest first
    pub matched: Vec<Oid>,

    pub dry_run: bool,

    /// Non-fatal issues shown to the user
    pub warnings: Vec<ReviewWarning>,
}

/// Main review workflow
///
/// 1. Validate the tickets
/// 2. Open the repository
/// 3. Find matching commits
/// 4. Build the review branch (or only plan it on a dry run)
pub fn run_review_workflow(args: ReviewWorkflowArgs, config: Config) -> Result<WorkflowResult> {
    let tickets = TicketSet::new(args.tickets)?;
    let repo = Git2Repository::open(&args.repo_path)?;
    info!(repo = %args.repo_path.display(), tickets = %tickets, "opened repository");

    run_with_repository(&repo, &tickets, &config, args.dry_run)
}

/// The workflow over an already opened repository.
pub fn run_with_repository<R: Repository>(
    repo: &R,
    tickets: &TicketSet,
    config: &Config,
    dry_run: bool,
) -> Result<WorkflowResult> {
    let mut warnings = Vec::new();

    let duplicates = tickets.duplicates();
    if !duplicates.is_empty() {
        warnings.push(ReviewWarning::DuplicateTickets {
            tickets: duplicates,
        });
    }

    let commits = find_ticket_commits(repo, tickets)?;
    if commits.is_empty() {
        return Err(ReviewBranchError::no_matching_commits(tickets.to_string()));
    }

    let unmatched = tickets.unmatched(commits.iter().map(|c| c.message.as_str()));
    if !unmatched.is_empty() {
        warnings.push(ReviewWarning::UnmatchedTickets { tickets: unmatched });
    }

    let matched: Vec<Oid> = commits.iter().map(|c| c.id).collect();

    if dry_run {
        let plan = plan_review_branch(tickets, &commits, &config.branch)?;
        for warning in &warnings {
            ui::display_warning(warning);
        }
        ui::display_matched_commits(&commits);
        ui::display_dry_run_plan(&plan.name, plan.root);

        return Ok(WorkflowResult {
            branch: plan.name,
            root: plan.root,
            replayed: Vec::new(),
            matched,
            dry_run,
            warnings,
        });
    }

    let report = build_review_branch(
        repo,
        tickets,
        &commits,
        &config.branch,
        ui::display_replaying,
    )?;

    warnings.extend(report.conflicted().map(|r| ReviewWarning::ConflictCommitted {
        source: r.source,
        replayed: r.replayed,
    }));
    for warning in &warnings {
        ui::display_warning(warning);
    }

    ui::display_review_summary(
        &report.branch.name,
        report.branch.root,
        config.behavior.show_hints,
    );

    Ok(WorkflowResult {
        branch: report.branch.name,
        root: report.branch.root,
        replayed: report.replayed,
        matched,
        dry_run,
        warnings,
    })
}
