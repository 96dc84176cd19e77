//! Console output for the review workflow.
//!
//! Progress and results go to stdout; errors and warnings go to stderr.

use console::style;
use git2::Oid;

use crate::git::CommitInfo;
use crate::warnings::ReviewWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a non-fatal warning.
pub fn display_warning(warning: &ReviewWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Print the hash of a commit as it is replayed.
pub fn display_replaying(commit: &CommitInfo) {
    println!("{}", commit.id);
}

/// List the matched commits, oldest first, with their summaries.
pub fn display_matched_commits(commits: &[CommitInfo]) {
    println!("{}", style(format!("{} matching commit(s):", commits.len())).bold());
    for commit in commits {
        println!("  {} {}", style(commit.id).dim(), commit.summary());
    }
}

/// The commands suggested for inspecting the review branch.
pub fn inspection_commands(root: Oid) -> [String; 2] {
    [
        format!("git log -u --stat {}..HEAD", root),
        format!("git diff -u --stat {}..HEAD", root),
    ]
}

/// Summary printed once the review branch is built.
pub fn display_review_summary(branch: &str, root: Oid, show_hints: bool) {
    println!("You are now on branch {}", style(branch).green().bold());
    println!("The root commit you branched off at was {}", root);
    if show_hints {
        println!("To view changes for this ticket, try one of these:");
        for command in inspection_commands(root) {
            println!("  {}", style(command).cyan());
        }
    }
}

/// Summary printed by a dry run, where nothing was created.
pub fn display_dry_run_plan(branch: &str, root: Oid) {
    display_status("Dry run, no changes made:");
    println!("  Would create branch {}", style(branch).green().bold());
    println!("  Rooted at {}", root);
}
