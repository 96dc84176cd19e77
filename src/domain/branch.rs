use git2::Oid;

use crate::config::{BranchConfig, TICKETS_PLACEHOLDER};
use crate::domain::TicketSet;
use crate::error::{ReviewBranchError, Result};
use crate::git::CommitInfo;

/// The branch a review is replayed onto: its name and the commit it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewBranch {
    pub name: String,
    pub root: Oid,
}

/// Branch name for `tickets`, e.g. `5|9_review` with the default configuration.
pub fn review_branch_name(tickets: &TicketSet, config: &BranchConfig) -> String {
    config
        .name_pattern
        .replace(TICKETS_PLACEHOLDER, &tickets.joined(&config.ticket_separator))
}

/// Plan the review branch for the oldest-first list of matched `commits`.
///
/// The root is the first parent of the oldest matched commit.
pub fn plan_review_branch(
    tickets: &TicketSet,
    commits: &[CommitInfo],
    config: &BranchConfig,
) -> Result<ReviewBranch> {
    let oldest = commits
        .first()
        .ok_or_else(|| ReviewBranchError::no_matching_commits(tickets.to_string()))?;

    let root = oldest
        .first_parent()
        .ok_or_else(|| ReviewBranchError::RootCommit(oldest.id.to_string()))?;

    Ok(ReviewBranch {
        name: review_branch_name(tickets, config),
        root,
    })
}
