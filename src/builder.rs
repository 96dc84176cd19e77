//! Replays ticket commits onto a fresh review branch.
//!
//! Conflicts never stop a replay: the conflicted working tree is committed
//! as-is under the original commit's message and author, and the run moves
//! on. The resulting branch is meant to be read by a human, not merged.

use git2::Oid;
use tracing::{info, warn};

use crate::config::BranchConfig;
use crate::domain::{plan_review_branch, ReviewBranch, TicketSet};
use crate::error::Result;
use crate::git::{CommitInfo, PickOutcome, Repository};

/// One matched commit and the commit that now stands for it on the review branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayedCommit {
    pub source: Oid,
    pub replayed: Oid,
    /// The replayed commit carries unresolved conflict markers.
    pub conflicted: bool,
}

/// Outcome of building a review branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub branch: ReviewBranch,
    pub replayed: Vec<ReplayedCommit>,
}

impl BuildReport {
    pub fn conflicted(&self) -> impl Iterator<Item = &ReplayedCommit> {
        self.replayed.iter().filter(|r| r.conflicted)
    }
}

/// Creates the review branch for `tickets`, checks it out and replays
/// `commits` (oldest first) onto it in order.
///
/// `on_commit` is called with each commit just before it is replayed.
///
/// # Errors
/// * `NoMatchingCommits` - `commits` is empty; nothing is created
/// * `RootCommit` - the oldest commit has no parent to branch from
/// * `BranchExists` - the branch is already there; nothing is overwritten
/// * anything else from the repository aborts the build where it stands
pub fn build_review_branch<R, F>(
    repo: &R,
    tickets: &TicketSet,
    commits: &[CommitInfo],
    config: &BranchConfig,
    mut on_commit: F,
) -> Result<BuildReport>
where
    R: Repository,
    F: FnMut(&CommitInfo),
{
    let branch = plan_review_branch(tickets, commits, config)?;

    repo.create_branch(&branch.name, branch.root)?;
    repo.checkout_branch(&branch.name)?;

    let mut replayed = Vec::with_capacity(commits.len());
    for commit in commits {
        on_commit(commit);
        replayed.push(replay_commit(repo, commit)?);
    }

    info!(
        branch = %branch.name,
        root = %branch.root,
        replayed = replayed.len(),
        "review branch built"
    );

    Ok(BuildReport { branch, replayed })
}

/// Cherry-picks one commit, force-committing the conflicted state if the pick stops.
fn replay_commit<R: Repository>(repo: &R, commit: &CommitInfo) -> Result<ReplayedCommit> {
    match repo.cherry_pick(commit.id)? {
        PickOutcome::Applied(new_oid) => Ok(ReplayedCommit {
            source: commit.id,
            replayed: new_oid,
            conflicted: false,
        }),
        PickOutcome::Conflicted => {
            warn!(commit = %commit.id, "conflict during cherry-pick, committing as-is");
            repo.stage_all()?;
            let new_oid = repo.commit_as(commit.id)?;
            Ok(ReplayedCommit {
                source: commit.id,
                replayed: new_oid,
                conflicted: true,
            })
        }
    }
}
