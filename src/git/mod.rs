//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of Git
//! operations a review needs, allowing for a real repository implementation
//! and an in-memory one for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations are:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! # Usage
//!
//! The finder, the builder and the workflow depend on the [Repository] trait
//! rather than on a concrete implementation.
//!
//! ```rust
//! # use git_review_branch::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! for commit in repo.head_history()? {
//!     println!("{} {}", commit.id, commit.summary());
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;

/// Commit information read from history
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The commit id
    pub id: Oid,
    /// The full commit message
    pub message: String,
    /// The commit author's name
    pub author: String,
    /// Parent commit ids, first parent first
    pub parents: Vec<Oid>,
}

impl CommitInfo {
    /// The first parent, if the commit has one.
    pub fn first_parent(&self) -> Option<Oid> {
        self.parents.first().copied()
    }

    /// First line of the message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

impl From<&git2::Commit<'_>> for CommitInfo {
    fn from(commit: &git2::Commit<'_>) -> Self {
        CommitInfo {
            id: commit.id(),
            message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
            author: commit.author().name().unwrap_or("unknown").to_string(),
            parents: commit.parent_ids().collect(),
        }
    }
}

/// How a single cherry-pick went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// The pick merged cleanly and was committed as the given commit.
    Applied(Oid),
    /// The pick left conflicts in the index and working tree; nothing was committed.
    Conflicted,
}

/// The git capabilities a review needs
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors (like `git2::Error`) to the appropriate
/// [crate::error::ReviewBranchError] variants. A content conflict during a
/// cherry-pick is not an error: it is reported as [PickOutcome::Conflicted].
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): Real Git implementation using the `git2` crate
/// - [MockRepository](mock::MockRepository): Test implementation that records every call
pub trait Repository {
    /// Walk the history reachable from HEAD, newest first
    ///
    /// # Returns
    /// * `Ok(Vec<CommitInfo>)` - Every reachable commit, in the default git log order
    /// * `Err` - If HEAD cannot be resolved or the walk fails
    fn head_history(&self) -> Result<Vec<CommitInfo>>;

    /// Create a local branch pointing at `at`
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err(ReviewBranchError::BranchExists)` - If a branch of that name already exists
    /// * `Err` - If the commit doesn't exist or the name is invalid
    fn create_branch(&self, name: &str, at: Oid) -> Result<()>;

    /// Check out an existing local branch, updating the working tree and HEAD
    fn checkout_branch(&self, name: &str) -> Result<()>;

    /// Cherry-pick `commit` onto the current HEAD
    ///
    /// A clean pick is committed with the original author and message.
    /// A conflicting pick leaves conflict markers in the working tree and
    /// returns [PickOutcome::Conflicted] without committing.
    fn cherry_pick(&self, commit: Oid) -> Result<PickOutcome>;

    /// Stage every change in the working tree, conflicted files included
    fn stage_all(&self) -> Result<()>;

    /// Commit the staged tree on HEAD, reusing the message and author of `original`
    ///
    /// # Returns
    /// * `Ok(Oid)` - The id of the new commit
    fn commit_as(&self, original: Oid) -> Result<Oid>;
}
