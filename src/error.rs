use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for git-review-branch operations
#[derive(Error, Debug)]
pub enum ReviewBranchError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Not a git repository: {path}: {source}")]
    NotARepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("At least one ticket number is required")]
    NoTickets,

    #[error("no commits associated with ticket(s) {tickets}")]
    NoMatchingCommits { tickets: String },

    #[error("Commit {0} has no parent, a review branch cannot start before the first commit of the repository")]
    RootCommit(String),

    #[error("Branch '{0}' already exists")]
    BranchExists(String),

    #[error("Invalid ticket pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-review-branch
pub type Result<T> = std::result::Result<T, ReviewBranchError>;

impl ReviewBranchError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReviewBranchError::Config(msg.into())
    }

    /// Create a no-match error listing the tickets that were searched for
    pub fn no_matching_commits(tickets: impl Into<String>) -> Self {
        ReviewBranchError::NoMatchingCommits {
            tickets: tickets.into(),
        }
    }
}
