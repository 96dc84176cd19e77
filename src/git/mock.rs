use crate::error::{ReviewBranchError, Result};
use crate::git::{CommitInfo, PickOutcome, Repository};
use git2::Oid;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

#[derive(Default)]
struct MockState {
    branch_heads: HashMap<String, Oid>,
    replayed: HashMap<String, Vec<Oid>>,
    current_branch: Option<String>,
    pending_conflict: Option<Oid>,
    staged: bool,
    next_id: u32,
    calls: Vec<String>,
}

/// Mock repository for testing without actual git operations
///
/// History is held newest first, the way [Repository::head_history] reports it.
/// Cherry-picks of commits marked conflicting stop with [PickOutcome::Conflicted];
/// commits marked failing make the pick return a git error.
pub struct MockRepository {
    history: Vec<CommitInfo>,
    conflicting: HashSet<Oid>,
    failing: HashSet<Oid>,
    state: RefCell<MockState>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            history: Vec::new(),
            conflicting: HashSet::new(),
            failing: HashSet::new(),
            state: RefCell::new(MockState::default()),
        }
    }

    /// Add a commit on top of the history; it becomes the newest commit
    pub fn add_commit(&mut self, info: CommitInfo) {
        self.history.insert(0, info);
    }

    /// Make cherry-picks of `oid` stop on conflicts
    pub fn mark_conflicting(&mut self, oid: Oid) {
        self.conflicting.insert(oid);
    }

    /// Make cherry-picks of `oid` fail outright
    pub fn mark_failing(&mut self, oid: Oid) {
        self.failing.insert(oid);
    }

    /// Set a branch head
    pub fn set_branch_head(&mut self, branch: impl Into<String>, oid: Oid) {
        self.state.get_mut().branch_heads.insert(branch.into(), oid);
    }

    pub fn branch_head(&self, branch: &str) -> Option<Oid> {
        self.state.borrow().branch_heads.get(branch).copied()
    }

    pub fn current_branch(&self) -> Option<String> {
        self.state.borrow().current_branch.clone()
    }

    /// Commits created on `branch` by picks and conflict commits, oldest first
    pub fn replayed_on(&self, branch: &str) -> Vec<Oid> {
        self.state
            .borrow()
            .replayed
            .get(branch)
            .cloned()
            .unwrap_or_default()
    }

    /// Names of the trait methods called so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    fn record(&self, call: &str) {
        self.state.borrow_mut().calls.push(call.to_string());
    }

    /// Appends a fresh commit id to the checked out branch.
    fn advance_head(&self) -> Result<Oid> {
        let mut state = self.state.borrow_mut();
        let branch = state
            .current_branch
            .clone()
            .ok_or_else(|| git2::Error::from_str("no branch checked out"))?;

        state.next_id += 1;
        let mut bytes = [0xee; 20];
        bytes[16..].copy_from_slice(&state.next_id.to_be_bytes());
        let oid = Oid::from_bytes(&bytes)?;

        state.branch_heads.insert(branch.clone(), oid);
        state.replayed.entry(branch).or_default().push(oid);
        Ok(oid)
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn head_history(&self) -> Result<Vec<CommitInfo>> {
        self.record("head_history");
        Ok(self.history.clone())
    }

    fn create_branch(&self, name: &str, at: Oid) -> Result<()> {
        self.record("create_branch");
        let mut state = self.state.borrow_mut();
        if state.branch_heads.contains_key(name) {
            return Err(ReviewBranchError::BranchExists(name.to_string()));
        }
        state.branch_heads.insert(name.to_string(), at);
        Ok(())
    }

    fn checkout_branch(&self, name: &str) -> Result<()> {
        self.record("checkout_branch");
        let mut state = self.state.borrow_mut();
        if !state.branch_heads.contains_key(name) {
            return Err(git2::Error::from_str(&format!("branch not found: {}", name)).into());
        }
        state.current_branch = Some(name.to_string());
        Ok(())
    }

    fn cherry_pick(&self, commit: Oid) -> Result<PickOutcome> {
        self.record("cherry_pick");
        if self.failing.contains(&commit) {
            return Err(git2::Error::from_str("simulated I/O failure").into());
        }
        if self.conflicting.contains(&commit) {
            self.state.borrow_mut().pending_conflict = Some(commit);
            return Ok(PickOutcome::Conflicted);
        }
        Ok(PickOutcome::Applied(self.advance_head()?))
    }

    fn stage_all(&self) -> Result<()> {
        self.record("stage_all");
        self.state.borrow_mut().staged = true;
        Ok(())
    }

    fn commit_as(&self, original: Oid) -> Result<Oid> {
        self.record("commit_as");
        {
            let state = self.state.borrow();
            if state.pending_conflict.is_some() && !state.staged {
                return Err(git2::Error::from_str("unmerged paths, stage them first").into());
            }
            if state.pending_conflict.is_some_and(|pending| pending != original) {
                return Err(git2::Error::from_str("commit does not match the pending pick").into());
            }
        }
        let oid = self.advance_head()?;
        let mut state = self.state.borrow_mut();
        state.pending_conflict = None;
        state.staged = false;
        Ok(oid)
    }
}
