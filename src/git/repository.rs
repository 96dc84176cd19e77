use crate::error::{ReviewBranchError, Result};
use crate::git::{CommitInfo, PickOutcome};
use git2::build::CheckoutBuilder;
use git2::{CherrypickOptions, ErrorCode, Index, IndexAddOption, Oid, Repository as Git2Repo};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open the repository at `path`
    ///
    /// Unlike discovery, parent directories are not searched.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::open(path).map_err(|source| ReviewBranchError::NotARepository {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Writes `index` as a tree and commits it on HEAD with the message and
    /// author of `original`. The committer is the configured user.
    fn commit_index(&self, original: &git2::Commit<'_>, index: &mut Index) -> Result<Oid> {
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let head = self.repo.head()?.peel_to_commit()?;
        let committer = self.repo.signature()?;
        let message = String::from_utf8_lossy(original.message_bytes()).into_owned();

        let oid = self.repo.commit(
            Some("HEAD"),
            &original.author(),
            &committer,
            &message,
            &tree,
            &[&head],
        )?;

        // Drops CHERRY_PICK_HEAD and MERGE_MSG left behind by the pick.
        self.repo.cleanup_state()?;
        Ok(oid)
    }

    /// Paths still conflicted in `index`.
    fn conflicted_paths(index: &Index) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for conflict in index.conflicts()? {
            let conflict = conflict?;
            if let Some(entry) = conflict.our.or(conflict.their).or(conflict.ancestor) {
                paths.push(PathBuf::from(String::from_utf8_lossy(&entry.path).into_owned()));
            }
        }
        Ok(paths)
    }
}

impl super::Repository for Git2Repository {
    #[instrument(skip(self))]
    fn head_history(&self) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.push_head()?;

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;
            commits.push(CommitInfo::from(&commit));
        }

        debug!(count = commits.len(), "walked history from HEAD");
        Ok(commits)
    }

    #[instrument(skip(self))]
    fn create_branch(&self, name: &str, at: Oid) -> Result<()> {
        let commit = self.repo.find_commit(at)?;
        match self.repo.branch(name, &commit, false) {
            Ok(_) => {
                info!(branch = name, "created review branch");
                Ok(())
            }
            Err(e) if e.code() == ErrorCode::Exists => {
                Err(ReviewBranchError::BranchExists(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    fn checkout_branch(&self, name: &str) -> Result<()> {
        let refname = format!("refs/heads/{}", name);
        let target = self.repo.revparse_single(&refname)?;

        let mut checkout = CheckoutBuilder::new();
        checkout.safe();
        self.repo.checkout_tree(&target, Some(&mut checkout))?;
        self.repo.set_head(&refname)?;

        debug!(branch = name, "checked out");
        Ok(())
    }

    #[instrument(skip(self))]
    fn cherry_pick(&self, commit: Oid) -> Result<PickOutcome> {
        let original = self.repo.find_commit(commit)?;

        let mut options = CherrypickOptions::new();
        if original.parent_count() > 1 {
            options.mainline(1);
        }
        self.repo.cherrypick(&original, Some(&mut options))?;

        let mut index = self.repo.index()?;
        if index.has_conflicts() {
            debug!("cherry-pick stopped on conflicts");
            return Ok(PickOutcome::Conflicted);
        }

        let new_oid = self.commit_index(&original, &mut index)?;
        debug!(new = %new_oid, "cherry-pick applied");
        Ok(PickOutcome::Applied(new_oid))
    }

    #[instrument(skip(self))]
    fn stage_all(&self) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"].iter(), None)?;

        // A conflicted path with nothing left in the working tree is staged as deleted.
        if index.has_conflicts() {
            let workdir = self
                .repo
                .workdir()
                .ok_or_else(|| git2::Error::from_str("repository has no working directory"))?
                .to_path_buf();
            for path in Self::conflicted_paths(&index)? {
                if !workdir.join(&path).exists() {
                    index.remove_path(&path)?;
                }
            }
        }

        index.write()?;
        Ok(())
    }

    #[instrument(skip(self))]
    fn commit_as(&self, original: Oid) -> Result<Oid> {
        let original = self.repo.find_commit(original)?;
        let mut index = self.repo.index()?;
        let oid = self.commit_index(&original, &mut index)?;
        debug!(new = %oid, "committed as original");
        Ok(oid)
    }
}
