// tests/cli_test.rs
use git2::{BranchType, Repository};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn review_branch(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_git-review-branch"))
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute git-review-branch")
}

// Repository with A → "#5 fix bug", plus an empty config file so user config is not read
fn setup_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");
    {
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
    }

    let sig = repo.signature().unwrap();
    let mut parent = None;
    for (file, message) in [("a.txt", "A"), ("b.txt", "#5 fix bug")] {
        fs::write(temp_dir.path().join(file), message).unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(file)).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let parents: Vec<git2::Commit> = parent
            .map(|oid| repo.find_commit(oid).unwrap())
            .into_iter()
            .collect();
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();
        parent = Some(
            repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
                .unwrap(),
        );
    }

    fs::write(temp_dir.path().join("reviewbranch.toml"), "").unwrap();
    temp_dir
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    let output = review_branch(&["--help"], dir.path());

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("--repo"));
    assert!(stdout.contains("TICKET"));
}

#[test]
fn test_non_integer_ticket_is_usage_error() {
    let dir = setup_repo();
    let output = review_branch(&["abc"], dir.path());

    assert_eq!(output.status.code(), Some(2));
    let repo = Repository::open(dir.path()).unwrap();
    assert!(repo.branches(Some(BranchType::Local)).unwrap().count() == 1);
}

#[test]
fn test_missing_ticket_is_usage_error() {
    let dir = setup_repo();
    let output = review_branch(&[], dir.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_zero_ticket_is_usage_error() {
    let dir = setup_repo();
    let output = review_branch(&["0"], dir.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_no_match_exits_non_zero_naming_tickets() {
    let dir = setup_repo();
    let output = review_branch(&["7", "8"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(
        stderr.contains("no commits associated with ticket(s) 7 8"),
        "stderr was: {}",
        stderr
    );
}

#[test]
fn test_not_a_repository() {
    let dir = TempDir::new().unwrap();
    let output = review_branch(&["5"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Not a git repository"), "stderr was: {}", stderr);
}

#[test]
fn test_success_prints_hashes_and_hints() {
    let dir = setup_repo();
    let repo = Repository::open(dir.path()).unwrap();
    let ticket_commit = repo.head().unwrap().target().unwrap();
    let root = repo.find_commit(ticket_commit).unwrap().parent_id(0).unwrap();

    let output = review_branch(&["5"], dir.path());

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(&ticket_commit.to_string()));
    assert!(stdout.contains("You are now on branch"));
    assert!(stdout.contains("5_review"));
    assert!(stdout.contains(&format!("git log -u --stat {}..HEAD", root)));
    assert!(stdout.contains(&format!("git diff -u --stat {}..HEAD", root)));
    assert!(repo.find_branch("5_review", BranchType::Local).is_ok());
}

#[test]
fn test_repo_flag_points_elsewhere() {
    let repo_dir = setup_repo();
    let cwd = TempDir::new().unwrap();
    fs::write(cwd.path().join("reviewbranch.toml"), "").unwrap();
    let repo_path = repo_dir.path().to_str().unwrap();

    let output = review_branch(&["--repo", repo_path, "--dry-run", "5"], cwd.path());

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Would create branch"));
    let repo = Repository::open(repo_dir.path()).unwrap();
    assert!(repo.find_branch("5_review", BranchType::Local).is_err());
}

#[test]
fn test_custom_config_hides_hints() {
    let dir = setup_repo();
    fs::write(
        dir.path().join("quiet.toml"),
        "[behavior]\nshow_hints = false\n",
    )
    .unwrap();

    let output = review_branch(&["--config", "quiet.toml", "5"], dir.path());

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("You are now on branch"));
    assert!(!stdout.contains("git log -u --stat"));
}

#[test]
fn test_bad_config_exits_non_zero() {
    let dir = setup_repo();
    fs::write(
        dir.path().join("reviewbranch.toml"),
        "[branch]\nname_pattern = \"no-placeholder\"\n",
    )
    .unwrap();

    let output = review_branch(&["5"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error loading config"), "stderr was: {}", stderr);
}
