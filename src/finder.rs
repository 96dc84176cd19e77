use tracing::debug;

use crate::domain::TicketSet;
use crate::error::Result;
use crate::git::{CommitInfo, Repository};

/// Finds the commits on the current branch whose messages reference any of `tickets`.
///
/// History is walked from HEAD newest first and the matches are returned
/// oldest first. An empty result is not an error here; callers decide what
/// to do with it.
pub fn find_ticket_commits<R: Repository>(repo: &R, tickets: &TicketSet) -> Result<Vec<CommitInfo>> {
    let pattern = tickets.pattern()?;
    let history = repo.head_history()?;
    let scanned = history.len();

    let mut commits: Vec<CommitInfo> = history
        .into_iter()
        .filter(|commit| pattern.is_match(&commit.message))
        .collect();

    // Reverse to get chronological order (oldest first)
    commits.reverse();

    debug!(scanned, matched = commits.len(), tickets = %tickets, "scanned history");
    Ok(commits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;
    use git2::Oid;

    fn oid(n: u8) -> Oid {
        Oid::from_bytes(&[n; 20]).unwrap()
    }

    fn linear_history(messages: &[&str]) -> MockRepository {
        let mut repo = MockRepository::new();
        for (i, message) in messages.iter().enumerate() {
            let n = i as u8 + 1;
            let parents = if n == 1 { vec![] } else { vec![oid(n - 1)] };
            repo.add_commit(CommitInfo {
                id: oid(n),
                message: message.to_string(),
                author: "Test Author".to_string(),
                parents,
            });
        }
        repo
    }

    fn ids(commits: &[CommitInfo]) -> Vec<Oid> {
        commits.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_matches_are_oldest_first() {
        let repo = linear_history(&["A", "#5 fix bug", "unrelated", "#5 followup"]);
        let tickets = TicketSet::new(vec![5]).unwrap();

        let commits = find_ticket_commits(&repo, &tickets).unwrap();
        assert_eq!(ids(&commits), vec![oid(2), oid(4)]);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let repo = linear_history(&["A", "#5 fix bug"]);
        let tickets = TicketSet::new(vec![7]).unwrap();

        assert!(find_ticket_commits(&repo, &tickets).unwrap().is_empty());
    }

    #[test]
    fn test_several_tickets_interleaved() {
        let repo = linear_history(&["A", "#5 one", "#9 two", "misc", "#5 three", "#9 four"]);
        let tickets = TicketSet::new(vec![9, 5]).unwrap();

        let commits = find_ticket_commits(&repo, &tickets).unwrap();
        assert_eq!(ids(&commits), vec![oid(2), oid(3), oid(5), oid(6)]);
    }

    #[test]
    fn test_prefix_ticket_matches_longer_reference() {
        let repo = linear_history(&["A", "refs #123", "refs #2"]);
        let tickets = TicketSet::new(vec![1]).unwrap();

        let commits = find_ticket_commits(&repo, &tickets).unwrap();
        assert_eq!(ids(&commits), vec![oid(2)]);
    }

    #[test]
    fn test_reference_in_message_body() {
        let repo = linear_history(&["A", "Fix crash\n\nCloses #42"]);
        let tickets = TicketSet::new(vec![42]).unwrap();

        assert_eq!(find_ticket_commits(&repo, &tickets).unwrap().len(), 1);
    }

    #[test]
    fn test_finder_is_read_only() {
        let repo = linear_history(&["A", "#5 fix"]);
        let tickets = TicketSet::new(vec![5]).unwrap();

        find_ticket_commits(&repo, &tickets).unwrap();
        assert_eq!(repo.calls(), vec!["head_history".to_string()]);
    }
}
