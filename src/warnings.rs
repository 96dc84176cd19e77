use std::fmt;

use git2::Oid;

/// Non-fatal issues found while building a review branch.
/// These are reported to the user but never stop the run.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewWarning {
    /// Some tickets matched no commit while others did
    UnmatchedTickets { tickets: Vec<u64> },
    /// A ticket number was given more than once
    DuplicateTickets { tickets: Vec<u64> },
    /// A commit was replayed with its conflicts committed unresolved
    ConflictCommitted { source: Oid, replayed: Oid },
}

fn join_tickets(tickets: &[u64]) -> String {
    tickets
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn short(oid: &Oid) -> String {
    let hash = oid.to_string();
    hash[..7.min(hash.len())].to_string()
}

impl fmt::Display for ReviewWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewWarning::UnmatchedTickets { tickets } => {
                write!(f, "No commits reference ticket(s) {}", join_tickets(tickets))
            }
            ReviewWarning::DuplicateTickets { tickets } => {
                write!(f, "Ticket(s) given more than once: {}", join_tickets(tickets))
            }
            ReviewWarning::ConflictCommitted { source, replayed } => {
                write!(
                    f,
                    "Commit {} conflicted and was committed with conflict markers as {}",
                    short(source),
                    short(replayed)
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_display() {
        let warning = ReviewWarning::UnmatchedTickets { tickets: vec![7, 8] };
        assert_eq!(warning.to_string(), "No commits reference ticket(s) 7 8");
    }

    #[test]
    fn test_conflict_display_uses_short_hashes() {
        let source = Oid::from_str("abc1234def5678abc1234def5678abc1234def56").unwrap();
        let replayed = Oid::from_str("0011223344556677889900112233445566778899").unwrap();
        let msg = ReviewWarning::ConflictCommitted { source, replayed }.to_string();
        assert!(msg.contains("abc1234 "), "got: {}", msg);
        assert!(msg.ends_with("0011223"), "got: {}", msg);
        assert!(!msg.contains("abc1234d"));
    }
}
