use std::collections::HashSet;
use std::fmt;

use regex::Regex;

use crate::error::{ReviewBranchError, Result};

/// The ticket numbers a review is built for, in the order they were given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketSet {
    tickets: Vec<u64>,
}

impl TicketSet {
    /// Create a ticket set; at least one ticket is required.
    pub fn new(tickets: Vec<u64>) -> Result<Self> {
        if tickets.is_empty() {
            return Err(ReviewBranchError::NoTickets);
        }
        Ok(TicketSet { tickets })
    }

    /// Ticket numbers joined by `separator`, in input order.
    pub fn joined(&self, separator: &str) -> String {
        self.tickets
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Regex matching `#` followed by any of the ticket numbers.
    ///
    /// This is a substring match: ticket 12 also matches `#123`.
    pub fn pattern(&self) -> Result<Regex> {
        Ok(Regex::new(&format!("#(?:{})", self.joined("|")))?)
    }

    /// Tickets that occur more than once, each reported once.
    pub fn duplicates(&self) -> Vec<u64> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        self.tickets
            .iter()
            .copied()
            .filter(|t| !seen.insert(*t) && reported.insert(*t))
            .collect()
    }

    /// Tickets for which no message in `messages` carries a `#<ticket>` reference.
    pub fn unmatched<'a, I>(&self, messages: I) -> Vec<u64>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let messages: Vec<&str> = messages.into_iter().collect();
        let mut unmatched = Vec::new();
        for ticket in &self.tickets {
            let needle = format!("#{}", ticket);
            if !messages.iter().any(|m| m.contains(&needle)) && !unmatched.contains(ticket) {
                unmatched.push(*ticket);
            }
        }
        unmatched
    }
}

impl fmt::Display for TicketSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.joined(" "))
    }
}
