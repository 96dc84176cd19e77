//! Domain logic - pure rules for tickets and review branches, independent of git operations

pub mod branch;
pub mod ticket;

pub use branch::{plan_review_branch, review_branch_name, ReviewBranch};
pub use ticket::TicketSet;
