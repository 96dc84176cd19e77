pub mod builder;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod finder;
pub mod git;
pub mod ui;
pub mod warnings;

pub use error::{ReviewBranchError, Result};
