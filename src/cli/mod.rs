//! Workflow driven by the command line

pub mod orchestration;

pub use orchestration::{run_review_workflow, ReviewWorkflowArgs, WorkflowResult};
