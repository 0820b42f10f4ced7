//! Command-line surface: arguments and workflow orchestration

pub mod args;
pub mod orchestration;

pub use args::Args;
pub use orchestration::{Resolution, Workflow};
