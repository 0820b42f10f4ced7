//! Candidate matching, selection and the fallback policy

pub mod fallback;
pub mod matcher;
pub mod selector;

pub use matcher::{collect_candidates, Candidates};
pub use selector::select_highest;
