//! Clean Use Case
//!
//! Turns a retention configuration into keep/destroy decisions and
//! carries them out:
//! - Listing the snapshots of every planned dataset
//! - Marking the ones the plan (and any holds) keep
//! - Destroying the rest, or only reporting them on a dry run

mod options;
mod result;
mod use_case;

pub use options::CleanOptions;
pub use result::{format_age, CleanReport, DatasetSnapshots, Todo, TodoAction};
pub use use_case::CleanUseCase;
