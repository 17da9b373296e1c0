//! Domain Entities
//!
//! - `Snapshot` - One snapshot and its keep mark
//! - `SnapshotList` - Snapshots of a dataset, oldest first

mod snapshot;
mod snapshot_list;

pub use snapshot::{Snapshot, SnapshotError, SNAPSHOT_SEPARATOR};
pub use snapshot_list::SnapshotList;
