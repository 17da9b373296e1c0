//! Domain Ports (Interfaces)
//!
//! Infrastructure provides the concrete implementations.

pub mod zfs_executor;

pub use zfs_executor::{ZfsError, ZfsExecutor, ZfsResult};
