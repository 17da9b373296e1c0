//! Infrastructure Layer
//!
//! Concrete implementations of domain ports and everything else that
//! touches the operating system.
//!
//! - `zfs` - Process-backed [`ZfsExecutor`](crate::domain::ports::ZfsExecutor)
//! - `lock` - Advisory run lock on the configuration file

pub mod lock;
pub mod zfs;

pub use lock::ConfigLock;
pub use zfs::CommandZfsExecutor;
