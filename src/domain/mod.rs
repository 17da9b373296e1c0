//! Domain Layer
//!
//! Retention logic without I/O.
//!
//! ## Structure
//!
//! - `entities/` - Snapshots and ordered snapshot lists
//! - `services/` - Applying a retention plan to a snapshot list
//! - `ports/` - Interface to the `zfs` tool
//!
//! Everything that touches ZFS goes through [`ports::ZfsExecutor`].

pub mod entities;
pub mod ports;
pub mod services;
