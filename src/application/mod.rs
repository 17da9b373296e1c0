//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain retention rules (those are in Domain)
//! - Writes user-facing output to a caller-supplied writer
//!
//! ## Use Cases
//!
//! - `CleanUseCase` - Evaluate plans, then keep or destroy every snapshot
//! - `PlanCheckUseCase` - Report filesystems no plan covers

pub mod clean;
pub mod plancheck;

pub use clean::{CleanOptions, CleanReport, CleanUseCase, DatasetSnapshots, Todo, TodoAction};
pub use plancheck::{no_plan_message, PlanCheckUseCase};
