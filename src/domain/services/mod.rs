//! Domain Services
//!
//! Pure retention logic operating on snapshot lists.

mod planner;

pub use planner::apply_plan;
