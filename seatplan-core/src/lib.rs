//! Seatplan assigns a roster of students to seats on a classroom grid.
//!
//! Core concepts:
//! - **Student**: one roster entry — id, name, tier (1..=6), optional gender marker
//! - **Roster**: the canonical, insertion-ordered student registry
//! - **Seat / GridConfig**: a (row, col) coordinate and the grid geometry, including
//!   the cluster decomposition used by composition fill
//! - **SeatingChart**: the partial, injective seat-to-student assignment
//! - **Fill strategies**: pure functions deriving a fresh chart — directional,
//!   tier-sorted, and quota-constrained composition fill
//! - **DragState**: the pick/drop/cancel move protocol that keeps the chart
//!   consistent under manual edits
//! - **Planner**: the facade owning all of the above plus the reset-confirmation
//!   debounce and the persistence document
//!
//! # Example
//!
//! ```
//! use seatplan_core::{Axis, Direction, GridConfig, Planner, Tier};
//!
//! let mut planner = Planner::new();
//! planner.set_grid(GridConfig::new(3, 4, 2));
//! planner.add_students("Ada\nGrace\nAlan", Tier::new(1), None);
//!
//! planner.apply_directional(Axis::Rows, Direction::Forward);
//! assert_eq!(planner.chart().len(), 3);
//! assert!(planner.unseated().is_empty());
//! ```
//!
//! The engine is single-threaded and event-driven: every operation runs
//! to completion, and nothing here blocks or spawns. Invalid interactive
//! input (unknown ids, out-of-range tiers) is absorbed silently; only a
//! malformed persistence document surfaces an error.

mod chart;
mod document;
mod drag;
mod fill;
mod grid;
mod planner;
mod roster;
mod student;

pub use chart::SeatingChart;
pub use document::{DocumentError, PlanDocument};
pub use drag::{DragState, DropEffect, Spot};
pub use fill::{
    fill_composition, fill_directional, fill_tier_sorted, Axis, Direction, Quotas, SortOrder,
    TierQuota,
};
pub use grid::{GridConfig, Seat, SeatParseError};
pub use planner::{Planner, ResetOutcome, CONFIRM_WINDOW};
pub use roster::{Roster, SortKey};
pub use student::{Gender, Student, StudentId, Tier};
