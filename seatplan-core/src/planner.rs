use std::time::{Duration, Instant};

use tracing::debug;

use crate::chart::SeatingChart;
use crate::drag::{DragState, DropEffect, Spot};
use crate::fill::{self, Axis, Direction, Quotas, SortOrder};
use crate::grid::{GridConfig, Seat};
use crate::roster::{Roster, SortKey};
use crate::student::{Gender, Student, StudentId, Tier};

/// How long a reset-all confirmation stays armed.
pub const CONFIRM_WINDOW: Duration = Duration::from_secs(3);

/// Result of a [`Planner::reset_all`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetOutcome {
    /// First call: nothing cleared, confirmation armed.
    Armed,
    /// Second call inside the window: roster and chart cleared.
    Cleared,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum ResetConfirm {
    #[default]
    Unarmed,
    Armed {
        deadline: Instant,
    },
}

/// The engine facade: owns the roster, the grid, the chart and the
/// drag gesture, and enforces the invariants that cut across them —
/// a deleted student loses their seat, a shrunken grid prunes its
/// placements, a fill replaces the chart wholesale.
#[derive(Clone, Debug, Default)]
pub struct Planner {
    roster: Roster,
    grid: GridConfig,
    chart: SeatingChart,
    drag: DragState,
    reset: ResetConfirm,
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn chart(&self) -> &SeatingChart {
        &self.chart
    }

    /// Students not currently on the chart, in roster order.
    pub fn unseated(&self) -> Vec<&Student> {
        self.roster
            .iter()
            .filter(|s| !self.chart.is_seated(&s.id))
            .collect()
    }

    // --- roster operations ---

    pub fn add_students(
        &mut self,
        text: &str,
        tier: Tier,
        gender: Option<Gender>,
    ) -> Vec<StudentId> {
        self.roster.add_names(text, tier, gender)
    }

    pub fn set_name(&mut self, id: &StudentId, name: impl Into<String>) {
        self.roster.set_name(id, name);
    }

    pub fn set_tier(&mut self, id: &StudentId, tier: Tier) {
        self.roster.set_tier(id, tier);
    }

    pub fn set_gender(&mut self, id: &StudentId, gender: Option<Gender>) {
        self.roster.set_gender(id, gender);
    }

    pub fn cycle_gender(&mut self, id: &StudentId) {
        self.roster.cycle_gender(id);
    }

    pub fn sort_roster(&mut self, key: SortKey) {
        let chart = &self.chart;
        self.roster.sort_unseated(key, |id| chart.is_seated(id));
    }

    /// Removes the student from the roster and, if seated, from the
    /// chart — one operation from the caller's point of view.
    pub fn delete_student(&mut self, id: &StudentId) -> bool {
        self.chart.unseat_student(id);
        self.roster.remove(id)
    }

    // --- grid ---

    /// Replaces the grid geometry and prunes placements that fell out
    /// of bounds.
    pub fn set_grid(&mut self, grid: GridConfig) {
        self.grid = grid;
        self.chart.prune(&self.grid);
    }

    // --- fills ---

    pub fn apply_directional(&mut self, axis: Axis, direction: Direction) {
        self.chart = fill::fill_directional(&self.roster, &self.grid, &self.chart, axis, direction);
    }

    pub fn apply_tier_sorted(&mut self, order: SortOrder) {
        self.chart = fill::fill_tier_sorted(&self.roster, &self.grid, order);
    }

    pub fn apply_composition(&mut self, quotas: &Quotas) {
        self.chart = fill::fill_composition(&self.roster, &self.grid, quotas);
    }

    // --- drag gesture ---

    /// Starts a drag. Unknown students are ignored (the gesture stays
    /// idle).
    pub fn pick(&mut self, id: &StudentId, origin: Spot) {
        if self.roster.contains(id) {
            self.drag.pick(id.clone(), origin);
        }
    }

    pub fn drop_on(&mut self, target: Spot) -> DropEffect {
        self.drag.drop_on(&mut self.chart, target)
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    // --- board & reset lifecycle ---

    /// Empties the chart; the roster is untouched.
    pub fn clear_board(&mut self) {
        self.chart.clear();
    }

    /// Two-step destructive reset. The first call arms a confirmation
    /// that expires after [`CONFIRM_WINDOW`]; a second call inside the
    /// window clears the roster and the chart. A call after the window
    /// has lapsed behaves as a fresh first call.
    pub fn reset_all(&mut self) -> ResetOutcome {
        self.reset_all_at(Instant::now())
    }

    /// [`Planner::reset_all`] with the clock supplied by the caller.
    pub fn reset_all_at(&mut self, now: Instant) -> ResetOutcome {
        match self.reset {
            ResetConfirm::Armed { deadline } if now < deadline => {
                self.roster.clear();
                self.chart.clear();
                self.reset = ResetConfirm::Unarmed;
                debug!("reset-all confirmed; roster and chart cleared");
                ResetOutcome::Cleared
            }
            _ => {
                self.reset = ResetConfirm::Armed {
                    deadline: now + CONFIRM_WINDOW,
                };
                ResetOutcome::Armed
            }
        }
    }

    /// Whether a reset confirmation is still pending at `now`.
    pub fn reset_armed_at(&self, now: Instant) -> bool {
        matches!(self.reset, ResetConfirm::Armed { deadline } if now < deadline)
    }

    // --- document support (see crate::document) ---

    pub(crate) fn replace_roster(&mut self, roster: Roster) {
        self.roster = roster;
    }

    pub(crate) fn seat_from_document(&mut self, seat: Seat, id: StudentId) {
        self.chart.seat_student(seat, id);
    }

    /// Drops placements that are out of bounds or reference students
    /// no longer on the roster.
    pub(crate) fn revalidate_chart(&mut self) {
        self.chart.prune(&self.grid);
        self.chart.retain_known(&self.roster);
    }
}
