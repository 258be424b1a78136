//! The interactive move protocol.
//!
//! A drag gesture is an explicit state machine — `Idle`, then `Picked`
//! once a student is grabbed, then back to `Idle` on drop or cancel —
//! rather than ambient "currently dragged" state. Only `drop_on`
//! mutates the chart, and it does so through
//! [`SeatingChart::seat_student`], so the injectivity invariant holds
//! at every observable point.

use crate::chart::SeatingChart;
use crate::grid::Seat;
use crate::student::StudentId;

/// Where a student can be grabbed from or dropped onto: a seat, or the
/// unseated roster list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spot {
    Seat(Seat),
    Roster,
}

/// What a drop did to the chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropEffect {
    /// Nothing changed (no pick in flight, or dropped on own seat).
    NoOp,
    /// Moved to an empty seat.
    Moved(Seat),
    /// Returned to the roster; the student is now unseated.
    Unseated,
    /// Exchanged seats with the occupant of the target seat.
    Swapped { with: StudentId },
    /// Took the target seat; the occupant had nowhere to go back to
    /// and is now unseated.
    Evicted { evicted: StudentId },
}

/// Drag gesture state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Picked {
        student: StudentId,
        origin: Spot,
    },
}

impl DragState {
    pub fn new() -> Self {
        DragState::Idle
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }

    /// Grabs a student. Records the origin, mutates nothing. A pick
    /// while another is in flight replaces it.
    pub fn pick(&mut self, student: StudentId, origin: Spot) {
        *self = DragState::Picked { student, origin };
    }

    /// Aborts the gesture without touching the chart.
    pub fn cancel(&mut self) {
        *self = DragState::Idle;
    }

    /// Completes the gesture, applying the move to `chart`, and
    /// returns to `Idle`.
    ///
    /// Dropping on the roster unseats the student. Dropping on an
    /// empty seat moves them. Dropping on an occupied seat swaps with
    /// the occupant when the student came from a seat, and evicts the
    /// occupant to the roster when the student came from the roster.
    /// Dropping on the student's own seat is a no-op.
    pub fn drop_on(&mut self, chart: &mut SeatingChart, target: Spot) -> DropEffect {
        let student = match std::mem::take(self) {
            DragState::Picked { student, .. } => student,
            DragState::Idle => return DropEffect::NoOp,
        };

        match target {
            Spot::Roster => {
                if chart.unseat_student(&student).is_some() {
                    DropEffect::Unseated
                } else {
                    DropEffect::NoOp
                }
            }
            Spot::Seat(seat) => {
                if chart.seat_of(&student) == Some(seat) {
                    return DropEffect::NoOp;
                }
                // The chart's reverse index is the source of truth for
                // where the student was; the recorded origin only says
                // whether the gesture started on the board at all.
                let origin_seat = chart.seat_of(&student);
                match chart.seat_student(seat, student) {
                    None => DropEffect::Moved(seat),
                    Some(occupant) => match origin_seat {
                        Some(back) => {
                            chart.seat_student(back, occupant.clone());
                            DropEffect::Swapped { with: occupant }
                        }
                        None => DropEffect::Evicted { evicted: occupant },
                    },
                }
            }
        }
    }
}
