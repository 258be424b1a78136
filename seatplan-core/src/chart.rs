use indexmap::IndexMap;
use std::collections::HashMap;

use crate::grid::{GridConfig, Seat};
use crate::roster::Roster;
use crate::student::StudentId;

/// The seat assignment: a partial, injective mapping from seat to
/// student.
///
/// Two structures are kept in lockstep: the seat-to-student map (in
/// insertion order, which is what the persistence document shows) and a
/// student-to-seat index for O(1) reverse lookup. Every placement goes
/// through [`SeatingChart::seat_student`], which vacates the student's
/// previous seat before inserting, so no student can ever occupy two
/// seats.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeatingChart {
    seats: IndexMap<Seat, StudentId>,
    by_student: HashMap<StudentId, Seat>,
}

impl SeatingChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `id` at `seat`.
    ///
    /// The student's previous seat, if any, is vacated first. Returns
    /// the student previously at `seat`, who is left unseated — callers
    /// that want swap semantics re-seat the returned occupant.
    pub fn seat_student(&mut self, seat: Seat, id: StudentId) -> Option<StudentId> {
        if self.by_student.get(&id) == Some(&seat) {
            return None;
        }
        if let Some(old_seat) = self.by_student.remove(&id) {
            self.seats.shift_remove(&old_seat);
        }
        let displaced = self.seats.insert(seat, id.clone());
        if let Some(ref occupant) = displaced {
            self.by_student.remove(occupant);
        }
        self.by_student.insert(id, seat);
        displaced
    }

    /// Empties one seat, returning the student who sat there.
    pub fn unseat(&mut self, seat: Seat) -> Option<StudentId> {
        let id = self.seats.shift_remove(&seat)?;
        self.by_student.remove(&id);
        Some(id)
    }

    /// Removes a student's placement, returning the seat they held.
    pub fn unseat_student(&mut self, id: &StudentId) -> Option<Seat> {
        let seat = self.by_student.remove(id)?;
        self.seats.shift_remove(&seat);
        Some(seat)
    }

    pub fn student_at(&self, seat: Seat) -> Option<&StudentId> {
        self.seats.get(&seat)
    }

    pub fn seat_of(&self, id: &StudentId) -> Option<Seat> {
        self.by_student.get(id).copied()
    }

    pub fn is_seated(&self, id: &StudentId) -> bool {
        self.by_student.contains_key(id)
    }

    /// Drops every entry whose seat falls outside the grid. Required
    /// after any resize that shrinks capacity.
    pub fn prune(&mut self, grid: &GridConfig) {
        let stale: Vec<Seat> = self
            .seats
            .keys()
            .filter(|seat| !grid.contains(**seat))
            .copied()
            .collect();
        for seat in stale {
            self.unseat(seat);
        }
    }

    /// Drops every entry whose student is no longer on the roster.
    pub fn retain_known(&mut self, roster: &Roster) {
        let stale: Vec<Seat> = self
            .seats
            .iter()
            .filter(|(_, id)| !roster.contains(id))
            .map(|(seat, _)| *seat)
            .collect();
        for seat in stale {
            self.unseat(seat);
        }
    }

    pub fn clear(&mut self) {
        self.seats.clear();
        self.by_student.clear();
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Seat, &StudentId)> {
        self.seats.iter().map(|(seat, id)| (*seat, id))
    }
}
