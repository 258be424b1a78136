use indexmap::IndexMap;
use tracing::debug;

use crate::student::{Gender, Student, StudentId, Tier};

/// Sort criterion for the unseated part of the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Tier,
}

/// The canonical, insertion-ordered list of students.
///
/// The roster knows nothing about placements; cross-cutting cleanup
/// (removing a deleted student's seat) belongs to [`crate::Planner`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roster {
    students: IndexMap<StudentId, Student>,
    next_id: u64,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a roster from an explicit student list, keeping its
    /// order. Later duplicates of an id replace earlier ones.
    pub fn from_students(students: impl IntoIterator<Item = Student>) -> Self {
        let mut roster = Roster::new();
        for student in students {
            roster.insert(student);
        }
        roster
    }

    /// Adds one student per non-blank trimmed line of `text`, in input
    /// order, all with the given tier and gender. Blank lines are
    /// silently skipped. Returns the ids created.
    pub fn add_names(&mut self, text: &str, tier: Tier, gender: Option<Gender>) -> Vec<StudentId> {
        let mut created = Vec::new();
        for line in text.lines() {
            let name = line.trim();
            if name.is_empty() {
                continue;
            }
            let id = self.allocate_id();
            self.students.insert(
                id.clone(),
                Student {
                    id: id.clone(),
                    name: name.to_string(),
                    tier,
                    gender,
                },
            );
            created.push(id);
        }
        debug!("imported {} students at {}", created.len(), tier);
        created
    }

    /// Inserts a fully-formed student (document import). Replaces any
    /// existing student with the same id in place.
    pub fn insert(&mut self, student: Student) {
        self.students.insert(student.id.clone(), student);
    }

    /// Removes a student. Returns whether anything was removed.
    pub fn remove(&mut self, id: &StudentId) -> bool {
        self.students.shift_remove(id).is_some()
    }

    pub fn set_name(&mut self, id: &StudentId, name: impl Into<String>) {
        if let Some(student) = self.students.get_mut(id) {
            student.name = name.into();
        }
    }

    pub fn set_tier(&mut self, id: &StudentId, tier: Tier) {
        if let Some(student) = self.students.get_mut(id) {
            student.tier = tier;
        }
    }

    pub fn set_gender(&mut self, id: &StudentId, gender: Option<Gender>) {
        if let Some(student) = self.students.get_mut(id) {
            student.gender = gender;
        }
    }

    /// Advances the student's gender marker one step through the M, F,
    /// unset cycle. Unknown ids are a no-op, as with every setter here.
    pub fn cycle_gender(&mut self, id: &StudentId) {
        if let Some(student) = self.students.get_mut(id) {
            student.gender = Gender::cycle(student.gender);
        }
    }

    /// Stable reorder: seated students keep their relative order and
    /// move to the front; the unseated block is sorted by `key` and
    /// follows. Name order is case-insensitive.
    pub fn sort_unseated<F>(&mut self, key: SortKey, is_seated: F)
    where
        F: Fn(&StudentId) -> bool,
    {
        let mut seated = Vec::new();
        let mut unseated = Vec::new();
        for (_, student) in std::mem::take(&mut self.students) {
            if is_seated(&student.id) {
                seated.push(student);
            } else {
                unseated.push(student);
            }
        }
        match key {
            SortKey::Name => {
                unseated.sort_by_key(|s| s.name.to_lowercase());
            }
            SortKey::Tier => {
                unseated.sort_by_key(|s| s.tier);
            }
        }
        self.students = seated
            .into_iter()
            .chain(unseated)
            .map(|s| (s.id.clone(), s))
            .collect();
    }

    pub fn get(&self, id: &StudentId) -> Option<&Student> {
        self.students.get(id)
    }

    pub fn contains(&self, id: &StudentId) -> bool {
        self.students.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn clear(&mut self) {
        self.students.clear();
    }

    /// Next free counter-based id. Imported documents can carry
    /// arbitrary id strings, so taken ids are skipped.
    fn allocate_id(&mut self) -> StudentId {
        loop {
            self.next_id += 1;
            let id = StudentId::new(format!("s{:04}", self.next_id));
            if !self.students.contains_key(&id) {
                return id;
            }
        }
    }
}
