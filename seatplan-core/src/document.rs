//! The persistence document.
//!
//! A plan is saved as a single JSON object with three top-level
//! fields — `config`, `students`, `placements` — matching the file
//! format the planner has always written:
//!
//! ```json
//! {
//!   "config": { "rows": 5, "cols": 6, "clusterSize": 2 },
//!   "students": [ { "id": "s0001", "name": "Ada", "tier": 1, "gender": "F" } ],
//!   "placements": { "0-0": "s0001" }
//! }
//! ```
//!
//! Any of the three fields may be missing on load; the corresponding
//! engine state is left as it was. A document that does not parse is
//! rejected whole — [`Planner::apply_document`] only runs after the
//! entire document deserialized, so a failed load never touches state.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grid::{GridConfig, Seat};
use crate::planner::Planner;
use crate::roster::Roster;
use crate::student::{Student, StudentId};

/// Error loading a plan document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("invalid plan document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}

/// Serialized form of a plan. Field order in the output matches the
/// declaration order here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<GridConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub students: Option<Vec<Student>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placements: Option<IndexMap<Seat, StudentId>>,
}

impl PlanDocument {
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let doc = serde_json::from_str(json)?;
        Ok(doc)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(json)
    }
}

impl Planner {
    /// Snapshots the full engine state as a document.
    pub fn export_document(&self) -> PlanDocument {
        PlanDocument {
            config: Some(*self.grid()),
            students: Some(self.roster().iter().cloned().collect()),
            placements: Some(
                self.chart()
                    .iter()
                    .map(|(seat, id)| (seat, id.clone()))
                    .collect(),
            ),
        }
    }

    /// Applies a loaded document: config first, then students, then
    /// placements — each only if present. Afterwards the chart is
    /// re-validated against the new grid and roster, so a hand-edited
    /// document cannot leave an out-of-bounds or dangling placement,
    /// and duplicate ids across seats collapse to the last one.
    pub fn apply_document(&mut self, doc: PlanDocument) {
        if let Some(config) = doc.config {
            self.set_grid(config);
        }
        if let Some(students) = doc.students {
            debug!("document replaces roster with {} students", students.len());
            self.replace_roster(Roster::from_students(students));
        }
        if let Some(placements) = doc.placements {
            self.clear_board();
            for (seat, id) in placements {
                self.seat_from_document(seat, id);
            }
        }
        self.revalidate_chart();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::Tier;

    fn sample_planner() -> Planner {
        let mut planner = Planner::new();
        planner.set_grid(GridConfig::new(2, 3, 2));
        planner.add_students("Ada\nGrace", Tier::new(2), None);
        let ids: Vec<StudentId> = planner.roster().iter().map(|s| s.id.clone()).collect();
        planner.pick(&ids[0], crate::drag::Spot::Roster);
        planner.drop_on(crate::drag::Spot::Seat(Seat::new(1, 2)));
        planner
    }

    #[test]
    fn roundtrip_reproduces_state() {
        let planner = sample_planner();
        let json = planner.export_document().to_json().unwrap();

        let mut restored = Planner::new();
        restored.apply_document(PlanDocument::from_json(&json).unwrap());

        assert_eq!(restored.grid(), planner.grid());
        let restored_students: Vec<&Student> = restored.roster().iter().collect();
        let original_students: Vec<&Student> = planner.roster().iter().collect();
        assert_eq!(restored_students, original_students);
        assert_eq!(restored.chart(), planner.chart());
    }

    #[test]
    fn missing_fields_leave_state_alone() {
        let mut planner = sample_planner();
        let grid_before = *planner.grid();
        let roster_before = planner.roster().clone();

        planner.apply_document(PlanDocument::from_json("{}").unwrap());

        assert_eq!(planner.grid(), &grid_before);
        assert_eq!(planner.roster(), &roster_before);
        assert_eq!(planner.chart().len(), 1);
    }

    #[test]
    fn config_only_document_prunes() {
        let mut planner = sample_planner();
        planner.apply_document(
            PlanDocument::from_json(r#"{"config": {"rows": 1, "cols": 1, "clusterSize": 1}}"#)
                .unwrap(),
        );
        // The seat at (1,2) fell out of the 1x1 grid.
        assert!(planner.chart().is_empty());
        assert_eq!(planner.roster().len(), 2);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            PlanDocument::from_json("not json"),
            Err(DocumentError::InvalidDocument(_))
        ));
        assert!(matches!(
            PlanDocument::from_json(r#"{"placements": {"zero-zero": "x"}}"#),
            Err(DocumentError::InvalidDocument(_))
        ));
        assert!(matches!(
            PlanDocument::from_json(r#"{"students": 7}"#),
            Err(DocumentError::InvalidDocument(_))
        ));
    }

    #[test]
    fn dangling_placement_is_dropped() {
        let mut planner = Planner::new();
        planner.apply_document(
            PlanDocument::from_json(
                r#"{
                    "students": [{"id": "a", "name": "Ada", "tier": 1, "gender": null}],
                    "placements": {"0-0": "a", "0-1": "ghost"}
                }"#,
            )
            .unwrap(),
        );

        assert_eq!(planner.chart().len(), 1);
        assert_eq!(
            planner.chart().student_at(Seat::new(0, 0)),
            Some(&StudentId::new("a"))
        );
    }

    #[test]
    fn duplicate_id_across_seats_collapses() {
        let mut planner = Planner::new();
        planner.apply_document(
            PlanDocument::from_json(
                r#"{
                    "students": [{"id": "a", "name": "Ada", "tier": 1, "gender": null}],
                    "placements": {"0-0": "a", "2-2": "a"}
                }"#,
            )
            .unwrap(),
        );

        assert_eq!(planner.chart().len(), 1);
        assert_eq!(planner.chart().seat_of(&StudentId::new("a")), Some(Seat::new(2, 2)));
    }

    #[test]
    fn export_shape_matches_original_file() {
        let planner = sample_planner();
        let value = serde_json::to_value(planner.export_document()).unwrap();

        assert!(value.get("config").unwrap().get("clusterSize").is_some());
        assert!(value.get("students").unwrap().is_array());
        let placements = value.get("placements").unwrap().as_object().unwrap();
        assert!(placements.contains_key("1-2"));
    }
}
