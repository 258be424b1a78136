//! Automatic fill strategies.
//!
//! Every strategy is a pure function from the roster, the grid and its
//! parameters to a brand-new [`SeatingChart`]; the current chart is
//! only consulted to put already-seated students at the front of the
//! candidate order. Degenerate grids and empty rosters yield an empty
//! chart.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chart::SeatingChart;
use crate::grid::{GridConfig, Seat};
use crate::roster::Roster;
use crate::student::{StudentId, Tier};

/// Primary axis of a directional fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Cols,
}

/// Direction along the primary axis. For rows, `Forward` is
/// front-to-back (row 0 is the front); for columns, left-to-right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Tier order for the sorted fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Fills seats by scanning the primary axis in the chosen direction,
/// the secondary axis always ascending.
///
/// Candidates are currently-seated students first (in roster order),
/// then unseated students (in roster order); assignment stops when
/// either seats or candidates run out.
pub fn fill_directional(
    roster: &Roster,
    grid: &GridConfig,
    chart: &SeatingChart,
    axis: Axis,
    direction: Direction,
) -> SeatingChart {
    debug!(
        "directional fill: axis={:?} direction={:?} grid={}x{}",
        axis, direction, grid.rows, grid.cols
    );
    let order = directional_order(grid, axis, direction);
    assign(candidates(roster, chart), order)
}

/// Fills seats in natural row-major order with the whole roster sorted
/// by tier. The sort is stable: equal tiers keep their roster order.
/// Always re-derives the chart from scratch.
pub fn fill_tier_sorted(roster: &Roster, grid: &GridConfig, order: SortOrder) -> SeatingChart {
    debug!("tier-sorted fill: order={:?}", order);
    let mut students: Vec<&StudentId> = Vec::new();
    let mut by_tier: Vec<(Tier, &StudentId)> = roster.iter().map(|s| (s.tier, &s.id)).collect();
    match order {
        SortOrder::Ascending => by_tier.sort_by_key(|(tier, _)| *tier),
        SortOrder::Descending => by_tier.sort_by(|(a, _), (b, _)| b.cmp(a)),
    }
    students.extend(by_tier.into_iter().map(|(_, id)| id));
    assign(students, grid.seats().collect())
}

/// Per-tier seat quota within one cluster.
///
/// A `max` of 0 (the "no constraint entered" state) is treated as
/// unbounded, which in practice is a cap of 99 — a quirk of the
/// reference behavior that callers can observe, preserved as is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierQuota {
    pub min: u32,
    pub max: u32,
}

const UNBOUNDED_MAX: u32 = 99;

impl Default for TierQuota {
    fn default() -> Self {
        TierQuota {
            min: 0,
            max: UNBOUNDED_MAX,
        }
    }
}

impl TierQuota {
    fn effective_max(self) -> u32 {
        if self.max == 0 {
            UNBOUNDED_MAX
        } else {
            self.max
        }
    }
}

/// Quota configuration for composition fill, one [`TierQuota`] per
/// tier. Defaults to `{ min: 0, max: unbounded }` everywhere.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotas {
    per_tier: [TierQuota; 6],
}

impl Quotas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tier: Tier) -> TierQuota {
        self.per_tier[tier.index()]
    }

    pub fn set(&mut self, tier: Tier, quota: TierQuota) {
        self.per_tier[tier.index()] = quota;
    }

    pub fn set_min(&mut self, tier: Tier, min: u32) {
        self.per_tier[tier.index()].min = min;
    }

    pub fn set_max(&mut self, tier: Tier, max: u32) {
        self.per_tier[tier.index()].max = max;
    }
}

/// Fills cluster by cluster under per-tier minimum and maximum quotas.
///
/// All students are bucketed by tier into six FIFO queues. The queues
/// are shared, depleting state across clusters: what an early cluster
/// takes is gone for later ones, so the row-major, left-to-right
/// cluster order is part of the contract.
///
/// Per cluster, the minimum pass takes up to `min` students of each
/// tier (ascending); the fill pass then repeatedly takes one student
/// from the lowest tier that still has stock and headroom under its
/// max. The moment no tier qualifies, the cluster is abandoned — its
/// remaining seats stay empty, maxima are never relaxed — and the next
/// cluster proceeds normally.
///
/// Minimums in excess of the cluster's capacity still drain the queues;
/// the surplus students are simply not assigned and end up unseated.
pub fn fill_composition(roster: &Roster, grid: &GridConfig, quotas: &Quotas) -> SeatingChart {
    let mut buckets: [VecDeque<&StudentId>; 6] = Default::default();
    for student in roster.iter() {
        buckets[student.tier.index()].push_back(&student.id);
    }

    let mut chart = SeatingChart::new();
    for cluster in grid.clusters() {
        let mut staged: Vec<&StudentId> = Vec::new();
        let mut counts = [0u32; 6];

        for tier in 0..6 {
            for _ in 0..quotas.per_tier[tier].min {
                match buckets[tier].pop_front() {
                    Some(id) => {
                        staged.push(id);
                        counts[tier] += 1;
                    }
                    None => break,
                }
            }
        }

        while staged.len() < cluster.len() {
            let mut took = false;
            for tier in 0..6 {
                if counts[tier] >= quotas.per_tier[tier].effective_max() {
                    continue;
                }
                if let Some(id) = buckets[tier].pop_front() {
                    staged.push(id);
                    counts[tier] += 1;
                    took = true;
                    break;
                }
            }
            if !took {
                break;
            }
        }

        for (seat, id) in cluster.iter().zip(staged) {
            chart.seat_student(*seat, id.clone());
        }
    }
    debug!("composition fill seated {} students", chart.len());
    chart
}

/// Seated students first (roster order), then unseated (roster order).
fn candidates<'a>(roster: &'a Roster, chart: &SeatingChart) -> Vec<&'a StudentId> {
    let mut seated = Vec::new();
    let mut unseated = Vec::new();
    for student in roster.iter() {
        if chart.is_seated(&student.id) {
            seated.push(&student.id);
        } else {
            unseated.push(&student.id);
        }
    }
    seated.extend(unseated);
    seated
}

fn directional_order(grid: &GridConfig, axis: Axis, direction: Direction) -> Vec<Seat> {
    let (primary_len, secondary_len) = match axis {
        Axis::Rows => (grid.rows, grid.cols),
        Axis::Cols => (grid.cols, grid.rows),
    };
    let mut primary: Vec<u16> = (0..primary_len).collect();
    if direction == Direction::Reverse {
        primary.reverse();
    }
    let mut order = Vec::with_capacity(grid.capacity());
    for p in primary {
        for s in 0..secondary_len {
            order.push(match axis {
                Axis::Rows => Seat::new(p, s),
                Axis::Cols => Seat::new(s, p),
            });
        }
    }
    order
}

fn assign(students: Vec<&StudentId>, seats: Vec<Seat>) -> SeatingChart {
    let mut chart = SeatingChart::new();
    for (seat, id) in seats.into_iter().zip(students) {
        chart.seat_student(seat, id.clone());
    }
    chart
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::{Student, StudentId};

    fn roster_of(count: usize, tier: u8) -> Roster {
        let mut roster = Roster::new();
        for i in 0..count {
            roster.insert(Student {
                id: StudentId::new(format!("t{}-{}", tier, i)),
                name: format!("Student {}", i),
                tier: Tier::new(tier),
                gender: None,
            });
        }
        roster
    }

    #[test]
    fn row_forward_is_row_major() {
        let roster = roster_of(12, 1);
        let grid = GridConfig::new(3, 4, 2);
        let chart = fill_directional(
            &roster,
            &grid,
            &SeatingChart::new(),
            Axis::Rows,
            Direction::Forward,
        );

        let first = roster.iter().next().unwrap();
        assert_eq!(chart.seat_of(&first.id), Some(Seat::new(0, 0)));
        let fourth = roster.iter().nth(3).unwrap();
        assert_eq!(chart.seat_of(&fourth.id), Some(Seat::new(0, 3)));
        let fifth = roster.iter().nth(4).unwrap();
        assert_eq!(chart.seat_of(&fifth.id), Some(Seat::new(1, 0)));
    }

    #[test]
    fn row_reverse_starts_at_back() {
        let roster = roster_of(12, 1);
        let grid = GridConfig::new(3, 4, 2);
        let chart = fill_directional(
            &roster,
            &grid,
            &SeatingChart::new(),
            Axis::Rows,
            Direction::Reverse,
        );

        let first = roster.iter().next().unwrap();
        assert_eq!(chart.seat_of(&first.id), Some(Seat::new(2, 0)));
    }

    #[test]
    fn column_fill_walks_columns() {
        let roster = roster_of(6, 1);
        let grid = GridConfig::new(3, 4, 2);
        let chart = fill_directional(
            &roster,
            &grid,
            &SeatingChart::new(),
            Axis::Cols,
            Direction::Forward,
        );

        let ids: Vec<&Student> = roster.iter().collect();
        assert_eq!(chart.seat_of(&ids[0].id), Some(Seat::new(0, 0)));
        assert_eq!(chart.seat_of(&ids[2].id), Some(Seat::new(2, 0)));
        assert_eq!(chart.seat_of(&ids[3].id), Some(Seat::new(0, 1)));
    }

    #[test]
    fn column_reverse_starts_rightmost() {
        let roster = roster_of(2, 1);
        let grid = GridConfig::new(3, 4, 2);
        let chart = fill_directional(
            &roster,
            &grid,
            &SeatingChart::new(),
            Axis::Cols,
            Direction::Reverse,
        );

        let first = roster.iter().next().unwrap();
        assert_eq!(chart.seat_of(&first.id), Some(Seat::new(0, 3)));
    }

    #[test]
    fn seated_students_lead_the_refill() {
        let mut roster = Roster::new();
        roster.add_names("A\nB\nC", Tier::new(1), None);
        let ids: Vec<StudentId> = roster.iter().map(|s| s.id.clone()).collect();

        // C is seated, A and B are not.
        let mut chart = SeatingChart::new();
        chart.seat_student(Seat::new(1, 1), ids[2].clone());

        let grid = GridConfig::new(2, 2, 2);
        let refilled = fill_directional(&roster, &grid, &chart, Axis::Rows, Direction::Forward);

        // Seated-first: C takes (0,0), then A, then B.
        assert_eq!(refilled.seat_of(&ids[2]), Some(Seat::new(0, 0)));
        assert_eq!(refilled.seat_of(&ids[0]), Some(Seat::new(0, 1)));
        assert_eq!(refilled.seat_of(&ids[1]), Some(Seat::new(1, 0)));
    }

    #[test]
    fn leftover_students_stay_unseated() {
        let roster = roster_of(5, 1);
        let grid = GridConfig::new(1, 3, 2);
        let chart = fill_directional(
            &roster,
            &grid,
            &SeatingChart::new(),
            Axis::Rows,
            Direction::Forward,
        );
        assert_eq!(chart.len(), 3);
    }

    #[test]
    fn degenerate_grid_yields_empty_chart() {
        let roster = roster_of(4, 1);
        let grid = GridConfig::new(0, 4, 2);
        assert!(
            fill_directional(&roster, &grid, &SeatingChart::new(), Axis::Rows, Direction::Forward)
                .is_empty()
        );
        assert!(fill_tier_sorted(&roster, &grid, SortOrder::Ascending).is_empty());
        assert!(fill_composition(&roster, &grid, &Quotas::new()).is_empty());
    }

    #[test]
    fn tier_sort_is_stable() {
        let mut roster = Roster::new();
        roster.add_names("First2", Tier::new(2), None);
        roster.add_names("Only1", Tier::new(1), None);
        roster.add_names("Second2", Tier::new(2), None);
        let ids: Vec<StudentId> = roster.iter().map(|s| s.id.clone()).collect();

        let grid = GridConfig::new(1, 3, 2);
        let asc = fill_tier_sorted(&roster, &grid, SortOrder::Ascending);
        assert_eq!(asc.seat_of(&ids[1]), Some(Seat::new(0, 0)));
        assert_eq!(asc.seat_of(&ids[0]), Some(Seat::new(0, 1)));
        assert_eq!(asc.seat_of(&ids[2]), Some(Seat::new(0, 2)));

        let desc = fill_tier_sorted(&roster, &grid, SortOrder::Descending);
        assert_eq!(desc.seat_of(&ids[0]), Some(Seat::new(0, 0)));
        assert_eq!(desc.seat_of(&ids[2]), Some(Seat::new(0, 1)));
        assert_eq!(desc.seat_of(&ids[1]), Some(Seat::new(0, 2)));
    }

    #[test]
    fn composition_honors_min_and_max() {
        // 3 two-seat clusters, 3 tier-1 and 3 tier-2 students,
        // T1 {min 1, max 1}, T2 {min 0, max 1}: the minimum pass gives
        // every cluster one T1, the fill pass tops each up with one T2.
        let mut roster = Roster::new();
        roster.add_names("a1\na2\na3", Tier::new(1), None);
        roster.add_names("b1\nb2\nb3", Tier::new(2), None);

        let grid = GridConfig::new(1, 6, 2);
        let mut quotas = Quotas::new();
        quotas.set(Tier::new(1), TierQuota { min: 1, max: 1 });
        quotas.set(Tier::new(2), TierQuota { min: 0, max: 1 });

        let chart = fill_composition(&roster, &grid, &quotas);
        assert_eq!(chart.len(), 6);

        let tiers_in_cluster = |cluster: &[Seat]| -> Vec<u8> {
            cluster
                .iter()
                .filter_map(|seat| chart.student_at(*seat))
                .map(|id| roster.get(id).unwrap().tier.get())
                .collect()
        };
        for cluster in grid.clusters() {
            assert_eq!(tiers_in_cluster(&cluster), vec![1, 2]);
        }
    }

    #[test]
    fn composition_exhausted_bucket_leaves_unseated() {
        // 3 two-seat clusters, quota T1 {min 1, max 1}, T2 {min 0, max 1},
        // but only 2 tier-2 students for 3 clusters: the last cluster
        // can seat its tier-1 minimum and then finds no tier with both
        // stock and headroom, so its second seat stays empty.
        let mut roster = Roster::new();
        roster.add_names("a1\na2\na3\na4", Tier::new(1), None);
        roster.add_names("b1\nb2", Tier::new(2), None);

        let grid = GridConfig::new(1, 6, 2);
        let mut quotas = Quotas::new();
        quotas.set(Tier::new(1), TierQuota { min: 1, max: 1 });
        quotas.set(Tier::new(2), TierQuota { min: 0, max: 1 });

        let chart = fill_composition(&roster, &grid, &quotas);

        // 3 tier-1 minimums + 2 tier-2 = 5 seated, one tier-1 unseated.
        assert_eq!(chart.len(), 5);
        let ids: Vec<StudentId> = roster.iter().map(|s| s.id.clone()).collect();
        assert!(!chart.is_seated(&ids[3]));
        assert_eq!(chart.student_at(Seat::new(0, 5)), None);
    }

    #[test]
    fn composition_max_zero_means_unbounded() {
        let mut roster = Roster::new();
        roster.add_names("a1\na2\na3\na4", Tier::new(1), None);

        let grid = GridConfig::new(1, 4, 4);
        let mut quotas = Quotas::new();
        quotas.set(Tier::new(1), TierQuota { min: 0, max: 0 });

        let chart = fill_composition(&roster, &grid, &quotas);
        assert_eq!(chart.len(), 4);
    }

    #[test]
    fn composition_oversized_minimum_truncates() {
        // min 4 of tier 1 into two-seat clusters: the first cluster
        // stages 4 but seats only 2; the other 2 were drained from the
        // queue and stay unseated, and the second cluster gets nothing.
        let mut roster = Roster::new();
        roster.add_names("a1\na2\na3\na4", Tier::new(1), None);

        let grid = GridConfig::new(1, 4, 2);
        let mut quotas = Quotas::new();
        quotas.set(Tier::new(1), TierQuota { min: 4, max: 99 });

        let chart = fill_composition(&roster, &grid, &quotas);
        assert_eq!(chart.len(), 2);
        assert_eq!(chart.student_at(Seat::new(0, 2)), None);
    }

    #[test]
    fn composition_buckets_deplete_across_clusters() {
        let mut roster = Roster::new();
        roster.add_names("a1\na2\na3", Tier::new(1), None);
        roster.add_names("b1\nb2\nb3", Tier::new(2), None);

        let grid = GridConfig::new(1, 6, 2);
        let chart = fill_composition(&roster, &grid, &Quotas::new());

        // No quotas: lowest tier drains first, then the next.
        let ids: Vec<StudentId> = roster.iter().map(|s| s.id.clone()).collect();
        assert_eq!(chart.seat_of(&ids[0]), Some(Seat::new(0, 0)));
        assert_eq!(chart.seat_of(&ids[2]), Some(Seat::new(0, 2)));
        assert_eq!(chart.seat_of(&ids[3]), Some(Seat::new(0, 3)));
    }
}
