//! Plain-text rendering of the board and roster.

use seatplan_core::{Planner, Seat, Student};

const CELL_WIDTH: usize = 12;

/// The board as a text grid, front row (row 0) first, with an aisle
/// gap between clusters.
pub fn board(planner: &Planner) -> String {
    let grid = planner.grid();
    let cluster = grid.cluster_size.max(1);
    let mut out = String::new();

    out.push_str(&center("[ FRONT ]", row_width(grid.cols, cluster)));
    out.push('\n');

    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let label = match planner.chart().student_at(Seat::new(row, col)) {
                Some(id) => planner
                    .roster()
                    .get(id)
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| id.to_string()),
                None => "·".to_string(),
            };
            out.push_str(&center(&truncate(&label), CELL_WIDTH));
            let cluster_end = (col + 1) % cluster == 0 && col + 1 != grid.cols;
            if cluster_end {
                out.push_str("   ");
            }
        }
        out.push('\n');
    }
    out
}

/// The unseated roster, one student per line.
pub fn roster(planner: &Planner) -> String {
    let unseated = planner.unseated();
    if unseated.is_empty() {
        return "all students seated\n".to_string();
    }
    let mut out = String::new();
    for student in unseated {
        out.push_str(&line(student));
        out.push('\n');
    }
    out
}

fn line(student: &Student) -> String {
    let gender = student
        .gender
        .map(|g| format!(" {:?}", g))
        .unwrap_or_default();
    format!("{}  {} {}{}", student.id, student.name, student.tier, gender)
}

fn row_width(cols: u16, cluster: u16) -> usize {
    let gaps = if cols == 0 {
        0
    } else {
        ((cols - 1) / cluster) as usize
    };
    cols as usize * CELL_WIDTH + gaps * 3
}

fn truncate(name: &str) -> String {
    if name.chars().count() <= CELL_WIDTH - 2 {
        name.to_string()
    } else {
        let head: String = name.chars().take(CELL_WIDTH - 3).collect();
        format!("{}…", head)
    }
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}
