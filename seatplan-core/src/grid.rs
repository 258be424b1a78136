use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A (row, column) coordinate on the seating grid.
///
/// Row 0 is the front of the room. The wire form is the literal string
/// `"{row}-{col}"`, which also serves as the key in the persistence
/// document's placements object.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Seat {
    pub row: u16,
    pub col: u16,
}

impl Seat {
    pub fn new(row: u16, col: u16) -> Self {
        Seat { row, col }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

impl fmt::Debug for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seat({}-{})", self.row, self.col)
    }
}

/// Error parsing a `"row-col"` seat string.
#[derive(Debug, thiserror::Error)]
#[error("invalid seat key: {0:?}")]
pub struct SeatParseError(pub String);

impl FromStr for Seat {
    type Err = SeatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s.split_once('-').ok_or_else(|| SeatParseError(s.to_string()))?;
        let row = row.parse().map_err(|_| SeatParseError(s.to_string()))?;
        let col = col.parse().map_err(|_| SeatParseError(s.to_string()))?;
        Ok(Seat { row, col })
    }
}

impl Serialize for Seat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Seat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SeatVisitor;

        impl serde::de::Visitor<'_> for SeatVisitor {
            type Value = Seat;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a \"row-col\" seat string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                v.parse().map_err(|_| E::invalid_value(serde::de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_str(SeatVisitor)
    }
}

/// Geometry of the seating surface.
///
/// `cluster_size` partitions each row into contiguous groups of up to
/// that many columns; the last group in a row may be smaller. A value
/// below 1 is treated as 1 wherever it is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    pub rows: u16,
    pub cols: u16,
    pub cluster_size: u16,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            rows: 5,
            cols: 6,
            cluster_size: 2,
        }
    }
}

impl GridConfig {
    pub fn new(rows: u16, cols: u16, cluster_size: u16) -> Self {
        GridConfig {
            rows,
            cols,
            cluster_size,
        }
    }

    /// Total number of seats. Zero for a degenerate grid.
    pub fn capacity(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn contains(&self, seat: Seat) -> bool {
        seat.row < self.rows && seat.col < self.cols
    }

    /// All seats in natural row-major order: row 0 first, columns
    /// ascending within each row.
    pub fn seats(&self) -> impl Iterator<Item = Seat> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Seat { row, col }))
    }

    /// The group decomposition used by composition fill: rows top to
    /// bottom, each row chunked into runs of up to `cluster_size`
    /// consecutive columns, yielded in row-major, left-to-right order.
    pub fn clusters(&self) -> Vec<Vec<Seat>> {
        let width = self.cluster_size.max(1);
        let mut clusters = Vec::new();
        for row in 0..self.rows {
            let mut col = 0;
            while col < self.cols {
                let end = (col + width).min(self.cols);
                clusters.push((col..end).map(|c| Seat { row, col: c }).collect());
                col = end;
            }
        }
        clusters
    }
}
