use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Opaque identifier for a student, unique within a roster.
///
/// Assigned at creation and never changed afterwards. Serializes as a
/// bare JSON string.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    pub fn new(id: impl Into<String>) -> Self {
        StudentId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StudentId({})", self.0)
    }
}

/// Tier classification, 1 through 6.
///
/// All sorting and quota logic keys off the tier. Construction clamps
/// anything outside 1..=6 down to tier 1, so an out-of-range tier is
/// unrepresentable past this boundary; deserialization routes through
/// the same clamp.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Tier(u8);

impl Tier {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    /// All six tiers in ascending order.
    pub const ALL: [Tier; 6] = [Tier(1), Tier(2), Tier(3), Tier(4), Tier(5), Tier(6)];

    /// Creates a tier, falling back to tier 1 for out-of-range values.
    pub fn new(value: u8) -> Self {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Tier(value)
        } else {
            Tier(Self::MIN)
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index, for per-tier tables.
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl Default for Tier {
    fn default() -> Self {
        Tier(Self::MIN)
    }
}

impl<'de> Deserialize<'de> for Tier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        let clamped = u8::try_from(raw).unwrap_or(0);
        Ok(Tier::new(clamped))
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

impl fmt::Debug for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tier({})", self.0)
    }
}

/// Gender marker, used only for visual grouping — never a placement
/// constraint. Absence is modeled as `Option<Gender>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

impl Gender {
    /// Steps through the toggle cycle: M, F, unset, back to M.
    pub fn cycle(current: Option<Gender>) -> Option<Gender> {
        match current {
            Some(Gender::M) => Some(Gender::F),
            Some(Gender::F) => None,
            None => Some(Gender::M),
        }
    }
}

/// One student on the roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub tier: Tier,
    #[serde(default)]
    pub gender: Option<Gender>,
}
