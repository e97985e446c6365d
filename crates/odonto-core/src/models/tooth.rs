use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// A tooth key in FDI notation: first digit is the quadrant, second the
/// position. Parsed numerically, so `"16"` and `" 16"` are the same tooth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ToothCode(u16);

impl ToothCode {
    pub fn new(value: u16) -> Self {
        Self(value)
    }

    pub fn value(self) -> u16 {
        self.0
    }

    /// The dentition whose numeric range contains this code, if any.
    pub fn dentition(self) -> Option<Dentition> {
        [Dentition::Permanent, Dentition::Deciduous]
            .into_iter()
            .find(|d| d.contains(self))
    }
}

impl FromStr for ToothCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u16>()
            .map(Self)
            .map_err(|_| CoreError::InvalidToothCode(s.to_string()))
    }
}

impl fmt::Display for ToothCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which set of teeth an index is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Dentition {
    /// Adult teeth, FDI 11–48.
    Permanent,
    /// Primary ("baby") teeth, FDI 51–85.
    Deciduous,
}

impl Dentition {
    /// Inclusive numeric range of tooth codes. The filter is purely numeric:
    /// codes such as 20 or 30 fall inside the permanent range.
    pub fn range(self) -> RangeInclusive<u16> {
        match self {
            Dentition::Permanent => 11..=48,
            Dentition::Deciduous => 51..=85,
        }
    }

    pub fn contains(self, code: ToothCode) -> bool {
        self.range().contains(&code.value())
    }
}
