use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::tooth::{Dentition, ToothCode};

/// A diagnosis applied to a tooth surface, or listed in a catalog category.
/// Only `key` takes part in index calculations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Diagnosis {
    #[serde(default)]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub nombre: Option<String>,
}

impl Diagnosis {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            nombre: None,
        }
    }
}

/// Surface (or quadrant) identifier → diagnoses recorded on it.
pub type SurfaceFindings = BTreeMap<String, Vec<Diagnosis>>;

/// Per-tooth clinical findings, keyed by the FDI code as the frontend sends
/// it. Keys are kept as strings so that unparseable keys survive a round
/// trip; index calculations skip them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Odontogram(BTreeMap<String, SurfaceFindings>);

impl Odontogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Record a diagnosis on a tooth surface.
    pub fn push(&mut self, tooth: &str, surface: &str, diagnosis: Diagnosis) {
        self.0
            .entry(tooth.to_string())
            .or_default()
            .entry(surface.to_string())
            .or_default()
            .push(diagnosis);
    }

    /// Builder form of [`Odontogram::push`] taking a bare diagnosis key.
    pub fn with_finding(mut self, tooth: &str, surface: &str, key: &str) -> Self {
        self.push(tooth, surface, Diagnosis::new(key));
        self
    }

    /// Raw findings for a tooth key, if any were recorded.
    pub fn surfaces(&self, tooth: &str) -> Option<&SurfaceFindings> {
        self.0.get(tooth)
    }

    /// Teeth whose key parses to a code inside `dentition`, in key order.
    ///
    /// Keys must be plain integers (`"16a"` and `"11.5"` are skipped). Keys that
    /// parse to the same code (`"16"`, `"016"`) are each yielded; index
    /// classification merges them into one tooth.
    pub fn teeth(&self, dentition: Dentition) -> impl Iterator<Item = (ToothCode, &SurfaceFindings)> {
        self.0.iter().filter_map(move |(key, surfaces)| {
            let code: ToothCode = key.parse().ok()?;
            dentition.contains(code).then_some((code, surfaces))
        })
    }
}

/// Every diagnosis on a tooth, across all of its surfaces.
pub fn all_diagnoses(surfaces: &SurfaceFindings) -> impl Iterator<Item = &Diagnosis> {
    surfaces.values().flatten()
}
