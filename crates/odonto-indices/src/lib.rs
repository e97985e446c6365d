//! odonto-indices
//!
//! Dental index definitions. Pure data and counting, no I/O.
//! Each index walks the odontogram teeth of its dentition, classifies every
//! diagnosis through the catalog-gated rule table, and counts one finding per
//! tooth by fixed precedence.

pub mod error;
pub mod indices;
pub mod rules;

use std::collections::BTreeMap;

use odonto_core::models::catalog::DiagnosisCatalog;
use odonto_core::models::indices::{CeoIndices, CpoIndices};
use odonto_core::models::odontogram::{Odontogram, all_diagnoses};
use odonto_core::models::tooth::Dentition;

use error::IndexError;
use rules::{DiagnosisRule, IndexTally, ToothBreakdown, ToothFlags};

/// Trait implemented by each dental index.
pub trait DentalIndex: Send + Sync {
    /// Unique identifier (e.g., "cpo", "ceo").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "CPO-D").
    fn name(&self) -> &str;

    /// The teeth this index is computed over.
    fn dentition(&self) -> Dentition;

    /// Labels for the decayed, missing and filled counters, in that order.
    fn letters(&self) -> [&str; 3];

    fn rules(&self) -> &[DiagnosisRule] {
        &rules::STANDARD_RULES
    }

    /// The winning finding of every tooth that counts toward the index.
    ///
    /// Empty inputs yield an empty breakdown. Keys that parse to the same
    /// tooth code are merged before precedence is applied.
    fn classify_teeth(&self, odontogram: &Odontogram, catalog: &DiagnosisCatalog) -> ToothBreakdown {
        if odontogram.is_empty() || catalog.is_empty() {
            return ToothBreakdown::new();
        }

        let mut flags: BTreeMap<_, ToothFlags> = BTreeMap::new();
        for (code, surfaces) in odontogram.teeth(self.dentition()) {
            let tooth = flags.entry(code).or_default();
            for diagnosis in all_diagnoses(surfaces) {
                if let Some(finding) = rules::classify(&diagnosis.key, catalog, self.rules()) {
                    tooth.record(finding);
                }
            }
        }

        flags
            .into_iter()
            .filter_map(|(code, tooth)| tooth.winner().map(|finding| (code, finding)))
            .collect()
    }

    fn tally(&self, odontogram: &Odontogram, catalog: &DiagnosisCatalog) -> IndexTally {
        IndexTally::from_breakdown(&self.classify_teeth(odontogram, catalog))
    }

    /// One-line rendering, e.g. `CPO-D: C=1 P=0 O=2 total=3`.
    fn describe(&self, tally: &IndexTally) -> String {
        let [d, m, f] = self.letters();
        format!(
            "{}: {d}={} {m}={} {f}={} total={}",
            self.name(),
            tally.decayed,
            tally.missing,
            tally.filled,
            tally.total(),
        )
    }
}

/// Return all registered indices.
pub fn all_indices() -> Vec<Box<dyn DentalIndex>> {
    vec![Box::new(indices::cpo::Cpo), Box::new(indices::ceo::CeoD)]
}

/// Look up an index by ID.
pub fn get_index(id: &str) -> Option<Box<dyn DentalIndex>> {
    all_indices().into_iter().find(|i| i.id() == id)
}

/// Like [`get_index`], for callers that treat an unknown id as an error.
pub fn require_index(id: &str) -> Result<Box<dyn DentalIndex>, IndexError> {
    get_index(id).ok_or_else(|| IndexError::UnknownIndex(id.to_string()))
}

/// CPO-D of an odontogram. Missing inputs count as "no data" and give zero.
pub fn calculate_cpo(
    odontogram: Option<&Odontogram>,
    catalog: Option<&DiagnosisCatalog>,
) -> CpoIndices {
    match (odontogram, catalog) {
        (Some(odontogram), Some(catalog)) => indices::cpo::Cpo.tally(odontogram, catalog).into(),
        _ => CpoIndices::ZERO,
    }
}

/// ceo-d of an odontogram. Missing inputs give zero.
pub fn calculate_ceo(
    odontogram: Option<&Odontogram>,
    catalog: Option<&DiagnosisCatalog>,
) -> CeoIndices {
    match (odontogram, catalog) {
        (Some(odontogram), Some(catalog)) => indices::ceo::CeoD.tally(odontogram, catalog).into(),
        _ => CeoIndices::ZERO,
    }
}
