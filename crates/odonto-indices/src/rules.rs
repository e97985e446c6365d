use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use odonto_core::models::catalog::DiagnosisCatalog;
use odonto_core::models::indices::{CeoIndices, CpoIndices};
use odonto_core::models::tooth::ToothCode;

/// Catalog category patterns a diagnosis must belong to before it counts.
pub const ACTIVE_PATHOLOGY: &str = "patologia_activa";
pub const COMPLETED_TREATMENT: &str = "tratamiento_realizado";
pub const ABSENCE: &str = "ausencia";

pub const CARIES_CODES: &[&str] = &["caries"];

pub const MISSING_CODES: &[&str] = &[
    "extraccion_indicada",
    "extraccion_otra_causa",
    "perdida_otra_causa",
    "ausente",
];

pub const FILLED_CODES: &[&str] = &[
    "obturacion",
    "sellante_realizado",
    "corona_realizada",
    "protesis_fija_realizada",
    "protesis_removible_realizada",
];

/// What a tooth counts as. Declaration order is precedence order: a tooth
/// carrying several findings counts only as the first one listed here.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Finding {
    Missing,
    Caries,
    Filled,
}

/// Maps a set of diagnosis codes to a finding, gated on catalog membership.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisRule {
    pub finding: Finding,
    pub codes: &'static [&'static str],
    /// The code must be a member of the first category matching at least
    /// one of these patterns.
    pub categories: &'static [&'static str],
}

impl DiagnosisRule {
    pub fn applies(&self, key: &str, catalog: &DiagnosisCatalog) -> bool {
        self.codes.contains(&key)
            && self
                .categories
                .iter()
                .any(|pattern| catalog.is_member(key, pattern))
    }
}

pub static STANDARD_RULES: [DiagnosisRule; 3] = [
    DiagnosisRule {
        finding: Finding::Missing,
        codes: MISSING_CODES,
        categories: &[COMPLETED_TREATMENT, ABSENCE],
    },
    DiagnosisRule {
        finding: Finding::Caries,
        codes: CARIES_CODES,
        categories: &[ACTIVE_PATHOLOGY],
    },
    DiagnosisRule {
        finding: Finding::Filled,
        codes: FILLED_CODES,
        categories: &[COMPLETED_TREATMENT],
    },
];

/// The finding a single diagnosis contributes, if any.
pub fn classify(key: &str, catalog: &DiagnosisCatalog, rules: &[DiagnosisRule]) -> Option<Finding> {
    rules
        .iter()
        .find(|rule| rule.applies(key, catalog))
        .map(|rule| rule.finding)
}

/// Findings collected across all surfaces of one tooth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToothFlags {
    pub missing: bool,
    pub caries: bool,
    pub filled: bool,
}

impl ToothFlags {
    pub fn record(&mut self, finding: Finding) {
        match finding {
            Finding::Missing => self.missing = true,
            Finding::Caries => self.caries = true,
            Finding::Filled => self.filled = true,
        }
    }

    /// Missing beats caries, caries beats filled.
    pub fn winner(&self) -> Option<Finding> {
        if self.missing {
            Some(Finding::Missing)
        } else if self.caries {
            Some(Finding::Caries)
        } else if self.filled {
            Some(Finding::Filled)
        } else {
            None
        }
    }
}

/// The finding each counted tooth contributed.
pub type ToothBreakdown = BTreeMap<ToothCode, Finding>;

/// Raw counters shared by every index. Each index maps them onto its own
/// letters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IndexTally {
    pub decayed: u32,
    pub missing: u32,
    pub filled: u32,
}

impl IndexTally {
    pub fn from_breakdown(breakdown: &ToothBreakdown) -> Self {
        let mut tally = Self::default();
        for finding in breakdown.values() {
            match finding {
                Finding::Missing => tally.missing += 1,
                Finding::Caries => tally.decayed += 1,
                Finding::Filled => tally.filled += 1,
            }
        }
        tally
    }

    pub fn total(&self) -> u32 {
        self.decayed
            .saturating_add(self.missing)
            .saturating_add(self.filled)
    }
}

impl From<IndexTally> for CpoIndices {
    fn from(tally: IndexTally) -> Self {
        CpoIndices::new(tally.decayed, tally.missing, tally.filled)
    }
}

impl From<IndexTally> for CeoIndices {
    fn from(tally: IndexTally) -> Self {
        CeoIndices::new(tally.decayed, tally.missing, tally.filled)
    }
}
