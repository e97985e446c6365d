use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::odontogram::Diagnosis;

/// A group of diagnoses in the clinic's catalog, e.g. active pathologies or
/// completed treatments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiagnosisCategory {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub diagnosticos: Vec<Diagnosis>,
}

impl DiagnosisCategory {
    /// Case-insensitive substring match against the id or the name.
    pub fn matches(&self, pattern: &str) -> bool {
        let pattern = pattern.to_lowercase();
        self.id.to_lowercase().contains(&pattern)
            || self
                .nombre
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&pattern))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.diagnosticos.iter().any(|d| d.key == key)
    }
}

/// The diagnosis taxonomy served by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiagnosisCatalog(Vec<DiagnosisCategory>);

impl DiagnosisCatalog {
    pub fn new(categories: Vec<DiagnosisCategory>) -> Self {
        Self(categories)
    }

    pub fn categories(&self) -> &[DiagnosisCategory] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First category matching `pattern`.
    pub fn find_category(&self, pattern: &str) -> Option<&DiagnosisCategory> {
        self.0.iter().find(|c| c.matches(pattern))
    }

    /// Whether `key` belongs to the first category matching `pattern`.
    /// A missing category means "not a member".
    pub fn is_member(&self, key: &str, pattern: &str) -> bool {
        self.find_category(pattern).is_some_and(|c| c.contains(key))
    }
}

impl FromIterator<DiagnosisCategory> for DiagnosisCatalog {
    fn from_iter<I: IntoIterator<Item = DiagnosisCategory>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
