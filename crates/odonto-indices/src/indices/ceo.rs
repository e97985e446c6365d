use odonto_core::models::tooth::Dentition;

use crate::DentalIndex;

/// ceo-d: decayed, extraction-indicated and filled primary teeth, FDI 51–85.
/// Uses the same diagnosis rules and precedence as CPO-D.
pub struct CeoD;

impl DentalIndex for CeoD {
    fn id(&self) -> &str {
        "ceo"
    }

    fn name(&self) -> &str {
        "ceo-d"
    }

    fn dentition(&self) -> Dentition {
        Dentition::Deciduous
    }

    fn letters(&self) -> [&str; 3] {
        ["c", "e", "o"]
    }
}
