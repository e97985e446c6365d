use odonto_core::models::tooth::Dentition;

use crate::DentalIndex;

/// CPO-D: decayed, missing ("perdidos") and filled ("obturados") permanent
/// teeth, FDI 11–48.
pub struct Cpo;

impl DentalIndex for Cpo {
    fn id(&self) -> &str {
        "cpo"
    }

    fn name(&self) -> &str {
        "CPO-D"
    }

    fn dentition(&self) -> Dentition {
        Dentition::Permanent
    }

    fn letters(&self) -> [&str; 3] {
        ["C", "P", "O"]
    }
}
