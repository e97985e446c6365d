use odonto_core::models::catalog::{DiagnosisCatalog, DiagnosisCategory};
use odonto_core::models::indices::{CeoIndices, CpoIndices};
use odonto_core::models::odontogram::{Diagnosis, Odontogram};
use odonto_core::models::tooth::ToothCode;
use odonto_indices::rules::{Finding, IndexTally};
use odonto_indices::{DentalIndex, calculate_ceo, calculate_cpo, get_index, require_index};
use serde_json::json;

fn category(id: &str, keys: &[&str]) -> DiagnosisCategory {
    DiagnosisCategory {
        id: id.to_string(),
        nombre: None,
        diagnosticos: keys.iter().map(|k| Diagnosis::new(*k)).collect(),
    }
}

/// Catalog shaped like the clinic's: every code lives in the category the
/// rules expect for it.
fn clinic_catalog() -> DiagnosisCatalog {
    DiagnosisCatalog::new(vec![
        category("patologia_activa", &["caries", "fractura"]),
        category(
            "tratamiento_realizado",
            &["obturacion", "sellante_realizado", "corona_realizada", "extraccion_otra_causa"],
        ),
        category("ausencia", &["ausente", "perdida_otra_causa", "extraccion_indicada"]),
    ])
}

#[test]
fn empty_or_missing_inputs_give_zero() {
    assert_eq!(
        calculate_cpo(Some(&Odontogram::new()), Some(&DiagnosisCatalog::default())),
        CpoIndices::ZERO
    );
    assert_eq!(calculate_cpo(None, None), CpoIndices::ZERO);
    assert_eq!(
        calculate_cpo(Some(&Odontogram::new().with_finding("16", "oclusal", "caries")), None),
        CpoIndices::ZERO
    );
    assert_eq!(calculate_cpo(None, Some(&clinic_catalog())), CpoIndices::ZERO);
}

#[test]
fn one_tooth_per_counter_scenario() {
    let odontogram: Odontogram = serde_json::from_value(json!({
        "16": { "oclusal": [{ "key": "caries" }] },
        "26": { "oclusal": [{ "key": "obturacion" }] },
        "36": { "vestibular": [{ "key": "ausente" }] }
    }))
    .unwrap();

    let indices = calculate_cpo(Some(&odontogram), Some(&clinic_catalog()));
    assert_eq!(indices, CpoIndices::new(1, 1, 1));
    assert_eq!(indices.total(), 3);
}

#[test]
fn deciduous_teeth_do_not_count_toward_cpo() {
    let odontogram = Odontogram::new()
        .with_finding("51", "oclusal", "caries")
        .with_finding("85", "mesial", "obturacion");

    assert_eq!(
        calculate_cpo(Some(&odontogram), Some(&clinic_catalog())),
        CpoIndices::ZERO
    );
}

#[test]
fn missing_wins_over_filled_on_the_same_tooth() {
    let odontogram = Odontogram::new()
        .with_finding("21", "vestibular", "ausente")
        .with_finding("21", "oclusal", "obturacion");

    assert_eq!(
        calculate_cpo(Some(&odontogram), Some(&clinic_catalog())),
        CpoIndices::new(0, 1, 0)
    );
}

#[test]
fn caries_wins_over_filled_on_the_same_tooth() {
    let odontogram = Odontogram::new()
        .with_finding("46", "mesial", "obturacion")
        .with_finding("46", "distal", "caries");

    assert_eq!(
        calculate_cpo(Some(&odontogram), Some(&clinic_catalog())),
        CpoIndices::new(1, 0, 0)
    );
}

#[test]
fn each_tooth_counts_once_however_many_surfaces() {
    let odontogram = Odontogram::new()
        .with_finding("11", "mesial", "caries")
        .with_finding("11", "distal", "caries")
        .with_finding("11", "oclusal", "caries");

    assert_eq!(
        calculate_cpo(Some(&odontogram), Some(&clinic_catalog())),
        CpoIndices::new(1, 0, 0)
    );
}

#[test]
fn caries_outside_active_pathology_is_ignored() {
    let catalog = DiagnosisCatalog::new(vec![
        category("patologia_activa", &["fractura"]),
        category("tratamiento_realizado", &["caries"]),
    ]);
    let odontogram = Odontogram::new().with_finding("16", "oclusal", "caries");

    assert_eq!(calculate_cpo(Some(&odontogram), Some(&catalog)), CpoIndices::ZERO);
}

#[test]
fn missing_codes_qualify_through_treatment_or_absence() {
    let odontogram = Odontogram::new()
        .with_finding("17", "oclusal", "extraccion_otra_causa")
        .with_finding("27", "oclusal", "perdida_otra_causa");

    assert_eq!(
        calculate_cpo(Some(&odontogram), Some(&clinic_catalog())),
        CpoIndices::new(0, 2, 0)
    );
}

#[test]
fn filled_codes_require_completed_treatment() {
    let catalog = DiagnosisCatalog::new(vec![category("ausencia", &["obturacion"])]);
    let odontogram = Odontogram::new().with_finding("26", "oclusal", "obturacion");

    assert_eq!(calculate_cpo(Some(&odontogram), Some(&catalog)), CpoIndices::ZERO);
}

#[test]
fn unknown_codes_and_keys_are_ignored() {
    let odontogram = Odontogram::new()
        .with_finding("16", "oclusal", "gingivitis")
        .with_finding("dientes", "oclusal", "caries")
        .with_finding("", "oclusal", "caries");

    assert_eq!(
        calculate_cpo(Some(&odontogram), Some(&clinic_catalog())),
        CpoIndices::ZERO
    );
}

#[test]
fn total_always_equals_sum_and_calculation_is_idempotent() {
    let odontogram = Odontogram::new()
        .with_finding("11", "mesial", "caries")
        .with_finding("12", "mesial", "caries")
        .with_finding("21", "oclusal", "corona_realizada")
        .with_finding("31", "oclusal", "extraccion_indicada")
        .with_finding("41", "oclusal", "sellante_realizado");
    let catalog = clinic_catalog();

    let first = calculate_cpo(Some(&odontogram), Some(&catalog));
    let second = calculate_cpo(Some(&odontogram), Some(&catalog));

    assert_eq!(first, second);
    assert_eq!(first.total(), first.c() + first.p() + first.o());
    assert_eq!(first, CpoIndices::new(2, 1, 2));
}

#[test]
fn breakdown_reports_winner_per_tooth() {
    let odontogram = Odontogram::new()
        .with_finding("16", "oclusal", "caries")
        .with_finding("36", "vestibular", "ausente")
        .with_finding("36", "oclusal", "caries")
        .with_finding("44", "oclusal", "gingivitis");

    let cpo = get_index("cpo").unwrap();
    let breakdown = cpo.classify_teeth(&odontogram, &clinic_catalog());

    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[&ToothCode::new(16)], Finding::Caries);
    assert_eq!(breakdown[&ToothCode::new(36)], Finding::Missing);
}

#[test]
fn ceo_counts_only_deciduous_teeth() {
    let odontogram = Odontogram::new()
        .with_finding("16", "oclusal", "caries")
        .with_finding("54", "oclusal", "caries")
        .with_finding("65", "oclusal", "extraccion_indicada")
        .with_finding("65", "mesial", "obturacion")
        .with_finding("75", "oclusal", "obturacion");

    assert_eq!(
        calculate_ceo(Some(&odontogram), Some(&clinic_catalog())),
        CeoIndices::new(1, 1, 1)
    );
    assert_eq!(calculate_ceo(None, Some(&clinic_catalog())), CeoIndices::ZERO);
}

#[test]
fn registry_lookup() {
    assert_eq!(get_index("ceo").unwrap().name(), "ceo-d");
    assert!(get_index("dmft").is_none());
    assert!(require_index("dmft").is_err());
}

#[test]
fn describe_uses_index_letters() {
    let odontogram = Odontogram::new().with_finding("16", "oclusal", "caries");
    let cpo = require_index("cpo").unwrap();
    let tally = cpo.tally(&odontogram, &clinic_catalog());

    assert_eq!(cpo.describe(&tally), "CPO-D: C=1 P=0 O=0 total=1");
}

#[test]
fn tally_total_saturates() {
    let tally = IndexTally {
        decayed: u32::MAX,
        missing: 1,
        filled: 0,
    };
    assert_eq!(tally.total(), u32::MAX);
    assert_eq!(CpoIndices::from(tally).total(), u32::MAX);
}
