use odonto_cli::render;
use odonto_core::models::envelope::SavedIndices;
use odonto_core::models::indices::CpoIndices;
use odonto_core::models::tooth::ToothCode;
use odonto_display::state::{CpoPanel, DisplayState, FETCH_ERROR_MESSAGE};
use odonto_indices::rules::{Finding, STANDARD_RULES, ToothBreakdown};

#[test]
fn stale_panel_shows_both_snapshots() {
    let state = DisplayState::Stale(SavedIndices::new(CpoIndices::new(0, 1, 0)));
    let text = render::panel_text(&CpoPanel::new(&state, CpoIndices::new(1, 1, 0)));

    assert!(text.contains("cambios sin guardar"));
    assert!(text.contains("Calculado:  C=1 P=1 O=0 total=2"));
    assert!(text.contains("Guardado:   C=0 P=1 O=0 total=1"));
}

#[test]
fn error_panel_still_shows_calculated_numbers() {
    let state = DisplayState::Error {
        detail: "fetch failed: HTTP 502: bad gateway".to_string(),
    };
    let text = render::panel_text(&CpoPanel::new(&state, CpoIndices::new(2, 0, 1)));

    assert!(text.contains(FETCH_ERROR_MESSAGE));
    assert!(text.contains("C=2 P=0 O=1 total=3"));
    assert!(text.contains("Guardado:   -"));
}

#[test]
fn breakdown_lists_teeth_in_order() {
    let mut breakdown = ToothBreakdown::new();
    breakdown.insert(ToothCode::new(36), Finding::Missing);
    breakdown.insert(ToothCode::new(16), Finding::Caries);

    assert_eq!(
        render::breakdown_text(&breakdown),
        "  16: caries\n  36: perdido\n"
    );
}

#[test]
fn rules_legend_names_gating_categories() {
    let text = render::rules_text(&STANDARD_RULES);
    assert!(text.contains("tratamiento_realizado | ausencia"));
    assert!(text.contains("obturacion"));
}
