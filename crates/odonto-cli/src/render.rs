//! Plain-text rendering for terminal output.

use std::fmt::Write;

use odonto_core::models::indices::CpoIndices;
use odonto_display::state::{CpoPanel, PanelStatus};
use odonto_indices::rules::{DiagnosisRule, Finding, ToothBreakdown};

fn cpo_line(indices: &CpoIndices) -> String {
    format!(
        "C={} P={} O={} total={}",
        indices.c(),
        indices.p(),
        indices.o(),
        indices.total()
    )
}

fn status_label(status: PanelStatus) -> &'static str {
    match status {
        PanelStatus::Idle => "sin paciente",
        PanelStatus::Loading => "cargando",
        PanelStatus::Saved => "guardado",
        PanelStatus::Stale => "cambios sin guardar",
        PanelStatus::Unsaved => "sin registro guardado",
        PanelStatus::Error => "error",
    }
}

pub fn panel_text(panel: &CpoPanel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Estado:     {}", status_label(panel.status));
    let _ = writeln!(out, "Calculado:  {}", cpo_line(&panel.calculated));
    match &panel.saved {
        Some(saved) => {
            let _ = write!(out, "Guardado:   {}", cpo_line(&saved.indices));
            if let Some(at) = saved.recorded_at {
                let _ = write!(out, " ({at})");
            }
            out.push('\n');
        }
        None => out.push_str("Guardado:   -\n"),
    }
    if let Some(message) = &panel.message {
        let _ = writeln!(out, "{message}");
    }
    if let Some(detail) = &panel.detail {
        let _ = writeln!(out, "  {detail}");
    }
    out
}

fn finding_label(finding: Finding) -> &'static str {
    match finding {
        Finding::Missing => "perdido",
        Finding::Caries => "caries",
        Finding::Filled => "obturado",
    }
}

pub fn breakdown_text(breakdown: &ToothBreakdown) -> String {
    breakdown
        .iter()
        .map(|(tooth, finding)| format!("  {tooth}: {}\n", finding_label(*finding)))
        .collect()
}

/// Legend of which codes count as what, and which categories gate them.
pub fn rules_text(rules: &[DiagnosisRule]) -> String {
    let mut out = String::new();
    for rule in rules {
        let _ = writeln!(
            out,
            "  {:<8} {} [{}]",
            finding_label(rule.finding),
            rule.codes.join(", "),
            rule.categories.join(" | "),
        );
    }
    out
}
