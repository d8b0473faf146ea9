//! Prompt construction for the extraction oracle.
//!
//! The primary prompt carries the gap's context (event kind, anchor date,
//! already-known adjacent facts) plus an optional domain-reference primer.
//! The clarification prompt lists only the still-missing fields, each with
//! its one-line extraction hint.

use lacuna_core::models::{Gap, GapKind};
use lacuna_core::timeline::Event;
use lacuna_core::traits::IReferencePrimer;

use crate::aliases::hint_for;

/// Topical tags handed to the reference primer per gap kind.
pub fn primer_tags(kind: GapKind) -> &'static [&'static str] {
    match kind {
        GapKind::ExtentOfResection => &["neurosurgery", "resection-grading"],
        GapKind::RadiationCourse => &["radiation-oncology", "dose-fractionation"],
        GapKind::SystemicTherapy => &["chemotherapy", "treatment-protocols"],
    }
}

fn task_line(kind: GapKind) -> &'static str {
    match kind {
        GapKind::ExtentOfResection => {
            "Extract the extent of surgical resection and the surgeon's assessment from this operative documentation."
        }
        GapKind::RadiationCourse => {
            "Extract the radiation course details (dates, total dose, course type) from this documentation."
        }
        GapKind::SystemicTherapy => {
            "Extract the systemic therapy course details (dates, regimen) from this documentation."
        }
    }
}

/// Build the primary extraction prompt for one gap against one document.
pub fn build_primary_prompt(
    gap: &Gap,
    event: &Event,
    primer: Option<&dyn IReferencePrimer>,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(primer) = primer {
        if let Some(context) = primer.primer_for(primer_tags(gap.kind)) {
            lines.push(context);
            lines.push(String::new());
        }
    }

    lines.push(task_line(gap.kind).to_string());
    lines.push(String::new());
    lines.push(format!("Event under review: {}", event.description));
    if let Some(anchor) = gap.anchor_date {
        lines.push(format!("Event date on record: {}", anchor.format("%Y-%m-%d")));
    }
    // Already-known adjacent facts narrow the search without re-asking them.
    for (name, value) in &event.facts {
        lines.push(format!("Known: {name} = {value}"));
    }
    lines.push(String::new());

    lines.push("Return a JSON object with these fields:".to_string());
    for field in &gap.required {
        lines.push(format!("  {field}: {}", hint_for(field)));
    }
    lines.push(
        "Use \"unknown\" for anything the document does not state. \
         Report confidence as high, medium, or low."
            .to_string(),
    );

    lines.join("\n")
}

/// Build the single clarification retry prompt: only the missing fields,
/// each with its extraction hint.
pub fn build_clarification_prompt(missing: &[String]) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(
        "The previous extraction was missing fields. From the same document, \
         extract only the following:"
            .to_string(),
    );
    for field in missing {
        lines.push(format!("  {field}: {}", hint_for(field)));
    }
    lines.push("Return a JSON object with exactly these fields.".to_string());
    lines.join("\n")
}
