//! Field-name aliasing.
//!
//! Different prompts elicit the same fact under different keys; validation
//! and merge consult this table before declaring a field missing. The
//! table is static so the orchestrator stays decoupled from prompt-specific
//! output shapes.

use std::collections::BTreeMap;

use lacuna_core::facts::FactValue;
use lacuna_core::models::OracleResponse;

/// Acceptable alternate keys per canonical fact name.
const ALIASES: &[(&str, &[&str])] = &[
    ("extent_of_resection", &["extent", "resection_extent", "eor", "degree_of_resection"]),
    ("surgeon_assessment", &["surgeon_impression", "operative_assessment", "surgeons_estimate"]),
    ("start_date", &["start", "begin_date", "course_start", "date_started"]),
    ("stop_date", &["end_date", "stop", "course_end", "completion_date", "date_completed"]),
    ("total_dose", &["dose", "cumulative_dose", "total_dose_gy", "total_dose_cgy"]),
    ("course_type", &["type", "treatment_intent", "course", "radiation_type"]),
    ("regimen", &["agent", "agents", "drug", "drugs", "protocol", "protocol_name"]),
];

/// One-line extraction hint per canonical field, used by clarification
/// prompts to steer the retry.
const HINTS: &[(&str, &str)] = &[
    ("extent_of_resection", "one of: gross total, near total, subtotal, biopsy only"),
    ("surgeon_assessment", "the surgeon's own words about residual disease"),
    ("start_date", "first treatment date, formatted YYYY-MM-DD"),
    ("stop_date", "last treatment date, formatted YYYY-MM-DD"),
    ("total_dose", "cumulative dose in Gy, as a number"),
    ("course_type", "one of: initial, boost, re-irradiation"),
    ("regimen", "drug or protocol name as written"),
];

/// Resolve a canonical fact from an oracle response, checking the
/// canonical key first, then every alias.
pub fn resolve_field<'a>(response: &'a OracleResponse, canonical: &str) -> Option<&'a FactValue> {
    if let Some(v) = response.field(canonical) {
        return Some(v);
    }
    aliases_of(canonical)
        .iter()
        .find_map(|alias| response.field(alias))
}

/// Fold an oracle response into canonical keys. Unaliased keys pass
/// through unchanged; an existing canonical entry is never overwritten
/// (first answer wins within one response).
pub fn canonicalize(response: &OracleResponse) -> BTreeMap<String, FactValue> {
    let mut out: BTreeMap<String, FactValue> = BTreeMap::new();
    for (key, value) in &response.fields {
        let canonical = canonical_name(key);
        out.entry(canonical.to_string()).or_insert_with(|| value.clone());
    }
    out
}

/// Map any key (canonical or alias) to its canonical name.
pub fn canonical_name(key: &str) -> &str {
    for (canonical, aliases) in ALIASES {
        if *canonical == key || aliases.contains(&key) {
            return canonical;
        }
    }
    key
}

/// Whether a canonical name belongs to the engine's fact universe.
/// Extra oracle fields outside it are ignored rather than recorded.
pub fn is_known_field(canonical: &str) -> bool {
    ALIASES.iter().any(|(name, _)| *name == canonical)
}

fn aliases_of(canonical: &str) -> &'static [&'static str] {
    ALIASES
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}

/// The one-line extraction hint for a field, for clarification prompts.
pub fn hint_for(canonical: &str) -> &'static str {
    HINTS
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, hint)| *hint)
        .unwrap_or("as written in the document")
}
