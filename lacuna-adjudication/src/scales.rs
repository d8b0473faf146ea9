//! Ordinal scales for facts with a defined severity/extent ordering.

use lacuna_core::facts::FactValue;

/// The resection-extent scale, least to most complete. One array index is
/// one ordinal step: gross-total vs subtotal is a 2-step disagreement.
const RESECTION_SCALE: &[(&str, &[&str])] = &[
    ("biopsy", &["biopsy", "biopsy only", "bx"]),
    ("subtotal", &["subtotal", "subtotal resection", "str", "partial", "partial resection"]),
    ("near total", &["near total", "near total resection", "ntr", "near-total"]),
    ("gross total", &["gross total", "gross total resection", "gtr", "complete", "complete resection"]),
];

/// Ordinal position of a value on the named fact's scale, if the fact has
/// one and the value parses onto it.
pub fn ordinal_position(fact: &str, value: &FactValue) -> Option<usize> {
    if fact != "extent_of_resection" {
        return None;
    }
    let normalized = value.normalized();
    RESECTION_SCALE.iter().position(|(canonical, spellings)| {
        normalized == *canonical || spellings.iter().any(|s| normalized == *s)
    })
}

/// Canonical display label for a scale position.
pub fn scale_label(fact: &str, position: usize) -> Option<&'static str> {
    if fact != "extent_of_resection" {
        return None;
    }
    RESECTION_SCALE.get(position).map(|(canonical, _)| *canonical)
}
