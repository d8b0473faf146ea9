//! Fact values and their comparison semantics.
//!
//! Every extracted or structured fact is a `FactValue`. Adjudication and
//! conflict detection compare facts through `normalized()`, never raw text.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A single fact value on a timeline event.
/// Serialized as a tagged enum so the variant survives round-trips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
#[serde(rename_all = "snake_case")]
pub enum FactValue {
    Text(String),
    Date(NaiveDate),
    Number(f64),
}

/// Phrasings the oracle uses when it cannot determine a field.
const UNCLEAR_PATTERN: &str =
    r"(?i)^\s*(unknown|unclear|not\s+(specified|stated|documented|mentioned)|n/?a|none\s+given|indeterminate|illegible|cannot\s+(determine|be\s+determined))\s*\.?\s*$";

fn unclear_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(UNCLEAR_PATTERN).expect("static regex"))
}

impl FactValue {
    /// Canonical comparison key: lowercase, punctuation stripped, whitespace
    /// collapsed. Dates render as ISO, numbers with trailing zeros trimmed,
    /// so `Text("54")` and `Number(54.0)` normalize identically.
    pub fn normalized(&self) -> String {
        match self {
            FactValue::Text(s) => {
                let lowered = s.to_lowercase();
                let mut out = String::with_capacity(lowered.len());
                let mut last_space = true;
                for ch in lowered.chars() {
                    if ch.is_alphanumeric() || ch == '/' {
                        out.push(ch);
                        last_space = false;
                    } else if !last_space {
                        out.push(' ');
                        last_space = true;
                    }
                }
                out.trim().to_string()
            }
            FactValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            FactValue::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
        }
    }

    /// Whether this value is an "I couldn't tell" answer rather than data.
    pub fn is_unclear(&self) -> bool {
        match self {
            FactValue::Text(s) => s.trim().is_empty() || unclear_re().is_match(s),
            _ => false,
        }
    }

    /// Interpret the value as a calendar date, parsing ISO-formatted text.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FactValue::Date(d) => Some(*d),
            FactValue::Text(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
            FactValue::Number(_) => None,
        }
    }

    /// Whether the value counts as present for gap identification:
    /// non-null is implied by existence, so this checks non-empty.
    pub fn is_present(&self) -> bool {
        match self {
            FactValue::Text(s) => !s.trim().is_empty(),
            _ => true,
        }
    }
}

impl fmt::Display for FactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactValue::Text(s) => write!(f, "{s}"),
            FactValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FactValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for FactValue {
    fn from(s: &str) -> Self {
        FactValue::Text(s.to_string())
    }
}

impl From<NaiveDate> for FactValue {
    fn from(d: NaiveDate) -> Self {
        FactValue::Date(d)
    }
}

impl From<f64> for FactValue {
    fn from(n: f64) -> Self {
        FactValue::Number(n)
    }
}
