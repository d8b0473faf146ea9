//! Property tests: adjudication is total — any two well-formed sources,
//! equal ones included, produce a record with a non-empty rationale.

use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use lacuna_adjudication::adjudicate;
use lacuna_core::facts::FactValue;
use lacuna_core::models::{
    ConfidenceLabel, DocumentCategory, ExtractionMethod, SourceCategory, SourceRecord,
};

fn arb_category() -> impl Strategy<Value = SourceCategory> {
    prop_oneof![
        Just(SourceCategory::StructuredRecord),
        Just(SourceCategory::Document(DocumentCategory::OperativeRecord)),
        Just(SourceCategory::Document(DocumentCategory::DischargeSummary)),
        Just(SourceCategory::Document(DocumentCategory::ProgressNote)),
        Just(SourceCategory::Document(DocumentCategory::ImagingReport)),
        Just(SourceCategory::Document(DocumentCategory::TreatmentPlan)),
        Just(SourceCategory::Document(DocumentCategory::Other)),
    ]
}

fn arb_confidence() -> impl Strategy<Value = ConfidenceLabel> {
    prop_oneof![
        Just(ConfidenceLabel::Low),
        Just(ConfidenceLabel::Medium),
        Just(ConfidenceLabel::High),
    ]
}

fn arb_value() -> impl Strategy<Value = FactValue> {
    prop_oneof![
        Just(FactValue::Text("gross total".into())),
        Just(FactValue::Text("near total".into())),
        Just(FactValue::Text("subtotal".into())),
        Just(FactValue::Text("biopsy".into())),
        Just(FactValue::Text("unknown".into())),
        Just(FactValue::Text("not specified".into())),
        "[a-z]{1,12}".prop_map(FactValue::Text),
        (0.0f64..100.0).prop_map(FactValue::Number),
        (2015i32..2022, 1u32..13, 1u32..29).prop_map(|(y, m, d)| {
            FactValue::Date(NaiveDate::from_ymd_opt(y, m, d).expect("valid date"))
        }),
    ]
}

fn arb_source() -> impl Strategy<Value = SourceRecord> {
    (arb_category(), arb_value(), arb_confidence()).prop_map(|(category, value, confidence)| {
        SourceRecord {
            category,
            value,
            method: ExtractionMethod::OraclePrimary,
            confidence,
            document_id: Some(Uuid::new_v4()),
            excerpt: None,
            recorded_at: Utc::now(),
        }
    })
}

fn arb_fact() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("extent_of_resection"),
        Just("surgeon_assessment"),
        Just("start_date"),
        Just("stop_date"),
        Just("total_dose"),
        Just("course_type"),
        Just("regimen"),
    ]
}

proptest! {
    // Totality: always a record, always a rationale.
    #[test]
    fn adjudication_is_total(fact in arb_fact(), a in arb_source(), b in arb_source()) {
        let record = adjudicate(fact, &a, &b);
        prop_assert!(!record.rationale.is_empty());
    }

    // The final value always comes from one of the two sources.
    #[test]
    fn final_value_is_one_of_the_inputs(fact in arb_fact(), a in arb_source(), b in arb_source()) {
        let record = adjudicate(fact, &a, &b);
        let key = record.value.normalized();
        prop_assert!(key == a.value.normalized() || key == b.value.normalized());
    }

    // Agreement never flags review.
    #[test]
    fn agreement_never_flags_review(fact in arb_fact(), a in arb_source(), cat in arb_category()) {
        let mut b = a.clone();
        b.category = cat;
        let record = adjudicate(fact, &a, &b);
        prop_assert!(!record.requires_manual_review);
    }
}
