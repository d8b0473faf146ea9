//! Per-fact source trust hierarchies.
//!
//! Fixed tables, not computed: direct observation outranks inference.
//! Confidence labels never reorder these ranks — they only influence the
//! review flag downstream.

use lacuna_core::models::{DocumentCategory, SourceCategory};

use DocumentCategory::*;

/// Trust rank of a source category for the given fact. Higher wins.
pub fn trust_rank(fact: &str, category: SourceCategory) -> u8 {
    match fact {
        // The surgeon saw the field; imaging infers; notes repeat.
        "extent_of_resection" | "surgeon_assessment" => match category {
            SourceCategory::Document(OperativeRecord) => 6,
            SourceCategory::Document(ImagingReport) => 5,
            SourceCategory::StructuredRecord => 4,
            SourceCategory::Document(DischargeSummary) => 3,
            SourceCategory::Document(PathologyReport) => 2,
            SourceCategory::Document(ProgressNote) => 1,
            SourceCategory::Document(TreatmentPlan) | SourceCategory::Document(Other) => 0,
        },
        // Course details come from the treating service's own plan first.
        "start_date" | "stop_date" | "total_dose" | "course_type" | "regimen" => match category {
            SourceCategory::Document(TreatmentPlan) => 6,
            SourceCategory::StructuredRecord => 5,
            SourceCategory::Document(DischargeSummary) => 4,
            SourceCategory::Document(ProgressNote) => 3,
            SourceCategory::Document(OperativeRecord) => 2,
            SourceCategory::Document(ImagingReport) | SourceCategory::Document(PathologyReport) => 1,
            SourceCategory::Document(Other) => 0,
        },
        // Facts with no dedicated table: structured record first, then
        // the more narrative document types.
        _ => match category {
            SourceCategory::StructuredRecord => 4,
            SourceCategory::Document(OperativeRecord)
            | SourceCategory::Document(TreatmentPlan) => 3,
            SourceCategory::Document(DischargeSummary) => 2,
            SourceCategory::Document(ImagingReport)
            | SourceCategory::Document(PathologyReport) => 1,
            SourceCategory::Document(ProgressNote) | SourceCategory::Document(Other) => 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operative_record_outranks_imaging_for_extent() {
        assert!(
            trust_rank("extent_of_resection", SourceCategory::Document(OperativeRecord))
                > trust_rank("extent_of_resection", SourceCategory::Document(ImagingReport))
        );
    }

    #[test]
    fn treatment_plan_leads_for_course_facts() {
        assert!(
            trust_rank("total_dose", SourceCategory::Document(TreatmentPlan))
                > trust_rank("total_dose", SourceCategory::Document(DischargeSummary))
        );
    }
}
