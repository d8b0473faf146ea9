//! Property tests: ranking is a pure function of (gap, inventory).

use chrono::NaiveDate;
use proptest::prelude::*;
use uuid::Uuid;

use lacuna_core::config::RankingConfig;
use lacuna_core::models::{ContentFormat, Gap, GapKind, GapPriority, RawDocument};
use lacuna_ranking::{rank_candidates, DocumentInventory};

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2015i32..2022, 1u32..13, 1u32..29)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).expect("valid date"))
}

fn arb_document(seed: u64) -> impl Strategy<Value = RawDocument> {
    let hints = prop_oneof![
        Just("Operative Report"),
        Just("Radiology"),
        Just("Discharge summary"),
        Just("Clinic note"),
        Just("Treatment plan"),
        Just("misc"),
    ];
    let formats = prop_oneof![Just(ContentFormat::Text), Just(ContentFormat::Image)];
    (hints, proptest::option::of(arb_date()), formats, 0u64..u64::MAX).prop_map(
        move |(hint, document_date, format, n)| RawDocument {
            id: Uuid::new_v4(),
            type_hint: hint.to_string(),
            description: format!("document {seed}-{n}"),
            document_date,
            format,
            // Distinct bytes per document so dedup never collapses them.
            content: format!("{seed}-{n}").into_bytes(),
        },
    )
}

fn arb_gap() -> impl Strategy<Value = Gap> {
    let kinds = prop_oneof![
        Just(GapKind::ExtentOfResection),
        Just(GapKind::RadiationCourse),
        Just(GapKind::SystemicTherapy),
    ];
    (kinds, proptest::option::of(arb_date())).prop_map(|(kind, anchor)| {
        Gap::new(Uuid::new_v4(), kind, GapPriority::High, anchor, &["start_date"])
    })
}

proptest! {
    // Same inventory + same gap → same ordered list, every time.
    #[test]
    fn ranking_is_deterministic(
        docs in proptest::collection::vec(arb_document(7), 0..20),
        gap in arb_gap(),
    ) {
        let inventory = DocumentInventory::build(&docs);
        let config = RankingConfig::default();
        let first = rank_candidates(&gap, &inventory, &config);
        let second = rank_candidates(&gap, &inventory, &config);
        prop_assert_eq!(&first, &second);
    }

    // The configured cap always holds.
    #[test]
    fn ranking_respects_cap(
        docs in proptest::collection::vec(arb_document(11), 0..30),
        gap in arb_gap(),
    ) {
        let inventory = DocumentInventory::build(&docs);
        let config = RankingConfig::default();
        let ranked = rank_candidates(&gap, &inventory, &config);
        prop_assert!(ranked.len() <= config.candidate_cap());
    }

    // Anchored ranking never interleaves tiers: within the returned list,
    // a document from a later tier never precedes one from an earlier tier.
    #[test]
    fn anchored_ranking_keeps_tier_order(
        docs in proptest::collection::vec(arb_document(23), 0..20),
        anchor in arb_date(),
    ) {
        let gap = Gap::new(
            Uuid::new_v4(),
            GapKind::ExtentOfResection,
            GapPriority::Highest,
            Some(anchor),
            &["extent_of_resection"],
        );
        let inventory = DocumentInventory::build(&docs);
        let ranked = rank_candidates(&gap, &inventory, &RankingConfig::default());

        let tier_of = |category| {
            lacuna_ranking::tiers::tiers_for(GapKind::ExtentOfResection)
                .iter()
                .position(|tier| tier.contains(&category))
                .unwrap_or(usize::MAX)
        };
        let tiers: Vec<usize> = ranked.iter().map(|c| tier_of(c.category)).collect();
        prop_assert!(tiers.windows(2).all(|w| w[0] <= w[1]));
    }
}
