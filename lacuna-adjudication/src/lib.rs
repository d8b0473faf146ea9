//! # lacuna-adjudication
//!
//! When two independent sources answer the same fact differently, this
//! crate decides which sourced answer to trust — under explicit,
//! inspectable rules — and flags irreducible disagreement for external
//! review rather than silently guessing. Every adjudication produces a
//! non-empty rationale naming the rule that fired; that contract is what
//! makes the subsystem auditable.

pub mod adjudicator;
pub mod scales;
pub mod tracker;
pub mod trust;

pub use adjudicator::adjudicate;
pub use tracker::ProvenanceTracker;
