//! # lacuna-engine
//!
//! Composes the pipeline: gap identification → candidate ranking →
//! escalation → provenance/adjudication → timeline integration → subject
//! artifact. One subject's run is strictly sequential; across subjects the
//! engine is embarrassingly parallel, sharing only the oracle gate.

pub mod runner;

pub use runner::{run_subject, run_subjects, EngineContext, SubjectInput};
