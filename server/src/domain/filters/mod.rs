//! Two-layer recipe filtering
//!
//! A [`Prefilter`] narrows the candidate set at the storage level, then a
//! [`FilterEngine`] built from the same [`Criteria`] re-checks every candidate
//! in memory. The engine is authoritative; the prefilter only shrinks the input.
//!
//! Invalid criteria and unknown field names never surface as errors. They are
//! dropped and filtering continues with what remains.

mod engine;
mod prefilter;
mod strategy;

pub use engine::{Criteria, FilterEngine};
pub use prefilter::Prefilter;
pub use strategy::{FilterKind, InvalidCriterion, Strategy};
