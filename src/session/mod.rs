//! Capability sessions: thin wrappers that sequence one provider call each
//! (capability check, one detection run, one translation run).

pub mod availability;
pub mod detection;
pub mod translation;

pub use availability::{is_capability_supported, pair_availability};
pub use detection::{detect_languages, rank_candidates};
pub use translation::translate;
