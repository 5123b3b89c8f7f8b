// Pedantic lint configuration for the crate.
// Most of these are reasonable but too strict for this codebase:
// - cast_precision_loss: Acceptable when averaging small rating counts
// - missing_errors_doc: Error handling is self-evident from Result types
// - missing_panics_doc: Panics are rare and documented inline
// - module_name_repetitions: Entity types naturally echo their module
// - must_use_candidate: Marked where it matters, not mechanically
// - cast_possible_truncation: Rating bounds are validated before casting
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod operations;
pub mod store;
