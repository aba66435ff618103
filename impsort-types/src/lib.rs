//! Shared DTOs for the impsort workspace.
//!
//! # Design constraints
//! - Records and raw options are produced by a host (parser, scanner, editor integration).
//! - Diagnostics are serialized for machine consumption (`--format json`).
//! - Prefer adding optional fields over changing semantics.

pub mod edit;
pub mod options;
pub mod record;
pub mod report;
pub mod strategy;

/// Schema identifiers.
pub mod schema {
    pub const IMPSORT_REPORT_V1: &str = "impsort.report.v1";
}
