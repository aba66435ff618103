//! Domain logic: turn a file's import records into ordering diagnostics with exact fixes.
//!
//! This crate owns *what* order imports should have and why a group violates it. It does not own
//! *how* source is parsed (the host supplies [`ImportRecord`]s) or how edits reach disk; that's the
//! `impsort-edit` crate.
//!
//! Pipeline per file: [`Config`] is built once, [`find_groups`] splits the records into contiguous
//! runs, [`sort_group`] computes the canonical order of each run, and [`derive_diagnostic`]
//! compares actual vs. canonical order. [`ImportOrderCheck`] wraps the whole two-phase protocol.
//!
//! [`ImportRecord`]: impsort_types::record::ImportRecord

mod check;
mod collate;
mod deriver;
mod engine;
mod groups;
mod options;
mod ports;
mod specifiers;
mod strategies;

pub use check::{check_imports, ImportOrderCheck};
pub use collate::{collation_key, compare_collated};
pub use deriver::derive_diagnostic;
pub use engine::{sort_group, sort_records};
pub use groups::{find_groups, ImportGroup};
pub use options::{Config, DEFAULT_INTERNAL_PATTERN, MAX_CHAIN_LEN};
pub use ports::{apply_fix, TextFixer};
pub use specifiers::{first_local_binding, specifier_key, SpecifierSorter, TextSpecifierSorter};
pub use strategies::{filename_key, path_depth, EXTERNAL_DEPTH};
