//! Property-based tests for the sort engine.
//!
//! These tests verify that:
//! - Sorting is idempotent for any chain
//! - Identical input produces identical output
//! - Externals never follow internals when grouping is on
//! - Path depth ordering puts packages first, then deepest to shallowest

use impsort_domain::{path_depth, sort_records, Config, EXTERNAL_DEPTH};
use impsort_types::record::ImportRecord;
use impsort_types::strategy::{ChainEntry, Direction, StrategyKind};
use proptest::prelude::*;
use regex::Regex;

fn arb_source() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::string::string_regex(r"[a-z][a-z0-9-]{0,8}").unwrap(),
        prop::string::string_regex(r"@[a-z]{1,4}/[a-z]{1,6}").unwrap(),
        prop::string::string_regex(r"\./[a-z]{1,6}").unwrap(),
        prop::string::string_regex(r"(\.\./){1,3}[a-z]{1,6}(/[a-z]{1,4})?").unwrap(),
        prop::string::string_regex(r"@/[a-z]{1,6}").unwrap(),
    ]
}

fn arb_record() -> impl Strategy<Value = ImportRecord> {
    (
        arb_source(),
        prop::string::string_regex(r"[A-Za-z_][A-Za-z0-9]{0,6}").unwrap(),
    )
        .prop_map(|(source, binding)| {
            let text = format!("import {binding} from '{source}';");
            ImportRecord::new(Some(&source), text, None).with_first_binding(binding)
        })
}

fn arb_records() -> impl Strategy<Value = Vec<ImportRecord>> {
    prop::collection::vec(arb_record(), 0..12)
}

fn arb_entry() -> impl Strategy<Value = ChainEntry> {
    (
        prop::sample::select(StrategyKind::KNOWN.to_vec()),
        prop::bool::ANY,
    )
        .prop_map(|(strategy, asc)| {
            let direction = if asc {
                Direction::Ascending
            } else {
                Direction::Descending
            };
            ChainEntry::new(strategy, direction)
        })
}

fn arb_config() -> impl Strategy<Value = Config> {
    (prop::bool::ANY, prop::collection::vec(arb_entry(), 1..5)).prop_map(|(groups, chain)| {
        Config::new(
            groups,
            Regex::new(impsort_domain::DEFAULT_INTERNAL_PATTERN).unwrap(),
            chain,
            false,
        )
    })
}

fn texts(records: &[ImportRecord]) -> Vec<String> {
    records.iter().map(|r| r.text.clone()).collect()
}

proptest! {
    /// Sorting already-sorted records changes nothing.
    #[test]
    fn sort_is_idempotent(records in arb_records(), config in arb_config()) {
        let once = sort_records(&records, &config);
        let twice = sort_records(&once, &config);
        prop_assert_eq!(texts(&once), texts(&twice));
    }

    /// Same input, same output.
    #[test]
    fn sort_is_deterministic(records in arb_records(), config in arb_config()) {
        prop_assert_eq!(
            sort_records(&records, &config),
            sort_records(&records, &config)
        );
    }

    /// Output is a permutation of the input.
    #[test]
    fn sort_keeps_every_record(records in arb_records(), config in arb_config()) {
        let mut before = texts(&records);
        let mut after = texts(&sort_records(&records, &config));
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    /// With grouping on, no external import follows an internal one.
    #[test]
    fn externals_precede_internals(records in arb_records(), config in arb_config()) {
        prop_assume!(config.group_external_internal());
        let sorted = sort_records(&records, &config);
        let first_internal = sorted.iter().position(|r| config.is_internal(r));
        if let Some(first_internal) = first_internal {
            prop_assert!(sorted[first_internal..].iter().all(|r| config.is_internal(r)));
        }
    }

    /// Ascending path depth: packages first, then deeper paths before shallower ones.
    #[test]
    fn path_depth_ascending_order(records in arb_records()) {
        let config = Config::new(
            false,
            Regex::new(impsort_domain::DEFAULT_INTERNAL_PATTERN).unwrap(),
            vec![ChainEntry::asc(StrategyKind::PathDepth)],
            false,
        );
        let depths: Vec<i32> = sort_records(&records, &config)
            .iter()
            .map(|r| path_depth(r.source.as_deref()))
            .collect();

        let packages = depths.iter().take_while(|&&d| d == EXTERNAL_DEPTH).count();
        let relative = &depths[packages..];
        prop_assert!(relative.iter().all(|&d| d != EXTERNAL_DEPTH));
        prop_assert!(relative.windows(2).all(|w| w[0] >= w[1]));
    }

    /// Descending path depth: shallowest relative paths first, packages last.
    #[test]
    fn path_depth_descending_order(records in arb_records()) {
        let config = Config::new(
            false,
            Regex::new(impsort_domain::DEFAULT_INTERNAL_PATTERN).unwrap(),
            vec![ChainEntry::desc(StrategyKind::PathDepth)],
            false,
        );
        let depths: Vec<i32> = sort_records(&records, &config)
            .iter()
            .map(|r| path_depth(r.source.as_deref()))
            .collect();

        let relative = depths.iter().take_while(|&&d| d != EXTERNAL_DEPTH).count();
        prop_assert!(depths[..relative].windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(depths[relative..].iter().all(|&d| d == EXTERNAL_DEPTH));
    }
}
