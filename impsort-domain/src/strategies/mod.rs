//! The four ordering strategies.
//!
//! Each strategy turns a sequence of records into an ordered list of buckets. Non-terminal
//! strategies (line length, path depth) put equal keys into one bucket so later strategies can
//! refine it; terminal strategies (alphabetical, filename) emit one bucket per record, so ties
//! keep their input order and nothing later in the chain can reorder them.

use impsort_types::record::ImportRecord;
use impsort_types::strategy::{ChainEntry, StrategyKind};
use std::cmp::Ordering;

mod alphabetical;
mod filename;
mod line_length;
mod path_depth;

pub use filename::filename_key;
pub use path_depth::{path_depth, EXTERNAL_DEPTH};

pub(crate) type Bucket<'a> = Vec<&'a ImportRecord>;

/// Partition `records` by the entry's strategy. `None` for an unrecognized strategy.
pub(crate) fn partition<'a>(
    entry: &ChainEntry,
    records: &[&'a ImportRecord],
) -> Option<Vec<Bucket<'a>>> {
    let buckets = match &entry.strategy {
        StrategyKind::LineLength => line_length::partition(records, entry.direction),
        StrategyKind::PathDepth => path_depth::partition(records, entry.direction),
        StrategyKind::Alphabetical => alphabetical::partition(records, entry.direction),
        StrategyKind::Filename => filename::partition(records, entry.direction),
        StrategyKind::Unrecognized(_) => return None,
    };
    Some(buckets)
}

/// How the entry's strategy orders `a` relative to `b`. `None` for an unrecognized strategy.
pub(crate) fn compare(entry: &ChainEntry, a: &ImportRecord, b: &ImportRecord) -> Option<Ordering> {
    let ord = match &entry.strategy {
        StrategyKind::LineLength => line_length::compare(a, b, entry.direction),
        StrategyKind::PathDepth => path_depth::compare(a, b, entry.direction),
        StrategyKind::Alphabetical => alphabetical::compare(a, b, entry.direction),
        StrategyKind::Filename => filename::compare(a, b, entry.direction),
        StrategyKind::Unrecognized(_) => return None,
    };
    Some(ord)
}

/// Whether later chain entries can still refine this strategy's ties.
pub(crate) fn is_terminal(kind: &StrategyKind) -> bool {
    match kind {
        StrategyKind::Alphabetical | StrategyKind::Filename => true,
        StrategyKind::LineLength | StrategyKind::PathDepth | StrategyKind::Unrecognized(_) => false,
    }
}

/// Stable-sort by key, then merge runs of equal keys into buckets.
fn buckets_by_key<'a, K>(
    records: &[&'a ImportRecord],
    key: impl Fn(&ImportRecord) -> K,
    cmp: impl Fn(&K, &K) -> Ordering,
) -> Vec<Bucket<'a>> {
    let mut keyed: Vec<(K, &'a ImportRecord)> = records.iter().map(|r| (key(r), *r)).collect();
    keyed.sort_by(|a, b| cmp(&a.0, &b.0));

    let mut buckets: Vec<Bucket<'a>> = Vec::new();
    let mut last_key: Option<K> = None;
    for (k, record) in keyed {
        match (&last_key, buckets.last_mut()) {
            (Some(prev), Some(bucket)) if cmp(prev, &k) == Ordering::Equal => bucket.push(record),
            _ => buckets.push(vec![record]),
        }
        last_key = Some(k);
    }
    buckets
}

/// Stable-sort by key; every record becomes its own bucket.
fn singletons_by_key<'a, K>(
    records: &[&'a ImportRecord],
    key: impl Fn(&ImportRecord) -> K,
    cmp: impl Fn(&K, &K) -> Ordering,
) -> Vec<Bucket<'a>> {
    let mut keyed: Vec<(K, &'a ImportRecord)> = records.iter().map(|r| (key(r), *r)).collect();
    keyed.sort_by(|a, b| cmp(&a.0, &b.0));
    keyed.into_iter().map(|(_, record)| vec![record]).collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use impsort_types::record::ImportRecord;

    pub fn import(source: &str, text: &str) -> ImportRecord {
        ImportRecord::new(Some(source), text, None)
    }

    pub fn texts(buckets: &[Vec<&ImportRecord>]) -> Vec<Vec<String>> {
        buckets
            .iter()
            .map(|b| b.iter().map(|r| r.text.clone()).collect())
            .collect()
    }
}
