use super::{buckets_by_key, Bucket};
use impsort_types::record::ImportRecord;
use impsort_types::strategy::Direction;
use std::cmp::Ordering;

/// Statement length in UTF-16 code units, the unit editors and JS hosts report.
fn line_length(record: &ImportRecord) -> usize {
    record.text.encode_utf16().count()
}

pub(super) fn compare(a: &ImportRecord, b: &ImportRecord, direction: Direction) -> Ordering {
    direction.apply(line_length(a).cmp(&line_length(b)))
}

pub(super) fn partition<'a>(records: &[&'a ImportRecord], direction: Direction) -> Vec<Bucket<'a>> {
    buckets_by_key(records, line_length, |a, b| direction.apply(a.cmp(b)))
}
