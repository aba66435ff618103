use super::{buckets_by_key, Bucket};
use impsort_types::record::ImportRecord;
use impsort_types::strategy::Direction;
use std::cmp::Ordering;

/// Depth reported for package (non-relative) imports.
pub const EXTERNAL_DEPTH: i32 = -1;

/// `-1` for a missing or non-relative path, `0` for `./x`, otherwise the number of `../`
/// occurrences anywhere in the path.
pub fn path_depth(path: Option<&str>) -> i32 {
    let Some(path) = path else {
        return EXTERNAL_DEPTH;
    };
    if path.starts_with("..") {
        return i32::try_from(path.matches("../").count()).unwrap_or(i32::MAX);
    }
    if path.starts_with('.') {
        0
    } else {
        EXTERNAL_DEPTH
    }
}

/// ASC: external first, then deepest to shallowest. DESC: shallowest to deepest, external last.
fn compare_depths(a: i32, b: i32, direction: Direction) -> Ordering {
    let ascending = direction == Direction::Ascending;
    match (a == EXTERNAL_DEPTH, b == EXTERNAL_DEPTH) {
        (true, true) => Ordering::Equal,
        (true, false) if ascending => Ordering::Less,
        (true, false) => Ordering::Greater,
        (false, true) if ascending => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) if ascending => b.cmp(&a),
        (false, false) => a.cmp(&b),
    }
}

fn depth_of(record: &ImportRecord) -> i32 {
    path_depth(record.source.as_deref())
}

pub(super) fn compare(a: &ImportRecord, b: &ImportRecord, direction: Direction) -> Ordering {
    compare_depths(depth_of(a), depth_of(b), direction)
}

pub(super) fn partition<'a>(records: &[&'a ImportRecord], direction: Direction) -> Vec<Bucket<'a>> {
    buckets_by_key(records, depth_of, |a, b| compare_depths(*a, *b, direction))
}
