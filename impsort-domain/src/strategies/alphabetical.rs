use super::{singletons_by_key, Bucket};
use crate::collate::collation_key;
use impsort_types::record::ImportRecord;
use impsort_types::strategy::Direction;
use std::cmp::Ordering;

/// First bound local name, else the source path, else empty.
fn sort_key(record: &ImportRecord) -> String {
    let raw = record
        .first_binding
        .as_deref()
        .filter(|b| !b.is_empty())
        .or(record.source.as_deref())
        .unwrap_or("");
    collation_key(raw)
}

pub(super) fn compare(a: &ImportRecord, b: &ImportRecord, direction: Direction) -> Ordering {
    direction.apply(sort_key(a).cmp(&sort_key(b)))
}

pub(super) fn partition<'a>(records: &[&'a ImportRecord], direction: Direction) -> Vec<Bucket<'a>> {
    singletons_by_key(records, sort_key, |a, b| direction.apply(a.cmp(b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::test_support::{import, texts};

    #[test]
    fn sorts_by_first_binding() {
        let recs = [
            import("a-lib", "import zed from 'a-lib';").with_first_binding("zed"),
            import("z-lib", "import alpha from 'z-lib';").with_first_binding("alpha"),
        ];
        let refs: Vec<_> = recs.iter().collect();
        assert_eq!(
            texts(&partition(&refs, Direction::Ascending)),
            vec![
                vec!["import alpha from 'z-lib';"],
                vec!["import zed from 'a-lib';"],
            ]
        );
    }

    #[test]
    fn side_effect_import_uses_source() {
        let recs = [
            import("./styles.css", "import './styles.css';"),
            import("animate.css", "import 'animate.css';"),
        ];
        let refs: Vec<_> = recs.iter().collect();
        let buckets = partition(&refs, Direction::Ascending);
        assert_eq!(buckets[0][0].text, "import 'animate.css';");
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let recs = [
            import("react", "import React from 'react';").with_first_binding("React"),
            import("react-dom", "import react from 'react-dom';").with_first_binding("react"),
        ];
        let refs: Vec<_> = recs.iter().collect();
        for direction in [Direction::Ascending, Direction::Descending] {
            let buckets = partition(&refs, direction);
            assert_eq!(buckets.len(), 2);
            assert_eq!(buckets[0][0].text, "import React from 'react';");
        }
    }

    #[test]
    fn descending_reverses() {
        let a = import("a", "import a from 'a';").with_first_binding("a");
        let b = import("b", "import b from 'b';").with_first_binding("b");
        assert_eq!(compare(&a, &b, Direction::Descending), Ordering::Greater);
    }
}
