use super::{singletons_by_key, Bucket};
use crate::collate::collation_key;
use impsort_types::record::ImportRecord;
use impsort_types::strategy::Direction;
use std::cmp::Ordering;

const ALIAS_MARKERS: [&str; 2] = ["@/", "~/"];

/// Comparison key for a module path: the file name without extension, or `@scope/name` for
/// scoped packages. Query and hash suffixes are ignored.
pub fn filename_key(path: &str) -> String {
    let clean = path.split(['?', '#']).next().unwrap_or_default();

    if let Some(rest) = ALIAS_MARKERS.iter().find_map(|m| clean.strip_prefix(m)) {
        return strip_extension(last_segment(rest)).to_string();
    }

    if clean.starts_with('@') {
        let mut parts = clean.split('/');
        return match (parts.next(), parts.next()) {
            (Some(scope), Some(name)) => format!("{scope}/{name}"),
            _ => clean.to_string(),
        };
    }

    strip_extension(last_segment(clean)).to_string()
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn strip_extension(basename: &str) -> &str {
    match basename.rfind('.') {
        Some(dot) => &basename[..dot],
        None => basename,
    }
}

fn sort_key(record: &ImportRecord) -> String {
    collation_key(&filename_key(record.source_or_empty()))
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
    fn key_extraction() {
        assert_eq!(filename_key("react"), "react");
        assert_eq!(filename_key("lodash/fp/map.js"), "map");
        assert_eq!(filename_key("./utils.test.ts"), "utils.test");
        assert_eq!(filename_key("@mui/material/Button"), "@mui/material");
        assert_eq!(filename_key("@scope"), "@scope");
        assert_eq!(filename_key("@/components/Header.vue"), "Header");
        assert_eq!(filename_key("~/utils"), "utils");
        assert_eq!(filename_key("./icon.svg?raw"), "icon");
        assert_eq!(filename_key("./page#section"), "page");
    }

    #[test]
    fn sorts_by_filename_across_depths() {
        let recs = [
            import("./utils", "import utils from './utils';"),
            import("../../helper", "import helper from '../../helper';"),
            import("../config", "import config from '../config';"),
        ];
        let refs: Vec<_> = recs.iter().collect();
        assert_eq!(
            texts(&partition(&refs, Direction::Ascending)),
            vec![
                vec!["import config from '../config';"],
                vec!["import helper from '../../helper';"],
                vec!["import utils from './utils';"],
            ]
        );
    }

    #[test]
    fn extensions_do_not_affect_order() {
        let a = import("./styles.css", "import './styles.css';");
        let b = import("./styles.scss", "import './styles.scss';");
        assert_eq!(compare(&a, &b, Direction::Ascending), Ordering::Equal);
    }
}
