use crate::deriver::derive_diagnostic;
use crate::groups::find_groups;
use crate::options::Config;
use crate::specifiers::{SpecifierSorter, TextSpecifierSorter};
use impsort_types::record::ImportRecord;
use impsort_types::report::Diagnostic;
use tracing::debug;

/// One file's check session.
///
/// The host calls [`record`](Self::record) for every import statement in document order, then
/// [`finish`](Self::finish) exactly once with the full document text. Nothing is analyzed before
/// `finish`.
pub struct ImportOrderCheck<'c> {
    config: &'c Config,
    records: Vec<ImportRecord>,
    sorter: Box<dyn SpecifierSorter>,
}

impl<'c> ImportOrderCheck<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self::with_sorter(config, Box::new(TextSpecifierSorter))
    }

    pub fn with_sorter(config: &'c Config, sorter: Box<dyn SpecifierSorter>) -> Self {
        Self {
            config,
            records: Vec::new(),
            sorter,
        }
    }

    pub fn record(&mut self, record: ImportRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// At most one diagnostic per group, in document order.
    pub fn finish(self, source: &str) -> Vec<Diagnostic> {
        let groups = find_groups(&self.records, source);
        debug!(
            records = self.records.len(),
            groups = groups.len(),
            "checking import groups"
        );

        groups
            .iter()
            .filter_map(|group| derive_diagnostic(group, self.config, self.sorter.as_ref()))
            .collect()
    }
}

/// Single-call form of [`ImportOrderCheck`].
pub fn check_imports(records: Vec<ImportRecord>, source: &str, config: &Config) -> Vec<Diagnostic> {
    let mut check = ImportOrderCheck::new(config);
    for record in records {
        check.record(record);
    }
    check.finish(source)
}
