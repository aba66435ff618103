use impsort_types::record::{ByteRange, ImportRecord};

/// A maximal run of import records with nothing but whitespace between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportGroup<'a> {
    pub records: Vec<&'a ImportRecord>,
}

impl<'a> ImportGroup<'a> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// From the start of the first record to the end of the last one.
    pub fn span(&self) -> Option<ByteRange> {
        let first = self.records.first()?.range?;
        let last = self.records.last()?.range?;
        (first.start <= last.end).then(|| ByteRange::new(first.start, last.end))
    }
}

/// Split document-ordered records into contiguous groups.
///
/// A record missing its range always starts a new group, and so does the record after it.
pub fn find_groups<'a>(records: &'a [ImportRecord], source: &str) -> Vec<ImportGroup<'a>> {
    let mut groups = Vec::new();
    let Some((first, rest)) = records.split_first() else {
        return groups;
    };

    let mut current = vec![first];
    let mut prev = first;
    for record in rest {
        if separated_by_code(prev, record, source) {
            groups.push(ImportGroup {
                records: std::mem::take(&mut current),
            });
        }
        current.push(record);
        prev = record;
    }
    groups.push(ImportGroup { records: current });

    groups
}

fn separated_by_code(prev: &ImportRecord, current: &ImportRecord, source: &str) -> bool {
    let (Some(prev_range), Some(current_range)) = (prev.range, current.range) else {
        return true;
    };
    let Some(between) = source.get(prev_range.end..current_range.start) else {
        return true;
    };

    let between = between.trim();
    !between.is_empty() && !between.starts_with('\n')
}
