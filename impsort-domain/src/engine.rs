use crate::options::Config;
use crate::strategies;
use impsort_types::record::ImportRecord;
use impsort_types::strategy::ChainEntry;
use tracing::debug;

/// Canonical order of one import group.
///
/// With external/internal grouping on, externals come first and each side is sorted on its own.
/// Each side then goes through the strategy chain: the first strategy partitions the records into
/// ordered buckets, the rest of the chain is applied to each bucket, and the buckets are
/// concatenated. Later strategies only ever refine ties left by earlier ones.
pub fn sort_group<'a>(records: &[&'a ImportRecord], config: &Config) -> Vec<&'a ImportRecord> {
    let chain = config.strategy_chain();
    if !config.group_external_internal() {
        return apply_chain(records, chain, 0);
    }

    let (external, internal): (Vec<&ImportRecord>, Vec<&ImportRecord>) =
        records.iter().copied().partition(|r| !config.is_internal(r));

    let mut sorted = apply_chain(&external, chain, 0);
    sorted.extend(apply_chain(&internal, chain, 0));
    sorted
}

/// Owned convenience wrapper around [`sort_group`].
pub fn sort_records(records: &[ImportRecord], config: &Config) -> Vec<ImportRecord> {
    let refs: Vec<&ImportRecord> = records.iter().collect();
    sort_group(&refs, config).into_iter().cloned().collect()
}

fn apply_chain<'a>(
    records: &[&'a ImportRecord],
    chain: &[ChainEntry],
    position: usize,
) -> Vec<&'a ImportRecord> {
    let Some(entry) = chain.get(position) else {
        return records.to_vec();
    };
    if records.len() <= 1 {
        return records.to_vec();
    }

    let Some(buckets) = strategies::partition(entry, records) else {
        debug!(strategy = %entry.strategy, "skipping unrecognized strategy");
        return apply_chain(records, chain, position + 1);
    };

    buckets
        .iter()
        .flat_map(|bucket| apply_chain(bucket, chain, position + 1))
        .collect()
}
