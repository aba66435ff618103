use crate::engine::sort_group;
use crate::groups::ImportGroup;
use crate::options::Config;
use crate::specifiers::{first_local_binding, SpecifierSorter};
use crate::strategies;
use impsort_types::edit::TextEdit;
use impsort_types::record::ImportRecord;
use impsort_types::report::{Diagnostic, Position, ViolationKind, ViolationReport};
use impsort_types::strategy::ChainEntry;
use std::borrow::Cow;
use std::cmp::Ordering;
use tracing::debug;

/// First violation of one group, with a fix that rewrites the whole group canonically.
///
/// Checks run in order and the first hit wins: external/internal grouping, then chain order,
/// then (if enabled) destructured specifier order. `None` when the group is clean.
pub fn derive_diagnostic(
    group: &ImportGroup<'_>,
    config: &Config,
    sorter: &dyn SpecifierSorter,
) -> Option<Diagnostic> {
    if group.is_empty() {
        return None;
    }

    let normalized = normalize_specifiers(&group.records, config, sorter);
    let normalized_refs: Vec<&ImportRecord> = normalized.iter().map(Cow::as_ref).collect();
    let canonical = sort_group(&normalized_refs, config);

    let report = grouping_violation(&group.records, config)
        .or_else(|| order_violation(&group.records, &normalized_refs, &canonical, config))
        .or_else(|| destructured_violation(&group.records, config, sorter))?;

    let fix = group.span().map(|span| {
        let replacement = canonical
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        TextEdit::new(span, replacement)
    });
    if fix.is_none() {
        debug!(kind = report.kind.as_str(), "group has no positional data, reporting without fix");
    }

    let anchor = group.records.first().and_then(|r| r.range);
    Some(Diagnostic::new(report, anchor, fix))
}

/// Records with their specifier lists sorted; untouched records are borrowed.
fn normalize_specifiers<'a>(
    records: &[&'a ImportRecord],
    config: &Config,
    sorter: &dyn SpecifierSorter,
) -> Vec<Cow<'a, ImportRecord>> {
    records
        .iter()
        .map(|&record| {
            if !config.sort_destructured_specifiers() {
                return Cow::Borrowed(record);
            }
            match sorter.sort_specifiers(&record.text) {
                Cow::Borrowed(_) => Cow::Borrowed(record),
                Cow::Owned(text) => {
                    let first_binding =
                        first_local_binding(&text).or_else(|| record.first_binding.clone());
                    Cow::Owned(ImportRecord {
                        text,
                        first_binding,
                        ..record.clone()
                    })
                }
            }
        })
        .collect()
}

fn grouping_violation(records: &[&ImportRecord], config: &Config) -> Option<ViolationReport> {
    if !config.group_external_internal() {
        return None;
    }

    let first_internal = records.iter().position(|r| config.is_internal(r))?;
    let last_external = records.iter().rposition(|r| !config.is_internal(r))?;
    if last_external < first_internal {
        return None;
    }

    Some(ViolationReport {
        kind: ViolationKind::Grouping,
        expected: label(records[last_external]).to_string(),
        compared_to: label(records[first_internal]).to_string(),
        position: Position::Before,
        strategy: None,
        direction: None,
    })
}

fn order_violation(
    records: &[&ImportRecord],
    normalized: &[&ImportRecord],
    canonical: &[&ImportRecord],
    config: &Config,
) -> Option<ViolationReport> {
    // Canonical order as indices into the group, so specifier rewrites don't count as moves.
    let order: Vec<usize> = canonical
        .iter()
        .filter_map(|c| normalized.iter().position(|r| std::ptr::eq(*r, *c)))
        .collect();

    let index = order.iter().enumerate().position(|(i, &wanted)| i != wanted)?;
    let actual = records[index];

    // The misplaced record belongs further down; name the record it should follow.
    let target = order.iter().position(|&wanted| wanted == index)?;
    let compared = records[*order.get(target.checked_sub(1)?)?];

    let entry = offending_entry(
        config.strategy_chain(),
        normalized[order[index]],
        normalized[index],
    );
    Some(ViolationReport {
        kind: ViolationKind::Order,
        expected: label(actual).to_string(),
        compared_to: label(compared).to_string(),
        position: Position::After,
        strategy: entry.map(|e| e.strategy.clone()),
        direction: entry.map(|e| e.direction),
    })
}

/// The first chain entry that tells the two records apart.
///
/// Resolution stops at a terminal strategy that ties, since nothing after it can reorder.
/// Falls back to the chain head when no entry distinguishes them.
fn offending_entry<'c>(
    chain: &'c [ChainEntry],
    wanted: &ImportRecord,
    actual: &ImportRecord,
) -> Option<&'c ChainEntry> {
    for entry in chain {
        match strategies::compare(entry, wanted, actual) {
            None => continue,
            Some(Ordering::Equal) if strategies::is_terminal(&entry.strategy) => break,
            Some(Ordering::Equal) => continue,
            Some(_) => return Some(entry),
        }
    }
    chain.first()
}

fn destructured_violation(
    records: &[&ImportRecord],
    config: &Config,
    sorter: &dyn SpecifierSorter,
) -> Option<ViolationReport> {
    if !config.sort_destructured_specifiers() {
        return None;
    }

    let (earlier, later) = records
        .iter()
        .find_map(|r| sorter.first_out_of_order_pair(&r.text))?;
    Some(ViolationReport {
        kind: ViolationKind::Destructured,
        expected: later,
        compared_to: earlier,
        position: Position::Before,
        strategy: None,
        direction: None,
    })
}

fn label(record: &ImportRecord) -> &str {
    match record.source.as_deref() {
        Some(source) if !source.is_empty() => source,
        _ => &record.text,
    }
}
