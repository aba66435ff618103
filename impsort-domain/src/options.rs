use impsort_types::options::{RawOptions, RawStrategy};
use impsort_types::record::ImportRecord;
use impsort_types::strategy::{ChainEntry, Direction, StrategyKind};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Internal paths: an `@/` alias or a `./` / `../` relative path.
pub const DEFAULT_INTERNAL_PATTERN: &str = r"^(@/|\.\.?/)";

/// Upper bound on the strategy chain; it is also the engine's recursion depth.
pub const MAX_CHAIN_LEN: usize = 16;

static DEFAULT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DEFAULT_INTERNAL_PATTERN).expect("default internal pattern is a valid regex")
});

/// Canonical, validated configuration. Built once per run and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    group_external_internal: bool,
    internal_pattern: Regex,
    strategy_chain: Vec<ChainEntry>,
    sort_destructured_specifiers: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_raw(&RawOptions::default())
    }
}

impl Config {
    /// Build a config from explicit parts. The chain is used as given (unrecognized entries
    /// included) apart from the length cap.
    pub fn new(
        group_external_internal: bool,
        internal_pattern: Regex,
        strategy_chain: Vec<ChainEntry>,
        sort_destructured_specifiers: bool,
    ) -> Self {
        Self {
            group_external_internal,
            internal_pattern,
            strategy_chain: cap_chain(strategy_chain),
            sort_destructured_specifiers,
        }
    }

    /// Normalize raw options. Never fails: invalid parts fall back to their defaults.
    pub fn from_raw(raw: &RawOptions) -> Self {
        let config = Self {
            group_external_internal: raw.group_external_internal.unwrap_or(true),
            internal_pattern: compile_internal_pattern(raw.internal_path_pattern.as_deref()),
            strategy_chain: normalize_chain(raw.sort_strategy_chain.as_deref()),
            sort_destructured_specifiers: raw.sort_destructured_specifiers.unwrap_or(false),
        };
        debug!(
            groups = config.group_external_internal,
            pattern = config.internal_pattern.as_str(),
            chain = ?config.strategy_chain,
            destructured = config.sort_destructured_specifiers,
            "normalized import order config"
        );
        config
    }

    pub fn default_chain() -> Vec<ChainEntry> {
        vec![
            ChainEntry::asc(StrategyKind::PathDepth),
            ChainEntry::asc(StrategyKind::Filename),
            ChainEntry::asc(StrategyKind::Alphabetical),
            ChainEntry::asc(StrategyKind::LineLength),
        ]
    }

    pub fn group_external_internal(&self) -> bool {
        self.group_external_internal
    }

    pub fn internal_pattern(&self) -> &Regex {
        &self.internal_pattern
    }

    pub fn strategy_chain(&self) -> &[ChainEntry] {
        &self.strategy_chain
    }

    pub fn sort_destructured_specifiers(&self) -> bool {
        self.sort_destructured_specifiers
    }

    /// Internal when the source path matches the internal pattern. No path means external.
    pub fn is_internal(&self, record: &ImportRecord) -> bool {
        match record.source.as_deref() {
            Some(path) if !path.is_empty() => self.internal_pattern.is_match(path),
            _ => false,
        }
    }
}

fn compile_internal_pattern(source: Option<&str>) -> Regex {
    let Some(source) = source.filter(|s| !s.is_empty()) else {
        return DEFAULT_PATTERN.clone();
    };
    match Regex::new(source) {
        Ok(re) => re,
        Err(err) => {
            warn!(pattern = source, error = %err, "invalid internal pattern, using default");
            DEFAULT_PATTERN.clone()
        }
    }
}

fn normalize_chain(raw: Option<&[RawStrategy]>) -> Vec<ChainEntry> {
    let Some(raw) = raw.filter(|entries| !entries.is_empty()) else {
        return Config::default_chain();
    };

    let mut chain = Vec::with_capacity(raw.len());
    for entry in raw {
        let strategy = StrategyKind::parse(entry.strategy_name());
        if !strategy.is_recognized() {
            warn!(
                strategy = entry.strategy_name(),
                "unrecognized sort strategy, using default chain"
            );
            return Config::default_chain();
        }

        let direction = match entry.direction_name() {
            None => Direction::Ascending,
            Some(name) => Direction::parse(name).unwrap_or_else(|| {
                debug!(direction = name, "unrecognized direction, using ASC");
                Direction::Ascending
            }),
        };
        chain.push(ChainEntry::new(strategy, direction));
    }

    cap_chain(chain)
}

fn cap_chain(mut chain: Vec<ChainEntry>) -> Vec<ChainEntry> {
    if chain.len() > MAX_CHAIN_LEN {
        warn!(
            len = chain.len(),
            max = MAX_CHAIN_LEN,
            "strategy chain too long, truncating"
        );
        chain.truncate(MAX_CHAIN_LEN);
    }
    chain
}
