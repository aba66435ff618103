use serde::{Deserialize, Serialize};
use std::fmt;

/// One ordering rule in a strategy chain.
///
/// `Unrecognized` keeps the name of a strategy the engine does not know. The config normalizer
/// never produces it, but a hand-built chain may; the engine skips such entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StrategyKind {
    LineLength,
    PathDepth,
    Alphabetical,
    Filename,
    Unrecognized(String),
}

impl StrategyKind {
    pub const KNOWN: [StrategyKind; 4] = [
        StrategyKind::LineLength,
        StrategyKind::PathDepth,
        StrategyKind::Alphabetical,
        StrategyKind::Filename,
    ];

    /// Parse a strategy name. Case, `-` and `_` are ignored; `pathTreeDepth` is accepted for
    /// `pathDepth`.
    pub fn parse(name: &str) -> StrategyKind {
        let folded: String = name
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match folded.as_str() {
            "linelength" => StrategyKind::LineLength,
            "pathdepth" | "pathtreedepth" => StrategyKind::PathDepth,
            "alphabetical" => StrategyKind::Alphabetical,
            "filename" => StrategyKind::Filename,
            _ => StrategyKind::Unrecognized(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            StrategyKind::LineLength => "lineLength",
            StrategyKind::PathDepth => "pathDepth",
            StrategyKind::Alphabetical => "alphabetical",
            StrategyKind::Filename => "filename",
            StrategyKind::Unrecognized(name) => name,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, StrategyKind::Unrecognized(_))
    }
}

impl From<String> for StrategyKind {
    fn from(value: String) -> Self {
        StrategyKind::parse(&value)
    }
}

impl From<StrategyKind> for String {
    fn from(value: StrategyKind) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "ASC")]
    Ascending,
    #[serde(rename = "DESC")]
    Descending,
}

impl Direction {
    /// Case-insensitive parse of `asc`/`ascending`/`desc`/`descending`.
    pub fn parse(raw: &str) -> Option<Direction> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ASC" | "ASCENDING" => Some(Direction::Ascending),
            "DESC" | "DESCENDING" => Some(Direction::Descending),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        }
    }

    /// Apply this direction to an ascending comparison result.
    pub fn apply(self, ord: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A strategy paired with its direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainEntry {
    pub strategy: StrategyKind,
    #[serde(default)]
    pub direction: Direction,
}

impl ChainEntry {
    pub fn new(strategy: StrategyKind, direction: Direction) -> Self {
        Self {
            strategy,
            direction,
        }
    }

    pub fn asc(strategy: StrategyKind) -> Self {
        Self::new(strategy, Direction::Ascending)
    }

    pub fn desc(strategy: StrategyKind) -> Self {
        Self::new(strategy, Direction::Descending)
    }
}
