use crate::edit::TextEdit;
use crate::record::ByteRange;
use crate::strategy::{Direction, StrategyKind};
use serde::{Deserialize, Serialize};

/// Category of the first violation found in an import group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Grouping,
    Order,
    Destructured,
}

impl ViolationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ViolationKind::Grouping => "grouping",
            ViolationKind::Order => "order",
            ViolationKind::Destructured => "destructured",
        }
    }
}

/// Where `expected` belongs relative to `compared_to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Before,
    After,
}

impl Position {
    pub fn as_str(self) -> &'static str {
        match self {
            Position::Before => "before",
            Position::After => "after",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationReport {
    pub kind: ViolationKind,

    /// The import (source path) or specifier that is misplaced.
    pub expected: String,

    /// The import or specifier it is compared against.
    pub compared_to: String,

    pub position: Position,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<StrategyKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

impl ViolationReport {
    /// Human-readable message for this report.
    pub fn message(&self) -> String {
        match self.kind {
            ViolationKind::Grouping => format!(
                "Imports should be grouped by type (external vs internal): \"{}\" should come {} \"{}\"",
                self.expected,
                self.position.as_str(),
                self.compared_to
            ),
            ViolationKind::Order => {
                let direction = self.direction.unwrap_or_default();
                let rule = match &self.strategy {
                    Some(StrategyKind::LineLength) => "by line length".to_string(),
                    Some(StrategyKind::PathDepth) => "by path depth".to_string(),
                    Some(StrategyKind::Filename) => "by filename".to_string(),
                    Some(StrategyKind::Alphabetical) | None => "alphabetically".to_string(),
                    Some(StrategyKind::Unrecognized(name)) => format!("by {name}"),
                };
                format!(
                    "Imports should be sorted {rule} ({direction}): \"{}\" should come {} \"{}\"",
                    self.expected,
                    self.position.as_str(),
                    self.compared_to
                )
            }
            ViolationKind::Destructured => format!(
                "Import specifiers should be sorted alphabetically. '{}' should come {} '{}'.",
                self.expected,
                self.position.as_str(),
                self.compared_to
            ),
        }
    }
}

/// One reported problem for one import group, with its fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub category: ViolationKind,
    pub message: String,

    /// Range of the group's first statement (the report anchor).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<ByteRange>,

    pub report: ViolationReport,

    /// Whole-group replacement; absent when the group lacks positional data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<TextEdit>,
}

impl Diagnostic {
    pub fn new(report: ViolationReport, range: Option<ByteRange>, fix: Option<TextEdit>) -> Self {
        Self {
            category: report.kind,
            message: report.message(),
            range,
            report,
            fix,
        }
    }
}

/// Per-file output document (`--format json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub schema: String,
    pub path: String,

    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    pub fn new(path: impl Into<String>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            schema: crate::schema::IMPSORT_REPORT_V1.to_string(),
            path: path.into(),
            diagnostics,
        }
    }
}
