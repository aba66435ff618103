use serde::{Deserialize, Serialize};

/// Half-open byte range `[start, end)` into the host's source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One import statement as reported by the host.
///
/// The host keeps ownership of its syntax node; this record only carries what ordering needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    /// Module specifier (`'react'`, `'./utils'`), if the host resolved one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Exact statement text, as it appears in the source.
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<ByteRange>,

    /// Local name bound by the first specifier (default, named or namespace).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_binding: Option<String>,
}

impl ImportRecord {
    pub fn new(source: Option<&str>, text: impl Into<String>, range: Option<ByteRange>) -> Self {
        Self {
            source: source.map(str::to_string),
            text: text.into(),
            range,
            first_binding: None,
        }
    }

    pub fn with_first_binding(mut self, binding: impl Into<String>) -> Self {
        self.first_binding = Some(binding.into());
        self
    }

    pub fn source_or_empty(&self) -> &str {
        self.source.as_deref().unwrap_or("")
    }
}
