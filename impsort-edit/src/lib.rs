//! Edit engine for impsort fixes.
//!
//! - Apply byte-range replacements to source text, all-or-nothing.
//! - Queue fixes through the domain's `TextFixer` port with [`SourceBuffer`].
//! - Guard writes with a sha256 content precondition.
//! - Render unified diffs for `--dry-run`.

pub mod error;

pub use error::{EditError, EditResult, InvalidEditError};

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use diffy::PatchFormatter;
use fs_err as fs;
use impsort_domain::TextFixer;
use impsort_types::edit::TextEdit;
use impsort_types::record::ByteRange;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Apply non-overlapping edits to `source`. Edits may come in any order.
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> EditResult<String> {
    let mut ordered: Vec<&TextEdit> = edits.iter().collect();
    ordered.sort_by_key(|e| (e.range.start, e.range.end));

    for edit in &ordered {
        validate_range(source, edit.range)?;
    }
    for pair in ordered.windows(2) {
        let (first, second) = (pair[0].range, pair[1].range);
        if first.end > second.start {
            return Err(InvalidEditError::Overlapping {
                first_start: first.start,
                first_end: first.end,
                second_start: second.start,
                second_end: second.end,
            }
            .into());
        }
    }

    let mut out = source.to_string();
    for edit in ordered.iter().rev() {
        out.replace_range(edit.range.start..edit.range.end, &edit.replacement);
    }
    debug!(edits = edits.len(), before = source.len(), after = out.len(), "applied edits");
    Ok(out)
}

fn validate_range(source: &str, range: ByteRange) -> Result<(), InvalidEditError> {
    if range.start > range.end || range.end > source.len() {
        return Err(InvalidEditError::OutOfBounds {
            start: range.start,
            end: range.end,
            len: source.len(),
        });
    }
    for offset in [range.start, range.end] {
        if !source.is_char_boundary(offset) {
            return Err(InvalidEditError::NotCharBoundary { offset });
        }
    }
    Ok(())
}

/// In-memory document that collects fixes and applies them in one go.
#[derive(Debug, Clone)]
pub struct SourceBuffer {
    original: String,
    edits: Vec<TextEdit>,
}

impl SourceBuffer {
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            edits: Vec::new(),
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn pending(&self) -> usize {
        self.edits.len()
    }

    /// The text with every queued edit applied.
    pub fn finish(self) -> EditResult<String> {
        apply_edits(&self.original, &self.edits)
    }
}

impl TextFixer for SourceBuffer {
    type Error = EditError;

    fn replace_text_range(&mut self, range: ByteRange, replacement: &str) -> EditResult<()> {
        validate_range(&self.original, range)?;
        self.edits.push(TextEdit::new(range, replacement));
        Ok(())
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Content hash of a file, captured when it was read for checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Precondition {
    pub path: Utf8PathBuf,
    pub sha256: String,
}

impl Precondition {
    pub fn of_contents(path: &Utf8Path, contents: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            sha256: sha256_hex(contents.as_bytes()),
        }
    }

    /// Read the file now and remember its hash.
    pub fn capture(path: &Utf8Path) -> EditResult<Self> {
        let bytes = fs::read(path).with_context(|| format!("read {}", path))?;
        Ok(Self {
            path: path.to_path_buf(),
            sha256: sha256_hex(&bytes),
        })
    }

    pub fn verify(&self) -> EditResult<()> {
        let bytes = fs::read(&self.path).with_context(|| format!("read {}", self.path))?;
        let actual = sha256_hex(&bytes);
        if actual != self.sha256 {
            return Err(EditError::PreconditionMismatch {
                message: format!(
                    "{}: sha mismatch: expected {}, got {actual}",
                    self.path, self.sha256
                ),
            });
        }
        Ok(())
    }
}

/// Write fixed contents after checking the file is still what was checked.
pub fn write_fixed(precondition: &Precondition, contents: &str) -> EditResult<()> {
    precondition.verify()?;
    fs::write(&precondition.path, contents)
        .with_context(|| format!("write {}", precondition.path))?;
    debug!(path = %precondition.path, bytes = contents.len(), "wrote fixed file");
    Ok(())
}

/// Git-style unified diff of one file; empty when nothing changed.
pub fn render_patch(path: &Utf8Path, before: &str, after: &str) -> String {
    if before == after {
        return String::new();
    }

    let mut out = String::new();
    let formatter = PatchFormatter::new();
    out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
    out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", path));

    let patch = diffy::create_patch(before, after);
    let body = formatter.fmt_patch(&patch).to_string();
    // diffy prints its own `---`/`+++` header; keep only the hunks.
    let hunks = body.find("@@").map_or(body.as_str(), |at| &body[at..]);
    out.push_str(hunks);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sha256_of_empty_input() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn patch_has_git_header_and_hunks() {
        let patch = render_patch(
            Utf8Path::new("src/app.ts"),
            "import z from 'z';\nimport a from 'a';\n",
            "import a from 'a';\nimport z from 'z';\n",
        );
        assert!(patch.starts_with("diff --git a/src/app.ts b/src/app.ts\n--- a/src/app.ts\n+++ b/src/app.ts\n@@"));
        assert!(patch.contains("-import z from 'z';\n"));
        assert!(patch.contains("+import a from 'a';\n"));
        assert_eq!(patch.matches("+++").count(), 1);
    }

    #[test]
    fn unchanged_text_has_empty_patch() {
        assert_eq!(render_patch(Utf8Path::new("a.ts"), "same\n", "same\n"), "");
    }

    #[test]
    fn buffer_rejects_out_of_range_fix_immediately() {
        let mut buffer = SourceBuffer::new("abc");
        let err = buffer
            .replace_text_range(ByteRange::new(1, 9), "x")
            .expect_err("out of range");
        assert!(matches!(
            err,
            EditError::InvalidEdit(InvalidEditError::OutOfBounds { .. })
        ));
        assert_eq!(buffer.pending(), 0);
    }
}
