//! Host-side capabilities the domain writes through.

use impsort_types::record::ByteRange;
use impsort_types::report::Diagnostic;

/// Replaces a byte range of the host's document.
///
/// impsort-domain never touches source text itself; an editor integration or the edit crate's
/// `SourceBuffer` implements this.
pub trait TextFixer {
    type Error;

    fn replace_text_range(&mut self, range: ByteRange, replacement: &str) -> Result<(), Self::Error>;
}

/// Hand a diagnostic's fix to the host. Returns `false` when the diagnostic carries no fix.
pub fn apply_fix<F: TextFixer>(diagnostic: &Diagnostic, fixer: &mut F) -> Result<bool, F::Error> {
    let Some(fix) = &diagnostic.fix else {
        return Ok(false);
    };
    fixer.replace_text_range(fix.range, &fix.replacement)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use impsort_types::edit::TextEdit;
    use impsort_types::report::{Position, ViolationKind, ViolationReport};

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(ByteRange, String)>,
    }

    impl TextFixer for Recorder {
        type Error = std::convert::Infallible;

        fn replace_text_range(
            &mut self,
            range: ByteRange,
            replacement: &str,
        ) -> Result<(), Self::Error> {
            self.calls.push((range, replacement.to_string()));
            Ok(())
        }
    }

    fn diagnostic(fix: Option<TextEdit>) -> Diagnostic {
        let report = ViolationReport {
            kind: ViolationKind::Order,
            expected: "z".to_string(),
            compared_to: "a".to_string(),
            position: Position::After,
            strategy: None,
            direction: None,
        };
        Diagnostic::new(report, Some(ByteRange::new(0, 4)), fix)
    }

    #[test]
    fn forwards_fix_to_host() {
        let mut recorder = Recorder::default();
        let diag = diagnostic(Some(TextEdit::new(ByteRange::new(0, 4), "next")));
        assert_eq!(apply_fix(&diag, &mut recorder), Ok(true));
        assert_eq!(recorder.calls, vec![(ByteRange::new(0, 4), "next".to_string())]);
    }

    #[test]
    fn no_fix_is_not_an_error() {
        let mut recorder = Recorder::default();
        assert_eq!(apply_fix(&diagnostic(None), &mut recorder), Ok(false));
        assert!(recorder.calls.is_empty());
    }
}
