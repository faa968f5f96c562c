use std::fmt::{Display, Formatter};

use swc_core::common::{Span, Spanned};

use crate::JourneyAtom;

/// A non-fatal finding about a construct the journey DSL cannot express.
/// The construct has already been removed or commented out when this is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
    pub filename: String,
    pub start_line: usize,
    pub end_line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A hook call like `test.skip()` was deleted
    UnsupportedHook(JourneyAtom),
    /// An assertion like `expect(x).toBeVisible()` was turned into a comment
    UnsupportedMatcher(JourneyAtom),
}

impl DiagnosticKind {
    /// The method or matcher name the diagnostic is about
    pub fn name(&self) -> &JourneyAtom {
        match self {
            DiagnosticKind::UnsupportedHook(name) | DiagnosticKind::UnsupportedMatcher(name) => {
                name
            }
        }
    }
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::UnsupportedHook(name) => {
                write!(f, "Removing unsupported method: '{name}'")
            }
            DiagnosticKind::UnsupportedMatcher(name) => {
                write!(f, "Commenting out unsupported matcher: '{name}'")
            }
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} in {}:{}:{}",
            self.kind, self.filename, self.start_line, self.end_line
        )
    }
}

impl Spanned for Diagnostic {
    fn span(&self) -> Span {
        self.span
    }
}

#[cfg(test)]
mod tests {
    use swc_core::common::DUMMY_SP;

    use super::*;

    #[test]
    fn it_formats_with_location() {
        let diagnostic = Diagnostic {
            kind: DiagnosticKind::UnsupportedHook(JourneyAtom::from("skip")),
            span: DUMMY_SP,
            filename: "tests/login.spec.ts".to_string(),
            start_line: 4,
            end_line: 6,
        };

        assert_eq!(
            diagnostic.to_string(),
            "Removing unsupported method: 'skip' in tests/login.spec.ts:4:6"
        );
        assert_eq!(&**diagnostic.kind.name(), "skip");
    }
}
