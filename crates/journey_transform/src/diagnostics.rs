use journey_core::{Diagnostic, DiagnosticKind};
use log::debug;
use swc_core::common::{
    comments::{Comment, CommentKind},
    SourceMapper, Span, DUMMY_SP,
};

use crate::TransformContext;

impl TransformContext<'_> {
    /// Records a diagnostic, resolving its span to lines of the current file
    pub fn report(&mut self, kind: DiagnosticKind, span: Span) {
        let (start_line, end_line) = self.line_range(span);

        let diagnostic = Diagnostic {
            kind,
            span,
            filename: self.options.filename.to_owned(),
            start_line,
            end_line,
        };
        debug!("{diagnostic}");

        self.diagnostics.push(diagnostic);
    }

    /// 1-based start and end lines, `(0, 0)` for synthesized nodes
    pub fn line_range(&self, span: Span) -> (usize, usize) {
        if span.is_dummy() {
            return (0, 0);
        }

        let source_map = self.options.source_map;
        let start = source_map.lookup_char_pos(span.lo);
        let end = source_map.lookup_char_pos(span.hi);
        (start.line, end.line)
    }

    /// Original text of a node, if its span is known to the source map
    pub fn snippet(&self, span: Span) -> Option<String> {
        if span.is_dummy() {
            return None;
        }

        self.options.source_map.span_to_snippet(span).ok()
    }
}

/// Comments which replace an unsupported assertion:
/// the suggested replacement, then the original statement.
pub fn unsupported_matcher_comments(suggestion: &str, original: Option<String>) -> Vec<Comment> {
    let mut comments = Vec::with_capacity(2);

    comments.push(block_comment(format!(
        "Not supported: consider using expect({suggestion}).toBe(<value>)"
    )));

    if let Some(original) = original {
        comments.push(block_comment(original));
    }

    comments
}

fn block_comment(text: String) -> Comment {
    // A nested `*/` would end the comment early
    let text = text.replace("*/", "*\\/");

    Comment {
        kind: CommentKind::Block,
        span: DUMMY_SP,
        text: text.into(),
    }
}
