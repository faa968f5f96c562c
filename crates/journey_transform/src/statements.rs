use journey_core::{DiagnosticKind, Hook};
use swc_core::{
    common::{
        comments::{Comment, Comments},
        BytePos, Spanned,
    },
    ecma::ast::{Expr, ExprStmt, ModuleItem, Stmt},
};

use crate::{
    atoms::TEST,
    calls::{find_call_in_stmt, unsupported_matcher_call},
    diagnostics::unsupported_matcher_comments,
    utils::{
        function_body_stmts, function_body_stmts_mut, is_call_to, member_callee_prop,
        stmt_call_mut,
    },
    TransformContext,
};

/// Something which may hold a statement: a [`Stmt`] of a block or a [`ModuleItem`]
pub trait StatementItem: Spanned + Sized {
    fn as_stmt(&self) -> Option<&Stmt>;

    fn as_stmt_mut(&mut self) -> Option<&mut Stmt>;

    fn from_stmt(stmt: Stmt) -> Self;
}

impl StatementItem for Stmt {
    #[inline]
    fn as_stmt(&self) -> Option<&Stmt> {
        Some(self)
    }

    #[inline]
    fn as_stmt_mut(&mut self) -> Option<&mut Stmt> {
        Some(self)
    }

    #[inline]
    fn from_stmt(stmt: Stmt) -> Self {
        stmt
    }
}

impl StatementItem for ModuleItem {
    #[inline]
    fn as_stmt(&self) -> Option<&Stmt> {
        match self {
            ModuleItem::Stmt(stmt) => Some(stmt),
            ModuleItem::ModuleDecl(_) => None,
        }
    }

    #[inline]
    fn as_stmt_mut(&mut self) -> Option<&mut Stmt> {
        match self {
            ModuleItem::Stmt(stmt) => Some(stmt),
            ModuleItem::ModuleDecl(_) => None,
        }
    }

    #[inline]
    fn from_stmt(stmt: Stmt) -> Self {
        ModuleItem::Stmt(stmt)
    }
}

/// Rewrites a statement list once its statements were visited:
/// - statements removed by the call rewriter are dropped;
/// - unsupported assertions become comments on the previous statement;
/// - `describe` calls are replaced by the tests they contain.
///
/// `fallback_pos` receives the comments when no statement is left to hold them.
pub fn rewrite_statement_list<T: StatementItem>(
    items: &mut Vec<T>,
    ctx: &mut TransformContext,
    fallback_pos: BytePos,
) {
    let old_items = std::mem::take(items);
    let mut list = CommentedList {
        items,
        pending_comments: Vec::new(),
    };

    for mut item in old_items {
        if item.as_stmt().is_none() {
            list.push(item, ctx);
            continue;
        }
        let Some(stmt) = item.as_stmt_mut() else {
            continue;
        };

        // Placeholder of a removed statement
        if matches!(stmt, Stmt::Empty(empty) if empty.span.is_dummy()) {
            continue;
        }

        if let Some(comments) = comment_out_matcher(stmt, ctx) {
            list.add_comments(comments, ctx);
            continue;
        }

        if let Some(tests) = flatten_describe(stmt, ctx) {
            for test in tests {
                list.push(T::from_stmt(test), ctx);
            }
            continue;
        }

        list.push(item, ctx);
    }

    let pending_comments = list.pending_comments;
    if !pending_comments.is_empty() && !fallback_pos.is_dummy() {
        ctx.options
            .comments
            .add_leading_comments(fallback_pos, pending_comments);
    }
}

/// New statement list, together with the comments waiting for a statement to attach to
struct CommentedList<'i, T> {
    items: &'i mut Vec<T>,
    pending_comments: Vec<Comment>,
}

impl<T: StatementItem> CommentedList<'_, T> {
    fn push(&mut self, item: T, ctx: &TransformContext) {
        let lo = item.span().lo;
        if !self.pending_comments.is_empty() && !lo.is_dummy() {
            let comments = std::mem::take(&mut self.pending_comments);
            ctx.options.comments.add_leading_comments(lo, comments);
        }

        self.items.push(item);
    }

    /// Attaches comments after the last statement
    fn add_comments(&mut self, comments: Vec<Comment>, ctx: &TransformContext) {
        let last_hi = self.items.last().map(|item| item.span().hi);

        match last_hi {
            Some(hi) if !hi.is_dummy() && self.pending_comments.is_empty() => {
                ctx.options.comments.add_trailing_comments(hi, comments);
            }
            _ => self.pending_comments.extend(comments),
        }
    }
}

/// For `expect(locator).toBeVisible();` returns the comments replacing it
fn comment_out_matcher(stmt: &Stmt, ctx: &mut TransformContext) -> Option<Vec<Comment>> {
    let Stmt::Expr(ExprStmt { span, .. }) = stmt else {
        return None;
    };
    let span = *span;

    let tables = ctx.tables();
    let matcher = find_call_in_stmt(stmt, |call| unsupported_matcher_call(call, tables))?;

    if !ctx.mark_visited(span) {
        return None;
    }

    let comments = unsupported_matcher_comments(matcher.suggestion, ctx.snippet(span));
    ctx.report(DiagnosticKind::UnsupportedMatcher(matcher.name), span);

    Some(comments)
}

/// For `test.describe('suite', () => { test(...); test(...); })` returns the `test` statements.
/// A `describe` without direct tests is kept as is.
fn flatten_describe(stmt: &mut Stmt, ctx: &TransformContext) -> Option<Vec<Stmt>> {
    let tables = ctx.tables();
    let call = stmt_call_mut(stmt)?;

    let is_describe = member_callee_prop(call)
        .and_then(|prop| tables.supported_hook(prop))
        .is_some_and(|hook| matches!(hook, Hook::Describe));
    if !is_describe {
        return None;
    }

    let has_tests = call.args.iter().any(|arg| {
        function_body_stmts(&arg.expr).is_some_and(|stmts| stmts.iter().any(is_test_stmt))
    });
    if !has_tests {
        return None;
    }

    let mut tests = Vec::new();
    for arg in call.args.iter_mut() {
        let Some(stmts) = function_body_stmts_mut(&mut arg.expr) else {
            continue;
        };

        tests.extend(std::mem::take(stmts).into_iter().filter(is_test_stmt));
    }

    Some(tests)
}

/// `test(...);`
fn is_test_stmt(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Expr(ExprStmt { expr, .. }) => {
            matches!(expr.as_ref(), Expr::Call(call) if is_call_to(call, &TEST))
        }
        _ => false,
    }
}
