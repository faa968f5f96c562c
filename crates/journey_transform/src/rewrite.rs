use journey_core::DiagnosticKind;
use swc_core::{
    common::{BytePos, DUMMY_SP},
    ecma::{
        ast::{
            BlockStmt, BlockStmtOrExpr, CallExpr, EmptyStmt, Expr, ImportDecl, Module, Stmt,
            VarDeclarator,
        },
        visit::{VisitMut, VisitMutWith},
    },
};

use crate::{
    calls::{
        find_call_in_expr, find_call_in_stmt, rename_hook_callee, unsupported_hook_call,
        unwrap_awaited_step,
    },
    imports::{
        inject_deferred_import, rewrite_import_decl, rewrite_require_destructuring,
        rewrite_require_source,
    },
    statements::rewrite_statement_list,
    TransformContext,
};

/// Import/require and call expression rewriting as a single traversal.
///
/// Children are rewritten before their parents,
/// so a `describe` is flattened only after the `describe`s nested in it.
pub struct Rewriter<'c, 'o> {
    ctx: &'c mut TransformContext<'o>,
}

impl<'c, 'o> Rewriter<'c, 'o> {
    pub fn new(ctx: &'c mut TransformContext<'o>) -> Self {
        Rewriter { ctx }
    }

    /// Removes the statement when it calls an unsupported hook
    fn remove_unsupported_hook(&mut self, stmt: &mut Stmt) {
        if matches!(stmt, Stmt::Empty(_)) {
            return;
        }

        let tables = self.ctx.tables();
        let Some(found) = find_call_in_stmt(stmt, |call| unsupported_hook_call(call, tables)) else {
            return;
        };

        if !self.ctx.mark_visited(found.span) {
            return;
        }

        self.ctx
            .report(DiagnosticKind::UnsupportedHook(found.name), found.span);

        // Dropped by the statement list pass, stays as `;` in single-statement positions
        *stmt = Stmt::Empty(EmptyStmt { span: DUMMY_SP });
    }
}

impl VisitMut for Rewriter<'_, '_> {
    fn visit_mut_module(&mut self, n: &mut Module) {
        n.visit_mut_children_with(self);
        rewrite_statement_list(&mut n.body, self.ctx, n.span.lo);
        inject_deferred_import(&mut n.body, self.ctx);
    }

    fn visit_mut_block_stmt(&mut self, n: &mut BlockStmt) {
        n.visit_mut_children_with(self);

        // Position of the closing brace
        let closing_pos = if n.span.is_dummy() {
            BytePos(0)
        } else {
            n.span.hi - BytePos(1)
        };
        rewrite_statement_list(&mut n.stmts, self.ctx, closing_pos);
    }

    fn visit_mut_stmt(&mut self, n: &mut Stmt) {
        n.visit_mut_children_with(self);
        self.remove_unsupported_hook(n);
    }

    fn visit_mut_block_stmt_or_expr(&mut self, n: &mut BlockStmtOrExpr) {
        n.visit_mut_children_with(self);

        // `() => test.skip()` -> `() => {}`
        let BlockStmtOrExpr::Expr(expr) = &*n else {
            return;
        };

        let tables = self.ctx.tables();
        let Some(found) = find_call_in_expr(expr, |call| unsupported_hook_call(call, tables)) else {
            return;
        };

        if !self.ctx.mark_visited(found.span) {
            return;
        }

        self.ctx
            .report(DiagnosticKind::UnsupportedHook(found.name), found.span);

        *n = BlockStmtOrExpr::BlockStmt(BlockStmt {
            span: DUMMY_SP,
            ctxt: Default::default(),
            stmts: vec![],
        });
    }

    fn visit_mut_import_decl(&mut self, n: &mut ImportDecl) {
        rewrite_import_decl(n, self.ctx);
    }

    fn visit_mut_var_declarator(&mut self, n: &mut VarDeclarator) {
        rewrite_require_destructuring(n, self.ctx);
        n.visit_mut_children_with(self);
    }

    fn visit_mut_expr(&mut self, n: &mut Expr) {
        unwrap_awaited_step(n, self.ctx.tables());
        n.visit_mut_children_with(self);
    }

    fn visit_mut_call_expr(&mut self, n: &mut CallExpr) {
        n.visit_mut_children_with(self);

        let tables = self.ctx.tables();
        rename_hook_callee(n, tables);
        rewrite_require_source(n, self.ctx);
    }
}
