use journey_core::{CompatibilityTables, Hook, JourneyAtom};
use swc_core::{
    common::{Span, Spanned, DUMMY_SP},
    ecma::{
        ast::{ArrowExpr, CallExpr, Callee, Class, Expr, Function, Invalid, Stmt},
        visit::{Visit, VisitWith},
    },
};

use crate::{
    atoms::EXPECT,
    utils::{
        ident, is_call_to, member_callee, member_callee_prop, member_callee_prop_ident,
        unwrap_parens,
    },
};

/// An unsupported hook call, e.g. `test.skip()`
pub struct UnsupportedHookCall {
    pub name: JourneyAtom,
    /// Span of the property, the diagnostic points at it
    pub span: Span,
}

/// An unsupported assertion, e.g. `expect(locator).toBeVisible()`
pub struct UnsupportedMatcherCall {
    pub name: JourneyAtom,
    pub suggestion: &'static str,
}

/// Checks for `x.y(...)` where `y` has no journey counterpart
pub fn unsupported_hook_call(
    call: &CallExpr,
    tables: &CompatibilityTables,
) -> Option<UnsupportedHookCall> {
    let prop = member_callee_prop_ident(call)?;
    if !tables.is_unsupported_hook(&prop.sym) {
        return None;
    }

    Some(UnsupportedHookCall {
        name: prop.sym.to_owned(),
        span: prop.span,
    })
}

/// Checks for `expect(...).matcher(...)` with a matcher the journey runner lacks
pub fn unsupported_matcher_call(
    call: &CallExpr,
    tables: &CompatibilityTables,
) -> Option<UnsupportedMatcherCall> {
    let member = member_callee(call)?;
    let Expr::Call(expect_call) = unwrap_parens(&member.obj) else {
        return None;
    };
    if !is_call_to(expect_call, &EXPECT) {
        return None;
    }

    let name = member_callee_prop(call)?;
    let suggestion = tables.matcher_suggestion(name)?;

    Some(UnsupportedMatcherCall {
        name: name.to_owned(),
        suggestion,
    })
}

/// `test.beforeAll(...)` -> `beforeAll(...)`, `test.step(...)` -> `step(...)`.
/// `describe` is left for the statement pass.
pub fn rename_hook_callee(call: &mut CallExpr, tables: &CompatibilityTables) {
    let Some(hook) = member_callee_prop(call).and_then(|prop| tables.supported_hook(prop)) else {
        return;
    };
    if matches!(hook, Hook::Describe) {
        return;
    }

    let span = call.callee.span();
    let renamed = ident(tables.translate(hook.as_str()), span);
    call.callee = Callee::Expr(Box::new(Expr::Ident(renamed)));
}

/// `await test.step(...)` -> `test.step(...)`, steps do not suspend in a journey
pub fn unwrap_awaited_step(expr: &mut Expr, tables: &CompatibilityTables) {
    let Expr::Await(await_expr) = expr else {
        return;
    };
    let Expr::Call(ref call) = *await_expr.arg else {
        return;
    };

    let is_step = member_callee_prop(call)
        .and_then(|prop| tables.supported_hook(prop))
        .is_some_and(|hook| matches!(hook, Hook::Step));
    if !is_step {
        return;
    }

    let call = std::mem::replace(
        &mut *await_expr.arg,
        Expr::Invalid(Invalid { span: DUMMY_SP }),
    );
    *expr = call;
}

/// Finds the first call of a statement satisfying `check`.
/// Does not look into nested statements, functions or classes.
pub fn find_call_in_stmt<T>(stmt: &Stmt, check: impl FnMut(&CallExpr) -> Option<T>) -> Option<T> {
    let mut finder = ShallowCallFinder { check, found: None };
    stmt.visit_children_with(&mut finder);
    finder.found
}

/// Same as [`find_call_in_stmt`], for an expression
pub fn find_call_in_expr<T>(expr: &Expr, check: impl FnMut(&CallExpr) -> Option<T>) -> Option<T> {
    let mut finder = ShallowCallFinder { check, found: None };
    expr.visit_with(&mut finder);
    finder.found
}

struct ShallowCallFinder<F, T> {
    check: F,
    found: Option<T>,
}

impl<F, T> Visit for ShallowCallFinder<F, T>
where
    F: FnMut(&CallExpr) -> Option<T>,
{
    fn visit_call_expr(&mut self, n: &CallExpr) {
        if self.found.is_some() {
            return;
        }

        self.found = (self.check)(n);
        if self.found.is_none() {
            n.visit_children_with(self);
        }
    }

    fn visit_stmt(&mut self, _n: &Stmt) {}

    fn visit_arrow_expr(&mut self, _n: &ArrowExpr) {}

    fn visit_function(&mut self, _n: &Function) {}

    fn visit_class(&mut self, _n: &Class) {}
}
