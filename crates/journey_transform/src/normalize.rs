use journey_core::JourneyAtom;
use swc_core::{
    common::DUMMY_SP,
    ecma::{
        ast::{BlockStmt, BlockStmtOrExpr, CallExpr, Expr, ExprStmt, Invalid, Lit, Module, Stmt},
        visit::{VisitMut, VisitMutWith},
    },
};

use crate::{
    atoms::{DEFAULT_STEP_NAME, STEP, TEST},
    utils::{async_arrow, call_stmt, ident, is_call_to, stmt_call, str_lit, string_arg},
};

/// Wraps the body of every `test(name, fn)` lacking a `step` into `step(name, async () => { ... })`.
/// Runs after every other pass, on the final shape of the module.
pub fn normalize_tests(module: &mut Module) {
    module.visit_mut_with(&mut StepNormalizer);
}

struct StepNormalizer;

impl VisitMut for StepNormalizer {
    fn visit_mut_call_expr(&mut self, n: &mut CallExpr) {
        n.visit_mut_children_with(self);

        if !is_call_to(n, &TEST) {
            return;
        }

        let step_name = string_arg(n.args.first())
            .cloned()
            .unwrap_or_else(|| DEFAULT_STEP_NAME.to_owned());

        // Test declarations of other frameworks may have no function
        let Some(body) = n.args.get_mut(1).filter(|arg| arg.spread.is_none()) else {
            return;
        };

        wrap_function_body(&mut body.expr, step_name);
    }
}

fn wrap_function_body(expr: &mut Expr, step_name: JourneyAtom) {
    let body = match expr {
        Expr::Arrow(arrow_expr) => {
            // `() => page.goto()` gets a block to hold the step
            if let BlockStmtOrExpr::Expr(concise) = arrow_expr.body.as_mut() {
                let concise =
                    std::mem::replace(concise, Box::new(Expr::Invalid(Invalid { span: DUMMY_SP })));
                *arrow_expr.body = BlockStmtOrExpr::BlockStmt(BlockStmt {
                    span: DUMMY_SP,
                    ctxt: Default::default(),
                    stmts: vec![Stmt::Expr(ExprStmt {
                        span: DUMMY_SP,
                        expr: concise,
                    })],
                });
            }

            match arrow_expr.body.as_mut() {
                BlockStmtOrExpr::BlockStmt(block) => block,
                BlockStmtOrExpr::Expr(_) => return,
            }
        }
        Expr::Fn(fn_expr) => match fn_expr.function.body {
            Some(ref mut block) => block,
            None => return,
        },
        Expr::Paren(paren_expr) => return wrap_function_body(&mut paren_expr.expr, step_name),
        _ => return,
    };

    let has_step = body
        .stmts
        .iter()
        .any(|stmt| stmt_call(stmt).is_some_and(|call| is_call_to(call, &STEP)));
    if has_step {
        return;
    }

    let stmts = std::mem::take(&mut body.stmts);
    body.stmts.push(call_stmt(
        ident(STEP.to_owned(), DUMMY_SP),
        vec![Expr::Lit(Lit::Str(str_lit(step_name, DUMMY_SP))), async_arrow(stmts)],
    ));
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::test_utils::{transform_ts, ts};

    #[test]
    fn it_wraps_test_bodies() {
        let (output, _) = transform_ts(
            r"
            test('login', async ({ page }) => {
                await page.goto('/login');
                await page.click('text=Submit');
            });
            ",
        );

        assert_eq!(
            output,
            ts(r"
            test('login', async ({ page }) => {
                step('login', async () => {
                    await page.goto('/login');
                    await page.click('text=Submit');
                });
            });
            ")
        );
    }

    #[test]
    fn it_names_steps_by_default() {
        let (output, _) = transform_ts(
            r"
            test('', async ({ page }) => { await page.click(); });
            test(title, async function ({ page }) { await page.click(); });
            ",
        );

        assert_eq!(
            output,
            ts(r"
            test('', async ({ page }) => { step('step', async () => { await page.click(); }); });
            test(title, async function ({ page }) { step('step', async () => { await page.click(); }); });
            ")
        );
    }

    #[test]
    fn it_does_not_wrap_twice() {
        let input = r"
            test('a', async ({ page }) => {
                step('a', async () => {
                    await page.goto('/');
                });
            });
            ";

        let (once, _) = transform_ts(input);
        assert_eq!(once, ts(input));

        let (twice, _) = transform_ts(&once);
        assert_eq!(twice, once);
    }

    #[test]
    fn it_wraps_concise_bodies() {
        let (output, _) = transform_ts("test('open', ({ page }) => page.goto('/'));");

        assert_eq!(
            output,
            ts("test('open', ({ page }) => { step('open', async () => { page.goto('/'); }); });")
        );
    }

    #[test]
    fn it_skips_tests_without_functions() {
        let input = r"
            test('a', callback);
            test('b');
            ";

        let (output, _) = transform_ts(input);

        assert_eq!(output, ts(input));
    }
}
