use journey_core::JourneyAtom;
use swc_core::{
    common::{Span, DUMMY_SP},
    ecma::ast::{
        ArrowExpr, BlockStmt, BlockStmtOrExpr, CallExpr, Callee, Expr, ExprOrSpread, ExprStmt,
        Ident, IdentName, Lit, MemberExpr, MemberProp, Stmt, Str,
    },
};

/// Creates an identifier in the empty syntax context
#[inline]
pub fn ident(sym: impl Into<JourneyAtom>, span: Span) -> Ident {
    Ident {
        span,
        ctxt: Default::default(),
        sym: sym.into(),
        optional: false,
    }
}

/// Creates a string literal without a `raw` value, so that codegen quotes it anew
#[inline]
pub fn str_lit(value: impl Into<JourneyAtom>, span: Span) -> Str {
    Str {
        span,
        value: value.into(),
        raw: None,
    }
}

/// For `x.y(...)` returns `x.y`
pub fn member_callee(call: &CallExpr) -> Option<&MemberExpr> {
    let Callee::Expr(ref callee) = call.callee else {
        return None;
    };

    match callee.as_ref() {
        Expr::Member(member_expr) => Some(member_expr),
        _ => None,
    }
}

/// For `x.y(...)` returns the `y` identifier
pub fn member_callee_prop_ident(call: &CallExpr) -> Option<&IdentName> {
    match member_callee(call)?.prop {
        MemberProp::Ident(ref prop) => Some(prop),
        _ => None,
    }
}

/// For `x.y(...)` returns `y`
#[inline]
pub fn member_callee_prop(call: &CallExpr) -> Option<&JourneyAtom> {
    member_callee_prop_ident(call).map(|prop| &prop.sym)
}

/// For `y(...)` returns `y`
pub fn ident_callee(call: &CallExpr) -> Option<&JourneyAtom> {
    let Callee::Expr(ref callee) = call.callee else {
        return None;
    };

    match callee.as_ref() {
        Expr::Ident(callee_ident) => Some(&callee_ident.sym),
        _ => None,
    }
}

/// Checks that `call` is `name(...)`
#[inline]
pub fn is_call_to(call: &CallExpr, name: &JourneyAtom) -> bool {
    ident_callee(call).is_some_and(|sym| sym == name)
}

pub fn unwrap_parens(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren_expr) => unwrap_parens(&paren_expr.expr),
        _ => expr,
    }
}

/// Looks through parentheses and `await`
pub fn unwrap_awaited(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren_expr) => unwrap_awaited(&paren_expr.expr),
        Expr::Await(await_expr) => unwrap_awaited(&await_expr.arg),
        other => other,
    }
}

fn unwrap_awaited_mut(expr: &mut Expr) -> &mut Expr {
    match expr {
        Expr::Paren(paren_expr) => unwrap_awaited_mut(&mut paren_expr.expr),
        Expr::Await(await_expr) => unwrap_awaited_mut(&mut await_expr.arg),
        other => other,
    }
}

/// The call of an expression statement, e.g. `foo()` in `await foo();`
pub fn stmt_call(stmt: &Stmt) -> Option<&CallExpr> {
    let Stmt::Expr(ExprStmt { expr, .. }) = stmt else {
        return None;
    };

    match unwrap_awaited(expr) {
        Expr::Call(call_expr) => Some(call_expr),
        _ => None,
    }
}

pub fn stmt_call_mut(stmt: &mut Stmt) -> Option<&mut CallExpr> {
    let Stmt::Expr(ExprStmt { expr, .. }) = stmt else {
        return None;
    };

    match unwrap_awaited_mut(expr) {
        Expr::Call(call_expr) => Some(call_expr),
        _ => None,
    }
}

/// Statements of a function expression with a block body
pub fn function_body_stmts(expr: &Expr) -> Option<&Vec<Stmt>> {
    match unwrap_parens(expr) {
        Expr::Arrow(ArrowExpr { body, .. }) => match body.as_ref() {
            BlockStmtOrExpr::BlockStmt(block) => Some(&block.stmts),
            BlockStmtOrExpr::Expr(_) => None,
        },
        Expr::Fn(fn_expr) => fn_expr.function.body.as_ref().map(|block| &block.stmts),
        _ => None,
    }
}

pub fn function_body_stmts_mut(expr: &mut Expr) -> Option<&mut Vec<Stmt>> {
    match expr {
        Expr::Paren(paren_expr) => function_body_stmts_mut(&mut paren_expr.expr),
        Expr::Arrow(ArrowExpr { body, .. }) => match body.as_mut() {
            BlockStmtOrExpr::BlockStmt(block) => Some(&mut block.stmts),
            BlockStmtOrExpr::Expr(_) => None,
        },
        Expr::Fn(fn_expr) => fn_expr
            .function
            .body
            .as_mut()
            .map(|block| &mut block.stmts),
        _ => None,
    }
}

/// Non-empty value of a string literal argument
pub fn string_arg(arg: Option<&ExprOrSpread>) -> Option<&JourneyAtom> {
    let arg = arg.filter(|arg| arg.spread.is_none())?;

    match unwrap_parens(&arg.expr) {
        Expr::Lit(Lit::Str(s)) if !s.value.is_empty() => Some(&s.value),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .first()
            .and_then(|quasi| quasi.cooked.as_ref())
            .filter(|cooked| !cooked.is_empty()),
        _ => None,
    }
}

/// Generates `callee(args)` as a statement
pub fn call_stmt(callee: Ident, args: Vec<Expr>) -> Stmt {
    Stmt::Expr(ExprStmt {
        span: DUMMY_SP,
        expr: Box::new(Expr::Call(CallExpr {
            span: DUMMY_SP,
            ctxt: Default::default(),
            callee: Callee::Expr(Box::new(Expr::Ident(callee))),
            args: args
                .into_iter()
                .map(|expr| ExprOrSpread {
                    spread: None,
                    expr: Box::new(expr),
                })
                .collect(),
            type_args: None,
        })),
    })
}

/// Generates `async () => { stmts }`
pub fn async_arrow(stmts: Vec<Stmt>) -> Expr {
    Expr::Arrow(ArrowExpr {
        span: DUMMY_SP,
        ctxt: Default::default(),
        params: vec![],
        body: Box::new(BlockStmtOrExpr::BlockStmt(BlockStmt {
            span: DUMMY_SP,
            ctxt: Default::default(),
            stmts,
        })),
        is_async: true,
        is_generator: false,
        type_params: None,
        return_type: None,
    })
}
