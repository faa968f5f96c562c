use std::path::{Path, PathBuf};

use swc_core::{
    common::{comments::SingleThreadedComments, sync::Lrc, FileName, SourceMap, Spanned},
    ecma::ast::{EsVersion, Module},
};
use swc_ecma_parser::{
    error::Error, lexer::Lexer, EsSyntax, Parser, StringInput, Syntax, TsSyntax,
};

use crate::CompileError;

/// Parses a test file, registering it in `source_map` under `filename`.
///
/// The dialect follows the extension, see [`syntax_for`].
/// Recoverable errors are not tolerated: a file the parser had to guess about is not transformed.
pub fn parse_test_file(
    source_map: &Lrc<SourceMap>,
    filename: &str,
    source: &str,
) -> Result<(Module, SingleThreadedComments), CompileError> {
    let source_file = source_map.new_source_file(
        Lrc::new(FileName::Real(PathBuf::from(filename))),
        source.to_owned(),
    );

    let comments = SingleThreadedComments::default();

    let lexer = Lexer::new(
        syntax_for(filename),
        EsVersion::EsNext,
        StringInput::from(&*source_file),
        Some(&comments),
    );

    let mut parser = Parser::new_from(lexer);

    let module = parser
        .parse_module()
        .map_err(|e| to_compile_error(e, source_map, filename))?;

    if let Some(e) = parser.take_errors().into_iter().next() {
        return Err(to_compile_error(e, source_map, filename));
    }

    Ok((module, comments))
}

/// JavaScript for `.js`, `.mjs`, `.cjs` and `.jsx`, TypeScript otherwise
pub fn syntax_for(filename: &str) -> Syntax {
    let ext = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "js" | "mjs" | "cjs" | "jsx" => Syntax::Es(EsSyntax {
            jsx: ext == "jsx",
            decorators: true,
            ..Default::default()
        }),

        _ => Syntax::Typescript(TsSyntax {
            tsx: ext == "tsx",
            decorators: true,
            ..Default::default()
        }),
    }
}

fn to_compile_error(e: Error, source_map: &SourceMap, filename: &str) -> CompileError {
    let span = e.span();
    let line = if span.is_dummy() {
        0
    } else {
        source_map.lookup_char_pos(span.lo).line
    };

    CompileError::Parse {
        filename: filename.to_owned(),
        line,
        message: e.kind().msg().into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use swc_core::ecma::ast::{BinExpr, BinaryOp, Decl, Expr, ModuleItem, ReturnStmt, Stmt};

    use super::*;

    #[test]
    fn it_parses_typescript() {
        let source_map: Lrc<SourceMap> = Default::default();
        let (module, _) = parse_test_file(
            &source_map,
            "login.spec.ts",
            "import { test } from '@playwright/test';\nconst n: number = 1;",
        )
        .expect("should parse");

        assert_eq!(module.body.len(), 2);
    }

    #[test]
    fn it_picks_the_dialect_by_extension() {
        assert!(matches!(syntax_for("a.spec.tsx"), Syntax::Typescript(TsSyntax { tsx: true, .. })));
        assert!(matches!(syntax_for("a.spec.ts"), Syntax::Typescript(TsSyntax { tsx: false, .. })));
        assert!(matches!(syntax_for("a.spec.mts"), Syntax::Typescript(TsSyntax { tsx: false, .. })));
        assert!(matches!(syntax_for("a.spec.jsx"), Syntax::Es(EsSyntax { jsx: true, .. })));
        assert!(matches!(syntax_for("a.spec.JS"), Syntax::Es(EsSyntax { jsx: false, .. })));
        assert!(matches!(syntax_for("a.test.mjs"), Syntax::Es(EsSyntax { jsx: false, .. })));
        assert!(matches!(syntax_for("a.test.cjs"), Syntax::Es(EsSyntax { jsx: false, .. })));
    }

    #[test]
    fn it_parses_scripts_as_javascript() {
        let source_map: Lrc<SourceMap> = Default::default();
        let (module, _) = parse_test_file(
            &source_map,
            "compare.spec.js",
            "function f(a, b, c) { return a < b > (c); }",
        )
        .expect("should parse");

        let ModuleItem::Stmt(Stmt::Decl(Decl::Fn(fn_decl))) = &module.body[0] else {
            panic!("Expected a function declaration");
        };
        let body = fn_decl.function.body.as_ref().expect("function has a body");
        let Stmt::Return(ReturnStmt { arg: Some(arg), .. }) = &body.stmts[0] else {
            panic!("Expected a return statement");
        };

        // `(a < b) > (c)`, not `a<b>(c)`
        assert!(matches!(
            arg.as_ref(),
            Expr::Bin(BinExpr {
                op: BinaryOp::Gt,
                ..
            })
        ));

        let typed = parse_test_file(&source_map, "typed.spec.js", "const n: number = 1;");
        assert!(matches!(typed, Err(CompileError::Parse { .. })));
    }

    #[test]
    fn it_reports_the_failing_line() {
        let source_map: Lrc<SourceMap> = Default::default();
        let result = parse_test_file(&source_map, "broken.spec.ts", "const a = 1;\nconst = ;\n");

        match result {
            Err(CompileError::Parse { filename, line, .. }) => {
                assert_eq!(filename, "broken.spec.ts");
                assert_eq!(line, 2);
            }
            other => panic!("Expected a parse error, got {:?}", other.map(|_| ())),
        }
    }
}
