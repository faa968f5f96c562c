use swc_core::{
    common::{comments::SingleThreadedComments, sync::Lrc, FileName, SourceMap},
    ecma::ast::{EsVersion, Module},
};
use swc_ecma_parser::{lexer::Lexer, Parser, StringInput, Syntax, TsSyntax};

pub struct ParsedModule {
    pub module: Module,
    pub comments: SingleThreadedComments,
    pub source_map: Lrc<SourceMap>,
}

pub const TEST_FILENAME: &str = "example.spec.ts";

pub fn parse_typescript_module(input: &str) -> ParsedModule {
    let source_map: Lrc<SourceMap> = Default::default();
    let source_file = source_map.new_source_file(
        Lrc::new(FileName::Custom(TEST_FILENAME.to_owned())),
        input.to_owned(),
    );

    let comments = SingleThreadedComments::default();

    let lexer = Lexer::new(
        Syntax::Typescript(TsSyntax::default()),
        EsVersion::EsNext,
        StringInput::from(&*source_file),
        Some(&comments),
    );

    let mut parser = Parser::new_from(lexer);

    let module = parser
        .parse_module()
        .expect("test input is expected to be parseable");

    ParsedModule {
        module,
        comments,
        source_map,
    }
}
