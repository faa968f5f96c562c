pub mod parser;

use journey_core::{CompatibilityTables, Diagnostic};
use swc_core::common::{sync::Lrc, SourceMap};
use swc_ecma_codegen::{text_writer::JsWriter, Emitter, Node};

use crate::{transform_test_module, TransformOptions};

use self::parser::{parse_typescript_module, ParsedModule, TEST_FILENAME};

pub fn to_str(swc_node: &impl Node) -> String {
    // Emitting the result requires some setup with SWC
    let cm: Lrc<SourceMap> = Default::default();
    let mut buff: Vec<u8> = Vec::with_capacity(128);
    let writer: JsWriter<&mut Vec<u8>> = JsWriter::new(cm.clone(), "\n", &mut buff, None);

    let mut emitter_cfg = swc_ecma_codegen::Config::default();
    emitter_cfg.minify = true;

    let mut emitter = Emitter {
        cfg: emitter_cfg,
        comments: None,
        wr: writer,
        cm,
    };

    let _ = swc_node.emit_with(&mut emitter);

    String::from_utf8(buff).unwrap()
}

/// Parses `input`, runs all the passes and stringifies the result minified
pub fn transform_ts(input: &str) -> (String, Vec<Diagnostic>) {
    let ParsedModule {
        mut module,
        comments,
        source_map,
    } = parse_typescript_module(input);

    let tables = CompatibilityTables::default();
    let mut diagnostics = Vec::new();
    transform_test_module(
        &mut module,
        TransformOptions {
            filename: TEST_FILENAME,
            tables: &tables,
            source_map: &source_map,
            comments: &comments,
        },
        &mut diagnostics,
    );

    (to_str(&module), diagnostics)
}

/// Stringifies `expected` the same way as [`transform_ts`] does
pub fn ts(expected: &str) -> String {
    to_str(&parse_typescript_module(expected).module)
}
