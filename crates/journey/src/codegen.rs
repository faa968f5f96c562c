use std::io;

use swc_core::{
    common::{comments::SingleThreadedComments, sync::Lrc, SourceMap},
    ecma::ast::{EsVersion, Module},
};
use swc_ecma_codegen::{text_writer::JsWriter, Emitter, Node};

use crate::CompileError;

/// Emits the module as readable code, together with its comments
pub fn stringify(
    source_map: &Lrc<SourceMap>,
    module: &Module,
    comments: &SingleThreadedComments,
) -> Result<String, CompileError> {
    let mut buff: Vec<u8> = Vec::with_capacity(1024);
    let writer: JsWriter<&mut Vec<u8>> = JsWriter::new(source_map.clone(), "\n", &mut buff, None);

    let mut emitter_cfg = swc_ecma_codegen::Config::default();
    emitter_cfg.target = EsVersion::EsNext;

    let mut emitter = Emitter {
        cfg: emitter_cfg,
        cm: source_map.clone(),
        comments: Some(comments),
        wr: writer,
    };

    module.emit_with(&mut emitter).map_err(CompileError::Codegen)?;

    String::from_utf8(buff)
        .map_err(|e| CompileError::Codegen(io::Error::new(io::ErrorKind::InvalidData, e)))
}
