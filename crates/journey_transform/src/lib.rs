#[macro_use]
extern crate lazy_static;

pub mod atoms;
mod calls;
mod diagnostics;
pub mod hooks;
pub mod imports;
pub mod normalize;
pub mod rewrite;
mod statements;
mod structs;
mod utils;

#[cfg(test)]
mod test_utils;

use journey_core::Diagnostic;
use log::trace;
use swc_core::ecma::{ast::Module, visit::VisitMutWith};

pub use structs::*;

use hooks::collect_hooks;
use imports::collect_top_level_bindings;
use normalize::normalize_tests;
use rewrite::Rewriter;

/// Converts a parsed test module into a journey module in place.
///
/// Diagnostics about removed or commented out code are appended to `diagnostics`.
pub fn transform_test_module(
    module: &mut Module,
    options: TransformOptions<'_>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut ctx = TransformContext::new(options);

    ctx.hooks = collect_hooks(module, options.tables);
    trace!("{}: collected hooks {:?}", options.filename, ctx.hooks);

    ctx.bindings = collect_top_level_bindings(module);

    module.visit_mut_with(&mut Rewriter::new(&mut ctx));
    trace!("{}: rewrote imports and calls", options.filename);

    normalize_tests(module);
    trace!("{}: normalized tests", options.filename);

    diagnostics.append(&mut ctx.diagnostics);
}
