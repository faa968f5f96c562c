//! The main public crate of the journey converter.
//!
//! Converts a Playwright test file into an Elastic Synthetics journey:
//!
//! ```
//! use journey::{compile, CompileOptions};
//! use journey_core::CompatibilityTables;
//!
//! let source = r#"
//! import { test, expect } from '@playwright/test';
//!
//! test('home', async ({ page }) => {
//!     await page.goto('https://example.com');
//! });
//! "#;
//!
//! let tables = CompatibilityTables::default();
//! let result = compile(
//!     source,
//!     CompileOptions {
//!         filename: "home.spec.ts",
//!         tables: &tables,
//!     },
//! )
//! .unwrap();
//!
//! assert!(result.code.contains("@elastic/synthetics"));
//! assert!(result.code.contains("step(\"home\""));
//! ```

pub mod codegen;
pub mod errors;
pub mod files;
pub mod parser;

use journey_transform::{transform_test_module, TransformOptions};
use swc_core::common::{sync::Lrc, SourceMap};

pub use errors::CompileError;
pub use journey_core::*;

use codegen::stringify;
use parser::parse_test_file;

/// Per-file options of [`compile`]
#[derive(Clone, Copy)]
pub struct CompileOptions<'o> {
    /// Used for diagnostics and to choose the syntax (`.tsx`, `.jsx`)
    pub filename: &'o str,
    pub tables: &'o CompatibilityTables,
}

pub struct CompileResult {
    pub code: String,
    /// Everything removed or commented out during the conversion
    pub diagnostics: Vec<Diagnostic>,
}

/// Parses, transforms and stringifies a single test file
pub fn compile(source: &str, options: CompileOptions) -> Result<CompileResult, CompileError> {
    let source_map: Lrc<SourceMap> = Default::default();
    let (mut module, comments) = parse_test_file(&source_map, options.filename, source)?;

    let mut diagnostics = Vec::new();
    transform_test_module(
        &mut module,
        TransformOptions {
            filename: options.filename,
            tables: options.tables,
            source_map: &source_map,
            comments: &comments,
        },
        &mut diagnostics,
    );

    let code = stringify(&source_map, &module, &comments)?;

    Ok(CompileResult { code, diagnostics })
}
