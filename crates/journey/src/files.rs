//! Everything around the transformation which touches the file system:
//! finding the test files, naming and writing the journeys.

use std::{
    ffi::OsStr,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use journey_core::{CompatibilityTables, Diagnostic};
use log::{debug, error, info};
use rayon::prelude::*;
use regex::RegexBuilder;
use tempfile::NamedTempFile;
use walkdir::{DirEntry, WalkDir};

use crate::{compile, CompileError, CompileOptions};

/// Test files of the source framework, matched case-insensitively against the relative path
pub const DEFAULT_PATTERN: &str = r".+\.(test|spec)\.([mc]?[jt]sx?)$";

const IGNORED_DIR: &str = "node_modules";

const JOURNEY: &str = "journey";

/// Outcome of converting one file
#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub code: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Lists the test files under `root`, sorted by path.
///
/// A `root` which is a file is returned as is, whatever the pattern says.
/// Directories named `node_modules` are never entered.
pub fn discover_test_files(root: &Path, pattern: Option<&str>) -> Result<Vec<PathBuf>, CompileError> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let pattern = RegexBuilder::new(pattern.unwrap_or(DEFAULT_PATTERN))
        .case_insensitive(true)
        .build()?;

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_ignored_dir(entry));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);

        if pattern.is_match(&relative.to_string_lossy()) {
            files.push(path.to_path_buf());
        } else {
            debug!("Skipping {}", path.display());
        }
    }

    Ok(files)
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.eq_ignore_ascii_case(IGNORED_DIR))
}

/// `login.spec.ts` -> `login.journey.ts`, in the same directory.
///
/// The first `test` or `spec` of the file name (any case) is replaced.
/// A name without either gets `.journey` before its extension.
pub fn journey_output_path(input: &Path) -> PathBuf {
    let Some(file_name) = input.file_name().and_then(OsStr::to_str) else {
        return input.with_extension(JOURNEY);
    };

    // ASCII lowercasing keeps the byte offsets
    let lowercase = file_name.to_ascii_lowercase();
    let first_match = [lowercase.find("test"), lowercase.find("spec")]
        .into_iter()
        .flatten()
        .min();

    let output_name = match first_match {
        Some(start) => {
            let mut output_name = String::with_capacity(file_name.len() + 3);
            output_name.push_str(&file_name[..start]);
            output_name.push_str(JOURNEY);
            output_name.push_str(&file_name[start + 4..]);
            output_name
        }
        None => match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => format!("{stem}.{JOURNEY}.{ext}"),
            _ => format!("{file_name}.{JOURNEY}"),
        },
    };

    input.with_file_name(output_name)
}

/// Writes through a temporary file in the target directory,
/// so that a failed write never leaves a truncated journey behind
pub fn write_output(path: &Path, code: &str) -> Result<(), CompileError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| CompileError::io(dir, e))?;
    temp_file
        .write_all(code.as_bytes())
        .map_err(|e| CompileError::io(temp_file.path(), e))?;
    temp_file
        .persist(path)
        .map_err(|e| CompileError::io(path, e.error))?;

    Ok(())
}

/// Reads, converts and writes a single file
pub fn transform_file(input: &Path, tables: &CompatibilityTables) -> Result<FileReport, CompileError> {
    let source = fs::read_to_string(input).map_err(|e| CompileError::io(input, e))?;

    let filename = input.to_string_lossy();
    let result = compile(
        &source,
        CompileOptions {
            filename: &filename,
            tables,
        },
    )?;

    let output = journey_output_path(input);
    write_output(&output, &result.code)?;
    info!("{} -> {}", input.display(), output.display());

    Ok(FileReport {
        input: input.to_path_buf(),
        output,
        code: result.code,
        diagnostics: result.diagnostics,
    })
}

/// Converts every file independently on the rayon pool.
/// Results keep the order of `inputs`; one failing file does not stop the others.
pub fn transform_files(
    inputs: &[PathBuf],
    tables: &CompatibilityTables,
) -> Vec<Result<FileReport, CompileError>> {
    inputs
        .par_iter()
        .map(|input| {
            let result = transform_file(input, tables);
            if let Err(ref e) = result {
                error!("{}: {e}", input.display());
            }
            result
        })
        .collect()
}
