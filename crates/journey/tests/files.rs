use std::{
    fs,
    path::{Path, PathBuf},
};

use journey::{
    files::{discover_test_files, transform_files},
    CompatibilityTables, CompileError,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const LOGIN_SPEC: &str = r"import { test } from '@playwright/test';

test('login', async ({ page }) => {
    await page.goto('/login');
});
";

fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

fn relative_paths(root: &Path, paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|path| {
            path.strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn it_discovers_test_files_with_the_default_pattern() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "a.spec.ts", LOGIN_SPEC);
    write_file(root, "b.test.js", LOGIN_SPEC);
    write_file(root, "c.ts", LOGIN_SPEC);
    write_file(root, "node_modules/d.spec.ts", LOGIN_SPEC);

    let files = discover_test_files(root, None).unwrap();

    assert_eq!(relative_paths(root, &files), vec!["a.spec.ts", "b.test.js"]);
}

#[test]
fn it_discovers_nested_files_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "z/checkout.SPEC.ts", LOGIN_SPEC);
    write_file(root, "a/login.test.mjs", LOGIN_SPEC);
    write_file(root, "a/packages/node_modules/lib/e.spec.js", LOGIN_SPEC);
    write_file(root, "a/view.spec.tsx", LOGIN_SPEC);

    let files = discover_test_files(root, None).unwrap();

    assert_eq!(
        relative_paths(root, &files),
        vec!["a/login.test.mjs", "a/view.spec.tsx", "z/checkout.SPEC.ts"]
    );
}

#[test]
fn it_uses_a_custom_pattern() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "e2e/login.ts", LOGIN_SPEC);
    write_file(root, "a.spec.ts", LOGIN_SPEC);

    let files = discover_test_files(root, Some(r"^E2E/")).unwrap();
    assert_eq!(relative_paths(root, &files), vec!["e2e/login.ts"]);

    let invalid = discover_test_files(root, Some("(unclosed"));
    assert!(matches!(invalid, Err(CompileError::Pattern(_))));
}

#[test]
fn it_takes_a_single_file_as_is() {
    let temp_dir = TempDir::new().unwrap();
    let file = write_file(temp_dir.path(), "flows/login.ts", LOGIN_SPEC);

    let files = discover_test_files(&file, None).unwrap();

    assert_eq!(files, vec![file]);
}

#[test]
fn it_writes_journey_files() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let input = write_file(root, "login.spec.ts", LOGIN_SPEC);

    let tables = CompatibilityTables::default();
    let results = transform_files(&[input.clone()], &tables);

    assert_eq!(results.len(), 1);
    let report = results.into_iter().next().unwrap().unwrap();
    assert_eq!(report.input, input);
    assert_eq!(report.output, root.join("login.journey.ts"));

    let written = fs::read_to_string(&report.output).unwrap();
    assert_eq!(written, report.code);
    assert!(written.contains("@elastic/synthetics"));
    assert!(written.contains("step(\"login\""));

    // The input is left alone
    assert_eq!(fs::read_to_string(&input).unwrap(), LOGIN_SPEC);
}

#[test]
fn it_keeps_going_after_a_failure() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let broken = write_file(root, "a.spec.ts", "test('a', async () => {");
    let valid = write_file(root, "b.spec.ts", LOGIN_SPEC);
    let missing = root.join("c.spec.ts");

    let tables = CompatibilityTables::default();
    let results = transform_files(&[broken, valid, missing], &tables);

    assert!(matches!(results[0], Err(CompileError::Parse { .. })));
    assert!(results[1].is_ok());
    assert!(matches!(results[2], Err(CompileError::Io { .. })));

    assert!(!root.join("a.journey.ts").exists());
    assert!(root.join("b.journey.ts").exists());
    assert!(!root.join("c.journey.ts").exists());
}
