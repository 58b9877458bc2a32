//! Integration tests for the compilation driver.

use esdown_cli::args::DiagnosticsFormat;
use esdown_cli::config::ResolvedOptions;
use esdown_cli::driver::{compile, list_features, lower_source};
use esdown_common::FeatureSet;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_source(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn options(files: Vec<PathBuf>, out_dir: Option<PathBuf>) -> ResolvedOptions {
    let root_dir = files
        .first()
        .and_then(|f| f.parent())
        .map(Path::to_path_buf)
        .unwrap_or_default();
    ResolvedOptions {
        files,
        root_dir,
        out_dir,
        diagnostics_format: DiagnosticsFormat::Text,
    }
}

#[test]
fn test_lower_source_prints_lowered_program() {
    let result = lower_source("a.js", "class C { static x = 1; }");
    assert!(result.diagnostics.is_empty());
    assert_eq!(result.output.as_deref(), Some("class C {}\nC.x = 1;\n"));
    assert_eq!(result.summary.classes_lowered, 1);
    assert!(!result.features.intersects(FeatureSet::ES2022_CLASS_MEMBERS));
}

#[test]
fn test_generated_names_use_the_unit_tag() {
    let result = lower_source("src/my-file.js", "class C { x = 1; }");
    let output = result.output.unwrap_or_default();
    assert!(output.contains("$esdown$mem$func$name$my_file$0"), "{output}");
}

#[test]
fn test_syntax_errors_skip_lowering() {
    let result = lower_source("a.js", "class C { static x = ; }");
    assert!(result.has_errors());
    assert!(result.output.is_none());
    assert_eq!(result.summary.classes_lowered, 0);
    assert!(result.diagnostics.iter().all(|d| d.file == "a.js"));
}

#[test]
fn test_fatal_diagnostic_suppresses_output() {
    let result = lower_source("a.js", "class C { static x = super.y; }");
    assert_eq!(
        result.diagnostics.iter().map(|d| d.code).collect::<Vec<_>>(),
        vec![9001]
    );
    assert!(result.output.is_none());
}

#[test]
fn test_deferred_diagnostic_keeps_output() {
    let result = lower_source("a.js", "class C { static { this.x = 1; } }");
    assert!(result.has_errors());
    assert_eq!(result.diagnostics[0].code, 9002);
    assert!(result.output.is_some());
    assert!(result.features.contains(FeatureSet::CLASS_STATIC_BLOCK));
}

#[test]
fn test_units_keep_input_order_and_independent_ids() {
    let temp = TempDir::new().unwrap();
    let files: Vec<PathBuf> = (0..8)
        .map(|i| write_source(temp.path(), &format!("m{i}.js"), "class C { x = 1; }"))
        .collect();

    let result = compile(&options(files.clone(), None)).unwrap();
    assert_eq!(result.units.len(), files.len());
    for (i, unit) in result.units.iter().enumerate() {
        assert_eq!(unit.path, files[i]);
        let output = unit.result.output.as_deref().unwrap_or_default();
        assert!(
            output.contains(&format!("$esdown$mem$func$name$m{i}$0")),
            "{output}"
        );
    }
    assert!(result.emitted_files.is_empty());
    assert!(!result.has_errors());
}

#[test]
fn test_out_dir_receives_lowered_files() {
    let temp = TempDir::new().unwrap();
    let input = write_source(temp.path(), "a.js", "class C { static x = 1; }");
    let broken = write_source(temp.path(), "b.js", "class C { static x = super.y; }");
    let out_dir = temp.path().join("out");

    let result = compile(&options(vec![input, broken], Some(out_dir.clone()))).unwrap();
    assert_eq!(result.emitted_files, vec![out_dir.join("a.js")]);
    assert_eq!(
        std::fs::read_to_string(out_dir.join("a.js")).unwrap(),
        "class C {}\nC.x = 1;\n"
    );
    assert!(!out_dir.join("b.js").exists());
    assert!(result.has_errors());
    assert_eq!(result.diagnostics().count(), 1);
}

#[test]
fn test_out_dir_mirrors_layout_below_root() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("src/lib")).unwrap();
    let top = write_source(temp.path(), "src/a.js", "var a = 1;");
    let nested = write_source(temp.path(), "src/lib/b.js", "var b = 2;");
    let out_dir = temp.path().join("dist");

    let mut opts = options(vec![top, nested], Some(out_dir.clone()));
    opts.root_dir = temp.path().join("src");
    let result = compile(&opts).unwrap();
    assert_eq!(
        result.emitted_files,
        vec![out_dir.join("a.js"), out_dir.join("lib/b.js")]
    );
    assert_eq!(
        std::fs::read_to_string(out_dir.join("lib/b.js")).unwrap(),
        "var b = 2;\n"
    );
}

#[test]
fn test_input_reached_through_parent_dir_stays_inside_out_dir() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("app")).unwrap();
    std::fs::create_dir_all(temp.path().join("lib")).unwrap();
    write_source(temp.path(), "lib/a.js", "var a = 1;");
    let input = temp.path().join("app/../lib/a.js");
    let out_dir = temp.path().join("app/out");

    let mut opts = options(vec![input], Some(out_dir.clone()));
    opts.root_dir = temp.path().join("app");
    let result = compile(&opts).unwrap();
    assert_eq!(result.emitted_files, vec![out_dir.join("a.js")]);
    assert_eq!(
        std::fs::read_to_string(out_dir.join("a.js")).unwrap(),
        "var a = 1;\n"
    );
    assert!(!temp.path().join("app/lib").exists());
}

#[test]
fn test_outputs_colliding_outside_root_are_an_error() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("one")).unwrap();
    std::fs::create_dir_all(temp.path().join("two")).unwrap();
    std::fs::create_dir_all(temp.path().join("app")).unwrap();
    let first = write_source(temp.path(), "one/a.js", "var a = 1;");
    let second = write_source(temp.path(), "two/a.js", "var a = 2;");
    let out_dir = temp.path().join("out");

    let mut opts = options(vec![first, second], Some(out_dir.clone()));
    opts.root_dir = temp.path().join("app");
    let error = compile(&opts).unwrap_err();
    assert!(error.to_string().contains("would both be written to"), "{error}");
    assert!(!out_dir.join("a.js").exists());
}

#[test]
fn test_missing_input_is_an_error() {
    let temp = TempDir::new().unwrap();
    let result = compile(&options(vec![temp.path().join("missing.js")], None));
    assert!(result.is_err());
}

#[test]
fn test_list_features_reports_parsed_features() {
    let temp = TempDir::new().unwrap();
    let path = write_source(temp.path(), "a.js", "class C { x = 1; static {} }");

    let listed = list_features(&options(vec![path.clone()], None)).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].0, path);
    let features = listed[0].1;
    assert!(features.contains(FeatureSet::CLASSES));
    assert!(features.contains(FeatureSet::PUBLIC_CLASS_FIELDS));
    assert!(features.contains(FeatureSet::CLASS_STATIC_BLOCK));
}
