use clap::Parser;
use std::path::{Path, PathBuf};

use crate::args::{CliArgs, DiagnosticsFormat};

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["esdown"]).expect("default args should parse");

    assert!(args.project.is_none());
    assert!(args.out_dir.is_none());
    assert_eq!(args.diagnostics_format, None);
    assert!(!args.pretty);
    assert!(!args.no_color);
    assert!(!args.list_features);
    assert!(args.files.is_empty());
}

#[test]
fn parses_common_flags() {
    let args = CliArgs::try_parse_from([
        "esdown",
        "--project",
        "configs/esdown.json",
        "--out-dir",
        "dist",
        "--diagnostics-format",
        "JSON",
        "--pretty",
        "src/a.js",
        "src/b.js",
    ])
    .expect("flagged args should parse");

    assert_eq!(
        args.project.as_deref(),
        Some(Path::new("configs/esdown.json"))
    );
    assert_eq!(args.out_dir.as_deref(), Some(Path::new("dist")));
    assert_eq!(args.diagnostics_format, Some(DiagnosticsFormat::Json));
    assert!(args.pretty);
    assert_eq!(
        args.files,
        vec![PathBuf::from("src/a.js"), PathBuf::from("src/b.js")]
    );
}

#[test]
fn accepts_camel_case_aliases() {
    let args = CliArgs::try_parse_from([
        "esdown",
        "--outDir",
        "out",
        "--diagnosticsFormat",
        "text",
        "--noColor",
        "--listFeatures",
    ])
    .expect("aliases should parse");

    assert_eq!(args.out_dir.as_deref(), Some(Path::new("out")));
    assert_eq!(args.diagnostics_format, Some(DiagnosticsFormat::Text));
    assert!(args.no_color);
    assert!(args.list_features);
}

#[test]
fn pretty_conflicts_with_no_color() {
    assert!(CliArgs::try_parse_from(["esdown", "--pretty", "--no-color"]).is_err());
}

#[test]
fn color_follows_flags_then_terminal() {
    let plain = CliArgs::try_parse_from(["esdown"]).expect("args should parse");
    assert!(plain.use_color(true));
    assert!(!plain.use_color(false));

    let pretty = CliArgs::try_parse_from(["esdown", "--pretty"]).expect("args should parse");
    assert!(pretty.use_color(false));

    let no_color = CliArgs::try_parse_from(["esdown", "--no-color"]).expect("args should parse");
    assert!(!no_color.use_color(true));
}
