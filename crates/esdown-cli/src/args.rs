use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

/// CLI arguments for the esdown binary.
#[derive(Parser, Debug)]
#[command(
    name = "esdown",
    version,
    about = "Lower ES2022 class fields and static blocks to ES2021 JavaScript"
)]
pub struct CliArgs {
    /// Path to an esdown.json file or a directory containing one.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    /// Write each lowered file into this directory instead of stdout.
    #[arg(long = "out-dir", alias = "outDir")]
    pub out_dir: Option<PathBuf>,

    /// How diagnostics are written to stderr.
    #[arg(
        long = "diagnostics-format",
        alias = "diagnosticsFormat",
        value_enum,
        ignore_case = true
    )]
    pub diagnostics_format: Option<DiagnosticsFormat>,

    /// Always color text diagnostics.
    #[arg(long, conflicts_with = "no_color")]
    pub pretty: bool,

    /// Never color text diagnostics.
    #[arg(long = "no-color", alias = "noColor")]
    pub no_color: bool,

    /// Print the language features recorded for each input and exit.
    #[arg(long = "list-features", alias = "listFeatures")]
    pub list_features: bool,

    /// Input files.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl CliArgs {
    /// Whether text diagnostics are colored, given whether stderr is a terminal.
    #[must_use]
    pub const fn use_color(&self, stderr_is_terminal: bool) -> bool {
        if self.no_color {
            false
        } else {
            self.pretty || stderr_is_terminal
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticsFormat {
    /// `file:line:col - error ES9001: message`
    #[default]
    Text,
    /// One JSON array of diagnostic objects.
    Json,
}
