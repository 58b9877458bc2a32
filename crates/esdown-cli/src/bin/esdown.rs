#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Write};
use std::process::ExitCode;

use esdown_cli::args::{CliArgs, DiagnosticsFormat};
use esdown_cli::config::{ResolvedOptions, resolve_options};
use esdown_cli::driver::{self, CompilationResult};
use esdown_cli::reporter::Reporter;
use esdown_common::Diagnostic;

const EXIT_SUCCESS: u8 = 0;
/// At least one error diagnostic was reported.
const EXIT_DIAGNOSTICS: u8 = 1;
/// Configuration or I/O failure.
const EXIT_FAILURE: u8 = 2;

fn main() -> ExitCode {
    esdown_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    match run(&args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(args: &CliArgs) -> Result<u8> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let options = resolve_options(args, &cwd)?;

    if args.list_features {
        print_features(&options)?;
        return Ok(EXIT_SUCCESS);
    }

    let result = driver::compile(&options)?;

    let color = args.use_color(std::io::stderr().is_terminal());
    report_diagnostics(&result, &options, color)?;
    if options.out_dir.is_none() {
        print_outputs(&result)?;
    }

    Ok(if result.has_errors() {
        EXIT_DIAGNOSTICS
    } else {
        EXIT_SUCCESS
    })
}

fn report_diagnostics(
    result: &CompilationResult,
    options: &ResolvedOptions,
    color: bool,
) -> Result<()> {
    let mut reporter = Reporter::new(color);
    for unit in &result.units {
        reporter.add_source(&unit.result.file_name, &unit.source);
    }
    let diagnostics: Vec<Diagnostic> = result.diagnostics().cloned().collect();
    match options.diagnostics_format {
        DiagnosticsFormat::Json => {
            let json = reporter
                .render_json(&diagnostics)
                .context("failed to serialize diagnostics")?;
            eprintln!("{json}");
        }
        DiagnosticsFormat::Text if !diagnostics.is_empty() => {
            eprint!("{}", reporter.render(&diagnostics));
        }
        DiagnosticsFormat::Text => {}
    }
    Ok(())
}

fn print_outputs(result: &CompilationResult) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    for unit in &result.units {
        if let Some(output) = &unit.result.output {
            stdout
                .write_all(output.as_bytes())
                .context("failed to write to stdout")?;
        }
    }
    Ok(())
}

fn print_features(options: &ResolvedOptions) -> Result<()> {
    let listed = driver::list_features(options)?;
    let mut stdout = std::io::stdout().lock();
    for (path, features) in listed {
        writeln!(
            stdout,
            "{}: {}",
            path.display(),
            features.feature_names().join(", ")
        )
        .context("failed to write to stdout")?;
    }
    Ok(())
}
