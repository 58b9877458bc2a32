//! Project configuration.
//!
//! An optional `esdown.json` lists inputs and output settings:
//!
//! ```json
//! {
//!   "files": ["src/a.js", "src/b.js"],
//!   "outDir": "dist",
//!   "diagnosticsFormat": "json"
//! }
//! ```
//!
//! Paths in the file are relative to the directory holding it. Command-line
//! values override the file. A directory input stands for every `.js` file
//! below it.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::args::{CliArgs, DiagnosticsFormat};

/// File name looked up when `--project` names a directory.
pub const CONFIG_FILE_NAME: &str = "esdown.json";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EsdownConfig {
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub out_dir: Option<String>,
    #[serde(default)]
    pub diagnostics_format: Option<DiagnosticsFormat>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to list inputs under {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("no input files; pass files or a project with a \"files\" list")]
    NoInputs,
}

/// Options after merging the command line over the project file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub files: Vec<PathBuf>,
    /// Directory output paths are made relative to: the project file's
    /// directory, or the working directory.
    pub root_dir: PathBuf,
    pub out_dir: Option<PathBuf>,
    pub diagnostics_format: DiagnosticsFormat,
}

/// Parse the project file at `path`.
pub fn load_config(path: &Path) -> Result<EsdownConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_config(text: &str) -> Result<EsdownConfig, serde_json::Error> {
    serde_json::from_str(text)
}

/// `project` itself, or its `esdown.json` when it is a directory.
#[must_use]
pub fn resolve_project_path(project: &Path) -> PathBuf {
    if project.is_dir() {
        project.join(CONFIG_FILE_NAME)
    } else {
        project.to_path_buf()
    }
}

/// Merge `args` over the project file. Without `--project` and without
/// input files, `esdown.json` in `cwd` is used when present.
pub fn resolve_options(args: &CliArgs, cwd: &Path) -> Result<ResolvedOptions, ConfigError> {
    let project = match &args.project {
        Some(project) => Some(resolve_project_path(&cwd.join(project))),
        None if args.files.is_empty() => {
            let candidate = cwd.join(CONFIG_FILE_NAME);
            candidate.is_file().then_some(candidate)
        }
        None => None,
    };

    let (config, base_dir) = match &project {
        Some(path) => {
            debug!(path = %path.display(), "loading project config");
            let config = load_config(path)?;
            let base_dir = path.parent().unwrap_or(cwd).to_path_buf();
            (config, base_dir)
        }
        None => (EsdownConfig::default(), cwd.to_path_buf()),
    };

    let inputs: Vec<PathBuf> = if args.files.is_empty() {
        config.files.iter().map(|f| base_dir.join(f)).collect()
    } else {
        args.files.iter().map(|f| cwd.join(f)).collect()
    };
    let files = expand_inputs(inputs)?;
    if files.is_empty() {
        return Err(ConfigError::NoInputs);
    }

    let out_dir = match (&args.out_dir, &config.out_dir) {
        (Some(dir), _) => Some(cwd.join(dir)),
        (None, Some(dir)) => Some(base_dir.join(dir)),
        (None, None) => None,
    };
    let diagnostics_format = args
        .diagnostics_format
        .or(config.diagnostics_format)
        .unwrap_or_default();

    Ok(ResolvedOptions {
        files,
        root_dir: base_dir,
        out_dir,
        diagnostics_format,
    })
}

/// Replace every directory in `inputs` with the `.js` files below it, in
/// file name order.
pub fn expand_inputs(inputs: Vec<PathBuf>) -> Result<Vec<PathBuf>, ConfigError> {
    let mut files = Vec::with_capacity(inputs.len());
    for input in inputs {
        if !input.is_dir() {
            files.push(input);
            continue;
        }
        for entry in WalkDir::new(&input).sort_by_file_name() {
            let entry = entry.map_err(|source| ConfigError::Walk {
                path: input.clone(),
                source,
            })?;
            let is_js = entry.path().extension().is_some_and(|ext| ext == "js");
            if entry.file_type().is_file() && is_js {
                files.push(entry.into_path());
            }
        }
    }
    Ok(files)
}
