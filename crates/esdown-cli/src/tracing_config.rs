//! Tracing configuration.
//!
//! Output format is chosen by `ESDOWN_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented spans and events via `tracing-tree`
//! - `json`: one JSON object per event
//!
//! ```bash
//! ESDOWN_LOG=debug ESDOWN_LOG_FORMAT=tree esdown input.js
//! ESDOWN_LOG="esdown_emitter=trace" esdown input.js
//! ```
//!
//! The subscriber is only installed when `ESDOWN_LOG` (or `RUST_LOG`) is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Parse a `ESDOWN_LOG_FORMAT` value; anything unknown is `Text`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("ESDOWN_LOG_FORMAT").unwrap_or_default())
    }
}

/// `ESDOWN_LOG` takes precedence over `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("ESDOWN_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Install the global subscriber, writing to stderr. Does nothing when
/// neither `ESDOWN_LOG` nor `RUST_LOG` is set.
pub fn init_tracing() {
    if std::env::var("ESDOWN_LOG").is_err() && std::env::var("RUST_LOG").is_err() {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::new(2)
                .with_indent_lines(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
