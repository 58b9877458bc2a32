//! Command-line support for the `esdown` binary.
//!
//! - `args`: command-line flags
//! - `config`: the optional `esdown.json` project file and option resolution
//! - `driver`: reads, lowers and prints compilation units in parallel
//! - `reporter`: renders diagnostics as text or JSON
//! - `tracing_config`: opt-in `tracing` subscriber setup

pub mod args;
pub mod config;
pub mod driver;
pub mod reporter;
pub mod tracing_config;

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod args_tests;
#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
#[cfg(test)]
#[path = "tests/reporter_tests.rs"]
mod reporter_tests;
