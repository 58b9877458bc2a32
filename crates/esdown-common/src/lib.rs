//! Common types and utilities for the esdown compiler.
//!
//! This crate provides foundational types used across all esdown crates:
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, `DiagnosticSink`)
//! - Per-script language feature sets (`Feature`, `FeatureSet`)
//! - Per-compilation-unit unique identifier supply (`UniqueIdSupplier`)
//! - Traversal limits

// Diagnostics - message table, categories and the sink trait
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSink};

// Language features recorded per script
pub mod features;
pub use features::FeatureSet;

// Unique identifiers scoped to one compilation unit
pub mod unique_id;
pub use unique_id::UniqueIdSupplier;

// Centralized limits and thresholds
pub mod limits;
