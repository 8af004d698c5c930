//! Catalog error types.
//!
//! Scoring itself defines no failure modes: empty or odd input degrades to
//! zero-valued results. Errors only arise when building a catalog from
//! external data, and are typed here so callers can report the offending
//! field without string matching.

use thiserror::Error;

/// Errors that can occur while building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A rule pattern failed to compile.
    #[error("invalid rule pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A concept category string was not recognized.
    #[error("unknown concept category: {0}")]
    UnknownCategory(String),

    /// A severity string was not recognized.
    #[error("unknown severity: {0}")]
    UnknownSeverity(String),
}
