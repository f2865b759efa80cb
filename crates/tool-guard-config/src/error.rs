// tool-guard-config/src/error.rs
// ============================================================================
// Module: Config Error Definitions
// Description: Loader-facing configuration failures.
// Purpose: Surface file, parse, and semantic errors to callers; these never
//          arise on the validation path.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Configuration failures are returned to the caller that requested the
//! load. A file that parses but declares impossible constraints (an invalid
//! regex, an unknown kind) is rejected whole; partially applied
//! configuration would be worse than none.

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {detail}")]
    Io {
        /// Path as given by the caller.
        path: String,
        /// Underlying I/O diagnostic.
        detail: String,
    },

    /// The document is not valid YAML for the expected shape.
    #[error("invalid yaml: {detail}")]
    Yaml {
        /// Parser diagnostic.
        detail: String,
    },

    /// The document parsed but an entry is semantically invalid.
    #[error("{0}")]
    Invalid(String),
}
