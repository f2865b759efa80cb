// tool-guard-core/src/core/schema.rs
// ============================================================================
// Module: Tool Schema Model
// Description: Tool schemas and per-parameter constraints.
// Purpose: Declare the shape every tool call must satisfy before policy
//          evaluation.
// Dependencies: regex, serde, thiserror
// ============================================================================

//! ## Overview
//! A [`ToolSchema`] names a tool and declares its parameters in order.
//! Declaration order is load-bearing: parameter validation reports the first
//! failing parameter in declaration order, so the sequence must survive
//! configuration loading. Schemas are immutable once registered.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::call::ToolName;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Schema construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A parameter pattern failed to compile.
    #[error("invalid pattern '{pattern}': {detail}")]
    InvalidPattern {
        /// Pattern source as written in configuration.
        pattern: String,
        /// Regex engine diagnostic.
        detail: String,
    },
}

// ============================================================================
// SECTION: Parameter Constraints
// ============================================================================

/// Declared parameter value kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    /// Textual value.
    String,
    /// Integer or floating-point value.
    Number,
    /// True/false value.
    Boolean,
}

impl ParameterKind {
    /// Returns the configuration label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

/// Validated full-match regular expression constraint.
///
/// # Invariants
/// - The compiled regex is anchored; a value matches only when the entire
///   string matches the source pattern.
#[derive(Debug, Clone)]
pub struct ParameterPattern {
    /// Pattern source as written in configuration.
    source: String,
    /// Anchored compiled form.
    regex: Regex,
}

impl ParameterPattern {
    /// Compiles a pattern source into an anchored matcher.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidPattern`] when the source does not
    /// compile.
    pub fn new(source: impl Into<String>) -> Result<Self, SchemaError> {
        let source = source.into();
        let anchored = format!("^(?:{source})$");
        let regex = Regex::new(&anchored).map_err(|error| SchemaError::InvalidPattern {
            pattern: source.clone(),
            detail: error.to_string(),
        })?;
        Ok(Self {
            source,
            regex,
        })
    }

    /// Returns the pattern source as written in configuration.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns true when the entire value matches the pattern.
    #[must_use]
    pub fn is_full_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl PartialEq for ParameterPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for ParameterPattern {}

impl fmt::Display for ParameterPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.source.fmt(f)
    }
}

/// One declared parameter with its constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    /// Parameter name.
    pub name: String,
    /// Declared value kind.
    pub kind: ParameterKind,
    /// Whether the parameter must be present.
    pub required: bool,
    /// Allowed values, in declaration order (strings only; empty = any).
    pub allowed_values: Vec<String>,
    /// Full-match pattern constraint (strings only).
    pub pattern: Option<ParameterPattern>,
    /// Maximum byte length (strings only; enforced when > 0).
    pub max_length: Option<usize>,
    /// Minimum byte length (strings only; enforced when > 0).
    pub min_length: Option<usize>,
}

impl ParameterSpec {
    /// Creates an unconstrained parameter of the given kind.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ParameterKind, required: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            required,
            allowed_values: Vec::new(),
            pattern: None,
            max_length: None,
            min_length: None,
        }
    }
}

// ============================================================================
// SECTION: Tool Schema
// ============================================================================

/// Schema for one tool: its name and ordered parameter declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSchema {
    /// Unique tool name.
    pub name: ToolName,
    /// Parameters in declaration order.
    pub parameters: Vec<ParameterSpec>,
}

impl ToolSchema {
    /// Creates a schema with the given parameters.
    #[must_use]
    pub fn new(name: impl Into<ToolName>, parameters: Vec<ParameterSpec>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }

    /// Returns the declared parameter with the given name, if any.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|parameter| parameter.name == name)
    }
}
