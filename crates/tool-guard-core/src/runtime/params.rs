// tool-guard-core/src/runtime/params.rs
// ============================================================================
// Module: Parameter Validation
// Description: Per-call enforcement of declared parameter constraints.
// Purpose: Reject calls whose arguments violate the registered schema.
// Dependencies: crate::core, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Validation walks the schema's parameters in declaration order and stops
//! at the first violation, so the failure reported for a given call is
//! deterministic. Checks per parameter: required presence, value kind, then
//! string constraints (max length, min length, pattern, allowed values).
//! Unknown parameter names are accepted silently so evolving callers keep
//! working.

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::core::schema::ParameterKind;
use crate::core::schema::ParameterSpec;
use crate::core::schema::ToolSchema;

// ============================================================================
// SECTION: Violations
// ============================================================================

/// First constraint violation found for a call's parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterViolation {
    /// A required parameter is absent.
    #[error("missing required parameter: {name}")]
    MissingRequired {
        /// Parameter name.
        name: String,
    },

    /// A value does not have the declared kind.
    #[error("parameter {name} should be a {expected}")]
    WrongKind {
        /// Parameter name.
        name: String,
        /// Declared kind label.
        expected: &'static str,
    },

    /// A string exceeds the declared maximum length.
    #[error("parameter {name} exceeds max length {max}")]
    TooLong {
        /// Parameter name.
        name: String,
        /// Declared maximum byte length.
        max: usize,
    },

    /// A string is below the declared minimum length.
    #[error("parameter {name} is shorter than min length {min}")]
    TooShort {
        /// Parameter name.
        name: String,
        /// Declared minimum byte length.
        min: usize,
    },

    /// A string does not fully match the declared pattern.
    #[error("parameter {name} does not match pattern")]
    PatternMismatch {
        /// Parameter name.
        name: String,
    },

    /// A string is outside the declared allowed values.
    #[error("parameter {name} is not an allowed value")]
    NotAllowed {
        /// Parameter name.
        name: String,
    },
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates call parameters against a tool schema.
///
/// # Errors
///
/// Returns the first [`ParameterViolation`] in declaration order.
pub fn validate_parameters(
    schema: &ToolSchema,
    params: &Map<String, Value>,
) -> Result<(), ParameterViolation> {
    for spec in &schema.parameters {
        let Some(value) = params.get(&spec.name) else {
            if spec.required {
                return Err(ParameterViolation::MissingRequired {
                    name: spec.name.clone(),
                });
            }
            continue;
        };
        check_value(spec, value)?;
    }
    Ok(())
}

/// Checks one present value against its declaration.
fn check_value(spec: &ParameterSpec, value: &Value) -> Result<(), ParameterViolation> {
    let wrong_kind = || ParameterViolation::WrongKind {
        name: spec.name.clone(),
        expected: spec.kind.as_str(),
    };

    match spec.kind {
        ParameterKind::String => {
            let Value::String(text) = value else {
                return Err(wrong_kind());
            };
            check_string_constraints(spec, text)
        }
        ParameterKind::Number => {
            // Booleans are a distinct JSON kind and never count as numbers.
            if value.is_number() { Ok(()) } else { Err(wrong_kind()) }
        }
        ParameterKind::Boolean => {
            if value.is_boolean() { Ok(()) } else { Err(wrong_kind()) }
        }
    }
}

/// Applies string-only constraints in declared order.
fn check_string_constraints(spec: &ParameterSpec, text: &str) -> Result<(), ParameterViolation> {
    if let Some(max) = spec.max_length
        && max > 0
        && text.len() > max
    {
        return Err(ParameterViolation::TooLong {
            name: spec.name.clone(),
            max,
        });
    }

    if let Some(min) = spec.min_length
        && min > 0
        && text.len() < min
    {
        return Err(ParameterViolation::TooShort {
            name: spec.name.clone(),
            min,
        });
    }

    if let Some(pattern) = &spec.pattern
        && !pattern.is_full_match(text)
    {
        return Err(ParameterViolation::PatternMismatch {
            name: spec.name.clone(),
        });
    }

    if !spec.allowed_values.is_empty()
        && !spec.allowed_values.iter().any(|allowed| allowed == text)
    {
        return Err(ParameterViolation::NotAllowed {
            name: spec.name.clone(),
        });
    }

    Ok(())
}
