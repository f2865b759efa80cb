// cond-expr/src/error.rs
// ============================================================================
// Module: Expression Error Definitions
// Description: Structured diagnostics for compilation and evaluation.
// Purpose: Keep compile-time and runtime failures distinct and typed.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Compilation errors reject an expression before it can ever run (syntax,
//! unknown identifiers, non-boolean result type). Evaluation errors are
//! runtime type failures; callers treat them as "condition did not match"
//! and fail closed for the offending rule.

use thiserror::Error;

// ============================================================================
// SECTION: Compile Errors
// ============================================================================

/// Errors raised while compiling an expression against an environment schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The source text could not be tokenized or parsed.
    #[error("syntax error at offset {position}: {detail}")]
    Syntax {
        /// Byte offset of the offending token.
        position: usize,
        /// Human-readable description of the failure.
        detail: String,
    },

    /// An identifier does not resolve against the environment schema.
    #[error("unknown identifier: {path}")]
    UnknownIdentifier {
        /// Dotted path as written in the source.
        path: String,
    },

    /// A call names a function outside the builtin allow-list.
    #[error("unknown function: {name}")]
    UnknownFunction {
        /// Function name as written in the source.
        name: String,
    },

    /// The expression does not produce a boolean at its root.
    #[error("expression does not evaluate to a boolean")]
    NotBoolean,
}

// ============================================================================
// SECTION: Evaluation Errors
// ============================================================================

/// Errors raised while evaluating a compiled program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Ordering comparison between values with no defined order.
    #[error("cannot order {left} and {right}")]
    UndefinedOrdering {
        /// Type name of the left operand.
        left: &'static str,
        /// Type name of the right operand.
        right: &'static str,
    },

    /// Membership test against a non-array value.
    #[error("membership target is {found}, expected array")]
    NotAnArray {
        /// Type name of the offending value.
        found: &'static str,
    },

    /// `len` applied to a non-array value.
    #[error("len() expects an array, got {found}")]
    LenArgument {
        /// Type name of the offending value.
        found: &'static str,
    },

    /// A logical operand did not evaluate to a boolean.
    #[error("operand is {found}, expected boolean")]
    NotBoolean {
        /// Type name of the offending value.
        found: &'static str,
    },
}
