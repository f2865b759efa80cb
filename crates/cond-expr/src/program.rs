// cond-expr/src/program.rs
// ============================================================================
// Module: Compiled Programs
// Description: Compilation pipeline and evaluation environment.
// Purpose: Tie parsing, schema checks, and evaluation into one artifact.
// Dependencies: crate::{ast, error, eval, parser, schema}, serde_json
// ============================================================================

//! ## Overview
//! A [`Program`] is a parsed, schema-checked expression. Compilation fails
//! closed: unknown identifiers and non-boolean expressions never reach the
//! interpreter. Programs are immutable and safe to share across threads.

use serde_json::Map;
use serde_json::Value;

use crate::ast::Expr;
use crate::error::CompileError;
use crate::error::EvalError;
use crate::eval;
use crate::parser;
use crate::schema::EnvSchema;

/// Shared null for missing-key resolution.
static NULL: Value = Value::Null;

// ============================================================================
// SECTION: Evaluation Environment
// ============================================================================

/// Concrete values for one evaluation, keyed by environment root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Env {
    /// Root name to value tree.
    roots: Map<String, Value>,
}

impl Env {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a root value, replacing any prior entry.
    pub fn set_root(&mut self, name: impl Into<String>, value: Value) {
        self.roots.insert(name.into(), value);
    }

    /// Resolves a dotted path to a value.
    ///
    /// Missing keys resolve to JSON null rather than failing: the schema has
    /// already admitted the path, and open roots legitimately lack keys.
    #[must_use]
    pub fn get_path(&self, path: &[String]) -> &Value {
        let mut current = match path.first().and_then(|root| self.roots.get(root)) {
            Some(value) => value,
            None => return &NULL,
        };
        for segment in &path[1..] {
            current = match current {
                Value::Object(fields) => fields.get(segment).unwrap_or(&NULL),
                _ => return &NULL,
            };
        }
        current
    }
}

// ============================================================================
// SECTION: Program
// ============================================================================

/// A compiled, schema-checked boolean expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Verbatim source text the program was compiled from.
    source: String,
    /// Checked expression tree.
    expr: Expr,
}

impl Program {
    /// Compiles source text against an environment schema.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] on syntax errors, identifiers outside the
    /// schema, or a non-boolean expression root.
    pub fn compile(source: &str, schema: &EnvSchema) -> Result<Self, CompileError> {
        let expr = parser::parse(source)?;

        let mut path_error = None;
        expr.visit_paths(&mut |path| {
            if path_error.is_none()
                && let Err(error) = schema.check_path(path)
            {
                path_error = Some(error);
            }
        });
        if let Some(error) = path_error {
            return Err(error);
        }

        if !expr.is_boolean() {
            return Err(CompileError::NotBoolean);
        }

        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    /// Returns the verbatim source the program was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluates the program against an environment.
    ///
    /// Deterministic and side-effect free: the same environment always
    /// produces the same result.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError`] on runtime type failures (undefined orderings,
    /// non-array membership targets, non-boolean operands).
    pub fn evaluate(&self, env: &Env) -> Result<bool, EvalError> {
        eval::eval_bool(&self.expr, env)
    }
}
