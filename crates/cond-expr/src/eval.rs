// cond-expr/src/eval.rs
// ============================================================================
// Module: Expression Interpreter
// Description: Tree-walking evaluation over serde_json values.
// Purpose: Deterministic, side-effect-free semantics with typed failures.
// Dependencies: crate::{ast, error, program}, serde_json
// ============================================================================

//! ## Overview
//! Equality is deep JSON equality with numeric promotion (`1 == 1.0` holds).
//! Ordering is defined for numbers and strings only. Membership and `len`
//! require arrays. Anything else is a typed [`EvalError`]; callers treat the
//! condition as not matched.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde_json::Number;
use serde_json::Value;

use crate::ast::CompareOp;
use crate::ast::Expr;
use crate::error::EvalError;
use crate::program::Env;

// ============================================================================
// SECTION: Boolean Evaluation
// ============================================================================

/// Evaluates an expression that must produce a boolean.
pub(crate) fn eval_bool(expr: &Expr, env: &Env) -> Result<bool, EvalError> {
    match expr {
        Expr::Bool(value) => Ok(*value),
        Expr::Not(inner) => Ok(!eval_bool(inner, env)?),
        Expr::And(lhs, rhs) => {
            if !eval_bool(lhs, env)? {
                return Ok(false);
            }
            eval_bool(rhs, env)
        }
        Expr::Or(lhs, rhs) => {
            if eval_bool(lhs, env)? {
                return Ok(true);
            }
            eval_bool(rhs, env)
        }
        Expr::Compare {
            op,
            lhs,
            rhs,
        } => {
            let left = eval_value(lhs, env)?;
            let right = eval_value(rhs, env)?;
            compare(*op, &left, &right)
        }
        Expr::In {
            needle,
            haystack,
        } => {
            let needle = eval_value(needle, env)?;
            let haystack = eval_value(haystack, env)?;
            let Value::Array(items) = haystack.as_ref() else {
                return Err(EvalError::NotAnArray {
                    found: type_name(&haystack),
                });
            };
            Ok(items.iter().any(|item| value_eq(item, &needle)))
        }
        other => {
            let value = eval_value(other, env)?;
            match value.as_ref() {
                Value::Bool(flag) => Ok(*flag),
                _ => Err(EvalError::NotBoolean {
                    found: type_name(&value),
                }),
            }
        }
    }
}

// ============================================================================
// SECTION: Value Evaluation
// ============================================================================

/// Evaluates an expression to a value, borrowing from the environment where
/// possible.
fn eval_value<'env>(expr: &Expr, env: &'env Env) -> Result<Cow<'env, Value>, EvalError> {
    match expr {
        Expr::Bool(value) => Ok(Cow::Owned(Value::Bool(*value))),
        Expr::Int(value) => Ok(Cow::Owned(Value::Number(Number::from(*value)))),
        Expr::Float(value) => {
            // JSON numbers are finite; literals always convert.
            let number = Number::from_f64(*value).unwrap_or_else(|| Number::from(0));
            Ok(Cow::Owned(Value::Number(number)))
        }
        Expr::Str(value) => Ok(Cow::Owned(Value::String(value.clone()))),
        Expr::Path(segments) => Ok(Cow::Borrowed(env.get_path(segments))),
        Expr::Len(inner) => {
            let value = eval_value(inner, env)?;
            let Value::Array(items) = value.as_ref() else {
                return Err(EvalError::LenArgument {
                    found: type_name(&value),
                });
            };
            let length = i64::try_from(items.len()).unwrap_or(i64::MAX);
            Ok(Cow::Owned(Value::Number(Number::from(length))))
        }
        boolean => {
            let result = eval_bool(boolean, env)?;
            Ok(Cow::Owned(Value::Bool(result)))
        }
    }
}

/// Applies a comparison operator to two values.
fn compare(op: CompareOp, left: &Value, right: &Value) -> Result<bool, EvalError> {
    match op {
        CompareOp::Eq => Ok(value_eq(left, right)),
        CompareOp::Ne => Ok(!value_eq(left, right)),
        CompareOp::Lt => Ok(value_cmp(left, right)? == Ordering::Less),
        CompareOp::Le => Ok(value_cmp(left, right)? != Ordering::Greater),
        CompareOp::Gt => Ok(value_cmp(left, right)? == Ordering::Greater),
        CompareOp::Ge => Ok(value_cmp(left, right)? != Ordering::Less),
    }
}

// ============================================================================
// SECTION: Value Semantics
// ============================================================================

/// Deep equality with numeric promotion across integer and float encodings.
pub(crate) fn value_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => number_eq(a, b),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| value_eq(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter().all(|(key, x)| b.get(key).is_some_and(|y| value_eq(x, y)))
        }
        _ => left == right,
    }
}

/// Ordering for numbers (promoted) and strings (lexicographic).
fn value_cmp(left: &Value, right: &Value) -> Result<Ordering, EvalError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(number_cmp(a, b)),
        (Value::String(a), Value::String(b)) => Ok(a.cmp(b)),
        _ => Err(EvalError::UndefinedOrdering {
            left: type_name_of(left),
            right: type_name_of(right),
        }),
    }
}

/// Numeric equality across i64/u64/f64 encodings.
fn number_eq(a: &Number, b: &Number) -> bool {
    number_cmp(a, b) == Ordering::Equal
}

/// Numeric ordering with exact integer paths and f64 promotion otherwise.
fn number_cmp(a: &Number, b: &Number) -> Ordering {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x.cmp(&y);
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x.cmp(&y);
    }
    let x = a.as_f64().unwrap_or(f64::NAN);
    let y = b.as_f64().unwrap_or(f64::NAN);
    // JSON numbers are finite, so a total order exists.
    x.partial_cmp(&y).unwrap_or(Ordering::Equal)
}

/// Stable type label for diagnostics.
fn type_name_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Type label for borrowed-or-owned values.
fn type_name(value: &Cow<'_, Value>) -> &'static str {
    type_name_of(value.as_ref())
}
