// cond-expr/tests/cache.rs
// ============================================================================
// Module: Program Cache Tests
// Description: Cache hit, clear, and concurrency tests.
// Purpose: Ensure cached compilation never alters semantics.
// Dependencies: cond-expr, serde_json
// ============================================================================
//! ## Overview
//! Validates that cache hits return the installed program, that clearing
//! forces recompilation, and that concurrent callers all observe a working
//! program.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::sync::Arc;

use cond_expr::CompileError;
use cond_expr::Env;
use cond_expr::EnvSchema;
use cond_expr::ProgramCache;
use serde_json::json;

fn schema() -> EnvSchema {
    EnvSchema::new().with_fixed_root("user", ["role"]).with_open_root("params")
}

// ============================================================================
// SECTION: Hit and Clear Behavior
// ============================================================================

/// Verifies a second lookup returns the installed program.
#[test]
fn cache_hit_returns_same_program() {
    let cache = ProgramCache::new();
    let first = cache.get_or_compile("user.role == 'admin'", &schema()).unwrap();
    let second = cache.get_or_compile("user.role == 'admin'", &schema()).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

/// Verifies a cache hit evaluates identically to a fresh compile.
#[test]
fn cache_hit_preserves_semantics() {
    let cache = ProgramCache::new();
    let mut env = Env::new();
    env.set_root("user", json!({"role": "admin"}));

    let fresh = cache.get_or_compile("user.role == 'admin'", &schema()).unwrap();
    let cached = cache.get_or_compile("user.role == 'admin'", &schema()).unwrap();
    assert_eq!(fresh.evaluate(&env), cached.evaluate(&env));
    assert_eq!(cached.evaluate(&env), Ok(true));
}

/// Verifies compile failures are returned and not cached.
#[test]
fn cache_does_not_store_failures() {
    let cache = ProgramCache::new();
    let error = cache.get_or_compile("nope.field == 1", &schema()).unwrap_err();
    assert!(matches!(error, CompileError::UnknownIdentifier { .. }));
    assert!(cache.is_empty());
}

/// Verifies clearing empties the cache and recompilation still works.
#[test]
fn cache_clear_forces_recompile() {
    let cache = ProgramCache::new();
    cache.get_or_compile("params.x == 1", &schema()).unwrap();
    assert_eq!(cache.len(), 1);

    cache.clear();
    assert!(cache.is_empty());

    let program = cache.get_or_compile("params.x == 1", &schema()).unwrap();
    let mut env = Env::new();
    env.set_root("params", json!({"x": 1}));
    assert_eq!(program.evaluate(&env), Ok(true));
}

// ============================================================================
// SECTION: Concurrency
// ============================================================================

/// Verifies concurrent lookups of the same source all succeed.
#[test]
fn cache_concurrent_lookups() {
    let cache = Arc::new(ProgramCache::new());
    let schema = Arc::new(schema());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let schema = Arc::clone(&schema);
            std::thread::spawn(move || {
                let program = cache.get_or_compile("params.x == 1", &schema).unwrap();
                let mut env = Env::new();
                env.set_root("params", json!({"x": 1}));
                assert_eq!(program.evaluate(&env), Ok(true));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(cache.len(), 1);
}
