// tool-guard-core/src/interfaces/mod.rs
// ============================================================================
// Module: Tool Guard Interfaces
// Description: Backend-agnostic contracts for logging and cancellation.
// Purpose: Define the surfaces the validation runtime uses without hard
//          dependencies on any sink or runtime.
// Dependencies: serde_json, thiserror
// ============================================================================

//! ## Overview
//! The core carries no logging dependency: diagnostics flow through the
//! [`GuardLogger`] trait so deployments can plug in `tracing`, a test
//! collector, or nothing at all. The core emits only `warn`-level messages,
//! and only when a policy condition fails to compile or evaluate.
//! Cancellation is a cooperative flag checked between policy evaluations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Logger Contract
// ============================================================================

/// Logger severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Informational messages.
    Info,
    /// Recoverable anomalies; the only level the core emits.
    Warn,
    /// Failures reported by collaborators.
    Error,
}

impl LogLevel {
    /// Returns a stable label for the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Diagnostic sink for the validation runtime.
pub trait GuardLogger: Send + Sync {
    /// Records an informational message.
    fn info(&self, message: &str);

    /// Records a recoverable anomaly.
    fn warn(&self, message: &str);

    /// Records a failure.
    fn error(&self, message: &str);

    /// Records a structured entry with request correlation and fields.
    fn structured(
        &self,
        level: LogLevel,
        message: &str,
        request_id: Option<&str>,
        fields: &Map<String, Value>,
    );
}

/// No-op logger.
///
/// # Invariants
/// - Diagnostics are intentionally discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl GuardLogger for NoopLogger {
    fn info(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}

    fn error(&self, _message: &str) {}

    fn structured(
        &self,
        _level: LogLevel,
        _message: &str,
        _request_id: Option<&str>,
        _fields: &Map<String, Value>,
    ) {
    }
}

// ============================================================================
// SECTION: Cancellation
// ============================================================================

/// Cooperative cancellation flag shared between a caller and a validation.
///
/// # Invariants
/// - Cancellation is one-way: once set, the token stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    /// Shared cancelled flag.
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns true when cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

// ============================================================================
// SECTION: Transient Errors
// ============================================================================

/// Transient validation failures.
///
/// Malformed input never produces these; every such path yields a
/// `ValidationResult` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateError {
    /// The caller cancelled the operation.
    #[error("validation cancelled")]
    Cancelled,
}
