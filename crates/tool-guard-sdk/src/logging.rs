// tool-guard-sdk/src/logging.rs
// ============================================================================
// Module: Tracing Logger
// Description: GuardLogger implementation over the tracing facade.
// Purpose: Route core diagnostics into the embedder's tracing subscriber.
// Dependencies: tool-guard-core, tracing, serde_json
// ============================================================================

//! ## Overview
//! The core logs through the [`GuardLogger`] trait; this implementation
//! forwards to `tracing` events under the `tool_guard` target. Without an
//! installed subscriber the events are free to discard, so this is the
//! default logger for the SDK guard.

use serde_json::Map;
use serde_json::Value;
use tool_guard_core::GuardLogger;
use tool_guard_core::LogLevel;

// ============================================================================
// SECTION: Tracing Logger
// ============================================================================

/// Logger forwarding guard diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl GuardLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "tool_guard", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "tool_guard", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "tool_guard", "{message}");
    }

    fn structured(
        &self,
        level: LogLevel,
        message: &str,
        request_id: Option<&str>,
        fields: &Map<String, Value>,
    ) {
        let request_id = request_id.unwrap_or("");
        let fields = Value::Object(fields.clone());
        match level {
            LogLevel::Info => {
                tracing::info!(target: "tool_guard", request_id, %fields, "{message}");
            }
            LogLevel::Warn => {
                tracing::warn!(target: "tool_guard", request_id, %fields, "{message}");
            }
            LogLevel::Error => {
                tracing::error!(target: "tool_guard", request_id, %fields, "{message}");
            }
        }
    }
}
