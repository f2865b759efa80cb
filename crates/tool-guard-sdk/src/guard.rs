// tool-guard-sdk/src/guard.rs
// ============================================================================
// Module: Guard Façade
// Description: Concurrency-safe handle over the validation core.
// Purpose: Serialize configuration loads, admit concurrent validations, and
//          synthesize call identity on entry.
// Dependencies: tool-guard-core, crate::{loader, logging}
// ============================================================================

//! ## Overview
//! One reader/writer lock guards the registries: `load_schemas` and
//! `load_policies` take the writer lock, `validate_tool_call` takes the
//! reader lock. Schema reloads are last-writer-wins per name; policy
//! reloads clear the registry first so a reload produces exactly the
//! policies in the file. Validation accepts calls in any state: with no
//! policies everything falls through to the default allow, with no schemas
//! everything rejects as unknown.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::sync::Arc;
use std::sync::RwLock;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use thiserror::Error;
use tool_guard_config::ConfigError;
use tool_guard_core::CancelToken;
use tool_guard_core::GuardLogger;
use tool_guard_core::PolicyEngine;
use tool_guard_core::PolicyRegistry;
use tool_guard_core::SchemaRegistry;
use tool_guard_core::Timestamp;
use tool_guard_core::ToolCall;
use tool_guard_core::ToolCallId;
use tool_guard_core::ValidateError;
use tool_guard_core::ValidationResult;
use tool_guard_core::Validator;

use crate::loader::PolicyLoader;
use crate::loader::SchemaLoader;
use crate::loader::YamlPolicyLoader;
use crate::loader::YamlSchemaLoader;
use crate::logging::TracingLogger;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Guard operation failures.
///
/// Malformed tool calls never produce these; every such call yields a
/// [`ValidationResult`] instead.
#[derive(Debug, Error)]
pub enum GuardError {
    /// The caller cancelled the operation.
    #[error("operation cancelled")]
    Cancelled,

    /// The guard lock was poisoned by a panicking writer.
    #[error("guard state lock poisoned")]
    LockPoisoned,

    /// Configuration loading failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<ValidateError> for GuardError {
    fn from(error: ValidateError) -> Self {
        match error {
            ValidateError::Cancelled => Self::Cancelled,
        }
    }
}

// ============================================================================
// SECTION: Guard State
// ============================================================================

/// Registries guarded by the façade lock.
#[derive(Default)]
struct GuardState {
    /// Registered tool schemas.
    schemas: SchemaRegistry,
    /// Registered policies.
    policies: PolicyRegistry,
}

// ============================================================================
// SECTION: Guard
// ============================================================================

/// Embeddable, concurrency-safe tool-call guard.
pub struct Guard {
    /// Registries; writer lock for loads, reader lock for validation.
    state: RwLock<GuardState>,
    /// Validator with its policy engine and condition cache.
    validator: Validator,
    /// Schema source.
    schema_loader: Box<dyn SchemaLoader>,
    /// Policy source.
    policy_loader: Box<dyn PolicyLoader>,
    /// Counter for synthesized call identifiers.
    next_call_id: AtomicU64,
}

impl Default for Guard {
    fn default() -> Self {
        Self::new()
    }
}

impl Guard {
    /// Creates a guard with the default YAML loaders and tracing logger.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns a builder for customizing loaders and logging.
    #[must_use]
    pub fn builder() -> GuardBuilder {
        GuardBuilder::default()
    }

    /// Loads tool schemas from the source, replacing entries per name.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError`] when the loader fails, the operation is
    /// cancelled, or the lock is poisoned.
    pub fn load_schemas(&self, source: &Path, cancel: &CancelToken) -> Result<(), GuardError> {
        if cancel.is_cancelled() {
            return Err(GuardError::Cancelled);
        }
        let schemas = self.schema_loader.load(source)?;

        let mut state = self.state.write().map_err(|_| GuardError::LockPoisoned)?;
        for schema in schemas {
            state.schemas.register(schema);
        }
        Ok(())
    }

    /// Loads policies from the source, replacing all prior policies.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError`] when the loader fails, the operation is
    /// cancelled, or the lock is poisoned.
    pub fn load_policies(&self, source: &Path, cancel: &CancelToken) -> Result<(), GuardError> {
        if cancel.is_cancelled() {
            return Err(GuardError::Cancelled);
        }
        let policies = self.policy_loader.load(source)?;

        let mut state = self.state.write().map_err(|_| GuardError::LockPoisoned)?;
        state.policies.clear_all();
        for policy in policies {
            state.policies.register(policy);
        }
        Ok(())
    }

    /// Validates a tool call against the loaded schemas and policies.
    ///
    /// Missing `id` and `timestamp` are synthesized on entry. Malformed
    /// calls never error; every such call yields a result.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError`] only for cancellation or a poisoned lock.
    pub fn validate_tool_call(
        &self,
        call: ToolCall,
        cancel: &CancelToken,
    ) -> Result<ValidationResult, GuardError> {
        if cancel.is_cancelled() {
            return Err(GuardError::Cancelled);
        }
        let call = self.admit(call);

        let state = self.state.read().map_err(|_| GuardError::LockPoisoned)?;
        let result = self.validator.validate(&state.schemas, &state.policies, &call, cancel)?;
        Ok(result)
    }

    /// Renders the registered schemas as a canonical YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError`] when the lock is poisoned or serialization
    /// fails.
    pub fn export_schemas(&self) -> Result<String, GuardError> {
        let state = self.state.read().map_err(|_| GuardError::LockPoisoned)?;
        Ok(tool_guard_config::schema_document_yaml(state.schemas.all_schemas())?)
    }

    /// Renders the registered policies as a canonical YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError`] when the lock is poisoned or serialization
    /// fails.
    pub fn export_policies(&self) -> Result<String, GuardError> {
        let state = self.state.read().map_err(|_| GuardError::LockPoisoned)?;
        Ok(tool_guard_config::policy_document_yaml(state.policies.all_policies())?)
    }

    /// Clears the compiled-condition cache.
    pub fn clear_condition_cache(&self) {
        self.validator.engine().clear_cache();
    }

    /// Fills in missing call identity.
    fn admit(&self, mut call: ToolCall) -> ToolCall {
        if call.id.is_none() {
            let serial = self.next_call_id.fetch_add(1, Ordering::Relaxed);
            call.id = Some(ToolCallId::new(format!("call_{serial}")));
        }
        if call.timestamp.is_none() {
            call.timestamp = Some(Timestamp::from_unix_millis(now_unix_millis()));
        }
        call
    }
}

/// Returns the current wall-clock time as unix milliseconds.
fn now_unix_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builder for [`Guard`] construction options.
#[derive(Default)]
pub struct GuardBuilder {
    /// Replacement schema loader.
    schema_loader: Option<Box<dyn SchemaLoader>>,
    /// Replacement policy loader.
    policy_loader: Option<Box<dyn PolicyLoader>>,
    /// Replacement diagnostic sink.
    logger: Option<Arc<dyn GuardLogger>>,
}

impl GuardBuilder {
    /// Replaces the schema loader.
    #[must_use]
    pub fn schema_loader(mut self, loader: impl SchemaLoader + 'static) -> Self {
        self.schema_loader = Some(Box::new(loader));
        self
    }

    /// Replaces the policy loader.
    #[must_use]
    pub fn policy_loader(mut self, loader: impl PolicyLoader + 'static) -> Self {
        self.policy_loader = Some(Box::new(loader));
        self
    }

    /// Replaces the diagnostic sink.
    #[must_use]
    pub fn logger(mut self, logger: Arc<dyn GuardLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Builds the guard.
    #[must_use]
    pub fn build(self) -> Guard {
        let logger = self.logger.unwrap_or_else(|| Arc::new(TracingLogger));
        Guard {
            state: RwLock::new(GuardState::default()),
            validator: Validator::new(PolicyEngine::new(logger)),
            schema_loader: self.schema_loader.unwrap_or_else(|| Box::new(YamlSchemaLoader)),
            policy_loader: self.policy_loader.unwrap_or_else(|| Box::new(YamlPolicyLoader)),
            next_call_id: AtomicU64::new(1),
        }
    }
}
