// cond-expr/src/cache.rs
// ============================================================================
// Module: Program Cache
// Description: Concurrency-safe cache of compiled programs.
// Purpose: Compile each condition source once per process.
// Dependencies: crate::{error, program, schema}
// ============================================================================

//! ## Overview
//! Programs are cached by verbatim source string behind a reader/writer
//! lock: many concurrent readers on hits, one writer installing a newly
//! compiled program. Duplicate concurrent compilations of the same source
//! are benign; programs are pure and the last writer wins.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::RwLock;

use crate::error::CompileError;
use crate::program::Program;
use crate::schema::EnvSchema;

// ============================================================================
// SECTION: Cache
// ============================================================================

/// Cache of compiled programs keyed by verbatim source.
#[derive(Debug, Default)]
pub struct ProgramCache {
    /// Source string to compiled program.
    programs: RwLock<HashMap<String, Arc<Program>>>,
}

impl ProgramCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached program for the source, compiling on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] when the source fails to compile. Failures
    /// are not cached; a later identical request recompiles.
    pub fn get_or_compile(
        &self,
        source: &str,
        schema: &EnvSchema,
    ) -> Result<Arc<Program>, CompileError> {
        // Cached programs are immutable, so a poisoned lock is still
        // readable.
        let programs = self.programs.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(program) = programs.get(source) {
            return Ok(Arc::clone(program));
        }
        drop(programs);

        let compiled = Arc::new(Program::compile(source, schema)?);

        let mut programs =
            self.programs.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        let entry =
            programs.entry(source.to_string()).or_insert_with(|| Arc::clone(&compiled));
        Ok(Arc::clone(entry))
    }

    /// Removes every cached program.
    pub fn clear(&self) {
        self.programs
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clear();
    }

    /// Returns the number of cached programs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.programs
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Returns true when the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
