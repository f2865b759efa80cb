// cond-expr/src/schema.rs
// ============================================================================
// Module: Environment Schema
// Description: Declares the identifiers an expression may reference.
// Purpose: Fail closed at compile time on unknown roots or fields.
// Dependencies: crate::error
// ============================================================================

//! ## Overview
//! An [`EnvSchema`] enumerates the dotted roots available to expressions.
//! Fixed roots admit exactly their declared fields; open roots admit any
//! key (and nested keys below it). Identifiers outside the schema are a
//! compile error, never a silent false.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::error::CompileError;

// ============================================================================
// SECTION: Schema Model
// ============================================================================

/// Field admission rule for one environment root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSet {
    /// Only the listed fields resolve, at depth exactly two.
    Fixed(BTreeSet<String>),
    /// Any key resolves, at depth two or deeper.
    Open,
}

/// The set of identifiers an expression may reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSchema {
    /// Root name to admission rule.
    roots: BTreeMap<String, FieldSet>,
}

impl EnvSchema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fixed root with the given fields.
    #[must_use]
    pub fn with_fixed_root<const N: usize>(mut self, root: &str, fields: [&str; N]) -> Self {
        let fields = fields.iter().map(|field| (*field).to_string()).collect();
        self.roots.insert(root.to_string(), FieldSet::Fixed(fields));
        self
    }

    /// Adds an open root admitting arbitrary keys.
    #[must_use]
    pub fn with_open_root(mut self, root: &str) -> Self {
        self.roots.insert(root.to_string(), FieldSet::Open);
        self
    }

    /// Returns the declared root names in sorted order.
    pub fn root_names(&self) -> impl Iterator<Item = &str> {
        self.roots.keys().map(String::as_str)
    }

    /// Checks a dotted path against the schema.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::UnknownIdentifier`] when the path names an
    /// unknown root, an undeclared field of a fixed root, or a bare root
    /// without a field.
    pub fn check_path(&self, path: &[String]) -> Result<(), CompileError> {
        let unknown = || CompileError::UnknownIdentifier {
            path: path.join("."),
        };

        let Some(root) = path.first() else {
            return Err(unknown());
        };
        let Some(fields) = self.roots.get(root) else {
            return Err(unknown());
        };
        if path.len() < 2 {
            // Roots are namespaces, not values.
            return Err(unknown());
        }

        match fields {
            FieldSet::Fixed(declared) => {
                if path.len() != 2 || !declared.contains(&path[1]) {
                    return Err(unknown());
                }
                Ok(())
            }
            FieldSet::Open => Ok(()),
        }
    }
}
