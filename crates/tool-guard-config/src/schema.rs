// tool-guard-config/src/schema.rs
// ============================================================================
// Module: Schema Documents
// Description: YAML model and conversions for tool schemas.
// Purpose: Parse schemas.yaml into core schemas preserving declaration
//          order, and render registries back to canonical YAML.
// Dependencies: tool-guard-core, serde, serde_yaml
// ============================================================================

//! ## Overview
//! Schema documents have the shape
//! `{schemas: [{name, parameters: {<name>: {type, required, ...}}}]}`.
//! The `parameters` mapping is kept as a `serde_yaml::Mapping`, which
//! preserves document order; parameter validation reports the first failure
//! in declaration order, so this order must survive loading. Unknown fields
//! inside entries are ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use serde_yaml::Mapping;
use serde_yaml::Value;
use tool_guard_core::ParameterKind;
use tool_guard_core::ParameterPattern;
use tool_guard_core::ParameterSpec;
use tool_guard_core::ToolSchema;

use crate::error::ConfigError;

// ============================================================================
// SECTION: Document Model
// ============================================================================

/// Top-level schema document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Declared tool schemas.
    #[serde(default)]
    pub schemas: Vec<SchemaEntry>,
}

/// One tool schema as written in YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaEntry {
    /// Unique tool name.
    pub name: String,
    /// Parameter declarations in document order.
    #[serde(default)]
    pub parameters: Mapping,
}

/// One parameter declaration as written in YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterEntry {
    /// Declared value kind.
    #[serde(rename = "type")]
    pub kind: ParameterKind,
    /// Whether the parameter must be present.
    #[serde(default)]
    pub required: bool,
    /// Allowed string values.
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
    /// Full-match pattern source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Maximum byte length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Minimum byte length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Loads and parses a schema file.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file cannot be read or the document is
/// invalid.
pub fn load_schema_file(path: &Path) -> Result<Vec<ToolSchema>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|error| ConfigError::Io {
        path: path.display().to_string(),
        detail: error.to_string(),
    })?;
    parse_schema_document(&content)
}

/// Parses a schema document into core schemas.
///
/// # Errors
///
/// Returns [`ConfigError`] on malformed YAML, empty names, non-string
/// parameter keys, unknown kinds, or invalid patterns.
pub fn parse_schema_document(content: &str) -> Result<Vec<ToolSchema>, ConfigError> {
    let document: SchemaDocument =
        serde_yaml::from_str(content).map_err(|error| ConfigError::Yaml {
            detail: error.to_string(),
        })?;

    let mut schemas = Vec::with_capacity(document.schemas.len());
    for entry in &document.schemas {
        schemas.push(schema_from_entry(entry)?);
    }
    Ok(schemas)
}

/// Converts one document entry into a core schema.
fn schema_from_entry(entry: &SchemaEntry) -> Result<ToolSchema, ConfigError> {
    if entry.name.is_empty() {
        return Err(ConfigError::Invalid("schema entry requires a name".to_string()));
    }

    let mut parameters = Vec::with_capacity(entry.parameters.len());
    for (key, value) in &entry.parameters {
        let Value::String(name) = key else {
            return Err(ConfigError::Invalid(format!(
                "schema {}: parameter names must be strings",
                entry.name
            )));
        };
        let declared: ParameterEntry =
            serde_yaml::from_value(value.clone()).map_err(|error| {
                ConfigError::Invalid(format!(
                    "schema {}: parameter {name}: {error}",
                    entry.name
                ))
            })?;
        parameters.push(spec_from_entry(&entry.name, name, &declared)?);
    }

    Ok(ToolSchema::new(entry.name.as_str(), parameters))
}

/// Converts one parameter declaration into a core spec.
fn spec_from_entry(
    schema_name: &str,
    name: &str,
    entry: &ParameterEntry,
) -> Result<ParameterSpec, ConfigError> {
    let pattern = entry
        .pattern
        .as_deref()
        .map(ParameterPattern::new)
        .transpose()
        .map_err(|error| {
            ConfigError::Invalid(format!("schema {schema_name}: parameter {name}: {error}"))
        })?;

    Ok(ParameterSpec {
        name: name.to_string(),
        kind: entry.kind,
        required: entry.required,
        allowed_values: entry.allowed_values.clone(),
        pattern,
        max_length: entry.max_length,
        min_length: entry.min_length,
    })
}

// ============================================================================
// SECTION: Canonical Export
// ============================================================================

/// Renders registered schemas as a canonical YAML document.
///
/// Loading the output again yields the same schemas.
///
/// # Errors
///
/// Returns [`ConfigError::Yaml`] when serialization fails.
pub fn schema_document_yaml<'a>(
    schemas: impl Iterator<Item = &'a ToolSchema>,
) -> Result<String, ConfigError> {
    let document = SchemaDocument {
        schemas: schemas.map(entry_from_schema).collect(),
    };
    serde_yaml::to_string(&document).map_err(|error| ConfigError::Yaml {
        detail: error.to_string(),
    })
}

/// Converts a core schema back into its document entry.
fn entry_from_schema(schema: &ToolSchema) -> SchemaEntry {
    let mut parameters = Mapping::new();
    for spec in &schema.parameters {
        let declared = ParameterEntry {
            kind: spec.kind,
            required: spec.required,
            allowed_values: spec.allowed_values.clone(),
            pattern: spec.pattern.as_ref().map(|pattern| pattern.source().to_string()),
            max_length: spec.max_length,
            min_length: spec.min_length,
        };
        // Serializing a plain struct cannot fail.
        let value = serde_yaml::to_value(&declared).unwrap_or(Value::Null);
        parameters.insert(Value::String(spec.name.clone()), value);
    }
    SchemaEntry {
        name: schema.name.as_str().to_string(),
        parameters,
    }
}
