//! Error handling for currmap.
//!
//! This module provides:
//! - [`CmError`]: The main error enum for all store, analysis and CLI operations
//! - [`ErrorCode`]: Standardized error codes for machine parsing
//! - [`StructuredError`]: Rich error type with suggestions and context

mod codes;
mod suggestions;

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::core::EntityKind;

pub use codes::ErrorCode;
pub use suggestions::suggest_for_error;

/// Main error type for currmap operations.
#[derive(Error, Debug)]
pub enum CmError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing required config: {0}")]
    MissingConfig(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("{kind} '{id}' references unknown skill '{skill_id}'")]
    DanglingReference {
        kind: EntityKind,
        id: String,
        objective_id: Option<String>,
        skill_id: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Ingest error: {0}")]
    Ingest(String),

    #[error("Job market catalog error: {0}")]
    MarketCatalog(String),
}

impl CmError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) | Self::Yaml(_) | Self::Toml(_) => ErrorCode::SerializationError,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::MissingConfig(_) => ErrorCode::ConfigMissingRequired,
            Self::Migration(_) => ErrorCode::MigrationFailed,
            Self::NotFound { .. } => ErrorCode::EntityNotFound,
            Self::DanglingReference { .. } => ErrorCode::DanglingReference,
            Self::InvalidInput(_) => ErrorCode::InvalidInput,
            Self::Ingest(_) => ErrorCode::IngestFailed,
            Self::MarketCatalog(_) => ErrorCode::MarketCatalogInvalid,
        }
    }

    /// Get context information for this error as JSON.
    #[must_use]
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::NotFound { kind, id } => {
                Some(serde_json::json!({ "kind": kind.as_str(), "id": id }))
            }
            Self::DanglingReference {
                kind,
                id,
                objective_id,
                skill_id,
            } => Some(serde_json::json!({
                "kind": kind.as_str(),
                "id": id,
                "objective_id": objective_id,
                "skill_id": skill_id,
            })),
            Self::MissingConfig(key) => Some(serde_json::json!({ "config_key": key })),
            Self::InvalidInput(reason) => Some(serde_json::json!({ "reason": reason })),
            _ => None,
        }
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_cm_error(self)
    }
}

/// A structured error with machine-readable code, suggestion, and context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "ENTITY_NOT_FOUND")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 101)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    /// Additional context for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    /// Whether this error is potentially recoverable by the user
    pub recoverable: bool,

    /// Error category (e.g., "entity", "config", "storage")
    pub category: String,
}

impl StructuredError {
    /// Create a new structured error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            numeric_code: code.numeric(),
            suggestion: code.suggestion().to_string(),
            context: None,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
            code,
            message: message.into(),
        }
    }

    /// Create a structured error from a [`CmError`].
    #[must_use]
    pub fn from_cm_error(err: &CmError) -> Self {
        let code = err.code();
        let context = err.context();
        let suggestion = suggest_for_error(code, context.as_ref());

        Self {
            code,
            numeric_code: code.numeric(),
            message: err.to_string(),
            suggestion,
            context,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
        }
    }

    /// Add context to this error, regenerating the suggestion.
    #[must_use]
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self.suggestion = suggest_for_error(self.code, self.context.as_ref());
        self
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl From<&CmError> for StructuredError {
    fn from(err: &CmError) -> Self {
        Self::from_cm_error(err)
    }
}

/// Result type alias using [`CmError`].
pub type Result<T> = std::result::Result<T, CmError>;
