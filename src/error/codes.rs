//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Entity errors
//! - 3xx: Config errors
//! - 5xx: Job market errors
//! - 6xx: Storage errors
//! - 8xx: Validation errors
//! - 9xx: Internal errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for robot mode output.
///
/// Each variant maps to a numeric code (e.g., `EntityNotFound` -> E101).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Entity errors (1xx)
    // ========================================
    /// E101: Requested entity was not found in the store
    EntityNotFound,
    /// E102: A join row references a skill id with no Skill row
    DanglingReference,

    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E302: Config file has invalid syntax or values
    ConfigInvalid,
    /// E304: Required config value is missing
    ConfigMissingRequired,

    // ========================================
    // Job market errors (5xx)
    // ========================================
    /// E501: Job posting catalog could not be loaded
    MarketCatalogInvalid,

    // ========================================
    // Storage errors (6xx)
    // ========================================
    /// E604: Database operation failed
    DatabaseError,
    /// E605: Serialization/deserialization failed
    SerializationError,
    /// E606: Schema migration failed
    MigrationFailed,

    // ========================================
    // Validation errors (8xx)
    // ========================================
    /// E801: Input record failed validation
    InvalidInput,
    /// E802: Batch ingestion failed
    IngestFailed,

    // ========================================
    // Internal errors (9xx)
    // ========================================
    /// E906: IO operation failed
    IoError,
}

impl ErrorCode {
    /// Get the numeric error code (e.g., `EntityNotFound` -> 101).
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::EntityNotFound => 101,
            Self::DanglingReference => 102,

            Self::ConfigInvalid => 302,
            Self::ConfigMissingRequired => 304,

            Self::MarketCatalogInvalid => 501,

            Self::DatabaseError => 604,
            Self::SerializationError => 605,
            Self::MigrationFailed => 606,

            Self::InvalidInput => 801,
            Self::IngestFailed => 802,

            Self::IoError => 906,
        }
    }

    /// Get the error code as a formatted string (e.g., "E101").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    /// Get the default suggestion for this error code.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::EntityNotFound => "Run `currmap list <kind>` to see the ids currently in the store",
            Self::DanglingReference => "Add the missing skill with `currmap ingest`, or unset `store.strict_references` to drop unknown ids",
            Self::ConfigInvalid => "Check the config file syntax. Run `currmap --config <path> status` to validate it",
            Self::ConfigMissingRequired => "Set the missing value in config.toml or through its CURRMAP_* environment variable",
            Self::MarketCatalogInvalid => "Check that the posting catalog is a JSON or YAML list of {title, required_skills}",
            Self::DatabaseError => "The store may be corrupted or locked by another process. Re-run `currmap init`",
            Self::SerializationError => "Check the input file for syntax errors",
            Self::MigrationFailed => "The store was created by an incompatible version. Move it aside and run `currmap init`",
            Self::InvalidInput => "Fix the offending record and ingest the batch again",
            Self::IngestFailed => "Check the batch file format (.json, .yaml, .yml or .toml)",
            Self::IoError => "Check file permissions and that the path exists",
        }
    }

    /// Check if this error is potentially recoverable by the user.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::EntityNotFound
            | Self::DanglingReference
            | Self::ConfigInvalid
            | Self::ConfigMissingRequired
            | Self::MarketCatalogInvalid
            | Self::SerializationError
            | Self::InvalidInput
            | Self::IngestFailed
            | Self::IoError => true,

            Self::DatabaseError | Self::MigrationFailed => false,
        }
    }

    /// Get the error category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.numeric() / 100 {
            1 => "entity",
            3 => "config",
            5 => "market",
            6 => "storage",
            8 => "validation",
            9 => "internal",
            _ => "unknown",
        }
    }

    /// Iterate over all error codes.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::EntityNotFound,
            Self::DanglingReference,
            Self::ConfigInvalid,
            Self::ConfigMissingRequired,
            Self::MarketCatalogInvalid,
            Self::DatabaseError,
            Self::SerializationError,
            Self::MigrationFailed,
            Self::InvalidInput,
            Self::IngestFailed,
            Self::IoError,
        ]
        .into_iter()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code_string())
    }
}
