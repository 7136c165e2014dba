//! Storage layer for currmap
//!
//! A single SQLite file holds the skill vocabulary, courses, standards and
//! job requirements. Associations live in join tables and are rejoined on
//! every read.

pub mod migrations;
pub mod sqlite;

pub use sqlite::{Database, DroppedReference, KeywordImport, ReferencePolicy, StoreCounts};
