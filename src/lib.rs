pub mod alignment;
pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod ingest;
pub mod market;
pub mod storage;

pub use error::{CmError, Result};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
