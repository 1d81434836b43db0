//! Structured error types for dyntable.
//!
//! The engine degrades gracefully at runtime (bad filter values, unknown
//! column ids and unparseable widths are treated as inactive, never as
//! faults); the only fallible surface is column-set construction.

/// All errors that can occur when building a table engine.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Two column definitions share the same id. Column ids must be unique
    /// within one table instance.
    #[error("duplicate column id: {0}")]
    DuplicateColumnId(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TableError>;
