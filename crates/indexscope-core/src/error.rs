//! Error types for graph construction.
//!
//! # Error Handling Strategy
//!
//! Two complementary patterns are used:
//!
//! - [`BuildError`]: fatal conditions that prevent a graph from being built
//!   at all (the selected schema or table does not exist). Returned as
//!   `Result<T, BuildError>` and surfaced to the user as a single message.
//!
//! - [`crate::types::Issue`]: non-fatal findings collected during a render
//!   (a table with zero indexes, a layout fallback). These accompany a
//!   successful result so the caller can still display something useful.

use thiserror::Error;

/// Fatal error while building an index graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The requested schema has no metadata.
    #[error("schema not found: {schema}")]
    SchemaNotFound { schema: String },

    /// The requested table does not exist in the selected schema.
    #[error("table not found: {schema}.{table}")]
    TableNotFound { schema: String, table: String },
}
