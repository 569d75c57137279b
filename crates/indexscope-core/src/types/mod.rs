//! Type definitions for the index graph pipeline.

pub mod common;
pub mod graph;
pub mod metadata;

pub use common::{issue_codes, Issue, Severity};
pub use graph::{node_id, EdgeKind, GraphEdge, GraphNode, IndexGraph, NodeKind};
pub use metadata::{
    IndexColumn, IndexMeta, IndexMethod, SchemaCatalog, StatisticsRow, TableIndexes,
};
