//! Graph construction from a schema catalog.
//!
//! For the selected table: one table node; per index one index node and one
//! table→index edge; per covered column one column node (reused when
//! several indexes cover the same column) and one index→column edge.
//! Degree is computed in a second pass once the full topology exists.

use crate::error::BuildError;
use crate::types::{node_id, EdgeKind, GraphEdge, GraphNode, IndexGraph, SchemaCatalog};

#[cfg(feature = "tracing")]
use tracing::debug;

/// Build the index graph for one table of the catalog.
///
/// # Errors
/// Returns [`BuildError::TableNotFound`] when the table is absent from the
/// catalog. A table with zero indexes is not an error; the resulting graph
/// holds the lone table node.
pub fn build_graph(catalog: &SchemaCatalog, table: &str) -> Result<IndexGraph, BuildError> {
    let table_meta = catalog
        .table(table)
        .ok_or_else(|| BuildError::TableNotFound {
            schema: catalog.schema.clone(),
            table: table.to_string(),
        })?;

    let mut nodes: Vec<GraphNode> = Vec::new();
    let mut edges: Vec<GraphEdge> = Vec::new();

    let table_id = node_id::table(&table_meta.name);
    nodes.push(GraphNode::table(table_id.clone(), table_meta.name.clone()));

    for index in &table_meta.indexes {
        let index_id = node_id::index(&table_meta.name, &index.name);
        let uniqueness = if index.unique { "UNIQUE" } else { "NON-UNIQUE" };
        nodes.push(GraphNode::index(
            index_id.clone(),
            format!("{} ({uniqueness})", index.name),
            index.method,
            index.unique,
            index.cardinality,
            index.size_mb,
        ));
        edges.push(GraphEdge {
            from: table_id.clone(),
            to: index_id.clone(),
            kind: EdgeKind::TableToIndex,
        });

        for column in &index.columns {
            let column_id = node_id::column(&table_meta.name, &column.name);
            if !nodes.iter().any(|n| n.id == column_id) {
                nodes.push(GraphNode::column(column_id.clone(), column.name.clone()));
            }
            edges.push(GraphEdge {
                from: index_id.clone(),
                to: column_id,
                kind: EdgeKind::IndexToColumn,
            });
        }
    }

    let mut graph = IndexGraph {
        schema: catalog.schema.clone(),
        table: table_meta.name.clone(),
        nodes,
        edges,
    };

    // Second pass: topology is complete, count incident edges per node.
    let degrees: Vec<usize> = graph
        .nodes
        .iter()
        .map(|node| graph.degree_of(&node.id))
        .collect();
    for (node, degree) in graph.nodes.iter_mut().zip(degrees) {
        node.degree = degree;
    }

    #[cfg(feature = "tracing")]
    debug!(
        schema = %graph.schema,
        table = %graph.table,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "built index graph"
    );

    Ok(graph)
}
