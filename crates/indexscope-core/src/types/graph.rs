//! The index structure graph: typed nodes, typed edges, computed degree.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::metadata::IndexMethod;

/// What a graph node represents. Closed sum type; rendering matches
/// exhaustively on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeKind {
    /// The selected table.
    Table,
    /// An index of the selected table, with the statistics shown on hover.
    #[serde(rename_all = "camelCase")]
    Index {
        method: IndexMethod,
        unique: bool,
        cardinality: u64,
        size_mb: f64,
    },
    /// A column covered by at least one index.
    Column,
}

/// A node in the index graph.
///
/// `id` is a composite key (`table:{t}`, `index:{t}.{i}`, `column:{t}.{c}`)
/// so identical index or column names under different tables stay distinct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Unique within one rendered graph.
    pub id: String,

    #[serde(flatten)]
    pub kind: NodeKind,

    /// Display label.
    pub label: String,

    /// Count of incident edges, computed after the full topology exists.
    pub degree: usize,
}

impl GraphNode {
    pub fn table(id: String, label: String) -> Self {
        Self {
            id,
            kind: NodeKind::Table,
            label,
            degree: 0,
        }
    }

    pub fn index(
        id: String,
        label: String,
        method: IndexMethod,
        unique: bool,
        cardinality: u64,
        size_mb: f64,
    ) -> Self {
        Self {
            id,
            kind: NodeKind::Index {
                method,
                unique,
                cardinality,
                size_mb,
            },
            label,
            degree: 0,
        }
    }

    pub fn column(id: String, label: String) -> Self {
        Self {
            id,
            kind: NodeKind::Column,
            label,
            degree: 0,
        }
    }
}

/// The relationship an edge encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Table owns an index.
    TableToIndex,
    /// Index covers a column.
    IndexToColumn,
}

/// An edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

/// The complete graph for one (schema, table) selection.
///
/// Built fresh per selection and discarded on the next; nothing here is
/// cached or incrementally updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexGraph {
    pub schema: String,
    pub table: String,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl IndexGraph {
    /// Degree of a node id, counted from the edge list.
    pub fn degree_of(&self, id: &str) -> usize {
        self.edges
            .iter()
            .filter(|e| e.from == id || e.to == id)
            .count()
    }

    /// Position of a node id in `nodes`.
    pub fn node_position(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    /// True when the graph holds nothing but the table node.
    pub fn has_indexes(&self) -> bool {
        self.nodes
            .iter()
            .any(|n| matches!(n.kind, NodeKind::Index { .. }))
    }
}

/// Composite node-id helpers. Kept in one place so builder, renderers, and
/// tests agree on the format.
pub mod node_id {
    pub fn table(table: &str) -> String {
        format!("table:{table}")
    }

    pub fn index(table: &str, index: &str) -> String {
        format!("index:{table}.{index}")
    }

    pub fn column(table: &str, column: &str) -> String {
        format!("column:{table}.{column}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_kind_serialization() {
        let node = GraphNode::index(
            node_id::index("orders", "PRIMARY"),
            "PRIMARY (UNIQUE)".to_string(),
            IndexMethod::Btree,
            true,
            1000,
            2.5,
        );
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("\"kind\":\"index\""));
        assert!(json.contains("\"method\":\"BTREE\""));

        let back: GraphNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn test_node_ids_are_scoped_by_table() {
        assert_ne!(
            node_id::column("orders", "id"),
            node_id::column("users", "id")
        );
        assert_ne!(
            node_id::index("orders", "PRIMARY"),
            node_id::index("users", "PRIMARY")
        );
    }

    #[test]
    fn test_degree_of_counts_both_endpoints() {
        let graph = IndexGraph {
            schema: "s".into(),
            table: "t".into(),
            nodes: vec![],
            edges: vec![
                GraphEdge {
                    from: "a".into(),
                    to: "b".into(),
                    kind: EdgeKind::TableToIndex,
                },
                GraphEdge {
                    from: "b".into(),
                    to: "c".into(),
                    kind: EdgeKind::IndexToColumn,
                },
            ],
        };
        assert_eq!(graph.degree_of("a"), 1);
        assert_eq!(graph.degree_of("b"), 2);
        assert_eq!(graph.degree_of("missing"), 0);
    }
}
