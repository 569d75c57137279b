//! Mermaid diagram output for the index graph.

use indexscope_core::{EdgeKind, IndexGraph, NodeKind};
use std::fmt::Write;

/// Render the graph as a Mermaid flowchart.
pub fn format_mermaid(graph: &IndexGraph) -> String {
    let mut out = String::from("flowchart TD\n");

    for node in &graph.nodes {
        let id = sanitize_id(&node.id);
        let label = escape_label(&node.label);
        match node.kind {
            NodeKind::Table => writeln!(out, "    {id}[(\"{label}\")]").unwrap(),
            NodeKind::Index { .. } => writeln!(out, "    {id}[\"{label}\"]").unwrap(),
            NodeKind::Column => writeln!(out, "    {id}([\"{label}\"])").unwrap(),
        }
    }

    for edge in &graph.edges {
        let from = sanitize_id(&edge.from);
        let to = sanitize_id(&edge.to);
        match edge.kind {
            EdgeKind::TableToIndex => writeln!(out, "    {from} --> {to}").unwrap(),
            EdgeKind::IndexToColumn => writeln!(out, "    {from} -.-> {to}").unwrap(),
        }
    }

    out
}

fn sanitize_id(id: &str) -> String {
    id.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn escape_label(label: &str) -> String {
    label.replace('"', "#quot;").replace('\n', " ")
}
