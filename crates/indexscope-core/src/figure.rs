//! Render adapter: graph + layout → a displayable figure specification.
//!
//! The figure is renderer-agnostic: positioned nodes with label, hover
//! text, size, and color value, plus edge line segments. Color values are
//! raw degrees; the display surface maps them through `colorscale`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::layout::Layout;
use crate::types::{IndexGraph, NodeKind};

/// Figure title, matching the original tool's chart heading.
const TITLE: &str = "MySQL Index Structure Visualization";

/// A positioned, visually encoded node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FigureNode {
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub hover_text: String,
    /// Marker diameter; grows with the square root of degree.
    pub size: f64,
    /// Color value; the display maps it through the figure colorscale.
    pub color: f64,
}

/// An edge rendered as a line segment between node centers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FigureEdge {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// Everything a display surface needs to draw one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Figure {
    pub title: String,
    /// Named sequential colorscale for the degree encoding.
    pub colorscale: String,
    /// Darker end of the scale maps to higher degree.
    pub reversescale: bool,
    pub nodes: Vec<FigureNode>,
    pub edges: Vec<FigureEdge>,
    /// Explanatory message shown instead of a graph when there is nothing
    /// meaningful to draw (e.g. a table with no indexes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// Marker size from degree: monotonic, square-root damped so hub nodes do
/// not dwarf the rest.
fn node_size(degree: usize) -> f64 {
    12.0 + 8.0 * (degree as f64).sqrt()
}

fn hover_text(node_kind: &NodeKind, label: &str) -> String {
    match node_kind {
        NodeKind::Index {
            method,
            cardinality,
            size_mb,
            ..
        } => format!(
            "Index: {name}<br>Type: {method}<br>Cardinality: {cardinality}<br>Index Size: {size_mb} MB",
            name = label
                .split_once(" (")
                .map(|(name, _)| name)
                .unwrap_or(label),
        ),
        NodeKind::Table | NodeKind::Column => label.to_string(),
    }
}

/// Map a graph and its layout into a figure.
///
/// `layout.positions` must be parallel to `graph.nodes`; the builder and
/// [`crate::layout::compute_layout`] guarantee that.
pub fn build_figure(graph: &IndexGraph, layout: &Layout) -> Figure {
    debug_assert_eq!(graph.nodes.len(), layout.positions.len());

    let nodes: Vec<FigureNode> = graph
        .nodes
        .iter()
        .zip(&layout.positions)
        .map(|(node, pos)| FigureNode {
            x: pos.x,
            y: pos.y,
            label: node.label.clone(),
            hover_text: hover_text(&node.kind, &node.label),
            size: node_size(node.degree),
            color: node.degree as f64,
        })
        .collect();

    let edges: Vec<FigureEdge> = graph
        .edges
        .iter()
        .filter_map(|edge| {
            let from = graph.node_position(&edge.from)?;
            let to = graph.node_position(&edge.to)?;
            Some(FigureEdge {
                x0: layout.positions[from].x,
                y0: layout.positions[from].y,
                x1: layout.positions[to].x,
                y1: layout.positions[to].y,
            })
        })
        .collect();

    let placeholder = if graph.has_indexes() {
        None
    } else {
        Some(format!(
            "Table `{}` has no indexes to visualize",
            graph.table
        ))
    };

    Figure {
        title: TITLE.to_string(),
        colorscale: "YlGnBu".to_string(),
        reversescale: true,
        nodes,
        edges,
        placeholder,
    }
}
