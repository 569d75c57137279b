//! The one-pass render pipeline: catalog → graph → layout → figure.
//!
//! This is the single entry point the CLI and the HTTP API call per
//! selection. All state is request-scoped; nothing persists between calls.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::builder::build_graph;
use crate::error::BuildError;
use crate::figure::{build_figure, Figure};
use crate::layout::{compute_layout, LayoutOptions};
use crate::types::{issue_codes, IndexGraph, Issue, SchemaCatalog};

/// Options for one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub layout: LayoutOptions,
}

impl RenderOptions {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            layout: LayoutOptions {
                seed,
                ..Default::default()
            },
        }
    }
}

/// The complete result of one selection: the graph, its figure, and any
/// non-fatal findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenderResult {
    pub graph: IndexGraph,
    pub figure: Figure,
    pub issues: Vec<Issue>,
}

/// Run the full pipeline for one (schema, table) selection.
///
/// # Errors
/// [`BuildError::TableNotFound`] when the table is absent. A table without
/// indexes succeeds with a placeholder figure and a `NO_INDEXES` issue.
pub fn render(
    catalog: &SchemaCatalog,
    table: &str,
    options: &RenderOptions,
) -> Result<RenderResult, BuildError> {
    let graph = build_graph(catalog, table)?;
    let layout = compute_layout(&graph, &options.layout);
    let figure = build_figure(&graph, &layout);

    let mut issues = Vec::new();
    if !graph.has_indexes() {
        issues.push(
            Issue::info(
                issue_codes::NO_INDEXES,
                format!("table `{table}` has no indexes"),
            )
            .with_table(table),
        );
    }
    if layout.fallback {
        issues.push(Issue::info(
            issue_codes::DEGENERATE_LAYOUT,
            "graph too small for spring layout; using fixed placement",
        ));
    }

    Ok(RenderResult {
        graph,
        figure,
        issues,
    })
}
