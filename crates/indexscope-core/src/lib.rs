pub mod builder;
pub mod error;
pub mod figure;
pub mod layout;
pub mod render;
pub mod types;

// Re-export main types and functions
pub use builder::build_graph;
pub use error::BuildError;
pub use figure::{build_figure, Figure, FigureEdge, FigureNode};
pub use layout::{compute_layout, Layout, LayoutOptions, Point, DEFAULT_SEED};
pub use render::{render, RenderOptions, RenderResult};

// Re-export types explicitly
pub use types::{
    // Issue codes
    issue_codes,
    node_id,
    EdgeKind,
    GraphEdge,
    GraphNode,
    IndexColumn,
    IndexGraph,
    IndexMeta,
    IndexMethod,
    Issue,
    NodeKind,
    SchemaCatalog,
    Severity,
    StatisticsRow,
    TableIndexes,
};
