//! Force-directed node placement.
//!
//! Fruchterman–Reingold: nodes repel each other, edges pull their endpoints
//! together, displacement is capped by a cooling temperature. The random
//! initial placement is seeded, so a fixed seed yields identical positions
//! for identical graphs. Final positions are rescaled into the unit box
//! [-1, 1]² for the render layer.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::IndexGraph;

#[cfg(feature = "tracing")]
use tracing::trace;

/// Seed matching the original tool's fixed layout seed.
pub const DEFAULT_SEED: u64 = 42;

const DEFAULT_ITERATIONS: usize = 60;

/// Knobs for the spring layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    /// RNG seed for the initial placement.
    pub seed: u64,
    /// Simulation steps.
    pub iterations: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// A 2D position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Node positions, parallel to `IndexGraph::nodes`.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub positions: Vec<Point>,
    /// True when the graph was too small for the simulation and a trivial
    /// fixed placement was used instead.
    pub fallback: bool,
}

/// Compute positions for every node of the graph.
///
/// Degenerate graphs (zero or one node) take the trivial layout; this never
/// fails.
pub fn compute_layout(graph: &IndexGraph, options: &LayoutOptions) -> Layout {
    let n = graph.nodes.len();

    if n <= 1 {
        return Layout {
            positions: vec![Point::default(); n],
            fallback: true,
        };
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut positions: Vec<Point> = (0..n)
        .map(|_| Point {
            x: rng.random_range(-0.5..0.5),
            y: rng.random_range(-0.5..0.5),
        })
        .collect();

    // Edge list as node-slot pairs; edges always resolve since the builder
    // only emits edges between existing nodes.
    let edge_slots: Vec<(usize, usize)> = graph
        .edges
        .iter()
        .filter_map(|e| {
            Some((
                graph.node_position(&e.from)?,
                graph.node_position(&e.to)?,
            ))
        })
        .collect();

    let k = (1.0 / n as f64).sqrt();
    let iterations = options.iterations.max(1);

    for step in 0..iterations {
        let temperature = 0.1 * (1.0 - step as f64 / iterations as f64) + 1e-3;
        let mut disp = vec![Point::default(); n];

        // Repulsion between every pair.
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = positions[i].x - positions[j].x;
                let dy = positions[i].y - positions[j].y;
                let dist = (dx * dx + dy * dy).sqrt().max(1e-6);
                let force = k * k / dist;
                let (fx, fy) = (dx / dist * force, dy / dist * force);
                disp[i].x += fx;
                disp[i].y += fy;
                disp[j].x -= fx;
                disp[j].y -= fy;
            }
        }

        // Attraction along edges.
        for &(a, b) in &edge_slots {
            let dx = positions[a].x - positions[b].x;
            let dy = positions[a].y - positions[b].y;
            let dist = (dx * dx + dy * dy).sqrt().max(1e-6);
            let force = dist * dist / k;
            let (fx, fy) = (dx / dist * force, dy / dist * force);
            disp[a].x -= fx;
            disp[a].y -= fy;
            disp[b].x += fx;
            disp[b].y += fy;
        }

        // Move, capped by the cooling temperature.
        for i in 0..n {
            let len = (disp[i].x * disp[i].x + disp[i].y * disp[i].y)
                .sqrt()
                .max(1e-6);
            let capped = len.min(temperature);
            positions[i].x += disp[i].x / len * capped;
            positions[i].y += disp[i].y / len * capped;
        }
    }

    rescale_to_unit_box(&mut positions);

    #[cfg(feature = "tracing")]
    trace!(nodes = n, iterations, "computed spring layout");

    Layout {
        positions,
        fallback: false,
    }
}

/// Fit positions into [-1, 1]², preserving aspect ratio.
fn rescale_to_unit_box(positions: &mut [Point]) {
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in positions.iter() {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    let span = (max_x - min_x).max(max_y - min_y);
    if span <= f64::EPSILON {
        return;
    }

    let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
    let scale = 2.0 / span;
    for p in positions.iter_mut() {
        p.x = (p.x - cx) * scale;
        p.y = (p.y - cy) * scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EdgeKind, GraphEdge, GraphNode, IndexGraph};

    fn star_graph(leaves: usize) -> IndexGraph {
        let mut nodes = vec![GraphNode::table("table:t".into(), "t".into())];
        let mut edges = Vec::new();
        for i in 0..leaves {
            let id = format!("index:t.i{i}");
            nodes.push(GraphNode::column(id.clone(), format!("i{i}")));
            edges.push(GraphEdge {
                from: "table:t".into(),
                to: id,
                kind: EdgeKind::TableToIndex,
            });
        }
        IndexGraph {
            schema: "s".into(),
            table: "t".into(),
            nodes,
            edges,
        }
    }

    #[test]
    fn test_empty_graph_falls_back() {
        let graph = IndexGraph {
            schema: "s".into(),
            table: "t".into(),
            nodes: vec![],
            edges: vec![],
        };
        let layout = compute_layout(&graph, &LayoutOptions::default());
        assert!(layout.fallback);
        assert!(layout.positions.is_empty());
    }

    #[test]
    fn test_single_node_is_centered() {
        let graph = star_graph(0);
        let layout = compute_layout(&graph, &LayoutOptions::default());
        assert!(layout.fallback);
        assert_eq!(layout.positions, vec![Point::default()]);
    }

    #[test]
    fn test_same_seed_same_positions() {
        let graph = star_graph(5);
        let a = compute_layout(&graph, &LayoutOptions::default());
        let b = compute_layout(&graph, &LayoutOptions::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let graph = star_graph(5);
        let a = compute_layout(&graph, &LayoutOptions::default());
        let b = compute_layout(
            &graph,
            &LayoutOptions {
                seed: 7,
                ..Default::default()
            },
        );
        assert_ne!(a.positions, b.positions);
    }

    #[test]
    fn test_positions_fit_unit_box() {
        let graph = star_graph(8);
        let layout = compute_layout(&graph, &LayoutOptions::default());
        assert!(!layout.fallback);
        for p in &layout.positions {
            assert!(p.x >= -1.0 - 1e-9 && p.x <= 1.0 + 1e-9);
            assert!(p.y >= -1.0 - 1e-9 && p.y <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn test_nodes_are_separated() {
        let graph = star_graph(4);
        let layout = compute_layout(&graph, &LayoutOptions::default());
        for i in 0..layout.positions.len() {
            for j in (i + 1)..layout.positions.len() {
                let dx = layout.positions[i].x - layout.positions[j].x;
                let dy = layout.positions[i].y - layout.positions[j].y;
                assert!(
                    (dx * dx + dy * dy).sqrt() > 1e-3,
                    "nodes {i} and {j} collapsed onto each other"
                );
            }
        }
    }
}
