//! Layered ("dot"-style) graph layout.
//!
//! [`LayoutEngine::layout`] turns a parsed [`DotGraph`] into a
//! [`LaidOutGraph`]: node boxes and cubic-Bezier edge chains positioned in
//! layout space, where Y grows upward from the bottom-left corner of the
//! bounding box. The canvas module flips into surface coordinates when
//! drawing; everything here stays Y-up.
//!
//! The pipeline is the classic layered approach: `rank` breaks cycles and
//! assigns ranks, `order` reduces edge crossings within ranks, `coords`
//! places boxes, and `splines` routes the edges.

mod coords;
mod order;
mod rank;
mod splines;

use serde::Serialize;

use crate::dot::DotGraph;
use crate::geometry::{Point, Rect};

/// Layout parameters, in layout units (treated as pixels 1:1).
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Vertical gap between adjacent ranks of nodes.
    pub ranksep: f64,
    /// Minimum horizontal gap between boxes within a rank.
    pub nodesep: f64,
    /// Padding between the drawing and the bounding box on all sides.
    pub margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            ranksep: 36.0,
            nodesep: 18.0,
            margin: 8.0,
        }
    }
}

/// A graph whose layout has been computed.
///
/// Owns every node box and spline; dropping it releases the whole layout.
/// Coordinates are in Y-up layout space and the bounding box spans
/// `(0, 0)..(width, height)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaidOutGraph {
    pub nodes: Vec<LayoutNode>,
    pub width: f64,
    pub height: f64,
}

impl LaidOutGraph {
    /// Bounding box as a rectangle anchored at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Look up a node by name.
    pub fn node(&self, name: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Total number of edges across all nodes.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum()
    }
}

/// A positioned node box, asymmetric around its center on the x axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutNode {
    pub name: String,
    /// Display text; the node name when no `label` attribute was given.
    pub label: String,
    /// Box center in layout space.
    pub center: Point,
    /// Distance from the center to the left edge.
    pub left_width: f64,
    /// Distance from the center to the right edge.
    pub right_width: f64,
    /// Full box height.
    pub height: f64,
    /// Outgoing edges; an edge belongs to exactly one source node.
    pub edges: Vec<LayoutEdge>,
}

impl LayoutNode {
    /// The node box in layout space, anchored at its bottom-left corner.
    pub fn frame(&self) -> Rect {
        Rect::new(
            self.center.x - self.left_width,
            self.center.y - self.height / 2.0,
            self.left_width + self.right_width,
            self.height,
        )
    }
}

/// An edge from its owning node to `head`, drawn as one or more spline
/// pieces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutEdge {
    /// Name of the destination node.
    pub head: String,
    pub label: Option<String>,
    pub splines: Vec<SplinePiece>,
}

/// One continuous chain of cubic Bezier segments.
///
/// The control-point count is always `3k + 1`: one start point plus three
/// points (two handles and an endpoint) per segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplinePiece {
    pub points: Vec<Point>,
}

impl SplinePiece {
    /// Whether the point count satisfies the `3k + 1` chain rule.
    pub fn is_well_formed(&self) -> bool {
        self.points.len() >= 4 && self.points.len() % 3 == 1
    }
}

/// Computes layered layouts; the only algorithm offered is top-to-bottom
/// "dot" ranking.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Lay out a parsed graph. Synchronous and infallible: any parseable
    /// graph, including the empty one, has a layout.
    pub fn layout(&self, graph: &DotGraph) -> LaidOutGraph {
        let started = std::time::Instant::now();
        if graph.nodes.is_empty() {
            return LaidOutGraph {
                nodes: Vec::new(),
                width: self.config.margin * 2.0,
                height: self.config.margin * 2.0,
            };
        }

        let mut grid = rank::build(graph);
        order::minimize_crossings(&mut grid);
        let sizes = coords::assign(&mut grid, graph, &self.config);
        let routed = splines::route_edges(&grid, graph, &sizes);
        let mut laid_out = assemble(graph, &grid, &sizes, routed);
        coords::normalize(&mut laid_out, self.config.margin);

        tracing::debug!(
            "laid out {} nodes / {} edges into {} ranks in {:?}",
            graph.nodes.len(),
            graph.edges.len(),
            grid.ranks.len(),
            started.elapsed()
        );
        laid_out
    }
}

/// Join the pipeline outputs into the public model. Coordinates are still
/// in the internal Y-down space; `coords::normalize` flips them.
fn assemble(
    graph: &DotGraph,
    grid: &rank::Grid,
    sizes: &[coords::BoxSize],
    routed: Vec<splines::EdgeSpline>,
) -> LaidOutGraph {
    let mut pieces: Vec<Option<SplinePiece>> = vec![None; graph.edges.len()];
    for routed_edge in routed {
        pieces[routed_edge.edge] = Some(routed_edge.piece);
    }

    let mut nodes: Vec<LayoutNode> = graph
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let slot = &grid.slots[i];
            LayoutNode {
                name: node.name.clone(),
                label: node.label.clone().unwrap_or_else(|| node.name.clone()),
                center: Point::new(slot.x, slot.y),
                left_width: sizes[i].lw,
                right_width: sizes[i].rw,
                height: sizes[i].ht,
                edges: Vec::new(),
            }
        })
        .collect();

    for (i, edge) in graph.edges.iter().enumerate() {
        let splines = pieces[i].take().map(|p| vec![p]).unwrap_or_default();
        nodes[edge.tail].edges.push(LayoutEdge {
            head: graph.nodes[edge.head].name.clone(),
            label: edge.label.clone(),
            splines,
        });
    }

    LaidOutGraph {
        nodes,
        width: 0.0,
        height: 0.0,
    }
}
