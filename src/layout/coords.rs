//! Box sizing, horizontal and vertical placement, and the final
//! normalization into Y-up layout space.
//!
//! Placement works in a Y-down scratch space (rank 0 at the top, matching
//! the drawn image); [`normalize`] measures the finished geometry, applies
//! the margin, and flips into the Y-up space the public model promises.

use crate::dot::DotGraph;

use super::order;
use super::rank::Grid;
use super::{LaidOutGraph, LayoutConfig};

/// Approximate monospace advance width used to size boxes from labels.
const CHAR_WIDTH: f64 = 7.2;
const TEXT_PADDING: f64 = 16.0;
const MIN_NODE_WIDTH: f64 = 54.0;
const NODE_HEIGHT: f64 = 36.0;
const VIRTUAL_WIDTH: f64 = 1.0;

/// How far a self-loop bulges past its node's right edge.
pub(super) const LOOP_BULGE: f64 = 24.0;
/// Extra bulge for each additional self-loop on the same node.
pub(super) const LOOP_STEP: f64 = 8.0;

const ALIGN_PASSES: usize = 4;

/// Box extents for one real node.
pub(super) struct BoxSize {
    pub lw: f64,
    pub rw: f64,
    pub ht: f64,
}

/// Place every slot and return the real nodes' box sizes.
pub(super) fn assign(grid: &mut Grid, graph: &DotGraph, config: &LayoutConfig) -> Vec<BoxSize> {
    let sizes: Vec<BoxSize> = graph
        .nodes
        .iter()
        .map(|node| {
            let label = node.label.as_deref().unwrap_or(&node.name);
            let width =
                (label.chars().count() as f64 * CHAR_WIDTH + TEXT_PADDING).max(MIN_NODE_WIDTH);
            BoxSize {
                lw: width / 2.0,
                rw: width / 2.0,
                ht: NODE_HEIGHT,
            }
        })
        .collect();

    // Self-loops hang off the right edge; leave room so they never reach
    // into the next box in the rank.
    let mut clearance = vec![0.0f64; graph.nodes.len()];
    for &edge_idx in &grid.loops {
        let node = graph.edges[edge_idx].tail;
        clearance[node] = if clearance[node] == 0.0 {
            LOOP_BULGE
        } else {
            clearance[node] + LOOP_STEP
        };
    }

    let (up, down) = grid.neighbor_tables();
    let rank_count = grid.ranks.len();

    // Initial packing: each rank left to right, each rank's row at its y.
    let mut rank_widths = vec![0.0f64; rank_count];
    {
        let Grid { ranks, slots, .. } = grid;
        for (r, row) in ranks.iter().enumerate() {
            let y = NODE_HEIGHT / 2.0 + r as f64 * (NODE_HEIGHT + config.ranksep);
            let mut cursor = 0.0;
            for &id in row {
                let (lw, rw) = half_widths(slots[id].node, &sizes, &clearance);
                cursor += lw;
                slots[id].x = cursor;
                slots[id].y = y;
                cursor += rw + config.nodesep;
            }
            if !row.is_empty() {
                rank_widths[r] = cursor - config.nodesep;
            }
        }
    }

    // Center narrow ranks under the widest one before aligning.
    let widest = rank_widths.iter().copied().fold(0.0f64, f64::max);
    {
        let Grid { ranks, slots, .. } = grid;
        for (r, row) in ranks.iter().enumerate() {
            let shift = (widest - rank_widths[r]) / 2.0;
            for &id in row {
                slots[id].x += shift;
            }
        }
    }

    // Median alignment: pull each slot toward its chain neighbors while
    // keeping the rank's left-to-right separation intact.
    for pass in 0..ALIGN_PASSES {
        if pass % 2 == 0 {
            for r in 1..rank_count {
                align_row(grid, r, &up, &sizes, &clearance, config.nodesep);
            }
        } else {
            for r in (0..rank_count.saturating_sub(1)).rev() {
                align_row(grid, r, &down, &sizes, &clearance, config.nodesep);
            }
        }
    }

    sizes
}

fn align_row(
    grid: &mut Grid,
    r: usize,
    neighbors: &[Vec<usize>],
    sizes: &[BoxSize],
    clearance: &[f64],
    nodesep: f64,
) {
    let row = grid.ranks[r].clone();
    let mut prev_right = f64::NEG_INFINITY;
    for &id in &row {
        let desired = {
            let mut xs: Vec<f64> = neighbors[id]
                .iter()
                .map(|&n| grid.slots[n].x)
                .collect();
            order::median(&mut xs).unwrap_or(grid.slots[id].x)
        };
        let (lw, rw) = half_widths(grid.slots[id].node, sizes, clearance);
        let x = desired.max(prev_right + lw);
        grid.slots[id].x = x;
        prev_right = x + rw + nodesep;
    }
}

/// Left and right half-extents a slot occupies within its rank; the right
/// side of a real node includes its self-loop clearance.
fn half_widths(slot_node: Option<usize>, sizes: &[BoxSize], clearance: &[f64]) -> (f64, f64) {
    match slot_node {
        Some(i) => (sizes[i].lw, sizes[i].rw + clearance[i]),
        None => (VIRTUAL_WIDTH / 2.0, VIRTUAL_WIDTH / 2.0),
    }
}

/// Measure the finished geometry, pad it by `margin` on all sides, and
/// flip from the Y-down scratch space into Y-up layout space. Sets the
/// bounding box.
pub(super) fn normalize(graph: &mut LaidOutGraph, margin: f64) {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    let mut cover = |x: f64, y: f64| {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    };
    for node in &graph.nodes {
        cover(node.center.x - node.left_width, node.center.y - node.height / 2.0);
        cover(node.center.x + node.right_width, node.center.y + node.height / 2.0);
        for edge in &node.edges {
            for piece in &edge.splines {
                for p in &piece.points {
                    cover(p.x, p.y);
                }
            }
        }
    }

    if !min_x.is_finite() {
        graph.width = margin * 2.0;
        graph.height = margin * 2.0;
        return;
    }

    let width = (max_x - min_x) + margin * 2.0;
    let height = (max_y - min_y) + margin * 2.0;
    for node in &mut graph.nodes {
        node.center.x = node.center.x - min_x + margin;
        node.center.y = height - (node.center.y - min_y + margin);
        for edge in &mut node.edges {
            for piece in &mut edge.splines {
                for p in &mut piece.points {
                    p.x = p.x - min_x + margin;
                    p.y = height - (p.y - min_y + margin);
                }
            }
        }
    }
    graph.width = width;
    graph.height = height;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::layout::{LayoutEdge, LayoutNode, SplinePiece};

    fn node_at(x: f64, y: f64) -> LayoutNode {
        LayoutNode {
            name: "n".into(),
            label: "n".into(),
            center: Point::new(x, y),
            left_width: 5.0,
            right_width: 5.0,
            height: 10.0,
            edges: Vec::new(),
        }
    }

    #[test]
    fn test_normalize_pads_and_flips() {
        let mut g = LaidOutGraph {
            nodes: vec![node_at(10.0, 10.0)],
            width: 0.0,
            height: 0.0,
        };
        normalize(&mut g, 8.0);
        assert_eq!(g.width, 26.0);
        assert_eq!(g.height, 26.0);
        // A box symmetric in scratch space lands symmetric in layout space.
        assert_eq!(g.nodes[0].center, Point::new(13.0, 13.0));
    }

    #[test]
    fn test_normalize_covers_spline_points() {
        let mut base = node_at(10.0, 10.0);
        base.edges.push(LayoutEdge {
            head: "n".into(),
            label: None,
            splines: vec![SplinePiece {
                points: vec![
                    Point::new(15.0, 8.0),
                    Point::new(40.0, 6.0),
                    Point::new(40.0, 14.0),
                    Point::new(15.0, 12.0),
                ],
            }],
        });
        let mut g = LaidOutGraph {
            nodes: vec![base],
            width: 0.0,
            height: 0.0,
        };
        normalize(&mut g, 8.0);
        // The far control point at x=40 extends the box beyond the node.
        assert_eq!(g.width, 35.0 + 16.0);
        let far = g.nodes[0].edges[0].splines[0].points[1];
        assert!(far.x <= g.width && far.x >= 0.0);
        assert!(far.y <= g.height && far.y >= 0.0);
    }

    #[test]
    fn test_normalize_flip_keeps_vertical_order_reversed() {
        let mut g = LaidOutGraph {
            nodes: vec![node_at(10.0, 10.0), node_at(10.0, 50.0)],
            width: 0.0,
            height: 0.0,
        };
        normalize(&mut g, 8.0);
        // The node lower in scratch space ends up lower in Y-up space.
        assert!(g.nodes[0].center.y > g.nodes[1].center.y);
    }

    #[test]
    fn test_normalize_empty() {
        let mut g = LaidOutGraph {
            nodes: Vec::new(),
            width: 0.0,
            height: 0.0,
        };
        normalize(&mut g, 8.0);
        assert_eq!(g.width, 16.0);
        assert_eq!(g.height, 16.0);
    }
}
