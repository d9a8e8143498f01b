//! Edge routing: waypoints through the placed grid, turned into cubic
//! Bezier chains.

use std::collections::HashMap;

use crate::dot::DotGraph;
use crate::geometry::Point;

use super::SplinePiece;
use super::coords::{BoxSize, LOOP_BULGE, LOOP_STEP};
use super::rank::Grid;

/// Horizontal spacing between the endpoints of parallel edges.
const PORT_SPREAD: f64 = 8.0;

/// One routed edge, still in the Y-down scratch space.
pub(super) struct EdgeSpline {
    pub edge: usize,
    pub piece: SplinePiece,
}

pub(super) fn route_edges(grid: &Grid, graph: &DotGraph, sizes: &[BoxSize]) -> Vec<EdgeSpline> {
    // Parallel edges share both endpoints; spread their ports so the
    // curves do not coincide.
    let mut counts: HashMap<(usize, usize), usize> = HashMap::new();
    for route in &grid.routes {
        let edge = &graph.edges[route.edge];
        *counts.entry(pair_key(edge.tail, edge.head)).or_default() += 1;
    }

    let mut seen: HashMap<(usize, usize), usize> = HashMap::new();
    let mut routed = Vec::with_capacity(grid.routes.len() + grid.loops.len());
    for route in &grid.routes {
        let edge = &graph.edges[route.edge];
        let key = pair_key(edge.tail, edge.head);
        let position = {
            let slot = seen.entry(key).or_default();
            let p = *slot;
            *slot += 1;
            p
        };
        let offset = spread_offset(position, counts[&key]);

        let last = route.chain.len() - 1;
        let mut waypoints = Vec::with_capacity(route.chain.len());
        for (i, &id) in route.chain.iter().enumerate() {
            let slot = &grid.slots[id];
            let point = if i == 0 {
                // Leave through the upper node's bottom edge.
                Point::new(slot.x + offset, slot.y + slot_height(slot.node, sizes) / 2.0)
            } else if i == last {
                // Enter through the lower node's top edge.
                Point::new(slot.x + offset, slot.y - slot_height(slot.node, sizes) / 2.0)
            } else {
                Point::new(slot.x, slot.y)
            };
            waypoints.push(point);
        }
        if route.reversed {
            waypoints.reverse();
        }

        routed.push(EdgeSpline {
            edge: route.edge,
            piece: fit_chain(&waypoints),
        });
    }

    let mut loops_seen: HashMap<usize, usize> = HashMap::new();
    for &edge_idx in &grid.loops {
        let node = graph.edges[edge_idx].tail;
        let nth = {
            let slot = loops_seen.entry(node).or_default();
            let n = *slot;
            *slot += 1;
            n
        };
        let center = &grid.slots[node];
        let size = &sizes[node];
        let right = center.x + size.rw;
        let bulge = right + LOOP_BULGE + LOOP_STEP * nth as f64;
        routed.push(EdgeSpline {
            edge: edge_idx,
            piece: SplinePiece {
                points: vec![
                    Point::new(right, center.y - size.ht * 0.25),
                    Point::new(bulge, center.y - size.ht * 0.45),
                    Point::new(bulge, center.y + size.ht * 0.45),
                    Point::new(right, center.y + size.ht * 0.25),
                ],
            },
        });
    }

    routed
}

fn pair_key(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

/// Offsets centered around zero: 0 for a lone edge, -4/+4 for a pair, ...
fn spread_offset(position: usize, total: usize) -> f64 {
    (position as f64 - (total as f64 - 1.0) / 2.0) * PORT_SPREAD
}

/// Fit one cubic chain through the waypoints: `3k + 1` control points for
/// `k + 1` waypoints. Two waypoints become a straight segment; longer
/// chains get Catmull-Rom tangents so consecutive segments join smoothly.
fn fit_chain(waypoints: &[Point]) -> SplinePiece {
    if waypoints.len() == 2 {
        let (a, b) = (waypoints[0], waypoints[1]);
        return SplinePiece {
            points: vec![a, a.lerp(&b, 1.0 / 3.0), a.lerp(&b, 2.0 / 3.0), b],
        };
    }

    let n = waypoints.len();
    let mut points = Vec::with_capacity(1 + 3 * n.saturating_sub(1));
    points.push(waypoints[0]);
    for i in 0..n.saturating_sub(1) {
        let before = waypoints[i.saturating_sub(1)];
        let after = waypoints[(i + 2).min(n - 1)];
        points.push(tangent_control(waypoints[i], before, waypoints[i + 1]));
        points.push(tangent_control(waypoints[i + 1], after, waypoints[i]));
        points.push(waypoints[i + 1]);
    }
    SplinePiece { points }
}

/// Control point a sixth of the chord between the surrounding waypoints
/// away from `at`, giving Catmull-Rom tangents at chain joints.
fn tangent_control(at: Point, from: Point, toward: Point) -> Point {
    Point::new(
        at.x + (toward.x - from.x) / 6.0,
        at.y + (toward.y - from.y) / 6.0,
    )
}

/// Height of the box occupying a slot; virtual slots are points.
fn slot_height(slot_node: Option<usize>, sizes: &[BoxSize]) -> f64 {
    slot_node.map(|i| sizes[i].ht).unwrap_or(0.0)
}
