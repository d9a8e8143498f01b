//! Rank assignment: cycle breaking, longest-path ranking, and virtual
//! nodes for edges that span more than one rank.

use std::collections::VecDeque;

use crate::dot::DotGraph;

/// One cell of the layered grid: a real node or a routing point inserted
/// for a long edge.
#[derive(Debug)]
pub(super) struct Slot {
    /// `Some(node index)` for a real node, `None` for a virtual node.
    pub node: Option<usize>,
    pub rank: usize,
    /// Left-to-right position within the rank.
    pub order: usize,
    pub x: f64,
    pub y: f64,
}

/// The path one edge takes through the grid, one slot per rank touched.
#[derive(Debug)]
pub(super) struct Route {
    /// Index into the source graph's edge list.
    pub edge: usize,
    /// Set when the edge was flipped to break a cycle; the spline stage
    /// flips the waypoints back so the curve starts at the true tail.
    pub reversed: bool,
    /// Slot ids from the upper endpoint down to the lower one, length >= 2.
    pub chain: Vec<usize>,
}

#[derive(Debug)]
pub(super) struct Grid {
    pub slots: Vec<Slot>,
    /// Slot ids per rank, left to right. Slot `i` is real node `i` for
    /// every `i < graph.nodes.len()`; virtual slots follow.
    pub ranks: Vec<Vec<usize>>,
    pub routes: Vec<Route>,
    /// Self-loop edge indices; they never enter the grid and are routed
    /// separately.
    pub loops: Vec<usize>,
}

impl Grid {
    /// Chain neighbors of every slot in the rank above (first table) and
    /// the rank below (second table).
    pub(super) fn neighbor_tables(&self) -> (Vec<Vec<usize>>, Vec<Vec<usize>>) {
        let mut up = vec![Vec::new(); self.slots.len()];
        let mut down = vec![Vec::new(); self.slots.len()];
        for route in &self.routes {
            for pair in route.chain.windows(2) {
                down[pair[0]].push(pair[1]);
                up[pair[1]].push(pair[0]);
            }
        }
        (up, down)
    }

    /// Rewrite every slot's `order` from its position in `ranks`.
    pub(super) fn sync_orders(&mut self) {
        let Grid { ranks, slots, .. } = self;
        for row in ranks.iter() {
            for (i, &id) in row.iter().enumerate() {
                slots[id].order = i;
            }
        }
    }
}

/// Build the layered grid for a graph with at least one node.
pub(super) fn build(graph: &DotGraph) -> Grid {
    let n = graph.nodes.len();
    let mut loops = Vec::new();
    // (edge index, tail, head) for every non-loop edge, document order.
    let mut spine = Vec::new();
    for (i, edge) in graph.edges.iter().enumerate() {
        if edge.tail == edge.head {
            loops.push(i);
        } else {
            spine.push((i, edge.tail, edge.head));
        }
    }

    let reversed = break_cycles(n, &spine);
    let oriented: Vec<(usize, usize, usize, bool)> = spine
        .iter()
        .zip(&reversed)
        .map(|(&(edge, tail, head), &rev)| {
            if rev {
                (edge, head, tail, true)
            } else {
                (edge, tail, head, false)
            }
        })
        .collect();

    let rank = assign_ranks(n, &oriented);
    let rank_count = rank.iter().copied().max().map(|m| m + 1).unwrap_or(0);

    let mut slots: Vec<Slot> = (0..n)
        .map(|i| Slot {
            node: Some(i),
            rank: rank[i],
            order: 0,
            x: 0.0,
            y: 0.0,
        })
        .collect();
    let mut ranks: Vec<Vec<usize>> = vec![Vec::new(); rank_count];
    for (i, &r) in rank.iter().enumerate() {
        ranks[r].push(i);
    }

    let mut routes = Vec::with_capacity(oriented.len());
    for &(edge, upper, lower, reversed) in &oriented {
        let mut chain = vec![upper];
        for r in (rank[upper] + 1)..rank[lower] {
            let id = slots.len();
            slots.push(Slot {
                node: None,
                rank: r,
                order: 0,
                x: 0.0,
                y: 0.0,
            });
            ranks[r].push(id);
            chain.push(id);
        }
        chain.push(lower);
        routes.push(Route {
            edge,
            reversed,
            chain,
        });
    }

    let mut grid = Grid {
        slots,
        ranks,
        routes,
        loops,
    };
    grid.sync_orders();
    grid
}

/// Depth-first search over the directed graph; edges closing a cycle are
/// marked for reversal. Returns one flag per `spine` entry.
fn break_cycles(n: usize, spine: &[(usize, usize, usize)]) -> Vec<bool> {
    let mut out: Vec<Vec<(usize, usize)>> = vec![Vec::new(); n];
    for (i, &(_, tail, head)) in spine.iter().enumerate() {
        out[tail].push((i, head));
    }

    let mut reversed = vec![false; spine.len()];
    // 0 = unvisited, 1 = on the current path, 2 = finished.
    let mut state = vec![0u8; n];
    for root in 0..n {
        if state[root] != 0 {
            continue;
        }
        state[root] = 1;
        let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;
            if cursor == out[node].len() {
                state[node] = 2;
                stack.pop();
                continue;
            }
            frame.1 += 1;
            let (spine_idx, next) = out[node][cursor];
            match state[next] {
                0 => {
                    state[next] = 1;
                    stack.push((next, 0));
                }
                1 => reversed[spine_idx] = true,
                _ => {}
            }
        }
    }
    reversed
}

/// Longest-path ranking over the acyclic orientation: sources sit at rank
/// 0 and every edge spans at least one rank downward.
fn assign_ranks(n: usize, oriented: &[(usize, usize, usize, bool)]) -> Vec<usize> {
    let mut out: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut indegree = vec![0usize; n];
    for &(_, tail, head, _) in oriented {
        out[tail].push(head);
        indegree[head] += 1;
    }

    let mut rank = vec![0usize; n];
    let mut ready: VecDeque<usize> = (0..n).filter(|&v| indegree[v] == 0).collect();
    while let Some(u) = ready.pop_front() {
        for &v in &out[u] {
            if rank[v] < rank[u] + 1 {
                rank[v] = rank[u] + 1;
            }
            indegree[v] -= 1;
            if indegree[v] == 0 {
                ready.push_back(v);
            }
        }
    }
    rank
}
