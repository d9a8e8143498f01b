//! Crossing reduction: repeated median sweeps over the ranks, keeping the
//! ordering with the fewest pairwise edge crossings.

use super::rank::Grid;

const MAX_PASSES: usize = 4;

pub(super) fn minimize_crossings(grid: &mut Grid) {
    if grid.ranks.len() < 2 {
        return;
    }
    let (up, down) = grid.neighbor_tables();
    let mut best = grid.ranks.clone();
    let mut best_crossings = count_crossings(grid, &down);

    for _ in 0..MAX_PASSES {
        if best_crossings == 0 {
            break;
        }
        for r in 1..grid.ranks.len() {
            reorder(grid, r, &up);
        }
        for r in (0..grid.ranks.len() - 1).rev() {
            reorder(grid, r, &down);
        }
        let crossings = count_crossings(grid, &down);
        if crossings < best_crossings {
            best_crossings = crossings;
            best = grid.ranks.clone();
        }
    }

    grid.ranks = best;
    grid.sync_orders();
}

/// Sort one rank by the median order of each slot's neighbors in the
/// fixed adjacent rank; slots without neighbors keep their position.
fn reorder(grid: &mut Grid, r: usize, neighbors: &[Vec<usize>]) {
    let mut keyed: Vec<(usize, f64)> = grid.ranks[r]
        .iter()
        .map(|&id| {
            let mut positions: Vec<f64> = neighbors[id]
                .iter()
                .map(|&n| grid.slots[n].order as f64)
                .collect();
            let key = median(&mut positions).unwrap_or(grid.slots[id].order as f64);
            (id, key)
        })
        .collect();
    keyed.sort_by(|a, b| a.1.total_cmp(&b.1));

    let row: Vec<usize> = keyed.into_iter().map(|(id, _)| id).collect();
    for (i, &id) in row.iter().enumerate() {
        grid.slots[id].order = i;
    }
    grid.ranks[r] = row;
}

/// Median of a set of positions, weighted toward the denser side for even
/// counts above two. `None` when the set is empty.
pub(super) fn median(positions: &mut [f64]) -> Option<f64> {
    if positions.is_empty() {
        return None;
    }
    positions.sort_by(|a, b| a.total_cmp(b));
    let m = positions.len() / 2;
    if positions.len() % 2 == 1 {
        return Some(positions[m]);
    }
    if positions.len() == 2 {
        return Some((positions[0] + positions[1]) / 2.0);
    }
    let left = positions[m - 1] - positions[0];
    let right = positions[positions.len() - 1] - positions[m];
    if left + right == 0.0 {
        Some((positions[m - 1] + positions[m]) / 2.0)
    } else {
        Some((positions[m - 1] * right + positions[m] * left) / (left + right))
    }
}

/// Count pairwise crossings between every adjacent pair of ranks.
pub(super) fn count_crossings(grid: &Grid, down: &[Vec<usize>]) -> usize {
    let mut total = 0;
    for row in &grid.ranks {
        let mut spans: Vec<(usize, usize)> = Vec::new();
        for &id in row {
            for &below in &down[id] {
                spans.push((grid.slots[id].order, grid.slots[below].order));
            }
        }
        spans.sort_unstable();
        for i in 0..spans.len() {
            for j in (i + 1)..spans.len() {
                if spans[i].0 < spans[j].0 && spans[i].1 > spans[j].1 {
                    total += 1;
                }
            }
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dot;
    use crate::layout::rank;

    fn crossings(grid: &Grid) -> usize {
        let (_, down) = grid.neighbor_tables();
        count_crossings(grid, &down)
    }

    #[test]
    fn test_untangles_simple_crossing() {
        // Declaration order puts p before q, so the initial ordering
        // crosses a->q with b->p.
        let mut grid = rank::build(&dot::parse("digraph { p; q; a -> q; b -> p }").unwrap());
        assert_eq!(crossings(&grid), 1);
        minimize_crossings(&mut grid);
        assert_eq!(crossings(&grid), 0);
    }

    #[test]
    fn test_straight_ladder_stays_flat() {
        let mut grid = rank::build(&dot::parse("digraph { a -> x; b -> y; c -> z }").unwrap());
        minimize_crossings(&mut grid);
        assert_eq!(crossings(&grid), 0);
    }

    #[test]
    fn test_orders_stay_permutations() {
        let mut grid = rank::build(
            &dot::parse("digraph { a -> q; b -> p; c; p -> w; q -> v; b -> w }").unwrap(),
        );
        minimize_crossings(&mut grid);
        for row in &grid.ranks {
            let mut orders: Vec<usize> = row.iter().map(|&id| grid.slots[id].order).collect();
            orders.sort_unstable();
            let expected: Vec<usize> = (0..row.len()).collect();
            assert_eq!(orders, expected);
        }
    }

    #[test]
    fn test_never_worse_than_initial() {
        let text = "digraph { a -> y; b -> x; c -> z; a -> z; b -> z; c -> x }";
        let mut grid = rank::build(&dot::parse(text).unwrap());
        let before = crossings(&grid);
        minimize_crossings(&mut grid);
        assert!(crossings(&grid) <= before);
    }

    #[test]
    fn test_median_values() {
        assert_eq!(median(&mut []), None);
        assert_eq!(median(&mut [4.0]), Some(4.0));
        assert_eq!(median(&mut [2.0, 6.0]), Some(4.0));
        assert_eq!(median(&mut [1.0, 2.0, 9.0]), Some(2.0));
        // Even count above two leans toward the denser side.
        let v = median(&mut [0.0, 1.0, 2.0, 10.0]).unwrap();
        assert!(v < 1.5);
    }
}
