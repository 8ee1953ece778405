//! This module implements a variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! whose tie-breaking is fully deterministic: among open nodes with equal estimated cost, the one
//! that entered the open set first is expanded first.
use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::{debug, warn};
use num_traits::Zero;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Heap entry. `index` is the node's position in the parents map, which is the order in which
/// nodes were first discovered.
struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.index == other.index
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: smaller estimated cost first, then earlier insertion
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.index.cmp(&self.index),
            s => s,
        }
    }
}

/// Walks parent indices back from `start` until an index without entry (the root sentinel).
pub(crate) fn reverse_path<N, V, F>(
    parents: &FxIndexMap<N, V>,
    mut parent: F,
    start: usize,
) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut i = start;
    let mut path: Vec<N> = std::iter::from_fn(|| {
        parents.get_index(i).map(|(node, value)| {
            i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Computes a cheapest path from `start` to the first node accepted by `success`, returning the
/// path (start and goal inclusive) and its cost. Returns [None] once the frontier is exhausted.
///
/// Nodes are closed when expanded and never reopened, so `heuristic` has to be consistent for the
/// result to be optimal.
pub fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        estimated_cost: heuristic(start),
        cost: Zero::zero(),
        index: 0,
    });
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    parents.insert(start.clone(), (usize::MAX, Zero::zero()));
    let mut closed: FxHashSet<usize> = FxHashSet::default();
    while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
        let successors = {
            let Some((node, &(_, c))) = parents.get_index(index) else {
                continue;
            };
            // A node is pushed again whenever a cheaper way to it is found; skip the
            // outdated entries.
            if cost > c || closed.contains(&index) {
                continue;
            }
            if success(node) {
                debug!(
                    "Goal found after closing {} of {} discovered nodes",
                    closed.len(),
                    parents.len()
                );
                let path = reverse_path(&parents, |&(p, _)| p, index);
                return Some((path, cost));
            }
            closed.insert(index);
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let n; // index for successor
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if closed.contains(&e.index()) || e.get().1 <= new_cost {
                        continue;
                    }
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                }
            }

            to_see.push(SmallestCostHolder {
                estimated_cost: new_cost + h,
                cost: new_cost,
                index: n,
            });
        }
    }
    warn!(
        "Frontier exhausted after discovering {} nodes without reaching the goal",
        parents.len()
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Line graph 0 - 1 - 2 - 3 with a costly shortcut 0 -> 3.
    fn line_successors(n: &u32) -> Vec<(u32, u32)> {
        let mut succ = Vec::new();
        if *n < 3 {
            succ.push((n + 1, 1));
        }
        if *n > 0 {
            succ.push((n - 1, 1));
        }
        if *n == 0 {
            succ.push((3, 5));
        }
        succ
    }

    #[test]
    fn finds_cheapest_path() {
        let (path, cost) =
            astar(&0u32, line_successors, |n| 3u32.saturating_sub(*n), |n| *n == 3).unwrap();
        assert_eq!(path, vec![0, 1, 2, 3]);
        assert_eq!(cost, 3);
    }

    #[test]
    fn start_is_goal() {
        let (path, cost) = astar(&2u32, line_successors, |_| 0, |n| *n == 2).unwrap();
        assert_eq!(path, vec![2]);
        assert_eq!(cost, 0);
    }

    #[test]
    fn exhausted_frontier_returns_none() {
        assert!(astar(&0u32, line_successors, |_| 0, |n| *n == 7).is_none());
    }

    /// Two equally cheap routes to the goal: the one through the first discovered node wins.
    #[test]
    fn ties_go_to_first_discovered() {
        // 0 -> {1, 2} -> 3, all unit costs, zero heuristic.
        let succ = |n: &u32| -> Vec<(u32, u32)> {
            match n {
                0 => vec![(1, 1), (2, 1)],
                1 | 2 => vec![(3, 1)],
                _ => vec![],
            }
        };
        let (path, _) = astar(&0u32, succ, |_| 0, |n| *n == 3).unwrap();
        assert_eq!(path, vec![0, 1, 3]);

        let succ_rev = |n: &u32| -> Vec<(u32, u32)> {
            match n {
                0 => vec![(2, 1), (1, 1)],
                1 | 2 => vec![(3, 1)],
                _ => vec![],
            }
        };
        let (path, _) = astar(&0u32, succ_rev, |_| 0, |n| *n == 3).unwrap();
        assert_eq!(path, vec![0, 2, 3]);
    }

    #[test]
    fn improved_node_is_reparented() {
        // 0 -> 2 costs 10 directly but 2 via 1.
        let succ = |n: &u32| -> Vec<(u32, u32)> {
            match n {
                0 => vec![(2, 10), (1, 1)],
                1 => vec![(2, 1)],
                2 => vec![(3, 1)],
                _ => vec![],
            }
        };
        let (path, cost) = astar(&0u32, succ, |_| 0, |n| *n == 3).unwrap();
        assert_eq!(path, vec![0, 1, 2, 3]);
        assert_eq!(cost, 3);
    }

    /// Node 1 is discovered expensively, then improved through 2 until it ties with node 3. The tie
    /// goes to whichever of the two was discovered first, whatever the order of improvement.
    #[test]
    fn improved_node_keeps_discovery_position() {
        let search = |first_edges: Vec<(u32, u32)>| {
            let mut expanded = Vec::new();
            let result = astar(
                &0u32,
                |n| {
                    expanded.push(*n);
                    match n {
                        0 => first_edges.clone(),
                        2 => vec![(1, 2)],
                        1 | 3 => vec![(4, 1)],
                        _ => vec![],
                    }
                },
                |_| 0,
                |n| *n == 1 || *n == 3,
            );
            (result, expanded)
        };

        let (result, expanded) = search(vec![(1, 10), (2, 1), (3, 3)]);
        assert_eq!(result, Some((vec![0, 2, 1], 3)));
        assert_eq!(expanded, vec![0, 2]);

        let (result, expanded) = search(vec![(3, 3), (1, 10), (2, 1)]);
        assert_eq!(result, Some((vec![0, 3], 3)));
        assert_eq!(expanded, vec![0, 2]);
    }
}
