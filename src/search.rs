use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::{Cell, Grid};

type IndexMap<K, V> = indexmap::IndexMap<K, V, fxhash::FxBuildHasher>;
type IndexSet<T> = indexmap::IndexSet<T, fxhash::FxBuildHasher>;

/// How the block's cell is treated while searching.
///
/// `ObstacleExceptGoal` keeps the agent from routing through the block but
/// still allows a path to end on it, which is how adjacency-for-push
/// queries are phrased.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockPolicy {
    Free,
    ObstacleExceptGoal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    /// Cells from just after the start up to and including the goal.
    pub path: Vec<Cell>,
    pub opened: usize,
    pub closed: usize,
}

impl PathResult {
    pub fn cost(&self) -> usize {
        self.path.len()
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub opened: usize,
    pub closed: usize,
    pub cost: usize,
}

impl SearchStats {
    pub fn absorb(&mut self, result: &PathResult) {
        self.opened += result.opened;
        self.closed += result.closed;
        self.cost += result.cost();
    }

    pub fn merge(&mut self, other: SearchStats) {
        self.opened += other.opened;
        self.closed += other.closed;
        self.cost += other.cost;
    }
}

// Ordered by f, then h, then insertion sequence, so that the heap pops the
// lowest estimate first, preferring deeper nodes and then FIFO among exact
// ties. The tail fields never reach the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct OpenEntry {
    f: u32,
    h: u32,
    seq: u32,
    cell: Cell,
    g: u32,
}

/// A* over the 4-connected grid, unit edge cost, Manhattan heuristic.
/// Scratch collections are reused across calls.
#[derive(Default)]
pub struct Searcher {
    open: BinaryHeap<Reverse<OpenEntry>>,
    best_g: IndexMap<Cell, u32>,
    parent: IndexMap<Cell, Cell>,
    closed: IndexSet<Cell>,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortest path from `start` (exclusive) to `goal` (inclusive), or
    /// `None` when the goal cannot be reached. `block` is the block's cell
    /// as seen by `policy`; it is ignored under `BlockPolicy::Free`.
    pub fn find_path(
        &mut self,
        grid: &Grid,
        block: Cell,
        start: Cell,
        goal: Cell,
        policy: BlockPolicy,
    ) -> Option<PathResult> {
        self.open.clear();
        self.best_g.clear();
        self.parent.clear();
        self.closed.clear();

        let mut opened = 1;
        let mut closed = 0;
        let mut seq = 0;
        self.best_g.insert(start, 0);
        self.open.push(Reverse(OpenEntry {
            f: start.manhattan(goal),
            h: start.manhattan(goal),
            seq,
            cell: start,
            g: 0,
        }));

        while let Some(Reverse(node)) = self.open.pop() {
            if self.closed.contains(&node.cell) || node.g > self.best_g[&node.cell] {
                // Superseded by an earlier relaxation.
                continue;
            }
            closed += 1;

            if node.cell == goal {
                return Some(self.reconstruct(start, goal, opened, closed));
            }
            self.closed.insert(node.cell);

            for next in grid.neighbors(node.cell) {
                if !grid.is_floor(next)
                    || (policy == BlockPolicy::ObstacleExceptGoal && next == block && next != goal)
                    || self.closed.contains(&next)
                {
                    continue;
                }

                let g = node.g + 1;
                match self.best_g.entry(next) {
                    indexmap::map::Entry::Occupied(mut entry) => {
                        if g >= *entry.get() {
                            continue;
                        }
                        entry.insert(g);
                    }
                    indexmap::map::Entry::Vacant(entry) => {
                        entry.insert(g);
                        opened += 1;
                    }
                }
                self.parent.insert(next, node.cell);
                seq += 1;
                self.open.push(Reverse(OpenEntry {
                    f: g + next.manhattan(goal),
                    h: next.manhattan(goal),
                    seq,
                    cell: next,
                    g,
                }));
            }
        }
        None
    }

    fn reconstruct(&self, start: Cell, goal: Cell, opened: usize, closed: usize) -> PathResult {
        let mut path = std::iter::successors(Some(goal), |&cell| {
            (cell != start).then(|| self.parent[&cell])
        })
        .collect::<Vec<_>>();
        path.pop(); // Drop the start.
        path.reverse();
        PathResult {
            path,
            opened,
            closed,
        }
    }
}
