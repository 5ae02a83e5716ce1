//! Bounded best-first search for "which way should I step next".
//!
//! # Algorithm
//!
//! ```text
//! g(n) = steps from the start
//! f(n) = g(n) + distance(n, goal)          (wraparound-aware Manhattan)
//! ```
//!
//! Repeatedly expand the open node with the lowest `f` (the earliest
//! inserted wins ties), trying neighbours in the order down, left, right,
//! up.  Nodes at depth `search_limit` are not expanded.  Throughout, the
//! node with the smallest `f - g` (closest to the goal) is remembered.
//!
//! When the goal is reached the path is walked back to the step next to
//! the start.  Otherwise the walk starts from the closest node found, so a
//! blocked goal still yields a step that makes progress.  If even that
//! gives no displacement the answer is a straight heuristic toward the goal
//! that ignores obstacles.  `None` only when already on the goal.

use log::trace;

use tw_core::Direction;
use tw_map::MapQuery;

#[cfg(feature = "fx-hash")]
type PosMap<V> = rustc_hash::FxHashMap<(i32, i32), V>;
#[cfg(not(feature = "fx-hash"))]
type PosMap<V> = std::collections::HashMap<(i32, i32), V>;

#[cfg(feature = "fx-hash")]
type PosSet = rustc_hash::FxHashSet<(i32, i32)>;
#[cfg(not(feature = "fx-hash"))]
type PosSet = std::collections::HashSet<(i32, i32)>;

/// Pluggable next-step search.
///
/// `can_pass(x, y, d)` answers whether the searching character may step
/// from `(x, y)` toward `d`; the finder never looks at characters itself.
pub trait Pathfinder {
    fn find_direction<M, F>(
        &self,
        map: &M,
        start: (i32, i32),
        goal: (i32, i32),
        can_pass: F,
    ) -> Option<Direction>
    where
        M: MapQuery + ?Sized,
        F: FnMut(i32, i32, Direction) -> bool;
}

/// The default [`Pathfinder`].
#[derive(Copy, Clone, Debug)]
pub struct BestFirstPathfinder {
    pub search_limit: u32,
}

impl BestFirstPathfinder {
    pub fn new(search_limit: u32) -> Self {
        Self { search_limit }
    }
}

impl Default for BestFirstPathfinder {
    fn default() -> Self {
        Self::new(12)
    }
}

struct Node {
    x: i32,
    y: i32,
    g: u32,
    f: i64,
    parent: Option<usize>,
}

impl Node {
    #[inline]
    fn h(&self) -> i64 {
        self.f - self.g as i64
    }
}

const NEIGHBOURS: [Direction; 4] = Direction::CARDINALS;

impl Pathfinder for BestFirstPathfinder {
    fn find_direction<M, F>(
        &self,
        map: &M,
        start: (i32, i32),
        goal: (i32, i32),
        mut can_pass: F,
    ) -> Option<Direction>
    where
        M: MapQuery + ?Sized,
        F: FnMut(i32, i32, Direction) -> bool,
    {
        let (sx, sy) = start;
        let (gx, gy) = goal;
        if start == goal {
            return None;
        }

        // nodes[0] is the start.
        let mut nodes = vec![Node {
            x: sx,
            y: sy,
            g: 0,
            f: map.distance(sx, sy, gx, gy) as i64,
            parent: None,
        }];
        let mut open: Vec<usize> = vec![0];
        let mut open_at: PosMap<usize> = PosMap::default();
        open_at.insert(start, 0);
        let mut closed = PosSet::default();
        let mut best = 0usize;

        while !open.is_empty() {
            let mut slot = 0;
            for (i, &n) in open.iter().enumerate() {
                if nodes[n].f < nodes[open[slot]].f {
                    slot = i;
                }
            }
            let current = open.remove(slot);
            let (x1, y1, g1) = (nodes[current].x, nodes[current].y, nodes[current].g);
            open_at.remove(&(x1, y1));
            closed.insert((x1, y1));

            if (x1, y1) == goal {
                best = current;
                break;
            }
            if g1 >= self.search_limit {
                continue;
            }

            for d in NEIGHBOURS {
                let x2 = map.round_x_with_direction(x1, d);
                let y2 = map.round_y_with_direction(y1, d);
                if closed.contains(&(x2, y2)) || !can_pass(x1, y1, d) {
                    continue;
                }
                let g2 = g1 + 1;
                let f2 = g2 as i64 + map.distance(x2, y2, gx, gy) as i64;
                let neighbour = match open_at.get(&(x2, y2)).copied() {
                    Some(n) if g2 < nodes[n].g => n,
                    Some(_) => continue,
                    None => {
                        nodes.push(Node { x: x2, y: y2, g: 0, f: 0, parent: None });
                        let n = nodes.len() - 1;
                        open.push(n);
                        open_at.insert((x2, y2), n);
                        n
                    }
                };
                let node = &mut nodes[neighbour];
                node.parent = Some(current);
                node.g = g2;
                node.f = f2;
                if nodes[neighbour].h() < nodes[best].h() {
                    best = neighbour;
                }
            }
        }

        let mut node = best;
        while let Some(parent) = nodes[node].parent {
            if parent == 0 {
                break;
            }
            node = parent;
        }

        let dx1 = map.delta_x(nodes[node].x, sx);
        let dy1 = map.delta_y(nodes[node].y, sy);
        if dy1 > 0 {
            return Some(Direction::Down);
        } else if dx1 < 0 {
            return Some(Direction::Left);
        } else if dx1 > 0 {
            return Some(Direction::Right);
        } else if dy1 < 0 {
            return Some(Direction::Up);
        }

        let dx2 = map.delta_x(sx, gx);
        let dy2 = map.delta_y(sy, gy);
        trace!("path finder fell back to heuristic from ({sx}, {sy}) toward ({gx}, {gy})");
        if dx2.abs() > dy2.abs() {
            Some(if dx2 > 0 { Direction::Left } else { Direction::Right })
        } else if dy2 != 0 {
            Some(if dy2 > 0 { Direction::Up } else { Direction::Down })
        } else {
            None
        }
    }
}
