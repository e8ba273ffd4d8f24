//! Flood expansion and path search
//!
//! Every search shares one arena of `SearchNode`s addressed by `NodeId`,
//! with a coordinate map pointing into it. Unweighted searches run a
//! breadth-first flood; weighted searches run Dijkstra over a binary heap
//! whose stale entries are skipped on pop.
//!
//! ## Direction pruning
//! A node entered from direction `d` (pointing back at its ancestor) only
//! needs to look at `d+2..=d+4`: the three skipped cells all touch the
//! ancestor, which got to them first. This is exact for unit costs and is
//! opt-in (`uniform_on_entry`) for weighted searches.

use crate::config::SearchConfig;
use crate::coord::Hex;
use crate::error::{GridError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

// ============================================================================
// TYPES
// ============================================================================

/// A cell reached by a search
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathNode {
    pub location: Hex,
    /// Total cost from the search origin
    pub path_cost: u32,
    /// Direction from this cell back to the one it was reached from
    pub from_direction: u8,
}

impl PathNode {
    /// The cell this node was reached from
    pub fn ancestor(&self) -> Hex {
        self.location.neighbor(self.from_direction)
    }
}

/// Total cost of a path (the cost of its final node)
pub fn path_cost(path: &[PathNode]) -> u32 {
    path.last().map_or(0, |node| node.path_cost)
}

/// Node identifier (index into the search arena)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeId(pub(crate) usize);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);
}

/// Arena entry for a discovered cell
#[derive(Clone, Debug)]
pub(crate) struct SearchNode {
    pub(crate) node: PathNode,
    /// None for the search origin
    pub(crate) ancestor: Option<NodeId>,
    pub(crate) settled: bool,
}

// ============================================================================
// ARENA
// ============================================================================

#[derive(Debug)]
struct SearchArena {
    nodes: Vec<SearchNode>,
    index: FxHashMap<Hex, NodeId>,
}

impl SearchArena {
    fn new(origin: Hex) -> Self {
        let mut arena = Self {
            nodes: Vec::new(),
            index: FxHashMap::default(),
        };
        arena.insert(
            PathNode {
                location: origin,
                path_cost: 0,
                from_direction: 0,
            },
            None,
        );
        arena
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0]
    }

    fn lookup(&self, location: Hex) -> Option<NodeId> {
        self.index.get(&location).copied()
    }

    fn insert(&mut self, node: PathNode, ancestor: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.index.insert(node.location, id);
        self.nodes.push(SearchNode {
            node,
            ancestor,
            settled: false,
        });
        id
    }

    /// Directions worth expanding from a node
    fn directions(&self, id: NodeId, pruned: bool) -> impl Iterator<Item = u8> {
        let entry = self.get(id);
        let back = entry.node.from_direction;
        let is_root = entry.ancestor.is_none();
        (0..6u8).filter(move |&dir| {
            if is_root {
                return true;
            }
            let turn = (dir + 6 - back) % 6;
            if pruned {
                (2..=4).contains(&turn)
            } else {
                turn != 0
            }
        })
    }

    /// Path from the origin (excluded) to `id` (included)
    fn path_to(&self, id: NodeId) -> Vec<PathNode> {
        let mut path = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let entry = self.get(current);
            if entry.ancestor.is_none() {
                break;
            }
            path.push(entry.node);
            cursor = entry.ancestor;
        }
        path.reverse();
        path
    }
}

// ============================================================================
// UNWEIGHTED
// ============================================================================

/// Breadth-first flood from `origin` out to `range` steps.
///
/// Yields every reachable cell once, nearest first, excluding the origin.
/// Negative ranges are treated as their absolute value.
pub fn spread<F>(origin: Hex, range: i32, is_obstacle: F) -> Spread<F>
where
    F: FnMut(Hex) -> bool,
{
    Spread::new(origin, Some(range.unsigned_abs()), is_obstacle)
}

/// Shortest unit-cost path to `target`, or None when it cannot be reached.
///
/// The returned path excludes `origin` and ends at `target`. On an open map
/// an unreachable target never terminates; bound the map through
/// `is_obstacle`.
pub fn find_path<F>(origin: Hex, target: Hex, is_obstacle: F) -> Option<Vec<PathNode>>
where
    F: FnMut(Hex) -> bool,
{
    find_path_where(origin, |location| location == target, is_obstacle)
}

/// Shortest unit-cost path to the nearest cell satisfying `is_target`
pub fn find_path_where<T, F>(origin: Hex, mut is_target: T, is_obstacle: F) -> Option<Vec<PathNode>>
where
    T: FnMut(Hex) -> bool,
    F: FnMut(Hex) -> bool,
{
    let mut flood = Spread::new(origin, None, is_obstacle);
    while let Some(id) = flood.advance() {
        let location = flood.arena.get(id).node.location;
        if is_target(location) {
            let path = flood.arena.path_to(id);
            tracing::debug!(%origin, %location, steps = path.len(), visited = flood.visited(), "path found");
            return Some(path);
        }
    }
    tracing::debug!(%origin, visited = flood.visited(), "no path");
    None
}

/// Iterator returned by [`spread`]
pub struct Spread<F> {
    arena: SearchArena,
    queue: VecDeque<NodeId>,
    range: Option<u32>,
    is_obstacle: F,
}

impl<F> Spread<F>
where
    F: FnMut(Hex) -> bool,
{
    fn new(origin: Hex, range: Option<u32>, is_obstacle: F) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(NodeId::ROOT);
        Self {
            arena: SearchArena::new(origin),
            queue,
            range,
            is_obstacle,
        }
    }

    /// Number of cells discovered so far
    pub fn visited(&self) -> usize {
        self.arena.len()
    }

    /// Dequeue the next node (origin included) and discover its neighbours
    fn advance(&mut self) -> Option<NodeId> {
        let id = self.queue.pop_front()?;
        let current = self.arena.get(id).node;
        self.arena.get_mut(id).settled = true;

        let step = current.path_cost + 1;
        if self.range.map_or(true, |range| step <= range) {
            let directions: Vec<u8> = self.arena.directions(id, true).collect();
            for dir in directions {
                let location = current.location.neighbor(dir);
                if self.arena.lookup(location).is_some() || (self.is_obstacle)(location) {
                    continue;
                }
                let node = PathNode {
                    location,
                    path_cost: step,
                    from_direction: (dir + 3) % 6,
                };
                let next = self.arena.insert(node, Some(id));
                self.queue.push_back(next);
            }
        }
        Some(id)
    }
}

impl<F> Iterator for Spread<F>
where
    F: FnMut(Hex) -> bool,
{
    type Item = PathNode;

    fn next(&mut self) -> Option<PathNode> {
        loop {
            let id = self.advance()?;
            if id != NodeId::ROOT {
                return Some(self.arena.get(id).node);
            }
        }
    }
}

// ============================================================================
// WEIGHTED
// ============================================================================

/// Weighted search from a fixed origin.
///
/// `move_cost(from, to)` prices the step from an already reached node into
/// an adjacent cell; 0 marks the step impassable.
#[derive(Debug)]
pub struct Pathfinder<F> {
    origin: Hex,
    move_cost: F,
    config: SearchConfig,
}

/// Builder for [`Pathfinder`]; `move_cost` is required
#[derive(Debug)]
pub struct PathfinderBuilder<F> {
    origin: Hex,
    move_cost: Option<F>,
    config: SearchConfig,
}

impl<F> PathfinderBuilder<F>
where
    F: FnMut(&PathNode, Hex) -> u32,
{
    pub fn new(origin: Hex) -> Self {
        Self {
            origin,
            move_cost: None,
            config: SearchConfig::default(),
        }
    }

    pub fn move_cost(mut self, move_cost: F) -> Self {
        self.move_cost = Some(move_cost);
        self
    }

    pub fn config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn range(mut self, range: u32) -> Self {
        self.config.range = Some(range);
        self
    }

    pub fn uniform_on_entry(mut self, uniform_on_entry: bool) -> Self {
        self.config.uniform_on_entry = uniform_on_entry;
        self
    }

    pub fn permissive(mut self, permissive: bool) -> Self {
        self.config.permissive = permissive;
        self
    }

    pub fn build(self) -> Result<Pathfinder<F>> {
        let move_cost = self.move_cost.ok_or(GridError::MissingArgument("move_cost"))?;
        Ok(Pathfinder {
            origin: self.origin,
            move_cost,
            config: self.config,
        })
    }
}

impl<F> Pathfinder<F>
where
    F: FnMut(&PathNode, Hex) -> u32,
{
    pub fn new(origin: Hex, move_cost: F) -> Self {
        Self {
            origin,
            move_cost,
            config: SearchConfig::default(),
        }
    }

    pub fn builder(origin: Hex) -> PathfinderBuilder<F> {
        PathfinderBuilder::new(origin)
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn uniform_on_entry(mut self, uniform_on_entry: bool) -> Self {
        self.config.uniform_on_entry = uniform_on_entry;
        self
    }

    /// Expand out to path cost `range` (absolute value taken)
    pub fn spread(mut self, range: i32, permissive: bool) -> WeightedSpread<F> {
        self.config.range = Some(range.unsigned_abs());
        self.config.permissive = permissive;
        self.expand()
    }

    /// Expand using the configured range and yield mode
    pub fn expand(self) -> WeightedSpread<F> {
        WeightedSpread::new(self.origin, self.move_cost, self.config, false)
    }

    /// Cheapest path to `target`; equal-cost candidates nearer the origin are settled first
    pub fn path_to(self, target: Hex) -> Option<Vec<PathNode>> {
        let search = WeightedSpread::new(self.origin, self.move_cost, self.config, true);
        search.run_until(|location| location == target)
    }

    /// Cheapest path to the first settled cell satisfying `is_target`, with
    /// the same tie-break as [`Pathfinder::path_to`]
    pub fn path_where<T>(self, is_target: T) -> Option<Vec<PathNode>>
    where
        T: FnMut(Hex) -> bool,
    {
        let search = WeightedSpread::new(self.origin, self.move_cost, self.config, true);
        search.run_until(is_target)
    }
}

/// Heap key: cost, then distance from the origin (path searches only), then insertion order
type QueueEntry = Reverse<(u32, i32, u64, NodeId)>;

/// Iterator returned by [`Pathfinder::spread`] and [`Pathfinder::expand`]
pub struct WeightedSpread<F> {
    arena: SearchArena,
    heap: BinaryHeap<QueueEntry>,
    ready: VecDeque<NodeId>,
    move_cost: F,
    config: SearchConfig,
    origin: Hex,
    origin_bias: bool,
    seq: u64,
}

impl<F> WeightedSpread<F>
where
    F: FnMut(&PathNode, Hex) -> u32,
{
    fn new(origin: Hex, move_cost: F, config: SearchConfig, origin_bias: bool) -> Self {
        let mut search = Self {
            arena: SearchArena::new(origin),
            heap: BinaryHeap::new(),
            ready: VecDeque::new(),
            move_cost,
            config,
            origin,
            origin_bias,
            seq: 0,
        };
        search.enqueue(NodeId::ROOT);
        search
    }

    /// Number of cells discovered so far
    pub fn visited(&self) -> usize {
        self.arena.len()
    }

    fn enqueue(&mut self, id: NodeId) {
        let node = self.arena.get(id).node;
        let bias = if self.origin_bias {
            node.location.distance_to(self.origin)
        } else {
            0
        };
        self.heap.push(Reverse((node.path_cost, bias, self.seq, id)));
        self.seq += 1;
    }

    /// Pop the cheapest live entry, settle it and relax its neighbours
    fn settle_next(&mut self) -> Option<NodeId> {
        let id = loop {
            let Reverse((cost, _, _, id)) = self.heap.pop()?;
            let entry = self.arena.get(id);
            if !entry.settled && entry.node.path_cost == cost {
                break id;
            }
        };
        self.arena.get_mut(id).settled = true;
        let current = self.arena.get(id).node;

        let directions: Vec<u8> = self.arena.directions(id, self.config.uniform_on_entry).collect();
        for dir in directions {
            let location = current.location.neighbor(dir);
            let step = (self.move_cost)(&current, location);
            if step == 0 {
                continue;
            }
            let cost = current.path_cost.saturating_add(step);
            if !self.config.admits(cost) {
                continue;
            }
            let from_direction = (dir + 3) % 6;

            match self.arena.lookup(location) {
                None => {
                    let node = PathNode {
                        location,
                        path_cost: cost,
                        from_direction,
                    };
                    let next = self.arena.insert(node, Some(id));
                    self.enqueue(next);
                    if self.config.permissive {
                        self.ready.push_back(next);
                    }
                }
                Some(existing) => {
                    let entry = self.arena.get_mut(existing);
                    if !entry.settled && cost < entry.node.path_cost {
                        entry.node.path_cost = cost;
                        entry.node.from_direction = from_direction;
                        entry.ancestor = Some(id);
                        self.enqueue(existing);
                    }
                }
            }
        }
        Some(id)
    }

    fn run_until<T>(mut self, mut is_target: T) -> Option<Vec<PathNode>>
    where
        T: FnMut(Hex) -> bool,
    {
        let origin = self.origin;
        while let Some(id) = self.settle_next() {
            let node = self.arena.get(id).node;
            if is_target(node.location) {
                let path = self.arena.path_to(id);
                tracing::debug!(
                    %origin,
                    location = %node.location,
                    cost = node.path_cost,
                    visited = self.visited(),
                    "weighted path found"
                );
                return Some(path);
            }
        }
        tracing::debug!(%origin, visited = self.visited(), "no weighted path");
        None
    }
}

impl<F> Iterator for WeightedSpread<F>
where
    F: FnMut(&PathNode, Hex) -> u32,
{
    type Item = PathNode;

    fn next(&mut self) -> Option<PathNode> {
        loop {
            if let Some(id) = self.ready.pop_front() {
                return Some(self.arena.get(id).node);
            }
            let id = self.settle_next()?;
            if !self.config.permissive && id != NodeId::ROOT {
                return Some(self.arena.get(id).node);
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::within_range;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use rustc_hash::FxHashSet;

    fn assert_connected(origin: Hex, path: &[PathNode]) {
        let mut previous = origin;
        for node in path {
            assert_eq!(node.location.distance_to(previous), 1);
            assert_eq!(node.ancestor(), previous);
            previous = node.location;
        }
    }

    /// Plain Dijkstra over a bounded disc, for cross-checking
    fn reference_costs(origin: Hex, radius: i32, enter_cost: impl Fn(Hex) -> u32) -> FxHashMap<Hex, u32> {
        let mut best: FxHashMap<Hex, u32> = FxHashMap::default();
        best.insert(origin, 0);
        let mut heap = BinaryHeap::new();
        heap.push(Reverse((0u32, origin)));
        while let Some(Reverse((cost, cell))) = heap.pop() {
            if best.get(&cell).map_or(false, |&c| c < cost) {
                continue;
            }
            for next in cell.neighbors() {
                if next.distance_to(origin) > radius {
                    continue;
                }
                let step = enter_cost(next);
                if step == 0 {
                    continue;
                }
                let total = cost + step;
                if best.get(&next).map_or(true, |&c| total < c) {
                    best.insert(next, total);
                    heap.push(Reverse((total, next)));
                }
            }
        }
        best
    }

    #[test]
    fn test_path_node_ancestor() {
        let node = PathNode {
            location: Hex::new(2, 2),
            path_cost: 3,
            from_direction: 3,
        };
        assert_eq!(node.ancestor(), Hex::new(1, 2));
        assert_eq!(path_cost(&[node]), 3);
        assert_eq!(path_cost(&[]), 0);
    }

    #[test]
    fn test_spread_open_field() {
        let origin = Hex::new(1, -2);
        let nodes: Vec<PathNode> = spread(origin, 3, |_| false).collect();
        assert_eq!(nodes.len(), 36);
        let cells: FxHashSet<Hex> = nodes.iter().map(|n| n.location).collect();
        let expected: FxHashSet<Hex> = within_range(origin, 3, false).filter(|h| *h != origin).collect();
        assert_eq!(cells, expected);
        for node in &nodes {
            assert_eq!(node.path_cost as i32, node.location.distance_to(origin));
            assert_eq!(node.ancestor().distance_to(origin) as u32, node.path_cost - 1);
        }
        // Nearest first
        assert!(nodes.windows(2).all(|w| w[0].path_cost <= w[1].path_cost));
    }

    #[test]
    fn test_spread_negative_range() {
        assert_eq!(spread(Hex::ORIGIN, -2, |_| false).count(), 18);
        assert_eq!(spread(Hex::ORIGIN, 0, |_| false).count(), 0);
    }

    #[test]
    fn test_spread_reports_visited() {
        let mut flood = spread(Hex::ORIGIN, 1, |_| false);
        assert_eq!(flood.visited(), 1);
        flood.next();
        assert_eq!(flood.visited(), 7);
    }

    #[test]
    fn test_spread_matches_breadth_first_costs() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let walls: FxHashSet<Hex> = within_range(Hex::ORIGIN, 8, false)
            .filter(|h| !h.is_origin() && rng.gen_bool(0.3))
            .collect();
        let nodes: Vec<PathNode> = spread(Hex::ORIGIN, 8, |h| walls.contains(&h) || h.axial_length() > 8).collect();
        let expected = reference_costs(Hex::ORIGIN, 8, |h| if walls.contains(&h) { 0 } else { 1 });

        let expected_in_range = expected.iter().filter(|(h, &c)| !h.is_origin() && c <= 8).count();
        assert_eq!(nodes.len(), expected_in_range);
        for node in &nodes {
            assert!(!walls.contains(&node.location));
            assert_eq!(Some(&node.path_cost), expected.get(&node.location));
        }
    }

    #[test]
    fn test_find_path_straight() {
        let origin = Hex::new(-2, 1);
        let target = Hex::new(3, -4);
        let path = find_path(origin, target, |_| false).unwrap();
        assert_eq!(path.len() as i32, origin.distance_to(target));
        assert_eq!(path.last().map(|n| n.location), Some(target));
        assert_connected(origin, &path);
        for (i, node) in path.iter().enumerate() {
            assert_eq!(node.path_cost as usize, i + 1);
        }
    }

    #[test]
    fn test_find_path_to_self() {
        let origin = Hex::new(4, 4);
        assert_eq!(find_path(origin, origin, |_| false), Some(vec![]));
    }

    #[test]
    fn test_find_path_around_wall() {
        // Wall across the direct route, open at the ends
        let walls: FxHashSet<Hex> = (-2..=2).map(|r| Hex::new(1, r)).collect();
        let path = find_path(Hex::ORIGIN, Hex::new(2, 0), |h| walls.contains(&h)).unwrap();
        assert!(path.len() > 2);
        assert!(path.iter().all(|n| !walls.contains(&n.location)));
        assert_connected(Hex::ORIGIN, &path);
    }

    #[test]
    fn test_find_path_enclosed_target() {
        let target = Hex::new(3, 0);
        let result = find_path(Hex::ORIGIN, target, |h| h.distance_to(target) == 1 || h.axial_length() > 6);
        assert_eq!(result, None);
    }

    #[test]
    fn test_find_path_where_nearest() {
        let goals = [Hex::new(4, 0), Hex::new(-2, 0), Hex::new(0, 5)];
        let path = find_path_where(Hex::ORIGIN, |h| goals.contains(&h), |_| false).unwrap();
        assert_eq!(path.last().map(|n| n.location), Some(Hex::new(-2, 0)));
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_weighted_uniform_cost() {
        let target = Hex::new(-3, 5);
        let path = Pathfinder::new(Hex::ORIGIN, |_: &PathNode, _| 1).path_to(target).unwrap();
        assert_eq!(path.len() as i32, target.axial_length());
        assert_eq!(path_cost(&path), 5);
        assert_connected(Hex::ORIGIN, &path);
    }

    #[test]
    fn test_weighted_avoids_expensive_cells() {
        let swamp: FxHashSet<Hex> = (-1..=1).map(|r| Hex::new(1, r)).collect();
        let cost = |_: &PathNode, to: Hex| if swamp.contains(&to) { 10 } else { 1 };
        let path = Pathfinder::new(Hex::ORIGIN, cost).path_to(Hex::new(2, 0)).unwrap();
        assert!(path.iter().all(|n| !swamp.contains(&n.location)));
        assert_eq!(path_cost(&path), path.len() as u32);
        assert!(path_cost(&path) < 11);
    }

    #[test]
    fn test_weighted_impassable() {
        let target = Hex::new(2, 0);
        let cost = |_: &PathNode, to: Hex| {
            if to.distance_to(target) == 1 || to.axial_length() > 5 {
                0
            } else {
                1
            }
        };
        assert_eq!(Pathfinder::new(Hex::ORIGIN, cost).path_to(target), None);
    }

    #[test]
    fn test_weighted_spread_matches_dijkstra() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let costs: FxHashMap<Hex, u32> = within_range(Hex::ORIGIN, 12, false).map(|h| (h, rng.gen_range(0..5))).collect();
        let enter = |h: Hex| costs.get(&h).copied().unwrap_or(0);
        let expected = reference_costs(Hex::ORIGIN, 12, enter);

        let nodes: Vec<PathNode> = Pathfinder::new(Hex::ORIGIN, |_: &PathNode, to| enter(to)).spread(12, false).collect();
        let expected_in_range = expected.iter().filter(|(h, &c)| !h.is_origin() && c <= 12).count();
        assert_eq!(nodes.len(), expected_in_range);
        for node in &nodes {
            assert_eq!(Some(&node.path_cost), expected.get(&node.location), "{}", node.location);
        }
        // Settled order is non-decreasing in cost
        assert!(nodes.windows(2).all(|w| w[0].path_cost <= w[1].path_cost));
    }

    #[test]
    fn test_permissive_yields_each_cell_once() {
        let cost = |_: &PathNode, to: Hex| if to.q == 1 { 3 } else { 1 };
        let strict: FxHashSet<Hex> = Pathfinder::new(Hex::ORIGIN, cost).spread(4, false).map(|n| n.location).collect();
        let permissive: Vec<Hex> = Pathfinder::new(Hex::ORIGIN, cost).spread(4, true).map(|n| n.location).collect();
        let unique: FxHashSet<Hex> = permissive.iter().copied().collect();
        assert_eq!(permissive.len(), unique.len());
        assert_eq!(unique, strict);
    }

    #[test]
    fn test_uniform_on_entry_with_unit_costs() {
        let pathfinder = Pathfinder::new(Hex::ORIGIN, |_: &PathNode, _| 1).uniform_on_entry(true);
        assert!(pathfinder.config().uniform_on_entry);
        let nodes: Vec<PathNode> = pathfinder.spread(4, false).collect();
        assert_eq!(nodes.len(), 60);
        for node in &nodes {
            assert_eq!(node.path_cost as i32, node.location.axial_length());
        }
    }

    #[test]
    fn test_path_where_weighted() {
        let path = Pathfinder::builder(Hex::ORIGIN)
            .move_cost(|_: &PathNode, _| 2)
            .range(20)
            .build()
            .unwrap()
            .path_where(|h| h.r == 3)
            .unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path_cost(&path), 6);
    }

    /// Unit steps, except the origin cannot step straight onto (1, 0)
    fn detour(from: &PathNode, to: Hex) -> u32 {
        if from.location == Hex::ORIGIN && to == Hex::new(1, 0) {
            0
        } else {
            1
        }
    }

    #[test]
    fn test_path_search_settles_cells_near_origin_first() {
        // (1, 0) and (1, 1) both cost 2, but (1, 0) is found after (1, 1)
        let goals = [Hex::new(1, 1), Hex::new(1, 0)];
        let path = Pathfinder::new(Hex::ORIGIN, detour).path_where(|h| goals.contains(&h)).unwrap();
        let cells: Vec<Hex> = path.iter().map(|n| n.location).collect();
        assert_eq!(cells, vec![Hex::new(0, 1), Hex::new(1, 0)]);
        assert_eq!(path_cost(&path), 2);

        let mut search = WeightedSpread::new(Hex::ORIGIN, detour, SearchConfig::default(), true);
        let mut settled = Vec::new();
        while settled.len() < 8 {
            let id = search.settle_next().unwrap();
            settled.push(search.arena.get(id).node);
        }
        assert_eq!(settled[6].location, Hex::new(1, 0));
        assert_eq!(settled[7].path_cost, 2);
        assert_eq!(settled[7].location.axial_length(), 2);
    }

    #[test]
    fn test_spread_settles_equal_costs_in_discovery_order() {
        let first_far = Pathfinder::new(Hex::ORIGIN, detour)
            .spread(2, false)
            .find(|n| n.path_cost == 2)
            .map(|n| n.location);
        assert_eq!(first_far, Some(Hex::new(1, 1)));
    }

    #[test]
    fn test_builder_requires_move_cost() {
        let result = PathfinderBuilder::<fn(&PathNode, Hex) -> u32>::new(Hex::ORIGIN).build();
        assert_eq!(result.err(), Some(GridError::MissingArgument("move_cost")));
    }

    #[test]
    fn test_builder_config() {
        let config = SearchConfig::bounded(2).with_permissive(true);
        let pathfinder = Pathfinder::builder(Hex::ORIGIN)
            .move_cost(|_: &PathNode, _| 1)
            .config(config)
            .build()
            .unwrap();
        assert_eq!(pathfinder.config(), &config);
        assert_eq!(pathfinder.expand().count(), 18);
    }
}
