//! Worlds and the accessibility relation.
//!
//! Backed by a `petgraph` directed graph whose nodes are [`WorldId`]s. Edge
//! insertion is idempotent and incrementally restores whatever closure the
//! frame conditions demand: symmetry inserts the reverse edge, transitivity
//! composes the new edge with both the predecessors of its source and the
//! successors of its target, and each of those insertions cascades in turn,
//! so the edge set is always a fixed point of the closure rules in force.
//!
//! Worlds are dense integers assigned monotonically and never removed — a
//! closed branch is modeled by discarding the whole candidate, not by
//! deleting worlds.

use std::fmt;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

use crate::frame::FrameProperties;

/// A possible world, identified by its position in the owning candidate.
///
/// Ids are unique within one candidate only; two candidates each have their
/// own world 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct WorldId(u32);

impl WorldId {
    /// Wrap a raw world number.
    pub fn new(raw: u32) -> Self {
        WorldId(raw)
    }

    /// The raw world number.
    pub fn get(self) -> u32 {
        self.0
    }

    /// The world number as a dense table index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// Directed accessibility relation over worlds, closed under the frame
/// conditions.
#[derive(Debug, Clone)]
pub struct AccessibilityGraph {
    frame: FrameProperties,
    graph: DiGraph<WorldId, ()>,
    /// Dense WorldId → NodeIndex lookup.
    nodes: Vec<NodeIndex>,
}

impl AccessibilityGraph {
    /// Create an empty graph governed by the given frame conditions.
    pub fn new(frame: FrameProperties) -> Self {
        Self {
            frame,
            graph: DiGraph::new(),
            nodes: Vec::new(),
        }
    }

    /// The frame conditions this graph enforces.
    pub fn frame(&self) -> FrameProperties {
        self.frame
    }

    /// Allocate the next world id and add it to the graph.
    ///
    /// The reflexive self-loop is the caller's business (the candidate routes
    /// inherited obligations per inserted edge, self-loops included).
    pub fn add_world(&mut self) -> WorldId {
        let id = WorldId::new(self.nodes.len() as u32);
        let idx = self.graph.add_node(id);
        self.nodes.push(idx);
        id
    }

    /// Whether the world id belongs to this graph.
    pub fn contains(&self, world: WorldId) -> bool {
        world.index() < self.nodes.len()
    }

    /// Number of worlds.
    pub fn world_count(&self) -> usize {
        self.nodes.len()
    }

    /// All world ids, ascending.
    pub fn world_ids(&self) -> impl Iterator<Item = WorldId> + '_ {
        (0..self.nodes.len() as u32).map(WorldId::new)
    }

    /// Whether the edge (from, to) is present.
    pub fn has_edge(&self, from: WorldId, to: WorldId) -> bool {
        self.contains(from)
            && self.contains(to)
            && self
                .graph
                .find_edge(self.nodes[from.index()], self.nodes[to.index()])
                .is_some()
    }

    /// Worlds directly accessible from `world`, ascending. Empty if the id is
    /// unknown, mirroring an empty neighborhood.
    pub fn successors(&self, world: WorldId) -> Vec<WorldId> {
        self.neighbors(world, Direction::Outgoing)
    }

    /// Worlds that directly access `world`, ascending.
    pub fn predecessors(&self, world: WorldId) -> Vec<WorldId> {
        self.neighbors(world, Direction::Incoming)
    }

    /// Whether `world` has any outgoing edge.
    pub fn has_successors(&self, world: WorldId) -> bool {
        self.contains(world)
            && self
                .graph
                .neighbors_directed(self.nodes[world.index()], Direction::Outgoing)
                .next()
                .is_some()
    }

    /// All edges as (from, to) pairs, sorted.
    pub fn edges(&self) -> Vec<(WorldId, WorldId)> {
        let mut edges: Vec<(WorldId, WorldId)> = self
            .graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(a, b)| (self.graph[a], self.graph[b]))
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Insert the edge (from, to), cascading closure edges as required by the
    /// frame conditions.
    ///
    /// Idempotent: inserting an edge already present (or already implied by
    /// closure) changes nothing. Returns every edge actually created, in
    /// insertion order, so the candidate can route inherited obligations
    /// across each one. Both worlds must exist in this graph.
    pub fn insert_edge(&mut self, from: WorldId, to: WorldId) -> Vec<(WorldId, WorldId)> {
        debug_assert!(self.contains(from) && self.contains(to));
        let mut added = Vec::new();
        self.insert_edge_cascading(from, to, &mut added);
        added
    }

    fn insert_edge_cascading(
        &mut self,
        from: WorldId,
        to: WorldId,
        added: &mut Vec<(WorldId, WorldId)>,
    ) {
        if self.has_edge(from, to) {
            return;
        }
        self.graph
            .add_edge(self.nodes[from.index()], self.nodes[to.index()], ());
        added.push((from, to));

        if self.frame.symmetric {
            self.insert_edge_cascading(to, from, added);
        }
        if self.frame.transitive {
            for pred in self.predecessors(from) {
                self.insert_edge_cascading(pred, to, added);
            }
            for succ in self.successors(to) {
                self.insert_edge_cascading(from, succ, added);
            }
        }
    }

    fn neighbors(&self, world: WorldId, direction: Direction) -> Vec<WorldId> {
        if !self.contains(world) {
            return Vec::new();
        }
        let mut neighbors: Vec<WorldId> = self
            .graph
            .neighbors_directed(self.nodes[world.index()], direction)
            .map(|idx| self.graph[idx])
            .collect();
        neighbors.sort_unstable();
        neighbors
    }
}
