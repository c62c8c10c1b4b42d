use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::graph::{Edge, Graph, IntersectionId};
use crate::queue::PriorityQueue;

/// Ordered edge sequence from `source` to `target`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    pub source: IntersectionId,
    pub target: IntersectionId,
    pub edges: Vec<Edge>,
    /// Total weight of `edges` in metres.
    pub distance: f64,
}

impl Path {
    fn empty(node: IntersectionId) -> Self {
        Self {
            source: node,
            target: node,
            edges: Vec::new(),
            distance: 0.0,
        }
    }

    /// Intersections visited, starting at `source`.
    pub fn nodes(&self) -> Vec<IntersectionId> {
        walk_nodes(self.source, &self.edges)
    }

    pub fn hop_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Expand an edge sequence into the intersections it visits.
///
/// Each step takes the endpoint that is not the previously visited node. A
/// zero-edge walk is just `[source]`. Walking stops early if an edge does not
/// touch the current node.
pub fn walk_nodes(source: IntersectionId, edges: &[Edge]) -> Vec<IntersectionId> {
    let mut nodes = Vec::with_capacity(edges.len() + 1);
    let mut current = source;
    nodes.push(current);
    for edge in edges {
        let Some(next) = edge.other_endpoint(current) else {
            break;
        };
        nodes.push(next);
        current = next;
    }
    nodes
}

/// Per-query Dijkstra state: distance labels, predecessors and settlement order.
#[derive(Debug, Clone)]
pub struct SearchTree {
    source: IntersectionId,
    distances: HashMap<IntersectionId, f64>,
    predecessors: HashMap<IntersectionId, IntersectionId>,
    settled: Vec<IntersectionId>,
    settled_set: HashSet<IntersectionId>,
}

impl SearchTree {
    pub fn source(&self) -> IntersectionId {
        self.source
    }

    /// Final or tentative distance label; `None` while still infinite.
    pub fn distance(&self, id: IntersectionId) -> Option<f64> {
        self.distances
            .get(&id)
            .copied()
            .filter(|distance| distance.is_finite())
    }

    pub fn predecessor(&self, id: IntersectionId) -> Option<IntersectionId> {
        self.predecessors.get(&id).copied()
    }

    pub fn is_settled(&self, id: IntersectionId) -> bool {
        self.settled_set.contains(&id)
    }

    /// Intersections in the order they were settled.
    pub fn settled_order(&self) -> &[IntersectionId] {
        &self.settled
    }

    /// Reconstruct the path to a settled `target` by following predecessors.
    pub fn path_to(&self, graph: &Graph, target: IntersectionId) -> Option<Path> {
        if !self.is_settled(target) {
            return None;
        }
        if target == self.source {
            return Some(Path::empty(target));
        }

        let mut edges = Vec::new();
        let mut current = target;
        while current != self.source {
            let previous = self.predecessor(current)?;
            edges.push(*graph.find_edge(previous, current)?);
            current = previous;
        }
        edges.reverse();

        Some(Path {
            source: self.source,
            target,
            distance: edges.iter().map(Edge::weight).sum(),
            edges,
        })
    }
}

/// Run Dijkstra from `source`, stopping once `target` is settled.
///
/// With `target` set to `None` the whole reachable component is settled. Every
/// intersection is queued up front in ascending identifier order and incident
/// edges are scanned in ascending neighbour order, so ties resolve the same
/// way on every run.
pub fn dijkstra(
    graph: &Graph,
    source: IntersectionId,
    target: Option<IntersectionId>,
) -> Result<SearchTree> {
    graph.require_intersection(source)?;
    if let Some(target) = target {
        graph.require_intersection(target)?;
    }

    let mut distances = HashMap::with_capacity(graph.intersection_count());
    let mut queue = PriorityQueue::with_capacity(graph.intersection_count());
    for id in graph.intersection_ids() {
        let initial = if id == source { 0.0 } else { f64::INFINITY };
        distances.insert(id, initial);
        queue.insert(initial, id);
    }

    let mut tree = SearchTree {
        source,
        distances,
        predecessors: HashMap::new(),
        settled: Vec::new(),
        settled_set: HashSet::new(),
    };

    while !queue.is_empty() {
        let current = queue.extract_min()?;
        let current_distance = tree
            .distances
            .get(&current)
            .copied()
            .unwrap_or(f64::INFINITY);
        if current_distance.is_infinite() {
            // Everything left in the frontier is unreachable.
            break;
        }

        tree.settled.push(current);
        tree.settled_set.insert(current);
        if target == Some(current) {
            break;
        }

        for (_, edge, neighbour) in graph.neighbours(current) {
            if tree.settled_set.contains(&neighbour) {
                continue;
            }
            let candidate = current_distance + edge.weight();
            let known = tree
                .distances
                .get(&neighbour)
                .copied()
                .unwrap_or(f64::INFINITY);
            if candidate < known {
                tree.distances.insert(neighbour, candidate);
                tree.predecessors.insert(neighbour, current);
                queue.decrease_priority(neighbour, candidate)?;
            }
        }
    }

    debug!(
        source,
        target = ?target,
        settled = tree.settled.len(),
        "dijkstra search finished"
    );

    Ok(tree)
}

/// Shortest path between two intersections.
///
/// Returns `Ok(None)` when `target` is unreachable from `source`, and an empty
/// path when they are the same intersection. Unknown identifiers fail with
/// [`crate::Error::UnknownIntersection`].
pub fn shortest_path(
    graph: &Graph,
    source: IntersectionId,
    target: IntersectionId,
) -> Result<Option<Path>> {
    graph.require_intersection(source)?;
    graph.require_intersection(target)?;
    if source == target {
        return Ok(Some(Path::empty(source)));
    }

    let tree = dijkstra(graph, source, Some(target))?;
    Ok(tree.path_to(graph, target))
}
