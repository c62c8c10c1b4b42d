//! Path solving strategies.
//!
//! The stopover router only needs "shortest path between two intersections";
//! the [`PathSolver`] trait keeps it independent of the algorithm used.

use crate::error::Result;
use crate::graph::{Graph, IntersectionId};
use crate::path::{shortest_path, Path};

/// Strategy for computing a single shortest path.
///
/// Implementations must only read the graph so one solver can serve many
/// threads at once.
pub trait PathSolver: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Returns `Ok(None)` when `target` is unreachable from `source`.
    fn shortest_path(
        &self,
        graph: &Graph,
        source: IntersectionId,
        target: IntersectionId,
    ) -> Result<Option<Path>>;
}

/// Dijkstra with ascending-identifier tie-breaking.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraSolver;

impl PathSolver for DijkstraSolver {
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn shortest_path(
        &self,
        graph: &Graph,
        source: IntersectionId,
        target: IntersectionId,
    ) -> Result<Option<Path>> {
        shortest_path(graph, source, target)
    }
}
