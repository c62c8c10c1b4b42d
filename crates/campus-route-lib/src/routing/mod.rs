//! Stopover routing between campus buildings.
//!
//! This module provides:
//! - [`RouteRequest`] - High-level routing request (endpoints plus categories)
//! - [`RouteBundle`] - Primary path plus one [`Stopover`] per requested category
//! - [`route_with_stopovers`] - Branching router over any [`PathSolver`]
//! - [`route_with_stopovers_parallel`] - Same contract, branches computed on the rayon pool
//! - [`plan_route`] - Convenience entry point using [`DijkstraSolver`]
//!
//! # Branching
//!
//! The primary path is computed between the intersections nearest to the two
//! buildings. For every requested category the router picks the
//! (building, primary-path intersection) pair with the smallest great-circle
//! distance and attaches a branch path from that intersection to the
//! building's nearest intersection. Categories nobody offers leave an empty
//! slot instead of failing the request.
//!
//! # Example
//!
//! ```ignore
//! use campus_route_lib::{plan_route, Category, RouteRequest};
//!
//! let request = RouteRequest::direct("BA", "SS").with_categories([Category::Coffee]);
//! let bundle = plan_route(&graph, &request)?;
//! println!("{} branches", bundle.branch_count());
//! ```

mod planner;

pub use planner::{DijkstraSolver, PathSolver};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::category::Category;
use crate::error::{Error, Result};
use crate::graph::{Building, Graph, IntersectionId};
use crate::path::Path;

/// High-level routing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub start: String,
    pub end: String,
    pub categories: Vec<Category>,
    /// Compute stopover branches on the rayon thread pool.
    pub parallel: bool,
}

impl RouteRequest {
    /// Request for a plain start-to-end route without stopovers.
    pub fn direct(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            categories: Vec::new(),
            parallel: false,
        }
    }

    pub fn with_categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }

    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }
}

/// Side trip chosen for one requested category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stopover {
    pub category: Category,
    /// Code of the chosen building; `None` when no building offers the category.
    pub building: Option<String>,
    /// Primary-path intersection the branch leaves from.
    pub anchor: Option<IntersectionId>,
    /// Branch from `anchor` to the building's nearest intersection.
    pub path: Option<Path>,
}

impl Stopover {
    fn vacant(category: Category) -> Self {
        Self {
            category,
            building: None,
            anchor: None,
            path: None,
        }
    }

    /// `true` when no building carries the category.
    pub fn is_vacant(&self) -> bool {
        self.building.is_none()
    }
}

/// Result of a stopover routing query, handed to presentation layers as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteBundle {
    pub start: String,
    pub end: String,
    pub primary: Path,
    pub primary_nodes: Vec<IntersectionId>,
    /// One entry per requested category, in request order.
    pub stopovers: Vec<Stopover>,
}

impl RouteBundle {
    /// Number of stopovers that produced a branch path.
    pub fn branch_count(&self) -> usize {
        self.stopovers
            .iter()
            .filter(|stopover| stopover.path.is_some())
            .count()
    }

    /// Primary distance plus every branch, in metres.
    pub fn total_distance(&self) -> f64 {
        self.primary.distance
            + self
                .stopovers
                .iter()
                .filter_map(|stopover| stopover.path.as_ref())
                .map(|path| path.distance)
                .sum::<f64>()
    }
}

/// Compute a route using [`DijkstraSolver`].
pub fn plan_route(graph: &Graph, request: &RouteRequest) -> Result<RouteBundle> {
    let solver = DijkstraSolver;
    if request.parallel {
        route_with_stopovers_parallel(
            graph,
            &solver,
            &request.start,
            &request.end,
            &request.categories,
        )
    } else {
        route_with_stopovers(
            graph,
            &solver,
            &request.start,
            &request.end,
            &request.categories,
        )
    }
}

/// Primary route between two buildings plus one branch per category.
///
/// Fails with [`Error::UnknownBuilding`] for unknown codes and
/// [`Error::RouteNotFound`] when the buildings are not connected. Categories
/// without buildings, and branches that cannot be reached, do not fail the
/// request.
pub fn route_with_stopovers<S>(
    graph: &Graph,
    solver: &S,
    start_code: &str,
    end_code: &str,
    categories: &[Category],
) -> Result<RouteBundle>
where
    S: PathSolver + ?Sized,
{
    let (primary, primary_nodes) = primary_route(graph, solver, start_code, end_code)?;
    let stopovers = categories
        .iter()
        .map(|&category| plan_stopover(graph, solver, &primary_nodes, category))
        .collect::<Result<Vec<_>>>()?;

    Ok(RouteBundle {
        start: start_code.to_string(),
        end: end_code.to_string(),
        primary,
        primary_nodes,
        stopovers,
    })
}

/// [`route_with_stopovers`] with branch searches spread over the rayon pool.
///
/// Output order and content are identical to the sequential version.
pub fn route_with_stopovers_parallel<S>(
    graph: &Graph,
    solver: &S,
    start_code: &str,
    end_code: &str,
    categories: &[Category],
) -> Result<RouteBundle>
where
    S: PathSolver + ?Sized,
{
    let (primary, primary_nodes) = primary_route(graph, solver, start_code, end_code)?;
    let stopovers = categories
        .par_iter()
        .map(|&category| plan_stopover(graph, solver, &primary_nodes, category))
        .collect::<Result<Vec<_>>>()?;

    Ok(RouteBundle {
        start: start_code.to_string(),
        end: end_code.to_string(),
        primary,
        primary_nodes,
        stopovers,
    })
}

fn primary_route<S>(
    graph: &Graph,
    solver: &S,
    start_code: &str,
    end_code: &str,
) -> Result<(Path, Vec<IntersectionId>)>
where
    S: PathSolver + ?Sized,
{
    let start = graph.require_building(start_code)?;
    let end = graph.require_building(end_code)?;

    let primary = solver
        .shortest_path(
            graph,
            start.nearest_intersection(),
            end.nearest_intersection(),
        )?
        .ok_or_else(|| Error::RouteNotFound {
            start: start_code.to_string(),
            goal: end_code.to_string(),
        })?;
    let nodes = primary.nodes();

    debug!(
        solver = solver.name(),
        start = start_code,
        end = end_code,
        hops = primary.hop_count(),
        distance = primary.distance,
        "computed primary path"
    );

    Ok((primary, nodes))
}

fn plan_stopover<S>(
    graph: &Graph,
    solver: &S,
    primary_nodes: &[IntersectionId],
    category: Category,
) -> Result<Stopover>
where
    S: PathSolver + ?Sized,
{
    let Some((building, anchor)) = closest_candidate(graph, primary_nodes, category) else {
        warn!(%category, "no building offers category; leaving stopover empty");
        return Ok(Stopover::vacant(category));
    };

    let path = solver.shortest_path(graph, anchor, building.nearest_intersection())?;
    match &path {
        Some(branch) => debug!(
            %category,
            building = %building.code,
            anchor,
            hops = branch.hop_count(),
            "computed stopover branch"
        ),
        None => warn!(
            %category,
            building = %building.code,
            anchor,
            "stopover building unreachable from primary path"
        ),
    }

    Ok(Stopover {
        category,
        building: Some(building.code.clone()),
        anchor: Some(anchor),
        path,
    })
}

/// Building with `category` closest to any primary-path intersection.
///
/// Buildings are scanned in code order and intersections in path order; the
/// first pair at the minimum distance wins.
fn closest_candidate<'g>(
    graph: &'g Graph,
    primary_nodes: &[IntersectionId],
    category: Category,
) -> Option<(&'g Building, IntersectionId)> {
    let mut best: Option<(&Building, IntersectionId, f64)> = None;
    for building in graph.buildings_with_category(category) {
        for &node_id in primary_nodes {
            let Some(node) = graph.intersection(node_id) else {
                continue;
            };
            let distance = node.coordinate.distance_to(&building.coordinate);
            if best.map_or(true, |(_, _, closest)| distance < closest) {
                best = Some((building, node_id, distance));
            }
        }
    }
    best.map(|(building, node_id, _)| (building, node_id))
}
