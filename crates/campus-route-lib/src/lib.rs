//! Campus routing library entry points.
//!
//! This crate builds an immutable campus graph from intersection, connection,
//! and building records, answers shortest-path queries between intersections,
//! and plans routes between buildings with category-driven stopovers. Loading
//! raw datasets and drawing maps are left to consumers; they should only depend
//! on the functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod category;
pub mod error;
pub mod geo;
pub mod graph;
pub mod output;
pub mod path;
pub mod queue;
pub mod routing;

#[cfg(test)]
mod test_helpers;

pub use category::Category;
pub use error::{Error, Result};
pub use geo::{haversine_distance, Coordinate, EARTH_RADIUS_M};
pub use graph::{
    build_graph, Building, BuildingRecord, CategoryPolicy, Edge, EdgeId, Graph, GraphBuildOptions,
    Intersection, IntersectionId, IntersectionRecord,
};
pub use output::{LegKind, RouteSummary, UnreachableStop};
pub use path::{dijkstra, shortest_path, walk_nodes, Path, SearchTree};
pub use queue::PriorityQueue;
pub use routing::{
    plan_route, route_with_stopovers, route_with_stopovers_parallel, DijkstraSolver, PathSolver,
    RouteBundle, RouteRequest, Stopover,
};
