//! Common test utilities and fixture graphs.
//!
//! The campus fixture is a small block of streets around a few buildings plus
//! a two-node island that is not connected to the rest of the graph.

use campus_route_lib::{
    build_graph, BuildingRecord, Graph, GraphBuildOptions, IntersectionId, IntersectionRecord,
};
use tracing_subscriber::EnvFilter;

/// Install a test-friendly tracing subscriber once per test binary.
///
/// Honours `RUST_LOG`; defaults to `warn`.
#[allow(dead_code)]
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

#[allow(dead_code)]
pub fn campus_intersections() -> Vec<IntersectionRecord> {
    vec![
        IntersectionRecord::new(1, ["College St", "Huron St"], (43.6600, -79.4000)),
        IntersectionRecord::new(2, ["College St", "St George St"], (43.6600, -79.3990)),
        IntersectionRecord::new(3, ["College St", "King's College Rd"], (43.6600, -79.3980)),
        IntersectionRecord::new(4, ["King's College Rd", "Hoskin Ave"], (43.6610, -79.3980)),
        IntersectionRecord::new(5, ["St George St", "Russell St"], (43.6610, -79.3990)),
        IntersectionRecord::new(6, ["St George St", "Harbord St"], (43.6620, -79.3990)),
        IntersectionRecord::new(7, ["Bloor St", "Avenue Rd"], (43.6700, -79.3900)),
        IntersectionRecord::new(8, ["Bloor St", "Queen's Park"], (43.6701, -79.3901)),
    ]
}

#[allow(dead_code)]
pub fn campus_connections() -> Vec<(IntersectionId, IntersectionId)> {
    vec![
        (1, 2),
        (2, 3),
        (3, 4),
        (2, 5),
        (5, 6),
        (4, 5),
        (7, 8),
        // Source data lists most streets from both ends.
        (2, 1),
        (6, 5),
    ]
}

#[allow(dead_code)]
pub fn campus_buildings() -> Vec<BuildingRecord> {
    vec![
        BuildingRecord::new("BA", "Bahen Centre", ["study", "microwave"], (43.65995, -79.39995)),
        BuildingRecord::new("SS", "Sidney Smith Hall", ["study", "dining"], (43.66205, -79.39905)),
        BuildingRecord::new("GB", "Galbraith Building", ["coffee"], (43.66002, -79.39802)),
        BuildingRecord::new("CAFE_ON", "Russell Street Cafe", ["coffee"], (43.66101, -79.39901)),
        BuildingRecord::new("CAFE_OFF", "Hoskin Espresso", ["coffee"], (43.6611, -79.3979)),
        BuildingRecord::new("TTC", "Campus Shuttle Stop", ["transportation"], (43.6609, -79.3981)),
        BuildingRecord::new("ISLAND", "Island Library", ["library"], (43.67002, -79.39002)),
    ]
}

/// Campus fixture built with default options.
#[allow(dead_code)]
pub fn campus_graph() -> Graph {
    build_graph(
        &campus_intersections(),
        &campus_connections(),
        &campus_buildings(),
        &GraphBuildOptions::default(),
    )
    .expect("campus fixture builds")
}

/// Irregular `rows x cols` grid with one diagonal per cell.
///
/// Coordinates are nudged per node so that edge weights differ, giving the
/// solver real choices to make.
#[allow(dead_code)]
pub fn grid_graph(rows: u64, cols: u64) -> Graph {
    let id = |r: u64, c: u64| r * cols + c + 1;

    let mut intersections = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            let node = id(r, c);
            let nudge = ((node * 37) % 11) as f64 * 0.00003;
            intersections.push(IntersectionRecord::new(
                node,
                [format!("Row {r}"), format!("Column {c}")],
                (43.66 + r as f64 * 0.001 + nudge, -79.40 + c as f64 * 0.001 - nudge),
            ));
        }
    }

    let mut connections = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            if c + 1 < cols {
                connections.push((id(r, c), id(r, c + 1)));
            }
            if r + 1 < rows {
                connections.push((id(r, c), id(r + 1, c)));
            }
            if r + 1 < rows && c + 1 < cols && (r + c) % 2 == 0 {
                connections.push((id(r, c), id(r + 1, c + 1)));
            }
        }
    }

    build_graph(&intersections, &connections, &[], &GraphBuildOptions::default())
        .expect("grid fixture builds")
}
