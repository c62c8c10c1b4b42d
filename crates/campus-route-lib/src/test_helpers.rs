// Test-only helpers for `campus-route-lib` unit tests
#![allow(dead_code)]

use crate::error::Result;
use crate::graph::{
    build_graph, BuildingRecord, Graph, GraphBuildOptions, IntersectionId, IntersectionRecord,
};

/// Builder to assemble small graphs from loader records.
#[derive(Debug, Default)]
pub struct GraphFixture {
    intersections: Vec<IntersectionRecord>,
    connections: Vec<(IntersectionId, IntersectionId)>,
    buildings: Vec<BuildingRecord>,
}

impl GraphFixture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intersection(mut self, id: IntersectionId, latitude: f64, longitude: f64) -> Self {
        self.intersections.push(IntersectionRecord::new(
            id,
            [format!("Street {id}")],
            (latitude, longitude),
        ));
        self
    }

    pub fn connect(mut self, a: IntersectionId, b: IntersectionId) -> Self {
        self.connections.push((a, b));
        self
    }

    pub fn building(mut self, code: &str, categories: &[&str], latitude: f64, longitude: f64) -> Self {
        self.buildings.push(BuildingRecord::new(
            code,
            format!("{code} Hall"),
            categories.iter().copied(),
            (latitude, longitude),
        ));
        self
    }

    pub fn try_build(self, options: &GraphBuildOptions) -> Result<Graph> {
        build_graph(
            &self.intersections,
            &self.connections,
            &self.buildings,
            options,
        )
    }

    pub fn build(self) -> Graph {
        self.try_build(&GraphBuildOptions::default())
            .expect("fixture graph builds")
    }
}

/// Four intersections on a ~111 m square joined in the cycle 1-2-3-4-1.
pub fn square_graph() -> Graph {
    GraphFixture::new()
        .intersection(1, 0.0, 0.0)
        .intersection(2, 0.0, 0.001)
        .intersection(3, 0.001, 0.001)
        .intersection(4, 0.001, 0.0)
        .connect(1, 2)
        .connect(2, 3)
        .connect(3, 4)
        .connect(4, 1)
        .build()
}

/// Straight street 1-2-3-4 with side streets to 5 (off 3) and 6 (off 1).
///
/// `START` sits at 1 and `END` at 4. `CAFE_X` is next to 3 on the main
/// street, `CAFE_Y` sits at 5, `LIB` at 6. Nobody offers `gym`.
pub fn campus_graph() -> Graph {
    GraphFixture::new()
        .intersection(1, 0.0, 0.0)
        .intersection(2, 0.0, 0.001)
        .intersection(3, 0.0, 0.002)
        .intersection(4, 0.0, 0.003)
        .intersection(5, 0.001, 0.002)
        .intersection(6, -0.002, 0.0)
        .connect(1, 2)
        .connect(2, 3)
        .connect(3, 4)
        .connect(3, 5)
        .connect(1, 6)
        .building("START", &["study"], 0.0, -0.0001)
        .building("END", &[], 0.0, 0.0031)
        .building("CAFE_X", &["coffee"], 0.00001, 0.002)
        .building("CAFE_Y", &["coffee", "dining"], 0.0011, 0.002)
        .building("LIB", &["library"], -0.0021, 0.0)
        .build()
}
