use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::category::Category;
use crate::error::{Error, Result};
use crate::geo::Coordinate;

/// Numeric identifier for an intersection.
pub type IntersectionId = u64;

/// Index of an edge inside the graph's edge arena.
pub type EdgeId = usize;

/// Minimum Jaro-Winkler similarity for a building code to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// How category strings outside the vocabulary are handled during construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryPolicy {
    /// Fail construction with [`Error::UnknownCategory`].
    #[default]
    Reject,
    /// Drop the unknown value and log a warning.
    Ignore,
}

/// Options applied while building a [`Graph`].
#[derive(Debug, Clone, Default)]
pub struct GraphBuildOptions {
    pub category_policy: CategoryPolicy,
}

/// Intersection row handed over by the loading collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionRecord {
    pub id: IntersectionId,
    #[serde(default)]
    pub names: Vec<String>,
    pub coordinate: Coordinate,
}

impl IntersectionRecord {
    pub fn new<I, S>(id: IntersectionId, names: I, coordinate: impl Into<Coordinate>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            names: names.into_iter().map(Into::into).collect(),
            coordinate: coordinate.into(),
        }
    }
}

/// Building row handed over by the loading collaborator.
///
/// Categories stay as raw strings here; they are validated against the
/// vocabulary by [`build_graph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingRecord {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub categories: Vec<String>,
    pub coordinate: Coordinate,
}

impl BuildingRecord {
    pub fn new<I, S>(
        code: impl Into<String>,
        name: impl Into<String>,
        categories: I,
        coordinate: impl Into<Coordinate>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            code: code.into(),
            name: name.into(),
            categories: categories.into_iter().map(Into::into).collect(),
            coordinate: coordinate.into(),
        }
    }
}

/// Street junction within the campus graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    pub id: IntersectionId,
    pub names: BTreeSet<String>,
    pub coordinate: Coordinate,
    edges: Vec<EdgeId>,
}

impl Intersection {
    /// Incident edges, ordered by ascending neighbour identifier.
    pub fn edge_ids(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn degree(&self) -> usize {
        self.edges.len()
    }
}

/// Undirected street segment weighted by great-circle length in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    endpoints: [IntersectionId; 2],
    weight: f64,
}

impl Edge {
    fn between(a: &Intersection, b: &Intersection) -> Self {
        let endpoints = if a.id <= b.id {
            [a.id, b.id]
        } else {
            [b.id, a.id]
        };
        Self {
            endpoints,
            weight: a.coordinate.distance_to(&b.coordinate),
        }
    }

    /// Both endpoints, lower identifier first.
    pub fn endpoints(&self) -> [IntersectionId; 2] {
        self.endpoints
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn connects(&self, id: IntersectionId) -> bool {
        self.endpoints.contains(&id)
    }

    /// The endpoint that is not `id`, or `None` when `id` is not on this edge.
    pub fn other_endpoint(&self, id: IntersectionId) -> Option<IntersectionId> {
        match self.endpoints {
            [a, b] if a == id => Some(b),
            [a, b] if b == id => Some(a),
            _ => None,
        }
    }
}

/// Point of interest bound to its nearest intersection.
#[derive(Debug, Clone, PartialEq)]
pub struct Building {
    pub code: String,
    pub name: String,
    pub categories: BTreeSet<Category>,
    pub coordinate: Coordinate,
    nearest_intersection: IntersectionId,
}

impl Building {
    /// Intersection with the smallest great-circle distance to this building.
    pub fn nearest_intersection(&self) -> IntersectionId {
        self.nearest_intersection
    }

    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }
}

/// Immutable campus graph.
///
/// Intersections and buildings iterate in ascending identifier/code order.
/// Edges live in a shared arena; intersections refer to them by [`EdgeId`].
#[derive(Debug, Clone, Default)]
pub struct Graph {
    intersections: BTreeMap<IntersectionId, Intersection>,
    edges: Vec<Edge>,
    buildings: BTreeMap<String, Building>,
}

impl Graph {
    pub fn intersection(&self, id: IntersectionId) -> Option<&Intersection> {
        self.intersections.get(&id)
    }

    /// Lookup an intersection, failing with [`Error::UnknownIntersection`].
    pub fn require_intersection(&self, id: IntersectionId) -> Result<&Intersection> {
        self.intersection(id)
            .ok_or(Error::UnknownIntersection { id })
    }

    pub fn contains_intersection(&self, id: IntersectionId) -> bool {
        self.intersections.contains_key(&id)
    }

    pub fn intersections(&self) -> impl Iterator<Item = &Intersection> {
        self.intersections.values()
    }

    pub fn intersection_ids(&self) -> impl Iterator<Item = IntersectionId> + '_ {
        self.intersections.keys().copied()
    }

    pub fn intersection_count(&self) -> usize {
        self.intersections.len()
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Incident edges of `id` with the neighbour on the other side, in
    /// ascending neighbour order. Unknown identifiers yield nothing.
    pub fn neighbours(
        &self,
        id: IntersectionId,
    ) -> impl Iterator<Item = (EdgeId, &Edge, IntersectionId)> + '_ {
        self.intersections
            .get(&id)
            .map(|node| node.edges.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |&edge_id| {
                let edge = self.edges.get(edge_id)?;
                let neighbour = edge.other_endpoint(id)?;
                Some((edge_id, edge, neighbour))
            })
    }

    /// Edge joining `a` and `b`, found by scanning the incident edges of `a`.
    pub fn find_edge(&self, a: IntersectionId, b: IntersectionId) -> Option<&Edge> {
        self.neighbours(a)
            .find(|(_, _, neighbour)| *neighbour == b)
            .map(|(_, edge, _)| edge)
    }

    pub fn building(&self, code: &str) -> Option<&Building> {
        self.buildings.get(code)
    }

    /// Lookup a building, failing with suggestions for near-miss codes.
    pub fn require_building(&self, code: &str) -> Result<&Building> {
        self.building(code).ok_or_else(|| Error::UnknownBuilding {
            code: code.to_string(),
            suggestions: self.fuzzy_building_matches(code, 3),
        })
    }

    pub fn buildings(&self) -> impl Iterator<Item = &Building> {
        self.buildings.values()
    }

    pub fn building_count(&self) -> usize {
        self.buildings.len()
    }

    /// Buildings tagged with `category`, in ascending code order.
    pub fn buildings_with_category(
        &self,
        category: Category,
    ) -> impl Iterator<Item = &Building> + '_ {
        self.buildings
            .values()
            .filter(move |building| building.has_category(category))
    }

    /// Buildings whose nearest intersection is `id`.
    pub fn buildings_near(&self, id: IntersectionId) -> Vec<&Building> {
        self.buildings
            .values()
            .filter(|building| building.nearest_intersection == id)
            .collect()
    }

    /// Intersection closest to `coordinate`; ties go to the lowest identifier.
    pub fn nearest_intersection(&self, coordinate: Coordinate) -> Option<IntersectionId> {
        nearest_in(&self.intersections, coordinate)
    }

    /// Building codes similar to `query`, best match first.
    pub fn fuzzy_building_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .buildings
            .keys()
            .map(|code| (strsim::jaro_winkler(&needle, &code.to_lowercase()), code.as_str()))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, code)| code.to_string())
            .collect()
    }
}

/// Build a fully linked graph from loader records.
///
/// Connections are deduplicated per unordered pair, adjacency lists are sorted
/// by neighbour identifier, and every building is bound to its nearest
/// intersection.
pub fn build_graph(
    intersections: &[IntersectionRecord],
    connections: &[(IntersectionId, IntersectionId)],
    buildings: &[BuildingRecord],
    options: &GraphBuildOptions,
) -> Result<Graph> {
    let mut nodes = BTreeMap::new();
    for record in intersections {
        if nodes.contains_key(&record.id) {
            return Err(Error::DuplicateIntersection { id: record.id });
        }
        nodes.insert(
            record.id,
            Intersection {
                id: record.id,
                names: record.names.iter().cloned().collect(),
                coordinate: record.coordinate,
                edges: Vec::new(),
            },
        );
    }

    let edges = link_edges(&mut nodes, connections)?;
    let buildings = place_buildings(&nodes, buildings, options.category_policy)?;

    info!(
        intersections = nodes.len(),
        edges = edges.len(),
        buildings = buildings.len(),
        "built campus graph"
    );

    Ok(Graph {
        intersections: nodes,
        edges,
        buildings,
    })
}

fn link_edges(
    nodes: &mut BTreeMap<IntersectionId, Intersection>,
    connections: &[(IntersectionId, IntersectionId)],
) -> Result<Vec<Edge>> {
    let mut seen = HashSet::new();
    let mut edges = Vec::new();
    let mut duplicates = 0usize;

    for &(a, b) in connections {
        if a == b {
            return Err(Error::SelfLoop { id: a });
        }
        let edge = match (nodes.get(&a), nodes.get(&b)) {
            (Some(first), Some(second)) => Edge::between(first, second),
            (None, _) => return Err(Error::UnknownIntersection { id: a }),
            (_, None) => return Err(Error::UnknownIntersection { id: b }),
        };
        if !seen.insert((a.min(b), a.max(b))) {
            duplicates += 1;
            continue;
        }

        let edge_id = edges.len();
        edges.push(edge);
        for endpoint in [a, b] {
            if let Some(node) = nodes.get_mut(&endpoint) {
                node.edges.push(edge_id);
            }
        }
    }

    for node in nodes.values_mut() {
        let id = node.id;
        node.edges
            .sort_by_key(|&edge_id| edges.get(edge_id).and_then(|edge| edge.other_endpoint(id)));
    }

    if duplicates > 0 {
        debug!(duplicates, "skipped repeated connections");
    }

    Ok(edges)
}

fn place_buildings(
    nodes: &BTreeMap<IntersectionId, Intersection>,
    records: &[BuildingRecord],
    policy: CategoryPolicy,
) -> Result<BTreeMap<String, Building>> {
    let mut buildings = BTreeMap::new();

    for record in records {
        if buildings.contains_key(&record.code) {
            return Err(Error::DuplicateBuilding {
                code: record.code.clone(),
            });
        }
        let categories = parse_categories(record, policy)?;
        let nearest_intersection =
            nearest_in(nodes, record.coordinate).ok_or(Error::NoIntersections)?;

        buildings.insert(
            record.code.clone(),
            Building {
                code: record.code.clone(),
                name: record.name.clone(),
                categories,
                coordinate: record.coordinate,
                nearest_intersection,
            },
        );
    }

    Ok(buildings)
}

fn parse_categories(record: &BuildingRecord, policy: CategoryPolicy) -> Result<BTreeSet<Category>> {
    let mut categories = BTreeSet::new();
    for raw in &record.categories {
        match (raw.parse::<Category>(), policy) {
            (Ok(category), _) => {
                categories.insert(category);
            }
            (Err(_), CategoryPolicy::Ignore) => {
                warn!(building = %record.code, category = %raw, "ignoring unknown category");
            }
            (Err(err), CategoryPolicy::Reject) => return Err(err),
        }
    }
    Ok(categories)
}

fn nearest_in(
    nodes: &BTreeMap<IntersectionId, Intersection>,
    coordinate: Coordinate,
) -> Option<IntersectionId> {
    let mut best: Option<(IntersectionId, f64)> = None;
    for node in nodes.values() {
        let distance = node.coordinate.distance_to(&coordinate);
        if best.map_or(true, |(_, closest)| distance < closest) {
            best = Some((node.id, distance));
        }
    }
    best.map(|(id, _)| id)
}
