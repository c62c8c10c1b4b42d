use serde::Serialize;

use crate::category::Category;
use crate::error::{Error, Result};
use crate::geo::Coordinate;
use crate::graph::{Building, Graph, IntersectionId};
use crate::path::Path;
use crate::routing::RouteBundle;

/// Classifies a leg of a summarised route.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LegKind {
    Primary,
    Stopover,
}

/// Building at the end of a leg.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BuildingRef {
    pub code: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub nearest_intersection: IntersectionId,
}

impl From<&Building> for BuildingRef {
    fn from(building: &Building) -> Self {
        Self {
            code: building.code.clone(),
            name: building.name.clone(),
            coordinate: building.coordinate,
            nearest_intersection: building.nearest_intersection(),
        }
    }
}

/// Intersection visited along a leg.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Waypoint {
    pub index: usize,
    pub id: IntersectionId,
    pub coordinate: Coordinate,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
}

/// One drawable leg: the primary path or a stopover branch.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LegSummary {
    pub kind: LegKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<BuildingRef>,
    pub distance: f64,
    pub waypoints: Vec<Waypoint>,
}

/// Stopover whose building was chosen but cannot be reached from the primary path.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UnreachableStop {
    pub category: Category,
    pub destination: BuildingRef,
    /// Primary-path intersection the branch would have left from.
    pub anchor: Option<IntersectionId>,
}

/// Read-only view of a [`RouteBundle`] with names and coordinates resolved,
/// ready for a map renderer to consume.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub start: BuildingRef,
    pub end: BuildingRef,
    pub total_distance: f64,
    /// Primary leg first, then one leg per stopover that produced a branch.
    pub legs: Vec<LegSummary>,
    /// Categories for which no building was available.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unmatched: Vec<Category>,
    /// Categories matched to a building with no branch path to it.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unreachable: Vec<UnreachableStop>,
}

impl RouteSummary {
    /// Resolve every identifier in `bundle` against `graph`.
    pub fn from_bundle(graph: &Graph, bundle: &RouteBundle) -> Result<Self> {
        let start = graph.require_building(&bundle.start)?;
        let end = graph.require_building(&bundle.end)?;

        let mut legs = vec![LegSummary {
            kind: LegKind::Primary,
            category: None,
            destination: Some(BuildingRef::from(end)),
            distance: bundle.primary.distance,
            waypoints: waypoints(graph, &bundle.primary)?,
        }];
        let mut unmatched = Vec::new();
        let mut unreachable = Vec::new();

        for stopover in &bundle.stopovers {
            let Some(code) = &stopover.building else {
                unmatched.push(stopover.category);
                continue;
            };
            let building = graph.require_building(code)?;
            match &stopover.path {
                Some(path) => legs.push(LegSummary {
                    kind: LegKind::Stopover,
                    category: Some(stopover.category),
                    destination: Some(BuildingRef::from(building)),
                    distance: path.distance,
                    waypoints: waypoints(graph, path)?,
                }),
                None => unreachable.push(UnreachableStop {
                    category: stopover.category,
                    destination: BuildingRef::from(building),
                    anchor: stopover.anchor,
                }),
            }
        }

        Ok(Self {
            start: BuildingRef::from(start),
            end: BuildingRef::from(end),
            total_distance: bundle.total_distance(),
            legs,
            unmatched,
            unreachable,
        })
    }

    /// Serialise the summary as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::from)
    }
}

fn waypoints(graph: &Graph, path: &Path) -> Result<Vec<Waypoint>> {
    path.nodes()
        .into_iter()
        .enumerate()
        .map(|(index, id)| {
            let intersection = graph.require_intersection(id)?;
            Ok(Waypoint {
                index,
                id,
                coordinate: intersection.coordinate,
                names: intersection.names.iter().cloned().collect(),
            })
        })
        .collect()
}
