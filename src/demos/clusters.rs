//! Programming concepts grouped by meaning.

use std::f32::consts::PI;

use serde::Serialize;

use super::embedding_space::Point3;
use crate::error::{Error, Result};

/// Radius of the ring terms are laid out on around a cluster centre.
pub const TERM_RING_RADIUS: f32 = 1.2;

/// A named group of related terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConceptCluster {
    pub name: &'static str,
    pub color: &'static str,
    pub terms: &'static [&'static str],
    pub center: Point3,
}

pub const CLUSTERS: [ConceptCluster; 5] = [
    ConceptCluster {
        name: "Functions",
        color: "#3B82F6",
        terms: &["function", "method", "procedure", "routine", "callback", "lambda"],
        center: Point3::new(-2.5, 1.0, 0.0),
    },
    ConceptCluster {
        name: "Variables",
        color: "#10B981",
        terms: &["variable", "parameter", "argument", "constant", "identifier", "scope"],
        center: Point3::new(2.5, 1.0, 0.5),
    },
    ConceptCluster {
        name: "Database",
        color: "#8B5CF6",
        terms: &["database", "SQL", "query", "table", "index", "schema", "JOIN"],
        center: Point3::new(0.0, -1.5, 1.0),
    },
    ConceptCluster {
        name: "OOP",
        color: "#F59E0B",
        terms: &["class", "object", "inheritance", "polymorphism", "encapsulation"],
        center: Point3::new(-1.0, 0.0, -2.0),
    },
    ConceptCluster {
        name: "Web",
        color: "#EF4444",
        terms: &["HTTP", "REST", "API", "endpoint", "request", "response"],
        center: Point3::new(1.5, -0.5, -1.5),
    },
];

impl ConceptCluster {
    /// Term offsets relative to the centre: an ellipse squashed on y, tilted in z.
    pub fn term_offsets(&self) -> Vec<Point3> {
        let n = self.terms.len() as f32;
        (0..self.terms.len())
            .map(|i| {
                let angle = i as f32 / n * PI * 2.0;
                Point3::new(
                    angle.cos() * TERM_RING_RADIUS,
                    angle.sin() * TERM_RING_RADIUS * 0.6,
                    angle.sin() * 0.3,
                )
            })
            .collect()
    }

    /// Absolute term positions.
    pub fn term_positions(&self) -> Vec<(&'static str, Point3)> {
        self.terms
            .iter()
            .copied()
            .zip(self.term_offsets().into_iter().map(|o| self.center + o))
            .collect()
    }
}

/// Find a cluster by name, case-insensitively.
pub fn find_cluster(name: &str) -> Result<&'static ConceptCluster> {
    CLUSTERS
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::UnknownCluster(name.to_string()))
}

/// Cluster containing `term`, case-insensitively.
pub fn cluster_of(term: &str) -> Option<&'static ConceptCluster> {
    CLUSTERS
        .iter()
        .find(|c| c.terms.iter().any(|t| t.eq_ignore_ascii_case(term)))
}

/// Dashed link between two cluster centres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Connection {
    pub from: &'static str,
    pub to: &'static str,
    pub length: f32,
}

/// Every unordered pair of clusters.
pub fn connections() -> Vec<Connection> {
    let mut links = Vec::with_capacity(CLUSTERS.len() * (CLUSTERS.len() - 1) / 2);
    for (i, a) in CLUSTERS.iter().enumerate() {
        for b in &CLUSTERS[i + 1..] {
            links.push(Connection {
                from: a.name,
                to: b.name,
                length: a.center.distance(&b.center),
            });
        }
    }
    links
}
