//! Hand-placed 3D embedding space.
//!
//! Fifteen words in five clusters. Nearness stands in for semantic
//! similarity: "Python" sits with other languages, "python (snake)" with
//! the reptiles.

use std::ops::{Add, Sub};

use serde::Serialize;

use crate::error::{Error, Result};

/// Points closer than this are "related".
pub const RELATED_DISTANCE: f32 = 1.5;

/// Point or offset in the demo space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point3) -> f32 {
        let d = *self - *other;
        (d.x * d.x + d.y * d.y + d.z * d.z).sqrt()
    }

    /// Point halfway to `other`.
    pub fn midpoint(&self, other: &Point3) -> Point3 {
        Point3::new(
            (self.x + other.x) / 2.0,
            (self.y + other.y) / 2.0,
            (self.z + other.z) / 2.0,
        )
    }
}

impl Add for Point3 {
    type Output = Point3;

    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Semantic group of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cluster {
    Royalty,
    Programming,
    Animals,
    Reptiles,
    Gender,
}

impl Cluster {
    pub const ALL: [Cluster; 5] = [
        Cluster::Royalty,
        Cluster::Programming,
        Cluster::Animals,
        Cluster::Reptiles,
        Cluster::Gender,
    ];

    /// Get the cluster name as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Royalty => "royalty",
            Self::Programming => "programming",
            Self::Animals => "animals",
            Self::Reptiles => "reptiles",
            Self::Gender => "gender",
        }
    }

    /// Display colour as a hex string.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Royalty => "#3B82F6",
            Self::Programming => "#10B981",
            Self::Animals => "#F59E0B",
            Self::Reptiles => "#EF4444",
            Self::Gender => "#8B5CF6",
        }
    }
}

/// A labelled word in the space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmbeddingPoint {
    pub word: &'static str,
    pub position: Point3,
    pub cluster: Cluster,
}

const fn point(word: &'static str, x: f32, y: f32, z: f32, cluster: Cluster) -> EmbeddingPoint {
    EmbeddingPoint {
        word,
        position: Point3::new(x, y, z),
        cluster,
    }
}

pub const EMBEDDING_POINTS: [EmbeddingPoint; 15] = [
    point("king", -2.0, 1.5, 0.5, Cluster::Royalty),
    point("queen", -1.5, 1.8, 0.3, Cluster::Royalty),
    point("prince", -2.2, 1.2, 0.7, Cluster::Royalty),
    point("princess", -1.8, 1.6, 0.4, Cluster::Royalty),
    point("Python", 2.0, 0.0, 1.0, Cluster::Programming),
    point("JavaScript", 2.3, -0.2, 0.8, Cluster::Programming),
    point("TypeScript", 2.5, 0.1, 1.2, Cluster::Programming),
    point("Java", 2.1, 0.3, 0.6, Cluster::Programming),
    point("cat", -1.0, -1.5, -1.0, Cluster::Animals),
    point("dog", -0.7, -1.7, -0.8, Cluster::Animals),
    point("bird", -1.2, -1.3, -1.2, Cluster::Animals),
    point("python (snake)", 0.5, -2.0, 0.3, Cluster::Reptiles),
    point("cobra", 0.8, -2.2, 0.5, Cluster::Reptiles),
    point("man", 0.0, 1.0, -1.0, Cluster::Gender),
    point("woman", 0.3, 1.2, -0.8, Cluster::Gender),
];

/// Look up a word (exact match).
pub fn find_point(word: &str) -> Result<&'static EmbeddingPoint> {
    EMBEDDING_POINTS
        .iter()
        .find(|p| p.word == word)
        .ok_or_else(|| Error::UnknownWord(word.to_string()))
}

/// Distance between two words.
pub fn distance(a: &str, b: &str) -> Result<f32> {
    Ok(find_point(a)?.position.distance(&find_point(b)?.position))
}

/// Words within [`RELATED_DISTANCE`] of `word`, excluding itself.
pub fn related_words(word: &str) -> Result<Vec<&'static EmbeddingPoint>> {
    let target = find_point(word)?;
    Ok(EMBEDDING_POINTS
        .iter()
        .filter(|p| p.word != word && p.position.distance(&target.position) < RELATED_DISTANCE)
        .collect())
}

/// Members of a cluster.
pub fn cluster_members(cluster: Cluster) -> Vec<&'static EmbeddingPoint> {
    EMBEDDING_POINTS
        .iter()
        .filter(|p| p.cluster == cluster)
        .collect()
}

/// Points ordered by distance from `position`, closest first.
pub fn nearest(position: Point3) -> Vec<(&'static EmbeddingPoint, f32)> {
    let mut ranked: Vec<_> = EMBEDDING_POINTS
        .iter()
        .map(|p| (p, p.position.distance(&position)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
}
