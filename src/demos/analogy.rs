//! king − man + woman ≈ queen, step by step.
//!
//! The walkthrough uses its own staged coordinates so each arrow reads
//! clearly; [`analogy`] does the same arithmetic over the shared
//! embedding space.

use serde::Serialize;

use super::embedding_space::{EmbeddingPoint, Point3, find_point, nearest};
use crate::error::Result;

/// Arrow drawn during the walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Arrow {
    /// king → neutral royalty, subtracting "man".
    KingToNeutral,
    /// neutral → result, adding "woman".
    NeutralToResult,
    /// Glow around where the result lands.
    ResultGlow,
}

/// One stage of the walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnalogyStep {
    pub equation: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub highlighted: &'static [&'static str],
    pub arrows: &'static [Arrow],
}

pub const ANALOGY_STEPS: [AnalogyStep; 4] = [
    AnalogyStep {
        equation: "king",
        title: "Start with \"king\"",
        description: "We begin with the embedding vector for \"king\" - a point in \
high-dimensional space that encodes the meaning of royalty + masculinity.",
        highlighted: &["king"],
        arrows: &[],
    },
    AnalogyStep {
        equation: "king − man",
        title: "Subtract \"man\"",
        description: "Subtracting the \"man\" vector removes the masculine direction, \
leaving us at a gender-neutral royalty position.",
        highlighted: &["king", "man"],
        arrows: &[Arrow::KingToNeutral],
    },
    AnalogyStep {
        equation: "king − man + woman",
        title: "Add \"woman\"",
        description: "Adding the \"woman\" vector moves us in the feminine direction, \
from neutral royalty toward feminine royalty.",
        highlighted: &["king", "woman"],
        arrows: &[Arrow::KingToNeutral, Arrow::NeutralToResult],
    },
    AnalogyStep {
        equation: "king − man + woman ≈ queen",
        title: "Result: \"queen\"!",
        description: "The resulting position lands near \"queen\" in the embedding space. \
The model learned that gender is a direction!",
        highlighted: &["king", "queen"],
        arrows: &[Arrow::KingToNeutral, Arrow::NeutralToResult, Arrow::ResultGlow],
    },
];

/// Staged coordinates used by the walkthrough.
pub mod staged {
    use super::Point3;

    pub const ORIGIN: Point3 = Point3::new(0.0, 0.0, 0.0);
    pub const KING: Point3 = Point3::new(-1.5, 1.0, 0.5);
    pub const MAN: Point3 = Point3::new(-0.5, 0.3, -0.8);
    pub const WOMAN: Point3 = Point3::new(0.5, 0.5, -0.6);
    pub const QUEEN: Point3 = Point3::new(1.5, 1.2, 0.3);
    /// king − man, before adding woman.
    pub const NEUTRAL: Point3 = Point3::new(0.0, 0.8, 0.0);
    /// Where the walkthrough lands after adding woman.
    pub const RESULT: Point3 = Point3::new(1.2, 1.1, 0.2);
}

/// Start and end of an arrow in staged coordinates.
pub fn arrow_endpoints(arrow: Arrow) -> (Point3, Point3) {
    match arrow {
        Arrow::KingToNeutral => (staged::KING, staged::NEUTRAL),
        Arrow::NeutralToResult => (staged::NEUTRAL, staged::RESULT),
        Arrow::ResultGlow => (staged::RESULT, staged::QUEEN),
    }
}

/// Outcome of `a − b + c` over the embedding space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalogyResult {
    pub position: Point3,
    /// Words closest to `position`, excluding the three inputs.
    pub neighbours: Vec<(&'static EmbeddingPoint, f32)>,
}

impl AnalogyResult {
    /// Closest non-input word.
    pub fn best(&self) -> Option<&'static EmbeddingPoint> {
        self.neighbours.first().map(|(p, _)| *p)
    }
}

/// Compute `a − b + c` and rank the other words by distance to it.
pub fn analogy(a: &str, b: &str, c: &str) -> Result<AnalogyResult> {
    let position = find_point(a)?.position - find_point(b)?.position + find_point(c)?.position;
    let neighbours = nearest(position)
        .into_iter()
        .filter(|(p, _)| p.word != a && p.word != b && p.word != c)
        .collect();
    Ok(AnalogyResult {
        position,
        neighbours,
    })
}
