//! Integration tests for the embedding space, analogies and concept clusters.

use llm_explainer::Error;
use llm_explainer::demos::analogy::{ANALOGY_STEPS, Arrow, analogy, arrow_endpoints, staged};
use llm_explainer::demos::clusters::{CLUSTERS, TERM_RING_RADIUS, cluster_of, connections, find_cluster};
use llm_explainer::demos::embedding_space::{
    EMBEDDING_POINTS, RELATED_DISTANCE, cluster_members, distance, find_point, nearest,
    related_words,
};
use llm_explainer::demos::{Cluster, Point3};

fn words(points: &[&llm_explainer::demos::EmbeddingPoint]) -> Vec<&'static str> {
    points.iter().map(|p| p.word).collect()
}

#[test]
fn test_point_arithmetic() {
    let a = Point3::new(1.0, 2.0, 3.0);
    let b = Point3::new(4.0, 6.0, 3.0);
    assert_eq!(a.distance(&b), 5.0);
    assert_eq!(a + b - b, a);
    assert_eq!(a.midpoint(&b), Point3::new(2.5, 4.0, 3.0));
}

#[test]
fn test_related_programming_languages() {
    let related = related_words("Python").unwrap();
    assert_eq!(words(&related), ["JavaScript", "TypeScript", "Java"]);
}

#[test]
fn test_related_excludes_self_and_far_points() {
    let related = related_words("king").unwrap();
    assert_eq!(words(&related), ["queen", "prince", "princess"]);
    assert!(related.iter().all(|p| p.cluster == Cluster::Royalty));
    assert_eq!(words(&related_words("man").unwrap()), ["woman"]);
}

#[test]
fn test_homonyms_are_far_apart() {
    let d = distance("Python", "python (snake)").unwrap();
    assert!(d > RELATED_DISTANCE);
    assert!(distance("python (snake)", "cobra").unwrap() < RELATED_DISTANCE);
}

#[test]
fn test_unknown_word() {
    assert!(matches!(find_point("Rust"), Err(Error::UnknownWord(w)) if w == "Rust"));
    assert!(related_words("Rust").is_err());
}

#[test]
fn test_clusters_partition_points() {
    let total: usize = Cluster::ALL.iter().map(|c| cluster_members(*c).len()).sum();
    assert_eq!(total, EMBEDDING_POINTS.len());
    assert_eq!(cluster_members(Cluster::Programming).len(), 4);
    assert_eq!(cluster_members(Cluster::Gender).len(), 2);
}

#[test]
fn test_nearest_is_sorted() {
    let ranked = nearest(find_point("cat").unwrap().position);
    assert_eq!(ranked[0].0.word, "cat");
    assert_eq!(ranked[0].1, 0.0);
    assert!(ranked.windows(2).all(|w| w[0].1 <= w[1].1));
}

#[test]
fn test_king_minus_man_plus_woman() {
    let result = analogy("king", "man", "woman").unwrap();
    assert!(result.position.distance(&Point3::new(-1.7, 1.7, 0.7)) < 1e-5);

    let best = result.best().unwrap();
    assert_eq!(best.cluster, Cluster::Royalty);

    let top_two: Vec<&str> = result.neighbours.iter().take(2).map(|(p, _)| p.word).collect();
    assert!(top_two.contains(&"queen"));
    assert!(result.neighbours.iter().all(|(p, _)| !["king", "man", "woman"].contains(&p.word)));

    let queen = result.neighbours.iter().find(|(p, _)| p.word == "queen").unwrap();
    assert!(queen.1 < RELATED_DISTANCE);
}

#[test]
fn test_analogy_unknown_word() {
    assert!(analogy("king", "man", "robot").is_err());
}

#[test]
fn test_analogy_walkthrough() {
    assert_eq!(ANALOGY_STEPS.len(), 4);
    assert!(ANALOGY_STEPS[0].arrows.is_empty());
    let (from, to) = arrow_endpoints(Arrow::ResultGlow);
    assert_eq!(from, staged::RESULT);
    assert_eq!(to, staged::QUEEN);
}

#[test]
fn test_find_cluster_case_insensitive() {
    assert_eq!(find_cluster("oop").unwrap().name, "OOP");
    assert_eq!(find_cluster("Web").unwrap().terms.len(), 6);
    assert!(matches!(find_cluster("Networking"), Err(Error::UnknownCluster(_))));
}

#[test]
fn test_cluster_of_term() {
    assert_eq!(cluster_of("sql").unwrap().name, "Database");
    assert_eq!(cluster_of("lambda").unwrap().name, "Functions");
    assert!(cluster_of("banana").is_none());
}

#[test]
fn test_term_ring_layout() {
    let functions = &CLUSTERS[0];
    let positions = functions.term_positions();
    assert_eq!(positions.len(), functions.terms.len());

    let (term, first) = positions[0];
    assert_eq!(term, "function");
    assert!(first.distance(&Point3::new(-2.5 + TERM_RING_RADIUS, 1.0, 0.0)) < 1e-5);

    for offset in functions.term_offsets() {
        // Squashed ring: never farther out than the radius in x.
        assert!(offset.x.abs() <= TERM_RING_RADIUS + 1e-5);
        assert!(offset.y.abs() <= TERM_RING_RADIUS * 0.6 + 1e-5);
    }
}

#[test]
fn test_connections_cover_every_pair() {
    let links = connections();
    assert_eq!(links.len(), 10);
    assert!(links.iter().all(|l| l.from != l.to && l.length > 0.0));
}
