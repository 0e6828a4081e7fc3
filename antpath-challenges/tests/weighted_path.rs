use antpath_challenges::weighted_path::*;
use antpath_challenges::RandomSource;
use rand::{rngs::SmallRng, SeedableRng};

fn generate(vertex_count: usize, seed: u64) -> Graph {
    let mut rng = SmallRng::seed_from_u64(seed);
    Graph::generate(vertex_count, &Track::default(), &mut rng).unwrap()
}

#[test]
fn test_generated_graphs_are_connected_and_degree_bounded() {
    for vertex_count in [2, 3, 5, 7, 8, 20, 150] {
        for seed in 0..10 {
            let graph = generate(vertex_count, seed);
            assert_eq!(graph.vertex_count(), vertex_count);
            assert!(graph.is_connected(), "V={} seed={}", vertex_count, seed);
            for vertex in 0..vertex_count {
                assert!(graph.degree(vertex) >= MIN_DEGREE);
                assert!(graph.degree(vertex) <= MAX_DEGREE.min(vertex_count - 1));
                assert!(!graph.neighbours(vertex).contains(&vertex));
            }
        }
    }
}

#[test]
fn test_generated_weights_are_symmetric_and_in_range() {
    let graph = generate(40, 7);
    for a in 0..40 {
        let neighbours = graph.neighbours(a);
        assert!(neighbours.windows(2).all(|w| w[0] < w[1]), "sorted, no duplicates");
        for &b in neighbours {
            assert_eq!(graph.weight(a, b), graph.weight(b, a));
            assert!((MIN_WEIGHT..=MAX_WEIGHT).contains(&graph.weight(a, b)));
            assert!(graph.neighbours(b).contains(&a));
        }
    }
}

#[test]
fn test_generation_is_reproducible() {
    assert_eq!(generate(30, 99), generate(30, 99));
}

#[test]
fn test_single_vertex_graph_has_no_edges() {
    let graph = generate(1, 0);
    assert_eq!(graph.vertex_count(), 1);
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.is_connected());
}

#[test]
fn test_small_graphs_do_not_stall() {
    let track = Track {
        min_degree: 6,
        max_degree: 6,
        ..Track::default()
    };
    for vertex_count in 2..=8 {
        let mut rng = SmallRng::seed_from_u64(vertex_count as u64);
        let graph = Graph::generate(vertex_count, &track, &mut rng).unwrap();
        assert!(graph.is_connected());
        if vertex_count <= 7 {
            // Ceiling is vertex_count - 1, so every graph this small is complete.
            assert_eq!(graph.edge_count(), vertex_count * (vertex_count - 1) / 2);
        }
    }
}

#[test]
fn test_generate_rejects_invalid_input() {
    let mut rng = SmallRng::seed_from_u64(0);
    assert!(Graph::generate(0, &Track::default(), &mut rng).is_err());
    let bad_tracks = [
        Track { min_degree: 0, ..Track::default() },
        Track { max_degree: 1, ..Track::default() },
        Track { min_degree: 5, max_degree: 3, ..Track::default() },
        Track { min_weight: 0, ..Track::default() },
        Track { min_weight: 10, max_weight: 5, ..Track::default() },
    ];
    for track in bad_tracks {
        assert!(Graph::generate(5, &track, &mut rng).is_err(), "{:?}", track);
    }
}

#[test]
fn test_track_deserializes_with_defaults() {
    let track: Track = serde_json::from_str(r#"{"max_weight": 10}"#).unwrap();
    assert_eq!(track.max_weight, 10);
    assert_eq!(track.min_degree, MIN_DEGREE);
    assert_eq!(track.max_degree, MAX_DEGREE);
    assert_eq!(track.min_weight, MIN_WEIGHT);
}

#[test]
fn test_score_penalises_heavier_edge_before_lighter() {
    assert_eq!(score(&[10, 20, 5], PENALTY), 10 + 5 * 20 + 5);
}

#[test]
fn test_score_compares_against_last_weight_first() {
    // 7 equals the final weight, so it is not penalised even though 7 > 3.
    assert_eq!(score(&[7, 3, 7], PENALTY), 7 + 3 + 7);
    assert_eq!(score(&[9, 3, 7], PENALTY), 5 * 9 + 3 + 7);
}

#[test]
fn test_score_edge_cases() {
    assert_eq!(score(&[], PENALTY), 0);
    assert_eq!(score(&[42], PENALTY), 42);
    assert_eq!(score(&[1, 2, 3, 4], PENALTY), 10);
    assert_eq!(score(&[4, 3, 2, 1], 2), 8 + 6 + 4 + 1);
    assert_eq!(score(&[10, 20, 5], 5), score(&[10, 20, 5], 5));
}

#[test]
fn test_from_edges_validates() {
    assert!(Graph::from_edges(3, &[(0, 1, 4), (1, 2, 6)]).is_ok());
    assert!(Graph::from_edges(0, &[]).is_err());
    assert!(Graph::from_edges(3, &[(0, 3, 4)]).is_err());
    assert!(Graph::from_edges(3, &[(1, 1, 4)]).is_err());
    assert!(Graph::from_edges(3, &[(0, 1, 0)]).is_err());
    assert!(Graph::from_edges(3, &[(0, 1, 4), (1, 0, 5)]).is_err());
}

#[test]
fn test_verify_path() {
    let graph = Graph::from_edges(4, &[(0, 1, 10), (1, 2, 20), (2, 3, 5), (1, 3, 8)]).unwrap();

    let path = Path::new(vec![0, 1, 2, 3], vec![10, 20, 5], PENALTY);
    assert_eq!(path.cost, 115);
    assert_eq!(graph.verify_path(&path, PENALTY).unwrap(), 0);

    let repeated = Path::new(vec![0, 1, 3, 1, 2], vec![10, 8, 8, 20], PENALTY);
    assert_eq!(graph.verify_path(&repeated, PENALTY).unwrap(), 1);

    let non_edge = Path::new(vec![0, 2, 1, 3], vec![10, 20, 8], PENALTY);
    assert!(graph.verify_path(&non_edge, PENALTY).is_err());

    let wrong_weight = Path::new(vec![0, 1, 2, 3], vec![10, 21, 5], PENALTY);
    assert!(graph.verify_path(&wrong_weight, PENALTY).is_err());

    let incomplete = Path::new(vec![0, 1, 2], vec![10, 20], PENALTY);
    assert!(graph.verify_path(&incomplete, PENALTY).is_err());

    let mut wrong_cost = path.clone();
    wrong_cost.cost += 1;
    assert!(graph.verify_path(&wrong_cost, PENALTY).is_err());

    assert!(graph.verify_path(&Path::default(), PENALTY).is_err());
    assert!(graph
        .verify_path(&Path::new(vec![0, 9], vec![1], PENALTY), PENALTY)
        .is_err());
}

struct Scripted(Vec<usize>);

impl RandomSource for Scripted {
    fn uniform(&mut self, lo: usize, hi: usize) -> usize {
        let value = self.0.remove(0);
        assert!((lo..=hi).contains(&value), "{} outside [{}, {}]", value, lo, hi);
        value
    }
}

#[test]
fn test_generate_with_scripted_source() {
    let track = Track {
        min_degree: 1,
        max_degree: 2,
        ..Track::default()
    };
    // Backbone: start at unused[1] = 1, unused becomes [0, 2]; pick index 0 -> 0
    // (weight 7), unused [2]; pick index 0 -> 2 (weight 9). Then degree
    // targets of 1 for every vertex, all already met.
    let mut rng = Scripted(vec![1, 0, 7, 0, 9, 1, 1, 1]);
    let graph = Graph::generate(3, &track, &mut rng).unwrap();
    assert_eq!(graph.neighbours(1), &[0]);
    assert_eq!(graph.neighbours(0), &[1, 2]);
    assert_eq!(graph.weight(0, 1), 7);
    assert_eq!(graph.weight(2, 0), 9);
    assert!(rng.0.is_empty());
}
