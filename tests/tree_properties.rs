//! Structural properties of built trees over seeded random datasets.

use approx::assert_abs_diff_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rusty_ltr::data::document::{Document, LabeledDocument};
use rusty_ltr::trees::regression::RegressionTree;
use rusty_ltr::trees::search::partition_loss;

const FEATURES: usize = 3;

fn random_documents(seed: u64, count: usize) -> Vec<LabeledDocument<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            // Rounded values give plenty of ties on every feature.
            let features = (0..FEATURES)
                .map(|_| (rng.gen_range(0.0..10.0_f64) * 2.0).round() / 2.0)
                .collect::<Vec<_>>();
            let label = rng.gen_range(0..5) as f64;
            LabeledDocument::new(features, label)
        })
        .collect()
}

#[test]
fn test_leaf_and_internal_counts() {
    let docs = random_documents(1, 60);
    for num_leaves in 2..=12 {
        let tree = RegressionTree::build(num_leaves, 0, 5.0, &docs).unwrap();
        assert_eq!(tree.terminal_leaves().unwrap().len(), num_leaves);
        assert_eq!(tree.num_internal_nodes(), num_leaves - 1);
    }
}

#[test]
fn test_partitions_are_conserved() {
    let docs = random_documents(2, 80);
    let tree = RegressionTree::build(10, 2, 4.0, &docs).unwrap();
    let graph = tree.graph();

    for (_, node) in graph.iter() {
        let Some((left, right)) = node.children() else {
            continue;
        };
        let left = graph.node(left).unwrap().partition();
        let right = graph.node(right).unwrap().partition();
        assert_eq!(left.len() + right.len(), node.partition().len());
        assert!(left.iter().all(|index| !right.contains(index)));
    }

    let mut covered: Vec<usize> = tree
        .terminal_leaves()
        .unwrap()
        .into_iter()
        .flat_map(|leaf| graph.node(leaf).unwrap().partition().to_vec())
        .collect();
    covered.sort_unstable();
    assert_eq!(covered, (0..docs.len()).collect::<Vec<_>>());
}

#[test]
fn test_parent_links_match_children() {
    let docs = random_documents(3, 40);
    let tree = RegressionTree::build(8, 1, 5.0, &docs).unwrap();
    let graph = tree.graph();

    assert!(graph.node(tree.root()).unwrap().is_root());
    for (id, node) in graph.iter() {
        assert!(node.children_consistent());
        assert_eq!(graph.root_of(id).unwrap(), tree.root());
        if let Some(parent) = node.parent() {
            let (left, right) = graph.node(parent).unwrap().children().unwrap();
            assert!(left == id || right == id);
        }
    }
}

#[test]
fn test_training_documents_reach_their_leaf() {
    let docs = random_documents(4, 50);
    let tree = RegressionTree::build(9, 0, 3.0, &docs).unwrap();
    let graph = tree.graph();

    for leaf in tree.terminal_leaves().unwrap() {
        for &index in graph.node(leaf).unwrap().partition() {
            let reached = graph.find_leaf(tree.root(), docs[index].features()).unwrap();
            assert_eq!(reached, leaf);
        }
    }
}

#[test]
fn test_scoring_is_total() {
    let docs = random_documents(5, 50);
    let tree = RegressionTree::build(7, 2, 5.0, &docs).unwrap();
    let graph = tree.graph();

    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..200 {
        let features: Vec<f64> = (0..FEATURES).map(|_| rng.gen_range(-5.0..15.0)).collect();
        assert!(tree.predict(&features).unwrap().is_finite());
    }

    // Thresholds themselves route left.
    for (id, node) in graph.iter() {
        if let (Some(feature), Some(threshold)) = (node.feature_index(), node.threshold()) {
            let mut features = vec![0.0; FEATURES];
            features[feature] = threshold;
            assert_eq!(graph.route(id, &features).unwrap(), node.left().unwrap());
        }
    }
}

#[test]
fn test_total_loss_never_increases() {
    let docs = random_documents(6, 70);
    let mut previous = f64::INFINITY;
    for num_leaves in 2..=14 {
        let tree = RegressionTree::build(num_leaves, 1, 5.0, &docs).unwrap();
        let loss = tree.total_loss(&docs).unwrap();
        assert!(loss <= previous + 1e-9, "{} leaves: {} > {}", num_leaves, loss, previous);
        previous = loss;
    }
}

#[test]
fn test_leaf_scores_are_partition_means() {
    let docs = random_documents(7, 30);
    let tree = RegressionTree::build(5, 0, 5.0, &docs).unwrap();
    let graph = tree.graph();

    for leaf in tree.terminal_leaves().unwrap() {
        let node = graph.node(leaf).unwrap();
        let partition = node.partition();
        let expected = if partition.is_empty() {
            0.0
        } else {
            partition.iter().map(|&index| docs[index].label()).sum::<f64>() / partition.len() as f64
        };
        assert_abs_diff_eq!(node.score(), expected, epsilon = 1e-12);
    }
    assert_eq!(partition_loss(&docs, &[0]), 0.0);
}

#[test]
fn test_builds_are_deterministic() {
    let docs = random_documents(8, 40);
    let first = RegressionTree::build(6, 0, 5.0, &docs).unwrap();
    let second = RegressionTree::build(6, 0, 5.0, &docs).unwrap();

    let rules = |tree: &RegressionTree<f64>| {
        tree.graph()
            .iter()
            .map(|(_, node)| (node.feature_index(), node.threshold(), node.score()))
            .collect::<Vec<_>>()
    };
    assert_eq!(rules(&first), rules(&second));
}
