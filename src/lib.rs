//! # Rusty-ltr
//!
//! `rusty-ltr` grows regression trees to be used as weak learners by a
//! boosted learning-to-rank ensemble. A tree starts from a caller-supplied
//! root split and then repeatedly splits whichever terminal leaf has the
//! cheapest available split, measured by the summed squared deviation of
//! labels from their leaf mean, until it holds the requested number of leaves.
//!
//! ## Example Usage
//!
//! ```rust
//! use rusty_ltr::data::document::LabeledDocument;
//! use rusty_ltr::trees::regression::RegressionTree;
//!
//! let documents = vec![
//!     LabeledDocument::new(vec![1.0, 0.5], 1.0),
//!     LabeledDocument::new(vec![2.0, 0.1], 1.0),
//!     LabeledDocument::new(vec![3.0, 0.7], 5.0),
//!     LabeledDocument::new(vec![4.0, 0.2], 5.0),
//! ];
//!
//! // Seed the root with feature 1 at 0.3, then learn one more split.
//! let tree = RegressionTree::build(3, 1, 0.3, &documents).unwrap();
//!
//! assert_eq!(tree.terminal_leaves().unwrap().len(), 3);
//! let score = tree.predict(&[3.5, 0.1]).unwrap();
//! assert_eq!(score, 5.0);
//! ```

/// Documents and datasets
pub mod data;
/// Error type shared by the crate
pub mod error;
/// Functions for evaluating model performance
pub mod metrics;
/// Scoring interface exposed to ensembles
pub mod ranker;
/// Regression trees
pub mod trees;

pub use error::{Result, TreeError};
