/// Node arena and structural operations
pub mod graph;
pub mod node;
pub mod params;
/// Greedy leaf-wise regression tree
pub mod regression;
/// Threshold search over one leaf
pub mod search;
pub mod selector;
