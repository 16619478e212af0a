/// Matrix-backed datasets and the numeric traits shared across the crate
pub mod dataset;
/// Document provider interface
pub mod document;
