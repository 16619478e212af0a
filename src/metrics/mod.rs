/// Error metrics for real-valued predictions
pub mod errors;
