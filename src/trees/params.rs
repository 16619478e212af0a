use crate::data::dataset::RealNumber;
use crate::error::{Result, TreeError};

/// Construction parameters of a [`RegressionTree`](super::regression::RegressionTree).
///
/// The initial feature and threshold seed the root split; every later split
/// is learned.
#[derive(Clone, Debug)]
pub struct RegressionTreeParams<T: RealNumber> {
    num_leaves: usize,
    init_feature: usize,
    init_threshold: T,
}

impl<T: RealNumber> Default for RegressionTreeParams<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RealNumber> RegressionTreeParams<T> {
    pub fn new() -> Self {
        Self {
            num_leaves: 2,
            init_feature: 0,
            init_threshold: T::zero(),
        }
    }

    pub fn set_num_leaves(&mut self, num_leaves: usize) -> Result<()> {
        if num_leaves < 2 {
            return Err(TreeError::InvalidConfiguration(format!(
                "the number of leaves must be at least 2, got {}",
                num_leaves
            )));
        }
        self.num_leaves = num_leaves;
        Ok(())
    }

    pub fn set_init_feature(&mut self, init_feature: usize) {
        self.init_feature = init_feature;
    }

    pub fn set_init_threshold(&mut self, init_threshold: T) -> Result<()> {
        if init_threshold.is_nan() {
            return Err(TreeError::InvalidConfiguration(
                "the initial threshold must not be NaN".into(),
            ));
        }
        self.init_threshold = init_threshold;
        Ok(())
    }

    pub fn num_leaves(&self) -> usize {
        self.num_leaves
    }

    pub fn init_feature(&self) -> usize {
        self.init_feature
    }

    pub fn init_threshold(&self) -> T {
        self.init_threshold
    }
}
