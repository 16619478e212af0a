use std::io::Write;

use crate::data::dataset::RealNumber;
use crate::error::Result;

/// A model that scores a single document's feature vector.
pub trait Ranker<T: RealNumber> {
    fn predict(&self, features: &[T]) -> Result<T>;

    /// Persists the model.
    ///
    /// Implementations without a model format return
    /// [`TreeError::Unsupported`](crate::error::TreeError::Unsupported), so
    /// callers can never mistake a no-op for a saved model.
    fn write_model(&self, writer: &mut dyn Write) -> Result<()>;
}
