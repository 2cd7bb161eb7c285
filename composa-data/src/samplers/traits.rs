// composa-data/src/samplers/traits.rs

use std::fmt::Debug;

/// A Sampler trait that defines the order in which a loader visits a dataset.
///
/// Samplers are used by `DataLoader` to generate one epoch's sequence of
/// indices into a `Dataset` (or into a `DatasetView`).
pub trait Sampler: Debug + Send + Sync {
    /// Returns an iterator over the indices of a dataset.
    ///
    /// Every call starts a new epoch.
    ///
    /// # Arguments
    ///
    /// * `dataset_len` - The total number of items in the dataset.
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync>;

    /// Returns the total number of indices one epoch will yield.
    ///
    /// # Arguments
    ///
    /// * `dataset_len` - The total number of items in the dataset.
    fn len(&self, dataset_len: usize) -> usize;
}

impl Sampler for Box<dyn Sampler> {
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        (**self).iter(dataset_len)
    }

    fn len(&self, dataset_len: usize) -> usize {
        (**self).len(dataset_len)
    }
}
