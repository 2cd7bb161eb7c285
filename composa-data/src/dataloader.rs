// composa-data/src/dataloader.rs
//! # DataLoader
//!
//! Groups the items of any [`Dataset`] (including a [`DatasetView`]) into
//! batches, in the order chosen by a [`Sampler`]. This is the surface a
//! trainer drives epochs through.
//!
//! ## Basic usage
//!
//! ```rust
//! use composa_core::SampleVector;
//! use composa_data::{DataLoader, SequentialSampler, SupervisedDataset};
//!
//! let mut dataset = SupervisedDataset::new();
//! for i in 0..6 {
//!     let x = i as f64;
//!     dataset
//!         .append_pair(SampleVector::from_vec(vec![x]), SampleVector::from_vec(vec![2.0 * x]))
//!         .unwrap();
//! }
//! let loader = DataLoader::new(&dataset, 4, SequentialSampler::new(), false).unwrap();
//! for batch in loader {
//!     let batch = batch.expect("no error expected");
//!     println!("batch of {} pairs", batch.len());
//! }
//! ```
//!
//! [`DatasetView`]: crate::view::DatasetView

use crate::config::LoaderConfig;
use crate::datasets::Dataset;
use crate::samplers::{RandomSampler, Sampler, SequentialSampler};
use composa_core::ComposaError;
use log::debug;

/// Generic DataLoader for batching and sampling data.
///
/// # Type Parameters
/// - `D`: The dataset type, implementing [`Dataset`]. References to datasets
///   and views implement it too, so a loader can borrow its source.
/// - `S`: The sampler type, implementing [`Sampler`].
///
/// Iterating yields one epoch; [`DataLoader::reset`] starts the next one.
pub struct DataLoader<D: Dataset, S: Sampler = Box<dyn Sampler>> {
    dataset: D,
    batch_size: usize,
    sampler: S,
    drop_last: bool,
    indices_iter: Box<dyn Iterator<Item = usize> + Send + Sync>,
}

impl<D: Dataset, S: Sampler> DataLoader<D, S> {
    /// Creates a new DataLoader.
    ///
    /// # Arguments
    /// - `dataset`: The dataset to batch.
    /// - `batch_size`: The number of items per batch.
    /// - `sampler`: The sampler generating each epoch's indices.
    /// - `drop_last`: If true, the last batch is skipped when incomplete.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::InvalidArgument` if `batch_size` is zero.
    pub fn new(dataset: D, batch_size: usize, sampler: S, drop_last: bool) -> Result<Self, ComposaError> {
        if batch_size == 0 {
            return Err(ComposaError::InvalidArgument(
                "batch_size must be greater than zero".to_string(),
            ));
        }
        let indices_iter = sampler.iter(dataset.len());
        Ok(Self {
            dataset,
            batch_size,
            sampler,
            drop_last,
            indices_iter,
        })
    }

    /// Starts a new epoch, asking the sampler for a fresh index order.
    pub fn reset(&mut self) {
        debug!("DataLoader: starting a new epoch over {} items", self.dataset.len());
        self.indices_iter = self.sampler.iter(self.dataset.len());
    }

    /// Number of batches a full epoch yields.
    pub fn num_batches(&self) -> usize {
        let samples = self.sampler.len(self.dataset.len());
        if self.drop_last {
            samples / self.batch_size
        } else {
            samples.div_ceil(self.batch_size)
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }
}

impl<D: Dataset> DataLoader<D, Box<dyn Sampler>> {
    /// Creates a DataLoader from a [`LoaderConfig`], choosing a sequential or a
    /// (possibly seeded) random sampler.
    pub fn from_config(dataset: D, config: &LoaderConfig) -> Result<Self, ComposaError> {
        let sampler: Box<dyn Sampler> = if config.shuffle {
            let sampler = RandomSampler::new(false, None);
            match config.seed {
                Some(seed) => Box::new(sampler.with_seed(seed)),
                None => Box::new(sampler),
            }
        } else {
            Box::new(SequentialSampler::new())
        };
        Self::new(dataset, config.batch_size, sampler, config.drop_last)
    }
}

impl<D: Dataset, S: Sampler> Iterator for DataLoader<D, S> {
    type Item = Result<Vec<D::Item>, ComposaError>;

    /// Returns the next batch of items.
    ///
    /// # Returns
    /// - `Some(Ok(batch))`: A batch ready for use.
    /// - `Some(Err(e))`: An error while fetching an item.
    /// - `None`: The epoch is over.
    fn next(&mut self) -> Option<Self::Item> {
        let dataset = &self.dataset;
        let batch = self
            .indices_iter
            .by_ref()
            .take(self.batch_size)
            .map(|index| dataset.get(index))
            .collect::<Result<Vec<_>, _>>();
        match batch {
            Ok(items) if items.is_empty() => None,
            Ok(items) if self.drop_last && items.len() < self.batch_size => None,
            other => Some(other),
        }
    }
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
