// composa-data/src/datasets/unsupervised.rs

use super::sequence::SequenceDataset;
use super::traits::{Dataset, Materialize};
use crate::view::{self, DatasetView};
use composa_core::{ComposaError, SampleVector};

/// A collection of input-only patterns with a dimensionality fixed for its
/// whole lifetime.
///
/// Wraps a [`SequenceDataset`] and only exposes operations that keep the
/// dimensionality chosen at construction. Two of these, one for inputs and one
/// for targets, can be paired into a
/// [`SupervisedDataset`](super::SupervisedDataset).
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupervisedDataset {
    samples: SequenceDataset,
}

impl UnsupervisedDataset {
    /// Creates an empty dataset accepting vectors of length `dimensionality`.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::InvalidArgument` if `dimensionality` is zero.
    pub fn new(dimensionality: usize) -> Result<Self, ComposaError> {
        if dimensionality == 0 {
            return Err(ComposaError::InvalidArgument(
                "an unsupervised dataset needs a non-zero dimensionality".to_string(),
            ));
        }
        Ok(UnsupervisedDataset {
            samples: SequenceDataset::with_dimensionality(dimensionality),
        })
    }

    /// Wraps an existing sequence, taking its dimensionality as the fixed one.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::InvalidArgument` if the sequence has no (or a zero)
    /// dimensionality yet.
    pub fn from_sequence(samples: SequenceDataset) -> Result<Self, ComposaError> {
        match samples.dimensionality() {
            Some(d) if d > 0 => Ok(UnsupervisedDataset { samples }),
            _ => Err(ComposaError::InvalidArgument(
                "cannot fix the dimensionality of an unassigned sequence".to_string(),
            )),
        }
    }

    /// Builds a dataset of the given dimensionality from `samples`, all or nothing.
    pub fn from_samples<I>(dimensionality: usize, samples: I) -> Result<Self, ComposaError>
    where
        I: IntoIterator<Item = SampleVector>,
    {
        let mut dataset = Self::new(dimensionality)?;
        dataset.samples.extend_from(samples)?;
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The fixed vector length of every sample.
    pub fn dimensionality(&self) -> usize {
        // Always assigned: both constructors establish it and `clear` restores it.
        self.samples.dimensionality().unwrap_or_default()
    }

    /// Appends `sample`; see [`SequenceDataset::append`].
    pub fn append(&mut self, sample: SampleVector) -> Result<(), ComposaError> {
        self.samples.append(sample)
    }

    /// Appends every sample or none of them; see [`SequenceDataset::extend_from`].
    pub fn extend_from<I>(&mut self, samples: I) -> Result<(), ComposaError>
    where
        I: IntoIterator<Item = SampleVector>,
    {
        self.samples.extend_from(samples)
    }

    pub fn at(&self, index: usize) -> Result<&SampleVector, ComposaError> {
        self.samples.at(index)
    }

    /// Mutable access to the element values of the sample at `index`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut [f64], ComposaError> {
        self.samples.at_mut(index)
    }

    pub fn replace(&mut self, index: usize, sample: SampleVector) -> Result<(), ComposaError> {
        self.samples.replace(index, sample)
    }

    /// Removes every sample. Unlike [`SequenceDataset::clear`], the
    /// dimensionality is kept.
    pub fn clear(&mut self) {
        let dimensionality = self.dimensionality();
        self.samples = SequenceDataset::with_dimensionality(dimensionality);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SampleVector> {
        self.samples.iter()
    }

    /// Read-only access to the underlying sequence.
    pub fn as_sequence(&self) -> &SequenceDataset {
        &self.samples
    }

    pub fn into_sequence(self) -> SequenceDataset {
        self.samples
    }

    /// Returns a view over all samples in an order fixed by `seed`.
    pub fn shuffle(&self, seed: u64) -> DatasetView<'_, Self> {
        view::shuffled(self, seed)
    }

    /// Partitions the samples, in insertion order, into disjoint views sized
    /// proportionally to `ratios`.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::InvalidArgument` if a ratio is not positive or the
    /// ratios sum to more than 1.
    pub fn split(&self, ratios: &[f64]) -> Result<Vec<DatasetView<'_, Self>>, ComposaError> {
        view::split(self, ratios)
    }

    /// Like [`UnsupervisedDataset::split`], over a seeded permutation.
    pub fn split_shuffled(
        &self,
        ratios: &[f64],
        seed: u64,
    ) -> Result<Vec<DatasetView<'_, Self>>, ComposaError> {
        view::split_shuffled(self, ratios, seed)
    }
}

impl<'a> IntoIterator for &'a UnsupervisedDataset {
    type Item = &'a SampleVector;
    type IntoIter = std::slice::Iter<'a, SampleVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl Dataset for UnsupervisedDataset {
    type Item = SampleVector;

    fn get(&self, index: usize) -> Result<Self::Item, ComposaError> {
        self.samples.at(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

impl Materialize for UnsupervisedDataset {
    type Owned = UnsupervisedDataset;

    fn materialize_indices(&self, indices: &[usize]) -> Result<Self::Owned, ComposaError> {
        Ok(UnsupervisedDataset {
            samples: self.samples.materialize_indices(indices)?,
        })
    }
}

impl<'a> DatasetView<'a, UnsupervisedDataset> {
    /// Borrows the viewed samples in view order without cloning them.
    pub fn samples(&self) -> impl Iterator<Item = &'a SampleVector> + '_ {
        let samples = self.source().as_sequence().as_slice();
        // Indices were validated against the borrowed, unchangeable source.
        self.indices().iter().map(move |&index| &samples[index])
    }
}

#[cfg(test)]
#[path = "unsupervised_test.rs"]
mod tests;
