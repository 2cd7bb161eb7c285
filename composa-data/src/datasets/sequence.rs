// composa-data/src/datasets/sequence.rs

use super::traits::{check_indices, Dataset, Materialize};
use composa_core::{ComposaError, SampleVector};
use log::debug;

/// An ordered collection of `SampleVector`s sharing one dimensionality.
///
/// Insertion order is meaningful (the data may be a time series), so samples
/// are only ever appended at the end or replaced in place. The dimensionality is
/// either assigned at construction or fixed by the first append, and every
/// stored vector has exactly that length.
///
/// Iterating with [`SequenceDataset::iter`] borrows the dataset, so it cannot
/// be mutated while a traversal is active; each call starts a fresh traversal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SequenceDataset {
    samples: Vec<SampleVector>,
    dimensionality: Option<usize>,
}

/// Validates `sample` against an established dimensionality. An unset
/// dimensionality accepts any length.
pub(crate) fn check_dimensionality(
    expected: Option<usize>,
    sample: &SampleVector,
) -> Result<(), ComposaError> {
    match expected {
        Some(expected) if expected != sample.len() => Err(ComposaError::DimensionMismatch {
            expected,
            actual: sample.len(),
        }),
        _ => Ok(()),
    }
}

impl SequenceDataset {
    /// Creates an empty dataset whose dimensionality is fixed by the first append.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty dataset that only accepts vectors of length `dimensionality`.
    pub fn with_dimensionality(dimensionality: usize) -> Self {
        SequenceDataset {
            samples: Vec::new(),
            dimensionality: Some(dimensionality),
        }
    }

    /// Creates a dataset pre-sized with `size` zero vectors of length `dimensionality`.
    pub fn zeros(size: usize, dimensionality: usize) -> Self {
        SequenceDataset {
            samples: vec![SampleVector::zeros(dimensionality); size],
            dimensionality: Some(dimensionality),
        }
    }

    /// Builds a dataset from `samples`, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::DimensionMismatch` if the samples do not all share
    /// the length of the first one.
    pub fn from_samples<I>(samples: I) -> Result<Self, ComposaError>
    where
        I: IntoIterator<Item = SampleVector>,
    {
        let mut dataset = Self::new();
        dataset.extend_from(samples)?;
        Ok(dataset)
    }

    /// Returns the number of stored samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the vector length shared by all samples, or `None` while unset.
    pub fn dimensionality(&self) -> Option<usize> {
        self.dimensionality
    }

    /// Appends `sample` at the end of the sequence.
    ///
    /// The first append on a dataset with unset dimensionality fixes it to
    /// `sample.len()`.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::DimensionMismatch` if the length disagrees with the
    /// established dimensionality. The dataset is unchanged in that case.
    pub fn append(&mut self, sample: SampleVector) -> Result<(), ComposaError> {
        check_dimensionality(self.dimensionality, &sample)?;
        self.push_unchecked(sample);
        Ok(())
    }

    /// Appends every sample of `samples`, or none of them.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::DimensionMismatch` for the first sample whose length
    /// disagrees with the dimensionality (established, or set by the first sample
    /// of the batch). Nothing is appended in that case.
    pub fn extend_from<I>(&mut self, samples: I) -> Result<(), ComposaError>
    where
        I: IntoIterator<Item = SampleVector>,
    {
        let batch: Vec<SampleVector> = samples.into_iter().collect();
        let expected = self
            .dimensionality
            .or_else(|| batch.first().map(SampleVector::len));
        for sample in &batch {
            check_dimensionality(expected, sample)?;
        }
        debug!("SequenceDataset: appending {} samples", batch.len());
        self.samples.reserve(batch.len());
        for sample in batch {
            self.push_unchecked(sample);
        }
        Ok(())
    }

    /// Returns the sample at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::OutOfRange` if `index >= self.len()`.
    pub fn at(&self, index: usize) -> Result<&SampleVector, ComposaError> {
        self.samples
            .get(index)
            .ok_or_else(|| ComposaError::out_of_range(index, self.samples.len()))
    }

    /// Mutable access to the element values of the sample at `index`. Only
    /// values can change through the slice; use [`SequenceDataset::replace`] to
    /// swap in a whole vector.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut [f64], ComposaError> {
        let len = self.samples.len();
        self.samples
            .get_mut(index)
            .map(SampleVector::as_mut_slice)
            .ok_or_else(|| ComposaError::out_of_range(index, len))
    }

    /// Replaces the sample at `index` with `sample`.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::OutOfRange` if `index >= self.len()` and
    /// `ComposaError::DimensionMismatch` if the length disagrees with the
    /// dimensionality. The dataset is unchanged on error.
    pub fn replace(&mut self, index: usize, sample: SampleVector) -> Result<(), ComposaError> {
        if index >= self.samples.len() {
            return Err(ComposaError::out_of_range(index, self.samples.len()));
        }
        check_dimensionality(self.dimensionality, &sample)?;
        self.samples[index] = sample;
        Ok(())
    }

    /// Removes every sample and resets the dimensionality to unset.
    pub fn clear(&mut self) {
        debug!("SequenceDataset: clearing {} samples", self.samples.len());
        self.samples.clear();
        self.dimensionality = None;
    }

    /// Returns a fresh traversal of the samples in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, SampleVector> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[SampleVector] {
        &self.samples
    }

    /// Consumes the dataset and returns its samples in insertion order.
    pub fn into_samples(self) -> Vec<SampleVector> {
        self.samples
    }

    // Callers have already validated `sample` against the dimensionality.
    pub(super) fn push_unchecked(&mut self, sample: SampleVector) {
        if self.dimensionality.is_none() {
            self.dimensionality = Some(sample.len());
        }
        self.samples.push(sample);
    }
}

impl<'a> IntoIterator for &'a SequenceDataset {
    type Item = &'a SampleVector;
    type IntoIter = std::slice::Iter<'a, SampleVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl Dataset for SequenceDataset {
    type Item = SampleVector;

    /// Returns a clone of the sample at `index`.
    fn get(&self, index: usize) -> Result<Self::Item, ComposaError> {
        self.at(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

impl Materialize for SequenceDataset {
    type Owned = SequenceDataset;

    fn materialize_indices(&self, indices: &[usize]) -> Result<Self::Owned, ComposaError> {
        check_indices(indices, self.samples.len())?;
        Ok(SequenceDataset {
            samples: indices.iter().map(|&i| self.samples[i].clone()).collect(),
            dimensionality: self.dimensionality,
        })
    }
}

#[cfg(test)]
#[path = "sequence_test.rs"]
mod tests;
