// composa-data/src/datasets/supervised.rs

use super::sequence::{check_dimensionality, SequenceDataset};
use super::traits::{check_indices, Dataset, Materialize};
use super::unsupervised::UnsupervisedDataset;
use crate::view::{self, DatasetView};
use composa_core::{ComposaError, SampleVector};
use log::debug;
use std::ops::Range;

/// A collection of `(input, target)` pairs.
///
/// Inputs and targets live in two parallel [`SequenceDataset`] halves with
/// independent dimensionalities. Every mutation validates both sides before
/// touching either, so the halves always hold the same number of samples.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SupervisedDataset {
    inputs: SequenceDataset,
    targets: SequenceDataset,
}

impl SupervisedDataset {
    /// Creates an empty dataset; both dimensionalities are fixed by the first pair.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty dataset with pre-assigned input and target dimensionalities.
    pub fn with_dimensionality(input_dimensionality: usize, target_dimensionality: usize) -> Self {
        SupervisedDataset {
            inputs: SequenceDataset::with_dimensionality(input_dimensionality),
            targets: SequenceDataset::with_dimensionality(target_dimensionality),
        }
    }

    /// Pairs two pre-populated datasets position by position.
    ///
    /// Input and target dimensionalities are taken from `inputs` and `targets`
    /// respectively.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::SizeMismatch` if the two datasets hold different
    /// numbers of samples. No dataset is produced in that case.
    pub fn from_halves(
        inputs: UnsupervisedDataset,
        targets: UnsupervisedDataset,
    ) -> Result<Self, ComposaError> {
        if inputs.len() != targets.len() {
            return Err(ComposaError::SizeMismatch {
                inputs: inputs.len(),
                targets: targets.len(),
            });
        }
        debug!(
            "SupervisedDataset: pairing {} samples ({} -> {})",
            inputs.len(),
            inputs.dimensionality(),
            targets.dimensionality()
        );
        Ok(SupervisedDataset {
            inputs: inputs.into_sequence(),
            targets: targets.into_sequence(),
        })
    }

    /// Number of pairs. Both halves always agree on it.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn input_dimensionality(&self) -> Option<usize> {
        self.inputs.dimensionality()
    }

    pub fn target_dimensionality(&self) -> Option<usize> {
        self.targets.dimensionality()
    }

    /// Appends one `(input, target)` pair atomically.
    ///
    /// Each dimensionality that is still unset is fixed by this pair.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::DimensionMismatch` if either vector disagrees with
    /// its established dimensionality. Neither half is modified in that case.
    pub fn append_pair(&mut self, input: SampleVector, target: SampleVector) -> Result<(), ComposaError> {
        check_dimensionality(self.inputs.dimensionality(), &input)?;
        check_dimensionality(self.targets.dimensionality(), &target)?;
        self.inputs.push_unchecked(input);
        self.targets.push_unchecked(target);
        Ok(())
    }

    /// Replaces the pair at `index` atomically.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::OutOfRange` or `ComposaError::DimensionMismatch`;
    /// neither half is modified on error.
    pub fn replace_pair(
        &mut self,
        index: usize,
        input: SampleVector,
        target: SampleVector,
    ) -> Result<(), ComposaError> {
        if index >= self.len() {
            return Err(ComposaError::out_of_range(index, self.len()));
        }
        check_dimensionality(self.inputs.dimensionality(), &input)?;
        check_dimensionality(self.targets.dimensionality(), &target)?;
        self.inputs.replace(index, input)?;
        self.targets.replace(index, target)
    }

    /// Returns the input at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::OutOfRange` if `index >= self.len()`.
    pub fn input_at(&self, index: usize) -> Result<&SampleVector, ComposaError> {
        self.inputs.at(index)
    }

    /// Returns the target at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::OutOfRange` if `index >= self.len()`.
    pub fn target_at(&self, index: usize) -> Result<&SampleVector, ComposaError> {
        self.targets.at(index)
    }

    pub fn pair_at(&self, index: usize) -> Result<(&SampleVector, &SampleVector), ComposaError> {
        Ok((self.inputs.at(index)?, self.targets.at(index)?))
    }

    /// Read-only access to the input half.
    pub fn inputs(&self) -> &SequenceDataset {
        &self.inputs
    }

    /// Read-only access to the target half.
    pub fn targets(&self) -> &SequenceDataset {
        &self.targets
    }

    /// Splits the dataset back into its `(inputs, targets)` halves.
    pub fn into_halves(self) -> (SequenceDataset, SequenceDataset) {
        (self.inputs, self.targets)
    }

    /// Removes every pair and resets both dimensionalities to unset.
    pub fn clear(&mut self) {
        self.inputs.clear();
        self.targets.clear();
    }

    /// Returns a fresh traversal of the pairs in insertion order.
    pub fn iter(&self) -> Pairs<'_> {
        Pairs {
            dataset: self,
            order: PairOrder::Insertion(0..self.len()),
        }
    }

    /// Returns a traversal of the pairs in the order given by `view`, or in
    /// insertion order when `view` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::SourceMismatch` if `view` was built over another
    /// dataset.
    pub fn iter_view<'a>(
        &'a self,
        view: Option<&'a DatasetView<'_, Self>>,
    ) -> Result<Pairs<'a>, ComposaError> {
        match view {
            None => Ok(self.iter()),
            Some(view) if std::ptr::eq(view.source(), self) => Ok(Pairs {
                dataset: self,
                order: PairOrder::Indexed(view.indices().iter()),
            }),
            Some(_) => Err(ComposaError::SourceMismatch {
                operation: "SupervisedDataset::iter_view".to_string(),
            }),
        }
    }

    /// Returns a view over all pairs in a pseudo-random order fixed by `seed`.
    /// Storage is not reordered.
    pub fn shuffle(&self, seed: u64) -> DatasetView<'_, Self> {
        view::shuffled(self, seed)
    }

    /// Partitions the pairs, in insertion order, into disjoint views sized
    /// proportionally to `ratios`. A pair's input and target always land in the
    /// same view.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::InvalidArgument` if a ratio is not positive or the
    /// ratios sum to more than 1.
    pub fn split(&self, ratios: &[f64]) -> Result<Vec<DatasetView<'_, Self>>, ComposaError> {
        view::split(self, ratios)
    }

    /// Like [`SupervisedDataset::split`], over a seeded permutation.
    pub fn split_shuffled(
        &self,
        ratios: &[f64],
        seed: u64,
    ) -> Result<Vec<DatasetView<'_, Self>>, ComposaError> {
        view::split_shuffled(self, ratios, seed)
    }
}

#[derive(Debug, Clone)]
enum PairOrder<'a> {
    Insertion(Range<usize>),
    Indexed(std::slice::Iter<'a, usize>),
}

/// Iterator over borrowed `(input, target)` pairs of a [`SupervisedDataset`].
#[derive(Debug, Clone)]
pub struct Pairs<'a> {
    dataset: &'a SupervisedDataset,
    order: PairOrder<'a>,
}

impl<'a> Iterator for Pairs<'a> {
    type Item = (&'a SampleVector, &'a SampleVector);

    fn next(&mut self) -> Option<Self::Item> {
        let index = match &mut self.order {
            PairOrder::Insertion(range) => range.next()?,
            PairOrder::Indexed(indices) => *indices.next()?,
        };
        // Indices come from the dataset's own range or from a view validated
        // against it while it is immutably borrowed.
        Some((
            &self.dataset.inputs.as_slice()[index],
            &self.dataset.targets.as_slice()[index],
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.order {
            PairOrder::Insertion(range) => range.size_hint(),
            PairOrder::Indexed(indices) => indices.size_hint(),
        }
    }
}

impl<'a> ExactSizeIterator for Pairs<'a> {}

impl<'a> IntoIterator for &'a SupervisedDataset {
    type Item = (&'a SampleVector, &'a SampleVector);
    type IntoIter = Pairs<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Dataset for SupervisedDataset {
    type Item = (SampleVector, SampleVector);

    /// Returns clones of the input and target at `index`.
    fn get(&self, index: usize) -> Result<Self::Item, ComposaError> {
        let (input, target) = self.pair_at(index)?;
        Ok((input.clone(), target.clone()))
    }

    fn len(&self) -> usize {
        self.inputs.len()
    }
}

impl Materialize for SupervisedDataset {
    type Owned = SupervisedDataset;

    fn materialize_indices(&self, indices: &[usize]) -> Result<Self::Owned, ComposaError> {
        check_indices(indices, self.len())?;
        Ok(SupervisedDataset {
            inputs: self.inputs.materialize_indices(indices)?,
            targets: self.targets.materialize_indices(indices)?,
        })
    }
}

impl<'a> DatasetView<'a, SupervisedDataset> {
    /// Borrows the viewed pairs in view order without cloning them.
    pub fn pairs(&self) -> Pairs<'_> {
        Pairs {
            dataset: self.source(),
            order: PairOrder::Indexed(self.indices().iter()),
        }
    }
}

#[cfg(test)]
#[path = "supervised_test.rs"]
mod tests;
