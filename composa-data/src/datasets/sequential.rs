// composa-data/src/datasets/sequential.rs

use super::sequence::SequenceDataset;
use super::traits::{check_indices, Dataset, Materialize};
use crate::view::{self, DatasetView};
use composa_core::{ComposaError, SampleVector};
use log::debug;

/// How the target sequence of a sample lines up with its input sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLayout {
    /// One target row per input timestep.
    PerStep,
    /// A single target row for the whole input sequence.
    Final,
}

/// A supervised dataset whose samples are whole sequences.
///
/// Each sample pairs an input sequence with a target sequence, both stored as
/// [`SequenceDataset`]s of timesteps. Sequences may differ in length from one
/// sample to the next, but every input row shares one dimensionality and every
/// target row shares another.
#[derive(Debug, Clone, PartialEq)]
pub struct SequentialSupervisedDataset {
    layout: TargetLayout,
    input_dimensionality: Option<usize>,
    target_dimensionality: Option<usize>,
    inputs: Vec<SequenceDataset>,
    targets: Vec<SequenceDataset>,
}

fn check_rows(expected: Option<usize>, sequence: &SequenceDataset) -> Result<(), ComposaError> {
    match (expected, sequence.dimensionality()) {
        (Some(expected), Some(actual)) if expected != actual => {
            Err(ComposaError::DimensionMismatch { expected, actual })
        }
        _ => Ok(()),
    }
}

impl SequentialSupervisedDataset {
    /// Creates an empty dataset; row dimensionalities are fixed by the first sample.
    pub fn new(layout: TargetLayout) -> Self {
        SequentialSupervisedDataset {
            layout,
            input_dimensionality: None,
            target_dimensionality: None,
            inputs: Vec::new(),
            targets: Vec::new(),
        }
    }

    pub fn with_dimensionality(
        layout: TargetLayout,
        input_dimensionality: usize,
        target_dimensionality: usize,
    ) -> Self {
        SequentialSupervisedDataset {
            input_dimensionality: Some(input_dimensionality),
            target_dimensionality: Some(target_dimensionality),
            ..Self::new(layout)
        }
    }

    pub fn layout(&self) -> TargetLayout {
        self.layout
    }

    /// Number of sequence samples.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn input_dimensionality(&self) -> Option<usize> {
        self.input_dimensionality
    }

    pub fn target_dimensionality(&self) -> Option<usize> {
        self.target_dimensionality
    }

    /// Total number of input timesteps over all samples.
    pub fn total_timesteps(&self) -> usize {
        self.inputs.iter().map(SequenceDataset::len).sum()
    }

    /// Appends one `(input, target)` sequence pair atomically.
    ///
    /// # Errors
    ///
    /// * `ComposaError::InvalidArgument` if either sequence is empty, or a
    ///   [`TargetLayout::Final`] target does not hold exactly one row.
    /// * `ComposaError::SizeMismatch` if a [`TargetLayout::PerStep`] target does
    ///   not have one row per input timestep.
    /// * `ComposaError::DimensionMismatch` if the rows disagree with the
    ///   established input or target dimensionality.
    ///
    /// The dataset is unchanged on error.
    pub fn append_sequence(
        &mut self,
        input: SequenceDataset,
        target: SequenceDataset,
    ) -> Result<(), ComposaError> {
        if input.is_empty() || target.is_empty() {
            return Err(ComposaError::InvalidArgument(
                "sequence samples need at least one timestep".to_string(),
            ));
        }
        match self.layout {
            TargetLayout::PerStep if input.len() != target.len() => {
                return Err(ComposaError::SizeMismatch {
                    inputs: input.len(),
                    targets: target.len(),
                });
            }
            TargetLayout::Final if target.len() != 1 => {
                return Err(ComposaError::InvalidArgument(format!(
                    "a final-target sample takes exactly one target row, got {}",
                    target.len()
                )));
            }
            _ => {}
        }
        check_rows(self.input_dimensionality, &input)?;
        check_rows(self.target_dimensionality, &target)?;

        self.input_dimensionality = self.input_dimensionality.or(input.dimensionality());
        self.target_dimensionality = self.target_dimensionality.or(target.dimensionality());
        self.inputs.push(input);
        self.targets.push(target);
        Ok(())
    }

    /// Appends an input sequence with a single target vector.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::InvalidArgument` unless the layout is
    /// [`TargetLayout::Final`], plus the errors of
    /// [`SequentialSupervisedDataset::append_sequence`].
    pub fn append_final(&mut self, input: SequenceDataset, target: SampleVector) -> Result<(), ComposaError> {
        if self.layout != TargetLayout::Final {
            return Err(ComposaError::InvalidArgument(
                "append_final requires the Final target layout".to_string(),
            ));
        }
        let target = SequenceDataset::from_samples(std::iter::once(target))?;
        self.append_sequence(input, target)
    }

    /// Returns the input sequence at `index`.
    pub fn input_at(&self, index: usize) -> Result<&SequenceDataset, ComposaError> {
        self.inputs
            .get(index)
            .ok_or_else(|| ComposaError::out_of_range(index, self.inputs.len()))
    }

    /// Returns the target sequence at `index`.
    pub fn target_at(&self, index: usize) -> Result<&SequenceDataset, ComposaError> {
        self.targets
            .get(index)
            .ok_or_else(|| ComposaError::out_of_range(index, self.targets.len()))
    }

    /// Removes every sample and resets both row dimensionalities to unset.
    pub fn clear(&mut self) {
        debug!("SequentialSupervisedDataset: clearing {} sequences", self.inputs.len());
        self.inputs.clear();
        self.targets.clear();
        self.input_dimensionality = None;
        self.target_dimensionality = None;
    }

    /// Returns a fresh traversal of the sequence pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&SequenceDataset, &SequenceDataset)> + '_ {
        self.inputs.iter().zip(self.targets.iter())
    }

    pub fn shuffle(&self, seed: u64) -> DatasetView<'_, Self> {
        view::shuffled(self, seed)
    }

    /// Partitions whole sequences, in insertion order, into disjoint views.
    pub fn split(&self, ratios: &[f64]) -> Result<Vec<DatasetView<'_, Self>>, ComposaError> {
        view::split(self, ratios)
    }

    pub fn split_shuffled(
        &self,
        ratios: &[f64],
        seed: u64,
    ) -> Result<Vec<DatasetView<'_, Self>>, ComposaError> {
        view::split_shuffled(self, ratios, seed)
    }
}

impl Dataset for SequentialSupervisedDataset {
    type Item = (SequenceDataset, SequenceDataset);

    fn get(&self, index: usize) -> Result<Self::Item, ComposaError> {
        Ok((self.input_at(index)?.clone(), self.target_at(index)?.clone()))
    }

    fn len(&self) -> usize {
        self.inputs.len()
    }
}

impl Materialize for SequentialSupervisedDataset {
    type Owned = SequentialSupervisedDataset;

    fn materialize_indices(&self, indices: &[usize]) -> Result<Self::Owned, ComposaError> {
        check_indices(indices, self.inputs.len())?;
        Ok(SequentialSupervisedDataset {
            layout: self.layout,
            input_dimensionality: self.input_dimensionality,
            target_dimensionality: self.target_dimensionality,
            inputs: indices.iter().map(|&i| self.inputs[i].clone()).collect(),
            targets: indices.iter().map(|&i| self.targets[i].clone()).collect(),
        })
    }
}

#[cfg(test)]
#[path = "sequential_test.rs"]
mod tests;
