// composa-data/src/view.rs
//! Non-owning, reordered or filtered projections over a dataset.
//!
//! A [`DatasetView`] is an index array plus a shared borrow of its source
//! dataset. Shuffling and splitting only permute or partition the index array;
//! samples are never copied until [`DatasetView::materialize`] is called.
//!
//! The borrow keeps the source immutable for as long as the view lives, so a
//! view can never observe a resized or re-dimensioned source. To keep a
//! selection across a mutation, take the index snapshot with
//! [`DatasetView::into_indices`] and rebuild the view with [`DatasetView::new`],
//! which revalidates every index against the current source.

use crate::datasets::traits::{check_indices, Dataset, Materialize};
use composa_core::ComposaError;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Slack allowed when checking that split ratios sum to at most 1.
pub const SPLIT_TOLERANCE: f64 = 1e-6;

/// An ordered sequence of indices into a borrowed dataset.
#[derive(Debug)]
pub struct DatasetView<'a, D> {
    source: &'a D,
    indices: Vec<usize>,
}

// Manual impl: cloning a view never requires cloning its source.
impl<'a, D> Clone for DatasetView<'a, D> {
    fn clone(&self) -> Self {
        DatasetView {
            source: self.source,
            indices: self.indices.clone(),
        }
    }
}

impl<'a, D: Dataset> DatasetView<'a, D> {
    /// Creates a view selecting `indices` of `source`, in that order.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::OutOfRange` if any index is `>= source.len()`.
    pub fn new(source: &'a D, indices: Vec<usize>) -> Result<Self, ComposaError> {
        check_indices(&indices, source.len())?;
        Ok(DatasetView { source, indices })
    }

    /// Creates a view over every item of `source` in insertion order.
    pub fn full(source: &'a D) -> Self {
        DatasetView {
            source,
            indices: (0..source.len()).collect(),
        }
    }

    /// Number of positions in the view.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns the source index stored at logical `position`.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::OutOfRange` if `position >= self.len()`.
    pub fn resolve(&self, position: usize) -> Result<usize, ComposaError> {
        self.indices
            .get(position)
            .copied()
            .ok_or_else(|| ComposaError::out_of_range(position, self.indices.len()))
    }

    /// The source indices, in view order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Releases the borrow on the source and returns the index snapshot.
    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }

    pub fn source(&self) -> &'a D {
        self.source
    }

    /// Yields the source items in view order.
    pub fn iter(&self) -> impl Iterator<Item = Result<D::Item, ComposaError>> + '_ {
        self.indices.iter().map(move |&index| self.source.get(index))
    }

    /// Creates a view over this view, selecting the given logical positions.
    ///
    /// Index resolution chains: position `p` of the result maps to
    /// `self.resolve(positions[p])`.
    pub fn subview(&self, positions: Vec<usize>) -> Result<DatasetView<'_, Self>, ComposaError> {
        DatasetView::new(self, positions)
    }

    /// Returns a view over the same source with this view's indices permuted
    /// deterministically by `seed`.
    pub fn shuffle(&self, seed: u64) -> DatasetView<'a, D> {
        let mut indices = self.indices.clone();
        shuffle_indices(&mut indices, seed);
        DatasetView {
            source: self.source,
            indices,
        }
    }

    /// Partitions this view's positions, in order, into disjoint views over the
    /// same source. See [`split`] for the sizing rules.
    pub fn split(&self, ratios: &[f64]) -> Result<Vec<DatasetView<'a, D>>, ComposaError> {
        let sizes = split_sizes(self.indices.len(), ratios)?;
        let mut views = Vec::with_capacity(sizes.len());
        let mut offset = 0;
        for size in sizes {
            views.push(DatasetView {
                source: self.source,
                indices: self.indices[offset..offset + size].to_vec(),
            });
            offset += size;
        }
        Ok(views)
    }

    /// Groups the source indices into consecutive batches of `batch_size`; the
    /// last batch may be shorter.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::InvalidArgument` if `batch_size` is zero.
    pub fn chunks(&self, batch_size: usize) -> Result<std::slice::Chunks<'_, usize>, ComposaError> {
        if batch_size == 0 {
            return Err(ComposaError::InvalidArgument(
                "batch_size must be greater than zero".to_string(),
            ));
        }
        Ok(self.indices.chunks(batch_size))
    }
}

impl<'a, D: Materialize> DatasetView<'a, D> {
    /// Copies the referenced items, in view order, into a standalone dataset
    /// that no longer borrows the source.
    pub fn materialize(&self) -> Result<D::Owned, ComposaError> {
        debug!("DatasetView: materializing {} items", self.indices.len());
        self.source.materialize_indices(&self.indices)
    }
}

impl<'a, D: Dataset> Dataset for DatasetView<'a, D> {
    type Item = D::Item;

    fn get(&self, index: usize) -> Result<Self::Item, ComposaError> {
        self.source.get(self.resolve(index)?)
    }

    fn len(&self) -> usize {
        self.indices.len()
    }
}

impl<'a, D: Materialize> Materialize for DatasetView<'a, D> {
    type Owned = D::Owned;

    fn materialize_indices(&self, indices: &[usize]) -> Result<Self::Owned, ComposaError> {
        let resolved = indices
            .iter()
            .map(|&position| self.resolve(position))
            .collect::<Result<Vec<_>, _>>()?;
        self.source.materialize_indices(&resolved)
    }
}

/// Returns a view over all of `source` in a pseudo-random order fixed by `seed`.
///
/// The same seed on the same source size always yields the same order.
pub fn shuffled<D: Dataset>(source: &D, seed: u64) -> DatasetView<'_, D> {
    debug!("shuffled: permuting {} indices with seed {}", source.len(), seed);
    let mut indices: Vec<usize> = (0..source.len()).collect();
    shuffle_indices(&mut indices, seed);
    DatasetView { source, indices }
}

/// Partitions `source`, in insertion order, into disjoint views sized by `ratios`.
///
/// Ratios must be positive and sum to at most 1 (within [`SPLIT_TOLERANCE`]).
/// View `k` ends at `round(n * (r1 + ... + rk))`, so sizes sum to `n` when the
/// ratios sum to 1; any remainder stays unassigned.
///
/// # Errors
///
/// Returns `ComposaError::InvalidArgument` if `ratios` is empty, holds a ratio
/// that is not strictly positive, or sums to more than 1.
pub fn split<'a, D: Dataset>(
    source: &'a D,
    ratios: &[f64],
) -> Result<Vec<DatasetView<'a, D>>, ComposaError> {
    DatasetView::full(source).split(ratios)
}

/// Like [`split`], but partitions a seeded permutation of `source` so every view
/// draws from the whole dataset.
pub fn split_shuffled<'a, D: Dataset>(
    source: &'a D,
    ratios: &[f64],
    seed: u64,
) -> Result<Vec<DatasetView<'a, D>>, ComposaError> {
    shuffled(source, seed).split(ratios)
}

pub(crate) fn shuffle_indices(indices: &mut [usize], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
}

/// Computes the sizes of consecutive split parts of `n` items.
pub(crate) fn split_sizes(n: usize, ratios: &[f64]) -> Result<Vec<usize>, ComposaError> {
    if ratios.is_empty() {
        return Err(ComposaError::InvalidArgument(
            "at least one split ratio is required".to_string(),
        ));
    }
    if let Some(bad) = ratios.iter().find(|r| !(**r > 0.0)) {
        return Err(ComposaError::InvalidArgument(format!(
            "split ratios must be positive, got {}",
            bad
        )));
    }
    let total: f64 = ratios.iter().sum();
    if !(total <= 1.0 + SPLIT_TOLERANCE) {
        return Err(ComposaError::InvalidArgument(format!(
            "split ratios must sum to at most 1, got {}",
            total
        )));
    }

    let mut sizes = Vec::with_capacity(ratios.len());
    let mut cumulative = 0.0;
    let mut start = 0;
    for ratio in ratios {
        cumulative += ratio;
        let end = ((n as f64 * cumulative).round() as usize).clamp(start, n);
        sizes.push(end - start);
        start = end;
    }
    if start < n {
        warn!("split: {} of {} items left unassigned (ratios sum to {})", n - start, n, total);
    }
    debug!("split: {} items into parts of sizes {:?}", n, sizes);
    Ok(sizes)
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
