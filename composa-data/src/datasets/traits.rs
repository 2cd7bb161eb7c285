// composa-data/src/datasets/traits.rs

use composa_core::ComposaError;

/// Represents a dataset that can be accessed by index.
///
/// A dataset is an ordered collection of items, where an item is a single
/// `SampleVector`, an `(input, target)` pair, or any other owned value.
pub trait Dataset {
    /// The type of a single item returned by the dataset.
    ///
    /// This type must be `Send` and `'static` so batches can be handed to
    /// other threads by the trainer.
    type Item: Send + 'static;

    /// Returns an owned copy of the item at the given index.
    ///
    /// # Arguments
    ///
    /// * `index` - The index of the item to retrieve.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::OutOfRange` if the index is out of bounds.
    fn get(&self, index: usize) -> Result<Self::Item, ComposaError>;

    /// Returns the total number of items in the dataset.
    fn len(&self) -> usize;

    /// Checks if the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Lets a loader borrow its dataset instead of owning it.
impl<D: Dataset + ?Sized> Dataset for &D {
    type Item = D::Item;

    fn get(&self, index: usize) -> Result<Self::Item, ComposaError> {
        (**self).get(index)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// A dataset able to copy a selection of its items into a standalone dataset.
///
/// The copy keeps the source's dimensionalities, so even an empty selection
/// yields a dataset that accepts the same vectors as the source.
pub trait Materialize: Dataset {
    /// The standalone dataset type produced by a copy.
    type Owned;

    /// Copies the items at `indices`, in that order, into a new dataset.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::OutOfRange` if any index is out of bounds; nothing
    /// is produced in that case.
    fn materialize_indices(&self, indices: &[usize]) -> Result<Self::Owned, ComposaError>;
}

/// Checks every index in `indices` against `len`, reporting the first offender.
pub(crate) fn check_indices(indices: &[usize], len: usize) -> Result<(), ComposaError> {
    match indices.iter().find(|&&index| index >= len) {
        Some(&index) => Err(ComposaError::out_of_range(index, len)),
        None => Ok(()),
    }
}
