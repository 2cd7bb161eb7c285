// src/sample.rs
use crate::error::ComposaError;
use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use std::ops::{Index, IndexMut};

/// A fixed-length numeric vector holding one input pattern or one target.
///
/// The length is set at construction and never changes afterwards; element
/// values stay mutable. Datasets rely on the fixed length to keep every stored
/// vector at the dataset's dimensionality.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleVector {
    values: Vec<f64>,
}

impl SampleVector {
    /// Creates a zero-initialized vector of the given length.
    pub fn zeros(len: usize) -> Self {
        SampleVector {
            values: vec![0.0; len],
        }
    }

    /// Creates a vector that takes ownership of `values`, keeping their order.
    pub fn from_vec(values: Vec<f64>) -> Self {
        SampleVector { values }
    }

    /// Creates a vector of `len` values drawn uniformly from `[0, 1)`.
    pub fn random_uniform<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let values: Vec<f64> = (0..len).map(|_| rng.gen::<f64>()).collect();
        SampleVector { values }
    }

    /// Creates a vector of `len` values drawn from the standard normal distribution.
    pub fn random_normal<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let values: Vec<f64> = (0..len).map(|_| StandardNormal.sample(&mut *rng)).collect();
        SampleVector { values }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the vector has no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::OutOfRange` if `index >= self.len()`.
    pub fn get(&self, index: usize) -> Result<f64, ComposaError> {
        self.values
            .get(index)
            .copied()
            .ok_or_else(|| ComposaError::out_of_range(index, self.values.len()))
    }

    /// Overwrites the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ComposaError::OutOfRange` if `index >= self.len()`; the vector is
    /// left untouched in that case.
    pub fn set(&mut self, index: usize, value: f64) -> Result<(), ComposaError> {
        let len = self.values.len();
        let slot = self
            .values
            .get_mut(index)
            .ok_or_else(|| ComposaError::out_of_range(index, len))?;
        *slot = value;
        Ok(())
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: f64) {
        self.values.iter_mut().for_each(|v| *v = value);
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Mutable access to the elements. The slice cannot change the length.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.values.iter()
    }

    /// Consumes the vector and returns its elements.
    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

impl From<Vec<f64>> for SampleVector {
    fn from(values: Vec<f64>) -> Self {
        SampleVector::from_vec(values)
    }
}

impl From<&[f64]> for SampleVector {
    fn from(values: &[f64]) -> Self {
        SampleVector::from_vec(values.to_vec())
    }
}

impl<'a> IntoIterator for &'a SampleVector {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Panics if `index` is out of range, like slice indexing. Use
/// [`SampleVector::get`] for a checked read.
impl Index<usize> for SampleVector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

impl IndexMut<usize> for SampleVector {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.values[index]
    }
}

// Element-wise approximate comparisons. Vectors of different lengths are never equal.
impl AbsDiffEq for SampleVector {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.len() == other.len()
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for SampleVector {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.len() == other.len()
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

impl UlpsEq for SampleVector {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: f64, max_ulps: u32) -> bool {
        self.len() == other.len()
            && self
                .values
                .iter()
                .zip(other.values.iter())
                .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
    }
}

#[cfg(test)]
#[path = "sample_test.rs"]
mod tests;
