use composa_core::SampleVector;
use composa_data::{SupervisedDataset, UnsupervisedDataset};

// Helpers shared by the integration tests.
// allow(dead_code): not every test binary uses every helper.
#[allow(dead_code)]
pub(crate) fn ramp(dimensionality: usize, offset: f64) -> SampleVector {
    SampleVector::from_vec((0..dimensionality).map(|j| offset + j as f64 * 0.1).collect())
}

#[allow(dead_code)]
pub(crate) fn unsupervised(dimensionality: usize, size: usize) -> UnsupervisedDataset {
    UnsupervisedDataset::from_samples(
        dimensionality,
        (0..size).map(|i| ramp(dimensionality, i as f64)),
    )
    .expect("Test dataset creation failed")
}

/// Pairs `x` with `-x`, so a pair's halves can be checked against each other.
#[allow(dead_code)]
pub(crate) fn mirrored(size: usize, dimensionality: usize) -> SupervisedDataset {
    let mut dataset = SupervisedDataset::with_dimensionality(dimensionality, dimensionality);
    for i in 0..size {
        let input = ramp(dimensionality, i as f64);
        let target = SampleVector::from_vec(input.iter().map(|v| -v).collect());
        dataset.append_pair(input, target).expect("Test pair append failed");
    }
    dataset
}
