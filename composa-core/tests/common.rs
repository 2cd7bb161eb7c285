use composa_core::SampleVector;

// Helper shared by the integration tests.
#[allow(dead_code)]
pub(crate) fn create_test_vector(values: &[f64]) -> SampleVector {
    SampleVector::from(values)
}
