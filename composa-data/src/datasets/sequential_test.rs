// composa-data/src/datasets/sequential_test.rs

use super::*;

fn rows(count: usize, dimensionality: usize, start: f64) -> SequenceDataset {
    SequenceDataset::from_samples(
        (0..count).map(|t| SampleVector::from_vec(vec![start + t as f64; dimensionality])),
    )
    .unwrap()
}

#[test]
fn test_per_step_append() {
    let mut dataset = SequentialSupervisedDataset::new(TargetLayout::PerStep);
    dataset.append_sequence(rows(2, 1, 0.0), rows(2, 1, 10.0)).unwrap();
    dataset.append_sequence(rows(4, 1, 5.0), rows(4, 1, 20.0)).unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.total_timesteps(), 6);
    assert_eq!(dataset.input_dimensionality(), Some(1));
    assert_eq!(dataset.input_at(1).unwrap().len(), 4);
    assert_eq!(dataset.target_at(0).unwrap().at(1).unwrap()[0], 11.0);
}

#[test]
fn test_per_step_length_mismatch() {
    let mut dataset = SequentialSupervisedDataset::new(TargetLayout::PerStep);
    assert_eq!(
        dataset.append_sequence(rows(3, 1, 0.0), rows(2, 1, 0.0)),
        Err(ComposaError::SizeMismatch { inputs: 3, targets: 2 })
    );
    assert!(dataset.is_empty());
}

#[test]
fn test_final_layout() {
    let mut dataset = SequentialSupervisedDataset::new(TargetLayout::Final);
    dataset
        .append_final(rows(2, 3, 0.0), SampleVector::from_vec(vec![1.0]))
        .unwrap();
    assert_eq!(dataset.target_dimensionality(), Some(1));
    assert_eq!(dataset.target_at(0).unwrap().len(), 1);
    assert!(matches!(
        dataset.append_sequence(rows(2, 3, 0.0), rows(2, 1, 0.0)),
        Err(ComposaError::InvalidArgument(_))
    ));
    assert_eq!(dataset.len(), 1);
}

#[test]
fn test_append_final_requires_final_layout() {
    let mut dataset = SequentialSupervisedDataset::new(TargetLayout::PerStep);
    assert!(dataset
        .append_final(rows(1, 1, 0.0), SampleVector::zeros(1))
        .is_err());
}

#[test]
fn test_row_dimension_mismatch_is_atomic() {
    let mut dataset = SequentialSupervisedDataset::with_dimensionality(TargetLayout::PerStep, 2, 1);
    let before = dataset.clone();
    assert_eq!(
        dataset.append_sequence(rows(2, 2, 0.0), rows(2, 3, 0.0)),
        Err(ComposaError::DimensionMismatch { expected: 1, actual: 3 })
    );
    assert_eq!(
        dataset.append_sequence(rows(2, 5, 0.0), rows(2, 1, 0.0)),
        Err(ComposaError::DimensionMismatch { expected: 2, actual: 5 })
    );
    assert_eq!(dataset, before);
}

#[test]
fn test_empty_sequences_rejected() {
    let mut dataset = SequentialSupervisedDataset::new(TargetLayout::PerStep);
    assert!(matches!(
        dataset.append_sequence(SequenceDataset::new(), SequenceDataset::new()),
        Err(ComposaError::InvalidArgument(_))
    ));
}

#[test]
fn test_out_of_range() {
    let dataset = SequentialSupervisedDataset::new(TargetLayout::Final);
    assert_eq!(dataset.input_at(0), Err(ComposaError::out_of_range(0, 0)));
    assert!(dataset.target_at(0).is_err());
}

#[test]
fn test_split_and_materialize_whole_sequences() {
    let mut dataset = SequentialSupervisedDataset::new(TargetLayout::PerStep);
    for i in 0..5 {
        dataset
            .append_sequence(rows(i + 1, 2, i as f64), rows(i + 1, 1, -(i as f64)))
            .unwrap();
    }
    let parts = dataset.split(&[0.6, 0.4]).unwrap();
    assert_eq!(parts[0].len(), 3);
    assert_eq!(parts[1].len(), 2);

    let tail = parts[1].materialize().unwrap();
    assert_eq!(tail.layout(), TargetLayout::PerStep);
    assert_eq!(tail.len(), 2);
    assert_eq!(tail.input_at(0).unwrap(), dataset.input_at(3).unwrap());
    assert_eq!(tail.total_timesteps(), 4 + 5);
}

#[test]
fn test_shuffle_and_iter() {
    let mut dataset = SequentialSupervisedDataset::new(TargetLayout::PerStep);
    for i in 0..6 {
        dataset.append_sequence(rows(2, 1, i as f64), rows(2, 1, 0.0)).unwrap();
    }
    assert_eq!(dataset.shuffle(4).indices(), dataset.shuffle(4).indices());
    assert_eq!(dataset.iter().count(), 6);
    let (input, _) = dataset.get(2).unwrap();
    assert_eq!(input.at(0).unwrap()[0], 2.0);
}

#[test]
fn test_clear() {
    let mut dataset = SequentialSupervisedDataset::new(TargetLayout::PerStep);
    dataset.append_sequence(rows(1, 2, 0.0), rows(1, 2, 0.0)).unwrap();
    dataset.clear();
    assert!(dataset.is_empty());
    assert_eq!(dataset.input_dimensionality(), None);
    dataset.append_sequence(rows(1, 3, 0.0), rows(1, 1, 0.0)).unwrap();
    assert_eq!(dataset.input_dimensionality(), Some(3));
}
