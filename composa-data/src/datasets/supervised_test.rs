// composa-data/src/datasets/supervised_test.rs

use super::*;
use std::collections::HashSet;

fn pair(i: usize) -> (SampleVector, SampleVector) {
    let x = i as f64;
    (
        SampleVector::from_vec(vec![x, x * 2.0]),
        SampleVector::from_vec(vec![-x]),
    )
}

fn filled(size: usize) -> SupervisedDataset {
    let mut dataset = SupervisedDataset::new();
    for i in 0..size {
        let (input, target) = pair(i);
        dataset.append_pair(input, target).unwrap();
    }
    dataset
}

#[test]
fn test_append_pair_and_access() {
    let dataset = filled(3);
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.input_dimensionality(), Some(2));
    assert_eq!(dataset.target_dimensionality(), Some(1));
    for i in 0..3 {
        let (input, target) = pair(i);
        assert_eq!(dataset.input_at(i).unwrap(), &input);
        assert_eq!(dataset.target_at(i).unwrap(), &target);
    }
}

#[test]
fn test_single_pair_roundtrip() {
    // One random pattern and one random target.
    let mut rng = rand::thread_rng();
    let sample = SampleVector::random_uniform(1, &mut rng);
    let target = SampleVector::random_uniform(1, &mut rng);
    let mut dataset = SupervisedDataset::with_dimensionality(1, 1);
    dataset.append_pair(sample.clone(), target.clone()).unwrap();
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.input_at(0).unwrap(), &sample);
    assert_eq!(dataset.target_at(0).unwrap(), &target);
}

#[test]
fn test_append_pair_is_atomic() {
    let mut dataset = filled(2);
    let before = dataset.clone();

    // Valid input, bad target.
    assert_eq!(
        dataset.append_pair(SampleVector::zeros(2), SampleVector::zeros(3)),
        Err(ComposaError::DimensionMismatch { expected: 1, actual: 3 })
    );
    // Bad input, valid target.
    assert_eq!(
        dataset.append_pair(SampleVector::zeros(5), SampleVector::zeros(1)),
        Err(ComposaError::DimensionMismatch { expected: 2, actual: 5 })
    );
    assert_eq!(dataset, before);
    assert_eq!(dataset.inputs().len(), dataset.targets().len());
}

#[test]
fn test_halves_stay_aligned_over_mixed_appends() {
    let mut dataset = SupervisedDataset::with_dimensionality(2, 1);
    for i in 0..20 {
        let target_len = if i % 3 == 0 { 2 } else { 1 };
        let _ = dataset.append_pair(SampleVector::zeros(2), SampleVector::zeros(target_len));
        assert_eq!(dataset.inputs().len(), dataset.targets().len());
    }
    assert_eq!(dataset.len(), 13);
}

#[test]
fn test_out_of_range_access() {
    let dataset = filled(2);
    assert_eq!(dataset.input_at(2), Err(ComposaError::out_of_range(2, 2)));
    assert_eq!(dataset.target_at(5), Err(ComposaError::out_of_range(5, 2)));
    assert!(dataset.pair_at(2).is_err());
}

#[test]
fn test_from_halves() {
    let inputs = UnsupervisedDataset::from_samples(3, (0..4).map(|_| SampleVector::zeros(3))).unwrap();
    let targets = UnsupervisedDataset::from_samples(2, (0..4).map(|_| SampleVector::zeros(2))).unwrap();
    let dataset = SupervisedDataset::from_halves(inputs, targets).unwrap();
    assert_eq!(dataset.len(), 4);
    assert_eq!(dataset.input_dimensionality(), Some(3));
    assert_eq!(dataset.target_dimensionality(), Some(2));
}

#[test]
fn test_from_halves_size_mismatch() {
    let inputs = UnsupervisedDataset::from_samples(2, (0..5).map(|_| SampleVector::zeros(2))).unwrap();
    let targets = UnsupervisedDataset::from_samples(2, (0..4).map(|_| SampleVector::zeros(2))).unwrap();
    match SupervisedDataset::from_halves(inputs, targets) {
        Err(ComposaError::SizeMismatch { inputs, targets }) => {
            assert_eq!(inputs, 5);
            assert_eq!(targets, 4);
        }
        other => panic!("Expected SizeMismatch error, got {:?}", other),
    }
}

#[test]
fn test_replace_pair() {
    let mut dataset = filled(3);
    let (input, target) = pair(10);
    dataset.replace_pair(1, input.clone(), target.clone()).unwrap();
    assert_eq!(dataset.pair_at(1).unwrap(), (&input, &target));

    let before = dataset.clone();
    assert!(dataset.replace_pair(3, input.clone(), target.clone()).is_err());
    assert!(dataset.replace_pair(0, input, SampleVector::zeros(4)).is_err());
    assert_eq!(dataset, before);
}

#[test]
fn test_clear_and_into_halves() {
    let mut dataset = filled(3);
    let (inputs, targets) = dataset.clone().into_halves();
    assert_eq!(inputs.len(), 3);
    assert_eq!(targets.dimensionality(), Some(1));

    dataset.clear();
    assert!(dataset.is_empty());
    assert_eq!(dataset.input_dimensionality(), None);
    assert_eq!(dataset.target_dimensionality(), None);
}

#[test]
fn test_iter_in_insertion_order() {
    let dataset = filled(4);
    let inputs: Vec<f64> = dataset.iter().map(|(input, _)| input[0]).collect();
    assert_eq!(inputs, vec![0.0, 1.0, 2.0, 3.0]);
    assert_eq!(dataset.iter().len(), 4);
    // Restartable: a second traversal sees the same pairs.
    assert_eq!((&dataset).into_iter().count(), 4);
}

#[test]
fn test_shuffle_reproducible_and_complete() {
    let dataset = filled(40);
    let a = dataset.shuffle(77);
    let b = dataset.shuffle(77);
    assert_eq!(a.indices(), b.indices());

    let seen: HashSet<usize> = a.indices().iter().copied().collect();
    assert_eq!(seen, (0..40).collect::<HashSet<usize>>());
    assert_eq!(dataset, filled(40));
}

#[test]
fn test_iter_view_follows_view_order() {
    let dataset = filled(10);
    let view = dataset.shuffle(3);
    let order: Vec<f64> = dataset
        .iter_view(Some(&view))
        .unwrap()
        .map(|(input, target)| {
            assert_eq!(target[0], -input[0]);
            input[0]
        })
        .collect();
    let expected: Vec<f64> = view.indices().iter().map(|&i| i as f64).collect();
    assert_eq!(order, expected);

    let default_order: Vec<f64> = dataset.iter_view(None).unwrap().map(|(i, _)| i[0]).collect();
    assert_eq!(default_order.len(), 10);
    assert_eq!(default_order[0], 0.0);
}

#[test]
fn test_iter_view_rejects_foreign_view() {
    let dataset = filled(5);
    let other = filled(5);
    let foreign = other.shuffle(1);
    assert!(matches!(
        dataset.iter_view(Some(&foreign)),
        Err(ComposaError::SourceMismatch { .. })
    ));
}

#[test]
fn test_split_keeps_pairs_together() {
    let dataset = filled(100);
    let parts = dataset.split_shuffled(&[0.8, 0.2], 2024).unwrap();
    assert_eq!(parts[0].len(), 80);
    assert_eq!(parts[1].len(), 20);
    for part in &parts {
        for (input, target) in part.pairs() {
            assert_eq!(target[0], -input[0]);
        }
    }
    let train: HashSet<usize> = parts[0].indices().iter().copied().collect();
    assert!(parts[1].indices().iter().all(|i| !train.contains(i)));
}

#[test]
fn test_split_in_order() {
    let dataset = filled(10);
    let parts = dataset.split(&[0.7, 0.3]).unwrap();
    assert_eq!(parts[0].indices(), &[0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(parts[1].indices(), &[7, 8, 9]);
}

#[test]
fn test_materialize_view() {
    let dataset = filled(6);
    let view = DatasetView::new(&dataset, vec![5, 2]).unwrap();
    let copy = view.materialize().unwrap();
    assert_eq!(copy.len(), 2);
    assert_eq!(copy.input_dimensionality(), Some(2));
    assert_eq!(copy.target_dimensionality(), Some(1));
    assert_eq!(copy.pair_at(0).unwrap(), dataset.pair_at(5).unwrap());
    assert_eq!(copy.pair_at(1).unwrap(), dataset.pair_at(2).unwrap());
}

#[test]
fn test_dataset_trait_get() {
    let dataset = filled(2);
    let (input, target) = Dataset::get(&dataset, 1).unwrap();
    assert_eq!((input, target), pair(1));
    assert!(Dataset::get(&dataset, 2).is_err());
}
