//! Builds a small supervised dataset, splits it into training and validation
//! views and runs two shuffled epochs over the training view.

use composa_core::SampleVector;
use composa_data::{DataLoader, LoaderConfig, SupervisedDataset, UnsupervisedDataset};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let mut rng = StdRng::seed_from_u64(2024);

    // 50 random patterns of dimension 3, each mapped to the sum of its values.
    let mut inputs = UnsupervisedDataset::new(3).expect("non-zero dimensionality");
    let mut targets = UnsupervisedDataset::new(1).expect("non-zero dimensionality");
    for _ in 0..50 {
        let pattern = SampleVector::random_uniform(3, &mut rng);
        let sum: f64 = pattern.iter().sum();
        inputs.append(pattern).expect("pattern matches dimensionality");
        targets
            .append(SampleVector::from_vec(vec![sum]))
            .expect("target matches dimensionality");
    }
    let dataset = SupervisedDataset::from_halves(inputs, targets).expect("halves have equal size");
    println!("dataset: {} pairs", dataset.len());

    let parts = dataset
        .split_shuffled(&[0.8, 0.2], 7)
        .expect("valid split ratios");
    let (train, validation) = (&parts[0], &parts[1]);
    println!("train: {} pairs, validation: {} pairs", train.len(), validation.len());

    let config = LoaderConfig::default().batch_size(16).shuffle(true).seed(11);
    let mut loader = DataLoader::from_config(train, &config).expect("valid loader config");
    for epoch in 0..2 {
        println!("\n--- Epoch {epoch} ({} batches) ---", loader.num_batches());
        for (i, batch) in loader.by_ref().enumerate() {
            let batch = batch.expect("no error expected");
            let mean_target: f64 =
                batch.iter().map(|(_, target)| target[0]).sum::<f64>() / batch.len() as f64;
            println!("Batch {i}: {} pairs, mean target {:.3}", batch.len(), mean_target);
        }
        loader.reset();
    }

    let held_out = validation.materialize().expect("indices are valid");
    println!("\nvalidation copy: {} pairs, input dim {:?}", held_out.len(), held_out.input_dimensionality());
}
