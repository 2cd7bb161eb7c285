//! Dataset containers for training and evaluation samples.
//!
//! - [`SequenceDataset`]: ordered vectors sharing one dimensionality.
//! - [`UnsupervisedDataset`]: input-only patterns with a fixed dimensionality.
//! - [`SupervisedDataset`]: `(input, target)` pairs appended atomically.
//! - [`SequentialSupervisedDataset`]: pairs of whole sequences.
//! - [`DatasetView`]: borrowed index projections for shuffling and splitting.
//! - [`DataLoader`]: batches a dataset or view in sampler order.

pub mod config;
pub mod dataloader;
pub mod datasets;
pub mod samplers;
pub mod view;

// Re-export main components
pub use config::LoaderConfig;
pub use dataloader::DataLoader;
pub use datasets::{
    Dataset, Materialize, Pairs, SequenceDataset, SequentialSupervisedDataset, SupervisedDataset,
    TargetLayout, UnsupervisedDataset,
};
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
pub use view::DatasetView;
