pub mod traits;
pub mod sequence;
pub mod unsupervised;
pub mod supervised;
pub mod sequential;

pub use traits::{Dataset, Materialize};
pub use sequence::SequenceDataset;
pub use unsupervised::UnsupervisedDataset;
pub use supervised::{Pairs, SupervisedDataset};
pub use sequential::{SequentialSupervisedDataset, TargetLayout};
