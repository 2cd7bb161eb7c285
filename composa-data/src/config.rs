// composa-data/src/config.rs

/// Configuration for [`DataLoader::from_config`](crate::DataLoader::from_config).
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    /// Number of items per batch. Must be greater than zero.
    pub batch_size: usize,
    /// Whether to visit items in a fresh random order each epoch.
    pub shuffle: bool,
    /// Whether to drop the last incomplete batch.
    pub drop_last: bool,
    /// Optional random seed for reproducible shuffling.
    pub seed: Option<u64>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: 32,
            shuffle: false,
            drop_last: false,
            seed: None,
        }
    }
}

impl LoaderConfig {
    pub fn batch_size(mut self, bs: usize) -> Self {
        self.batch_size = bs;
        self
    }

    pub fn shuffle(mut self, s: bool) -> Self {
        self.shuffle = s;
        self
    }

    pub fn drop_last(mut self, d: bool) -> Self {
        self.drop_last = d;
        self
    }

    pub fn seed(mut self, s: u64) -> Self {
        self.seed = Some(s);
        self
    }
}
