//! Leaf types shared by the Composa dataset crates.
//!
//! `composa-core` holds the [`SampleVector`] value type (one pattern or one
//! target) and the [`ComposaError`] type every dataset operation reports.

pub mod error;
pub mod sample;

// Re-export the main types so they are reachable as `composa_core::SampleVector`
pub use error::ComposaError;
pub use sample::SampleVector;
