//! Consonant-cluster inference.
//!
//! Generalizes from the clusters a child produced (or failed to produce) to
//! clusters never directly tested, using pure set algebra over cluster
//! constituents. Every run is deterministic given the assessment and the
//! target-phoneme table.

mod clusters;
mod result;

pub use clusters::{combine_constituents, ClusterInferenceEngine};
pub use result::{ClusterInferenceResult, NotProducibleResult};
