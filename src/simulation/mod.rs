//! Inventory simulation: replay an assessment in a chosen order and find the
//! smallest set of words that samples every phoneme often enough.

mod engine;
mod result;

pub use engine::{case_frequencies, InventorySimulator};
pub use result::{ClusterSplitPolicy, SimulationResult};
