//! # Phonoscope - Phonological Inventory Analysis
//!
//! Phonoscope estimates which phonemes a child has acquired from a short
//! naming assessment. Each named picture yields a [`KnownCase`]; a set of cases
//! forms an [`Assessment`] that the engines replay against fixed
//! [`ReferenceTables`] (a difficulty ranking of words plus each word's target
//! phonemes).
//!
//! ## Core Concepts
//!
//! - **Phoneme**: An IPA-like symbol with an optional syllabic position
//! - **TranscriptionParser**: Extracts consonants from bracketed IPA strings
//! - **DifficultyTree**: Balanced search tree over the word ranking, used to
//!   pick the next word to test based on previous outcomes
//! - **InventorySimulator**: Counts phoneme observations and the minimal words
//!   needed to reach a threshold
//! - **ClusterInferenceEngine**: Infers which consonant clusters the child can
//!   or cannot produce
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use phonoscope::{
//!     Assessment, EngineConfig, InventorySimulator, KnownCase, Phoneme, Position,
//!     ReferenceTables, TargetPhonemes, WordRanking,
//! };
//!
//! let reference = ReferenceTables::builder()
//!     .ranking(WordRanking::new(["Anel", "Gato"])?)
//!     .targets(TargetPhonemes::new())
//!     .build()?;
//!
//! let assessment = Assessment::from_cases([KnownCase::new(
//!     "Gato",
//!     "['ga.tu]",
//!     true,
//!     vec![Phoneme::new("g", Position::InitialOnset)?],
//! )?]);
//!
//! let simulator = InventorySimulator::new(Arc::new(reference));
//! let result = simulator.run_with_config(&assessment, &EngineConfig::default());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Value types
pub mod case;
pub mod error;
pub mod phoneme;
pub mod ranking;

// Reference data and ordering
pub mod config;
pub mod ordering;
pub mod reference;
pub mod transcription;
pub mod tree;

// Engines
pub mod inference;
pub mod simulation;

// Re-export primary types at crate root for convenience
pub use case::{Assessment, AssessmentId, KnownCase};
pub use config::EngineConfig;
pub use error::{LookupError, PhonoError, PhonoResult, ValidationError};
pub use inference::{ClusterInferenceEngine, ClusterInferenceResult, NotProducibleResult};
pub use ordering::{CaseOrdering, ReplayOrder};
pub use phoneme::{Phoneme, Position};
pub use ranking::{TargetPhonemes, WordRanking};
pub use reference::{ReferenceTables, ReferenceTablesBuilder};
pub use simulation::{ClusterSplitPolicy, InventorySimulator, SimulationResult};
pub use transcription::{Segmentation, TranscriptionParser};
pub use tree::{DifficultyTree, NodeId, VisitedSet};
