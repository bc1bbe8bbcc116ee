//! Reference context shared by the simulation and inference engines.
//!
//! Holds the word ranking, the difficulty tree built from it, and the
//! target-phoneme table. Built once, then shared read-only (usually behind
//! an `Arc`).

use std::collections::HashMap;

use crate::error::ValidationError;
use crate::ranking::{TargetPhonemes, WordRanking};
use crate::tree::DifficultyTree;

/// Immutable reference data for one assessment instrument.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    ranking: WordRanking,
    tree: DifficultyTree,
    tree_order: HashMap<String, usize>,
    targets: TargetPhonemes,
}

impl ReferenceTables {
    /// Builds the tables, constructing the difficulty tree from `ranking`.
    #[must_use]
    pub fn new(ranking: WordRanking, targets: TargetPhonemes) -> Self {
        let tree = DifficultyTree::build(&ranking);
        let tree_order = tree
            .breadth_first_words()
            .into_iter()
            .enumerate()
            .map(|(i, word)| (word.to_string(), i))
            .collect();
        Self {
            ranking,
            tree,
            tree_order,
            targets,
        }
    }

    /// Starts a builder.
    #[must_use]
    pub fn builder() -> ReferenceTablesBuilder {
        ReferenceTablesBuilder::default()
    }

    /// The difficulty ranking.
    #[must_use]
    pub const fn ranking(&self) -> &WordRanking {
        &self.ranking
    }

    /// The difficulty tree built from the ranking.
    #[must_use]
    pub const fn tree(&self) -> &DifficultyTree {
        &self.tree
    }

    /// The target-phoneme table.
    #[must_use]
    pub const fn targets(&self) -> &TargetPhonemes {
        &self.targets
    }

    /// Position of `word` in breadth-first tree order (root = 0).
    #[must_use]
    pub fn tree_rank(&self, word: &str) -> Option<usize> {
        self.tree_order.get(word).copied()
    }
}

/// Builder for [`ReferenceTables`].
#[derive(Debug, Clone, Default)]
pub struct ReferenceTablesBuilder {
    ranking: Option<WordRanking>,
    targets: TargetPhonemes,
}

impl ReferenceTablesBuilder {
    /// Set the difficulty ranking (required).
    #[must_use]
    pub fn ranking(mut self, ranking: WordRanking) -> Self {
        self.ranking = Some(ranking);
        self
    }

    /// Set the target-phoneme table (default: empty).
    #[must_use]
    pub fn targets(mut self, targets: TargetPhonemes) -> Self {
        self.targets = targets;
        self
    }

    /// Build the tables.
    ///
    /// # Errors
    /// Returns `ValidationError::MissingField` if no ranking was set.
    pub fn build(self) -> Result<ReferenceTables, ValidationError> {
        let ranking = self.ranking.ok_or_else(|| ValidationError::MissingField {
            field: "ranking".to_string(),
        })?;
        Ok(ReferenceTables::new(ranking, self.targets))
    }
}
