//! Reference tables: the word difficulty ranking and the per-word target phonemes.
//!
//! Both are read-mostly data, validated on construction and then shared
//! immutably through [`crate::ReferenceTables`].

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{LookupError, ValidationError};
use crate::phoneme::Phoneme;

/// A strict total order of distinct word labels, easiest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WordRanking {
    words: Vec<String>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl WordRanking {
    /// Validates and wraps a ranking.
    ///
    /// # Validation
    /// - Rejects an empty list.
    /// - Rejects blank labels.
    /// - Rejects duplicate labels.
    pub fn new<I, S>(words: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            return Err(ValidationError::EmptyRanking);
        }

        let mut index = HashMap::with_capacity(words.len());
        for (rank, word) in words.iter().enumerate() {
            if word.trim().is_empty() {
                return Err(ValidationError::EmptyWord);
            }
            if index.insert(word.clone(), rank).is_some() {
                return Err(ValidationError::DuplicateRankedWord { word: word.clone() });
            }
        }

        Ok(Self { words, index })
    }

    /// Rank of `word` (0 = easiest), if ranked.
    #[must_use]
    pub fn rank_of(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    /// Rank of `word`, failing when the word is not ranked.
    ///
    /// # Errors
    /// Returns [`LookupError::WordNotRanked`] for unknown words.
    pub fn require_rank(&self, word: &str) -> Result<usize, LookupError> {
        self.rank_of(word).ok_or_else(|| LookupError::WordNotRanked {
            word: word.to_string(),
        })
    }

    /// Word at `rank`.
    #[must_use]
    pub fn word_at(&self, rank: usize) -> Option<&str> {
        self.words.get(rank).map(String::as_str)
    }

    /// Returns true if `word` is ranked.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Number of ranked words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false for a validated ranking; kept for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words, easiest first.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.words
    }

    /// Iterates words, easiest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl<'de> Deserialize<'de> for WordRanking {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Vec::<String>::deserialize(deserializer)?;
        WordRanking::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Mapping from word to the phonemes that word is expected to elicit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetPhonemes {
    by_word: HashMap<String, Vec<Phoneme>>,
}

impl TargetPhonemes {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the targets for `word`, replacing any previous entry.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyWord`] if `word` is blank.
    pub fn insert(
        &mut self,
        word: impl Into<String>,
        targets: Vec<Phoneme>,
    ) -> Result<(), ValidationError> {
        let word = word.into();
        if word.trim().is_empty() {
            return Err(ValidationError::EmptyWord);
        }
        self.by_word.insert(word, targets);
        Ok(())
    }

    /// Targets for `word`, if registered.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<&[Phoneme]> {
        self.by_word.get(word).map(Vec::as_slice)
    }

    /// Targets for `word`, failing when the word was never registered.
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingTargetPhonemes`] on a lookup miss.
    pub fn require(&self, word: &str) -> Result<&[Phoneme], ValidationError> {
        self.get(word)
            .ok_or_else(|| ValidationError::MissingTargetPhonemes {
                word: word.to_string(),
            })
    }

    /// Every target consonant cluster across all registered words.
    #[must_use]
    pub fn all_clusters(&self) -> HashSet<Phoneme> {
        self.by_word
            .values()
            .flatten()
            .filter(|p| p.is_consonant_cluster())
            .cloned()
            .collect()
    }

    /// Registered words, sorted.
    #[must_use]
    pub fn words(&self) -> BTreeSet<&str> {
        self.by_word.keys().map(String::as_str).collect()
    }

    /// Number of registered words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_word.len()
    }

    /// Returns true if no word is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_word.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phoneme::Position;

    #[test]
    fn ranking_rejects_duplicates_and_empties() {
        let err = WordRanking::new(["Anel", "Gato", "Anel"]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateRankedWord {
                word: "Anel".to_string()
            }
        );
        assert_eq!(
            WordRanking::new(Vec::<String>::new()).unwrap_err(),
            ValidationError::EmptyRanking
        );
        assert_eq!(
            WordRanking::new(["Anel", ""]).unwrap_err(),
            ValidationError::EmptyWord
        );
    }

    #[test]
    fn ranking_lookups() {
        let ranking = WordRanking::new(["Anel", "Cabelo", "Gato"]).unwrap();
        assert_eq!(ranking.rank_of("Cabelo"), Some(1));
        assert_eq!(ranking.word_at(2), Some("Gato"));
        assert!(ranking.rank_of("Zebra").is_none());
        assert!(matches!(
            ranking.require_rank("Zebra"),
            Err(LookupError::WordNotRanked { .. })
        ));
    }

    #[test]
    fn ranking_deserialize_validates() {
        let ok: WordRanking = serde_json::from_str(r#"["Anel","Gato"]"#).unwrap();
        assert_eq!(ok.rank_of("Gato"), Some(1));
        assert!(serde_json::from_str::<WordRanking>(r#"["Anel","Anel"]"#).is_err());
    }

    #[test]
    fn targets_require_reports_missing_word() {
        let mut targets = TargetPhonemes::new();
        targets
            .insert(
                "Prato",
                vec![
                    Phoneme::new("pɾ", Position::InitialComplexOnset).unwrap(),
                    Phoneme::new("t", Position::MedialOnset).unwrap(),
                ],
            )
            .unwrap();

        assert_eq!(targets.require("Prato").unwrap().len(), 2);
        assert_eq!(
            targets.require("Flor").unwrap_err(),
            ValidationError::MissingTargetPhonemes {
                word: "Flor".to_string()
            }
        );
        assert_eq!(targets.all_clusters().len(), 1);
    }
}
