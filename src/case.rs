//! Observed productions and the assessment that groups them.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::phoneme::Phoneme;
use crate::transcription::TranscriptionParser;

/// One observed (or target) production of one word.
///
/// Equality is by `(word, transcription, phonemes)`, ignoring `correct` and
/// the order of `phonemes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawKnownCase")]
pub struct KnownCase {
    word: String,
    transcription: String,
    correct: bool,
    phonemes: Vec<Phoneme>,
}

impl KnownCase {
    /// Creates a case.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyWord`] if `word` is blank.
    pub fn new(
        word: impl Into<String>,
        transcription: impl Into<String>,
        correct: bool,
        phonemes: Vec<Phoneme>,
    ) -> Result<Self, ValidationError> {
        let word = word.into();
        if word.trim().is_empty() {
            return Err(ValidationError::EmptyWord);
        }
        Ok(Self {
            word,
            transcription: transcription.into(),
            correct,
            phonemes,
        })
    }

    /// Creates a case whose phonemes come from segmenting `transcription`.
    ///
    /// The resulting phonemes carry no position; tagging belongs to callers
    /// that know the word's syllable structure.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyWord`] if `word` is blank.
    pub fn from_transcription(
        parser: &TranscriptionParser,
        word: impl Into<String>,
        transcription: impl Into<String>,
        correct: bool,
    ) -> Result<Self, ValidationError> {
        let transcription = transcription.into();
        let phonemes = parser
            .parse(&transcription)
            .into_iter()
            .map(Phoneme::untagged)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(word, transcription, correct, phonemes)
    }

    /// Word label.
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Raw transcription (may be empty).
    #[must_use]
    pub fn transcription(&self) -> &str {
        &self.transcription
    }

    /// Whether the production was judged correct.
    #[must_use]
    pub const fn is_correct(&self) -> bool {
        self.correct
    }

    /// Produced phonemes, in the order they were recorded.
    #[must_use]
    pub fn phonemes(&self) -> &[Phoneme] {
        &self.phonemes
    }

    /// Iterates the produced consonant clusters.
    pub fn clusters(&self) -> impl Iterator<Item = &Phoneme> {
        self.phonemes.iter().filter(|p| p.is_consonant_cluster())
    }

    fn sorted_phonemes(&self) -> Vec<&Phoneme> {
        let mut sorted: Vec<&Phoneme> = self.phonemes.iter().collect();
        sorted.sort();
        sorted
    }
}

impl PartialEq for KnownCase {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
            && self.transcription == other.transcription
            && self.phonemes.len() == other.phonemes.len()
            && self.sorted_phonemes() == other.sorted_phonemes()
    }
}

impl Eq for KnownCase {}

impl Hash for KnownCase {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.word.hash(state);
        self.transcription.hash(state);
        self.sorted_phonemes().hash(state);
    }
}

#[derive(Deserialize)]
struct RawKnownCase {
    word: String,
    #[serde(default)]
    transcription: String,
    correct: bool,
    #[serde(default)]
    phonemes: Vec<Phoneme>,
}

impl TryFrom<RawKnownCase> for KnownCase {
    type Error = ValidationError;

    fn try_from(raw: RawKnownCase) -> Result<Self, Self::Error> {
        Self::new(raw.word, raw.transcription, raw.correct, raw.phonemes)
    }
}

/// Unique identifier for an assessment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(Uuid);

impl AssessmentId {
    /// Creates a new random assessment ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an assessment ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for AssessmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The cases collected in one evaluation session.
///
/// Behaves as an insertion-ordered set: adding a case equal to one already
/// present is a no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawAssessment")]
pub struct Assessment {
    id: AssessmentId,
    created_at: DateTime<Utc>,
    cases: Vec<KnownCase>,
    #[serde(skip)]
    seen: HashSet<KnownCase>,
}

impl Assessment {
    /// Creates an empty assessment with a fresh ID.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(AssessmentId::new())
    }

    /// Creates an empty assessment with the given ID.
    #[must_use]
    pub fn with_id(id: AssessmentId) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            cases: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Builds an assessment from cases, dropping duplicates.
    #[must_use]
    pub fn from_cases(cases: impl IntoIterator<Item = KnownCase>) -> Self {
        let mut assessment = Self::new();
        assessment.extend(cases);
        assessment
    }

    /// Adds a case. Returns false if an equal case was already present.
    pub fn insert(&mut self, case: KnownCase) -> bool {
        if !self.seen.insert(case.clone()) {
            return false;
        }
        self.cases.push(case);
        true
    }

    /// Assessment ID.
    #[must_use]
    pub const fn id(&self) -> AssessmentId {
        self.id
    }

    /// Creation time of this session.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Cases in insertion order.
    #[must_use]
    pub fn cases(&self) -> &[KnownCase] {
        &self.cases
    }

    /// Iterates cases in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, KnownCase> {
        self.cases.iter()
    }

    /// Returns the first case recorded for `word`.
    #[must_use]
    pub fn case_for(&self, word: &str) -> Option<&KnownCase> {
        self.cases.iter().find(|c| c.word() == word)
    }

    /// Number of distinct cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Returns true if no case was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Removes every case, keeping the ID.
    pub fn clear(&mut self) {
        self.cases.clear();
        self.seen.clear();
    }
}

impl Default for Assessment {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<KnownCase> for Assessment {
    fn extend<T: IntoIterator<Item = KnownCase>>(&mut self, iter: T) {
        for case in iter {
            self.insert(case);
        }
    }
}

impl<'a> IntoIterator for &'a Assessment {
    type Item = &'a KnownCase;
    type IntoIter = std::slice::Iter<'a, KnownCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter()
    }
}

#[derive(Deserialize)]
struct RawAssessment {
    id: AssessmentId,
    created_at: DateTime<Utc>,
    #[serde(default)]
    cases: Vec<KnownCase>,
}

impl From<RawAssessment> for Assessment {
    fn from(raw: RawAssessment) -> Self {
        let mut assessment = Self {
            id: raw.id,
            created_at: raw.created_at,
            cases: Vec::with_capacity(raw.cases.len()),
            seen: HashSet::with_capacity(raw.cases.len()),
        };
        assessment.extend(raw.cases);
        assessment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phoneme::Position;

    fn ph(symbol: &str, position: Position) -> Phoneme {
        Phoneme::new(symbol, position).unwrap()
    }

    #[test]
    fn blank_word_is_rejected() {
        assert_eq!(
            KnownCase::new(" ", "", true, vec![]).unwrap_err(),
            ValidationError::EmptyWord
        );
    }

    #[test]
    fn equality_ignores_correctness_and_phoneme_order() {
        let a = KnownCase::new(
            "Gato",
            "",
            true,
            vec![ph("g", Position::InitialOnset), ph("t", Position::MedialOnset)],
        )
        .unwrap();
        let b = KnownCase::new(
            "Gato",
            "",
            false,
            vec![ph("t", Position::MedialOnset), ph("g", Position::InitialOnset)],
        )
        .unwrap();
        assert_eq!(a, b);

        let c = KnownCase::new("Gato", "['ga.tu]", true, a.phonemes().to_vec()).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn phoneme_multiplicity_matters() {
        let once = KnownCase::new("Bebe", "", true, vec![ph("b", Position::InitialOnset)]).unwrap();
        let twice = KnownCase::new(
            "Bebe",
            "",
            true,
            vec![ph("b", Position::InitialOnset), ph("b", Position::InitialOnset)],
        )
        .unwrap();
        assert_ne!(once, twice);
    }

    #[test]
    fn assessment_drops_duplicates_and_keeps_order() {
        let gato = KnownCase::new("Gato", "", true, vec![ph("g", Position::InitialOnset)]).unwrap();
        let anel = KnownCase::new("Anel", "", true, vec![ph("n", Position::MedialOnset)]).unwrap();

        let mut assessment = Assessment::new();
        assert!(assessment.insert(gato.clone()));
        assert!(assessment.insert(anel));
        assert!(!assessment.insert(gato));

        let words: Vec<&str> = assessment.iter().map(KnownCase::word).collect();
        assert_eq!(words, vec!["Gato", "Anel"]);

        assessment.clear();
        assert!(assessment.is_empty());
    }

    #[test]
    fn hashed_dedupe_matches_case_equality() {
        let mut assessment = Assessment::new();
        for i in 0..500 {
            let word = format!("w{i}");
            let forward = vec![ph("g", Position::InitialOnset), ph("t", Position::MedialOnset)];
            let reversed = vec![ph("t", Position::MedialOnset), ph("g", Position::InitialOnset)];
            let first = KnownCase::new(word.as_str(), "", true, forward).unwrap();
            let repeat = KnownCase::new(word.as_str(), "", false, reversed).unwrap();
            assert!(assessment.insert(first));
            assert!(!assessment.insert(repeat));
        }
        assert_eq!(assessment.len(), 500);

        let first = assessment.cases()[0].clone();
        assessment.clear();
        assert!(assessment.insert(first));

        let json = serde_json::to_value(&assessment).unwrap();
        assert!(json.get("seen").is_none());
    }

    #[test]
    fn from_transcription_uses_parser() {
        let parser = TranscriptionParser::new().unwrap();
        let case = KnownCase::from_transcription(&parser, "Prato", "['pɾa.tu]", true).unwrap();
        let symbols: Vec<&str> = case.phonemes().iter().map(Phoneme::symbol).collect();
        assert_eq!(symbols, vec!["pɾ", "t"]);
        assert_eq!(case.clusters().count(), 1);
        assert!(case.phonemes().iter().all(|p| p.position().is_none()));
    }

    #[test]
    fn assessment_serde_round_trip_dedupes() {
        let gato = KnownCase::new("Gato", "", true, vec![ph("g", Position::InitialOnset)]).unwrap();
        let mut assessment = Assessment::new();
        assessment.insert(gato.clone());

        let mut json = serde_json::to_value(&assessment).unwrap();
        let dup = serde_json::to_value(&gato).unwrap();
        json["cases"].as_array_mut().unwrap().push(dup);

        let back: Assessment = serde_json::from_value(json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.id(), assessment.id());
    }
}
