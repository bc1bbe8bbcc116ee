use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PhonoError, PhonoResult};
use crate::phoneme::is_cluster_symbol;

use super::symbols::{vowels_longest_first, NASAL_DIGRAPHS, REMOVED_MARKS};

/// Outcome of segmenting one transcription.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segmentation {
    /// Consonant symbols in left-to-right order.
    pub phonemes: Vec<String>,
    /// Tokens that were neither a single character nor a known cluster and
    /// were split into one symbol per character.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inconsistent_tokens: Vec<String>,
}

impl Segmentation {
    /// Returns true if at least one token had to be split.
    #[must_use]
    pub fn had_inconsistencies(&self) -> bool {
        !self.inconsistent_tokens.is_empty()
    }
}

/// Segments raw transcriptions into consonant symbols.
///
/// Construction compiles the vowel mask once; parsing never fails and
/// degrades to an empty sequence on empty input.
#[derive(Debug, Clone)]
pub struct TranscriptionParser {
    vowel_mask: Regex,
    leading_vowel: Regex,
    leading_nasal: Regex,
    unicode_escape: Regex,
    whitespace: Regex,
}

impl TranscriptionParser {
    /// Builds a parser over the built-in vowel table.
    ///
    /// # Errors
    /// Returns an internal error if a built-in pattern fails to compile.
    pub fn new() -> PhonoResult<Self> {
        let alternation = vowels_longest_first()
            .into_iter()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            vowel_mask: compile(&format!("(?:{alternation})"))?,
            leading_vowel: compile(&format!("^(?:{alternation})"))?,
            leading_nasal: compile(&format!("^(?:{})", NASAL_DIGRAPHS.join("|")))?,
            unicode_escape: compile(r"\\u\{([0-9a-fA-F]{1,6})\}|\\u([0-9a-fA-F]{4})")?,
            whitespace: compile(r"\s+")?,
        })
    }

    /// Normalizes a transcription: decodes `\uXXXX` escapes, drops stray
    /// backslashes, strips whitespace and removes marker characters.
    #[must_use]
    pub fn clean(&self, transcription: &str) -> String {
        self.decode(transcription)
            .chars()
            .filter(|c| !REMOVED_MARKS.contains(c))
            .collect()
    }

    // Escape decoding and whitespace removal, syllable marks kept.
    fn decode(&self, transcription: &str) -> String {
        let decoded = self
            .unicode_escape
            .replace_all(transcription, |caps: &regex::Captures<'_>| {
                caps.get(1)
                    .or_else(|| caps.get(2))
                    .and_then(|hex| u32::from_str_radix(hex.as_str(), 16).ok())
                    .and_then(char::from_u32)
                    .map(String::from)
                    .unwrap_or_default()
            });
        self.whitespace
            .replace_all(&decoded, "")
            .chars()
            .filter(|c| *c != '\\')
            .collect()
    }

    /// Returns the consonant symbols of `transcription`, in order.
    #[must_use]
    pub fn parse(&self, transcription: &str) -> Vec<String> {
        self.segment(transcription).phonemes
    }

    /// Segments `transcription`, also reporting which tokens were split.
    #[must_use]
    pub fn segment(&self, transcription: &str) -> Segmentation {
        let mut out = Segmentation::default();
        for token in self.tokens(transcription) {
            if token.chars().count() == 1 || is_cluster_symbol(&token) {
                out.phonemes.push(token);
                continue;
            }
            debug!(
                transcription,
                token = token.as_str(),
                "inconsistent consonant run, splitting per character"
            );
            out.phonemes.extend(token.chars().map(String::from));
            out.inconsistent_tokens.push(token);
        }
        out
    }

    /// Returns the first consonant of the word, or `None` when the cleaned
    /// transcription is empty or starts with a vowel.
    #[must_use]
    pub fn initial_onset(&self, transcription: &str) -> Option<String> {
        let cleaned = self.clean(transcription);
        if self.leading_vowel.is_match(&cleaned) {
            return None;
        }
        cleaned.chars().next().map(String::from)
    }

    /// Returns the leading consonant run when it is a recognized cluster.
    #[must_use]
    pub fn initial_complex_onset(&self, transcription: &str) -> Option<String> {
        let cleaned = self.clean(transcription);
        if cleaned.is_empty() || self.leading_vowel.is_match(&cleaned) {
            return None;
        }
        self.tokens(transcription)
            .into_iter()
            .next()
            .filter(|token| is_cluster_symbol(token))
    }

    fn tokens(&self, transcription: &str) -> Vec<String> {
        let decoded = self.decode(transcription);
        let cleaned: String = decoded.chars().filter(|c| !REMOVED_MARKS.contains(c)).collect();
        if cleaned.is_empty() {
            return Vec::new();
        }

        // A word-initial nasal digraph is a vowel; the same letters after a
        // syllable mark are a vowel and an onset.
        let opening = decoded.trim_start_matches(|c: char| REMOVED_MARKS.contains(&c));
        let body = match self.leading_nasal.find(opening) {
            Some(nasal) => cleaned.get(nasal.end()..).unwrap_or_default(),
            None => cleaned.as_str(),
        };

        self.vowel_mask
            .replace_all(body, " ")
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

fn compile(pattern: &str) -> PhonoResult<Regex> {
    Regex::new(pattern)
        .map_err(|e| PhonoError::internal(format!("invalid built-in pattern '{pattern}': {e}")))
}
