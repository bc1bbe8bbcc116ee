//! Phoneme value types and the closed consonant-cluster inventory.
//!
//! A [`Phoneme`] is an IPA-like symbol plus an optional syllabic position.
//! Equality, ordering and hashing are all by `(symbol, position)`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Two-consonant onset clusters recognized as a single phoneme unit.
pub const CONSONANT_CLUSTERS: &[&str] = &[
    "pɾ", "bɾ", "tɾ", "dɾ", "kɾ", "gɾ", "fɾ", "vɾ", "pl", "bl", "tl", "kl", "gl", "fl", "vl",
];

/// Labialized consonants, also treated as two-character clusters.
pub const LABIALIZED_CONSONANTS: &[&str] = &["kʷ", "gʷ"];

/// Returns true if `symbol` is a regular onset cluster.
#[must_use]
pub fn is_onset_cluster(symbol: &str) -> bool {
    CONSONANT_CLUSTERS.contains(&symbol)
}

/// Returns true if `symbol` is a labialized consonant.
#[must_use]
pub fn is_labialized(symbol: &str) -> bool {
    LABIALIZED_CONSONANTS.contains(&symbol)
}

/// Returns true if `symbol` names a consonant cluster of either kind.
#[must_use]
pub fn is_cluster_symbol(symbol: &str) -> bool {
    is_onset_cluster(symbol) || is_labialized(symbol)
}

/// Syllabic position of a phoneme within its word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// Onset of the first syllable.
    InitialOnset,
    /// Onset of a non-initial syllable.
    MedialOnset,
    /// Cluster onset of the first syllable.
    InitialComplexOnset,
    /// Cluster onset of a non-initial syllable.
    MedialComplexOnset,
    /// Coda of a non-final syllable.
    MedialCoda,
    /// Coda of the last syllable.
    FinalCoda,
}

impl Position {
    /// All positions, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::InitialOnset,
        Self::MedialOnset,
        Self::InitialComplexOnset,
        Self::MedialComplexOnset,
        Self::MedialCoda,
        Self::FinalCoda,
    ];

    /// Returns a short stable identifier suitable for logging and export.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::InitialOnset => "initial_onset",
            Self::MedialOnset => "medial_onset",
            Self::InitialComplexOnset => "initial_complex_onset",
            Self::MedialComplexOnset => "medial_complex_onset",
            Self::MedialCoda => "medial_coda",
            Self::FinalCoda => "final_coda",
        }
    }

    /// Returns true for the two complex (cluster) onset positions.
    #[must_use]
    pub const fn is_complex_onset(self) -> bool {
        matches!(self, Self::InitialComplexOnset | Self::MedialComplexOnset)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A phoneme symbol tagged with its (optional) syllabic position.
///
/// # Examples
///
/// ```
/// use phonoscope::{Phoneme, Position};
///
/// let pr = Phoneme::new("pɾ", Position::InitialComplexOnset).unwrap();
/// assert!(pr.is_consonant_cluster());
///
/// let [p, r] = pr.split_cluster().unwrap();
/// assert_eq!(p.symbol(), "p");
/// assert_eq!(r.position(), Some(Position::InitialComplexOnset));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Phoneme {
    symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<Position>,
}

impl Phoneme {
    /// Creates a phoneme tagged with a position.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptySymbol`] if `symbol` is empty or blank.
    pub fn new(symbol: impl Into<String>, position: Position) -> Result<Self, ValidationError> {
        Self::with_position(symbol, Some(position))
    }

    /// Creates a phoneme without position information.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptySymbol`] if `symbol` is empty or blank.
    pub fn untagged(symbol: impl Into<String>) -> Result<Self, ValidationError> {
        Self::with_position(symbol, None)
    }

    /// Creates a phoneme with an optional position.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptySymbol`] if `symbol` is empty or blank.
    pub fn with_position(
        symbol: impl Into<String>,
        position: Option<Position>,
    ) -> Result<Self, ValidationError> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        Ok(Self { symbol, position })
    }

    /// Returns the phoneme symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the syllabic position, if tagged.
    #[must_use]
    pub const fn position(&self) -> Option<Position> {
        self.position
    }

    /// Returns true if the symbol is a regular or labialized cluster.
    ///
    /// Membership depends on the symbol only, never on the position.
    #[must_use]
    pub fn is_consonant_cluster(&self) -> bool {
        is_cluster_symbol(&self.symbol)
    }

    /// Splits a cluster into its two constituents, both inheriting this
    /// phoneme's position. Returns `None` for non-cluster phonemes.
    #[must_use]
    pub fn split_cluster(&self) -> Option<[Self; 2]> {
        if !self.is_consonant_cluster() {
            return None;
        }
        let mut chars = self.symbol.chars();
        let (Some(first), Some(second), None) = (chars.next(), chars.next(), chars.next()) else {
            return None;
        };
        Some([
            Self {
                symbol: first.to_string(),
                position: self.position,
            },
            Self {
                symbol: second.to_string(),
                position: self.position,
            },
        ])
    }
}

impl fmt::Display for Phoneme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(position) => write!(f, "{}@{}", self.symbol, position),
            None => f.write_str(&self.symbol),
        }
    }
}

#[derive(Deserialize)]
struct RawPhoneme {
    symbol: String,
    #[serde(default)]
    position: Option<Position>,
}

impl<'de> Deserialize<'de> for Phoneme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawPhoneme::deserialize(deserializer)?;
        Phoneme::with_position(raw.symbol, raw.position).map_err(serde::de::Error::custom)
    }
}
