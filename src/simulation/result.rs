use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::case::AssessmentId;
use crate::ordering::ReplayOrder;
use crate::phoneme::Phoneme;

/// Whether clusters are counted whole or as their two constituents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterSplitPolicy {
    /// Count `pɾ@p` as `p@p` and `ɾ@p`.
    #[default]
    Split,
    /// Count `pɾ@p` as one unit.
    KeepWhole,
}

impl From<bool> for ClusterSplitPolicy {
    fn from(split: bool) -> Self {
        if split {
            Self::Split
        } else {
            Self::KeepWhole
        }
    }
}

/// Outcome of one simulation run.
///
/// Equality compares counts as a map and required words as a multiset, plus
/// the provenance fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Observations per phoneme (after optional cluster splitting).
    #[serde(
        serialize_with = "serialize_counts",
        deserialize_with = "deserialize_counts"
    )]
    pub observation_counts: HashMap<Phoneme, usize>,
    /// Words that contributed at least one observation below the threshold,
    /// in order of first contribution.
    pub required_words: Vec<String>,
    /// Assessment the run replayed.
    pub source_assessment: AssessmentId,
    /// Replay order, if any was applied.
    pub ordering_used: Option<ReplayOrder>,
    /// Cluster counting policy.
    pub cluster_split: ClusterSplitPolicy,
    /// Threshold the run used.
    pub threshold: usize,
}

impl SimulationResult {
    /// An empty result carrying only provenance.
    #[must_use]
    pub fn empty(
        source_assessment: AssessmentId,
        ordering_used: Option<ReplayOrder>,
        cluster_split: ClusterSplitPolicy,
        threshold: usize,
    ) -> Self {
        Self {
            observation_counts: HashMap::new(),
            required_words: Vec::new(),
            source_assessment,
            ordering_used,
            cluster_split,
            threshold,
        }
    }

    /// Returns true if nothing was observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observation_counts.is_empty() && self.required_words.is_empty()
    }

    /// Observations of `phoneme` (0 if never observed).
    #[must_use]
    pub fn count_of(&self, phoneme: &Phoneme) -> usize {
        self.observation_counts.get(phoneme).copied().unwrap_or(0)
    }

    /// Phonemes observed at least `threshold` times.
    #[must_use]
    pub fn acquired(&self, threshold: usize) -> BTreeSet<&Phoneme> {
        self.observation_counts
            .iter()
            .filter(|(_, count)| **count >= threshold)
            .map(|(p, _)| p)
            .collect()
    }

    /// Phonemes observed, but fewer than `threshold` times.
    #[must_use]
    pub fn unreached(&self, threshold: usize) -> BTreeSet<&Phoneme> {
        self.observation_counts
            .iter()
            .filter(|(_, count)| **count < threshold)
            .map(|(p, _)| p)
            .collect()
    }
}

impl PartialEq for SimulationResult {
    fn eq(&self, other: &Self) -> bool {
        let mut mine: Vec<&String> = self.required_words.iter().collect();
        let mut theirs: Vec<&String> = other.required_words.iter().collect();
        mine.sort();
        theirs.sort();

        self.observation_counts == other.observation_counts
            && mine == theirs
            && self.source_assessment == other.source_assessment
            && self.ordering_used == other.ordering_used
            && self.cluster_split == other.cluster_split
            && self.threshold == other.threshold
    }
}

impl Eq for SimulationResult {}

#[derive(Serialize, Deserialize)]
struct CountEntry {
    phoneme: Phoneme,
    count: usize,
}

// JSON maps need string keys, so counts travel as a sorted entry list.
fn serialize_counts<S>(counts: &HashMap<Phoneme, usize>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut entries: Vec<CountEntry> = counts
        .iter()
        .map(|(phoneme, count)| CountEntry {
            phoneme: phoneme.clone(),
            count: *count,
        })
        .collect();
    entries.sort_by(|a, b| a.phoneme.cmp(&b.phoneme));
    entries.serialize(serializer)
}

fn deserialize_counts<'de, D>(deserializer: D) -> Result<HashMap<Phoneme, usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<CountEntry>::deserialize(deserializer)?;
    Ok(entries.into_iter().map(|e| (e.phoneme, e.count)).collect())
}
