//! Case ordering strategies used to replay an assessment.
//!
//! Every [`CaseOrdering`] is a pure comparator over two cases, resolved
//! against the [`ReferenceTables`]. Words missing from the ranking sort after
//! every ranked word and keep their relative order.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::case::KnownCase;
use crate::reference::ReferenceTables;

/// Closed set of sort strategies over the difficulty ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseOrdering {
    /// Easiest word first.
    #[default]
    EasyFirst,
    /// Hardest word first.
    HardFirst,
    /// Breadth-first order of the difficulty tree (median word first).
    TreeOrder,
    /// Easiest, hardest, second easiest, second hardest, ...
    Interleaved,
}

impl CaseOrdering {
    /// Returns a short stable identifier suitable for logging/export.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::EasyFirst => "easy_first",
            Self::HardFirst => "hard_first",
            Self::TreeOrder => "tree_order",
            Self::Interleaved => "interleaved",
        }
    }

    /// Sort key of `word` under this strategy, or `None` if unranked.
    #[must_use]
    pub fn sort_key(self, reference: &ReferenceTables, word: &str) -> Option<usize> {
        let ranking = reference.ranking();
        match self {
            Self::EasyFirst => ranking.rank_of(word),
            Self::HardFirst => ranking.rank_of(word).map(|r| ranking.len() - 1 - r),
            Self::TreeOrder => reference.tree_rank(word),
            Self::Interleaved => ranking.rank_of(word).map(|r| {
                let mirrored = ranking.len() - 1 - r;
                if r <= mirrored {
                    2 * r
                } else {
                    2 * mirrored + 1
                }
            }),
        }
    }

    /// Compares two cases; unranked words sort last.
    #[must_use]
    pub fn compare(self, reference: &ReferenceTables, a: &KnownCase, b: &KnownCase) -> Ordering {
        match (
            self.sort_key(reference, a.word()),
            self.sort_key(reference, b.word()),
        ) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// How a simulation arranges the assessment's cases before replaying them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum ReplayOrder {
    /// Stable sort by a strategy.
    Strategy(CaseOrdering),
    /// Explicit word sequence; cases whose word is absent are left out.
    Explicit(Vec<String>),
}

impl From<CaseOrdering> for ReplayOrder {
    fn from(ordering: CaseOrdering) -> Self {
        Self::Strategy(ordering)
    }
}

impl ReplayOrder {
    /// Returns a short stable identifier suitable for logging/export.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Strategy(ordering) => ordering.name(),
            Self::Explicit(_) => "explicit",
        }
    }

    /// Arranges `cases` for replay.
    #[must_use]
    pub fn arrange<'a>(
        &self,
        reference: &ReferenceTables,
        cases: &'a [KnownCase],
    ) -> Vec<&'a KnownCase> {
        match self {
            Self::Strategy(ordering) => {
                let unranked: HashSet<&str> = cases
                    .iter()
                    .map(KnownCase::word)
                    .filter(|w| ordering.sort_key(reference, w).is_none())
                    .collect();
                for word in &unranked {
                    warn!(word, ordering = ordering.name(), "word not ranked, replayed last");
                }

                let mut arranged: Vec<&KnownCase> = cases.iter().collect();
                arranged.sort_by(|a, b| ordering.compare(reference, a, b));
                arranged
            }
            Self::Explicit(sequence) => {
                let mut seen: HashSet<&str> = HashSet::with_capacity(sequence.len());
                let mut arranged = Vec::with_capacity(cases.len());
                for word in sequence {
                    if !seen.insert(word.as_str()) {
                        continue;
                    }
                    arranged.extend(cases.iter().filter(|c| c.word() == word.as_str()));
                }
                let dropped = cases.len() - arranged.len();
                if dropped > 0 {
                    debug!(dropped, "cases outside the explicit sequence left out of replay");
                }
                arranged
            }
        }
    }
}
