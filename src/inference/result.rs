use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::phoneme::Phoneme;

/// Inferred clusters cross-classified against target membership and
/// observation. All sets are computed once and never change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterInferenceResult {
    inferred: BTreeSet<Phoneme>,
    inferred_in_targets: BTreeSet<Phoneme>,
    observed: BTreeSet<Phoneme>,
    in_targets_observed: BTreeSet<Phoneme>,
    in_targets_not_observed: BTreeSet<Phoneme>,
    outside_targets_observed: BTreeSet<Phoneme>,
    outside_targets_not_observed: BTreeSet<Phoneme>,
}

impl ClusterInferenceResult {
    /// Classifies `inferred` against the universe of target clusters and the
    /// clusters actually observed in the assessment.
    #[must_use]
    pub fn classify(
        inferred: BTreeSet<Phoneme>,
        target_clusters: &HashSet<Phoneme>,
        observed: BTreeSet<Phoneme>,
    ) -> Self {
        let mut out = Self {
            observed,
            ..Self::default()
        };
        for cluster in &inferred {
            let in_targets = target_clusters.contains(cluster);
            let seen = out.observed.contains(cluster);
            if in_targets {
                out.inferred_in_targets.insert(cluster.clone());
            }
            let bucket = match (in_targets, seen) {
                (true, true) => &mut out.in_targets_observed,
                (true, false) => &mut out.in_targets_not_observed,
                (false, true) => &mut out.outside_targets_observed,
                (false, false) => &mut out.outside_targets_not_observed,
            };
            bucket.insert(cluster.clone());
        }
        out.inferred = inferred;
        out
    }

    /// Every inferred cluster.
    #[must_use]
    pub const fn inferred(&self) -> &BTreeSet<Phoneme> {
        &self.inferred
    }

    /// Inferred clusters that are also targets of some word.
    #[must_use]
    pub const fn inferred_in_targets(&self) -> &BTreeSet<Phoneme> {
        &self.inferred_in_targets
    }

    /// Clusters actually produced somewhere in the assessment.
    #[must_use]
    pub const fn observed(&self) -> &BTreeSet<Phoneme> {
        &self.observed
    }

    /// Inferred, a target cluster, and observed.
    #[must_use]
    pub const fn in_targets_observed(&self) -> &BTreeSet<Phoneme> {
        &self.in_targets_observed
    }

    /// Inferred, a target cluster, but never observed.
    #[must_use]
    pub const fn in_targets_not_observed(&self) -> &BTreeSet<Phoneme> {
        &self.in_targets_not_observed
    }

    /// Inferred, not a target cluster, but observed.
    #[must_use]
    pub const fn outside_targets_observed(&self) -> &BTreeSet<Phoneme> {
        &self.outside_targets_observed
    }

    /// Inferred, not a target cluster, and never observed.
    #[must_use]
    pub const fn outside_targets_not_observed(&self) -> &BTreeSet<Phoneme> {
        &self.outside_targets_not_observed
    }

    /// Returns true if nothing was inferred or observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inferred.is_empty() && self.observed.is_empty()
    }
}

/// Clusters inferred as not producible, plus whether each inference holds up
/// against what the child produced elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotProducibleResult {
    classification: ClusterInferenceResult,
    validly_inferred: BTreeSet<Phoneme>,
    invalidly_inferred: BTreeSet<Phoneme>,
}

impl NotProducibleResult {
    /// Splits the classification into valid (never produced) and invalid
    /// (produced in some other word) inferences.
    #[must_use]
    pub fn new(classification: ClusterInferenceResult) -> Self {
        let (invalidly_inferred, validly_inferred) = classification
            .inferred()
            .iter()
            .cloned()
            .partition(|cluster| classification.observed().contains(cluster));
        Self {
            classification,
            validly_inferred,
            invalidly_inferred,
        }
    }

    /// The seven-set classification.
    #[must_use]
    pub const fn classification(&self) -> &ClusterInferenceResult {
        &self.classification
    }

    /// Inferred as not producible and never produced anywhere.
    #[must_use]
    pub const fn validly_inferred(&self) -> &BTreeSet<Phoneme> {
        &self.validly_inferred
    }

    /// Inferred as not producible but contradicted by another word.
    #[must_use]
    pub const fn invalidly_inferred(&self) -> &BTreeSet<Phoneme> {
        &self.invalidly_inferred
    }

    /// Returns true if nothing was inferred or observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classification.is_empty()
    }
}
