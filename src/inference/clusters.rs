use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::case::{Assessment, KnownCase};
use crate::error::ValidationError;
use crate::phoneme::{is_cluster_symbol, Phoneme, Position};
use crate::reference::ReferenceTables;

use super::result::{ClusterInferenceResult, NotProducibleResult};

/// Reassembles constituents into every recognized cluster they can form.
///
/// Two constituents combine only when they share a position; the result
/// carries that position. Both regular onset clusters and labialized
/// consonants count as recognized.
#[must_use]
pub fn combine_constituents<'a, I>(constituents: I) -> BTreeSet<Phoneme>
where
    I: IntoIterator<Item = &'a Phoneme>,
{
    let mut by_position: BTreeMap<Option<Position>, BTreeSet<&str>> = BTreeMap::new();
    for constituent in constituents {
        by_position
            .entry(constituent.position())
            .or_default()
            .insert(constituent.symbol());
    }

    let mut out = BTreeSet::new();
    for (position, symbols) in &by_position {
        for first in symbols {
            for second in symbols {
                let candidate = format!("{first}{second}");
                if !is_cluster_symbol(&candidate) {
                    continue;
                }
                if let Ok(cluster) = Phoneme::with_position(candidate, *position) {
                    out.insert(cluster);
                }
            }
        }
    }
    out
}

fn extend_with_constituents<'a>(
    into: &mut HashSet<Phoneme>,
    clusters: impl IntoIterator<Item = &'a Phoneme>,
) {
    for cluster in clusters {
        if let Some(parts) = cluster.split_cluster() {
            into.extend(parts);
        }
    }
}

fn produced_clusters(assessment: &Assessment) -> BTreeSet<Phoneme> {
    assessment
        .iter()
        .flat_map(KnownCase::clusters)
        .cloned()
        .collect()
}

/// Infers producible and non-producible clusters for an assessment.
///
/// Requires every assessed word to have an entry in the reference
/// target-phoneme table; a missing entry fails the whole run.
#[derive(Debug, Clone)]
pub struct ClusterInferenceEngine {
    reference: Arc<ReferenceTables>,
}

impl ClusterInferenceEngine {
    /// Creates an engine over `reference`.
    #[must_use]
    pub fn new(reference: Arc<ReferenceTables>) -> Self {
        Self { reference }
    }

    fn target_clusters_of<'r>(
        &'r self,
        case: &KnownCase,
    ) -> Result<impl Iterator<Item = &'r Phoneme>, ValidationError> {
        let targets = self.reference.targets().require(case.word()).map_err(|e| {
            warn!(word = case.word(), "word has no registered target phonemes");
            e
        })?;
        Ok(targets.iter().filter(|p| p.is_consonant_cluster()))
    }

    /// Clusters the child can plausibly produce.
    ///
    /// Evidence is the set of constituents of every produced cluster and of
    /// every target cluster of each assessed word, whatever the outcome.
    /// Any recognized cluster those constituents can form at a shared position
    /// is inferred, then classified against the target clusters of the whole
    /// table and the clusters actually produced.
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingTargetPhonemes`] if an assessed word
    /// has no target entry.
    pub fn infer_producible(
        &self,
        assessment: &Assessment,
    ) -> Result<ClusterInferenceResult, ValidationError> {
        if assessment.is_empty() {
            return Ok(ClusterInferenceResult::default());
        }

        let mut evidence: HashSet<Phoneme> = HashSet::new();
        for case in assessment {
            extend_with_constituents(&mut evidence, case.clusters());
            extend_with_constituents(&mut evidence, self.target_clusters_of(case)?);
        }

        let inferred = combine_constituents(&evidence);
        let result = ClusterInferenceResult::classify(
            inferred,
            &self.reference.targets().all_clusters(),
            produced_clusters(assessment),
        );
        debug!(
            assessment = %assessment.id(),
            constituents = evidence.len(),
            inferred = result.inferred().len(),
            gaps = result.in_targets_not_observed().len(),
            "producible clusters inferred"
        );
        Ok(result)
    }

    /// Clusters the child plausibly cannot produce.
    ///
    /// Evidence is the set of constituents of each word's target clusters
    /// that the child did not produce in that word. Inferred clusters are
    /// classified as for [`Self::infer_producible`], then split into valid
    /// inferences (never produced anywhere) and invalid ones (produced in
    /// some other word).
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingTargetPhonemes`] if an assessed word
    /// has no target entry.
    pub fn infer_not_producible(
        &self,
        assessment: &Assessment,
    ) -> Result<NotProducibleResult, ValidationError> {
        if assessment.is_empty() {
            return Ok(NotProducibleResult::default());
        }

        let mut evidence: HashSet<Phoneme> = HashSet::new();
        for case in assessment {
            let produced: HashSet<&Phoneme> = case.clusters().collect();
            let missed = self
                .target_clusters_of(case)?
                .filter(|target| !produced.contains(target));
            extend_with_constituents(&mut evidence, missed);
        }

        let inferred = combine_constituents(&evidence);
        let result = NotProducibleResult::new(ClusterInferenceResult::classify(
            inferred,
            &self.reference.targets().all_clusters(),
            produced_clusters(assessment),
        ));
        debug!(
            assessment = %assessment.id(),
            constituents = evidence.len(),
            valid = result.validly_inferred().len(),
            invalid = result.invalidly_inferred().len(),
            "non-producible clusters inferred"
        );
        Ok(result)
    }
}
