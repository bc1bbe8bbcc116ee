use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::case::{Assessment, KnownCase};
use crate::config::EngineConfig;
use crate::ordering::ReplayOrder;
use crate::phoneme::Phoneme;
use crate::reference::ReferenceTables;

use super::result::{ClusterSplitPolicy, SimulationResult};

/// Replays assessments against a fixed set of reference tables.
///
/// The simulator holds no mutable state; every run keeps its own counters,
/// so one instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct InventorySimulator {
    reference: Arc<ReferenceTables>,
}

impl InventorySimulator {
    /// Creates a simulator over `reference`.
    #[must_use]
    pub fn new(reference: Arc<ReferenceTables>) -> Self {
        Self { reference }
    }

    /// Reference tables used for ordering.
    #[must_use]
    pub fn reference(&self) -> &ReferenceTables {
        &self.reference
    }

    /// Runs a simulation using the parameters in `config`.
    #[must_use]
    pub fn run_with_config(
        &self,
        assessment: &Assessment,
        config: &EngineConfig,
    ) -> SimulationResult {
        self.run(
            assessment,
            config.ordering.as_ref(),
            config.threshold,
            config.split_consonant_clusters.into(),
        )
    }

    /// Replays `assessment` and reports per-phoneme observation counts and
    /// the words needed to see every phoneme `threshold` times.
    ///
    /// Each distinct phoneme counts at most once per case. With
    /// [`ClusterSplitPolicy::Split`] a cluster counts as its two constituents,
    /// both at the cluster's position. Counting continues past the threshold,
    /// but a word only becomes required if it raised some phoneme's count
    /// while that count was still below the threshold.
    ///
    /// Degrades to an empty result when `threshold` is 0, the assessment is
    /// empty, or the ordering leaves no case to replay.
    #[must_use]
    pub fn run(
        &self,
        assessment: &Assessment,
        ordering: Option<&ReplayOrder>,
        threshold: usize,
        split: ClusterSplitPolicy,
    ) -> SimulationResult {
        let mut result =
            SimulationResult::empty(assessment.id(), ordering.cloned(), split, threshold);
        if threshold == 0 || assessment.is_empty() {
            debug!(
                assessment = %assessment.id(),
                threshold,
                cases = assessment.len(),
                "nothing to simulate"
            );
            return result;
        }

        let arranged: Vec<&KnownCase> = match ordering {
            Some(order) => order.arrange(&self.reference, assessment.cases()),
            None => assessment.iter().collect(),
        };

        let mut required: HashSet<&str> = HashSet::new();
        for case in arranged {
            if case.phonemes().is_empty() {
                debug!(word = case.word(), "case has no phonemes, skipped");
                continue;
            }

            let mut contributed = false;
            for unit in observed_units(case, split) {
                let count = result.observation_counts.entry(unit).or_insert(0);
                if *count < threshold {
                    contributed = true;
                }
                *count += 1;
            }

            if contributed && required.insert(case.word()) {
                result.required_words.push(case.word().to_string());
            }
        }

        debug!(
            assessment = %assessment.id(),
            ordering = ordering.map_or("insertion", ReplayOrder::name),
            threshold,
            phonemes = result.observation_counts.len(),
            required = result.required_words.len(),
            "simulation finished"
        );
        result
    }
}

// Distinct counting units of one case, in first-seen order.
fn observed_units(case: &KnownCase, split: ClusterSplitPolicy) -> Vec<Phoneme> {
    let mut seen = HashSet::new();
    let mut units = Vec::with_capacity(case.phonemes().len());
    let mut push = |p: Phoneme| {
        if seen.insert(p.clone()) {
            units.push(p);
        }
    };

    for phoneme in case.phonemes() {
        match (split, phoneme.split_cluster()) {
            (ClusterSplitPolicy::Split, Some([first, second])) => {
                push(first);
                push(second);
            }
            _ => push(phoneme.clone()),
        }
    }
    units
}

/// Counts how many cases contain each unit; useful as an upper bound when
/// checking a simulation.
#[must_use]
pub fn case_frequencies(
    assessment: &Assessment,
    split: ClusterSplitPolicy,
) -> HashMap<Phoneme, usize> {
    let mut out = HashMap::new();
    for case in assessment {
        for unit in observed_units(case, split) {
            *out.entry(unit).or_insert(0) += 1;
        }
    }
    out
}
