//! Adaptive traversals over a [`DifficultyTree`].
//!
//! Both traversals follow the same direction rule at each node: when the
//! node's word is untested or was answered correctly, the harder partition is
//! preferred; when it was answered incorrectly, the easier one is.

use std::collections::HashMap;

use tracing::trace;

use crate::case::KnownCase;

use super::{DifficultyTree, NodeId};

/// Caller-owned visited markers for one traversal session.
///
/// Keeping these outside the tree lets concurrent sessions share a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedSet {
    marks: Vec<bool>,
}

impl VisitedSet {
    /// Creates an empty overlay sized for `tree`.
    #[must_use]
    pub fn for_tree(tree: &DifficultyTree) -> Self {
        Self {
            marks: vec![false; tree.len()],
        }
    }

    /// Marks `id` as visited. Returns false if it already was.
    pub fn insert(&mut self, id: NodeId) -> bool {
        if id.0 >= self.marks.len() {
            self.marks.resize(id.0 + 1, false);
        }
        !std::mem::replace(&mut self.marks[id.0], true)
    }

    /// Returns true if `id` was visited in this session.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.marks.get(id.0).copied().unwrap_or(false)
    }

    /// Number of visited nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.marks.iter().filter(|m| **m).count()
    }

    /// Returns true if nothing was visited yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.marks.iter().any(|m| *m)
    }

    /// Clears every mark so the overlay can start a new session.
    pub fn reset(&mut self) {
        self.marks.iter_mut().for_each(|m| *m = false);
    }
}

// First recorded outcome per word.
fn outcomes(cases: &[KnownCase]) -> HashMap<&str, bool> {
    let mut out = HashMap::with_capacity(cases.len());
    for case in cases {
        out.entry(case.word()).or_insert(case.is_correct());
    }
    out
}

impl DifficultyTree {
    // Children in visiting order for a node, given the observed outcome.
    fn preferred_children(&self, id: NodeId, outcome: Option<bool>) -> [Option<NodeId>; 2] {
        let node = &self.nodes[id.0];
        match outcome {
            Some(false) => [node.easier, node.harder],
            None | Some(true) => [node.harder, node.easier],
        }
    }

    /// Reconstructs the order in which an adaptive, binary-search style
    /// assessment would have met the tested words.
    ///
    /// Walks the whole tree depth first; at every node the harder partition
    /// is explored first unless the node's word was answered incorrectly.
    /// Only words present in `cases` are emitted.
    #[must_use]
    pub fn build_sequence_order(&self, cases: &[KnownCase]) -> Vec<String> {
        let outcomes = outcomes(cases);
        let mut sequence = Vec::with_capacity(outcomes.len());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();

        while let Some(id) = stack.pop() {
            let word = self.nodes[id.0].word.as_str();
            let outcome = outcomes.get(word).copied();
            if outcome.is_some() {
                sequence.push(word.to_string());
            }
            trace!(word, ?outcome, "sequence order visit");

            let [first, second] = self.preferred_children(id, outcome);
            stack.extend(second);
            stack.extend(first);
        }
        sequence
    }

    /// Returns the words met along one adaptive descent from the root.
    ///
    /// Uses a fresh [`VisitedSet`]; see [`Self::first_words_with`].
    #[must_use]
    pub fn first_words(&self, cases: &[KnownCase]) -> Vec<String> {
        let mut visited = VisitedSet::for_tree(self);
        self.first_words_with(cases, &mut visited)
    }

    /// Descends from the root following the direction rule, visiting each
    /// node at most once per session. When the preferred child is missing or
    /// already visited, the descent moves to the other child at the same
    /// level; it stops when neither is available. Only words present in
    /// `cases` are emitted.
    pub fn first_words_with(&self, cases: &[KnownCase], visited: &mut VisitedSet) -> Vec<String> {
        let outcomes = outcomes(cases);
        let mut words = Vec::new();
        let mut current = self.root.filter(|id| !visited.contains(*id));

        while let Some(id) = current {
            visited.insert(id);
            let word = self.nodes[id.0].word.as_str();
            let outcome = outcomes.get(word).copied();
            if outcome.is_some() {
                words.push(word.to_string());
            }
            trace!(word, ?outcome, "first words visit");

            current = self
                .preferred_children(id, outcome)
                .into_iter()
                .flatten()
                .find(|child| !visited.contains(*child));
        }
        words
    }
}
