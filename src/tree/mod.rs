//! Difficulty tree: a balanced binary partition of the word ranking.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. The tree is
//! built once from a [`WordRanking`] and is read-only afterwards; traversal
//! state lives in a caller-owned [`VisitedSet`], so any number of traversals
//! may run over one tree at the same time.
//!
//! Midpoint rule: for an inclusive index range `lo..=hi` the node word is the
//! one at `(lo + hi) / 2` (floor).

mod traversal;

use std::collections::{HashMap, VecDeque};

use serde::Serialize;

use crate::ranking::WordRanking;

pub use traversal::VisitedSet;

/// Index of a node in a [`DifficultyTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index of this node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One tree node: a word and its easier/harder partitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    word: String,
    rank: usize,
    easier: Option<NodeId>,
    harder: Option<NodeId>,
}

impl Node {
    /// Word held by this node.
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Rank of the word in the source ranking.
    #[must_use]
    pub const fn rank(&self) -> usize {
        self.rank
    }

    /// Root of the strictly easier partition.
    #[must_use]
    pub const fn easier(&self) -> Option<NodeId> {
        self.easier
    }

    /// Root of the strictly harder partition.
    #[must_use]
    pub const fn harder(&self) -> Option<NodeId> {
        self.harder
    }
}

/// Balanced binary partition tree over a word ranking.
///
/// A default-constructed tree is empty; searches and traversals over it
/// return empty results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DifficultyTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    #[serde(skip)]
    ranks: HashMap<String, usize>,
}

impl DifficultyTree {
    /// Builds the tree for `ranking`.
    #[must_use]
    pub fn build(ranking: &WordRanking) -> Self {
        let mut tree = Self::default();
        tree.rebuild(ranking);
        tree
    }

    /// Discards the current shape and rebuilds from `ranking`.
    pub fn rebuild(&mut self, ranking: &WordRanking) {
        self.clear();
        self.nodes.reserve(ranking.len());
        self.ranks = ranking
            .iter()
            .enumerate()
            .map(|(rank, word)| (word.to_string(), rank))
            .collect();
        self.root = self.partition(ranking.as_slice(), 0, ranking.len());
    }

    /// Empties the tree.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.ranks.clear();
        self.root = None;
    }

    // Builds the subtree for the half-open range `lo..hi`.
    fn partition(&mut self, words: &[String], lo: usize, hi: usize) -> Option<NodeId> {
        if lo >= hi {
            return None;
        }
        let mid = lo + (hi - 1 - lo) / 2;
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            word: words[mid].clone(),
            rank: mid,
            easier: None,
            harder: None,
        });
        let easier = self.partition(words, lo, mid);
        let harder = self.partition(words, mid + 1, hi);
        let node = &mut self.nodes[id.0];
        node.easier = easier;
        node.harder = harder;
        Some(id)
    }

    /// Finds the node holding `word` by descending along the ranking order.
    #[must_use]
    pub fn find_node(&self, word: &str) -> Option<NodeId> {
        let target = *self.ranks.get(word)?;
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id.0];
            current = match target.cmp(&node.rank) {
                std::cmp::Ordering::Equal => return Some(id),
                std::cmp::Ordering::Less => node.easier,
                std::cmp::Ordering::Greater => node.harder,
            };
        }
        None
    }

    /// Node by ID.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Root node ID, if built.
    #[must_use]
    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Word at the root, if built.
    #[must_use]
    pub fn root_word(&self) -> Option<&str> {
        self.root.map(|id| self.nodes[id.0].word.as_str())
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree was never built or was cleared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of levels (0 for an empty tree).
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((id, level)) = stack.pop() {
            deepest = deepest.max(level);
            let node = &self.nodes[id.0];
            stack.extend(node.easier.map(|c| (c, level + 1)));
            stack.extend(node.harder.map(|c| (c, level + 1)));
        }
        deepest
    }

    /// Words in breadth-first order, root first, easier child before harder.
    #[must_use]
    pub fn breadth_first_words(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut queue: VecDeque<NodeId> = self.root.into_iter().collect();
        while let Some(id) = queue.pop_front() {
            let node = &self.nodes[id.0];
            out.push(node.word.as_str());
            queue.extend(node.easier);
            queue.extend(node.harder);
        }
        out
    }
}
