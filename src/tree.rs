use crate::freq::FrequencyTable;
use slotmap::{DefaultKey, SlotMap};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// A node in the prefix-code tree.
///
/// Replaces a reference-based node graph with arena keys: children are
/// indices into the owning [`Tree`]'s slot map, and node identity is the key
/// rather than a pointer.
#[derive(Debug, Clone)]
pub enum Node {
    /// A terminal node carrying exactly one symbol.
    Leaf { symbol: u8, weight: u64 },

    /// A merge of two subtrees; carries no symbol.
    Internal {
        weight: u64,
        left: DefaultKey,
        right: DefaultKey,
    },
}

impl Node {
    /// Returns the node's frequency weight.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }
}

/// Heap entry for the greedy merge.
///
/// `seq` is a strictly increasing insertion sequence number: when weights are
/// equal, the first-inserted node wins extraction, which makes the tree
/// canonical for a given ordered leaf sequence. Derived ordering compares
/// `weight` first, then `seq`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct HeapEntry {
    weight: u64,
    seq: u32,
    key: DefaultKey,
}

/// The binary prefix-code tree, stored as an arena of tagged nodes.
///
/// Constructed bottom-up by the greedy merge, immutable once built. Callers
/// that want a diagram keep it around for [`crate::render`]; otherwise it is
/// discarded after code generation.
#[derive(Debug, Clone)]
pub struct Tree {
    pub(crate) nodes: SlotMap<DefaultKey, Node>,
    pub(crate) root: DefaultKey,
}

impl Tree {
    /// Builds the canonical tree for a frequency table.
    ///
    /// One leaf per distinct symbol goes into a min-heap (leaves inserted in
    /// ascending symbol order); the two lowest-weight nodes are repeatedly
    /// merged, first-extracted becoming the left child, until one root
    /// remains. O(n log n) in the number of distinct symbols.
    ///
    /// A single-entry table yields a lone leaf root; code generation handles
    /// that case separately. `freqs` is non-empty by construction, so this
    /// cannot fail.
    pub fn from_frequencies(freqs: &FrequencyTable) -> Self {
        let mut nodes = SlotMap::new();
        let mut heap = BinaryHeap::new();
        let mut seq = 0u32;

        for (symbol, weight) in freqs.iter() {
            let key = nodes.insert(Node::Leaf { symbol, weight });
            heap.push(Reverse(HeapEntry { weight, seq, key }));
            seq += 1;
        }

        while heap.len() > 1 {
            let Reverse(first) = heap.pop().expect("heap has at least two entries");
            let Reverse(second) = heap.pop().expect("heap has at least two entries");

            let weight = first.weight + second.weight;
            let key = nodes.insert(Node::Internal {
                weight,
                left: first.key,
                right: second.key,
            });

            heap.push(Reverse(HeapEntry { weight, seq, key }));
            seq += 1;
        }

        let root = heap.pop().expect("non-empty frequency table").0.key;

        Self { nodes, root }
    }

    /// Returns the root node's key.
    pub fn root(&self) -> DefaultKey {
        self.root
    }

    /// Looks up a node by key.
    pub fn node(&self, key: DefaultKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Number of nodes in the arena (leaves plus internal nodes).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True only for a tree that holds no nodes; never produced by
    /// [`Tree::from_frequencies`].
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
