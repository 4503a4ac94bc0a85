use std::{
    cmp::{Ord, Ordering, PartialEq, PartialOrd, Reverse},
    collections::BinaryHeap,
};

use crate::{error::Error, frequency::FrequencyTable};

/// Huffman code tree for a set of byte symbols.
///
/// Built by repeatedly merging the two rarest roots. When two roots are
/// equally frequent, the one created earlier is merged first: leaves are
/// created in ascending symbol order, then every merged root is newer than
/// all leaves and all roots merged before it. The same frequency table
/// therefore always yields the same tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree(Node);

impl Tree {
    /// creates the Huffman tree from the occurrences of each symbol
    /// fails with [`Error::EmptyAlphabet`] on an empty table
    pub fn new(frequencies: FrequencyTable) -> Result<Self, Error> {
        let mut leaves = frequencies.into_iter().collect::<Vec<(u8, usize)>>();
        leaves.sort_unstable_by_key(|&(symbol, _)| symbol);

        let mut roots = leaves
            .into_iter()
            .enumerate()
            .map(|(sequence, (symbol, frequency))| Reverse(Root::new(sequence, symbol, frequency)))
            .collect::<BinaryHeap<_>>();
        let mut sequence = roots.len();

        loop {
            match (roots.pop(), roots.pop()) {
                (Some(Reverse(rarer)), Some(Reverse(other))) => {
                    roots.push(Reverse(Root::merge(sequence, rarer, other)));
                    sequence += 1;
                }
                (Some(Reverse(root)), None) => {
                    log::trace!("code tree has {} leaves", root.inner.leaves());
                    return Ok(Tree(root.inner));
                }
                (None, _) => return Err(Error::EmptyAlphabet),
            }
        }
    }

    /// count occurrences of each byte in `bytes` and construct the Huffman tree
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::new(FrequencyTable::of(bytes))
    }

    pub fn root(&self) -> &Node {
        &self.0
    }

    /// total frequency of all symbols
    pub fn frequency(&self) -> usize {
        self.0.frequency()
    }
}

/// One node of the code tree. Children are exclusively owned by their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        frequency: usize,
    },
    Internal {
        frequency: usize,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn frequency(&self) -> usize {
        match self {
            Node::Leaf { frequency, .. } | Node::Internal { frequency, .. } => *frequency,
        }
    }

    /// number of leaves below this node
    pub fn leaves(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaves() + right.leaves(),
        }
    }
}

/// a node waiting in the heap, with its creation order as the tie-breaker
#[derive(Debug)]
struct Root {
    frequency: usize,
    sequence: usize,
    inner: Node,
}

impl Root {
    fn new(sequence: usize, symbol: u8, frequency: usize) -> Self {
        Root {
            frequency,
            sequence,
            inner: Node::Leaf { symbol, frequency },
        }
    }

    /// merge two roots, combining their occurrences; `left` becomes the left child
    fn merge(sequence: usize, left: Self, right: Self) -> Self {
        let frequency = left.frequency + right.frequency;
        Root {
            frequency,
            sequence,
            inner: Node::Internal {
                frequency,
                left: Box::new(left.inner),
                right: Box::new(right.inner),
            },
        }
    }
}

impl Ord for Root {
    fn cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(&self.frequency, &other.frequency)
            .then_with(|| Ord::cmp(&self.sequence, &other.sequence))
    }
}
impl PartialOrd for Root {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Root {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.cmp(other), Ordering::Equal)
    }
}
impl Eq for Root {}
