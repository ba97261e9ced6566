use std::cmp::Ordering;

use itertools::Itertools;
use log::trace;

use crate::{error::CodecError, frequency::FrequencyTable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// A Huffman prefix tree.
///
/// Building is deterministic: nodes waiting to be merged are ordered by
/// `(weight, sequence)`, where `sequence` is the order in which a node entered
/// the queue. Leaves enter in ascending symbol order, merged nodes enter as
/// they are created. Equal weights therefore resolve to the node that was
/// queued first, so rebuilding from the same [`FrequencyTable`] always yields
/// the same tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    root: Node,
}

impl Tree {
    pub fn new(frequencies: &FrequencyTable) -> Result<Self, CodecError> {
        if let Some((symbol, _)) = frequencies.iter().find(|(_, count)| *count == 0) {
            return Err(CodecError::InvalidFrequencyTable { symbol, count: 0 });
        }

        let trees = Trees::from_iter(
            frequencies
                .iter()
                .map(|(symbol, weight)| Node::Leaf { symbol, weight }),
        );
        let root = trees.merge().ok_or(CodecError::EmptyInput)?;

        Ok(Tree { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn weight(&self) -> u64 {
        self.root.weight()
    }
}

#[derive(Debug)]
struct Queued {
    sequence: usize,
    node: Node,
}

impl Queued {
    fn key(&self) -> (u64, usize) {
        (self.node.weight(), self.sequence)
    }
}

fn cmp_queued_desc(a: &Queued, b: &Queued) -> Ordering {
    b.key().cmp(&a.key())
}

/// Nodes waiting to be merged, kept sorted from heaviest to lightest so the
/// lightest one is popped off the end.
struct Trees {
    queue: Vec<Queued>,
    next_sequence: usize,
}

impl FromIterator<Node> for Trees {
    fn from_iter<T: IntoIterator<Item = Node>>(iter: T) -> Self {
        let queue = iter
            .into_iter()
            .enumerate()
            .map(|(sequence, node)| Queued { sequence, node })
            .sorted_by(cmp_queued_desc)
            .collect_vec();
        let next_sequence = queue.len();

        Self {
            queue,
            next_sequence,
        }
    }
}

impl Trees {
    fn merge(mut self) -> Option<Node> {
        loop {
            let result = self.pop_lowest()?;
            match result {
                PopResult::TreesToMerge { left, right } => {
                    let weight = left.weight().saturating_add(right.weight());
                    trace!(
                        "merging nodes of weight {} and {} into {weight}",
                        left.weight(),
                        right.weight()
                    );

                    self.insert(Node::Internal {
                        weight,
                        left: Box::new(left),
                        right: Box::new(right),
                    });
                }
                PopResult::Single(node) => {
                    return Some(node);
                }
            }
        }
    }

    fn pop_lowest(&mut self) -> Option<PopResult> {
        let left = self.queue.pop()?.node;

        let item_result = match self.queue.pop() {
            Some(right) => PopResult::TreesToMerge {
                left,
                right: right.node,
            },
            None => PopResult::Single(left),
        };

        Some(item_result)
    }

    fn insert(&mut self, node: Node) {
        let queued = Queued {
            sequence: self.next_sequence,
            node,
        };
        self.next_sequence += 1;

        let key = queued.key();
        let position = self.queue.partition_point(|other| other.key() > key);
        self.queue.insert(position, queued);
    }
}

enum PopResult {
    TreesToMerge { left: Node, right: Node },
    Single(Node),
}
