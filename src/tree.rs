use std::{cmp::Reverse, collections::BinaryHeap};

use tracing::{debug, trace};

use crate::{BuildError, FrequencyTable, Symbol};

/// A node of a Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<S> {
    Leaf { symbol: S, weight: u64 },
    Branch(Branch<S>),
}

/// An internal node. It always has exactly two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch<S> {
    weight: u64,
    left: Box<Node<S>>,
    right: Box<Node<S>>,
}

impl<S> Node<S> {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Branch(b) => b.weight,
        }
    }
}

impl<S> Branch<S> {
    /// Returns `None` if the combined weight doesn't fit in a `u64`.
    fn merge(left: Node<S>, right: Node<S>) -> Option<Self> {
        Some(Self {
            weight: left.weight().checked_add(right.weight())?,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// The child reached by a `0` bit.
    pub fn left(&self) -> &Node<S> {
        &self.left
    }

    /// The child reached by a `1` bit.
    pub fn right(&self) -> &Node<S> {
        &self.right
    }

    /// Follow one bit down the tree.
    pub fn child(&self, bit: bool) -> &Node<S> {
        if bit {
            &self.right
        } else {
            &self.left
        }
    }
}

/// A Huffman tree over at least two distinct symbols.
///
/// The root is a [`Branch`], so a tree with a single leaf can't be
/// represented, and every code derived from it is at least one bit long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<S> {
    root: Branch<S>,
}

impl<S: Symbol> HuffmanTree<S> {
    /// Build the tree with Huffman's greedy method.
    ///
    /// The two lightest nodes are merged until one remains; the first one
    /// taken becomes the left child. Nodes of equal weight are ordered by the
    /// smallest symbol they contain, which makes the tree shape reproducible.
    ///
    /// Every count must be positive and the counts must sum to at most
    /// `u64::MAX`. Together these bound the depth of the tree: a leaf at depth
    /// `d` needs a total weight of at least the `d`th Fibonacci number, so no
    /// tree is ever deeper than 92 levels and the recursive `Drop`, `Clone`
    /// and `PartialEq` of the boxed nodes stay shallow.
    pub fn build(frequencies: &FrequencyTable<S>) -> Result<Self, BuildError> {
        let distinct = frequencies.len();
        if distinct < 2 {
            return Err(BuildError::DegenerateAlphabet { distinct });
        }
        if let Some((symbol, _)) = frequencies.iter().find(|&(_, n)| n == 0) {
            return Err(BuildError::ZeroCount {
                symbol: symbol.label(),
            });
        }

        let mut active: BinaryHeap<Reverse<Pending<S>>> = frequencies
            .iter()
            .map(|(symbol, weight)| {
                Reverse(Pending {
                    weight,
                    representative: symbol,
                    node: Node::Leaf { symbol, weight },
                })
            })
            .collect();

        loop {
            let (Some(Reverse(x)), Some(Reverse(y))) = (active.pop(), active.pop()) else {
                // Only reachable if the heap started with fewer than 2 nodes,
                // which is ruled out above.
                return Err(BuildError::DegenerateAlphabet { distinct });
            };
            trace!(
                left = x.weight,
                right = y.weight,
                "merging {} and {}",
                x.representative.label(),
                y.representative.label()
            );

            let representative = x.representative.min(y.representative);
            let branch = Branch::merge(x.node, y.node).ok_or(BuildError::WeightOverflow)?;

            if active.is_empty() {
                debug!(distinct, weight = branch.weight, "built Huffman tree");
                return Ok(Self { root: branch });
            }

            active.push(Reverse(Pending {
                weight: branch.weight,
                representative,
                node: Node::Branch(branch),
            }));
        }
    }
}

impl<S> HuffmanTree<S> {
    pub fn root(&self) -> &Branch<S> {
        &self.root
    }

    /// Total weight, i.e. the length of the input the tree was built from.
    pub fn weight(&self) -> u64 {
        self.root.weight
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Depth of the deepest leaf, which is also the longest code length.
    pub fn depth(&self) -> usize {
        self.leaves().map(|(_, depth)| depth).max().unwrap_or(0)
    }

    /// All leaves with their depths, left to right.
    ///
    /// Walks the tree with an explicit stack, so skewed trees can't overflow
    /// the call stack.
    pub fn leaves(&self) -> impl Iterator<Item = (&Node<S>, usize)> + '_ {
        let mut stack = vec![(self.root.right(), 1), (self.root.left(), 1)];
        std::iter::from_fn(move || {
            while let Some((node, depth)) = stack.pop() {
                match node {
                    Node::Leaf { .. } => return Some((node, depth)),
                    Node::Branch(b) => {
                        stack.push((b.right(), depth + 1));
                        stack.push((b.left(), depth + 1));
                    }
                }
            }
            None
        })
    }
}

/// A node waiting in the active collection, keyed by weight then by the
/// smallest symbol in its subtree.
///
/// Subtrees are disjoint, so no two keys are ever equal.
#[derive(Debug)]
struct Pending<S> {
    weight: u64,
    representative: S,
    node: Node<S>,
}

impl<S: Symbol> PartialEq for Pending<S> {
    fn eq(&self, other: &Self) -> bool {
        (self.weight, self.representative) == (other.weight, other.representative)
    }
}

impl<S: Symbol> Eq for Pending<S> {}

impl<S: Symbol> PartialOrd for Pending<S> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Symbol> Ord for Pending<S> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.weight, self.representative).cmp(&(other.weight, other.representative))
    }
}
