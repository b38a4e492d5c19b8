use std::collections::{btree_map, BTreeMap};

use bitvec::{slice::BitSlice, vec::BitVec};

use crate::{
    tree::{HuffmanTree, Node},
    FrequencyTable, Symbol,
};

/// A single code word. Bit 0 is the first bit on the path from the root.
pub type Code = BitVec;

/// Maps each symbol of a tree to its code.
///
/// No code is a prefix of another: codes are the root-to-leaf paths of a tree
/// whose branches all have two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S> {
    codes: BTreeMap<S, Code>,
}

impl<S: Symbol> CodeTable<S> {
    pub fn from_tree(tree: &HuffmanTree<S>) -> Self {
        let mut codes = BTreeMap::new();

        // Each stack entry owns its path; siblings never share one.
        let root = tree.root();
        let mut stack: Vec<(&Node<S>, Code)> = vec![
            (root.right(), path_with(&Code::new(), true)),
            (root.left(), path_with(&Code::new(), false)),
        ];
        while let Some((node, path)) = stack.pop() {
            match node {
                Node::Leaf { symbol, .. } => {
                    codes.insert(*symbol, path);
                }
                Node::Branch(b) => {
                    stack.push((b.right(), path_with(&path, true)));
                    stack.push((b.left(), path_with(&path, false)));
                }
            }
        }

        Self { codes }
    }

    pub fn get(&self, symbol: &S) -> Option<&BitSlice> {
        self.codes.get(symbol).map(|code| code.as_bitslice())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Symbols and their codes, in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (S, &BitSlice)> + '_ {
        self.codes.iter().map(|(&s, code)| (s, code.as_bitslice()))
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(|c| c.len()).max().unwrap_or(0)
    }

    /// Sum of `2^-len` over all codes. At most 1 for any prefix-free code,
    /// and exactly 1 for codes taken from a full binary tree.
    pub fn kraft_sum(&self) -> f64 {
        self.codes
            .values()
            .map(|c| (-(c.len() as f64)).exp2())
            .sum()
    }

    /// Number of bits needed to encode an input with these frequencies.
    ///
    /// Symbols without a code are not counted.
    pub fn encoded_len(&self, frequencies: &FrequencyTable<S>) -> u64 {
        frequencies
            .iter()
            .filter_map(|(s, n)| self.codes.get(&s).map(|c| c.len() as u64 * n))
            .sum()
    }
}

impl<'a, S> IntoIterator for &'a CodeTable<S> {
    type Item = (&'a S, &'a Code);
    type IntoIter = btree_map::Iter<'a, S, Code>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}

fn path_with(prefix: &BitSlice, bit: bool) -> Code {
    let mut path = Code::with_capacity(prefix.len() + 1);
    path.extend_from_bitslice(prefix);
    path.push(bit);
    path
}

/// Render a code as a string of `0`s and `1`s.
pub fn bit_string(bits: &BitSlice) -> String {
    bits.iter().by_vals().map(|b| if b { '1' } else { '0' }).collect()
}

#[cfg(test)]
pub(crate) fn parse_bits(s: &str) -> Code {
    s.chars().map(|c| c == '1').collect()
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn textbook_codes() -> CodeTable<char> {
        let freqs: FrequencyTable<char> = [
            ('A', 32),
            ('B', 42),
            ('C', 120),
            ('D', 7),
            ('E', 42),
            ('F', 24),
            ('G', 37),
            ('H', 2),
        ]
        .into_iter()
        .collect();
        let tree = HuffmanTree::build(&freqs).unwrap();
        CodeTable::from_tree(&tree)
    }

    #[test_case('C', "0")]
    #[test_case('G', "100")]
    #[test_case('B', "101")]
    #[test_case('E', "110")]
    #[test_case('A', "1110")]
    #[test_case('H', "111100")]
    #[test_case('D', "111101")]
    #[test_case('F', "11111")]
    fn textbook(symbol: char, expected: &str) {
        let codes = textbook_codes();
        assert_eq!(codes.get(&symbol).map(bit_string).as_deref(), Some(expected));
    }

    #[test]
    fn prefix_free() {
        let codes = textbook_codes();
        for (a, code_a) in codes.iter() {
            for (b, code_b) in codes.iter() {
                if a != b {
                    assert!(!code_b.starts_with(code_a), "{a:?} is a prefix of {b:?}");
                }
            }
        }
    }

    #[test]
    fn kraft_sum_of_full_tree_is_one() {
        let codes = textbook_codes();
        assert_eq!(codes.kraft_sum(), 1.0);
        assert_eq!(codes.max_code_len(), 6);
    }

    #[test]
    fn encoded_len_is_weighted_depth() {
        let codes = textbook_codes();
        let freqs = FrequencyTable::from_symbols("CEB".chars());
        assert_eq!(codes.encoded_len(&freqs), 7);
    }

    #[test]
    fn code_lengths_match_leaf_depths() -> anyhow::Result<()> {
        let freqs = FrequencyTable::from_symbols(b"mississippi river".iter().copied());
        let tree = HuffmanTree::build(&freqs)?;
        let codes = CodeTable::from_tree(&tree);

        assert_eq!(codes.len(), tree.leaf_count());
        for (node, depth) in tree.leaves() {
            let Node::Leaf { symbol, .. } = node else {
                panic!("leaves() yielded a branch");
            };
            assert_eq!(codes.get(symbol).map(|c| c.len()), Some(depth));
        }
        Ok(())
    }

    #[test]
    fn parse_and_render() {
        assert_eq!(bit_string(&parse_bits("0110")), "0110");
    }
}
