use bitvec::{slice::BitSlice, vec::BitVec};

use crate::{
    decode, encode, report::Report, BuildError, CodeTable, DecodeError, EncodeError,
    FrequencyTable, HuffmanTree, Symbol,
};

/// Everything derived from one frequency table: the tree (for decoding) and
/// the code table (for encoding).
///
/// Read-only once built. It can be shared between threads and used by any
/// number of encoders and decoders at once.
#[derive(Debug, Clone)]
pub struct Codec<S> {
    frequencies: FrequencyTable<S>,
    tree: HuffmanTree<S>,
    codes: CodeTable<S>,
}

impl<S: Symbol> Codec<S> {
    pub fn new(frequencies: FrequencyTable<S>) -> Result<Self, BuildError> {
        let tree = HuffmanTree::build(&frequencies)?;
        let codes = CodeTable::from_tree(&tree);
        Ok(Self {
            frequencies,
            tree,
            codes,
        })
    }

    /// Build a codec from the symbols it's going to encode.
    pub fn for_symbols(symbols: &[S]) -> Result<Self, BuildError> {
        Self::new(FrequencyTable::from_symbols(symbols.iter().copied()))
    }

    pub fn encode(&self, symbols: &[S]) -> Result<BitVec, EncodeError> {
        encode(symbols, &self.codes)
    }

    pub fn decode(&self, bits: &BitSlice) -> Result<Vec<S>, DecodeError> {
        decode(bits, &self.tree)
    }

    pub fn report(&self) -> Report<S> {
        Report::new(&self.frequencies, &self.codes)
    }

    pub fn frequencies(&self) -> &FrequencyTable<S> {
        &self.frequencies
    }

    pub fn tree(&self) -> &HuffmanTree<S> {
        &self.tree
    }

    pub fn codes(&self) -> &CodeTable<S> {
        &self.codes
    }
}
