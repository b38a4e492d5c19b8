use bitvec::slice::BitSlice;

use crate::{
    tree::{HuffmanTree, Node},
    DecodeError,
};

/// Walk the tree bit by bit, emitting a symbol at every leaf.
///
/// The bitstring has to consist of whole codes. If it stops partway down the
/// tree, that's an error, not a dropped symbol.
pub fn decode<S: Copy>(bits: &BitSlice, tree: &HuffmanTree<S>) -> Result<Vec<S>, DecodeError> {
    let root = tree.root();
    let mut out = vec![];

    let mut cursor = root;
    // Bits consumed since the cursor last left the root.
    let mut pending = 0;
    for bit in bits.iter().by_vals() {
        pending += 1;
        match cursor.child(bit) {
            Node::Leaf { symbol, .. } => {
                out.push(*symbol);
                cursor = root;
                pending = 0;
            }
            Node::Branch(b) => cursor = b,
        }
    }

    if pending != 0 {
        return Err(DecodeError::Truncated {
            decoded: out.len(),
            trailing_bits: pending,
        });
    }

    Ok(out)
}
