use bitvec::vec::BitVec;

use crate::{CodeTable, EncodeError, Symbol};

/// Concatenate the codes of `symbols`, in order.
///
/// Fails on the first symbol without a code; nothing is ever skipped.
pub fn encode<S: Symbol>(symbols: &[S], codes: &CodeTable<S>) -> Result<BitVec, EncodeError> {
    let mut out = BitVec::new();
    for (position, symbol) in symbols.iter().enumerate() {
        let code = codes.get(symbol).ok_or_else(|| EncodeError::UnknownSymbol {
            symbol: symbol.label(),
            position,
        })?;
        out.extend_from_bitslice(code);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{code_table::bit_string, FrequencyTable, HuffmanTree};

    fn codes_for(text: &str) -> CodeTable<char> {
        let tree = HuffmanTree::build(&FrequencyTable::from_symbols(text.chars())).unwrap();
        CodeTable::from_tree(&tree)
    }

    #[test]
    fn concatenates_in_order() -> anyhow::Result<()> {
        // 'a' x3, 'b' x1, 'c' x1 => b, c merge first: a = 1, b = 00, c = 01.
        let codes = codes_for("aaabc");
        let bits = encode(&['a', 'b', 'c', 'a'], &codes)?;
        assert_eq!(bit_string(&bits), "100011");
        Ok(())
    }

    #[test]
    fn empty_input_is_empty_bitstring() -> anyhow::Result<()> {
        let codes = codes_for("ab");
        assert!(encode(&[], &codes)?.is_empty());
        Ok(())
    }

    #[test]
    fn unknown_symbol_fails_loudly() {
        let codes = codes_for("ab");
        let err = encode(&['a', 'b', 'z'], &codes).unwrap_err();
        assert_eq!(
            err,
            EncodeError::UnknownSymbol {
                symbol: "'z'".into(),
                position: 2
            }
        );
    }
}
