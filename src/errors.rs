use std::io;

/// The tree can't be built from the given frequency table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// Fewer than two distinct symbols. There's no meaningful variable-length
    /// code for such an alphabet, so the caller has to special-case it.
    #[error(
        "Huffman tree cannot be built with less than two distinct symbols (got {distinct})"
    )]
    DegenerateAlphabet { distinct: usize },

    /// A symbol with a count of zero. It never occurs in the input, so it
    /// needs no code.
    #[error("symbol {symbol} has a count of zero")]
    ZeroCount { symbol: String },

    /// The counts add up to more than `u64::MAX`.
    #[error("symbol counts sum to more than {}", u64::MAX)]
    WeightOverflow,
}

/// The input to encode doesn't match the code table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// Usually means the table was built from a different input.
    #[error("symbol {symbol} at position {position} has no code in the table")]
    UnknownSymbol { symbol: String, position: usize },
}

/// A decoding error, due to a malformed bitstring.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("bitstring ends mid-code: {trailing_bits} trailing bit(s) after {decoded} symbol(s)")]
    Truncated { decoded: usize, trailing_bits: usize },
}

impl From<DecodeError> for io::Error {
    fn from(e: DecodeError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, e)
    }
}

/// An error encountered while running a whole pipeline, from source to sink.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The symbol source couldn't be read.
    #[error("failed to read input")]
    Input(#[source] io::Error),

    /// The decoded symbols couldn't be written.
    #[error("failed to write output")]
    Output(#[source] io::Error),

    /// The settings can't be used, e.g. a chunk size of zero.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The decoded symbols don't match the input. Never expected to happen.
    #[error("decoded symbols differ from the input")]
    Mismatch,

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_converts_to_invalid_data() {
        let e: io::Error = DecodeError::Truncated {
            decoded: 3,
            trailing_bits: 2,
        }
        .into();
        assert_eq!(e.kind(), io::ErrorKind::InvalidData);
        assert!(e.to_string().contains("2 trailing bit(s)"));
    }

    #[test]
    fn degenerate_message_names_count() {
        let e = BuildError::DegenerateAlphabet { distinct: 1 };
        assert!(e.to_string().contains("got 1"));
    }
}
