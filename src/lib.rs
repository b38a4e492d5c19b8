//! Huffman prefix coding.
//!
//! Counts symbol frequencies, builds a deterministic Huffman tree, derives a
//! prefix-free code table, and encodes and decodes symbol sequences with it.
//!
//! ```
//! use huffman::Codec;
//!
//! let text: Vec<char> = "abracadabra".chars().collect();
//! let codec = Codec::for_symbols(&text)?;
//! let bits = codec.encode(&text)?;
//! assert_eq!(codec.decode(&bits)?, text);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod code_table;
mod codec;
mod decode;
mod encode;
mod errors;
mod frequency;
pub mod report;
pub mod sink;
pub mod source;
mod symbol;
pub mod tree;

use std::io::{self, prelude::*};

use tracing::info;

pub use crate::code_table::{bit_string, Code, CodeTable};
pub use crate::codec::Codec;
pub use crate::decode::decode;
pub use crate::encode::encode;
pub use crate::errors::{BuildError, DecodeError, EncodeError, Error};
pub use crate::frequency::{FrequencyTable, Tally};
pub use crate::report::Report;
pub use crate::symbol::{ByteRepr, Symbol};
pub use crate::tree::HuffmanTree;

use crate::{sink::SymbolWriter, source::SymbolReader};

/// Default size of the chunks read from the input and written to the output.
pub const DEFAULT_CHUNK_SIZE: usize = 32 * 1024;

/// Settings for the stream-level helpers, [`round_trip`] and [`report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Upper bound on the size of each input and output chunk, in bytes.
    pub chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), Error> {
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk size must be positive".into()));
        }
        Ok(())
    }
}

/// What a [`round_trip`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub symbols: usize,
    pub distinct: usize,
    pub encoded_bits: usize,
}

/// Read every symbol from `input`, and build a codec for them.
pub fn read_codec<S: ByteRepr>(
    input: impl BufRead,
    config: Config,
) -> Result<(Codec<S>, Vec<S>), Error> {
    config.validate()?;
    let reader = SymbolReader::<_, S>::new(input, config.chunk_size);
    let (frequencies, symbols) = Tally::from_chunks(reader).map_err(Error::Input)?.finish();
    info!(
        symbols = symbols.len(),
        distinct = frequencies.len(),
        "read input"
    );

    let codec = Codec::new(frequencies)?;
    Ok((codec, symbols))
}

/// Encode all of `input`, decode it again, and write the result to `output`.
pub fn round_trip<S: ByteRepr>(
    input: impl BufRead,
    output: impl Write,
    config: Config,
) -> Result<Summary, Error> {
    let (codec, symbols) = read_codec::<S>(input, config)?;
    write_round_trip(&codec, &symbols, output, config)
}

/// Encode `symbols`, decode them again, and write the result to `output`.
///
/// Fails rather than writing anything wrong: the decoded symbols are checked
/// against the input before any of them are written.
pub fn write_round_trip<S: ByteRepr>(
    codec: &Codec<S>,
    symbols: &[S],
    output: impl Write,
    config: Config,
) -> Result<Summary, Error> {
    config.validate()?;

    let bits = codec.encode(symbols)?;
    info!(bits = bits.len(), "encoded");

    let decoded = codec.decode(&bits)?;
    if decoded != symbols {
        return Err(Error::Mismatch);
    }

    let mut writer = SymbolWriter::new(output, config.chunk_size);
    writer.write_symbols(&decoded).map_err(Error::Output)?;
    writer.finish().map_err(Error::Output)?;
    info!(symbols = decoded.len(), "wrote decoded output");

    Ok(Summary {
        symbols: symbols.len(),
        distinct: codec.codes().len(),
        encoded_bits: bits.len(),
    })
}

/// Read all of `input` and describe the code built for it.
pub fn report<S: ByteRepr>(input: impl BufRead, config: Config) -> Result<Report<S>, Error> {
    let (codec, _) = read_codec::<S>(input, config)?;
    Ok(codec.report())
}

/// Shorthand for a malformed-input error.
pub(crate) fn error<T>(msg: impl Into<String>) -> io::Result<T> {
    Err(io::Error::new(io::ErrorKind::InvalidData, msg.into()))
}
