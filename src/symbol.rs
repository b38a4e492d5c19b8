use std::{fmt::Debug, io};

use crate::error;

/// An atomic unit of the input alphabet.
///
/// The ordering is only ever used to break ties between equal weights while
/// building the tree. It has no influence on which symbols get short codes.
pub trait Symbol: Copy + Ord + Debug {
    /// Human-readable rendering, for reports and error messages.
    fn label(&self) -> String;
}

/// A symbol with a byte-level representation, so it can be read from and
/// written to byte streams.
pub trait ByteRepr: Symbol {
    /// Decode as many whole symbols from the front of `bytes` as possible,
    /// appending them to `out`.
    ///
    /// Returns the number of bytes consumed. Any unconsumed suffix is an
    /// incomplete symbol, to be retried once more bytes arrive.
    fn decode_prefix(bytes: &[u8], out: &mut Vec<Self>) -> io::Result<usize>;

    /// Append this symbol's byte representation to `out`.
    fn encode_into(&self, out: &mut Vec<u8>);
}

impl Symbol for u8 {
    fn label(&self) -> String {
        if self.is_ascii_graphic() {
            format!("'{}'", *self as char)
        } else {
            format!("0x{}", hex::encode([*self]))
        }
    }
}

impl ByteRepr for u8 {
    fn decode_prefix(bytes: &[u8], out: &mut Vec<Self>) -> io::Result<usize> {
        out.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        out.push(*self);
    }
}

impl Symbol for char {
    fn label(&self) -> String {
        format!("'{}'", self.escape_debug())
    }
}

impl ByteRepr for char {
    fn decode_prefix(bytes: &[u8], out: &mut Vec<Self>) -> io::Result<usize> {
        let valid = match std::str::from_utf8(bytes) {
            Ok(s) => s,
            // `error_len() == None` means the input ends mid-sequence: that's
            // fine, the rest of the sequence is in the next chunk.
            Err(e) if e.error_len().is_none() => {
                std::str::from_utf8(&bytes[..e.valid_up_to()]).map_err(invalid_utf8)?
            }
            Err(e) => {
                return error(format!(
                    "invalid UTF-8 at byte offset {} of chunk",
                    e.valid_up_to()
                ))
            }
        };
        out.extend(valid.chars());
        Ok(valid.len())
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        let mut buf = [0; 4];
        out.extend_from_slice(self.encode_utf8(&mut buf).as_bytes());
    }
}

fn invalid_utf8(e: std::str::Utf8Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

impl Symbol for u16 {
    fn label(&self) -> String {
        format!("{self:#06x}")
    }
}
