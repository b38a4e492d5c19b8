use std::io::{self, Write};

use crate::symbol::ByteRepr;

/// A fixed size output buffer.
///
/// Symbols are encoded into it until it's full, then the whole chunk is
/// handed to the underlying writer at once.
struct OutBuf {
    buf: Vec<u8>,
    capacity: usize,
}

impl OutBuf {
    fn with_capacity(capacity: usize) -> Self {
        assert_ne!(capacity, 0);

        Self {
            buf: Vec::with_capacity(capacity + 4),
            capacity,
        }
    }

    fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn is_full(&self) -> bool {
        self.buf.len() >= self.capacity
    }

    /// Take the contents of the buffer, and reset it to be empty.
    fn take(&mut self) -> Vec<u8> {
        std::mem::replace(&mut self.buf, Vec::with_capacity(self.capacity + 4))
    }
}

/// Writes decoded symbols to a byte stream, in chunks.
///
/// Call [`finish`](Self::finish) when done: it writes the last partial chunk
/// and flushes. Every write failure is returned to the caller.
pub struct SymbolWriter<W: Write> {
    output: W,
    out_buf: OutBuf,
}

impl<W: Write> SymbolWriter<W> {
    /// # Panics
    ///
    /// If `chunk_size` is zero.
    pub fn new(output: W, chunk_size: usize) -> Self {
        Self {
            output,
            out_buf: OutBuf::with_capacity(chunk_size),
        }
    }

    pub fn write_symbols<S: ByteRepr>(&mut self, symbols: &[S]) -> io::Result<()> {
        for symbol in symbols {
            symbol.encode_into(&mut self.out_buf.buf);
            if self.out_buf.is_full() {
                self.write_chunk()?;
            }
        }
        Ok(())
    }

    /// Write whatever is buffered, flush, and give back the writer.
    pub fn finish(mut self) -> io::Result<W> {
        if !self.out_buf.is_empty() {
            self.write_chunk()?;
        }
        self.output.flush()?;
        Ok(self.output)
    }

    fn write_chunk(&mut self) -> io::Result<()> {
        let chunk = self.out_buf.take();
        self.output.write_all(&chunk)
    }
}
