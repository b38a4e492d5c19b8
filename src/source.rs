use std::{
    io::{self, BufRead},
    marker::PhantomData,
};

use crate::{error, symbol::ByteRepr};

/// A wrapper around a buffered reader.
///
/// Implements iterator, producing chunks of at most `chunk_size` bytes.
pub struct ChunkReader<R: BufRead> {
    input: R,
    chunk_size: usize,
}

impl<R: BufRead> ChunkReader<R> {
    /// # Panics
    ///
    /// If `chunk_size` is zero.
    pub fn new(input: R, chunk_size: usize) -> Self {
        assert_ne!(chunk_size, 0);
        Self { input, chunk_size }
    }

    /// Helper function for `Iterator::next`. The same logic, but slightly
    /// different types.
    ///
    /// Return `Ok(None)` on EOF.
    pub fn next_chunk(&mut self) -> io::Result<Option<Vec<u8>>> {
        let buf = self.input.fill_buf()?;

        if buf.is_empty() {
            Ok(None)
        } else {
            let n = buf.len().min(self.chunk_size);
            let chunk = buf[..n].to_vec();
            self.input.consume(n);
            Ok(Some(chunk))
        }
    }
}

impl<R: BufRead> Iterator for ChunkReader<R> {
    type Item = io::Result<Vec<u8>>;

    /// Get the next chunk.
    ///
    /// Return `None` on EOF.
    fn next(&mut self) -> Option<Self::Item> {
        // Massage types in the case of "succesfully produced nothing" (eof).
        self.next_chunk().transpose()
    }
}

/// Turns byte chunks into symbol chunks.
///
/// A symbol split across two byte chunks (e.g. a multi-byte UTF-8 character)
/// is carried over and completed by the next chunk. Input that ends in the
/// middle of a symbol is an error.
pub struct SymbolReader<R: BufRead, S> {
    chunks: ChunkReader<R>,
    carry: Vec<u8>,
    done: bool,
    _symbol: PhantomData<S>,
}

impl<R: BufRead, S: ByteRepr> SymbolReader<R, S> {
    pub fn new(input: R, chunk_size: usize) -> Self {
        Self {
            chunks: ChunkReader::new(input, chunk_size),
            carry: vec![],
            done: false,
            _symbol: PhantomData,
        }
    }

    /// Return `Ok(None)` on EOF.
    pub fn next_chunk(&mut self) -> io::Result<Option<Vec<S>>> {
        let mut symbols = vec![];
        while symbols.is_empty() {
            let Some(bytes) = self.chunks.next_chunk()? else {
                if !self.carry.is_empty() {
                    let n = self.carry.len();
                    self.carry.clear();
                    return error(format!("input ends with {n} byte(s) of an incomplete symbol"));
                }
                return Ok(None);
            };

            self.carry.extend_from_slice(&bytes);
            let consumed = S::decode_prefix(&self.carry, &mut symbols)?;
            self.carry.drain(..consumed);
        }
        Ok(Some(symbols))
    }
}

impl<R: BufRead, S: ByteRepr> Iterator for SymbolReader<R, S> {
    type Item = io::Result<Vec<S>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.next_chunk().transpose();
        // Stop after EOF or the first error.
        if !matches!(item, Some(Ok(_))) {
            self.done = true;
        }
        item
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufReader, Cursor, Read};

    use test_case::test_case;

    use super::*;

    /// Reads fine up to `fail_at` bytes, then fails.
    struct Flaky {
        data: Cursor<Vec<u8>>,
        fail_at: u64,
    }

    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.position() >= self.fail_at {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "flaky"));
            }
            let limit = (self.fail_at - self.data.position()) as usize;
            let n = buf.len().min(limit);
            self.data.read(&mut buf[..n])
        }
    }

    #[test_case(1)]
    #[test_case(3)]
    #[test_case(1024)]
    fn chunks_are_bounded(chunk_size: usize) -> anyhow::Result<()> {
        let input = b"hello, chunked world".to_vec();
        let chunks: Vec<_> =
            ChunkReader::new(Cursor::new(input.clone()), chunk_size).collect::<Result<_, _>>()?;
        assert!(chunks.iter().all(|c| !c.is_empty() && c.len() <= chunk_size));
        assert_eq!(chunks.concat(), input);
        Ok(())
    }

    #[test]
    fn empty_input_has_no_chunks() {
        assert_eq!(ChunkReader::new(Cursor::new(Vec::<u8>::new()), 8).count(), 0);
    }

    #[test_case(1)]
    #[test_case(2)]
    #[test_case(5)]
    fn chars_survive_chunk_boundaries(chunk_size: usize) -> anyhow::Result<()> {
        let text = "naïve café, 日本語";
        let chunks: Vec<Vec<char>> =
            SymbolReader::new(Cursor::new(text.as_bytes()), chunk_size).collect::<Result<_, _>>()?;
        let decoded: String = chunks.concat().into_iter().collect();
        assert_eq!(decoded, text);
        Ok(())
    }

    #[test]
    fn truncated_char_is_an_error() {
        let bytes = &"é".as_bytes()[..1];
        let mut reader = SymbolReader::<_, char>::new(Cursor::new(bytes), 8);
        let e = reader.next().unwrap().unwrap_err();
        assert_eq!(e.kind(), io::ErrorKind::InvalidData);
        assert!(reader.next().is_none());
    }

    #[test]
    fn read_failure_is_not_eof() {
        let flaky = Flaky {
            data: Cursor::new(vec![b'x'; 100]),
            fail_at: 10,
        };
        let mut reader = SymbolReader::<_, u8>::new(BufReader::with_capacity(4, flaky), 4);

        let mut seen = 0;
        let err = loop {
            match reader.next() {
                Some(Ok(chunk)) => seen += chunk.len(),
                Some(Err(e)) => break e,
                None => panic!("read failure was reported as EOF"),
            }
        };
        assert_eq!(seen, 10);
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
    }
}
