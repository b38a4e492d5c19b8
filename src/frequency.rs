use std::{
    collections::{btree_map, BTreeMap},
    io,
};

use crate::Symbol;

/// How many times each distinct symbol occurs in an input.
///
/// Iterates in symbol order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<S> {
    counts: BTreeMap<S, u64>,
}

impl<S: Symbol> FrequencyTable<S> {
    /// Count the symbols of a sequence.
    pub fn from_symbols(symbols: impl IntoIterator<Item = S>) -> Self {
        let mut counts = BTreeMap::new();
        for s in symbols {
            *counts.entry(s).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn get(&self, symbol: &S) -> Option<u64> {
        self.counts.get(symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, or `None` if it doesn't fit in a `u64`.
    pub fn total(&self) -> Option<u64> {
        self.counts.values().try_fold(0u64, |acc, &n| acc.checked_add(n))
    }

    pub fn iter(&self) -> impl Iterator<Item = (S, u64)> + '_ {
        self.counts.iter().map(|(&s, &n)| (s, n))
    }
}

/// Duplicate symbols have their counts summed, saturating at `u64::MAX`.
/// Such a table is rejected when a tree is built from it.
impl<S: Symbol> FromIterator<(S, u64)> for FrequencyTable<S> {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counts = BTreeMap::new();
        for (s, n) in iter {
            let count = counts.entry(s).or_insert(0u64);
            *count = count.saturating_add(n);
        }
        Self { counts }
    }
}

impl<'a, S> IntoIterator for &'a FrequencyTable<S> {
    type Item = (&'a S, &'a u64);
    type IntoIter = btree_map::Iter<'a, S, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

/// Accumulates symbol counts chunk by chunk, keeping the sequence itself so
/// it can be replayed through the encoder afterwards.
#[derive(Debug, Clone)]
pub struct Tally<S> {
    counts: BTreeMap<S, u64>,
    symbols: Vec<S>,
}

impl<S: Symbol> Tally<S> {
    pub fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
            symbols: vec![],
        }
    }

    /// Drain a fallible chunk source to the end.
    ///
    /// A read failure is returned as-is. It's never mistaken for end of input.
    pub fn from_chunks<I>(chunks: I) -> io::Result<Self>
    where
        I: IntoIterator<Item = io::Result<Vec<S>>>,
    {
        let mut tally = Self::new();
        for chunk in chunks {
            tally.extend(&chunk?);
        }
        Ok(tally)
    }

    pub fn extend(&mut self, chunk: &[S]) {
        for &s in chunk {
            *self.counts.entry(s).or_insert(0) += 1;
        }
        self.symbols.extend_from_slice(chunk);
    }

    /// Symbols seen so far.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn finish(self) -> (FrequencyTable<S>, Vec<S>) {
        (FrequencyTable { counts: self.counts }, self.symbols)
    }
}

impl<S: Symbol> Default for Tally<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::io::ErrorKind;

    use test_case::test_case;

    use super::*;

    #[test_case(b"", &[])]
    #[test_case(b"a", &[(b'a', 1)])]
    #[test_case(b"abracadabra", &[(b'a', 5), (b'b', 2), (b'c', 1), (b'd', 1), (b'r', 2)])]
    fn counts(input: &[u8], expected: &[(u8, u64)]) {
        let table = FrequencyTable::from_symbols(input.iter().copied());
        let actual: Vec<_> = table.iter().collect();
        assert_eq!(actual, expected);
        assert_eq!(table.total(), Some(input.len() as u64));
    }

    #[test]
    fn chunking_does_not_matter() {
        let text = "the quick brown fox jumps over the lazy dog";
        let whole = FrequencyTable::from_symbols(text.chars());

        let mut tally = Tally::new();
        let chars: Vec<char> = text.chars().collect();
        for chunk in chars.chunks(5) {
            tally.extend(chunk);
        }
        let (table, symbols) = tally.finish();

        assert_eq!(table, whole);
        assert_eq!(symbols, chars);
    }

    #[test]
    fn sequence_is_kept_verbatim() -> anyhow::Result<()> {
        let chunks = vec![Ok(b"ba".to_vec()), Ok(vec![]), Ok(b"ab".to_vec())];
        let (_, symbols) = Tally::from_chunks(chunks)?.finish();
        assert_eq!(symbols, b"baab");
        Ok(())
    }

    #[test]
    fn read_failure_propagates() {
        let chunks = vec![
            Ok(b"abc".to_vec()),
            Err(io::Error::new(ErrorKind::BrokenPipe, "gone")),
        ];
        let e = Tally::<u8>::from_chunks(chunks).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::BrokenPipe);
    }

    #[test]
    fn from_pairs_merges_duplicates() {
        let table: FrequencyTable<char> = [('x', 2), ('y', 1), ('x', 3)].into_iter().collect();
        assert_eq!(table.get(&'x'), Some(5));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn huge_counts_do_not_wrap() {
        let table: FrequencyTable<char> = [('x', u64::MAX), ('x', 2), ('y', 1)].into_iter().collect();
        assert_eq!(table.get(&'x'), Some(u64::MAX));
        assert_eq!(table.total(), None);
    }
}
