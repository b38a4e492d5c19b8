use std::fmt;

use bitvec::vec::BitVec;

use crate::{code_table::bit_string, CodeTable, FrequencyTable, Symbol};

/// One line of a [`Report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<S> {
    pub symbol: S,
    pub frequency: u64,
    pub code: BitVec,
}

impl<S> Row<S> {
    pub fn code_len(&self) -> usize {
        self.code.len()
    }
}

/// A read-only view of a code, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report<S> {
    rows: Vec<Row<S>>,
}

impl<S: Symbol> Report<S> {
    /// Symbols missing from either table are left out.
    pub fn new(frequencies: &FrequencyTable<S>, codes: &CodeTable<S>) -> Self {
        let rows = frequencies
            .iter()
            .filter_map(|(symbol, frequency)| {
                let code = codes.get(&symbol)?.to_bitvec();
                Some(Row {
                    symbol,
                    frequency,
                    code,
                })
            })
            .collect();
        Self { rows }
    }

    /// Rows in symbol order.
    pub fn rows(&self) -> &[Row<S>] {
        &self.rows
    }

    /// Length of the input.
    pub fn symbols(&self) -> u64 {
        self.rows
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.frequency))
    }

    pub fn distinct(&self) -> usize {
        self.rows.len()
    }

    pub fn encoded_bits(&self) -> u64 {
        self.rows.iter().fold(0u64, |acc, r| {
            acc.saturating_add(r.frequency.saturating_mul(r.code_len() as u64))
        })
    }

    /// Bits a fixed-width code over the same alphabet would take.
    pub fn fixed_width_bits(&self) -> u64 {
        let width = match self.distinct() {
            0 | 1 => 1,
            n => usize::BITS - (n - 1).leading_zeros(),
        };
        self.symbols().saturating_mul(width as u64)
    }

    pub fn bits_per_symbol(&self) -> f64 {
        match self.symbols() {
            0 => 0.0,
            n => self.encoded_bits() as f64 / n as f64,
        }
    }
}

impl<S: Symbol> fmt::Display for Report<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.rows.iter().map(|r| r.symbol.label()).collect();
        let label_width = labels.iter().map(String::len).max().unwrap_or(0).max(6);

        writeln!(
            f,
            "{:<label_width$}  {:>10}  {:>4}  code",
            "symbol", "frequency", "bits"
        )?;
        for (row, label) in self.rows.iter().zip(&labels) {
            writeln!(
                f,
                "{label:<label_width$}  {:>10}  {:>4}  {}",
                row.frequency,
                row.code_len(),
                bit_string(&row.code)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "symbols:      {}", self.symbols())?;
        writeln!(f, "distinct:     {}", self.distinct())?;
        writeln!(
            f,
            "encoded bits: {} ({:.3} bits/symbol)",
            self.encoded_bits(),
            self.bits_per_symbol()
        )?;
        write!(f, "fixed width:  {}", self.fixed_width_bits())
    }
}
