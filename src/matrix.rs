//! Numeric residue matrices.
//!
//! An [`Alignment`](crate::model::Alignment) stores residue letters; the
//! counting side of the crate works on the numeric codes of
//! [`residue`](crate::residue). `CodeMatrix` holds those codes for a whole
//! alignment in one flat row-major buffer (cell `(row, site)` lives at
//! `row * cols + site`), together with the row names, and converts in both
//! directions.

use thiserror::Error;

use crate::model::{Alignment, SeqName, Sequence};
use crate::residue::Residue;

/// Errors that can occur when encoding an alignment.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Cannot encode a ragged alignment: row lengths range from {min} to {max}")]
    RaggedAlignment { min: usize, max: usize },
}

/// A `rows x cols` matrix of extended residue codes.
///
/// Every cell holds a value in `0..CODE_COUNT`: 0-19 for the canonical
/// residues, [`GAP_CODE`](crate::residue::GAP_CODE) for gaps/stops and
/// [`UNKNOWN_CODE`](crate::residue::UNKNOWN_CODE) for anything else, so
/// encoding is total once the shape is rectangular.
#[derive(Debug, Clone)]
pub struct CodeMatrix {
    names: Vec<SeqName>,
    cols: usize,
    codes: Vec<u8>,
}

impl CodeMatrix {
    /// Encodes an alignment into residue codes.
    ///
    /// Fails only on ragged input; every symbol is representable.
    pub fn encode(alignment: &Alignment) -> Result<CodeMatrix, EncodeError> {
        if !alignment.is_valid_alignment {
            let min = alignment.iter().map(Sequence::len).min().unwrap_or(0);
            let max = alignment.iter().map(Sequence::len).max().unwrap_or(0);
            return Err(EncodeError::RaggedAlignment { min, max });
        }

        let cols = alignment.alignment_length();
        let mut codes = Vec::with_capacity(alignment.sequence_count() * cols);
        let mut names = Vec::with_capacity(alignment.sequence_count());
        for seq in alignment.iter() {
            names.push(seq.name.clone());
            codes.extend(
                seq.as_bytes()
                    .iter()
                    .map(|&b| Residue::from_letter(b).code()),
            );
        }
        Ok(CodeMatrix { names, cols, codes })
    }

    /// Number of rows (sequences).
    pub fn rows(&self) -> usize {
        self.names.len()
    }

    /// Number of columns (sites).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True when the matrix holds no rows.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The row names, in row order.
    pub fn names(&self) -> &[SeqName] {
        &self.names
    }

    /// The code at one cell; `None` out of bounds.
    pub fn code(&self, row: usize, site: usize) -> Option<u8> {
        if row >= self.rows() || site >= self.cols {
            return None;
        }
        Some(self.codes[row * self.cols + site])
    }

    /// One row of codes; `None` out of bounds.
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        if row >= self.rows() {
            return None;
        }
        Some(&self.codes[row * self.cols..(row + 1) * self.cols])
    }

    /// Iterates over the rows of codes in row order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u8]> {
        (0..self.rows()).map(|row| &self.codes[row * self.cols..(row + 1) * self.cols])
    }

    /// Decodes the whole matrix back into letters.
    ///
    /// Output is normalized: uppercase one-letter codes, `-` for gaps and
    /// stops, `X` for unknowns. For matrices that came from
    /// [`CodeMatrix::encode`] this round-trips the 20 canonical letters
    /// exactly (after case normalization).
    pub fn decode_alignment(&self) -> Alignment {
        let sequences = self
            .names
            .iter()
            .zip(self.iter_rows())
            .map(|(name, row)| {
                let letters: Vec<u8> = row
                    .iter()
                    .map(|&code| {
                        Residue::from_code(code).map_or(b'X', Residue::to_letter)
                    })
                    .collect();
                Sequence::from_bytes(name.clone(), letters)
            })
            .collect();
        Alignment::new(sequences)
    }
}
