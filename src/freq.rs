//! Per-site residue frequency tabulation.
//!
//! The counting convention follows the rest of the crate: a cell
//! contributes to its column's tally only when its code is below the
//! alphabet size passed to [`FrequencyTable::tabulate`], so gaps and
//! unknown symbols fall out of a 20-letter count but can be counted as
//! classes of their own by widening `nchar`.

use crate::matrix::CodeMatrix;

/// An `nchar x nsite` table of per-site residue frequencies.
///
/// Values are raw counts after [`FrequencyTable::tabulate`] and column
/// probabilities after [`FrequencyTable::normalized`]. Storage is
/// code-major: all sites of one residue code are contiguous.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    nchar: usize,
    nsite: usize,
    values: Vec<f64>,
}

impl FrequencyTable {
    /// Counts residue codes per site column.
    ///
    /// `nchar` is the alphabet size to count over; any cell whose code is
    /// `>= nchar` is excluded from its column's tally. With
    /// `nchar = AminoAcid::COUNT` that excludes gaps and unknowns; with
    /// `nchar = GAP_CODE + 1` gaps become a countable class.
    pub fn tabulate(matrix: &CodeMatrix, nchar: usize) -> FrequencyTable {
        let nsite = matrix.cols();
        let mut values = vec![0.0; nchar * nsite];
        for row in matrix.iter_rows() {
            for (site, &code) in row.iter().enumerate() {
                let code = code as usize;
                if code < nchar {
                    values[code * nsite + site] += 1.0;
                }
            }
        }
        FrequencyTable {
            nchar,
            nsite,
            values,
        }
    }

    /// The alphabet size counted over.
    pub fn nchar(&self) -> usize {
        self.nchar
    }

    /// The number of site columns.
    pub fn nsite(&self) -> usize {
        self.nsite
    }

    /// The value for one residue code at one site; `None` out of bounds.
    pub fn value(&self, code: usize, site: usize) -> Option<f64> {
        if code >= self.nchar || site >= self.nsite {
            return None;
        }
        Some(self.values[code * self.nsite + site])
    }

    /// The sum of one site column over all counted codes.
    pub fn column_sum(&self, site: usize) -> f64 {
        if site >= self.nsite {
            return 0.0;
        }
        (0..self.nchar)
            .map(|code| self.values[code * self.nsite + site])
            .sum()
    }

    /// A copy of the table with every column divided by its own sum.
    ///
    /// Columns whose sum is zero (every cell excluded) are left at zero
    /// rather than turned into NaN.
    pub fn normalized(&self) -> FrequencyTable {
        let mut out = self.clone();
        for site in 0..self.nsite {
            let sum = self.column_sum(site);
            if sum > 0.0 {
                for code in 0..self.nchar {
                    out.values[code * self.nsite + site] /= sum;
                }
            }
        }
        out
    }

    /// Per-code totals across all sites (the overall composition).
    pub fn overall(&self) -> Vec<f64> {
        (0..self.nchar)
            .map(|code| {
                self.values[code * self.nsite..(code + 1) * self.nsite]
                    .iter()
                    .sum()
            })
            .collect()
    }
}
