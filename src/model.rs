//! Data model for alignments.
//!
//! This module contains the containers filled by the format parsers:
//! - `SeqName`: display label for one row, with the strict PHYLIP bound
//! - `Sequence`: one named row of residue characters
//! - `Alignment`: ordered rows with shape validation and gap-column removal
//!
//! Parsers build these values and hand them to the caller; nothing here
//! keeps references to parser state.

use std::collections::HashMap;
use std::fmt;

use crate::residue::Residue;

/// Longest name a strict PHYLIP record can carry.
pub const PHYLIP_NAME_LEN: usize = 10;

/// A sequence label.
///
/// The label is stored exactly as read; the classic 10-character PHYLIP
/// limit is applied only when the name is formatted for PHYLIP output via
/// [`SeqName::phylip_field`]. Truncation on output is the caller's cue to
/// warn. Uniqueness across an alignment is reported by
/// [`Alignment::duplicate_names`], never enforced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeqName(String);

impl SeqName {
    /// Creates a name from any label.
    pub fn new(label: impl Into<String>) -> Self {
        SeqName(label.into())
    }

    /// The label as read from the file.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the label fits a strict PHYLIP name field unmodified.
    pub fn is_phylip_safe(&self) -> bool {
        self.0.chars().count() <= PHYLIP_NAME_LEN
    }

    /// The space-padded 10-character PHYLIP name field, truncating longer
    /// labels.
    pub fn phylip_field(&self) -> String {
        let mut field: String = self.0.chars().take(PHYLIP_NAME_LEN).collect();
        while field.chars().count() < PHYLIP_NAME_LEN {
            field.push(' ');
        }
        field
    }
}

impl From<&str> for SeqName {
    fn from(label: &str) -> Self {
        SeqName::new(label)
    }
}

impl From<String> for SeqName {
    fn from(label: String) -> Self {
        SeqName::new(label)
    }
}

impl fmt::Display for SeqName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Represents a single sequence with its label and residue data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The sequence label (taxon name).
    pub name: SeqName,
    /// The residue characters, one byte per site.
    data: String,
}

impl Sequence {
    /// Creates a new sequence.
    pub fn new(name: impl Into<SeqName>, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Creates a sequence from raw bytes, as the parsers produce them.
    pub fn from_bytes(name: impl Into<SeqName>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data: String::from_utf8_lossy(&data).into_owned(),
        }
    }

    /// Returns the length of the sequence in sites.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The residue characters as text.
    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// The residue characters as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }

    /// Classifies the residue at one site; `None` past the end of the row.
    pub fn residue_at(&self, site: usize) -> Option<Residue> {
        self.as_bytes().get(site).map(|&b| Residue::from_letter(b))
    }
}

/// Represents an alignment of multiple sequences.
///
/// Row order is file order. Construction validates that all rows share one
/// length; a shape mismatch is recorded as a warning rather than an error,
/// so callers can still inspect what was read.
#[derive(Debug, Clone)]
pub struct Alignment {
    /// All sequences in the alignment.
    pub sequences: Vec<Sequence>,
    /// The expected length of all sequences (if aligned).
    alignment_length: Option<usize>,
    /// Whether all sequences have the same length.
    pub is_valid_alignment: bool,
    /// Warning message if sequences have different lengths.
    pub warning: Option<String>,
}

impl Alignment {
    /// Creates a new alignment from a vector of sequences.
    pub fn new(sequences: Vec<Sequence>) -> Self {
        let (is_valid, alignment_length, warning) = Self::validate_alignment(&sequences);
        Self {
            sequences,
            alignment_length,
            is_valid_alignment: is_valid,
            warning,
        }
    }

    /// Validates that all sequences have the same length.
    fn validate_alignment(sequences: &[Sequence]) -> (bool, Option<usize>, Option<String>) {
        if sequences.is_empty() {
            return (true, None, None);
        }

        let first_len = sequences[0].len();
        let all_same = sequences.iter().all(|s| s.len() == first_len);

        if all_same {
            (true, Some(first_len), None)
        } else {
            let min_len = sequences.iter().map(|s| s.len()).min().unwrap_or(0);
            let max_len = sequences.iter().map(|s| s.len()).max().unwrap_or(0);
            let warning = format!(
                "Warning: Sequences have different lengths (min: {}, max: {}). Not a valid alignment.",
                min_len, max_len
            );
            (false, Some(max_len), Some(warning))
        }
    }

    /// Returns the number of sequences (rows).
    pub fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    /// Returns the alignment length in sites (max row length when ragged).
    pub fn alignment_length(&self) -> usize {
        self.alignment_length.unwrap_or(0)
    }

    /// Returns the maximum label length (for display purposes).
    pub fn max_name_length(&self) -> usize {
        self.sequences
            .iter()
            .map(|s| s.name.as_str().len())
            .max()
            .unwrap_or(0)
    }

    /// Gets a sequence by row index.
    pub fn get(&self, index: usize) -> Option<&Sequence> {
        self.sequences.get(index)
    }

    /// Iterates over the rows in file order.
    pub fn iter(&self) -> impl Iterator<Item = &Sequence> {
        self.sequences.iter()
    }

    /// Returns true if the alignment is empty.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Labels that occur on more than one row, in first-occurrence order.
    ///
    /// Duplicates are legal at this layer; callers decide whether to warn
    /// or bail.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for seq in &self.sequences {
            *counts.entry(seq.name.as_str()).or_insert(0) += 1;
        }
        let mut reported: Vec<&str> = Vec::new();
        for seq in &self.sequences {
            let label = seq.name.as_str();
            if counts[label] > 1 && !reported.contains(&label) {
                reported.push(label);
            }
        }
        reported
    }

    /// Removes every column in which any row carries a non-canonical
    /// symbol (gap, stop or unknown), returning the stripped alignment and
    /// the number of columns removed.
    ///
    /// Removal is synchronized across rows, so the result is always
    /// rectangular. In ragged input a missing trailing cell counts as a
    /// gap, which means stripping also normalizes an invalid alignment into
    /// a valid one. Applying the operation twice removes nothing further.
    pub fn strip_gap_columns(&self) -> (Alignment, usize) {
        let ncol = self.alignment_length();
        let keep: Vec<bool> = (0..ncol)
            .map(|site| {
                self.sequences
                    .iter()
                    .all(|s| s.residue_at(site).is_some_and(|r| r.is_canonical()))
            })
            .collect();
        let removed = keep.iter().filter(|&&k| !k).count();

        if removed == 0 {
            return (self.clone(), 0);
        }

        let sequences = self
            .sequences
            .iter()
            .map(|s| {
                let kept: Vec<u8> = s
                    .as_bytes()
                    .iter()
                    .zip(&keep)
                    .filter(|(_, &k)| k)
                    .map(|(&b, _)| b)
                    .collect();
                Sequence::from_bytes(s.name.clone(), kept)
            })
            .collect();
        (Alignment::new(sequences), removed)
    }
}
