//! FASTA file parser and writer.
//!
//! This module handles reading and parsing FASTA format files.
//! It supports both single-line and multi-line sequences.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! ARNDCQEGHILK...
//! >another_sequence
//! MFPSTWYVARND...
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use thiserror::Error;

use crate::model::{Alignment, Sequence};

/// Errors that can occur during FASTA parsing.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Failed to open file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty FASTA file")]
    EmptyFile,

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("Sequence without header at line {0}")]
    SequenceWithoutHeader(usize),
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// Parses a FASTA file and returns an Alignment.
///
/// # Arguments
///
/// * `path` - Path to the FASTA file
///
/// # Returns
///
/// An `Alignment` containing all sequences from the file.
///
/// # Examples
///
/// ```no_run
/// use sitefreq::formats::fasta::parse_fasta_file;
///
/// let alignment = parse_fasta_file("sequences.fasta").unwrap();
/// println!("Loaded {} sequences", alignment.sequence_count());
/// ```
pub fn parse_fasta_file<P: AsRef<Path>>(path: P) -> FastaResult<Alignment> {
    let file = File::open(&path)?;
    let metadata = file.metadata()?;
    let file_size = metadata.len() as usize;

    // For large files, read entire file into memory at once (faster than line-by-line)
    if file_size > 1_000_000 {
        // > 1MB: read all at once
        let mut reader = BufReader::with_capacity(1024 * 1024, file); // 1MB buffer
        let mut content = String::with_capacity(file_size);
        reader.read_to_string(&mut content)?;
        parse_fasta_fast(&content)
    } else {
        // Small files: use line-by-line for memory efficiency
        let reader = BufReader::new(file);
        parse_fasta(reader)
    }
}

/// Fast FASTA parser that works on a pre-loaded string.
/// Avoids per-line allocations by working with slices and bytes.
pub fn parse_fasta_fast(content: &str) -> FastaResult<Alignment> {
    // Estimate number of sequences (rough: one per 1KB on average for alignments)
    let estimated_seqs = (content.len() / 1000).max(10);
    let mut sequences = Vec::with_capacity(estimated_seqs);

    let mut current_name: Option<&str> = None;
    let mut current_data: Vec<u8> = Vec::new();
    let mut line_number = 0;
    let mut prev_seq_len: usize = 1000; // Track previous sequence length for better allocation

    for line in content.lines() {
        line_number += 1;
        let line = line.trim();

        // Skip empty lines
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            // Save previous sequence if exists
            if let Some(name) = current_name.take() {
                if !current_data.is_empty() {
                    prev_seq_len = current_data.len(); // Remember length for next allocation
                    current_data.shrink_to_fit(); // Reclaim excess capacity
                    sequences.push(Sequence::from_bytes(name, std::mem::take(&mut current_data)));
                }
            }

            // Parse new header - take everything before first space as the name
            let name = header.split_whitespace().next().unwrap_or(header);

            if name.is_empty() {
                return Err(FastaError::InvalidFormat(format!(
                    "Empty sequence identifier at line {}",
                    line_number
                )));
            }

            current_name = Some(name);
            // Use previous sequence length as guide (alignments have uniform length)
            current_data = Vec::with_capacity(prev_seq_len.max(1000));
        } else {
            // Sequence line
            if current_name.is_none() {
                return Err(FastaError::SequenceWithoutHeader(line_number));
            }

            // Fast append: most FASTA lines don't have internal whitespace
            if line.bytes().all(|b| !b.is_ascii_whitespace()) {
                current_data.extend_from_slice(line.as_bytes());
            } else {
                // Fallback: filter whitespace (rare case)
                current_data.extend(line.bytes().filter(|b| !b.is_ascii_whitespace()));
            }
        }
    }

    // Don't forget the last sequence
    if let Some(name) = current_name {
        if !current_data.is_empty() {
            current_data.shrink_to_fit(); // Reclaim excess capacity
            sequences.push(Sequence::from_bytes(name, current_data));
        }
    }

    if sequences.is_empty() {
        return Err(FastaError::EmptyFile);
    }

    sequences.shrink_to_fit(); // Reclaim excess capacity on the vector itself
    Ok(Alignment::new(sequences))
}

/// Parses FASTA content from a reader.
///
/// This function handles both single-line and multi-line sequences.
pub fn parse_fasta<R: BufRead>(reader: R) -> FastaResult<Alignment> {
    let mut sequences = Vec::new();
    let mut current_name: Option<String> = None;
    let mut current_data: Vec<u8> = Vec::new();
    let mut line_number = 0;
    let mut prev_seq_len: usize = 1000; // Track previous sequence length for better allocation

    for line_result in reader.lines() {
        line_number += 1;
        let line = line_result?;
        let line = line.trim();

        // Skip empty lines
        if line.is_empty() {
            continue;
        }

        if line.starts_with('>') {
            // Save previous sequence if exists
            if let Some(name) = current_name.take() {
                if !current_data.is_empty() {
                    prev_seq_len = current_data.len(); // Remember length for next allocation
                    current_data.shrink_to_fit(); // Reclaim excess capacity
                    sequences.push(Sequence::from_bytes(name, std::mem::take(&mut current_data)));
                }
            }

            // Parse new header - take everything after '>' and before first space
            let header = &line[1..];
            let name = header
                .split_whitespace()
                .next()
                .unwrap_or(header)
                .to_string();

            if name.is_empty() {
                return Err(FastaError::InvalidFormat(format!(
                    "Empty sequence identifier at line {}",
                    line_number
                )));
            }

            current_name = Some(name);
            // Use previous sequence length as guide (alignments have uniform length)
            current_data = Vec::with_capacity(prev_seq_len.max(1000));
        } else {
            // Sequence line
            if current_name.is_none() {
                return Err(FastaError::SequenceWithoutHeader(line_number));
            }

            // Append sequence data (removing any whitespace)
            if line.bytes().all(|b| !b.is_ascii_whitespace()) {
                current_data.extend_from_slice(line.as_bytes());
            } else {
                current_data.extend(line.bytes().filter(|b| !b.is_ascii_whitespace()));
            }
        }
    }

    // Don't forget the last sequence
    if let Some(name) = current_name {
        if !current_data.is_empty() {
            current_data.shrink_to_fit(); // Reclaim excess capacity
            sequences.push(Sequence::from_bytes(name, current_data));
        }
    }

    if sequences.is_empty() {
        return Err(FastaError::EmptyFile);
    }

    sequences.shrink_to_fit(); // Reclaim excess capacity on the vector itself
    Ok(Alignment::new(sequences))
}

/// Parses FASTA content from a string.
///
/// Useful for testing or processing in-memory data.
pub fn parse_fasta_str(content: &str) -> FastaResult<Alignment> {
    parse_fasta_fast(content)
}

/// Renders an alignment as FASTA, one record per sequence.
///
/// Each record's data is written on a single line, which keeps the output
/// trivially re-parseable.
pub fn to_fasta_string(alignment: &Alignment) -> String {
    let mut out = String::new();
    for sequence in alignment.iter() {
        out.push('>');
        out.push_str(sequence.name.as_str());
        out.push('\n');
        out.push_str(sequence.as_str());
        out.push('\n');
    }
    out
}
